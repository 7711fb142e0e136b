use patternkit_core::{PatternPiece, PieceMap};
use patternkit_export::pack_pieces;
use proptest::prelude::*;

fn rect(w: f64, h: f64) -> PatternPiece {
    PatternPiece::from_coords(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
}

#[test]
fn test_row_wrap_after_three_pieces() {
    let pieces = PieceMap::new()
        .with_piece("front", rect(20.0, 30.0))
        .and_then(|m| m.with_piece("back", rect(20.0, 30.0)))
        .and_then(|m| m.with_piece("sleeve", rect(15.0, 40.0)))
        .and_then(|m| m.with_piece("collar", rect(10.0, 10.0)))
        .unwrap();

    let layout = pack_pieces(&pieces, 5.0, 3);

    let dy: Vec<f64> = layout.placements.iter().map(|p| p.offset.dy).collect();
    assert_eq!(dy, vec![0.0, 0.0, 0.0, 45.0]);
    let dx: Vec<f64> = layout.placements.iter().map(|p| p.offset.dx).collect();
    assert_eq!(dx, vec![0.0, 25.0, 50.0, 0.0]);

    let canvas = layout.canvas.unwrap();
    assert_eq!(canvas.max_x, 65.0);
    assert_eq!(canvas.max_y, 55.0);
}

#[test]
fn test_layout_depends_only_on_order_and_size() {
    let a = PieceMap::new()
        .with_piece("a", rect(10.0, 12.0))
        .and_then(|m| m.with_piece("b", rect(7.0, 3.0)))
        .unwrap();
    let b = PieceMap::new()
        .with_piece("a", rect(10.0, 12.0).translated(100.0, -40.0))
        .and_then(|m| m.with_piece("b", rect(7.0, 3.0).translated(-5.0, 9.0)))
        .unwrap();

    let la = pack_pieces(&a, 5.0, 3);
    let lb = pack_pieces(&b, 5.0, 3);
    let bounds_a: Vec<_> = la.placements.iter().map(|p| p.bounds).collect();
    let bounds_b: Vec<_> = lb.placements.iter().map(|p| p.bounds).collect();
    assert_eq!(bounds_a, bounds_b);
}

fn piece_strategy() -> impl Strategy<Value = PatternPiece> {
    (-50.0..50.0f64, -50.0..50.0f64, 1.0..60.0f64, 1.0..60.0f64, 0.0..1.0f64).prop_map(
        |(x, y, w, h, skew)| {
            PatternPiece::from_coords(&[
                (x, y),
                (x + w, y + h * skew),
                (x + w * 0.5, y + h),
            ])
        },
    )
}

proptest! {
    #[test]
    fn prop_packed_boxes_never_overlap(
        shapes in prop::collection::vec(piece_strategy(), 2..12),
        spacing in 0.5..10.0f64,
        per_row in 1usize..5,
    ) {
        let mut pieces = PieceMap::new();
        for (i, piece) in shapes.into_iter().enumerate() {
            pieces.insert(format!("piece_{}", i), piece).unwrap();
        }

        let layout = pack_pieces(&pieces, spacing, per_row);
        prop_assert_eq!(layout.placements.len(), pieces.len());

        for (i, a) in layout.placements.iter().enumerate() {
            for b in &layout.placements[i + 1..] {
                prop_assert!(
                    !a.bounds.overlaps(&b.bounds),
                    "{} {:?} overlaps {} {:?}", a.name, a.bounds, b.name, b.bounds
                );
            }
        }
    }
}
