use patternkit_core::{Gender, Measurements, Point, SleeveSettings};
use patternkit_designer::{DraftGenerator, DraftOptions, GarmentType};
use patternkit_export::sleeve::{
    CUFF_PIECE, UNDER_SLEEVE, UNDER_SLEEVE_FRONT, UPPER_SLEEVE, UPPER_SLEEVE_BACK,
};
use patternkit_export::{split_sleeve, PatternExporter};
use proptest::prelude::*;

fn rectangular_sleeve() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(30.0, 20.0),
        Point::new(30.0, 40.0),
        Point::new(30.0, 60.0),
        Point::new(20.0, 60.0),
        Point::new(10.0, 60.0),
        Point::new(0.0, 60.0),
        Point::new(0.0, 40.0),
        Point::new(0.0, 20.0),
    ]
}

#[test]
fn test_two_piece_rectangular_sleeve() {
    let split = split_sleeve(&rectangular_sleeve(), 2, &SleeveSettings::default()).unwrap();

    assert_eq!(split.pieces.len(), 2);
    assert_eq!(split.pieces[0].name, UPPER_SLEEVE);
    assert_eq!(split.pieces[1].name, UNDER_SLEEVE);
    assert!(split.pieces.iter().all(|p| p.points.len() >= 3));
}

#[test]
fn test_unsupported_count_classification() {
    let err = PatternExporter::default()
        .export_sleeve(
            &patternkit_core::PatternPiece::new(rectangular_sleeve()),
            5,
            &SleeveSettings::default(),
            "sleeve",
        )
        .unwrap_err();
    assert!(err.is_unsupported_piece_count());
}

#[test]
fn test_drafted_sleeve_splits_into_three() {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Mens), DraftOptions::smoothed());
    let pieces = gen.generate(GarmentType::Shirt).unwrap();
    let sleeve = pieces.get("sleeve").unwrap();

    let (split, bundle) = PatternExporter::default()
        .export_sleeve(sleeve, 3, &SleeveSettings::default(), "Shirt sleeve")
        .unwrap();

    assert_eq!(split.pieces.len(), 3);
    assert_eq!(bundle.layout.placements.len(), 3);
    assert!(bundle.full.is_some());
}

#[test]
fn test_raw_drafted_sleeve_is_too_sparse() {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Mens), DraftOptions::default());
    let pieces = gen.generate(GarmentType::Shirt).unwrap();
    let sleeve = pieces.get("sleeve").unwrap();

    let err = split_sleeve(&sleeve.points, 2, &SleeveSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        patternkit_core::SplitError::TooFewPoints { count: 6, min: 10 }
    ));
}

/// Sleeves around x = 0: a cap of varying lean and curvature over tapering sides,
/// both edges sampled at the same heights.
fn sleeve_strategy() -> impl Strategy<Value = Vec<Point>> {
    (
        10.0..60.0f64,
        30.0..100.0f64,
        0.15..0.4f64,
        -0.3..0.3f64,
        0.3..1.5f64,
        0.3..1.5f64,
        0.5..1.0f64,
        13usize..40,
    )
        .prop_map(
            |(width, height, cap, lean, right_curve, left_curve, taper, samples)| {
                let half = width / 2.0;
                let apex = lean * width;
                let cap_height = cap * height;
                let edge = |y: f64, side: f64, curve: f64| {
                    if y < cap_height {
                        apex + (side * half - apex) * (y / cap_height).powf(curve)
                    } else {
                        let t = (y - cap_height) / (height - cap_height);
                        side * half * (1.0 - (1.0 - taper) * t)
                    }
                };
                let y_at = |k: usize| k as f64 * height / samples as f64;

                let mut outline: Vec<Point> = (0..=samples)
                    .map(|k| Point::new(edge(y_at(k), 1.0, right_curve), y_at(k)))
                    .collect();
                outline.extend(
                    (0..=samples)
                        .rev()
                        .map(|k| Point::new(edge(y_at(k), -1.0, left_curve), y_at(k))),
                );
                outline
            },
        )
}

proptest! {
    #[test]
    fn prop_split_pieces_close_on_the_seam(outline in sleeve_strategy()) {
        let settings = SleeveSettings::default();
        prop_assert!(outline.len() >= 10);

        let two = split_sleeve(&outline, 2, &settings);
        prop_assert!(two.is_ok(), "{:?}", two);
        let two = two.unwrap();
        let n = two.seam.len();
        let upper = &two.pieces[0].points;
        let under = &two.pieces[1].points;

        prop_assert!(upper.len() >= 3 && under.len() >= 3);
        prop_assert_eq!(&upper[upper.len() - n..], two.seam.as_slice());
        let reversed: Vec<Point> = two.seam.iter().rev().copied().collect();
        prop_assert_eq!(&under[under.len() - n..], reversed.as_slice());

        let three = split_sleeve(&outline, 3, &settings);
        prop_assert!(three.is_ok(), "{:?}", three);
        let names: Vec<String> = three.unwrap().pieces.into_iter().map(|p| p.name).collect();
        prop_assert_eq!(names, vec![UPPER_SLEEVE_BACK, UNDER_SLEEVE_FRONT, CUFF_PIECE]);
    }
}
