use patternkit_core::{Bounds, Grainline, PatternPiece, PieceError, PieceMap, Point};

fn rect(w: f64, h: f64) -> PatternPiece {
    PatternPiece::from_coords(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
}

#[test]
fn test_piece_bounds_follow_translation() {
    let piece = rect(20.0, 30.0).with_label("FRONT");
    let moved = piece.translated(5.0, 7.5);

    assert_eq!(moved.bounds(), Some(Bounds::new(5.0, 25.0, 7.5, 37.5)));
    assert_eq!(moved.label.as_deref(), Some("FRONT"));
}

#[test]
fn test_empty_piece_has_no_bounds() {
    assert!(PatternPiece::default().bounds().is_none());
}

#[test]
fn test_map_validation_reports_first_bad_piece() {
    let map = PieceMap::new()
        .with_piece("front", rect(10.0, 10.0))
        .and_then(|m| m.with_piece("strap", PatternPiece::from_coords(&[(0.0, 0.0), (9.0, 0.0)])))
        .unwrap();

    let err = map.validate().unwrap_err();
    assert!(matches!(err, PieceError::TooFewPoints { ref name, .. } if name == "strap"));
}

#[test]
fn test_deserialized_duplicates_are_caught() {
    let json = r#"[
        ["front", {"points": [{"x": 0.0, "y": 0.0}, {"x": 4.0, "y": 0.0}, {"x": 2.0, "y": 3.0}]}],
        ["front", {"points": [{"x": 0.0, "y": 0.0}, {"x": 5.0, "y": 0.0}, {"x": 2.0, "y": 3.0}]}]
    ]"#;
    let map: PieceMap = serde_json::from_str(json).unwrap();
    assert_eq!(
        map.validate(),
        Err(PieceError::DuplicateName("front".to_string()))
    );
}

#[test]
fn test_piece_serialization_skips_missing_annotations() {
    let piece = rect(1.0, 1.0).with_grainline(Grainline::Vertical);
    let json = serde_json::to_string(&piece).unwrap();
    assert!(json.contains("\"grainline\":\"vertical\""));
    assert!(!json.contains("label"));
    assert!(!json.contains("notches"));
}

#[test]
fn test_iteration_by_reference() {
    let map = PieceMap::new()
        .with_piece("a", rect(1.0, 1.0))
        .and_then(|m| m.with_piece("b", rect(2.0, 2.0)))
        .unwrap();

    let mut widths = Vec::new();
    for (_, piece) in &map {
        widths.push(piece.bounds().map(|b| b.width()).unwrap_or(0.0));
    }
    assert_eq!(widths, vec![1.0, 2.0]);
    assert_eq!(map.get("b").map(|p| p.points[2]), Some(Point::new(2.0, 2.0)));
}
