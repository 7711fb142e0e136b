use patternkit_core::{Gender, Measurements};
use patternkit_designer::{DraftGenerator, DraftOptions, GarmentType};

#[test]
fn test_shirt_piece_order() {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Mens), DraftOptions::default());
    let pieces = gen.generate(GarmentType::Shirt).unwrap();
    let names: Vec<&str> = pieces.names().collect();
    assert_eq!(names, vec!["front", "back", "sleeve"]);
}

#[test]
fn test_coat_is_longer_than_shirt() {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Mens), DraftOptions::default());
    let shirt = gen.generate(GarmentType::Shirt).unwrap();
    let coat = gen.generate(GarmentType::Coat).unwrap();

    let height = |map: &patternkit_core::PieceMap, name: &str| {
        map.get(name).and_then(|p| p.bounds()).map(|b| b.height()).unwrap_or(0.0)
    };
    assert!((height(&coat, "front") - height(&shirt, "front") - 30.0).abs() < 1e-9);
    assert!((height(&coat, "sleeve") - height(&shirt, "sleeve") - 5.0).abs() < 1e-9);
}

#[test]
fn test_empty_measurements_use_formula_defaults() {
    let gen = DraftGenerator::new(Measurements::default(), DraftOptions::default());
    let pieces = gen.generate(GarmentType::Trousers).unwrap();
    let front = pieces.get("front").and_then(|p| p.bounds()).unwrap();
    // rise 27 + inseam 80
    assert!((front.height() - 107.0).abs() < 1e-9);
}

#[test]
fn test_smoothed_sleeve_is_splittable_size() {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Womens), DraftOptions::smoothed());
    let pieces = gen.generate(GarmentType::Shirt).unwrap();
    assert!(pieces.get("sleeve").unwrap().points.len() >= 10);
}
