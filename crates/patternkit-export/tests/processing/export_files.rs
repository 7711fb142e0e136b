use patternkit_core::{ExportSettings, Gender, Measurements};
use patternkit_designer::{DraftGenerator, DraftOptions, GarmentType};
use patternkit_export::{page_to_svg, rasterize, PatternExporter};
use tempfile::TempDir;

fn shirt_bundle() -> patternkit_export::ExportBundle {
    let gen = DraftGenerator::new(Measurements::default_for(Gender::Womens), DraftOptions::smoothed());
    let pieces = gen.generate(GarmentType::Shirt).unwrap();
    PatternExporter::new(ExportSettings::default())
        .export(&pieces, "Shirt")
        .unwrap()
}

#[test]
fn test_bundle_writes_every_page() {
    let dir = TempDir::new().unwrap();
    let bundle = shirt_bundle();
    let written = bundle.write_to_dir(dir.path(), "shirt").unwrap();

    assert_eq!(written.len(), bundle.tiles.len() + 2);
    assert!(dir.path().join("shirt_full.svg").exists());
    assert!(dir.path().join("shirt_tile_01.svg").exists());
    assert!(dir.path().join("shirt_thumbnail.jpg").exists());

    let full = std::fs::read_to_string(dir.path().join("shirt_full.svg")).unwrap();
    assert!(full.contains("10 cm SCALE"));
    assert!(full.contains("FRONT BODICE"));
}

#[test]
fn test_thumbnail_fits_max_size() {
    let bundle = shirt_bundle();
    let thumb = bundle.thumbnail.as_ref().unwrap();
    let image = rasterize(thumb, 96.0).unwrap();
    let (w, h) = image.dimensions();
    assert_eq!(w.max(h), 1200);
}

#[test]
fn test_tile_svg_is_a4() {
    let bundle = shirt_bundle();
    let svg = page_to_svg(&bundle.tiles[0]);
    assert!(svg.contains(r#"width="21cm" height="29.7cm""#));
    assert!(svg.contains("Page 1 of"));
}

#[test]
fn test_bundle_json_roundtrip_of_pages() {
    let bundle = shirt_bundle();
    let json = serde_json::to_string(&bundle.tiles).unwrap();
    let pages: Vec<patternkit_export::Page> = serde_json::from_str(&json).unwrap();
    assert_eq!(pages.len(), bundle.tiles.len());
}
