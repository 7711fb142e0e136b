use patternkit_core::{Gender, Measurements, Settings};
use patternkit_designer::{DraftGenerator, DraftOptions, GarmentType};
use patternkit_export::PatternExporter;
use tempfile::TempDir;

#[test]
fn test_every_garment_exports_to_disk() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::default();
    let generator = DraftGenerator::new(
        Measurements::default_for(Gender::Womens),
        DraftOptions::smoothed(),
    );
    let exporter = PatternExporter::new(settings.export.clone());

    for garment in GarmentType::ALL {
        let pieces = generator.generate(garment).unwrap();
        let bundle = exporter.export(&pieces, &garment.to_string()).unwrap();
        let written = bundle
            .write_to_dir(dir.path(), &garment.to_string())
            .unwrap();

        assert_eq!(written.len(), bundle.tiles.len() + 2, "{}", garment);
        assert!(written.iter().all(|path| path.exists()));
    }
}

#[test]
fn test_sleeve_export_for_sleeved_garments() {
    let settings = Settings::default();
    let generator = DraftGenerator::new(
        Measurements::default_for(Gender::Mens),
        DraftOptions::smoothed(),
    );
    let exporter = PatternExporter::new(settings.export.clone());

    for garment in GarmentType::ALL.into_iter().filter(GarmentType::has_sleeve) {
        let pieces = generator.generate(garment).unwrap();
        let sleeve = pieces.get("sleeve").unwrap();
        let (split, bundle) = exporter
            .export_sleeve(sleeve, 2, &settings.sleeve, "sleeve")
            .unwrap();
        assert_eq!(split.pieces.len(), 2);
        assert_eq!(bundle.layout.placements.len(), 2);
    }
}
