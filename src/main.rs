use anyhow::Context;
use patternkit::{
    init_logging, DraftGenerator, DraftOptions, GarmentType, Gender, Measurements,
    PatternExporter, Settings, BUILD_DATE, VERSION,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Usage: patternkit [garment] [output-dir] [settings.json|settings.toml]
fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("PatternKit {} (built {})", VERSION, BUILD_DATE);

    let mut args = std::env::args().skip(1);
    let garment: GarmentType = match args.next() {
        Some(name) => name.parse().map_err(anyhow::Error::msg)?,
        None => GarmentType::Shirt,
    };
    let output_dir = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);
    let settings = match args.next() {
        Some(path) => Settings::load_from_file(Path::new(&path))
            .with_context(|| format!("loading settings from {}", path))?,
        None => Settings::default(),
    };

    let options = DraftOptions {
        smooth: true,
        curves: settings.curve.clone(),
    };
    let generator = DraftGenerator::new(Measurements::default_for(Gender::Mens), options);
    let pieces = generator.generate(garment)?;

    let exporter = PatternExporter::new(settings.export.clone());
    let title = format!("{} pattern", garment);
    let bundle = exporter.export(&pieces, &title)?;
    let written = bundle.write_to_dir(&output_dir, &garment.to_string())?;
    info!("Wrote {} files to {}", written.len(), output_dir.display());

    if let Some(sleeve) = pieces.get("sleeve") {
        let (split, sleeve_bundle) =
            exporter.export_sleeve(sleeve, 2, &settings.sleeve, &format!("{} sleeve", garment))?;
        info!("Sleeve back side detected on the {}", split.back_side);
        let written = sleeve_bundle.write_to_dir(&output_dir, &format!("{}_sleeve", garment))?;
        info!("Wrote {} sleeve files", written.len());
    }

    Ok(())
}
