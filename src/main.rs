extern crate log;
use anyhow::{anyhow, Context};
use clap::Parser;
use mapbox_wrapper::{feature::record::records_from_geojson, MapBoxWrapper, MapConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Render point and line features into an interactive Mapbox HTML page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
enum FeaturesConfig {
    /// JSON list of feature records.
    Records { filepath: PathBuf },
    /// GeoJSON feature collection.
    GeoJson { filepath: PathBuf },
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(default)]
    map: MapConfig,
    features: FeaturesConfig,
    output_filepath: PathBuf,
    layer_property: Option<String>,
    #[serde(default)]
    filters: serde_json::Value,
}

fn read_feature_records(features: &FeaturesConfig) -> anyhow::Result<Vec<serde_json::Value>> {
    match features {
        FeaturesConfig::Records { filepath } => {
            log::info!("Reading feature records from {:?}", filepath);
            let contents = read_to_string(filepath)
                .with_context(|| format!("Reading feature records from {:?}", filepath))?;
            Ok(serde_json::from_str(&contents)?)
        }
        FeaturesConfig::GeoJson { filepath } => {
            log::info!("Reading GeoJSON features from {:?}", filepath);
            let contents = read_to_string(filepath)
                .with_context(|| format!("Reading GeoJSON from {:?}", filepath))?;
            let geojson = contents
                .parse::<geojson::GeoJson>()
                .with_context(|| format!("Parsing GeoJSON from {:?}", filepath))?;
            records_from_geojson(&geojson)
                .with_context(|| format!("Converting GeoJSON features from {:?}", filepath))
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();

    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    let mut map = MapBoxWrapper::new(config.map).context("Loading map template")?;
    let records = read_feature_records(&config.features)?;
    for record in &records {
        map.add_feature(record)?;
    }
    log::info!("Added {} features", map.list_features().len());

    map.output(
        &config.output_filepath,
        config.layer_property.as_deref(),
        config.filters,
    )?;
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
