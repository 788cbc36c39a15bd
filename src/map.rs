use std::{fs, path::Path};

use serde::Serialize;
use serde_json::Value;

use crate::{
    bounds::{compute_bounds, BOUNDS_MARGIN},
    config::MapConfig,
    error::{MapError, Result},
    feature::{record::FeatureRecord, registry::FeatureRegistry},
    layer::{
        filter::FilterClauses,
        plan::{plan_layers, LayerPlan, LayerPlanEntry},
    },
    template::{
        document::{substitute_tokens, TemplateDocument},
        loader::{load_template, read_text_file},
        BOUNDS_PLACEHOLDER, CENTER_PLACEHOLDER, LAYER_IDS_PLACEHOLDER,
        LAYER_PROPERTY_PLACEHOLDER, TOGGLE_SCRIPT_PLACEHOLDER,
    },
};

/// Name of the single map source holding every feature.
pub const SOURCE_NAME: &str = "all_data";

#[derive(Serialize)]
struct SourceSpec<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    data: &'a geojson::FeatureCollection,
}

#[derive(Serialize)]
struct LayerLayout {
    visibility: &'static str,
}

#[derive(Serialize)]
struct LayerSpec<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    vector_type: &'static str,
    source: &'a str,
    paint: Value,
    layout: LayerLayout,
    filter: &'a Value,
}

/// `map.addSource(...)` call for a GeoJSON source.
pub fn source_fragment(name: &str, collection: &geojson::FeatureCollection) -> Result<String> {
    let spec = SourceSpec {
        source_type: "geojson",
        data: collection,
    };
    Ok(format!(
        "map.addSource({}, {});",
        serde_json::to_string(name)?,
        serde_json::to_string(&spec)?
    ))
}

/// `map.addLayer(...)` call for a planned layer.
pub fn layer_fragment(entry: &LayerPlanEntry, source_name: &str) -> Result<String> {
    let spec = LayerSpec {
        id: &entry.id,
        vector_type: entry.style.vector_type(),
        source: source_name,
        paint: entry.style.paint(),
        layout: LayerLayout {
            visibility: "visible",
        },
        filter: &entry.filter,
    };
    Ok(format!("map.addLayer({});", serde_json::to_string(&spec)?))
}

/// Builds a single HTML page showing the added features on a Mapbox map.
///
/// ```no_run
/// # fn main() -> mapbox_wrapper::Result<()> {
/// use mapbox_wrapper::{MapBoxWrapper, MapConfig};
/// use serde_json::{json, Value};
///
/// let mut map = MapBoxWrapper::new(MapConfig::default())?;
/// map.add_feature(&json!({
///     "id_": "station",
///     "geojson_type": "Point",
///     "colour": "#ff0000",
///     "properties": {"node": "A"},
///     "array": [13.4, 52.5],
/// }))?;
/// map.output(std::path::Path::new("map.html"), Some("node"), Value::Null)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MapBoxWrapper {
    config: MapConfig,
    template: TemplateDocument,
    registry: FeatureRegistry,
}

impl MapBoxWrapper {
    /// Load the template and access token named in `config`.
    pub fn new(config: MapConfig) -> Result<Self> {
        let template = load_template(
            &config.access_token_path,
            &config.template_path,
            config.markers,
            config.markers,
        )?;
        Ok(Self {
            config,
            template: TemplateDocument::new(template),
            registry: FeatureRegistry::new(),
        })
    }

    pub fn add_feature(&mut self, feature: &Value) -> Result<()> {
        self.registry.add_feature(feature)
    }

    pub fn list_features(&self) -> &[FeatureRecord] {
        self.registry.list_features()
    }

    /// Render the filled in map document.
    ///
    /// With a `grouping_property`, layers are created per value of that property
    /// and the toggle script can switch whole groups. `filters` is either a
    /// single Mapbox filter clause or a list of them, added to every layer.
    pub fn render(&self, grouping_property: Option<&str>, filters: Value) -> Result<String> {
        let bounds = compute_bounds(self.registry.coordinates(), BOUNDS_MARGIN)?;

        let filters = FilterClauses::normalize(filters)?;
        if !filters.is_empty() {
            log::warn!("Properties in filters must be present on every feature");
        }

        let sources = vec![source_fragment(
            SOURCE_NAME,
            &self.registry.feature_collection(),
        )?];
        let plan = plan_layers(&self.registry, grouping_property, &filters)?;
        let layers = plan
            .entries
            .iter()
            .map(|entry| layer_fragment(entry, SOURCE_NAME))
            .collect::<Result<Vec<String>>>()?;
        log::info!(
            "Rendering {} features in {} layers",
            self.registry.len(),
            layers.len()
        );

        let center = bounds.center_json()?;
        let rect = bounds.rect_json()?;
        let toggle_script = self.toggle_script(&plan)?;
        self.template.clone().fill(
            &[
                (CENTER_PLACEHOLDER, center.as_str()),
                (BOUNDS_PLACEHOLDER, rect.as_str()),
                (TOGGLE_SCRIPT_PLACEHOLDER, toggle_script.as_str()),
            ],
            &sources,
            &layers,
        )
    }

    /// Render the map document and write it to `output_path`, replacing any
    /// existing file.
    pub fn output(
        &self,
        output_path: &Path,
        grouping_property: Option<&str>,
        filters: Value,
    ) -> Result<()> {
        let html = self.render(grouping_property, filters)?;
        fs::write(output_path, html).map_err(|err| MapError::io(output_path, err))?;
        log::info!("Output written at {:?}.", output_path);
        Ok(())
    }

    fn toggle_script(&self, plan: &LayerPlan) -> Result<String> {
        let layer_ids = serde_json::to_string(&plan.layer_ids())?;
        match &plan.group_labels {
            Some(group_labels) => {
                let script = read_text_file(&self.config.prefixed_toggle_template_path)?;
                let labels = serde_json::to_string(group_labels)?;
                Ok(substitute_tokens(
                    &script,
                    &[
                        (LAYER_IDS_PLACEHOLDER, layer_ids.as_str()),
                        (LAYER_PROPERTY_PLACEHOLDER, labels.as_str()),
                    ],
                ))
            }
            None => {
                let script = read_text_file(&self.config.toggle_template_path)?;
                Ok(substitute_tokens(
                    &script,
                    &[(LAYER_IDS_PLACEHOLDER, layer_ids.as_str())],
                ))
            }
        }
    }
}
