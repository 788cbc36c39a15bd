use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::Result;

use super::{geometry::GeometryFamily, record::FeatureRecord};

/// Append-only list of the features making up one map document, together with
/// the GeoJSON features, families and coordinates derived from them.
#[derive(Debug, Default, Clone)]
pub struct FeatureRegistry {
    records: Vec<FeatureRecord>,
    features: Vec<geojson::Feature>,
    families: Vec<GeometryFamily>,
    coordinates: Vec<geo::Coord<f64>>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a feature record. Nothing is registered when the
    /// record is rejected.
    pub fn add_feature(&mut self, value: &Value) -> Result<()> {
        let record = FeatureRecord::try_from(value)?;
        log::debug!(
            "Adding {} feature {:?}",
            record.geometry_type.name(),
            record.id
        );
        self.features.push(record.to_geojson_feature());
        self.families.push(record.family());
        self.coordinates.extend(record.coordinates());
        self.records.push(record);
        Ok(())
    }

    pub fn list_features(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn geojson_features(&self) -> &[geojson::Feature] {
        &self.features
    }

    pub fn feature_collection(&self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self.features.clone(),
            foreign_members: None,
        }
    }

    /// Family of every registered feature, in registration order.
    pub fn families(&self) -> &[GeometryFamily] {
        &self.families
    }

    pub fn distinct_families(&self) -> BTreeSet<GeometryFamily> {
        self.families.iter().copied().collect()
    }

    /// All registered coordinates, flattened in registration order.
    pub fn coordinates(&self) -> &[geo::Coord<f64>] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
