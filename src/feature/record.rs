use std::collections::BTreeSet;

use geojson::{feature::Id, JsonObject};
use serde_json::Value;

use crate::error::{MapError, Result};

use super::geometry::{flatten_coordinates, GeometryFamily, GeometryType};

/// Keys every feature record must have, no more and no less.
pub const FEATURE_KEYS: [&str; 5] = ["id_", "geojson_type", "colour", "properties", "array"];
/// Colour used when a record's colour is null (lime).
pub const DEFAULT_COLOUR: &str = "#00ff00";

/// A validated feature record, as registered by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub id: Id,
    pub geometry_type: GeometryType,
    pub colour: String,
    pub properties: JsonObject,
    pub geometry: geojson::Value,
    source: Value,
}

impl FeatureRecord {
    /// The record exactly as it was passed in.
    pub fn as_value(&self) -> &Value {
        &self.source
    }

    pub fn family(&self) -> GeometryFamily {
        self.geometry_type.family()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn coordinates(&self) -> Vec<geo::Coord<f64>> {
        flatten_coordinates(&self.geometry)
    }

    /// GeoJSON feature for the map source. The colour is stored as the `colour`
    /// property unless the record's own properties override it.
    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let mut properties = JsonObject::new();
        properties.insert("colour".to_string(), Value::String(self.colour.clone()));
        properties.extend(self.properties.clone());
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(self.geometry.clone())),
            id: Some(self.id.clone()),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl TryFrom<&Value> for FeatureRecord {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| MapError::Schema(format!("Feature must be a JSON object, got {}", value)))?;

        let keys: BTreeSet<&str> = object.keys().map(String::as_str).collect();
        let expected_keys: BTreeSet<&str> = FEATURE_KEYS.into_iter().collect();
        if keys != expected_keys {
            return Err(MapError::Schema(format!(
                "Features must have keys {:?}, got {:?}",
                FEATURE_KEYS, keys
            )));
        }

        let id = match &object["id_"] {
            Value::String(id) => Id::String(id.clone()),
            Value::Number(id) => Id::Number(id.clone()),
            other => {
                return Err(MapError::Schema(format!(
                    "Feature id must be a string or a number, got {}",
                    other
                )))
            }
        };
        let geometry_type = match &object["geojson_type"] {
            Value::String(name) => GeometryType::from_name(name)?,
            other => return Err(MapError::UnknownGeometryType(other.to_string())),
        };
        let colour = match &object["colour"] {
            Value::String(colour) => colour.clone(),
            Value::Null => DEFAULT_COLOUR.to_string(),
            other => {
                return Err(MapError::Schema(format!(
                    "Feature colour must be a string, got {}",
                    other
                )))
            }
        };
        let properties = match &object["properties"] {
            Value::Object(properties) => properties.clone(),
            other => {
                return Err(MapError::Schema(format!(
                    "Feature properties must be an object, got {}",
                    other
                )))
            }
        };
        let geometry = geometry_type.parse_coordinates(&object["array"])?;

        Ok(Self {
            id,
            geometry_type,
            colour,
            properties,
            geometry,
            source: value.clone(),
        })
    }
}

/// Build a feature record from a standard GeoJSON feature.
///
/// The colour is taken from the `colour` property when it is a string. Features
/// without an id get their position in the input as id.
pub fn record_from_geojson_feature(feature: &geojson::Feature, index: usize) -> Result<Value> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| MapError::Schema(format!("Feature {} has no geometry", index)))?;
    let (geometry_type, array) = match &geometry.value {
        geojson::Value::Point(position) => ("Point", serde_json::to_value(position)?),
        geojson::Value::MultiPoint(positions) => ("MultiPoint", serde_json::to_value(positions)?),
        geojson::Value::LineString(positions) => ("LineString", serde_json::to_value(positions)?),
        geojson::Value::MultiLineString(lines) => ("MultiLineString", serde_json::to_value(lines)?),
        geojson::Value::Polygon(_) => return Err(MapError::UnknownGeometryType("Polygon".into())),
        geojson::Value::MultiPolygon(_) => {
            return Err(MapError::UnknownGeometryType("MultiPolygon".into()))
        }
        geojson::Value::GeometryCollection(_) => {
            return Err(MapError::UnknownGeometryType("GeometryCollection".into()))
        }
    };

    let properties = feature.properties.clone().unwrap_or_default();
    let colour = match properties.get("colour") {
        Some(Value::String(colour)) => colour.clone(),
        _ => DEFAULT_COLOUR.to_string(),
    };
    let id = match &feature.id {
        Some(Id::String(id)) => Value::String(id.clone()),
        Some(Id::Number(id)) => Value::Number(id.clone()),
        None => Value::from(index),
    };

    let mut record = JsonObject::new();
    record.insert("id_".to_string(), id);
    record.insert("geojson_type".to_string(), Value::from(geometry_type));
    record.insert("colour".to_string(), Value::String(colour));
    record.insert("properties".to_string(), Value::Object(properties));
    record.insert("array".to_string(), array);
    Ok(Value::Object(record))
}

/// Feature records for every feature of a GeoJSON document, in document order.
pub fn records_from_geojson(geojson: &geojson::GeoJson) -> Result<Vec<Value>> {
    let features: Vec<&geojson::Feature> = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => collection.features.iter().collect(),
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(_) => {
            return Err(MapError::Schema(
                "GeoJSON holds a bare geometry, expected a feature or feature collection".into(),
            ))
        }
    };
    features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| record_from_geojson_feature(feature, index))
        .collect()
}
