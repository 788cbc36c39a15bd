use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
    error::{MapError, Result},
    feature::{geometry::GeometryFamily, record::FeatureRecord, registry::FeatureRegistry},
};

use super::{
    filter::{property_clause, type_clause, FilterClauses},
    style::{layer_style, LayerStyle},
};

/// One Mapbox layer to be added to the map.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlanEntry {
    pub id: String,
    pub family: GeometryFamily,
    pub style: &'static LayerStyle,
    pub filter: Value,
}

/// The layers of a map, in the order they are added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPlan {
    pub entries: Vec<LayerPlanEntry>,
    /// Distinct values of the grouping property in first-seen order, when
    /// layers are grouped by a property.
    pub group_labels: Option<Vec<String>>,
}

impl LayerPlan {
    pub fn layer_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }
}

/// Plan the map layers for all registered features.
///
/// Without a grouping property there is one layer per geometry family. With
/// one, there is a layer for every pair of property value and geometry family
/// that occurs, since a Mapbox layer only draws a single family. Distinct
/// values sharing a label, like `"1"` and `1`, would give duplicate layer ids
/// and are a schema error.
pub fn plan_layers(
    registry: &FeatureRegistry,
    grouping_property: Option<&str>,
    extra_filters: &FilterClauses,
) -> Result<LayerPlan> {
    match grouping_property {
        None => Ok(LayerPlan {
            entries: registry
                .distinct_families()
                .into_iter()
                .map(|family| LayerPlanEntry {
                    id: format!("{}_layer", family),
                    family,
                    style: layer_style(family),
                    filter: extra_filters.combine(vec![type_clause(family)]),
                })
                .collect(),
            group_labels: None,
        }),
        Some(property) => {
            let groups = group_families(registry.list_features(), property);
            let mut entries = Vec::new();
            let mut group_labels = Vec::with_capacity(groups.len());
            for (value, families) in groups {
                let label = value_label(&value);
                if group_labels.contains(&label) {
                    return Err(MapError::Schema(format!(
                        "Values of property '{}' of different JSON types share the label '{}'",
                        property, label
                    )));
                }
                for family in families {
                    entries.push(LayerPlanEntry {
                        id: format!("{}_{}", label, family.name().to_lowercase()),
                        family,
                        style: layer_style(family),
                        filter: extra_filters.combine(vec![
                            property_clause(property, &value),
                            type_clause(family),
                        ]),
                    });
                }
                group_labels.push(label);
            }
            log::debug!(
                "Grouping by '{}' gives {} groups and {} layers",
                property,
                group_labels.len(),
                entries.len()
            );
            Ok(LayerPlan {
                entries,
                group_labels: Some(group_labels),
            })
        }
    }
}

/// Geometry families present for each truthy value of `property`, with values
/// in first-seen order.
pub fn group_families(
    records: &[FeatureRecord],
    property: &str,
) -> Vec<(Value, BTreeSet<GeometryFamily>)> {
    let mut groups: Vec<(Value, BTreeSet<GeometryFamily>)> = Vec::new();
    for record in records {
        let value = match record.property(property) {
            Some(value) if is_truthy(value) => value,
            _ => continue,
        };
        match groups.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, families)) => {
                families.insert(record.family());
            }
            None => groups.push((value.clone(), BTreeSet::from([record.family()]))),
        }
    }
    groups
}

/// JSON truthiness: null, false, zero, empty strings, arrays and objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().map_or(true, |number| number != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(values) => !values.is_empty(),
        Value::Object(values) => !values.is_empty(),
    }
}

/// Text used for a property value in layer ids and the toggle script.
pub fn value_label(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        other => other.to_string(),
    }
}
