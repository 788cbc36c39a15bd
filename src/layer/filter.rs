use serde_json::Value;

use crate::{
    error::{MapError, Result},
    feature::geometry::GeometryFamily,
};

/// Mapbox filter clause selecting one geometry family.
pub static TYPE_FILTERS: [(GeometryFamily, [&str; 3]); 2] = [
    (GeometryFamily::LineString, ["==", "$type", "LineString"]),
    (GeometryFamily::Point, ["==", "$type", "Point"]),
];

pub fn type_clause(family: GeometryFamily) -> Value {
    let clause = match family {
        GeometryFamily::LineString => &TYPE_FILTERS[0].1,
        GeometryFamily::Point => &TYPE_FILTERS[1].1,
    };
    Value::from(clause.to_vec())
}

pub fn property_clause(property: &str, value: &Value) -> Value {
    Value::Array(vec![
        Value::from("=="),
        Value::from(property),
        value.clone(),
    ])
}

/// Caller supplied filter clauses appended to every layer filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterClauses(Vec<Value>);

impl FilterClauses {
    pub fn none() -> Self {
        Self::default()
    }

    /// Accept either a single clause such as `["==", "a", 1]` or a list of
    /// clauses. A single clause is wrapped so that its elements are not taken
    /// for separate clauses.
    pub fn normalize(filters: Value) -> Result<Self> {
        match filters {
            Value::Null => Ok(Self::none()),
            Value::Array(items) if items.is_empty() => Ok(Self::none()),
            Value::Array(items) if items.iter().all(Value::is_array) => Ok(Self(items)),
            Value::Array(items) if !items[0].is_array() => Ok(Self(vec![Value::Array(items)])),
            other => Err(MapError::Schema(format!(
                "Filters must be a filter clause or a list of filter clauses, got {}",
                other
            ))),
        }
    }

    pub fn clauses(&self) -> &[Value] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `["all", <clauses>..., <extra clauses>...]`
    pub fn combine(&self, clauses: Vec<Value>) -> Value {
        let mut combined = vec![Value::from("all")];
        combined.extend(clauses);
        combined.extend(self.0.iter().cloned());
        Value::Array(combined)
    }
}
