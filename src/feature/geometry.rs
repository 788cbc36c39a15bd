use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{MapError, Result};

/// Geometry family drawn by a single map layer. A Mapbox layer can only render
/// one family, so features are split into layers by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryFamily {
    LineString,
    Point,
}

impl GeometryFamily {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryFamily::LineString => "LineString",
            GeometryFamily::Point => "Point",
        }
    }
}

impl fmt::Display for GeometryFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry types accepted in a feature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
}

/// Classification of every accepted geometry type name into its family.
pub static GEOMETRY_TYPES: [(&str, GeometryType, GeometryFamily); 4] = [
    ("Point", GeometryType::Point, GeometryFamily::Point),
    ("MultiPoint", GeometryType::MultiPoint, GeometryFamily::Point),
    ("LineString", GeometryType::LineString, GeometryFamily::LineString),
    (
        "MultiLineString",
        GeometryType::MultiLineString,
        GeometryFamily::LineString,
    ),
];

impl GeometryType {
    pub fn from_name(name: &str) -> Result<Self> {
        GEOMETRY_TYPES
            .iter()
            .find(|(type_name, _, _)| *type_name == name)
            .map(|(_, geometry_type, _)| *geometry_type)
            .ok_or_else(|| MapError::UnknownGeometryType(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.table_entry().0
    }

    pub fn family(&self) -> GeometryFamily {
        self.table_entry().2
    }

    fn table_entry(&self) -> &'static (&'static str, GeometryType, GeometryFamily) {
        // Every variant has exactly one row in GEOMETRY_TYPES.
        match self {
            GeometryType::Point => &GEOMETRY_TYPES[0],
            GeometryType::MultiPoint => &GEOMETRY_TYPES[1],
            GeometryType::LineString => &GEOMETRY_TYPES[2],
            GeometryType::MultiLineString => &GEOMETRY_TYPES[3],
        }
    }

    /// Parse a lon/lat coordinate payload of this geometry type.
    pub fn parse_coordinates(&self, array: &Value) -> Result<geojson::Value> {
        let parsed = match self {
            GeometryType::Point => Vec::<f64>::deserialize(array)
                .map(geojson::Value::Point),
            GeometryType::MultiPoint => Vec::<Vec<f64>>::deserialize(array)
                .map(geojson::Value::MultiPoint),
            GeometryType::LineString => Vec::<Vec<f64>>::deserialize(array)
                .map(geojson::Value::LineString),
            GeometryType::MultiLineString => Vec::<Vec<Vec<f64>>>::deserialize(array)
                .map(geojson::Value::MultiLineString),
        }
        .map_err(|err| {
            MapError::Schema(format!(
                "Coordinates {} do not match geometry type {}: {}",
                array,
                self.name(),
                err
            ))
        })?;

        if let Some(position) = flatten_positions(&parsed).find(|position| position.len() < 2) {
            return Err(MapError::Schema(format!(
                "Position {:?} must hold a longitude and a latitude",
                position
            )));
        }
        Ok(parsed)
    }
}

fn flatten_positions(value: &geojson::Value) -> Box<dyn Iterator<Item = &Vec<f64>> + '_> {
    match value {
        geojson::Value::Point(position) => Box::new(std::iter::once(position)),
        geojson::Value::MultiPoint(positions) | geojson::Value::LineString(positions) => {
            Box::new(positions.iter())
        }
        geojson::Value::MultiLineString(lines) => Box::new(lines.iter().flatten()),
        _ => Box::new(std::iter::empty()),
    }
}

/// All lon/lat coordinates of a geometry, in order.
pub fn flatten_coordinates(value: &geojson::Value) -> Vec<geo::Coord<f64>> {
    flatten_positions(value)
        .filter(|position| position.len() >= 2)
        .map(|position| geo::Coord {
            x: position[0],
            y: position[1],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use crate::error::MapError;

    use super::{flatten_coordinates, GeometryFamily, GeometryType};

    #[rstest]
    #[case("Point", GeometryFamily::Point)]
    #[case("MultiPoint", GeometryFamily::Point)]
    #[case("LineString", GeometryFamily::LineString)]
    #[case("MultiLineString", GeometryFamily::LineString)]
    fn test_family_classification(#[case] name: &str, #[case] expected: GeometryFamily) {
        let geometry_type = GeometryType::from_name(name).unwrap();
        assert_eq!(name, geometry_type.name());
        assert_eq!(expected, geometry_type.family());
    }

    #[rstest]
    #[case("Polygon")]
    #[case("point")]
    #[case("")]
    fn test_unknown_geometry_type(#[case] name: &str) {
        assert!(matches!(
            GeometryType::from_name(name),
            Err(MapError::UnknownGeometryType(_))
        ));
    }

    #[rstest]
    fn test_family_order() {
        assert!(GeometryFamily::LineString < GeometryFamily::Point);
    }

    #[rstest]
    #[case(GeometryType::Point, json!([1.0, 2.0]), vec![(1.0, 2.0)])]
    #[case(GeometryType::MultiPoint, json!([[1.0, 2.0], [3.0, 4.0]]), vec![(1.0, 2.0), (3.0, 4.0)])]
    #[case(GeometryType::LineString, json!([[1.0, 2.0], [3.0, 4.0]]), vec![(1.0, 2.0), (3.0, 4.0)])]
    #[case(
        GeometryType::MultiLineString,
        json!([[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0]]]),
        vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]
    )]
    fn test_parse_and_flatten(
        #[case] geometry_type: GeometryType,
        #[case] array: serde_json::Value,
        #[case] expected: Vec<(f64, f64)>,
    ) {
        let value = geometry_type.parse_coordinates(&array).unwrap();
        let coords: Vec<(f64, f64)> = flatten_coordinates(&value)
            .into_iter()
            .map(|coord| (coord.x, coord.y))
            .collect();
        assert_eq!(expected, coords);
    }

    #[rstest]
    #[case(GeometryType::Point, json!([[1.0, 2.0]]))]
    #[case(GeometryType::Point, json!([1.0]))]
    #[case(GeometryType::LineString, json!([1.0, 2.0]))]
    #[case(GeometryType::MultiLineString, json!([[1.0, 2.0]]))]
    #[case(GeometryType::LineString, json!("not coordinates"))]
    fn test_parse_rejects_mismatched_payload(
        #[case] geometry_type: GeometryType,
        #[case] array: serde_json::Value,
    ) {
        assert!(matches!(
            geometry_type.parse_coordinates(&array),
            Err(MapError::Schema(_))
        ));
    }
}
