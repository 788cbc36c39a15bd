use serde_json::{json, Value};

use crate::feature::geometry::GeometryFamily;

/// Mapbox layer type and paint settings for one geometry family.
#[derive(Debug, PartialEq)]
pub enum LayerStyle {
    /// Circles sized by the feature's `circle-radius` property, else `default_radius`.
    Circle { default_radius: u32 },
    Line { width: u32, opacity: f64 },
}

impl LayerStyle {
    pub fn vector_type(&self) -> &'static str {
        match self {
            LayerStyle::Circle { .. } => "circle",
            LayerStyle::Line { .. } => "line",
        }
    }

    /// Mapbox paint object. The colour is read from each feature.
    pub fn paint(&self) -> Value {
        match self {
            LayerStyle::Circle { default_radius } => json!({
                "circle-color": ["get", "colour"],
                "circle-radius": ["case", ["has", "circle-radius"], ["get", "circle-radius"], default_radius],
            }),
            LayerStyle::Line { width, opacity } => json!({
                "line-color": ["get", "colour"],
                "line-width": width,
                "line-opacity": opacity,
            }),
        }
    }
}

pub static LAYER_STYLES: [(GeometryFamily, LayerStyle); 2] = [
    (
        GeometryFamily::LineString,
        LayerStyle::Line {
            width: 1,
            opacity: 0.5,
        },
    ),
    (
        GeometryFamily::Point,
        LayerStyle::Circle { default_radius: 3 },
    ),
];

pub fn layer_style(family: GeometryFamily) -> &'static LayerStyle {
    match family {
        GeometryFamily::LineString => &LAYER_STYLES[0].1,
        GeometryFamily::Point => &LAYER_STYLES[1].1,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use crate::feature::geometry::GeometryFamily;

    use super::{layer_style, LAYER_STYLES};

    #[rstest]
    fn test_style_table_matches_lookup() {
        for (family, style) in LAYER_STYLES.iter() {
            assert_eq!(style, layer_style(*family));
            assert!(style.paint().is_object());
        }
    }

    #[rstest]
    #[case(GeometryFamily::Point, "circle", "circle-color")]
    #[case(GeometryFamily::LineString, "line", "line-color")]
    fn test_colour_is_read_from_feature(
        #[case] family: GeometryFamily,
        #[case] vector_type: &str,
        #[case] colour_key: &str,
    ) {
        let style = layer_style(family);
        assert_eq!(vector_type, style.vector_type());
        assert_eq!(json!(["get", "colour"]), style.paint()[colour_key]);
    }

    #[rstest]
    fn test_point_radius_defaults_to_three() {
        let paint = layer_style(GeometryFamily::Point).paint();
        assert_eq!(
            json!(["case", ["has", "circle-radius"], ["get", "circle-radius"], 3]),
            paint["circle-radius"]
        );
    }

    #[rstest]
    fn test_line_width_and_opacity() {
        let paint = layer_style(GeometryFamily::LineString).paint();
        assert_eq!(json!(1), paint["line-width"]);
        assert_eq!(json!(0.5), paint["line-opacity"]);
    }
}
