use crate::error::{MapError, Result};

/// Padding in degrees added to each side of the bounding rectangle.
pub const BOUNDS_MARGIN: f64 = 0.01;

/// Center and extent of a map, in lon/lat order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub center: [f64; 2],
    /// South-west and north-east corners.
    pub rect: [[f64; 2]; 2],
}

impl MapBounds {
    pub fn south_west(&self) -> geo::Coord<f64> {
        let [lon, lat] = self.rect[0];
        geo::Coord { x: lon, y: lat }
    }

    pub fn north_east(&self) -> geo::Coord<f64> {
        let [lon, lat] = self.rect[1];
        geo::Coord { x: lon, y: lat }
    }

    pub fn center_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.center)?)
    }

    pub fn rect_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rect)?)
    }
}

/// Mean of all coordinates and their enclosing rectangle padded by `margin`.
pub fn compute_bounds(coords: &[geo::Coord<f64>], margin: f64) -> Result<MapBounds> {
    let first = coords.first().ok_or(MapError::NoFeatures)?;
    let (min, max, sum) = coords.iter().fold(
        (*first, *first, geo::Coord { x: 0.0, y: 0.0 }),
        |(min, max, sum), coord| {
            (
                geo::Coord {
                    x: min.x.min(coord.x),
                    y: min.y.min(coord.y),
                },
                geo::Coord {
                    x: max.x.max(coord.x),
                    y: max.y.max(coord.y),
                },
                sum + *coord,
            )
        },
    );
    let count = coords.len() as f64;
    Ok(MapBounds {
        center: [sum.x / count, sum.y / count],
        rect: [
            [min.x - margin, min.y - margin],
            [max.x + margin, max.y + margin],
        ],
    })
}
