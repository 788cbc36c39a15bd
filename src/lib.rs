//! Render geographic points and lines into a self-contained Mapbox GL HTML page.
//!
//! Features are added one by one to a [`MapBoxWrapper`], which fills them into a
//! map template as a single GeoJSON source, one layer per geometry family (or
//! per property value and family), and a script toggling layer visibility.

pub mod bounds;
pub mod config;
pub mod error;
pub mod feature;
pub mod layer;
pub mod map;
pub mod template;

pub use config::MapConfig;
pub use error::{MapError, Result};
pub use feature::record::{FeatureRecord, FEATURE_KEYS};
pub use map::MapBoxWrapper;
