//! Reading map templates and resolving their placeholder tokens.

pub mod document;
pub mod loader;

pub const ACCESS_TOKEN_PLACEHOLDER: &str = "__MAPBOX_ACCESS_TOKEN__";
pub const SOURCE_MARKERS_PLACEHOLDER: &str = "__SOURCEMARKERS__";
pub const LAYER_MARKERS_PLACEHOLDER: &str = "__LAYERMARKERS__";
pub const SOURCE_SLOT: &str = "__FILLINSOURCE__";
pub const LAYER_SLOT: &str = "__FILLINLAYER__";
/// Trails every slot expanded from a marker placeholder.
pub const SLOT_SEPARATOR: &str = "\n\n";
pub const TOGGLE_SCRIPT_PLACEHOLDER: &str = "__FILLINTOGGLESCRIPT__";
pub const CENTER_PLACEHOLDER: &str = "__FILLINCENTER__";
pub const BOUNDS_PLACEHOLDER: &str = "__FILLINBOUNDS__";
pub const LAYER_IDS_PLACEHOLDER: &str = "__FILLINLAYERIDS__";
pub const LAYER_PROPERTY_PLACEHOLDER: &str = "__FILLINLAYERPROPERTY__";
