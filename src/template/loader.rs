use std::{fs, path::Path};

use crate::error::{MapError, Result};

use super::{
    document::substitute_tokens, ACCESS_TOKEN_PLACEHOLDER, LAYER_MARKERS_PLACEHOLDER, LAYER_SLOT,
    SLOT_SEPARATOR, SOURCE_MARKERS_PLACEHOLDER, SOURCE_SLOT,
};

pub fn read_text_file(filepath: &Path) -> Result<String> {
    fs::read_to_string(filepath).map_err(|err| MapError::io(filepath, err))
}

/// Read the first line of the access token file, without its line terminator.
pub fn read_access_token(filepath: &Path) -> Result<String> {
    let contents = read_text_file(filepath)?;
    Ok(contents.lines().next().unwrap_or_default().to_string())
}

/// Substitute the access token and expand the marker placeholders into
/// `source_markers` source slots and `layer_markers` layer slots.
pub fn expand_markers(
    template: &str,
    access_token: &str,
    source_markers: usize,
    layer_markers: usize,
) -> String {
    let source_slots = format!("{SOURCE_SLOT}{SLOT_SEPARATOR}").repeat(source_markers);
    let layer_slots = format!("{LAYER_SLOT}{SLOT_SEPARATOR}").repeat(layer_markers);
    substitute_tokens(
        template,
        &[
            (ACCESS_TOKEN_PLACEHOLDER, access_token),
            (SOURCE_MARKERS_PLACEHOLDER, source_slots.as_str()),
            (LAYER_MARKERS_PLACEHOLDER, layer_slots.as_str()),
        ],
    )
}

/// Load the map template at `template_path` with the token and slots filled in.
pub fn load_template(
    access_token_path: &Path,
    template_path: &Path,
    source_markers: usize,
    layer_markers: usize,
) -> Result<String> {
    let template = read_text_file(template_path)?;
    let access_token = read_access_token(access_token_path)?;
    log::debug!(
        "Loaded template {:?} with {} source and {} layer slots",
        template_path,
        source_markers,
        layer_markers
    );
    Ok(expand_markers(
        &template,
        &access_token,
        source_markers,
        layer_markers,
    ))
}
