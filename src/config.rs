use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_ACCESS_TOKEN_PATH: &str = ".mapbox_access_token";
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/dark_template.html";
pub const DEFAULT_TOGGLE_TEMPLATE_PATH: &str = "templates/toggle_template.txt";
pub const DEFAULT_PREFIXED_TOGGLE_TEMPLATE_PATH: &str = "templates/prefixed_toggle_template.txt";
/// Number of source and layer slots expanded into the template.
pub const DEFAULT_MARKERS: usize = 200;

/// Where the map templates live and how many slots to expand.
///
/// Every field is optional when deserializing; missing ones take the defaults
/// above, which are relative to the working directory.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub access_token_path: PathBuf,
    pub template_path: PathBuf,
    pub toggle_template_path: PathBuf,
    pub prefixed_toggle_template_path: PathBuf,
    pub markers: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token_path: PathBuf::from(DEFAULT_ACCESS_TOKEN_PATH),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            toggle_template_path: PathBuf::from(DEFAULT_TOGGLE_TEMPLATE_PATH),
            prefixed_toggle_template_path: PathBuf::from(DEFAULT_PREFIXED_TOGGLE_TEMPLATE_PATH),
            markers: DEFAULT_MARKERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::{MapConfig, DEFAULT_MARKERS, DEFAULT_TOGGLE_TEMPLATE_PATH};

    #[rstest]
    fn test_missing_fields_take_defaults() {
        let config: MapConfig = serde_yaml::from_str("markers: 5").unwrap();
        assert_eq!(5, config.markers);
        assert_eq!(MapConfig::default().template_path, config.template_path);

        let config: MapConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(DEFAULT_MARKERS, config.markers);
    }

    #[rstest]
    fn test_yaml_paths() {
        let config: MapConfig = serde_yaml::from_str(
            "access_token_path: /secrets/token\ntemplate_path: custom.html\n",
        )
        .unwrap();
        assert_eq!(PathBuf::from("/secrets/token"), config.access_token_path);
        assert_eq!(PathBuf::from("custom.html"), config.template_path);
        assert_eq!(
            PathBuf::from(DEFAULT_TOGGLE_TEMPLATE_PATH),
            config.toggle_template_path
        );
    }
}
