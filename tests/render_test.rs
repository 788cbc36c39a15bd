extern crate mapbox_wrapper;

use std::path::{Path, PathBuf};

use mapbox_wrapper::{MapBoxWrapper, MapConfig};
use serde_json::Value;
use testdir::testdir;

fn bundled_config(access_token_path: PathBuf) -> MapConfig {
    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    MapConfig {
        access_token_path,
        template_path: templates.join("dark_template.html"),
        toggle_template_path: templates.join("toggle_template.txt"),
        prefixed_toggle_template_path: templates.join("prefixed_toggle_template.txt"),
        ..MapConfig::default()
    }
}

fn demo_features() -> Vec<Value> {
    let filepath = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/features.json");
    serde_json::from_str(&std::fs::read_to_string(filepath).unwrap()).unwrap()
}

#[test]
fn bundled_templates_are_fully_resolved() {
    let test_dir = testdir!();
    let token_filepath = test_dir.join("token");
    std::fs::write(&token_filepath, "pk.bundled\n").unwrap();

    let mut map = MapBoxWrapper::new(bundled_config(token_filepath)).unwrap();
    for feature in demo_features() {
        map.add_feature(&feature).unwrap();
    }

    for grouping_property in [None, Some("node")] {
        let output_filepath = test_dir.join("map.html");
        map.output(&output_filepath, grouping_property, Value::Null)
            .unwrap();
        let html = std::fs::read_to_string(&output_filepath).unwrap();
        for placeholder in [
            "__MAPBOX_ACCESS_TOKEN__",
            "__SOURCEMARKERS__",
            "__LAYERMARKERS__",
            "__FILLIN",
        ] {
            assert!(!html.contains(placeholder), "{} left in output", placeholder);
        }
        assert!(html.contains("mapboxgl.accessToken = 'pk.bundled';"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}

#[test]
fn grouped_demo_layers() {
    let test_dir = testdir!();
    let token_filepath = test_dir.join("token");
    std::fs::write(&token_filepath, "pk.bundled").unwrap();

    let mut map = MapBoxWrapper::new(bundled_config(token_filepath)).unwrap();
    for feature in demo_features() {
        map.add_feature(&feature).unwrap();
    }
    let html = map.render(Some("node"), Value::Null).unwrap();
    assert!(html.contains(r#"const toggleableLayerIds = ["A_point","B_linestring","B_point"];"#));
    assert!(html.contains(r#"const layerPrefixes = ["A","B"];"#));
}
