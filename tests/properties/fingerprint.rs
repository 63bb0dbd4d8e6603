//! Property tests for synth output fingerprints.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use stackloop::{compute_fingerprint, Fingerprint};

fn template() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 {}:\",\\n]{0,64}").unwrap()
}

/// Write a cloud assembly with one stack per template, in order
fn write_assembly(dir: &Path, templates: &[String], with_asset: bool) {
    let mut artifacts = serde_json::Map::new();
    for (i, body) in templates.iter().enumerate() {
        let name = format!("Stack{i}");
        artifacts.insert(
            name.clone(),
            json!({ "type": "aws:cloudformation:stack", "displayName": name }),
        );
        fs::write(dir.join(format!("{name}.template.json")), body).unwrap();
    }
    if with_asset {
        artifacts.insert(
            "Tree".to_string(),
            json!({ "type": "cdk:tree", "properties": { "file": "tree.json" } }),
        );
        fs::write(dir.join("tree.json"), "{\"tree\":1}").unwrap();
    }
    let manifest = json!({ "version": "36.0.0", "artifacts": artifacts });
    fs::write(dir.join("manifest.json"), manifest.to_string()).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The fingerprint is the digest of the templates joined by newlines.
    #[test]
    fn property_fingerprint_matches_joined_templates(
        templates in proptest::collection::vec(template(), 0..=4),
    ) {
        let dir = TempDir::new().unwrap();
        write_assembly(dir.path(), &templates, false);

        let expected = Fingerprint::of_bytes(templates.join("\n").as_bytes());
        prop_assert_eq!(compute_fingerprint(dir.path()).unwrap(), expected);
    }

    /// PROPERTY: Non-stack artifacts never affect the fingerprint.
    #[test]
    fn property_non_stack_artifacts_are_ignored(
        templates in proptest::collection::vec(template(), 1..=4),
    ) {
        let plain = TempDir::new().unwrap();
        let with_asset = TempDir::new().unwrap();
        write_assembly(plain.path(), &templates, false);
        write_assembly(with_asset.path(), &templates, true);

        prop_assert_eq!(
            compute_fingerprint(plain.path()).unwrap(),
            compute_fingerprint(with_asset.path()).unwrap()
        );
    }
}
