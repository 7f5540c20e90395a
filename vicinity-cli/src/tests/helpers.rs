//! Fixture files shared by the compare command tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const METRO_DATASET: &str = r#"{
    "regions": {
        "metro": [
            {
                "id": "n-1",
                "name": "Downtown",
                "metrics": { "walk_score": 91, "median_home_price": 450000, "noise_level": 72 }
            },
            {
                "id": "n-2",
                "name": "Westside",
                "metrics": { "walk_score": 85, "median_home_price": 350000, "noise_level": 48 }
            }
        ]
    }
}"#;

pub(super) const NOISE_CATALOGUE: &str = r#"{
    "noise_level": {
        "label": "Noise Level",
        "min": 30,
        "max": 90,
        "format": "score",
        "directionality": "lower_is_better"
    }
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

/// Create a temporary directory addressed by a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Encode a comparison request document.
pub(super) fn request_json(region: &str, neighborhoods: &[&str], metrics: &[&str]) -> String {
    serde_json::json!({
        "region": region,
        "neighborhoods": neighborhoods,
        "metrics": metrics,
    })
    .to_string()
}
