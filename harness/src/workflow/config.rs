use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::scene::SceneConfig;

/// Full harness run configuration: the synthetic scene plus the narrow
/// boxcar aperture width used for the comparison.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub scene: SceneConfig,
    pub narrow_width: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            narrow_width: 14.0,
        }
    }
}

impl HarnessConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading harness config {}", path_ref.display()))?;
        let config: HarnessConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing harness config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(scene: SceneConfig, narrow_width: f64) -> Self {
        Self {
            scene,
            narrow_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_carries_the_scene() {
        let scene = SceneConfig {
            nrows: 100,
            ..Default::default()
        };
        let cfg = HarnessConfig::from_args(scene, 10.0);
        assert_eq!(cfg.scene.nrows, 100);
        assert_eq!(cfg.narrow_width, 10.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"scene:\n  nrows: 120\n  ncols: 90\n  seed: 3\nnarrow_width: 9.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = HarnessConfig::load(&path).unwrap();
        assert_eq!(cfg.scene.nrows, 120);
        assert_eq!(cfg.scene.ncols, 90);
        assert_eq!(cfg.scene.seed, 3);
        assert_eq!(cfg.narrow_width, 9.0);
    }

    #[test]
    fn config_load_fills_defaults_for_missing_fields() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"narrow_width: 20.0\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = HarnessConfig::load(&path).unwrap();
        assert_eq!(cfg.scene.nrows, 200);
        assert_eq!(cfg.narrow_width, 20.0);
    }
}
