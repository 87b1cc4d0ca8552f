use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "stratgen.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub timeout_secs: u64,
    /// Where the per-run artifact directory (.stratgen/tx/<uuid>) is created.
    pub artifacts_root: String,
    pub output_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            timeout_secs: 120,
            artifacts_root: ".".into(),
            output_language: "English".into(),
        }
    }
}

/// Load the config: an explicit `--config` path wins, else `stratgen.toml`
/// in the working directory if present, else defaults. Missing keys in the
/// file fall back to their defaults.
pub fn load(explicit: Option<&str>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_file(path);
    }
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return read_file(DEFAULT_CONFIG_FILE);
    }
    Ok(Config::default())
}

fn read_file(path: &str) -> anyhow::Result<Config> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert_eq!(cfg.output_language, "English");
        assert!(cfg.timeout_secs > 0);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let cfg: Config = toml::from_str("model = \"gemini-2.0-pro\"").unwrap();
        assert_eq!(cfg.model, "gemini-2.0-pro");
        assert_eq!(cfg.output_language, "English");
    }

    #[test]
    fn explicit_file_is_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "output_language = \"Arabic\"\ntimeout_secs = 30").unwrap();
        let cfg = load(path.to_str()).unwrap();
        assert_eq!(cfg.output_language, "Arabic");
        assert_eq!(cfg.timeout_secs, 30);
    }
}
