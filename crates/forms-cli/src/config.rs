//! CLI Configuration

use anyhow::Context;
use forms_engine::EngineConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Load the engine configuration.
///
/// An explicit path (flag or `FORMCTL_CONFIG`) must exist. Otherwise
/// `~/.formctl/config.toml` is used when present, else built-in defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                tracing::debug!("no config file, using defaults");
                return Ok(EngineConfig::default());
            }
        },
    };
    read(&path)
}

fn read(path: &Path) -> anyhow::Result<EngineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EngineConfig::from_toml_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".formctl").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[messages]\nrequired = \"Please fill in {{label}}\"").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.messages.required, "Please fill in {label}");
        assert_eq!(config.factory.choice_option_count, 4);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/formctl.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }
}
