//! Configuration file loading.

use anyhow::{Context, Result};
use fixver_core::{PluginConfig, TicketPrefixes};
use std::path::Path;

/// Values given on the command line; they win over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub project: Option<String>,
    pub prefixes: Vec<String>,
}

/// Load `path` and apply `overrides`.
///
/// A missing file is only an error when the path was given explicitly.
pub fn load(path: &Path, explicit: bool, overrides: Overrides) -> Result<PluginConfig> {
    let mut config = match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => PluginConfig::default(),
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
        }
    };

    if let Some(host) = overrides.host {
        config.tracker_host = host;
    }
    if let Some(project) = overrides.project {
        config.project = project;
    }
    if !overrides.prefixes.is_empty() {
        config.ticket_prefix = TicketPrefixes::Many(overrides.prefixes);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".fixver.json");
        std::fs::write(
            &path,
            r#"{"trackerHost":"https://a.atlassian.net","project":"ABC","ticketPrefix":"ABC","enrichIssues":true}"#,
        )
        .unwrap();

        let config = load(
            &path,
            false,
            Overrides {
                project: Some("OPS".into()),
                prefixes: vec!["OPS".into()],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.tracker_host, "https://a.atlassian.net");
        assert_eq!(config.project, "OPS");
        assert_eq!(config.prefixes(), vec!["OPS".to_string()]);
        assert!(config.enrich_issues);
    }

    #[test]
    fn test_missing_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".fixver.json");

        let config = load(&path, false, Overrides::default()).unwrap();
        assert_eq!(config, PluginConfig::default());
        assert!(load(&path, true, Overrides::default()).is_err());
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".fixver.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load(&path, false, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
