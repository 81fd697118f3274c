use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Run settings read from the YAML config file. Every field may be
/// omitted; command-line flags are applied on top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestSettings {
    /// Archive container the documents are written into. Defaults to the
    /// input's file stem.
    pub container_id: Option<String>,
    /// Directory under which each container gets its own folder.
    pub output_root: PathBuf,
    /// `false` keeps existing documents; edited ones are then reported.
    pub overwrite: bool,
    pub location: Option<String>,
    pub batch_id: Option<String>,
    /// CSV file receiving one line per document outcome.
    pub manifest: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            container_id: None,
            output_root: PathBuf::from("./data/archive"),
            overwrite: true,
            location: None,
            batch_id: None,
            manifest: None,
            log_level: None,
        }
    }
}

impl IngestSettings {
    /// Loads settings from `path`; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document parses as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let settings = IngestSettings::from_yaml("container_id: upload-7\n").unwrap();
        assert_eq!(settings.container_id.as_deref(), Some("upload-7"));
        assert!(settings.overwrite);
        assert_eq!(settings.output_root, PathBuf::from("./data/archive"));
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn full_file() {
        let yaml = "\
container_id: u1
output_root: /srv/archive
overwrite: false
location: HySprint
batch_id: HZB_P_1
manifest: /srv/manifest.csv
log_level: debug
";
        let settings = IngestSettings::from_yaml(yaml).unwrap();
        assert_eq!(settings.output_root, PathBuf::from("/srv/archive"));
        assert!(!settings.overwrite);
        assert_eq!(settings.location.as_deref(), Some("HySprint"));
        assert_eq!(settings.manifest, Some(PathBuf::from("/srv/manifest.csv")));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(IngestSettings::from_yaml("output_dir: x\n").is_err());
    }

    #[test]
    fn missing_or_empty_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = IngestSettings::load(dir.path().join("none.yaml")).unwrap();
        assert_eq!(missing, IngestSettings::default());

        let empty = dir.path().join("empty.yaml");
        fs::write(&empty, "\n").unwrap();
        assert_eq!(IngestSettings::load(&empty).unwrap(), IngestSettings::default());

        let broken = dir.path().join("broken.yaml");
        fs::write(&broken, "overwrite: [").unwrap();
        let error = IngestSettings::load(&broken).unwrap_err();
        assert!(format!("{:#}", error).contains("broken.yaml"));
    }
}
