//! YAML and JSON output for the command-line reports.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes `value` to YAML.
pub fn serialize_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing report to YAML");
    serde_yaml::to_string(value).context("Failed to serialize report to YAML")
}

/// Serializes `value` to pretty-printed JSON.
pub fn serialize_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing report to JSON");
    serde_json::to_string_pretty(value).context("Failed to serialize report to JSON")
}

/// Writes `content` to `path`, creating parent directories as needed and
/// overwriting an existing file.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{ApiMethodDescription, ApiParamDescription, CommonDescription};
    use tempfile::TempDir;

    fn add_description() -> ApiMethodDescription {
        ApiMethodDescription {
            method_description: CommonDescription::new("add", Some("adds two numbers".to_string())),
            param_descriptions: vec![
                ApiParamDescription {
                    param_description: CommonDescription::new("a", Some("first operand".to_string())),
                    required: true,
                    min_value: None,
                    max_value: None,
                },
                ApiParamDescription {
                    param_description: CommonDescription::new("b", None),
                    ..Default::default()
                },
            ],
            return_description: None,
        }
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&add_description()).unwrap();

        assert!(yaml.contains("methodDescription:"));
        assert!(yaml.contains("name: add"));
        assert!(yaml.contains("adds two numbers"));
        assert!(yaml.contains("required: true"));
        assert!(!yaml.contains("returnDescription"));
    }

    #[test]
    fn test_serialize_json_is_pretty_and_valid() {
        let json = serialize_json(&add_description()).unwrap();

        assert!(json.lines().count() > 5);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["methodDescription"]["description"], "adds two numbers");
        assert_eq!(parsed["paramDescriptions"][1]["required"], false);
        assert!(parsed["paramDescriptions"][1]["paramDescription"]
            .get("description")
            .is_none());
    }

    #[test]
    fn test_json_reads_back_into_descriptions() {
        let original = add_description();
        let json = serialize_json(&original).unwrap();

        let restored: ApiMethodDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_write_to_file_creates_directories_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out").join("nested").join("api.yaml");

        write_to_file("first", &file_path).unwrap();
        write_to_file("second", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "second");
    }
}
