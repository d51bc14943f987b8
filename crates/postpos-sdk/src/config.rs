use std::path::Path;

use postpos_gate::GateConfig;
use postpos_merge::MergeConfig;
use postpos_meta::PinQuery;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Plugin-wide configuration, built once at startup and passed explicitly.
///
/// Every field may be set from a TOML file; missing keys keep their default.
///
/// ```toml
/// meta_field_name = "frontpage-post-position"
/// avoid_doubles = true
/// supported_content_types = ["post"]
/// conditions = ["is_front_page"]
/// page_size = 10
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Metadata field (and form field) holding an item's position.
    pub meta_field_name: String,
    /// Remove a pinned item's natural occurrence before inserting it.
    pub avoid_doubles: bool,
    /// Content types that carry a position.
    pub supported_content_types: Vec<String>,
    /// Request conditions under which the listing is reordered.
    pub conditions: Vec<String>,
    /// Page size of the listing and cap on pinned items. `None` follows the
    /// host's page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            meta_field_name: "frontpage-post-position".into(),
            avoid_doubles: true,
            supported_content_types: vec!["post".into()],
            conditions: GateConfig::default().conditions,
            page_size: None,
        }
    }
}

impl PluginConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    ///
    /// Returns `Ok(PluginConfig::default())` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("config not found at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meta_field_name.trim().is_empty() {
            return Err(ConfigError::Invalid("meta_field_name must not be empty".into()));
        }
        if self.page_size == Some(0) {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Returns `true` if items of `content_type` carry a position.
    pub fn supports(&self, content_type: &str) -> bool {
        self.supported_content_types.iter().any(|t| t == content_type)
    }

    /// The configured page size, or the host's when unset.
    pub fn effective_page_size(&self, host_page_size: usize) -> usize {
        self.page_size.unwrap_or(host_page_size)
    }

    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig {
            avoid_doubles: self.avoid_doubles,
        }
    }

    pub fn gate_config(&self) -> GateConfig {
        GateConfig::new(self.conditions.iter().cloned())
    }

    /// The pinned item query for a request.
    pub fn pin_query(&self, host_page_size: usize) -> PinQuery {
        PinQuery::new(self.meta_field_name.clone())
            .with_limit(self.effective_page_size(host_page_size))
            .with_content_types(self.supported_content_types.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpos_types::Position;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = PluginConfig::default();
        assert_eq!(config.meta_field_name, "frontpage-post-position");
        assert!(config.avoid_doubles);
        assert_eq!(config.supported_content_types, vec!["post".to_string()]);
        assert_eq!(config.conditions, vec!["is_front_page".to_string()]);
        assert_eq!(config.page_size, None);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(PluginConfig::from_toml_str("").unwrap(), PluginConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = PluginConfig::from_toml_str(
            r#"
            avoid_doubles = false
            conditions = ["is_front_page", "is_home"]
            page_size = 5
            "#,
        )
        .unwrap();
        assert!(!config.avoid_doubles);
        assert_eq!(config.conditions.len(), 2);
        assert_eq!(config.page_size, Some(5));
        assert_eq!(config.meta_field_name, "frontpage-post-position");
    }

    #[test]
    fn blank_field_name_is_invalid() {
        let err = PluginConfig::from_toml_str(r#"meta_field_name = " ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let err = PluginConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = PluginConfig::from_toml_str("avoid_doubles = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PluginConfig::load(dir.path().join("postpos.toml")).unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postpos.toml");
        std::fs::write(&path, "meta_field_name = \"slot\"\n").unwrap();
        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config.meta_field_name, "slot");
    }

    #[test]
    fn rendered_toml_parses_back() {
        let mut config = PluginConfig::default();
        config.page_size = Some(12);
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(PluginConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn page_size_falls_back_to_host() {
        let mut config = PluginConfig::default();
        assert_eq!(config.effective_page_size(10), 10);
        config.page_size = Some(3);
        assert_eq!(config.effective_page_size(10), 3);
    }

    #[test]
    fn pin_query_carries_field_limit_and_types() {
        let query = PluginConfig::default().pin_query(8);
        assert_eq!(query.field_name, "frontpage-post-position");
        assert_eq!(query.limit, Some(8));
        assert_eq!(query.min_position, Position::new(1));
        assert_eq!(query.content_types, vec!["post".to_string()]);
    }

    #[test]
    fn derived_configs_follow_fields() {
        let config = PluginConfig {
            avoid_doubles: false,
            conditions: vec!["is_home".into()],
            ..Default::default()
        };
        assert!(!config.merge_config().avoid_doubles);
        assert_eq!(config.gate_config().conditions, vec!["is_home".to_string()]);
        assert!(config.supports("post"));
        assert!(!config.supports("page"));
    }
}
