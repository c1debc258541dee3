//! Maintenance configuration
//!
//! Thresholds, metadata key names and the lookup tables driving the
//! transforms (FAQ blocks, title rewrites, cover images, the reference date)
//! live in one file instead of in code. Every section has defaults, so an
//! empty file or no file at all yields a working audit setup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, Result};
use crate::transform::faq::FaqBlock;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ContentError::InvalidInput(format!(
                "Unsupported config format: {}. Supported formats: toml, yaml, yml, json",
                extension
            ))),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Directory holding the articles
    pub content_dir: PathBuf,
    /// File extensions recognized as documents
    pub extensions: Vec<String>,
    pub fields: FieldNames,
    pub audit: AuditSettings,
    pub faq: FaqSettings,
    /// File name -> new title
    pub titles: BTreeMap<String, String>,
    /// Document id -> cover image URL
    pub images: BTreeMap<String, String>,
    pub dates: DateSettings,
    pub external: ExternalSettings,
    pub keywords: KeywordSettings,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/reviews"),
            extensions: vec!["mdx".to_string()],
            fields: FieldNames::default(),
            audit: AuditSettings::default(),
            faq: FaqSettings::default(),
            titles: BTreeMap::new(),
            images: BTreeMap::new(),
            dates: DateSettings::default(),
            external: ExternalSettings::default(),
            keywords: KeywordSettings::default(),
        }
    }
}

/// Metadata key names used by the rules and transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub title: String,
    /// Short description shown in search results
    pub description: String,
    pub cover_image: String,
    pub date: String,
    /// Structured product fields expected on product reviews
    pub product: Vec<String>,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            title: "title".to_string(),
            description: "excerpt".to_string(),
            cover_image: "coverImage".to_string(),
            date: "date".to_string(),
            product: ["rating", "brand", "model", "price"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Audit thresholds and markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    pub title_max_chars: usize,
    pub description_max_chars: usize,
    /// Alt text shorter than this is flagged
    pub min_alt_chars: usize,
    /// Overrides the profile's thin-content threshold
    pub min_body_chars: Option<usize>,
    /// Any of these in the body counts as an FAQ section
    pub faq_markers: Vec<String>,
    /// File names containing this are guides, not product reviews
    pub guide_marker: String,
    /// Length of the ids given to product reviews
    pub product_id_len: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            title_max_chars: 60,
            description_max_chars: 160,
            min_alt_chars: 5,
            min_body_chars: None,
            faq_markers: vec![
                "## Perguntas Frequentes".to_string(),
                "## FAQ".to_string(),
                "<FAQ".to_string(),
            ],
            guide_marker: "guia".to_string(),
            product_id_len: 3,
        }
    }
}

/// FAQ injection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqSettings {
    /// Text that means a document already has an FAQ
    pub guard_markers: Vec<String>,
    /// File name -> block to append
    pub blocks: BTreeMap<String, FaqBlock>,
}

impl Default for FaqSettings {
    fn default() -> Self {
        Self {
            guard_markers: vec!["<FAQBox".to_string(), "Perguntas Frequentes".to_string()],
            blocks: BTreeMap::new(),
        }
    }
}

/// Publish-date normalization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// Dates after this day are considered future-dated
    pub reference: NaiveDate,
    /// Size of the window, ending at `reference`, new dates are drawn from
    pub window_days: u32,
    /// Articles directory when it differs from `content_dir`
    pub content_dir: Option<PathBuf>,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            reference: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default(),
            window_days: 180,
            content_dir: None,
        }
    }
}

/// External tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalSettings {
    /// Launcher for the node tools
    pub runner: String,
    /// Site URL used when none is given on the command line
    pub base_url: String,
    /// Where the crawler writes its report
    pub report_dir: PathBuf,
}

impl Default for ExternalSettings {
    fn default() -> Self {
        Self {
            runner: "npx".to_string(),
            base_url: "http://localhost:3000".to_string(),
            report_dir: PathBuf::from("reports"),
        }
    }
}

/// Keyword gap analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSettings {
    /// Smallest monthly search volume worth reporting
    pub min_volume: u64,
    /// Keywords at or above this difficulty are out of reach
    pub max_difficulty: u32,
    /// Rows shown in the report
    pub limit: usize,
    /// Topics covered without a dedicated article file name
    pub covered_topics: Vec<String>,
    /// Exact keywords the site already ranks for
    pub covered_keywords: Vec<String>,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            min_volume: 50,
            max_difficulty: 60,
            limit: 100,
            covered_topics: [
                "solar",
                "painel solar",
                "bateria",
                "consumo",
                "instalar",
                "instalação",
                "defeito",
                "conserto",
                "resfriar",
                "elber",
                "maxiclima",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            covered_keywords: vec![
                "geladeira para caminhão".to_string(),
                "geladeira de caminhão".to_string(),
            ],
        }
    }
}

impl MaintenanceConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            ContentError::FileError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content, format)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replace the content directory
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    /// Directory scanned by date normalization
    pub fn dates_dir(&self) -> &Path {
        self.dates.content_dir.as_deref().unwrap_or(&self.content_dir)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ContentError::config_error(
                "at least one document extension is required",
            ));
        }
        if self.dates.window_days == 0 {
            return Err(ContentError::config_error("dates.window_days must be positive"));
        }
        for (file, title) in &self.titles {
            if title.contains('"') || title.contains('\n') {
                return Err(ContentError::config_error(format!(
                    "title for '{}' must not contain quotes or line breaks",
                    file
                )));
            }
        }
        for (id, url) in &self.images {
            if url.contains('"') || url.trim().is_empty() {
                return Err(ContentError::config_error(format!(
                    "image URL for id '{}' must be non-empty and unquoted",
                    id
                )));
            }
        }
        if self.keywords.limit == 0 {
            return Err(ContentError::config_error("keywords.limit must be positive"));
        }
        for (file, block) in &self.faq.blocks {
            if block.entries.is_empty() {
                return Err(ContentError::config_error(format!(
                    "FAQ block for '{}' has no entries",
                    file
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MaintenanceConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content/reviews"));
        assert_eq!(config.fields.description, "excerpt");
        assert_eq!(config.audit.title_max_chars, 60);
        assert_eq!(config.dates.window_days, 180);
        assert_eq!(config.dates.reference.to_string(), "2026-01-15");
        assert_eq!(config.dates_dir(), Path::new("content/reviews"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Path::new("a.ini")).is_err());
    }

    #[test]
    fn test_parse_toml_tables() {
        let content = r#"
content_dir = "site/reviews"

[titles]
"103-elber.mdx" = "Geladeira Elber 65 Litros"

[images]
"102" = "https://example.com/102.jpg"

[dates]
reference = "2026-02-01"
content_dir = "public/articles"

[faq.blocks."102-resfriar.mdx"]
heading = "Perguntas Frequentes sobre a Resfriar 31L"

[[faq.blocks."102-resfriar.mdx".entries]]
question = "Cabe no 1620?"
answer = "Sim."
"#;
        let config = MaintenanceConfig::parse(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("site/reviews"));
        assert_eq!(config.titles.len(), 1);
        assert_eq!(config.images["102"], "https://example.com/102.jpg");
        assert_eq!(config.dates.reference, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(config.dates.window_days, 180);
        assert_eq!(config.dates_dir(), Path::new("public/articles"));
        assert_eq!(config.faq.blocks["102-resfriar.mdx"].entries.len(), 1);
        // untouched sections keep defaults
        assert_eq!(config.extensions, vec!["mdx".to_string()]);
    }

    #[test]
    fn test_parse_yaml() {
        let content = "extensions: [mdx, md]\naudit:\n  min_body_chars: 800\n";
        let config = MaintenanceConfig::parse(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.extensions.len(), 2);
        assert_eq!(config.audit.min_body_chars, Some(800));
        assert_eq!(config.audit.description_max_chars, 160);
    }

    #[test]
    fn test_rejects_quoted_title() {
        let content = "[titles]\n\"a.mdx\" = 'Diz \"oi\"'\n";
        let err = MaintenanceConfig::parse(content, ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ContentError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_zero_window() {
        let content = r#"{"dates": {"window_days": 0}}"#;
        let err = MaintenanceConfig::parse(content, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ContentError::ConfigError(_)));
    }

    #[test]
    fn test_keyword_settings() {
        let defaults = KeywordSettings::default();
        assert_eq!(defaults.min_volume, 50);
        assert!(defaults.covered_topics.contains(&"painel solar".to_string()));

        let content = "[keywords]\nmin_volume = 100\ncovered_topics = [\"gaveta\"]\n";
        let config = MaintenanceConfig::parse(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.keywords.min_volume, 100);
        assert_eq!(config.keywords.max_difficulty, 60);
        assert_eq!(config.keywords.covered_topics, vec!["gaveta".to_string()]);

        let err = MaintenanceConfig::parse("[keywords]\nlimit = 0\n", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ContentError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = MaintenanceConfig::parse("content_dir = ", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ContentError::ParseError(_)));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = MaintenanceConfig::load(None).unwrap();
        assert_eq!(config, MaintenanceConfig::default());
    }
}
