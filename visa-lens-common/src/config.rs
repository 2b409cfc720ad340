use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_format")]
    pub format: ReportFormat,
}

fn default_output_dir() -> String {
    "output".into()
}
fn default_format() -> ReportFormat {
    ReportFormat::Text
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Fields and conditions are ordered maps so that reports are always
/// produced in the same field order for the same configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_fields")]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_conditions")]
    pub conditions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_top_k() -> usize {
    10
}

// column names differ across dataset vintages; newer names listed first
fn default_fields() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "occupations".to_string(),
            vec!["SOC_NAME".to_string(), "LCA_CASE_SOC_NAME".to_string()],
        ),
        (
            "states".to_string(),
            vec![
                "WORKSITE_STATE".to_string(),
                "LCA_CASE_WORKLOC1_STATE".to_string(),
            ],
        ),
    ])
}

fn default_conditions() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([(
        "CERTIFIED".to_string(),
        vec!["CASE_STATUS".to_string(), "STATUS".to_string()],
    )])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            fields: default_fields(),
            conditions: default_conditions(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("visa-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("VISA_LENS_CONFIG") {
            PathBuf::from(env_path) // $VISA_LENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::VisaLensError::Other(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::VisaLensError::Other(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}
