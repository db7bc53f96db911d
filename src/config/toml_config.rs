use crate::core::spreadsheet::SPREADSHEET_EXTENSIONS;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub output: Option<OutputConfig>,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Spreadsheet,
    SheetUrl,
    XmlUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: SourceType,
    /// 檔案路徑或 URL，依 `type` 而定
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub rows: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FEED_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn output_filename(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.filename.as_deref())
    }

    pub fn preview_rows(&self) -> Option<usize> {
        self.preview.as_ref().and_then(|p| p.rows)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            match source.r#type {
                SourceType::Spreadsheet => {
                    validation::validate_path("source.location", &source.location)?;
                    validation::validate_file_extension(
                        "source.location",
                        &source.location,
                        &SPREADSHEET_EXTENSIONS,
                    )?;
                }
                SourceType::SheetUrl | SourceType::XmlUrl => {
                    validation::validate_url("source.location", &source.location)?;
                }
            }
        }

        if let Some(path) = self.output_path() {
            validation::validate_path("output.path", path)?;
        }
        if let Some(filename) = self.output_filename() {
            validation::validate_non_empty_string("output.filename", filename)?;
        }

        Ok(())
    }
}
