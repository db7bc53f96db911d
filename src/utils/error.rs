use std::fmt;
use thiserror::Error;

/// XML 結構不符合商品 feed 格式時的細節
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    MissingChannel { root_children: Vec<String> },
    NoItems { channel_children: Vec<String> },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::MissingChannel { root_children } => write!(
                f,
                "missing channel (available root elements: [{}])",
                root_children.join(", ")
            ),
            SchemaViolation::NoItems { channel_children } => write!(
                f,
                "no items (available elements in channel: [{}])",
                channel_children.join(", ")
            ),
        }
    }
}

/// 共享試算表失敗的階段：下載或解析 CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStage {
    Download,
    Parse,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed spreadsheet: {message}")]
    MalformedInput { message: String },

    #[error("Failed to fetch {url}: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to load shared sheet from {url}: {message}")]
    FetchOrParseError {
        url: String,
        stage: SheetStage,
        message: String,
    },

    #[error("XML parse error: {message}")]
    XmlParseError { message: String },

    #[error("Feed schema error: {0}")]
    SchemaError(SchemaViolation),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parse,
    Schema,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 退出碼：1 輸入/資料錯誤，2 網路錯誤，3 系統錯誤
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::MalformedInput { .. } => ErrorCategory::Input,
            CatalogError::FetchError { .. }
            | CatalogError::FetchOrParseError {
                stage: SheetStage::Download,
                ..
            } => ErrorCategory::Network,
            CatalogError::FetchOrParseError {
                stage: SheetStage::Parse,
                ..
            }
            | CatalogError::XmlParseError { .. }
            | CatalogError::CsvError(_) => ErrorCategory::Parse,
            CatalogError::SchemaError(_) => ErrorCategory::Schema,
            CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CatalogError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input
            | ErrorCategory::Parse
            | ErrorCategory::Schema
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::MalformedInput { message } => {
                format!("Error processing spreadsheet file: {}", message)
            }
            CatalogError::FetchError { url, source } => match source.status() {
                Some(status) => format!("Error downloading feed {}: HTTP {}", url, status),
                None => format!("Error downloading feed {}: {}", url, source),
            },
            CatalogError::FetchOrParseError { message, .. } => {
                format!("Error processing Google Sheet: {}", message)
            }
            CatalogError::XmlParseError { message } => format!("Error parsing XML: {}", message),
            CatalogError::SchemaError(SchemaViolation::MissingChannel { .. }) => {
                "No 'channel' element found in XML. Please check if this is a valid product feed."
                    .to_string()
            }
            CatalogError::SchemaError(SchemaViolation::NoItems { .. }) => {
                "No items found in the XML feed. The feed may be empty or use a different structure."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::MalformedInput { .. } => {
                "Make sure the file is a valid .xlsx, .xls, .xlsb or .ods workbook".to_string()
            }
            CatalogError::FetchError { .. } => {
                "Check the feed URL and your network connection, then try again".to_string()
            }
            CatalogError::FetchOrParseError { .. } => {
                "Make sure the sheet is shared with 'Anyone with the link' and try again"
                    .to_string()
            }
            CatalogError::XmlParseError { .. } => {
                "Open the feed URL in a browser and check that it returns well-formed XML"
                    .to_string()
            }
            CatalogError::SchemaError(violation) => match violation {
                SchemaViolation::MissingChannel { root_children } => format!(
                    "Expected <rss><channel>...</channel></rss>; the root contains [{}]",
                    root_children.join(", ")
                ),
                SchemaViolation::NoItems { channel_children } => format!(
                    "Expected <item> elements inside <channel>; found [{}]",
                    channel_children.join(", ")
                ),
            },
            CatalogError::CsvError(_) => "Check the output data for invalid content".to_string(),
            CatalogError::IoError(_) => {
                "Check that the paths exist and you have write permission".to_string()
            }
            CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            CatalogError::MissingConfigError { .. } => {
                "Provide one of --spreadsheet, --sheet-url or --xml-url".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
