pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{SourceType, TomlConfig};
    use crate::core::etl::DEFAULT_PREVIEW_ROWS;
    use crate::core::spreadsheet::SPREADSHEET_EXTENSIONS;
    use crate::core::{ConfigProvider, InputSource};
    use crate::domain::model::OUTPUT_FILENAME;
    use crate::utils::error::{CatalogError, Result};
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "feed-catalog")]
    #[command(about = "Convert an XML feed, Excel file or Google Sheet into a Meta catalog CSV")]
    pub struct CliConfig {
        /// Spreadsheet file to convert (.xlsx, .xlsm, .xlsb, .xls, .ods)
        #[arg(long)]
        pub spreadsheet: Option<String>,

        /// Google Sheets link (must be shared with "Anyone with the link")
        #[arg(long)]
        pub sheet_url: Option<String>,

        /// XML product feed URL (e.g. Shopify Facebook feed)
        #[arg(long)]
        pub xml_url: Option<String>,

        /// Directory the CSV is written to [default: .]
        #[arg(long)]
        pub output_path: Option<String>,

        /// Output file name [default: facebook_catalog.csv]
        #[arg(long)]
        pub filename: Option<String>,

        /// Rows shown in the log preview, 0 disables it [default: 5]
        #[arg(long)]
        pub preview_rows: Option<usize>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    fn provided(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    impl CliConfig {
        /// 命令列參數優先，設定檔只補上未指定的部分
        pub fn merge_toml(&mut self, file: &TomlConfig) {
            let has_input = provided(&self.spreadsheet).is_some()
                || provided(&self.sheet_url).is_some()
                || provided(&self.xml_url).is_some();

            if !has_input {
                if let Some(source) = &file.source {
                    let location = Some(source.location.clone());
                    match source.r#type {
                        SourceType::Spreadsheet => self.spreadsheet = location,
                        SourceType::SheetUrl => self.sheet_url = location,
                        SourceType::XmlUrl => self.xml_url = location,
                    }
                }
            }

            if self.output_path.is_none() {
                self.output_path = file.output_path().map(str::to_string);
            }
            if self.filename.is_none() {
                self.filename = file.output_filename().map(str::to_string);
            }
            if self.preview_rows.is_none() {
                self.preview_rows = file.preview_rows();
            }
        }

        /// 依優先順序選出唯一的輸入：試算表 > 共享試算表 > XML
        pub fn input_source(&self) -> Result<InputSource> {
            if let Some(path) = provided(&self.spreadsheet) {
                self.warn_ignored(&[("--sheet-url", &self.sheet_url), ("--xml-url", &self.xml_url)]);
                tracing::info!("📄 Reading spreadsheet file: {}", path);
                let bytes = std::fs::read(path).map_err(|e| CatalogError::MalformedInput {
                    message: format!("Unable to read {}: {}", path, e),
                })?;
                return Ok(InputSource::Spreadsheet(bytes));
            }

            if let Some(url) = provided(&self.sheet_url) {
                self.warn_ignored(&[("--xml-url", &self.xml_url)]);
                return Ok(InputSource::SharedSheetUrl(url.to_string()));
            }

            if let Some(url) = provided(&self.xml_url) {
                return Ok(InputSource::XmlFeedUrl(url.to_string()));
            }

            Err(CatalogError::MissingConfigError {
                field: "input".to_string(),
            })
        }

        fn warn_ignored(&self, others: &[(&str, &Option<String>)]) {
            for (flag, value) in others {
                if provided(value).is_some() {
                    tracing::warn!("⚠️ Ignoring {} because a higher-priority input was given", flag);
                }
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn output_path(&self) -> &str {
            self.output_path.as_deref().unwrap_or(".")
        }

        fn output_filename(&self) -> &str {
            self.filename.as_deref().unwrap_or(OUTPUT_FILENAME)
        }

        fn preview_rows(&self) -> usize {
            self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            let spreadsheet = provided(&self.spreadsheet);
            let sheet_url = provided(&self.sheet_url);
            let xml_url = provided(&self.xml_url);

            if spreadsheet.is_none() && sheet_url.is_none() && xml_url.is_none() {
                return Err(CatalogError::MissingConfigError {
                    field: "input".to_string(),
                });
            }

            if let Some(path) = spreadsheet {
                validation::validate_path("spreadsheet", path)?;
                validation::validate_file_extension("spreadsheet", path, &SPREADSHEET_EXTENSIONS)?;
            }
            if let Some(url) = sheet_url {
                validation::validate_url("sheet_url", url)?;
            }
            if let Some(url) = xml_url {
                validation::validate_url("xml_url", url)?;
            }

            validation::validate_path("output_path", self.output_path())?;
            validation::validate_non_empty_string("filename", self.output_filename())?;
            Ok(())
        }
    }

}
