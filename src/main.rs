use clap::Parser;
use feed_catalog::config::toml_config::TomlConfig;
use feed_catalog::core::ConfigProvider;
use feed_catalog::utils::error::CatalogError;
use feed_catalog::utils::{logger, validation::Validate};
use feed_catalog::{CliConfig, ConversionEngine, FeedPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting feed-catalog CLI");

    // 載入 TOML 配置 (命令列參數優先)
    if let Some(config_path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", config_path);
        let loaded = TomlConfig::from_file(&config_path).and_then(|file_config| {
            file_config.validate()?;
            Ok(file_config)
        });
        match loaded {
            Ok(file_config) => config.merge_toml(&file_config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_and_exit(&e);
    }

    let source = match config.input_source() {
        Ok(source) => source,
        Err(e) => report_and_exit(&e),
    };
    tracing::info!("🔀 Input mode: {}", source.kind());

    let storage = LocalStorage::new(config.output_path().to_string());
    let preview_rows = config.preview_rows();
    let pipeline = FeedPipeline::new(storage, config, source);
    let engine = ConversionEngine::new(pipeline).with_preview_rows(preview_rows);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Conversion completed successfully!");
            println!("✅ Catalog CSV ready: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            report_and_exit(&e);
        }
    }

    Ok(())
}

fn report_and_exit(e: &CatalogError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code())
}
