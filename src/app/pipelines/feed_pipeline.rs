use crate::core::csv_output::to_artifact;
use crate::core::reindex::reindex;
use crate::core::shared_sheet::load_shared_sheet;
use crate::core::spreadsheet::read_spreadsheet;
use crate::core::xml_feed::{items_to_table, load_feed_items};
use crate::core::{ConfigProvider, InputSource, OutputTable, Pipeline, SourceData, Storage};
use crate::utils::error::Result;
use reqwest::Client;

/// 依輸入模式取得資料，轉成固定欄位後寫出 CSV
pub struct FeedPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    source: InputSource,
}

impl<S: Storage, C: ConfigProvider> FeedPipeline<S, C> {
    pub fn new(storage: S, config: C, source: InputSource) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
            source,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Extract and transform without writing anything.
    pub async fn convert(&self) -> Result<OutputTable> {
        let data = self.extract().await?;
        self.transform(data).await
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FeedPipeline<S, C> {
    async fn extract(&self) -> Result<SourceData> {
        tracing::debug!("Extracting from {} input", self.source.kind());

        match &self.source {
            InputSource::Spreadsheet(bytes) => {
                tracing::info!("Spreadsheet uploaded ({} bytes)", bytes.len());
                read_spreadsheet(bytes).map(SourceData::Table)
            }
            InputSource::SharedSheetUrl(url) => load_shared_sheet(&self.client, url)
                .await
                .map(SourceData::Table),
            InputSource::XmlFeedUrl(url) => load_feed_items(&self.client, url)
                .await
                .map(SourceData::FeedItems),
        }
    }

    async fn transform(&self, data: SourceData) -> Result<OutputTable> {
        let table = match data {
            SourceData::Table(table) => reindex(&table),
            SourceData::FeedItems(items) => items_to_table(&items),
        };
        Ok(table)
    }

    async fn load(&self, table: OutputTable) -> Result<String> {
        let artifact = to_artifact(&table)?.with_filename(self.config.output_filename());
        tracing::debug!(
            "Writing {} ({}, {} bytes, {} rows)",
            artifact.filename,
            artifact.content_type,
            artifact.bytes.len(),
            table.len()
        );

        self.storage
            .write_file(&artifact.filename, &artifact.bytes)
            .await
    }
}
