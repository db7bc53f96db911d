use crate::domain::model::{OutputTable, SourceTable};
use crate::utils::error::Result;
use crate::domain::xml::XmlElement;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn preview_rows(&self) -> usize;
}

/// extract 階段的產出，依輸入模式不同
#[derive(Debug, Clone)]
pub enum SourceData {
    Table(SourceTable),
    FeedItems(Vec<XmlElement>),
}

impl SourceData {
    pub fn len(&self) -> usize {
        match self {
            SourceData::Table(table) => table.rows.len(),
            SourceData::FeedItems(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceData>;
    async fn transform(&self, data: SourceData) -> Result<OutputTable>;
    async fn load(&self, table: OutputTable) -> Result<String>;
}
