use crate::core::Pipeline;
use crate::utils::error::Result;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    preview_rows: usize,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    /// 0 表示不輸出預覽
    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting catalog conversion");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!("Extracted {} source records", source.len());

        // Transform
        let table = self.pipeline.transform(source).await?;
        tracing::info!("Mapped {} rows to the catalog format", table.len());
        if self.preview_rows > 0 && !table.is_empty() {
            tracing::info!(
                "Preview (mapped to Facebook Catalog format):\n{}",
                table.preview(self.preview_rows)
            );
        }

        // Load
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
