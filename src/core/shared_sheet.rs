use crate::core::fetch::fetch_bytes;
use crate::domain::model::SourceTable;
use crate::utils::error::{CatalogError, Result, SheetStage};
use reqwest::Client;

const EXPORT_SUFFIX: &str = "/export?format=csv";

/// 把共享試算表連結改寫成 CSV 匯出連結
///
/// Everything from the first `/edit` (or, failing that, the first `/view`) is cut
/// before the export suffix is appended. Links with neither are used as-is, so an
/// already-exported link ends up with the suffix twice.
pub fn normalize_sheet_url(url: &str) -> String {
    let base = if let Some(index) = url.find("/edit") {
        &url[..index]
    } else if let Some(index) = url.find("/view") {
        &url[..index]
    } else {
        url
    };
    format!("{}{}", base, EXPORT_SUFFIX)
}

/// Parses a CSV export, first record as header. Short rows are padded.
pub fn parse_sheet_csv(bytes: &[u8]) -> std::result::Result<SourceTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err("No columns to parse from file".to_string());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            ));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(SourceTable::new(headers, rows))
}

pub async fn load_shared_sheet(client: &Client, sheet_url: &str) -> Result<SourceTable> {
    let csv_url = normalize_sheet_url(sheet_url);
    tracing::info!("⬇️ Downloading Google Sheet as CSV from {}", csv_url);

    let body = fetch_bytes(client, &csv_url)
        .await
        .map_err(|e| CatalogError::FetchOrParseError {
            url: csv_url.clone(),
            stage: SheetStage::Download,
            message: e.to_string(),
        })?;

    let table = parse_sheet_csv(&body).map_err(|message| CatalogError::FetchOrParseError {
        url: csv_url.clone(),
        stage: SheetStage::Parse,
        message,
    })?;

    tracing::info!(
        "📄 Google Sheet loaded: {} rows, {} columns",
        table.rows.len(),
        table.headers.len()
    );
    tracing::debug!("Sheet columns: {:?}", table.headers);
    Ok(table)
}
