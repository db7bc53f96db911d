use crate::domain::model::SourceTable;
use crate::utils::error::{CatalogError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 讀取活頁簿第一張工作表，第一列為欄位名稱
pub fn read_spreadsheet(bytes: &[u8]) -> Result<SourceTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| {
        CatalogError::MalformedInput {
            message: format!("Unable to open the spreadsheet: {}", e),
        }
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogError::MalformedInput {
            message: "The workbook does not contain any worksheets".to_string(),
        })?
        .map_err(|e| CatalogError::MalformedInput {
            message: format!("Unable to read the worksheet data: {}", e),
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => {
            tracing::warn!("⚠️ First worksheet is empty");
            return Ok(SourceTable::default());
        }
    };
    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    tracing::info!(
        "📄 Spreadsheet loaded: {} rows, {} columns",
        rows.len(),
        headers.len()
    );
    tracing::debug!("Spreadsheet columns: {:?}", headers);

    Ok(SourceTable::new(headers, rows))
}

/// 儲存格的顯示文字；日期格式的數值轉成 `YYYY-MM-DD HH:MM:SS`
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) if !dt.is_duration() => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        other => other.to_string(),
    }
}
