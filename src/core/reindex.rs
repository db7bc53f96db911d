use crate::domain::model::{CanonicalRow, OutputTable, SourceTable, CANONICAL_SCHEMA};
use std::collections::HashMap;

/// 依欄位名稱完全比對，把任意表格對應到固定欄位
///
/// Canonical columns missing from the source come out empty and source columns
/// outside the schema are dropped. For duplicated header names the first one wins.
pub fn reindex(table: &SourceTable) -> OutputTable {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (index, header) in table.headers.iter().enumerate() {
        positions.entry(header.as_str()).or_insert(index);
    }

    let matched = positions
        .keys()
        .filter(|header| CANONICAL_SCHEMA.contains(*header))
        .count();
    tracing::debug!(
        "Reindexing {} rows: {} of {} source columns match the catalog schema",
        table.rows.len(),
        matched,
        table.headers.len()
    );

    let rows = table
        .rows
        .iter()
        .map(|row| {
            CanonicalRow::from_fn(|column| {
                positions
                    .get(column)
                    .and_then(|&index| row.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
        })
        .collect();

    OutputTable::new(rows)
}
