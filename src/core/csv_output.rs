use crate::domain::model::{CsvArtifact, OutputTable};
use crate::utils::error::{CatalogError, Result};

/// 序列化為 CSV：標題列為固定欄位，只在必要時加引號，以 `\n` 換行
pub fn to_csv_bytes(table: &OutputTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.values())?;
    }

    writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))
}

pub fn to_artifact(table: &OutputTable) -> Result<CsvArtifact> {
    Ok(CsvArtifact::new(to_csv_bytes(table)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CanonicalRow, CANONICAL_SCHEMA};

    fn sample_table() -> OutputTable {
        OutputTable::new(vec![
            CanonicalRow::from_fn(|column| match column {
                "id" => "SKU-1".to_string(),
                "title" => "Mug, large".to_string(),
                "description" => "The \"best\" mug\nfor coffee".to_string(),
                _ => String::new(),
            }),
            CanonicalRow::from_fn(|column| match column {
                "id" => "SKU-2".to_string(),
                "price" => "4.50 USD".to_string(),
                _ => String::new(),
            }),
        ])
    }

    #[test]
    fn test_header_is_canonical_schema() {
        let bytes = to_csv_bytes(&OutputTable::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, format!("{}\n", CANONICAL_SCHEMA.join(",")));
    }

    #[test]
    fn test_quoting_only_when_needed() {
        let text = String::from_utf8(to_csv_bytes(&sample_table()).unwrap()).unwrap();

        assert!(text.contains("SKU-1,\"Mug, large\",\"The \"\"best\"\" mug\nfor coffee\","));
        assert!(text.contains("\nSKU-2,,,,,4.50 USD,"));
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let table = sample_table();
        let bytes = to_csv_bytes(&table).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, CANONICAL_SCHEMA);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), table.len());
        for (record, row) in records.iter().zip(table.rows()) {
            let values: Vec<&str> = record.iter().collect();
            assert_eq!(values, row.values());
        }
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let table = sample_table();
        assert_eq!(to_csv_bytes(&table).unwrap(), to_csv_bytes(&table).unwrap());
    }

    #[test]
    fn test_artifact_wraps_bytes() {
        let artifact = to_artifact(&sample_table()).unwrap();
        assert_eq!(artifact.filename, "facebook_catalog.csv");
        assert!(artifact.bytes.starts_with(b"id,title,description,"));
    }
}
