use std::fmt::Write as _;

/// 輸出 CSV 的固定欄位，順序即為輸出順序
pub const CANONICAL_SCHEMA: [&str; 29] = [
    "id",
    "title",
    "description",
    "availability",
    "condition",
    "price",
    "link",
    "image_link",
    "brand",
    "google_product_category",
    "fb_product_category",
    "quantity_to_sell_on_facebook",
    "sale_price",
    "sale_price_effective_date",
    "item_group_id",
    "gender",
    "color",
    "size",
    "age_group",
    "material",
    "pattern",
    "shipping",
    "shipping_weight",
    "gtin",
    "video[0].url",
    "video[0].tag[0]",
    "product_tags[0]",
    "product_tags[1]",
    "style[0]",
];

pub const OUTPUT_FILENAME: &str = "facebook_catalog.csv";
pub const OUTPUT_CONTENT_TYPE: &str = "text/csv";

/// 三種互斥的輸入來源，由呼叫端決定一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Spreadsheet(Vec<u8>),
    SharedSheetUrl(String),
    XmlFeedUrl(String),
}

impl InputSource {
    pub fn kind(&self) -> &'static str {
        match self {
            InputSource::Spreadsheet(_) => "spreadsheet",
            InputSource::SharedSheetUrl(_) => "shared sheet",
            InputSource::XmlFeedUrl(_) => "XML feed",
        }
    }
}

/// 任意欄位的表格資料 (試算表或 CSV 匯出)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

/// One value per canonical column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRow {
    values: Vec<String>,
}

impl CanonicalRow {
    pub fn from_fn<F>(mut value_for: F) -> Self
    where
        F: FnMut(&'static str) -> String,
    {
        Self {
            values: CANONICAL_SCHEMA.iter().map(|&column| value_for(column)).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        CANONICAL_SCHEMA
            .iter()
            .position(|c| *c == column)
            .map(|index| self.values[index].as_str())
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    rows: Vec<CanonicalRow>,
}

impl OutputTable {
    pub fn new(rows: Vec<CanonicalRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &CANONICAL_SCHEMA
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 前 n 筆的純文字預覽，只顯示有值的欄位
    pub fn preview(&self, limit: usize) -> String {
        let mut out = String::new();
        for (index, row) in self.rows.iter().take(limit).enumerate() {
            let fields: Vec<String> = CANONICAL_SCHEMA
                .iter()
                .zip(row.values())
                .filter(|(_, value)| !value.is_empty())
                .map(|(column, value)| format!("{}={}", column, value))
                .collect();
            let _ = writeln!(out, "[{}] {}", index, fields.join(" | "));
        }
        if self.rows.len() > limit {
            let _ = writeln!(out, "... {} more rows", self.rows.len() - limit);
        }
        out
    }
}

/// 轉換完成後交給呼叫端的檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

impl CsvArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: OUTPUT_FILENAME.to_string(),
            content_type: OUTPUT_CONTENT_TYPE,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}
