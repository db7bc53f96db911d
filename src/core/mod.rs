pub mod csv_output;
pub mod etl;
pub mod fetch;
pub mod reindex;
pub mod shared_sheet;
pub mod spreadsheet;
pub mod xml_feed;

pub use crate::domain::model::{
    CanonicalRow, CsvArtifact, InputSource, OutputTable, SourceTable, CANONICAL_SCHEMA,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceData, Storage};
pub use crate::domain::xml::XmlElement;
pub use crate::utils::error::Result;
