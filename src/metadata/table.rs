//! Table metadata: the border preset and banding choices behind a styled
//! table, which cannot be reconstructed from the rendered cell styles.

use serde::{Deserialize, Serialize};

use super::MetadataDefinition;
use super::definition::Definition;

/// Border preset identifiers carried in table metadata.
pub const TABLE_BORDER_FORMAT_MIN: u8 = 0;
pub const TABLE_BORDER_FORMAT_MAX: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_border_color: Option<String>,
    pub has_header_row: bool,
    pub has_first_column: bool,
    pub has_banded_rows: bool,
    pub has_banded_columns: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color_even: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color_odd: Option<String>,
    pub table_border_format: u8,
}

impl MetadataDefinition for TableMetadata {
    fn definition() -> Definition {
        Definition::Object(vec![
            Definition::optional_field("topBorderColor", Definition::String),
            Definition::optional_field("bottomBorderColor", Definition::String),
            Definition::optional_field("verticalBorderColor", Definition::String),
            Definition::field("hasHeaderRow", Definition::Boolean),
            Definition::field("hasFirstColumn", Definition::Boolean),
            Definition::field("hasBandedRows", Definition::Boolean),
            Definition::field("hasBandedColumns", Definition::Boolean),
            Definition::optional_field("bgColorEven", Definition::String),
            Definition::optional_field("bgColorOdd", Definition::String),
            Definition::field(
                "tableBorderFormat",
                Definition::number_range(
                    TABLE_BORDER_FORMAT_MIN as f64,
                    TABLE_BORDER_FORMAT_MAX as f64,
                ),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Dataset;
    use crate::metadata::{read_metadata, write_metadata};

    fn sample() -> TableMetadata {
        TableMetadata {
            top_border_color: Some("#abcdef".to_string()),
            bottom_border_color: Some("#abcdef".to_string()),
            vertical_border_color: None,
            has_header_row: true,
            has_first_column: false,
            has_banded_rows: true,
            has_banded_columns: false,
            bg_color_even: Some("#ffffff".to_string()),
            bg_color_odd: None,
            table_border_format: 1,
        }
    }

    #[test]
    fn test_round_trip() {
        let mut dataset = Dataset::new();
        write_metadata(&mut dataset, &sample());
        assert_eq!(read_metadata::<TableMetadata>(&dataset), Some(sample()));
    }

    #[test]
    fn test_required_field_violation_drops_blob() {
        let mut dataset = Dataset::new();
        dataset.set(
            "editing-info",
            r#"{"hasHeaderRow":true,"hasFirstColumn":false,"hasBandedRows":true,"hasBandedColumns":false,"tableBorderFormat":99}"#.to_string(),
        );
        assert_eq!(read_metadata::<TableMetadata>(&dataset), None);
    }
}
