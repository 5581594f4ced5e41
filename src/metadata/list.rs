//! List metadata: the numbering/bullet style originally requested, which
//! CSS `list-style-type` alone cannot always reproduce.

use serde::{Deserialize, Serialize};

use crate::format::numbering::{OrderedStyleType, UnorderedStyleType};

use super::MetadataDefinition;
use super::definition::Definition;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_style_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unordered_style_type: Option<u8>,
}

impl ListMetadata {
    pub fn is_empty(&self) -> bool {
        self.ordered_style_type.is_none() && self.unordered_style_type.is_none()
    }

    pub fn ordered_style(&self) -> Option<OrderedStyleType> {
        self.ordered_style_type.and_then(OrderedStyleType::from_u8)
    }

    pub fn unordered_style(&self) -> Option<UnorderedStyleType> {
        self.unordered_style_type
            .and_then(UnorderedStyleType::from_u8)
    }
}

impl MetadataDefinition for ListMetadata {
    fn definition() -> Definition {
        Definition::Object(vec![
            Definition::optional_field(
                "orderedStyleType",
                Definition::number_range(OrderedStyleType::MIN as f64, OrderedStyleType::MAX as f64),
            ),
            Definition::optional_field(
                "unorderedStyleType",
                Definition::number_range(
                    UnorderedStyleType::MIN as f64,
                    UnorderedStyleType::MAX as f64,
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

    #[test]
    fn test_round_trip() {
        let mut dataset = Dataset::new();
        let metadata = ListMetadata {
            ordered_style_type: Some(3),
            unordered_style_type: None,
        };
        write_metadata(&mut dataset, &metadata);

        let read: ListMetadata = read_metadata(&dataset).unwrap();
        assert_eq!(read, metadata);
        assert_eq!(read.ordered_style(), Some(OrderedStyleType::DecimalParenthesis));
    }

    #[test]
    fn test_out_of_range_field_reads_as_absent() {
        let mut dataset = Dataset::new();
        dataset.set(
            "editing-info",
            format!(r#"{{"orderedStyleType":{}}}"#, OrderedStyleType::MAX + 1),
        );
        let read: ListMetadata = read_metadata(&dataset).unwrap();
        assert_eq!(read.ordered_style_type, None);
    }

    #[test]
    fn test_malformed_json_is_dropped() {
        let mut dataset = Dataset::new();
        dataset.set("editing-info", "not json".to_string());
        assert_eq!(read_metadata::<ListMetadata>(&dataset), None);
    }
}
