//! Metadata codec.
//!
//! Formats that cannot round-trip through CSS are serialized as JSON into a
//! `data-editing-info` attribute on the owning element. Reads validate
//! against the type's declarative definition; malformed JSON or a required
//! field violation drops the whole blob, an invalid optional field only
//! drops that field. Nothing here ever surfaces an error to the caller.

pub mod definition;
pub mod list;
pub mod table;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::format::Dataset;

pub use definition::{Definition, FieldDefinition, ValidationError, validate};
pub use list::ListMetadata;
pub use table::TableMetadata;

/// Dataset key holding the metadata JSON, without the `data-` prefix.
pub const EDITING_INFO_DATASET_NAME: &str = "editing-info";

/// A metadata type with a validation schema.
pub trait MetadataDefinition: Serialize + DeserializeOwned {
    fn definition() -> Definition;
}

/// Read and validate metadata from a dataset. Invalid metadata reads as
/// absent.
pub fn read_metadata<T: MetadataDefinition>(dataset: &Dataset) -> Option<T> {
    let raw = dataset.get(EDITING_INFO_DATASET_NAME)?;
    let mut value: Value = serde_json::from_str(raw).ok()?;
    validate(&mut value, &T::definition()).ok()?;
    serde_json::from_value(value).ok()
}

/// Serialize metadata into a dataset, replacing any existing blob.
pub fn write_metadata<T: MetadataDefinition>(dataset: &mut Dataset, metadata: &T) {
    if let Ok(json) = serde_json::to_string(metadata) {
        dataset.set(EDITING_INFO_DATASET_NAME, json);
    }
}
