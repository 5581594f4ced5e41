//! Built-in format handler implementations.
//!
//! Each handler is a (parse, apply) pair over one format concern. Parsers
//! read a [`StyledElement`] into the format record; appliers write the
//! record back as styles, attributes or wrapper tags.
//!
//! [`StyledElement`]: super::element::StyledElement

pub mod border;
pub mod box_model;
pub mod decoration;
pub mod direction;
pub mod font;
pub mod list;
pub mod size;
pub mod table;
