//! Format model: CSS values, per-concern handlers and the handler registry.

pub mod context;
pub mod css;
pub mod defaults;
pub mod element;
pub mod handlers;
pub mod numbering;
pub mod parts;
pub mod registry;

pub use context::{ApplyContext, ListThreads, ParseContext};
pub use css::{
    BorderSideValue, Color, CssLength, Direction, PhysicalAlign, TextAlign, ToCss, logical_align,
    physical_align,
};
pub use element::StyledElement;
pub use parts::{BoxSides, Dataset, Format, VerticalAlign};
pub use registry::{
    FormatApplier, FormatHandler, FormatKey, FormatParser, FormatRegistry, FormatScope,
    default_handler, scope_keys,
};
