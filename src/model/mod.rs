//! The content model tree.

pub mod node;

pub use node::{
    Block, Br, ContentModelDocument, Divider, Entity, FormatContainer, GeneralSegment, Image,
    ListItem, ListLevel, ListType, Paragraph, ParagraphDecorator, Segment, SelectionMarker, Table,
    TableCell, TableRow, Text,
};
