//! Selection adjustment over a content model.

use crate::model::{Block, ContentModelDocument, Segment};

/// Narrow a range selection to a single image selection.
///
/// Scans the model in reading order for the first selected image, clears
/// the selection flag everywhere else, and marks only that image as an
/// image selection. Returns `true` when an image was selected. A model with
/// no selected image is left untouched.
pub fn adjust_image_selection(model: &mut ContentModelDocument) -> bool {
    if !find_selected_image(&model.blocks) {
        return false;
    }
    let mut found = false;
    clear_and_mark(&mut model.blocks, &mut found);
    found
}

fn find_selected_image(blocks: &[Block]) -> bool {
    blocks.iter().any(|block| match block {
        Block::Paragraph(p) => p
            .segments
            .iter()
            .any(|s| matches!(s, Segment::Image(i) if i.is_selected)),
        Block::Container(c) => find_selected_image(&c.blocks),
        Block::ListItem(item) => find_selected_image(&item.blocks),
        Block::Table(table) => table
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|cell| find_selected_image(&cell.blocks)),
        Block::Divider(_) | Block::Entity(_) => false,
    })
}

fn clear_and_mark(blocks: &mut [Block], found: &mut bool) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                for segment in &mut paragraph.segments {
                    match segment {
                        Segment::Image(image) => {
                            if image.is_selected && !*found {
                                *found = true;
                                image.is_selected_as_image_selection = true;
                            } else {
                                image.is_selected = false;
                                image.is_selected_as_image_selection = false;
                            }
                        }
                        other => other.set_selected(false),
                    }
                }
            }
            Block::Container(container) => clear_and_mark(&mut container.blocks, found),
            Block::ListItem(item) => clear_and_mark(&mut item.blocks, found),
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        cell.is_selected = false;
                        clear_and_mark(&mut cell.blocks, found);
                    }
                }
            }
            Block::Divider(divider) => divider.is_selected = false,
            Block::Entity(entity) => entity.is_selected = false,
        }
    }
}
