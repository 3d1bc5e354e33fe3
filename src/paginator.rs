// Grid pagination: maps an item's position in the sequence to a page and cell.

use crate::geometry::{PageGeometry, Rect};

/// Where one item lands in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAssignment {
    /// Position of the item in the input sequence
    pub index: usize,
    pub page_index: usize,
    pub column_index: u32,
    pub row_index: u32,
    pub cell: Rect,
}

impl CellAssignment {
    /// True for the first item of every page after the first.
    pub fn starts_new_page(&self) -> bool {
        self.index > 0 && self.column_index == 0 && self.row_index == 0
    }
}

/// Assign `count` items to cells in reading order (left to right, top to bottom).
///
/// The geometry is expected to be validated already; with zero columns or rows
/// there is nothing to assign and an empty list comes back.
pub fn assign(count: usize, geometry: &PageGeometry) -> Vec<CellAssignment> {
    if geometry.columns == 0 || geometry.rows == 0 {
        return Vec::new();
    }

    let cells_per_page = geometry.cells_per_page();
    let columns = geometry.columns as usize;
    let cell_width = geometry.cell_width();
    let cell_height = geometry.cell_height();

    (0..count)
        .map(|i| {
            let index_in_page = i % cells_per_page;
            let column_index = (index_in_page % columns) as u32;
            let row_index = (index_in_page / columns) as u32;

            CellAssignment {
                index: i,
                page_index: i / cells_per_page,
                column_index,
                row_index,
                cell: Rect::new(
                    geometry.margin_x + column_index as f32 * cell_width,
                    geometry.margin_y + row_index as f32 * cell_height,
                    cell_width,
                    cell_height,
                ),
            }
        })
        .collect()
}

/// Number of pages needed for `count` items.
pub fn page_count(count: usize, geometry: &PageGeometry) -> usize {
    let per_page = geometry.cells_per_page();
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}
