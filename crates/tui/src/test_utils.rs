//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Converts a ratatui [`Buffer`] to one line of text per row, with trailing
/// spaces trimmed so assertions and inline snapshots stay readable.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        let row_start = result.len();
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((buf.area.x + x, buf.area.y + y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result[row_start..].trim_end_matches(' ').len();
        result.truncate(row_start + trimmed);
        result.push('\n');
    }
    result
}
