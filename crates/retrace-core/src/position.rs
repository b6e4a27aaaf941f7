//! Shared position conversion helpers.
//!
//! Offsets are zero-based byte offsets. For user-facing messages, we prefer
//! one-based line and column numbers.

/// Converts a byte offset into one-based display coordinates.
///
/// Columns count characters, not bytes. Offsets past the end of `source`
/// are clamped to its length; offsets inside a multi-byte character resolve
/// to that character's column.
#[must_use]
pub fn offset_to_one_based(source: &str, offset: usize) -> (u32, u32) {
    let mut line: usize = 1;
    let mut column: usize = 1;
    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line = line.saturating_add(1);
            column = 1;
        } else {
            column = column.saturating_add(1);
        }
    }

    // Line/column numbers will realistically never exceed u32::MAX.
    (
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}
