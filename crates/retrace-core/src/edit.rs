//! Byte-offset text edits and the shared back-to-front application routine.
//!
//! Every engine reduces its matches to an [`EditPlan`]. Edits are expressed
//! against offsets in the original source and applied from the end of the
//! text towards the start, so a splice never shifts the offsets of edits
//! still waiting to be applied.
//!
//! Overlapping edits are a caller precondition violation: they are not
//! detected and the resulting text is unspecified.

use tracing::debug;

use crate::error::TransformError;

const EDIT_TARGET: &str = "retrace::edit";

/// A single splice into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    position: usize,
    length: Option<usize>,
    text: String,
}

impl Edit {
    /// Creates a pure insertion of `text` at `position`.
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            length: None,
            text: text.into(),
        }
    }

    /// Creates a replacement of `length` bytes starting at `position`.
    #[must_use]
    pub fn replace(position: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            length: Some(length),
            text: text.into(),
        }
    }

    /// Start offset of the edit.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes replaced, or `None` for an insertion.
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        self.length
    }

    /// Replacement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true when the edit inserts without removing anything.
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        self.length.is_none()
    }

    /// Exclusive end offset of the replaced span in the original text.
    #[must_use]
    pub const fn end(&self) -> usize {
        match self.length {
            Some(length) => self.position.saturating_add(length),
            None => self.position,
        }
    }

    /// Replacements at a shared offset are applied before insertions so the
    /// inserted text lands in front of the replacement.
    const fn application_rank(&self) -> u8 {
        if self.is_insertion() { 1 } else { 0 }
    }
}

/// An unordered collection of edits against one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    edits: Vec<Edit>,
}

impl EditPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self { edits: Vec::new() }
    }

    /// Adds an edit to the plan.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Edits in declaration order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Number of edits in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true when the plan holds no edits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the edits in application order.
    ///
    /// Edits are ordered by descending position. At a shared position,
    /// replacements come before insertions, and edits of the same kind are
    /// taken latest-declared first, so the output reads in declaration order.
    #[must_use]
    pub fn application_order(&self) -> Vec<&Edit> {
        let mut ordered: Vec<(usize, &Edit)> = self.edits.iter().enumerate().collect();
        ordered.sort_by(|(left_index, left), (right_index, right)| {
            right
                .position
                .cmp(&left.position)
                .then_with(|| left.application_rank().cmp(&right.application_rank()))
                .then_with(|| right_index.cmp(left_index))
        });
        ordered.into_iter().map(|(_, edit)| edit).collect()
    }

    /// Applies every edit to `source` as if all were computed against the
    /// original offsets simultaneously.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidEdit`] when an edit reaches past the
    /// end of the text or splits a UTF-8 character.
    pub fn apply(&self, source: &str) -> Result<String, TransformError> {
        if self.edits.is_empty() {
            return Ok(source.to_owned());
        }

        let ordered = self.application_order();
        for edit in &ordered {
            validate(source, edit)?;
        }

        // Everything before the current edit is untouched by earlier splices,
        // so original offsets stay valid in the growing buffer.
        let mut output = source.to_owned();
        for edit in ordered {
            splice(&mut output, edit)?;
        }

        debug!(
            target: EDIT_TARGET,
            edits = self.edits.len(),
            input_bytes = source.len(),
            output_bytes = output.len(),
            "applied edit plan"
        );
        Ok(output)
    }
}

impl FromIterator<Edit> for EditPlan {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

impl Extend<Edit> for EditPlan {
    fn extend<I: IntoIterator<Item = Edit>>(&mut self, iter: I) {
        self.edits.extend(iter);
    }
}

/// Checks an edit against the original source before any splicing.
fn validate(source: &str, edit: &Edit) -> Result<(), TransformError> {
    let start = edit.position;
    let end = edit.end();
    if end > source.len() {
        return Err(TransformError::invalid_edit(
            start,
            format!("range [{start}, {end}) is out of bounds"),
        ));
    }
    if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
        return Err(TransformError::invalid_edit(
            start,
            format!("range [{start}, {end}) is not UTF-8 aligned"),
        ));
    }
    Ok(())
}

/// Splices one edit into the working buffer.
///
/// Only overlapping edits can fail here; the buffer check keeps that
/// precondition violation from panicking.
fn splice(buffer: &mut String, edit: &Edit) -> Result<(), TransformError> {
    let range = edit.position..edit.end();
    if range.end > buffer.len()
        || !buffer.is_char_boundary(range.start)
        || !buffer.is_char_boundary(range.end)
    {
        return Err(TransformError::invalid_edit(
            edit.position,
            "edit overlaps a previously applied edit",
        ));
    }
    buffer.replace_range(range, &edit.text);
    Ok(())
}
