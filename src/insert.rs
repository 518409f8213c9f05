//! Markup insertion
//!
//! Computes the edits that wrap a selection in markup, or open and close
//! markup at the caret. Nothing here touches a document; hosts apply the
//! returned `EditPlan` themselves (or through `EditPlan::apply` when the
//! text is a plain `String`).

use std::ops::Range;

use crate::error::{PillarError, Result};

/// A single text insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Byte offset in the original text
    pub offset: usize,
    pub text: String,
}

/// Edits to apply plus where the caret ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    /// Insertions in document order, offsets relative to the unedited text
    pub insertions: Vec<Insertion>,
    /// Caret offset once every insertion is applied
    pub caret: usize,
}

impl EditPlan {
    /// Apply the plan to `text`
    ///
    /// Fails without touching `text` if an offset is past the end or not on
    /// a character boundary.
    pub fn apply(&self, text: &mut String) -> Result<()> {
        if let Some(bad) = self
            .insertions
            .iter()
            .find(|ins| ins.offset > text.len() || !text.is_char_boundary(ins.offset))
        {
            return Err(PillarError::InvalidOffset(bad.offset));
        }

        // Back to front so earlier offsets stay valid
        for ins in self.insertions.iter().rev() {
            text.insert_str(ins.offset, &ins.text);
        }
        Ok(())
    }
}

/// Plan the insertion of `markup` around `selection` or at `caret`
///
/// A non-empty selection gets `markup` on both sides and the caret lands
/// just before the closing markup. Otherwise `markup` is inserted twice at
/// the caret, with the caret left between the two copies.
pub fn compute_insertion(
    markup: &str,
    selection: Option<Range<usize>>,
    caret: usize,
) -> Result<EditPlan> {
    if markup.is_empty() || markup.contains(['\n', '\r']) {
        return Err(PillarError::InvalidMarkup(markup.to_string()));
    }

    let insert = |offset| Insertion {
        offset,
        text: markup.to_string(),
    };

    let plan = match selection {
        Some(range) if range.start != range.end => {
            let (start, end) = (range.start.min(range.end), range.start.max(range.end));
            EditPlan {
                insertions: vec![insert(start), insert(end)],
                caret: end + markup.len(),
            }
        }
        _ => EditPlan {
            insertions: vec![insert(caret), insert(caret)],
            caret: caret + markup.len(),
        },
    };

    Ok(plan)
}
