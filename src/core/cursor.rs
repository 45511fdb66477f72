//! Caret positions expressed against a segment sequence.

/// Where the collapsed caret sits, in segment terms.
///
/// `segment_index == None` means no caret could be determined; edits then go to the end of the
/// content. `text_offset` counts chars and only matters when the addressed segment is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretPosition {
    pub segment_index: Option<usize>,
    pub text_offset: usize,
}

impl CaretPosition {
    pub const fn at(segment_index: usize, text_offset: usize) -> Self {
        Self {
            segment_index: Some(segment_index),
            text_offset,
        }
    }

    pub const fn end() -> Self {
        Self {
            segment_index: None,
            text_offset: 0,
        }
    }

    pub const fn is_end(&self) -> bool {
        self.segment_index.is_none()
    }

    /// Applies an insertion step to a caret that was read before the insert.
    ///
    /// When whole segments were added the caret lands `text_count_delta` chars into the last
    /// one; otherwise it moves forward inside the same text run.
    pub fn advanced_by(self, step: CaretStep) -> Self {
        let Some(index) = self.segment_index else {
            return self;
        };
        if step.segment_count_delta == 0 {
            Self::at(index, self.text_offset + step.text_count_delta)
        } else {
            Self::at(index + step.segment_count_delta, step.text_count_delta)
        }
    }
}

/// How far an insert moved the caret: whole segments added and chars of inserted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretStep {
    pub segment_count_delta: usize,
    pub text_count_delta: usize,
}
