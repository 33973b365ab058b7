//! Localized captions used by the engines.
//!
//! The engines never hardcode user-facing text; hosts plug their
//! translation layer in through [`Captions`].

use std::borrow::Cow;

/// Provider of static, localizable captions.
pub trait Captions {
    /// Caption under the total in a donut's center ("Total").
    fn total(&self) -> Cow<'_, str>;

    /// Placeholder text for charts without data ("No data").
    fn no_data(&self) -> Cow<'_, str>;

    /// Name of a fixed category in a tri-state row (pass / fail / n/a).
    fn category(&self, category: TriState) -> Cow<'_, str>;
}

/// The fixed categories of a tri-state row, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState {
    Pass,
    Fail,
    NotApplicable,
}

impl TriState {
    /// All categories in their fixed left-to-right order.
    pub const ALL: [TriState; 3] = [TriState::Pass, TriState::Fail, TriState::NotApplicable];

    /// Position of the category within a row.
    pub fn index(self) -> usize {
        match self {
            TriState::Pass => 0,
            TriState::Fail => 1,
            TriState::NotApplicable => 2,
        }
    }
}

/// English captions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCaptions;

impl Captions for DefaultCaptions {
    fn total(&self) -> Cow<'_, str> {
        Cow::Borrowed("Total")
    }

    fn no_data(&self) -> Cow<'_, str> {
        Cow::Borrowed("No data")
    }

    fn category(&self, category: TriState) -> Cow<'_, str> {
        Cow::Borrowed(match category {
            TriState::Pass => "Pass",
            TriState::Fail => "Fail",
            TriState::NotApplicable => "N/A",
        })
    }
}
