//! Activity phase types for session state management.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many steps the progress indicator shows.
pub const TOTAL_STEPS: u8 = 6;

/// The single tagged state of the activity.
///
/// The original screens were driven by independent visibility flags that
/// could in principle be set inconsistently; collapsing them into one enum
/// makes illegal combinations unrepresentable. `FinalCheck`, `BudgetWarning`
/// and the feedback sub-phases carry their own data so nothing needs to be
/// mirrored in booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Phase {
    /// Waiting for the student to enter the item they want to buy.
    #[default]
    ItemEntry,
    /// Budget proposal call in flight.
    BudgetPending,
    /// Student picks exactly three evaluation criteria.
    CriteriaSelection,
    /// Alternative generation call in flight.
    AlternativesPending,
    /// The rating grid is interactive.
    ResultsReview,
    /// A choice is staged; the totals comparison is shown for confirmation.
    FinalCheck { pending: usize },
    /// The confirmed choice exceeds the budget; dead end back to review.
    BudgetWarning { pending: usize },
    /// The two-blank sentence-completion form.
    LearningSummary,
    /// Feedback call in flight; the form is disabled.
    FeedbackPending,
    /// Feedback received; the shareable summary view is showing.
    SummaryShare,
}

impl Phase {
    /// Derived 1-6 progress step. Display only; never stored.
    pub fn step(&self) -> u8 {
        match self {
            Phase::ItemEntry => 1,
            Phase::BudgetPending | Phase::CriteriaSelection => 2,
            Phase::AlternativesPending => 3,
            Phase::ResultsReview => 4,
            Phase::FinalCheck { .. } | Phase::BudgetWarning { .. } => 5,
            Phase::LearningSummary | Phase::FeedbackPending | Phase::SummaryShare => 6,
        }
    }

    /// True while a service call is in flight. Pending phases accept no
    /// user action other than the call completing.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Phase::BudgetPending | Phase::AlternativesPending | Phase::FeedbackPending
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::ItemEntry => "ItemEntry",
            Phase::BudgetPending => "BudgetPending",
            Phase::CriteriaSelection => "CriteriaSelection",
            Phase::AlternativesPending => "AlternativesPending",
            Phase::ResultsReview => "ResultsReview",
            Phase::FinalCheck { .. } => "FinalCheck",
            Phase::BudgetWarning { .. } => "BudgetWarning",
            Phase::LearningSummary => "LearningSummary",
            Phase::FeedbackPending => "FeedbackPending",
            Phase::SummaryShare => "SummaryShare",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
