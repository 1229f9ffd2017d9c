//! Generated purchase alternatives.

use crate::budget::Budget;
use serde::{Deserialize, Serialize};

/// Every session gets exactly this many alternatives.
pub const ALTERNATIVE_COUNT: usize = 3;

/// One candidate purchase returned by the generation service.
///
/// The service is asked to make exactly one alternative exceed the budget,
/// but that is a request, not a guarantee. All price comparisons are
/// computed locally from whatever prices arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    /// Price in won, positive.
    pub price: u32,
    /// Human-readable description, newline-delimited per criterion.
    pub features: String,
}

impl Alternative {
    pub fn is_over_budget(&self, budget: Budget) -> bool {
        !budget.covers(self.price)
    }

    /// Won by which this alternative exceeds the budget; zero if affordable.
    pub fn overage(&self, budget: Budget) -> u32 {
        budget.shortfall(self.price)
    }
}
