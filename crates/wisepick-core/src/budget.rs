//! Budget derivation policy.
//!
//! The generation service proposes a `{min, max}` range for the entered item.
//! The proposal is untrusted: fields may be missing, negative or absurdly
//! large. This module clamps the range and draws the session budget from it.
//! The randomness is deliberate pedagogical variability, so two sessions for
//! the same item usually get different budgets.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest budget the activity ever hands out, in won.
pub const BUDGET_FLOOR: u32 = 1_000;

/// Minimum width of the clamped proposal range.
const RANGE_SPREAD: i64 = 5_000;

/// Proposals beyond this are nonsense for an elementary-school purchase and
/// are capped so the arithmetic stays in `u32` range.
const PROPOSAL_CAP: i64 = 100_000_000;

/// Defaults applied when the service omits a field (matches the fallback the
/// activity has always used).
const DEFAULT_MIN: i64 = 5_000;
const DEFAULT_MAX: i64 = 50_000;

/// The budget range suggested by the generation service. Untrusted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProposal {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// The spending ceiling for one session, in won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Budget(u32);

impl Budget {
    pub fn new(amount: u32) -> Self {
        Budget(amount)
    }

    pub fn amount(&self) -> u32 {
        self.0
    }

    /// How much `price` exceeds this budget; zero when affordable.
    pub fn shortfall(&self, price: u32) -> u32 {
        price.saturating_sub(self.0)
    }

    pub fn covers(&self, price: u32) -> bool {
        price <= self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_won(self.0))
    }
}

/// Derives a session budget from a service proposal.
///
/// Clamps `min` to at least [`BUDGET_FLOOR`], forces `max` to exceed `min`
/// by at least 5,000 won, then draws uniformly from the multiples of 1,000
/// in the clamped range. `min` is rounded up to the 1,000-won grid first so
/// every drawn budget is a clean multiple.
pub fn derive(proposal: &BudgetProposal, rng: &mut impl Rng) -> Budget {
    let min = proposal
        .min
        .unwrap_or(DEFAULT_MIN)
        .clamp(BUDGET_FLOOR as i64, PROPOSAL_CAP);
    let max = proposal
        .max
        .unwrap_or(DEFAULT_MAX)
        .min(PROPOSAL_CAP)
        .max(min + RANGE_SPREAD);

    // Round up to the 1,000-won grid; min >= 1,000 so this cannot overflow.
    let min = (min + 999) / 1_000 * 1_000;
    let steps = (max - min) / 1_000 + 1;
    let drawn = min + rng.gen_range(0..steps) * 1_000;

    Budget(drawn as u32)
}

/// Fallback used when the budget proposal cannot be obtained at all:
/// a uniform multiple of 10,000 won in `[10_000, 90_000]`.
pub fn fallback(rng: &mut impl Rng) -> Budget {
    Budget(rng.gen_range(1..=9u32) * 10_000)
}

/// Formats an amount the way the activity displays money: grouped digits
/// with the 원 suffix, e.g. `12,000원`.
pub fn format_won(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push('원');
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn proposal(min: i64, max: i64) -> BudgetProposal {
        BudgetProposal {
            min: Some(min),
            max: Some(max),
        }
    }

    #[test]
    fn derive_stays_within_clamped_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let cases = [
            proposal(3_000, 8_000),
            proposal(500, 2_000),
            proposal(-10, -5),
            proposal(9_999, 10_001),
            proposal(50_000, 20_000),
            BudgetProposal::default(),
            BudgetProposal {
                min: None,
                max: Some(70_000),
            },
        ];

        for case in cases {
            for _ in 0..200 {
                let budget = derive(&case, &mut rng).amount();
                let min = case.min.unwrap_or(5_000).max(BUDGET_FLOOR as i64);
                let max = case.max.unwrap_or(50_000).max(min + 5_000);
                assert!(budget as i64 >= BUDGET_FLOOR as i64, "case {case:?}");
                assert_eq!(budget % 1_000, 0, "case {case:?}");
                assert!(budget as i64 <= max, "case {case:?} drew {budget}");
            }
        }
    }

    #[test]
    fn derive_covers_the_whole_range() {
        // min=3000, max=8000 must be able to draw both endpoints.
        let mut rng = StdRng::seed_from_u64(42);
        let case = proposal(3_000, 8_000);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(derive(&case, &mut rng).amount());
        }
        assert!(seen.contains(&3_000));
        assert!(seen.contains(&8_000));
        assert!(seen.iter().all(|b| (3_000..=8_000).contains(b)));
    }

    #[test]
    fn derive_rounds_unaligned_minimum_up_to_the_grid() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let budget = derive(&proposal(1_001, 3_500), &mut rng).amount();
            assert!(budget >= 2_000, "drew {budget} below the aligned minimum");
            assert_eq!(budget % 1_000, 0);
        }
    }

    #[test]
    fn derive_tolerates_huge_proposals() {
        let mut rng = StdRng::seed_from_u64(1);
        let budget = derive(&proposal(i64::MAX, i64::MAX), &mut rng).amount();
        assert!(budget >= BUDGET_FLOOR);
        assert_eq!(budget % 1_000, 0);
    }

    #[test]
    fn fallback_is_a_round_ten_thousand() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let budget = fallback(&mut rng).amount();
            assert!((10_000..=90_000).contains(&budget));
            assert_eq!(budget % 10_000, 0);
        }
    }

    #[test]
    fn shortfall_saturates_at_zero() {
        let budget = Budget(8_000);
        assert_eq!(budget.shortfall(12_000), 4_000);
        assert_eq!(budget.shortfall(8_000), 0);
        assert_eq!(budget.shortfall(500), 0);
        assert!(budget.covers(8_000));
        assert!(!budget.covers(8_001));
    }

    #[test]
    fn format_won_groups_digits() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(999), "999원");
        assert_eq!(format_won(8_000), "8,000원");
        assert_eq!(format_won(1_234_567), "1,234,567원");
    }
}
