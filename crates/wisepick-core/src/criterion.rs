//! Evaluation criteria.
//!
//! A criterion is one dimension the student scores the alternatives on.
//! Six suggested criteria ship with the activity; students may add their own,
//! which get a time-derived id and the default sparkle icon.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Disambiguates custom ids created within the same millisecond.
static CUSTOM_SEQ: AtomicU64 = AtomicU64::new(0);

/// How many criteria a session selects. Exactly this many are required
/// before alternatives can be generated.
pub const CRITERIA_LIMIT: usize = 3;

/// Stable identifier for a criterion. Built-ins use fixed ids; custom
/// entries get `custom_{unix_millis}_{seq}`, where the sequence number keeps
/// ids distinct even within one millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionId(String);

impl CriterionId {
    /// The id of the built-in price criterion, which the nudge guard keys on.
    pub const PRICE: &'static str = "price";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_price(&self) -> bool {
        self.0 == Self::PRICE
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named evaluation dimension with a display glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub label: String,
    pub icon: char,
}

impl Criterion {
    fn builtin(id: &str, label: &str, icon: char) -> Self {
        Self {
            id: CriterionId::new(id),
            label: label.to_string(),
            icon,
        }
    }

    /// The six criteria the activity suggests out of the box.
    pub fn suggested() -> Vec<Criterion> {
        vec![
            Self::builtin(CriterionId::PRICE, "가격", '💰'),
            Self::builtin("design", "디자인", '🎨'),
            Self::builtin("environment", "환경", '🌱'),
            Self::builtin("performance", "성능", '⚡'),
            Self::builtin("size", "크기", '📏'),
            Self::builtin("durability", "튼튼함", '💪'),
        ]
    }

    /// Creates a student-entered criterion with a freshly generated id.
    pub fn custom(label: impl Into<String>) -> Self {
        let seq = CUSTOM_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: CriterionId::new(format!(
                "custom_{}_{seq}",
                Utc::now().timestamp_millis()
            )),
            label: label.into(),
            icon: '✨',
        }
    }
}
