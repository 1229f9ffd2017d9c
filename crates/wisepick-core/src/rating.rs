//! The decision grid: per-alternative scores for each selected criterion.

use crate::alternative::ALTERNATIVE_COUNT;
use crate::criterion::{Criterion, CriterionId};
use crate::error::{Result, WisepickError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Highest star score a cell can hold.
pub const MAX_SCORE: u8 = 5;

/// A fixed-size array of maps, one per alternative, keyed by criterion id.
///
/// The array index makes the "always exactly three alternatives" invariant
/// explicit; absent cells read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingGrid([HashMap<CriterionId, u8>; ALTERNATIVE_COUNT]);

impl RatingGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-fills every cell for the given criteria, discarding old scores.
    /// Called when a fresh alternative set arrives.
    pub fn reset_for(&mut self, criteria: &[Criterion]) {
        for row in &mut self.0 {
            *row = criteria.iter().map(|c| (c.id.clone(), 0)).collect();
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.0 {
            row.clear();
        }
    }

    /// Reads a cell, defaulting to zero when unset.
    pub fn get(&self, alternative: usize, criterion: &CriterionId) -> u8 {
        self.0
            .get(alternative)
            .and_then(|row| row.get(criterion))
            .copied()
            .unwrap_or(0)
    }

    /// Writes a cell after range-checking both coordinates and the score.
    pub fn set(&mut self, alternative: usize, criterion: &CriterionId, score: u8) -> Result<()> {
        if score > MAX_SCORE {
            return Err(WisepickError::validation(format!(
                "점수는 0~{MAX_SCORE}점 사이여야 해요 (받은 값: {score})"
            )));
        }
        let row = self.0.get_mut(alternative).ok_or_else(|| {
            WisepickError::internal(format!("alternative index out of range: {alternative}"))
        })?;
        row.insert(criterion.clone(), score);
        Ok(())
    }

    /// Sum of current scores for one alternative, absent cells counted as 0.
    pub fn total(&self, alternative: usize) -> u32 {
        self.0
            .get(alternative)
            .map(|row| row.values().map(|&v| u32::from(v)).sum())
            .unwrap_or(0)
    }

    /// All three totals, in alternative order.
    pub fn totals(&self) -> [u32; ALTERNATIVE_COUNT] {
        [self.total(0), self.total(1), self.total(2)]
    }

    /// Highest total possible with the given criteria count.
    pub fn max_total(criteria_len: usize) -> u32 {
        criteria_len as u32 * u32::from(MAX_SCORE)
    }
}
