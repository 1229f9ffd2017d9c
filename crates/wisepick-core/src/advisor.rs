//! Capability interfaces for the external collaborators.
//!
//! The activity talks to exactly two outside services: the content/feedback
//! generation service (three operations) and the summary image capture
//! utility. Both are opaque behind these traits so the state machine can be
//! exercised with deterministic fakes.

use crate::alternative::{ALTERNATIVE_COUNT, Alternative};
use crate::budget::{Budget, BudgetProposal};
use crate::criterion::Criterion;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Everything the alternative-generation call needs to know.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeRequest {
    pub item: String,
    pub budget: Budget,
    pub criteria_labels: Vec<String>,
}

impl AlternativeRequest {
    pub fn from_session(item: &str, budget: Budget, criteria: &[Criterion]) -> Self {
        Self {
            item: item.to_string(),
            budget,
            criteria_labels: criteria.iter().map(|c| c.label.clone()).collect(),
        }
    }
}

/// Context embedded in the pedagogical feedback prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest {
    pub item: String,
    pub budget: Budget,
    pub criteria_labels: Vec<String>,
    /// The student's completion of "rational choice is ___".
    pub answer_a: String,
    /// The student's completion of "because ___".
    pub answer_b: String,
}

/// The content-generation service: prompt in, structured answer out.
///
/// Implementations report any network or parse trouble as
/// [`WisepickError::Service`](crate::WisepickError::Service); callers treat
/// every rejection uniformly as recoverable.
#[async_trait]
pub trait ShoppingAdvisor: Send + Sync {
    /// Proposes a realistic `{min, max}` budget range for the item.
    async fn propose_budget(&self, item: &str) -> Result<BudgetProposal>;

    /// Generates exactly three purchase alternatives under the strategic
    /// constraints (one attractive-but-over-budget, two contrasting
    /// in-budget options).
    async fn propose_alternatives(
        &self,
        request: &AlternativeRequest,
    ) -> Result<[Alternative; ALTERNATIVE_COUNT]>;

    /// Writes the teacher-style feedback for the student's two answers.
    /// Plain text, not JSON.
    async fn propose_feedback(&self, request: &FeedbackRequest) -> Result<String>;
}

/// The image-capture utility: summary view in, raster bytes out. May fail
/// (timeout, tainted canvas); failure must leave the session untouched.
#[async_trait]
pub trait SummaryCapture: Send + Sync {
    async fn capture(&self) -> Result<Vec<u8>>;
}
