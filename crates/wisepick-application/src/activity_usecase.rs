//! Activity use case implementation.
//!
//! `ActivityUseCase` owns one [`Session`] and coordinates it with the
//! generation service behind [`ShoppingAdvisor`]. At most one service call is
//! in flight at a time; each call is gated by a pending phase, and any
//! rejection restores the prior interactive phase with the error recorded on
//! the session, never discarding confirmed data.

use crate::export::{Delivery, ExportedSummary, Platform};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use wisepick_core::advisor::{AlternativeRequest, FeedbackRequest, ShoppingAdvisor, SummaryCapture};
use wisepick_core::budget;
use wisepick_core::criterion::{Criterion, CriterionId};
use wisepick_core::error::{Result, WisepickError};
use wisepick_core::session::{Phase, Session};
use wisepick_interaction::OpenAiApiAgent;

/// User-facing message when alternative generation fails.
const ALTERNATIVES_FAILED: &str = "AI가 응답하지 못했어요. API 키를 확인해주세요! 🔑";
/// User-facing message when the feedback call fails.
const FEEDBACK_FAILED: &str = "AI 피드백을 받지 못했어요. 다시 시도해주세요! 📝";

pub struct ActivityUseCase {
    advisor: Arc<dyn ShoppingAdvisor>,
    session: Session,
    rng: StdRng,
}

impl ActivityUseCase {
    /// Creates a use case over the given advisor with entropy-seeded
    /// randomness. Budgets are meant to differ between sessions.
    pub fn new(advisor: Arc<dyn ShoppingAdvisor>) -> Self {
        Self::with_rng(advisor, StdRng::from_entropy())
    }

    /// Creates a use case with caller-controlled randomness, for
    /// deterministic budget draws in tests.
    pub fn with_rng(advisor: Arc<dyn ShoppingAdvisor>, rng: StdRng) -> Self {
        Self {
            advisor,
            session: Session::new(),
            rng,
        }
    }

    /// Convenience constructor wiring the OpenAI agent from environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let agent = OpenAiApiAgent::try_from_env()?;
        Ok(Self::new(Arc::new(agent)))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The six criteria offered on the selection screen.
    pub fn suggested_criteria(&self) -> Vec<Criterion> {
        Criterion::suggested()
    }

    // ------------------------------------------------------------------
    // Step 1-2: item and budget
    // ------------------------------------------------------------------

    /// Submits the desired item and derives the session budget.
    ///
    /// A failed proposal call is not fatal: the fallback range takes over
    /// and the flow continues to criteria selection either way.
    pub async fn submit_item(&mut self, item: &str) -> Result<()> {
        self.session.begin_budget_request(item)?;

        let budget = match self.advisor.propose_budget(self.session.item()).await {
            Ok(proposal) => budget::derive(&proposal, &mut self.rng),
            Err(err) => {
                tracing::warn!(%err, "budget proposal failed, falling back to default range");
                budget::fallback(&mut self.rng)
            }
        };
        tracing::info!(item = self.session.item(), %budget, "session budget set");

        self.session.apply_budget(budget)
    }

    // ------------------------------------------------------------------
    // Step 2-3: criteria and alternatives
    // ------------------------------------------------------------------

    pub fn toggle_criterion(&mut self, criterion: Criterion) -> Result<()> {
        self.session.toggle_criterion(criterion)
    }

    pub fn add_custom_criterion(&mut self, label: &str) -> Result<()> {
        self.session.add_custom_criterion(label)
    }

    /// Requests the three strategic alternatives for the locked criteria.
    ///
    /// # Errors
    ///
    /// Propagates the `Service` error after returning the session to
    /// criteria selection; the budget and criteria survive.
    pub async fn fetch_alternatives(&mut self) -> Result<()> {
        self.session.begin_alternatives_request()?;

        let budget = self
            .session
            .budget()
            .ok_or_else(|| WisepickError::internal("no budget after criteria selection"))?;
        let request = AlternativeRequest::from_session(
            self.session.item(),
            budget,
            self.session.selected_criteria(),
        );

        match self.advisor.propose_alternatives(&request).await {
            Ok(alternatives) => self.session.apply_alternatives(alternatives),
            Err(err) => {
                tracing::warn!(%err, "alternative generation failed");
                self.session.fail_alternatives(ALTERNATIVES_FAILED)?;
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Step 4-5: rating and choosing
    // ------------------------------------------------------------------

    pub fn rate(&mut self, alternative: usize, criterion: &CriterionId, score: u8) -> Result<()> {
        self.session.rate(alternative, criterion, score)
    }

    pub fn totals(&self) -> [u32; 3] {
        self.session.totals()
    }

    pub fn stage_choice(&mut self, alternative: usize) -> Result<()> {
        self.session.stage_choice(alternative)
    }

    pub fn cancel_choice(&mut self) -> Result<()> {
        self.session.cancel_choice()
    }

    pub fn confirm_choice(&mut self) -> Result<()> {
        self.session.confirm_choice()
    }

    pub fn return_to_review(&mut self) -> Result<()> {
        self.session.return_to_review()
    }

    // ------------------------------------------------------------------
    // Step 6: learning summary and sharing
    // ------------------------------------------------------------------

    /// Submits the two sentence-completion answers and fetches the teacher
    /// feedback. Blank answers are rejected inline without a service call.
    pub async fn submit_summary(&mut self, answer_a: &str, answer_b: &str) -> Result<()> {
        self.session.begin_feedback_request(answer_a, answer_b)?;

        let budget = self
            .session
            .budget()
            .ok_or_else(|| WisepickError::internal("no budget in learning summary"))?;
        let (answer_a, answer_b) = self.session.answers();
        let request = FeedbackRequest {
            item: self.session.item().to_string(),
            budget,
            criteria_labels: self
                .session
                .selected_criteria()
                .iter()
                .map(|c| c.label.clone())
                .collect(),
            answer_a: answer_a.to_string(),
            answer_b: answer_b.to_string(),
        };

        match self.advisor.propose_feedback(&request).await {
            Ok(feedback) => self.session.apply_feedback(feedback),
            Err(err) => {
                tracing::warn!(%err, "feedback generation failed");
                self.session.fail_feedback(FEEDBACK_FAILED)?;
                Err(err)
            }
        }
    }

    /// Captures the summary view and picks the delivery mechanism for the
    /// platform. A failed capture surfaces a retryable error and leaves the
    /// session untouched.
    pub async fn export_summary(
        &self,
        capture: &dyn SummaryCapture,
        platform: Platform,
    ) -> Result<ExportedSummary> {
        if self.session.phase() != &Phase::SummaryShare {
            return Err(WisepickError::invalid_phase(
                "export_summary",
                self.session.phase().name(),
            ));
        }

        let bytes = capture.capture().await.map_err(|err| match err {
            export @ WisepickError::Export(_) => export,
            other => WisepickError::export(format!("이미지를 저장하지 못했어요: {other}")),
        })?;

        Ok(ExportedSummary {
            bytes,
            delivery: Delivery::for_platform(platform),
        })
    }

    pub fn try_another_choice(&mut self) -> Result<()> {
        self.session.try_another_choice()
    }

    pub fn start_over(&mut self) -> Result<()> {
        self.session.start_over()
    }

    // ------------------------------------------------------------------
    // Display helpers
    // ------------------------------------------------------------------

    pub fn current_step(&self) -> u8 {
        self.session.current_step()
    }

    /// The guide-character line for the current screen.
    pub fn guide_message(&self) -> String {
        match self.session.phase() {
            Phase::ItemEntry => "어떤 물건을 사고 싶니? 아래에 물건 이름을 써봐!".to_string(),
            Phase::BudgetPending => {
                format!("\"{}\"에 맞는 예산을 정하는 중...", self.session.item())
            }
            Phase::CriteriaSelection => format!(
                "'{}'을(를) 고를 때 무엇이 중요한지 기준 3가지를 선택해봐!",
                self.session.item()
            ),
            Phase::AlternativesPending => "AI가 인터넷을 뒤지는 중...".to_string(),
            Phase::ResultsReview => {
                "AI가 찾아온 3가지 선택지야! 아래에서 각 물건을 별점으로 평가해봐!".to_string()
            }
            Phase::FinalCheck { .. } => {
                "정말 이 물건이 최고의 선택일까? 총점이 가장 높은지 마지막으로 확인해봐!".to_string()
            }
            Phase::BudgetWarning { .. } => {
                "가진 돈이 부족해서 이 물건을 살 수 없어요! 😢".to_string()
            }
            Phase::LearningSummary => {
                "오늘의 쇼핑을 정리해 볼까요? 스스로 생각한 '합리적 선택'의 의미를 써보세요!"
                    .to_string()
            }
            Phase::FeedbackPending => "AI가 생각 중...".to_string(),
            Phase::SummaryShare => "AI 선생님의 피드백이 도착했어요! 🌟".to_string(),
        }
    }
}
