//! Session domain model.
//!
//! This is the single mutable record for one activity run. All mutation goes
//! through the transition methods below, each of which checks the current
//! [`Phase`] first, so the screen flow and the budget/selection consistency
//! rules live in one place.

use super::phase::Phase;
use crate::alternative::{ALTERNATIVE_COUNT, Alternative};
use crate::budget::Budget;
use crate::criterion::{CRITERIA_LIMIT, Criterion, CriterionId};
use crate::error::{Result, WisepickError};
use crate::rating::{MAX_SCORE, RatingGrid};
use serde::{Deserialize, Serialize};

/// One student's shopping-decision session. Created fresh per visit; never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    item: String,
    budget: Option<Budget>,
    selected_criteria: Vec<Criterion>,
    alternatives: Option<[Alternative; ALTERNATIVE_COUNT]>,
    ratings: RatingGrid,
    pending_choice: Option<usize>,
    answer_a: String,
    answer_b: String,
    feedback: Option<String>,
    last_error: Option<String>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn budget(&self) -> Option<Budget> {
        self.budget
    }

    pub fn selected_criteria(&self) -> &[Criterion] {
        &self.selected_criteria
    }

    pub fn alternatives(&self) -> Option<&[Alternative; ALTERNATIVE_COUNT]> {
        self.alternatives.as_ref()
    }

    pub fn ratings(&self) -> &RatingGrid {
        &self.ratings
    }

    pub fn pending_choice(&self) -> Option<usize> {
        self.pending_choice
    }

    pub fn answers(&self) -> (&str, &str) {
        (&self.answer_a, &self.answer_b)
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Derived 1-6 progress value for the indicator.
    pub fn current_step(&self) -> u8 {
        self.phase.step()
    }

    /// Whether the given alternative costs more than the session budget.
    /// Computed from raw prices, never from the generation request.
    pub fn is_over_budget(&self, alternative: usize) -> Option<bool> {
        let budget = self.budget?;
        self.alternatives
            .as_ref()?
            .get(alternative)
            .map(|alt| alt.is_over_budget(budget))
    }

    pub fn total(&self, alternative: usize) -> u32 {
        self.ratings.total(alternative)
    }

    pub fn totals(&self) -> [u32; ALTERNATIVE_COUNT] {
        self.ratings.totals()
    }

    pub fn max_total(&self) -> u32 {
        RatingGrid::max_total(self.selected_criteria.len())
    }

    // ------------------------------------------------------------------
    // Item entry and budget
    // ------------------------------------------------------------------

    /// Accepts the desired item and moves to the budget-pending phase.
    ///
    /// # Errors
    ///
    /// `Validation` when the item is blank (no service call should be made),
    /// `InvalidPhase` outside [`Phase::ItemEntry`].
    pub fn begin_budget_request(&mut self, item: &str) -> Result<()> {
        self.require_phase(Phase::ItemEntry, "begin_budget_request")?;
        let item = item.trim();
        if item.is_empty() {
            return Err(WisepickError::validation("사고 싶은 물건을 입력해주세요! 📝"));
        }
        self.item = item.to_string();
        self.last_error = None;
        self.phase = Phase::BudgetPending;
        Ok(())
    }

    /// Installs the derived budget and opens criteria selection.
    ///
    /// Callers reach this on success and on fallback alike; a failed budget
    /// call never strands the session in the pending phase.
    pub fn apply_budget(&mut self, budget: Budget) -> Result<()> {
        self.require_phase(Phase::BudgetPending, "apply_budget")?;
        self.budget = Some(budget);
        self.selected_criteria.clear();
        self.phase = Phase::CriteriaSelection;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Criteria selection
    // ------------------------------------------------------------------

    /// Adds the criterion, or removes it when already selected. Selecting a
    /// fourth criterion is a no-op.
    pub fn toggle_criterion(&mut self, criterion: Criterion) -> Result<()> {
        self.require_phase(Phase::CriteriaSelection, "toggle_criterion")?;
        if let Some(pos) = self
            .selected_criteria
            .iter()
            .position(|c| c.id == criterion.id)
        {
            self.selected_criteria.remove(pos);
        } else if self.selected_criteria.len() < CRITERIA_LIMIT {
            self.selected_criteria.push(criterion);
        }
        Ok(())
    }

    /// Adds a student-entered criterion with a fresh id.
    ///
    /// # Errors
    ///
    /// `Validation` when the label is blank or three criteria are already
    /// selected.
    pub fn add_custom_criterion(&mut self, label: &str) -> Result<()> {
        self.require_phase(Phase::CriteriaSelection, "add_custom_criterion")?;
        let label = label.trim();
        if label.is_empty() {
            return Err(WisepickError::validation("기준 이름을 입력해주세요! ✏️"));
        }
        if self.selected_criteria.len() >= CRITERIA_LIMIT {
            return Err(WisepickError::validation(format!(
                "기준은 {CRITERIA_LIMIT}가지까지만 고를 수 있어요!"
            )));
        }
        self.selected_criteria.push(Criterion::custom(label));
        Ok(())
    }

    /// Locks the criteria and moves to the alternatives-pending phase.
    ///
    /// # Errors
    ///
    /// `Validation` unless exactly three criteria are selected.
    pub fn begin_alternatives_request(&mut self) -> Result<()> {
        self.require_phase(Phase::CriteriaSelection, "begin_alternatives_request")?;
        if self.selected_criteria.len() != CRITERIA_LIMIT {
            return Err(WisepickError::validation(format!(
                "{}개 더 선택해주세요!",
                CRITERIA_LIMIT - self.selected_criteria.len()
            )));
        }
        self.last_error = None;
        self.phase = Phase::AlternativesPending;
        Ok(())
    }

    /// Installs a fresh alternative set, zero-fills the rating grid and
    /// opens the review screen.
    pub fn apply_alternatives(&mut self, alternatives: [Alternative; ALTERNATIVE_COUNT]) -> Result<()> {
        self.require_phase(Phase::AlternativesPending, "apply_alternatives")?;
        self.alternatives = Some(alternatives);
        self.ratings.reset_for(&self.selected_criteria);
        self.pending_choice = None;
        self.phase = Phase::ResultsReview;
        Ok(())
    }

    /// Records a generation failure and returns to criteria selection.
    /// Alternatives stay absent; the budget survives.
    pub fn fail_alternatives(&mut self, message: impl Into<String>) -> Result<()> {
        self.require_phase(Phase::AlternativesPending, "fail_alternatives")?;
        self.last_error = Some(message.into());
        self.phase = Phase::CriteriaSelection;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rating and choice
    // ------------------------------------------------------------------

    /// Applies one star rating.
    ///
    /// # Errors
    ///
    /// `Nudge` when the price criterion gets the maximum score on an
    /// alternative that exceeds the budget; the grid is left untouched.
    /// `Validation` for out-of-range scores or unselected criteria.
    pub fn rate(&mut self, alternative: usize, criterion: &CriterionId, score: u8) -> Result<()> {
        self.require_phase(Phase::ResultsReview, "rate")?;
        if !self.selected_criteria.iter().any(|c| &c.id == criterion) {
            return Err(WisepickError::validation(format!(
                "선택하지 않은 기준이에요: {criterion}"
            )));
        }

        if criterion.is_price() && score == MAX_SCORE {
            let budget = self
                .budget
                .ok_or_else(|| WisepickError::internal("no budget in ResultsReview"))?;
            let alt = self.alternative_at(alternative).ok_or_else(|| {
                WisepickError::internal(format!("alternative index out of range: {alternative}"))
            })?;
            if alt.is_over_budget(budget) {
                return Err(WisepickError::Nudge {
                    alternative: alt.name.clone(),
                    price: alt.price,
                    budget: budget.amount(),
                    overage: alt.overage(budget),
                });
            }
        }

        self.ratings.set(alternative, criterion, score)
    }

    /// Stages a final choice and opens the totals comparison.
    pub fn stage_choice(&mut self, alternative: usize) -> Result<()> {
        self.require_phase(Phase::ResultsReview, "stage_choice")?;
        if self.alternative_at(alternative).is_none() {
            return Err(WisepickError::internal(format!(
                "alternative index out of range: {alternative}"
            )));
        }
        self.pending_choice = Some(alternative);
        self.phase = Phase::FinalCheck {
            pending: alternative,
        };
        Ok(())
    }

    /// Abandons the staged choice and returns to the review grid.
    pub fn cancel_choice(&mut self) -> Result<()> {
        match self.phase {
            Phase::FinalCheck { .. } => {
                self.pending_choice = None;
                self.phase = Phase::ResultsReview;
                Ok(())
            }
            _ => Err(self.phase_error("cancel_choice")),
        }
    }

    /// Commits the staged choice: over budget routes to the warning screen,
    /// otherwise the learning summary opens with cleared answers.
    pub fn confirm_choice(&mut self) -> Result<()> {
        let pending = match self.phase {
            Phase::FinalCheck { pending } => pending,
            _ => return Err(self.phase_error("confirm_choice")),
        };
        let budget = self
            .budget
            .ok_or_else(|| WisepickError::internal("no budget in FinalCheck"))?;
        let over = self
            .alternative_at(pending)
            .map(|alt| alt.is_over_budget(budget))
            .ok_or_else(|| WisepickError::internal("staged choice out of range"))?;

        if over {
            self.phase = Phase::BudgetWarning { pending };
        } else {
            self.answer_a.clear();
            self.answer_b.clear();
            self.feedback = None;
            self.phase = Phase::LearningSummary;
        }
        Ok(())
    }

    /// Won missing to afford the staged choice; only meaningful on the
    /// budget-warning screen.
    pub fn shortfall(&self) -> Option<u32> {
        match self.phase {
            Phase::BudgetWarning { pending } => {
                let budget = self.budget?;
                self.alternative_at(pending).map(|alt| alt.overage(budget))
            }
            _ => None,
        }
    }

    /// Leaves the budget-warning dead end back to the review grid.
    pub fn return_to_review(&mut self) -> Result<()> {
        match self.phase {
            Phase::BudgetWarning { .. } => {
                self.pending_choice = None;
                self.phase = Phase::ResultsReview;
                Ok(())
            }
            _ => Err(self.phase_error("return_to_review")),
        }
    }

    // ------------------------------------------------------------------
    // Learning summary
    // ------------------------------------------------------------------

    /// Accepts the two sentence-completion answers and moves to the
    /// feedback-pending phase.
    ///
    /// # Errors
    ///
    /// `Validation` when either blank is empty; no service call is made.
    pub fn begin_feedback_request(&mut self, answer_a: &str, answer_b: &str) -> Result<()> {
        self.require_phase(Phase::LearningSummary, "begin_feedback_request")?;
        let (a, b) = (answer_a.trim(), answer_b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(WisepickError::validation("빈칸을 모두 채워주세요! 📝"));
        }
        self.answer_a = a.to_string();
        self.answer_b = b.to_string();
        self.last_error = None;
        self.phase = Phase::FeedbackPending;
        Ok(())
    }

    /// Installs the teacher feedback and opens the shareable summary.
    pub fn apply_feedback(&mut self, feedback: impl Into<String>) -> Result<()> {
        self.require_phase(Phase::FeedbackPending, "apply_feedback")?;
        self.feedback = Some(feedback.into());
        self.phase = Phase::SummaryShare;
        Ok(())
    }

    /// Records a feedback failure and re-enables the form. Answers survive
    /// so the student can resubmit.
    pub fn fail_feedback(&mut self, message: impl Into<String>) -> Result<()> {
        self.require_phase(Phase::FeedbackPending, "fail_feedback")?;
        self.last_error = Some(message.into());
        self.phase = Phase::LearningSummary;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Resets
    // ------------------------------------------------------------------

    /// "Try another choice": discards alternatives, ratings, feedback and
    /// answers but keeps the item, budget and criteria, so the student can
    /// regenerate alternatives from criteria selection.
    pub fn try_another_choice(&mut self) -> Result<()> {
        self.require_phase(Phase::SummaryShare, "try_another_choice")?;
        self.alternatives = None;
        self.ratings.clear();
        self.pending_choice = None;
        self.feedback = None;
        self.answer_a.clear();
        self.answer_b.clear();
        self.last_error = None;
        self.phase = Phase::CriteriaSelection;
        Ok(())
    }

    /// "Start over": resets the whole session to item entry. Refused only
    /// while a service call is in flight.
    pub fn start_over(&mut self) -> Result<()> {
        if self.phase.is_pending() {
            return Err(self.phase_error("start_over"));
        }
        *self = Session::new();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn alternative_at(&self, index: usize) -> Option<&Alternative> {
        self.alternatives.as_ref().and_then(|alts| alts.get(index))
    }

    fn require_phase(&self, expected: Phase, operation: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.phase_error(operation))
        }
    }

    fn phase_error(&self, operation: &'static str) -> WisepickError {
        WisepickError::invalid_phase(operation, self.phase.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::CriterionId;

    fn alternatives(prices: [u32; 3]) -> [Alternative; 3] {
        prices.map(|price| Alternative {
            name: format!("{price}원 상품"),
            price,
            features: "• 가격: 무난함".to_string(),
        })
    }

    /// Drives a fresh session to the review screen with a fixed budget.
    fn session_in_review(budget: u32, prices: [u32; 3]) -> Session {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(budget)).unwrap();
        for criterion in Criterion::suggested().into_iter().take(3) {
            session.toggle_criterion(criterion).unwrap();
        }
        session.begin_alternatives_request().unwrap();
        session.apply_alternatives(alternatives(prices)).unwrap();
        session
    }

    fn price_id() -> CriterionId {
        CriterionId::new(CriterionId::PRICE)
    }

    #[test]
    fn blank_item_is_rejected_without_leaving_item_entry() {
        let mut session = Session::new();
        let err = session.begin_budget_request("   ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.phase(), &Phase::ItemEntry);
    }

    #[test]
    fn budget_application_resets_criteria() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        assert_eq!(session.phase(), &Phase::BudgetPending);

        session.apply_budget(Budget::new(8_000)).unwrap();
        assert_eq!(session.phase(), &Phase::CriteriaSelection);
        assert_eq!(session.budget().unwrap().amount(), 8_000);
        assert!(session.selected_criteria().is_empty());
    }

    #[test]
    fn fourth_criterion_is_a_no_op() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();

        let suggested = Criterion::suggested();
        for criterion in suggested.iter().take(3).cloned() {
            session.toggle_criterion(criterion).unwrap();
        }
        session.toggle_criterion(suggested[3].clone()).unwrap();
        assert_eq!(session.selected_criteria().len(), 3);
        assert!(
            !session
                .selected_criteria()
                .iter()
                .any(|c| c.id == suggested[3].id)
        );
    }

    #[test]
    fn toggling_a_selected_criterion_removes_it() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();

        let price = Criterion::suggested().into_iter().next().unwrap();
        session.toggle_criterion(price.clone()).unwrap();
        assert_eq!(session.selected_criteria().len(), 1);
        session.toggle_criterion(price).unwrap();
        assert!(session.selected_criteria().is_empty());
    }

    #[test]
    fn alternatives_need_exactly_three_criteria() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();
        session
            .toggle_criterion(Criterion::suggested().remove(0))
            .unwrap();

        let err = session.begin_alternatives_request().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.phase(), &Phase::CriteriaSelection);
    }

    #[test]
    fn custom_criterion_respects_the_limit() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();

        session.add_custom_criterion("무게").unwrap();
        session.add_custom_criterion("소음").unwrap();
        session.add_custom_criterion("배터리").unwrap();
        assert!(session.add_custom_criterion("색상").unwrap_err().is_validation());
        assert_eq!(session.selected_criteria().len(), 3);
    }

    #[test]
    fn same_label_custom_criteria_rate_separate_cells() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();

        session.add_custom_criterion("무게").unwrap();
        session.add_custom_criterion("무게").unwrap();
        session.add_custom_criterion("소음").unwrap();
        let ids: Vec<_> = session
            .selected_criteria()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_ne!(ids[0], ids[1]);

        session.begin_alternatives_request().unwrap();
        session
            .apply_alternatives(alternatives([7_000, 6_000, 5_000]))
            .unwrap();
        session.rate(0, &ids[0], 2).unwrap();
        session.rate(0, &ids[1], 4).unwrap();
        assert_eq!(session.ratings().get(0, &ids[0]), 2);
        assert_eq!(session.ratings().get(0, &ids[1]), 4);
        assert_eq!(session.total(0), 6);
    }

    #[test]
    fn generation_failure_returns_to_criteria_selection() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        session.apply_budget(Budget::new(8_000)).unwrap();
        for criterion in Criterion::suggested().into_iter().take(3) {
            session.toggle_criterion(criterion).unwrap();
        }
        session.begin_alternatives_request().unwrap();
        session.fail_alternatives("AI가 응답하지 못했어요").unwrap();

        assert_eq!(session.phase(), &Phase::CriteriaSelection);
        assert!(session.alternatives().is_none());
        assert_eq!(session.budget().unwrap().amount(), 8_000);
        assert!(session.last_error().is_some());
        assert_eq!(session.selected_criteria().len(), 3);
    }

    #[test]
    fn nudge_blocks_max_price_score_on_over_budget_alternative() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);

        session.rate(0, &price_id(), 4).unwrap();
        let before = session.ratings().clone();

        let err = session.rate(0, &price_id(), 5).unwrap_err();
        match err {
            WisepickError::Nudge {
                alternative,
                price,
                budget,
                overage,
            } => {
                assert_eq!(alternative, "12000원 상품");
                assert_eq!(price, 12_000);
                assert_eq!(budget, 8_000);
                assert_eq!(overage, 4_000);
            }
            other => panic!("expected nudge, got {other:?}"),
        }
        // The cell keeps its prior value.
        assert_eq!(session.ratings(), &before);
        assert_eq!(session.ratings().get(0, &price_id()), 4);
    }

    #[test]
    fn max_price_score_is_fine_within_budget() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.rate(1, &price_id(), 5).unwrap();
        assert_eq!(session.ratings().get(1, &price_id()), 5);
    }

    #[test]
    fn rating_an_unselected_criterion_is_rejected() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        let err = session.rate(0, &CriterionId::new("durability"), 3).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn over_budget_badges_come_from_raw_prices() {
        let session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        assert_eq!(session.is_over_budget(0), Some(true));
        assert_eq!(session.is_over_budget(1), Some(false));
        assert_eq!(session.is_over_budget(2), Some(false));
    }

    #[test]
    fn the_one_over_two_under_request_is_not_assumed() {
        // The generator may ignore the strategy; the session tolerates a
        // set where every price exceeds the budget.
        let mut session = session_in_review(5_000, [9_000, 8_000, 7_000]);
        assert_eq!(session.is_over_budget(2), Some(true));

        session.stage_choice(2).unwrap();
        session.confirm_choice().unwrap();
        assert_eq!(session.phase(), &Phase::BudgetWarning { pending: 2 });
        assert_eq!(session.shortfall(), Some(2_000));
    }

    #[test]
    fn cancelling_final_check_clears_the_staged_choice() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.stage_choice(1).unwrap();
        assert_eq!(session.pending_choice(), Some(1));

        session.cancel_choice().unwrap();
        assert_eq!(session.phase(), &Phase::ResultsReview);
        assert_eq!(session.pending_choice(), None);
    }

    #[test]
    fn confirming_within_budget_opens_learning_summary() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.stage_choice(1).unwrap();
        session.confirm_choice().unwrap();
        assert_eq!(session.phase(), &Phase::LearningSummary);
    }

    #[test]
    fn confirming_over_budget_shows_exact_shortfall() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.stage_choice(0).unwrap();
        session.confirm_choice().unwrap();

        assert_eq!(session.phase(), &Phase::BudgetWarning { pending: 0 });
        assert_eq!(session.shortfall(), Some(4_000));

        session.return_to_review().unwrap();
        assert_eq!(session.phase(), &Phase::ResultsReview);
        assert_eq!(session.pending_choice(), None);
        // Ratings and alternatives are untouched by the dead end.
        assert!(session.alternatives().is_some());
    }

    #[test]
    fn blank_summary_answers_are_rejected_inline() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.stage_choice(1).unwrap();
        session.confirm_choice().unwrap();

        let err = session.begin_feedback_request("만족", " ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.phase(), &Phase::LearningSummary);
    }

    #[test]
    fn feedback_failure_keeps_the_answers() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.stage_choice(1).unwrap();
        session.confirm_choice().unwrap();
        session
            .begin_feedback_request("만족감을 주는 선택", "오래 쓸 수 있")
            .unwrap();
        session.fail_feedback("AI 피드백을 받지 못했어요").unwrap();

        assert_eq!(session.phase(), &Phase::LearningSummary);
        assert_eq!(session.answers(), ("만족감을 주는 선택", "오래 쓸 수 있"));
        assert!(session.last_error().is_some());
    }

    #[test]
    fn try_another_choice_keeps_item_budget_and_criteria() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.rate(1, &price_id(), 5).unwrap();
        session.stage_choice(1).unwrap();
        session.confirm_choice().unwrap();
        session.begin_feedback_request("만족", "좋았").unwrap();
        session.apply_feedback("훌륭한 정의야").unwrap();
        assert_eq!(session.phase(), &Phase::SummaryShare);

        session.try_another_choice().unwrap();
        assert_eq!(session.phase(), &Phase::CriteriaSelection);
        assert_eq!(session.item(), "필통");
        assert_eq!(session.budget().unwrap().amount(), 8_000);
        assert_eq!(session.selected_criteria().len(), 3);
        assert!(session.alternatives().is_none());
        assert!(session.feedback().is_none());
        assert_eq!(session.answers(), ("", ""));
        assert_eq!(session.totals(), [0, 0, 0]);
    }

    #[test]
    fn start_over_resets_everything() {
        let mut session = session_in_review(8_000, [12_000, 7_000, 6_500]);
        session.rate(1, &price_id(), 3).unwrap();
        session.start_over().unwrap();
        assert_eq!(session, Session::new());
    }

    #[test]
    fn start_over_is_refused_mid_call() {
        let mut session = Session::new();
        session.begin_budget_request("필통").unwrap();
        let err = session.start_over().unwrap_err();
        assert!(matches!(err, WisepickError::InvalidPhase { .. }));
        assert_eq!(session.phase(), &Phase::BudgetPending);
    }

    #[test]
    fn operations_out_of_phase_are_rejected() {
        let mut session = Session::new();
        assert!(session.rate(0, &price_id(), 3).is_err());
        assert!(session.confirm_choice().is_err());
        assert!(session.begin_alternatives_request().is_err());
        assert!(session.try_another_choice().is_err());
        assert_eq!(session.phase(), &Phase::ItemEntry);
    }
}
