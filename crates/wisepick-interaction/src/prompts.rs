//! Prompt templates for the three generation calls.
//!
//! The budget and alternative prompts demand JSON answers; the feedback
//! prompt asks for plain text. The alternative prompt carries the strategic
//! constraints: exactly one attractive over-budget option at 1.2-1.5x the
//! budget and two contrasting in-budget options at 0.70-0.95x, shuffled.
//! That contract is requested here and nowhere enforced; all price logic
//! downstream works from the returned numbers.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use wisepick_core::advisor::{AlternativeRequest, FeedbackRequest};
use wisepick_core::budget::{Budget, format_won};
use wisepick_core::error::{Result, WisepickError};

/// System prompt for the budget-range proposal.
pub const BUDGET_SYSTEM: &str = "너는 초등학생의 쇼핑 예산을 설정하는 도우미야. \
물건 종류에 맞는 현실적이고 구체적인 예산 범위를 제시해. \
최소값은 반드시 1000원 이상이어야 하고, 초등학생이 실제로 살 수 있는 가격대여야 해.";

/// System prompt for the pedagogical feedback call.
pub const FEEDBACK_SYSTEM: &str = r#"당신은 4학년 사회 선생님입니다. 학생이 내린 '합리적 선택의 정의(A)'와 '이유(B)'를 분석해서 피드백을 주세요.

**필수 포함 내용:**
1. 학생이 쓴 핵심 단어(A, B)를 반드시 따옴표로 인용해서 언급할 것
2. 정의(A)와 이유(B)가 논리적으로 잘 연결되었는지 평가할 것
3. 이번 쇼핑 체험(선택한 물건, 예산, 평가 기준)과 연결 지어 설명할 것

**용어 사용 규칙:**
- ✅ 사용 허용 (적극 권장): '합리적 선택', '절약', '만족감', '선택 기준'
- ❌ 사용 금지: '기회비용', '효용', '소비 성향', '매몰비용' 등 어려운 전문 용어
- 대체 표현: '기회비용' → "아쉽게 포기한 다른 물건", '효용' → "만족감", '예산 제약' → "가진 돈 안에서"

교과서 핵심 용어를 섞어서 전문적인 느낌을 주되, 말투는 여전히 친절하고 쉬워야 합니다."#;

const BUDGET_USER_TEMPLATE: &str = r#"초등학생이 "{{ item }}"을(를) 사고 싶어해. 이 물건을 실제로 살 수 있는 현실적인 예산 범위의 최소값과 최대값을 알려줘. 최소값은 반드시 1000원 이상이어야 하고, 최대값은 최소값보다 커야 해. 반드시 JSON 형식으로 답해: {"min": 최소값(숫자, 1000 이상), "max": 최대값(숫자, min보다 큼)}"#;

const ALTERNATIVES_SYSTEM_TEMPLATE: &str = r#"너는 초등학생을 위한 경제교육 도우미야.

**핵심 역할**: 학생들이 합리적 선택을 고민하도록 전략적으로 대안을 구성해야 해.

**반드시 지켜야 할 규칙**:
1. 3가지 대안 중 정확히 1개는 예산을 초과하되 모든 면에서 매력적이어야 함
2. 나머지 2개는 예산 내이지만 서로 상충되는 장단점을 가져야 함
3. 대안의 순서는 무작위로 섞어서 제시 (예산 초과가 항상 첫 번째일 필요 없음)
4. 각 대안의 features에 선택된 기준({{ criteria_text }})에 대한 구체적 정보와 장단점을 명확히 포함
   - features는 각 기준마다 줄바꿈(\n)을 넣어서 가독성 있게 작성
5. 예산 내 두 대안은 "어떤 기준을 더 중요하게 볼 것인가"에 따라 호불호가 갈리도록 만들어야 함

**가격 설정 규칙 (매우 중요!)**:
- price 필드는 반드시 "정수 숫자만" 입력 (예: 15000, 22000)
- 절대로 단위(원, 만원 등)를 포함하지 말 것
- 가격은 반드시 실제 시장에서 판매되는 현실적인 가격이어야 함

항상 JSON 형식으로 응답해."#;

const ALTERNATIVES_USER_TEMPLATE: &str = r#"초등학생 4학년 사회과 '합리적 선택' 학습을 위해, 사용자가 입력한 '{{ item }}'을(를) 주제로 3가지 가상 쇼핑 대안을 만들어줘.

**예산**: {{ budget_won }}
**평가 기준**: {{ criteria_text }}

**중요! 3가지 대안은 반드시 다음 전략으로 구성해:**

1. **첫 번째 유형의 대안 (예산 초과)**:
   - 모든 기준({{ criteria_text }})을 높은 수준으로 만족하는 매력적인 제품
   - **반드시 예산({{ budget_won }})을 초과**해야 함
   - 가격은 예산의 1.2~1.5배 정도 ({{ over_min_won }} ~ {{ over_max_won }})

2. **두 번째 유형의 대안 (예산 내)**:
   - **반드시 예산({{ budget_won }}) 이하**여야 함
   - 가격은 예산의 70~95% 정도 ({{ under_min_won }} ~ {{ under_max_won }})
   - 특정 기준들은 우수하지만 다른 기준들은 아쉬운 구조

3. **세 번째 유형의 대안 (예산 내)**:
   - **반드시 예산({{ budget_won }}) 이하**여야 함
   - 가격은 예산의 70~95% 정도 ({{ under_min_won }} ~ {{ under_max_won }})
   - 두 번째 대안과 정반대의 장단점 구조를 가져서, 두 대안이 서로 상충되는 가치를 대표해야 함

**🚨 가격 설정 규칙 (절대 준수!)**:
- price는 반드시 정수 숫자만 입력 (단위 절대 금지!)
- '{{ item }}'의 실제 시장 판매가를 기준으로 설정
- 최소 가격은 1000원 이상이어야 함

**각 대안의 특징(features)에는 {{ criteria_text }}에 대한 구체적인 정보를 모두 포함하고, 장단점을 명확히 해줘.**
**중요: features는 각 기준마다 줄바꿈(\n)을 넣어서 가독성 있게 작성해줘.**

**세 대안의 순서는 무작위로 섞어서 답변해줘.**

반드시 다음 JSON 형식으로만 답변해줘 (price는 숫자만!):
{
  "options": [
    {
      "name": "상품명",
      "price": 15000,
      "features": "특징 설명 ({{ criteria_text }}에 대한 정보와 장단점 포함)"
    }
  ]
}"#;

const FEEDBACK_USER_TEMPLATE: &str = r#"**[학생 정보]**
- 선택하려던 물건: {{ item }}
- AI가 정한 예산: {{ budget_won }}
- 학생이 선택한 평가 기준: {{ criteria_text }}

**[학생이 제출한 합리적 선택의 정의]**
- 정의(A): "{{ answer_a }}"
- 이유(B): "{{ answer_b }}"

**[분석 요청]**
위 정의와 이유를 분석하여, 아래 3가지를 반드시 포함한 피드백을 작성해주세요:

1. 학생이 쓴 핵심 단어("{{ answer_a }}", "{{ answer_b }}")를 반드시 따옴표로 인용해서 언급
2. 정의(A)와 이유(B)가 논리적으로 잘 연결되었는지 구체적으로 평가
3. 이번 {{ item }} 쇼핑 체험(예산 {{ budget_won }}, 평가 기준 {{ criteria_text }})과 연결 지어 설명

**[피드백 작성 규칙]**
- 3-4문장으로 작성
- "잘했어", "멋져" 같은 상투적인 칭찬은 절대 금지
- 학생의 표현을 직접 인용하면서 구체적으로 분석할 것
- 교과서 핵심 용어('합리적 선택', '절약', '만족감', '선택 기준')를 적극 활용할 것
- 어려운 전문 용어('기회비용', '효용', '소비 성향' 등)는 사용 금지. 대신 쉬운 말로 풀어서 설명할 것"#;

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("budget_user", BUDGET_USER_TEMPLATE)
        .expect("budget_user template is valid");
    env.add_template("alternatives_system", ALTERNATIVES_SYSTEM_TEMPLATE)
        .expect("alternatives_system template is valid");
    env.add_template("alternatives_user", ALTERNATIVES_USER_TEMPLATE)
        .expect("alternatives_user template is valid");
    env.add_template("feedback_user", FEEDBACK_USER_TEMPLATE)
        .expect("feedback_user template is valid");
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    let template = ENV
        .get_template(name)
        .map_err(|e| WisepickError::internal(format!("missing template {name}: {e}")))?;
    template
        .render(ctx)
        .map_err(|e| WisepickError::internal(format!("failed to render {name}: {e}")))
}

fn criteria_text(labels: &[String]) -> String {
    labels.join(", ")
}

fn scaled_won(budget: Budget, factor: f64) -> String {
    format_won((budget.amount() as f64 * factor).round() as u32)
}

/// (system, user) prompts asking for a `{min, max}` budget range.
pub fn budget_prompts(item: &str) -> Result<(String, String)> {
    let user = render("budget_user", context! { item })?;
    Ok((BUDGET_SYSTEM.to_string(), user))
}

/// (system, user) prompts asking for the three strategic alternatives.
pub fn alternative_prompts(request: &AlternativeRequest) -> Result<(String, String)> {
    let criteria_text = criteria_text(&request.criteria_labels);
    let system = render(
        "alternatives_system",
        context! { criteria_text => criteria_text.clone() },
    )?;
    let user = render(
        "alternatives_user",
        context! {
            item => request.item.clone(),
            criteria_text,
            budget_won => request.budget.to_string(),
            over_min_won => scaled_won(request.budget, 1.2),
            over_max_won => scaled_won(request.budget, 1.5),
            under_min_won => scaled_won(request.budget, 0.7),
            under_max_won => scaled_won(request.budget, 0.95),
        },
    )?;
    Ok((system, user))
}

/// (system, user) prompts asking for the teacher-style feedback text.
pub fn feedback_prompts(request: &FeedbackRequest) -> Result<(String, String)> {
    let user = render(
        "feedback_user",
        context! {
            item => request.item.clone(),
            budget_won => request.budget.to_string(),
            criteria_text => criteria_text(&request.criteria_labels),
            answer_a => request.answer_a.clone(),
            answer_b => request.answer_b.clone(),
        },
    )?;
    Ok((FEEDBACK_SYSTEM.to_string(), user))
}
