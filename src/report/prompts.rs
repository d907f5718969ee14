//! Instruction document and output schema for the career report.

use serde_json::{Value, json};

use crate::catalog::{AgeGroup, get_questions};
use crate::color::BaseColor;
use crate::diagnosis::AnswerMap;

/// Shown in the transcript for a question with no recorded answer.
pub const UNANSWERED: &str = "(응답 없음)";

/// Persona and output rules, sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "당신은 세계적인 색채 심리학자이자 진로 설계 전문가입니다. \
반드시 전문적이고 신뢰감 있는 톤으로 작성하며, 지정된 JSON 형식으로만 응답하세요.";

/// Build the instruction document for one report request.
///
/// Every catalog question of the age group is listed in order with its
/// recorded answer, or [`UNANSWERED`].
pub fn report_prompt(
    name: &str,
    age_group: AgeGroup,
    color: BaseColor,
    answers: &AnswerMap,
) -> String {
    let transcript = get_questions(age_group)
        .iter()
        .map(|q| {
            let answer = answers
                .get(q.id)
                .map(|a| a.to_string())
                .unwrap_or_else(|| UNANSWERED.to_string());
            format!("질문: {}\n답변: {}", q.text, answer)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\
아래 사용자의 데이터를 분석하여 전문적인 리포트를 작성하세요.

[사용자 정보]
이름: {name}
연령대: {age_group}
핵심 에너지 색상: {color}

[진단 데이터]
{transcript}

[작성 가이드라인]
1. persona: 사용자의 강점을 한 단어로 정의한 세련된 별칭 (예: 전략적 아이디어 뱅크)
2. keyword: 성향을 나타내는 3가지 핵심 키워드
3. summary: 현재 상태와 잠재력을 3-4문장으로 심층 요약. 중요한 단어는 **볼드** 처리.
4. chartData: 5개 역량 축(subject, value, fullMark=100)과 careerFactorInterpretation 해석.
5. energyBalance: 역량 적합도(theoryScore, 0-100), 심리 에너지(psychEnergy, 0-100), 상태 요약(status), 상세 해석(interpretation).
6. swot: 강점, 약점, 기회, 위협을 각각 2개씩 도출.
7. actionPlan:
   - careers: 추천 경로 3가지(title, reason). CAREER_PATH인 경우 반드시 '학과명 - 직무명' 형식을 사용.
   - colorTherapy: 심리 안정을 돕는 보완 색상과 colorTherapyReason.
   - scentTherapy: 추천 향기.
   - immediateAction: 지금 즉시 실천할 수 있는 한 문장 행동 지침."
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

/// The structured-output schema sent with every report request. All named
/// fields are required at every level.
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "persona": string(),
            "keyword": string(),
            "summary": string(),
            "chartData": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "subject": string(),
                        "value": number(),
                        "fullMark": number()
                    },
                    "required": ["subject", "value", "fullMark"]
                }
            },
            "careerFactorInterpretation": string(),
            "energyBalance": {
                "type": "OBJECT",
                "properties": {
                    "theoryScore": number(),
                    "psychEnergy": number(),
                    "status": string(),
                    "interpretation": string()
                },
                "required": ["theoryScore", "psychEnergy", "status", "interpretation"]
            },
            "swot": {
                "type": "OBJECT",
                "properties": {
                    "strengths": string_list(),
                    "weaknesses": string_list(),
                    "opportunities": string_list(),
                    "threats": string_list()
                },
                "required": ["strengths", "weaknesses", "opportunities", "threats"]
            },
            "actionPlan": {
                "type": "OBJECT",
                "properties": {
                    "careers": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": string(),
                                "reason": string()
                            },
                            "required": ["title", "reason"]
                        }
                    },
                    "colorTherapy": string(),
                    "colorTherapyReason": string(),
                    "scentTherapy": string(),
                    "immediateAction": string()
                },
                "required": [
                    "careers",
                    "colorTherapy",
                    "colorTherapyReason",
                    "scentTherapy",
                    "immediateAction"
                ]
            }
        },
        "required": [
            "persona",
            "keyword",
            "summary",
            "chartData",
            "careerFactorInterpretation",
            "energyBalance",
            "swot",
            "actionPlan"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::Answer;
    use crate::report::model::tests::sample_json;

    #[test]
    fn prompt_embeds_identity_and_transcript() {
        let mut answers = AnswerMap::new();
        answers.insert("cp_s1_p", Answer::Color(BaseColor::Yellow));
        answers.insert("cp_s1_c1", Answer::Choice("그렇다".to_string()));

        let prompt = report_prompt("민지", AgeGroup::CareerPath, BaseColor::Yellow, &answers);

        assert!(prompt.contains("이름: 민지"));
        assert!(prompt.contains("연령대: CAREER_PATH"));
        assert!(prompt.contains("핵심 에너지 색상: YELLOW"));
        assert!(prompt.contains("질문: 지금 나에게 가장 필요한 에너지는 어떤 색인가요?\n답변: 노랑"));
        assert!(prompt.contains("답변: 그렇다"));
        assert!(prompt.contains("'학과명 - 직무명'"));
        assert!(!prompt.contains(SYSTEM_INSTRUCTION));
    }

    #[test]
    fn prompt_lists_every_question_with_placeholder() {
        let prompt = report_prompt("A", AgeGroup::MindReset, BaseColor::Blue, &AnswerMap::new());
        assert_eq!(prompt.matches("질문: ").count(), 20);
        assert_eq!(prompt.matches(UNANSWERED).count(), 20);
    }

    #[test]
    fn prompt_follows_catalog_order() {
        let prompt = report_prompt("A", AgeGroup::DreamTree, BaseColor::Blue, &AnswerMap::new());
        let questions = get_questions(AgeGroup::DreamTree);
        let positions: Vec<usize> = questions
            .iter()
            .map(|q| prompt.find(q.text).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    fn collect_required(schema: &Value, path: &str, out: &mut Vec<String>) {
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            let required: Vec<&str> = schema["required"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            for (key, child) in props {
                assert!(required.contains(&key.as_str()), "{path}.{key} not required");
                out.push(format!("{path}.{key}"));
                collect_required(child, &format!("{path}.{key}"), out);
            }
        }
        if let Some(items) = schema.get("items") {
            collect_required(items, &format!("{path}[]"), out);
        }
    }

    #[test]
    fn schema_requires_every_property() {
        let mut fields = Vec::new();
        collect_required(&report_schema(), "$", &mut fields);
        assert!(fields.contains(&"$.actionPlan.careers[].reason".to_string()));
        assert!(fields.contains(&"$.chartData[].fullMark".to_string()));
    }

    #[test]
    fn schema_and_model_agree_on_top_level_fields() {
        let schema = report_schema();
        let mut schema_keys: Vec<_> = schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let mut model_keys: Vec<_> = sample_json().as_object().unwrap().keys().cloned().collect();
        schema_keys.sort();
        model_keys.sort();
        assert_eq!(schema_keys, model_keys);
    }
}
