//! Question tables, one per age group, in presentation order.

use super::{AgeGroup, COLOR_OPTIONS, Question, QuestionCategory, SCALE_OPTIONS};

const fn psych(id: &'static str, text: &'static str, theory: &'static str) -> Question {
    Question {
        id,
        category: QuestionCategory::Psych,
        text,
        theory,
        options: COLOR_OPTIONS,
    }
}

const fn career(id: &'static str, text: &'static str, theory: &'static str) -> Question {
    Question {
        id,
        category: QuestionCategory::Career,
        text,
        theory,
        options: SCALE_OPTIONS,
    }
}

pub(super) static CATALOG: &[(AgeGroup, &[Question])] = &[
    (AgeGroup::DreamTree, DREAM_TREE),
    (AgeGroup::CareerPath, CAREER_PATH),
    (AgeGroup::MindReset, MIND_RESET),
];

pub(super) const DREAM_TREE: &[Question] = &[
    // Stage 1
    psych("dt_s1_p", "학교 가는 길, 내 마음은 무슨 색깔일까요?", "정서지능"),
    career("dt_s1_c1", "나는 책을 읽거나 글 쓰는 것이 재미있다.", "언어지능"),
    career("dt_s1_c2", "나는 숫자의 규칙을 찾아내는 것이 즐겁다.", "논리수학지능"),
    career("dt_s1_c3", "나는 지도를 보거나 길을 찾는 데 자신 있다.", "공간지능"),
    career("dt_s1_c4", "나는 몸을 움직여 운동하는 활동을 좋아한다.", "신체운동지능"),
    // Stage 2
    psych("dt_s2_p", "친구와 놀 때 내 기분은 어떤 색에 가까울까요?", "대인관계지능"),
    career("dt_s2_c1", "나는 악기 연주나 노래 부르는 것을 좋아한다.", "음악지능"),
    career("dt_s2_c2", "나는 다른 사람의 기분을 잘 이해한다.", "대인관계지능"),
    career("dt_s2_c3", "나는 내 생각이나 감정을 잘 알고 있다.", "자기이해지능"),
    career("dt_s2_c4", "나는 동물이나 식물 관찰하는 것을 즐긴다.", "자연친화지능"),
    // Stage 3
    psych("dt_s3_p", "어려운 문제를 풀 때 내 마음의 색깔은?", "문제해결지능"),
    career("dt_s3_c1", "나는 이야기 지어내는 것을 좋아한다.", "언어지능"),
    career("dt_s3_c2", "나는 암산이나 수학 퀴즈가 재미있다.", "논리수학지능"),
    career("dt_s3_c3", "나는 사물을 입체적으로 생각하는 편이다.", "공간지능"),
    career("dt_s3_c4", "나는 만들기나 조립을 아주 잘한다.", "신체운동지능"),
    // Stage 4
    psych("dt_s4_p", "10년 뒤 나의 미래를 상상하면 떠오르는 색은?", "희망지수"),
    career("dt_s4_c1", "나는 주변의 소리나 리듬을 잘 포착한다.", "음악지능"),
    career("dt_s4_c2", "나는 친구들에게 조언을 잘 해준다.", "대인관계지능"),
    career("dt_s4_c3", "나는 나만의 목표를 세우고 실천하는 편이다.", "자기이해지능"),
    career("dt_s4_c4", "나는 환경 보호나 자연에 관심이 많다.", "자연친화지능"),
];

pub(super) const CAREER_PATH: &[Question] = &[
    // Stage 1
    psych("cp_s1_p", "지금 나에게 가장 필요한 에너지는 어떤 색인가요?", "학습동기"),
    career("cp_s1_c1", "기계나 도구를 사용하여 물건을 고치는 것이 좋다.", "Holland-R"),
    career("cp_s1_c2", "새로운 사실을 탐구하고 원인을 분석하는 것이 즐겁다.", "Holland-I"),
    career("cp_s1_c3", "창의적인 아이디어를 내거나 예술 활동을 선호한다.", "Holland-A"),
    career("cp_s1_c4", "사람들을 가르치거나 도와주는 일에 보람을 느낀다.", "Holland-S"),
    // Stage 2
    psych("cp_s2_p", "전공 과제를 할 때 내 태도를 색으로 표현한다면?", "자기효능감"),
    career("cp_s2_c1", "조직을 이끌거나 남을 설득하는 일이 자신 있다.", "Holland-E"),
    career("cp_s2_c2", "정해진 규칙이나 절차를 따르는 체계적인 일이 좋다.", "Holland-C"),
    career("cp_s2_c3", "직접 몸을 써서 결과물을 만들어내는 것이 좋다.", "Holland-R"),
    career("cp_s2_c4", "학문적인 연구나 실험을 꾸준히 할 수 있다.", "Holland-I"),
    // Stage 3
    psych("cp_s3_p", "시험 기간, 나의 스트레스 지수를 색으로 표현하면?", "회복탄력성"),
    career("cp_s3_c1", "나만의 독창적인 결과물을 만드는 것이 중요하다.", "Holland-A"),
    career("cp_s3_c2", "팀 프로젝트에서 갈등을 중재하는 역할을 선호한다.", "Holland-S"),
    career("cp_s3_c3", "비즈니스적인 성과를 내는 것에 열정이 있다.", "Holland-E"),
    career("cp_s3_c4", "데이터를 꼼꼼하게 정리하고 기록하는 것이 편하다.", "Holland-C"),
    // Stage 4
    psych("cp_s4_p", "첫 출근 날 매고 싶은 넥타이/스카프 색깔은?", "직업가치관"),
    career("cp_s4_c1", "야외 활동이나 실습 중심의 학습을 좋아한다.", "Holland-R"),
    career("cp_s4_c2", "복잡한 이론적 문제를 논리적으로 푸는 것을 즐긴다.", "Holland-I"),
    career("cp_s4_c3", "자유롭고 형식에 얽매이지 않는 환경에서 잘 일한다.", "Holland-A"),
    career("cp_s4_c4", "사회적인 봉사나 공헌 활동에 참여하고 싶다.", "Holland-S"),
];

pub(super) const MIND_RESET: &[Question] = &[
    // Stage 1
    psych("mr_s1_p", "현재 내 직장 생활을 한 가지 색으로 표현한다면?", "직무만족도"),
    career("mr_s1_c1", "나의 성취감을 느끼는 것이 무엇보다 중요하다.", "가치관-성취"),
    career("mr_s1_c2", "안정적인 수입과 고용이 가장 우선이다.", "가치관-안정성"),
    career("mr_s1_c3", "업무 시간의 자율성이 보장되는 환경이 좋다.", "가치관-자율성"),
    career("mr_s1_c4", "충분한 경제적 보상이 가장 큰 동기부여가 된다.", "가치관-보상"),
    // Stage 2
    psych("mr_s2_p", "번아웃을 느낄 때 내 마음의 심연은 어떤 색인가요?", "번아웃지수"),
    career("mr_s2_c1", "타인에게 도움을 주는 일을 할 때 보람을 느낀다.", "가치관-봉사"),
    career("mr_s2_c2", "직장 내에서 인정받고 영향력을 발휘하고 싶다.", "가치관-인정"),
    career("mr_s2_c3", "새로운 기술을 배우고 자기계발을 하는 편이다.", "역량-자기개발"),
    career("mr_s2_c4", "전문성을 살려 나만의 커리어를 구축하고 싶다.", "역량-전문성"),
    // Stage 3
    psych("mr_s3_p", "성공적인 이직 후 첫 번째 연봉 협상 날, 나의 아우라 색깔은?", "자존감"),
    career("mr_s3_c1", "나는 일과 삶의 균형(워라밸)을 포기할 수 없다.", "가치관-워라밸"),
    career("mr_s3_c2", "조직 문화가 유연하고 소통이 잘 되는 곳이 좋다.", "가치관-소통"),
    career("mr_s3_c3", "변화가 많고 도전적인 업무 환경을 선호한다.", "역량-변화관리"),
    career("mr_s3_c4", "복지 혜택이나 근무 인프라가 중요하다.", "가치관-환경"),
    // Stage 4
    psych("mr_s4_p", "은퇴 후 제2의 인생을 상상하면 떠오르는 색은?", "생애설계"),
    career("mr_s4_c1", "사회적 명성이나 지위가 직업 선택의 기준이다.", "가치관-명예"),
    career("mr_s4_c2", "재택 근무나 유연 근무제 등을 적극 활용하고 싶다.", "가치관-자율성"),
    career("mr_s4_c3", "창업이나 독립적인 프리랜서 활동에 관심이 있다.", "역량-창업가정신"),
    career("mr_s4_c4", "취미 생활을 직업으로 연결하고 싶은 마음이 크다.", "역량-적성결합"),
];
