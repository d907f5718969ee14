//! Simulated progress shown while a report request is in flight.
//!
//! The percentage is cosmetic: it climbs quickly to 85, creeps to 98, and
//! never reaches 100 on its own. It has no link to the real request.

use std::time::Duration;

use rand::Rng;

pub const LOADING_STAGES: [&str; 7] = [
    "진단 데이터를 안전하게 수집 중입니다...",
    "사용자의 무의식 컬러 코드를 해석 중입니다...",
    "데이터를 기반으로 최적의 진로군을 매칭 중입니다...",
    "Gemini AI가 심층 SWOT 분석을 수행 중입니다...",
    "개인 맞춤형 액션 플랜을 설계하고 있습니다...",
    "문장을 정교하게 다듬고 리포트를 생성 중입니다...",
    "거의 다 되었습니다! 마지막 데이터 검증 중...",
];

/// How often the animation advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// After this long, a long-wait notice is shown.
pub const LONG_WAIT: Duration = Duration::from_secs(15);

pub const LONG_WAIT_NOTICE: &str =
    "분석이 평소보다 오래 걸리고 있습니다. 조금만 더 기다려 주세요.";

#[derive(Debug, Clone, Default)]
pub struct LoadingProgress {
    percent: f32,
}

impl LoadingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Advance one tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.percent < 85.0 {
            self.percent += rng.gen_range(0.0..2.0);
        } else if self.percent < 98.0 {
            self.percent += 0.1;
        }
    }

    /// Index into [`LOADING_STAGES`] for the current percentage.
    pub fn stage_index(&self) -> usize {
        let idx = (self.percent / 100.0 * LOADING_STAGES.len() as f32) as usize;
        idx.min(LOADING_STAGES.len() - 1)
    }

    pub fn message(&self) -> &'static str {
        LOADING_STAGES[self.stage_index()]
    }
}
