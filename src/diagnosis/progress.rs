//! Stage progress for display. Has no effect on the flow itself.

use crate::catalog::STAGE_SIZE;

const STAGE_TITLES: [&str; 4] = [
    "Stage 1: 무의식의 탐색",
    "Stage 2: 가능성의 발견",
    "Stage 3: 현실의 조율",
    "Stage 4: 미래의 설계",
];

const STAGE_COLORS: [(u8, u8, u8); 4] = [
    (0xef, 0x44, 0x44),
    (0x3b, 0x82, 0xf6),
    (0xea, 0xb3, 0x08),
    (0x22, 0xc5, 0x5e),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress {
    /// Zero-based stage index.
    pub stage: usize,
    /// One-based position within the whole list.
    pub position: usize,
    pub total: usize,
    /// Percentage through the current stage, in steps of 100 / STAGE_SIZE.
    pub stage_percent: u8,
}

impl StageProgress {
    pub fn new(index: usize, total: usize) -> Self {
        let within = index % STAGE_SIZE + 1;
        Self {
            stage: index / STAGE_SIZE,
            position: index + 1,
            total,
            stage_percent: (within * 100 / STAGE_SIZE) as u8,
        }
    }

    pub fn title(&self) -> &'static str {
        STAGE_TITLES[self.stage.min(STAGE_TITLES.len() - 1)]
    }

    pub fn accent(&self) -> (u8, u8, u8) {
        STAGE_COLORS[self.stage.min(STAGE_COLORS.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_question() {
        let p = StageProgress::new(0, 20);
        assert_eq!(p.stage, 0);
        assert_eq!(p.position, 1);
        assert_eq!(p.stage_percent, 20);
        assert_eq!(p.title(), "Stage 1: 무의식의 탐색");
    }

    #[test]
    fn end_of_stage_is_full() {
        let p = StageProgress::new(9, 20);
        assert_eq!(p.stage, 1);
        assert_eq!(p.stage_percent, 100);
        assert_eq!(p.accent(), (0x3b, 0x82, 0xf6));
    }

    #[test]
    fn last_question() {
        let p = StageProgress::new(19, 20);
        assert_eq!(p.title(), "Stage 4: 미래의 설계");
        assert_eq!(p.position, 20);
    }

    #[test]
    fn stage_beyond_table_clamps() {
        assert_eq!(StageProgress::new(27, 30).title(), "Stage 4: 미래의 설계");
    }
}
