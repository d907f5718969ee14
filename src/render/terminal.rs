//! Terminal presentation of every session step.
//!
//! Rendering only reads state. Colors come from the derived `BaseColor`
//! (report) or the stage accent (diagnosis).

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::catalog::AgeGroup;
use crate::color::BaseColor;
use crate::diagnosis::DiagnosisFlow;
use crate::report::{ReportData, ReportFailure};
use crate::session::UserProfile;

use super::loading::{LONG_WAIT_NOTICE, LoadingProgress};
use super::markup;

const BAR_WIDTH: usize = 20;
const MUTED: (u8, u8, u8) = (0x94, 0xa3, 0xb8);
const ACCENT: (u8, u8, u8) = (0x4f, 0x46, 0xe5);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

fn colored<W: Write>(out: &mut W, color: (u8, u8, u8), text: &str) -> io::Result<()> {
    queue!(out, SetForegroundColor(rgb(color)), Print(text), ResetColor)
}

fn bold<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset)
    )
}

/// Print free text, turning `**` pairs into bold runs.
fn rich<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    for span in markup::spans(text) {
        if span.bold {
            bold(out, span.text)?;
        } else {
            queue!(out, Print(span.text))?;
        }
    }
    Ok(())
}

fn heading<W: Write>(out: &mut W, color: (u8, u8, u8), text: &str) -> io::Result<()> {
    queue!(
        out,
        Print("\n"),
        SetForegroundColor(rgb(color)),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\n")
    )
}

/// A fixed-width bar for a 0..=1 ratio.
pub fn bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    heading(out, ACCENT, "ColorHeart Can")?;
    queue!(
        out,
        Print("당신의 진로를 색칠해볼까요?\n"),
        Print("이름과 해당하는 연령대를 선택하면 맞춤형 분석이 시작됩니다.\n")
    )?;
    colored(out, MUTED, "진단에는 약 3~5분이 소요됩니다. (/reset 처음으로, /quit 종료)\n")?;
    out.flush()
}

pub fn render_age_groups<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Print("\n"))?;
    for (i, group) in AgeGroup::ALL.iter().enumerate() {
        queue!(out, Print(format!("  {}. ", i + 1)))?;
        bold(out, group.title())?;
        queue!(out, Print(" - "))?;
        colored(out, MUTED, group.description())?;
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

pub fn render_question<W: Write>(out: &mut W, flow: &DiagnosisFlow) -> io::Result<()> {
    let (Some(question), Some(progress)) = (flow.current_question(), flow.progress()) else {
        return Ok(());
    };

    heading(out, progress.accent(), progress.title())?;
    colored(
        out,
        progress.accent(),
        &bar(f64::from(progress.stage_percent) / 100.0, BAR_WIDTH),
    )?;
    colored(out, MUTED, &format!("  {} / {}\n\n", progress.position, progress.total))?;

    bold(out, question.text)?;
    queue!(out, Print("\n"))?;

    for (i, option) in question.options.iter().enumerate() {
        queue!(out, Print(format!("  {}. ", i + 1)))?;
        match BaseColor::from_label(option).filter(|_| question.is_psych()) {
            Some(color) => colored(out, color.rgb(), &format!("● {option}"))?,
            None => queue!(out, Print(option))?,
        }
        queue!(out, Print("\n"))?;
    }

    let hint = if progress.position > 1 {
        format!("{} Analysis · 번호 또는 답을 입력하세요 (b: 이전)\n", question.theory)
    } else {
        format!("{} Analysis · 번호 또는 답을 입력하세요\n", question.theory)
    };
    colored(out, MUTED, &hint)?;
    out.flush()
}

/// A short muted line, used for validation messages and hints.
pub fn render_notice<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    colored(out, MUTED, text)?;
    queue!(out, Print("\n"))?;
    out.flush()
}

/// One in-place progress line.
pub fn render_loading<W: Write>(
    out: &mut W,
    progress: &LoadingProgress,
    long_wait: bool,
) -> io::Result<()> {
    queue!(out, Print("\r"))?;
    colored(out, ACCENT, &bar(f64::from(progress.percent()) / 100.0, BAR_WIDTH))?;
    queue!(
        out,
        Print(format!(" {:>3.0}% {}", progress.percent(), progress.message())),
        crossterm::terminal::Clear(crossterm::terminal::ClearType::UntilNewLine)
    )?;
    if long_wait {
        queue!(out, Print("\n"))?;
        colored(out, MUTED, LONG_WAIT_NOTICE)?;
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

pub fn render_failure<W: Write>(out: &mut W, failure: &ReportFailure) -> io::Result<()> {
    heading(out, (0xef, 0x44, 0x44), "리포트를 생성하지 못했습니다")?;
    queue!(out, Print("일시적인 문제로 분석이 완료되지 않았습니다. 다시 시도해 주세요.\n"))?;
    colored(out, MUTED, &format!("({})\n", failure.kind))?;
    queue!(out, Print("\n  r. 다시 시도   /reset 처음으로   /quit 종료\n"))?;
    out.flush()
}

pub fn render_report<W: Write>(
    out: &mut W,
    profile: &UserProfile,
    report: &ReportData,
) -> io::Result<()> {
    let color = profile.selected_color.unwrap_or(BaseColor::DEFAULT);
    let theme = color.rgb();

    heading(out, theme, &format!("{}님의 진로 분석 리포트", profile.name))?;
    bold(out, &report.persona)?;
    colored(out, MUTED, &format!("  #{}\n", report.keyword))?;
    colored(out, theme, &format!("● {} ", color.label()))?;
    colored(out, MUTED, &format!("{}\n\n", color.description()))?;
    rich(out, &report.summary)?;
    queue!(out, Print("\n"))?;

    heading(out, theme, "역량 분석")?;
    let label_width = report
        .chart_data
        .iter()
        .map(|p| p.subject.chars().count())
        .max()
        .unwrap_or(0);
    for point in &report.chart_data {
        let pad = label_width - point.subject.chars().count();
        queue!(out, Print(format!("  {}{} ", point.subject, " ".repeat(pad))))?;
        colored(out, theme, &bar(point.ratio(), BAR_WIDTH))?;
        queue!(out, Print(format!(" {}/{}\n", point.value, point.full_mark)))?;
    }
    rich(out, &report.career_factor_interpretation)?;
    queue!(out, Print("\n"))?;

    let energy = &report.energy_balance;
    heading(out, theme, &format!("에너지 밸런스 · {}", energy.status))?;
    for (label, score) in [
        ("역량 적합도", energy.theory_score),
        ("심리 에너지", energy.psych_energy),
    ] {
        queue!(out, Print(format!("  {label} ")))?;
        colored(out, theme, &bar(score / 100.0, BAR_WIDTH))?;
        queue!(out, Print(format!(" {score:.0}\n")))?;
    }
    rich(out, &energy.interpretation)?;
    queue!(out, Print("\n"))?;

    heading(out, theme, "SWOT")?;
    for (label, items) in [
        ("Strengths", &report.swot.strengths),
        ("Weaknesses", &report.swot.weaknesses),
        ("Opportunities", &report.swot.opportunities),
        ("Threats", &report.swot.threats),
    ] {
        bold(out, &format!("  {label}\n"))?;
        for item in items {
            queue!(out, Print("    - "))?;
            rich(out, item)?;
            queue!(out, Print("\n"))?;
        }
    }

    let plan = &report.action_plan;
    heading(out, ACCENT, "Strategic Action Plan")?;
    for (i, career) in plan.careers.iter().enumerate() {
        bold(out, &format!("  {}. {}\n", i + 1, career.title))?;
        colored(out, MUTED, &format!("     {}\n", career.reason))?;
    }
    queue!(out, Print("\n  컬러 테라피: "))?;
    bold(out, &plan.color_therapy)?;
    queue!(out, Print(format!("\n     {}\n", plan.color_therapy_reason)))?;
    queue!(out, Print("  향기 테라피: "))?;
    bold(out, &plan.scent_therapy)?;
    queue!(out, Print("\n\n  지금 바로 실천하기: "))?;
    rich(out, &plan.immediate_action)?;
    queue!(out, Print("\n"))?;

    queue!(out, Print("\n  p. PDF/인쇄용 저장   /reset 처음으로   /quit 종료\n"))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::tests::sample_report;

    fn render_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(2.0, 3), "███");
        assert_eq!(bar(-1.0, 2), "░░");
    }

    #[test]
    fn age_groups_are_numbered_with_ascii_separator() {
        let text = render_to_string(render_age_groups);
        assert!(text.contains("  2. "));
        assert!(text.contains("커리어 패스 (고등·대학)"));
        assert_eq!(text.matches(" - ").count(), 3);
        assert!(!text.contains('\u{2014}'));
    }

    #[test]
    fn question_shows_stage_options_and_theory() {
        let flow = DiagnosisFlow::new(AgeGroup::DreamTree);
        let text = render_to_string(|out| render_question(out, &flow));
        assert!(text.contains("Stage 1: 무의식의 탐색"));
        assert!(text.contains("1 / 20"));
        assert!(text.contains("학교 가는 길"));
        assert!(text.contains("● 빨강"));
        assert!(text.contains("정서지능 Analysis"));
        assert!(!text.contains("b: 이전"));
    }

    #[test]
    fn report_renders_all_sections_without_markers() {
        let profile = UserProfile {
            name: "서연".to_string(),
            age_group: AgeGroup::CareerPath,
            selected_color: Some(BaseColor::Green),
        };
        let report = sample_report();
        let text = render_to_string(|out| render_report(out, &profile, &report));

        assert!(text.contains("서연님의 진로 분석 리포트"));
        assert!(text.contains("전략적 아이디어 뱅크"));
        assert!(text.contains("● 초록"));
        assert!(text.contains("분석력"));
        assert!(!text.contains("**"));
        assert!(text.contains("Threats"));
        assert!(text.contains("1. 데이터 과학자"));
        assert!(text.contains("라벤더"));
    }

    #[test]
    fn failure_offers_retry() {
        let failure = ReportFailure {
            kind: "timeout",
            message: "timed out".to_string(),
        };
        let text = render_to_string(|out| render_failure(out, &failure));
        assert!(text.contains("r. 다시 시도"));
        assert!(text.contains("timeout"));
    }
}
