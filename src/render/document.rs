//! Print-ready HTML rendering of a report.
//!
//! The document is self-contained (inline CSS, no scripts) and laid out for
//! A4 printing, so the host's print dialog can save it as PDF.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::color::BaseColor;
use crate::report::ReportData;
use crate::session::UserProfile;

use super::markup;

const STYLE: &str = r#"
@page { size: A4; margin: 16mm; }
* { box-sizing: border-box; }
body { font-family: "Pretendard", "Apple SD Gothic Neo", "Noto Sans KR", sans-serif; color: #0f172a; margin: 0; line-height: 1.6; }
header { display: flex; justify-content: space-between; align-items: center; border-bottom: 2px solid #f1f5f9; padding-bottom: 12px; margin-bottom: 24px; }
header .brand { font-weight: 900; color: #4f46e5; }
header .meta { color: #64748b; font-size: 12px; }
section { page-break-inside: avoid; break-inside: avoid; margin-bottom: 28px; }
h1 { font-size: 28px; margin: 0 0 4px; }
h2 { font-size: 18px; margin: 0 0 12px; color: var(--theme); }
.keyword { color: #64748b; font-weight: 700; }
.badge { display: inline-block; padding: 2px 10px; border-radius: 999px; color: #fff; background: var(--theme); font-weight: 700; font-size: 12px; }
.bar { background: #e2e8f0; border-radius: 4px; height: 10px; width: 100%; }
.bar > span { display: block; height: 10px; border-radius: 4px; background: var(--theme); }
table.chart { width: 100%; border-collapse: collapse; }
table.chart td { padding: 4px 8px; vertical-align: middle; }
table.chart td.subject { width: 25%; font-weight: 700; }
table.chart td.value { width: 15%; text-align: right; color: #64748b; }
.swot { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
.swot div { border: 1px solid #e2e8f0; border-radius: 12px; padding: 12px; }
.careers li { margin-bottom: 8px; }
.immediate { font-size: 20px; font-weight: 900; font-style: italic; text-align: center; padding: 20px; border: 1px solid #fed7aa; background: #fff7ed; border-radius: 16px; }
footer { text-align: center; color: #94a3b8; font-size: 10px; letter-spacing: 0.2em; padding-top: 24px; }
"#;

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escaped text with `**` pairs turned into `<strong>`.
fn rich(text: &str) -> String {
    markup::spans(text)
        .into_iter()
        .map(|span| {
            if span.bold {
                format!("<strong>{}</strong>", escape(span.text))
            } else {
                escape(span.text)
            }
        })
        .collect()
}

fn gauge(ratio: f64) -> String {
    format!(
        r#"<div class="bar"><span style="width: {:.0}%"></span></div>"#,
        ratio.clamp(0.0, 1.0) * 100.0
    )
}

fn list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", rich(item)))
        .collect()
}

/// Render the full printable document.
pub fn render_document(
    title: &str,
    profile: &UserProfile,
    report: &ReportData,
    date: NaiveDate,
) -> String {
    let color = profile.selected_color.unwrap_or(BaseColor::DEFAULT);
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>:root {{ --theme: {theme}; }}{STYLE}</style>
</head>
<body>
<header><span class="brand">ColorHeart Can</span><span class="meta">{name} · {date}</span></header>
"#,
        title = escape(title),
        theme = color.hex(),
        name = escape(&profile.name),
        date = date.format("%Y-%m-%d"),
    );

    let _ = write!(
        html,
        r#"<section>
<h1>{persona}</h1>
<p class="keyword">#{keyword}</p>
<p><span class="badge">{label}</span> {description}</p>
<p>{summary}</p>
</section>
"#,
        persona = escape(&report.persona),
        keyword = escape(&report.keyword),
        label = color.label(),
        description = color.description(),
        summary = rich(&report.summary),
    );

    let rows: String = report
        .chart_data
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td class="subject">{}</td><td>{}</td><td class="value">{}/{}</td></tr>"#,
                escape(&p.subject),
                gauge(p.ratio()),
                p.value,
                p.full_mark
            )
        })
        .collect();
    let _ = write!(
        html,
        r#"<section>
<h2>역량 분석</h2>
<table class="chart">{rows}</table>
<p>{interpretation}</p>
</section>
"#,
        interpretation = rich(&report.career_factor_interpretation),
    );

    let energy = &report.energy_balance;
    let _ = write!(
        html,
        r#"<section>
<h2>에너지 밸런스 · {status}</h2>
<p>역량 적합도 {theory:.0}</p>{theory_gauge}
<p>심리 에너지 {psych:.0}</p>{psych_gauge}
<p>{interpretation}</p>
</section>
"#,
        status = escape(&energy.status),
        theory = energy.theory_score,
        theory_gauge = gauge(energy.theory_score / 100.0),
        psych = energy.psych_energy,
        psych_gauge = gauge(energy.psych_energy / 100.0),
        interpretation = rich(&energy.interpretation),
    );

    let swot = &report.swot;
    let _ = write!(
        html,
        r#"<section>
<h2>SWOT</h2>
<div class="swot">
<div><strong>Strengths</strong><ul>{}</ul></div>
<div><strong>Weaknesses</strong><ul>{}</ul></div>
<div><strong>Opportunities</strong><ul>{}</ul></div>
<div><strong>Threats</strong><ul>{}</ul></div>
</div>
</section>
"#,
        list(&swot.strengths),
        list(&swot.weaknesses),
        list(&swot.opportunities),
        list(&swot.threats),
    );

    let plan = &report.action_plan;
    let careers: String = plan
        .careers
        .iter()
        .map(|c| {
            format!(
                "<li><strong>{}</strong><br>{}</li>",
                escape(&c.title),
                escape(&c.reason)
            )
        })
        .collect();
    let _ = write!(
        html,
        r#"<section>
<h2>Strategic Action Plan</h2>
<ol class="careers">{careers}</ol>
<p><strong>컬러 테라피</strong> {color_therapy}<br>{color_reason}</p>
<p><strong>향기 테라피</strong> {scent}</p>
<p class="immediate">{immediate}</p>
</section>
<footer>COLORHEART CAN · AI CAREER REPORT</footer>
</body>
</html>
"#,
        color_therapy = escape(&plan.color_therapy),
        color_reason = escape(&plan.color_therapy_reason),
        scent = escape(&plan.scent_therapy),
        immediate = rich(&plan.immediate_action),
    );

    html
}
