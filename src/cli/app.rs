//! Interactive line-oriented session loop.
//!
//! Reads one line at a time, routes it to the session controller and
//! redraws the current step. While a report request is in flight, input is
//! not read; Ctrl-C cancels the request and resets the session. On any other
//! screen Ctrl-C quits like `/quit`.

use std::io::Write;
use std::time::Instant;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::catalog::AgeGroup;
use crate::error::{DiagnosisError, Error, SessionError};
use crate::export::{APP_TITLE, Exporter, TitleSink};
use crate::render::terminal::{
    render_age_groups, render_banner, render_failure, render_loading, render_notice,
    render_question, render_report,
};
use crate::render::{LONG_WAIT, LoadingProgress, TICK_INTERVAL};
use crate::report::{ReportRequest, ReportService, ReportState};
use crate::session::{AnswerOutcome, Session, Step};

/// What is on screen, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    AskName,
    AskGroup,
    Question,
    Loading,
    Report,
    Failure,
}

/// User-facing text for a rejected input.
fn describe(err: &SessionError) -> &'static str {
    match err {
        SessionError::EmptyName => "이름을 입력해 주세요.",
        SessionError::UnknownAgeGroup(_) => "1, 2, 3 중 하나를 선택해 주세요.",
        SessionError::WrongStep { .. } => "지금은 사용할 수 없는 명령입니다.",
        SessionError::Diagnosis(DiagnosisError::InvalidAnswer { .. }) => {
            "보기 번호 또는 보기 내용을 그대로 입력해 주세요."
        }
        SessionError::Diagnosis(DiagnosisError::BackUnavailable) => {
            "진단이 끝난 뒤에는 이전 질문으로 돌아갈 수 없습니다."
        }
        SessionError::Diagnosis(DiagnosisError::AlreadyCompleted) => "진단이 이미 완료되었습니다.",
    }
}

/// Forward every Ctrl-C to the session loop until it stops listening.
async fn forward_ctrl_c(tx: UnboundedSender<()>) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            return;
        }
        if tx.send(()).is_err() {
            return;
        }
    }
}

pub struct App<R, W, T> {
    lines: Lines<R>,
    interrupts: UnboundedReceiver<()>,
    /// Installed as the process Ctrl-C listener when `run` starts.
    ctrl_c: Option<UnboundedSender<()>>,
    out: W,
    titles: T,
    session: Session,
    service: ReportService,
    exporter: Exporter,
    /// Name typed at Entry, waiting for the age group.
    pending_name: Option<String>,
    /// Age group given on the command line; used once.
    prefill_group: Option<AgeGroup>,
}

impl<R, W, T> App<R, W, T>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: TitleSink,
{
    pub fn new(input: R, out: W, titles: T, service: ReportService, exporter: Exporter) -> Self {
        let (tx, interrupts) = mpsc::unbounded_channel();
        Self {
            lines: input.lines(),
            interrupts,
            ctrl_c: Some(tx),
            out,
            titles,
            session: Session::new(),
            service,
            exporter,
            pending_name: None,
            prefill_group: None,
        }
    }

    /// Pre-fill the Entry step for the first session only.
    pub fn with_prefill(mut self, name: Option<String>, group: Option<AgeGroup>) -> Self {
        self.pending_name = name;
        self.prefill_group = group;
        self
    }

    /// Take interrupts from `interrupts` instead of the process Ctrl-C signal.
    pub fn with_interrupts(mut self, interrupts: UnboundedReceiver<()>) -> Self {
        self.interrupts = interrupts;
        self.ctrl_c = None;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn titles(&self) -> &T {
        &self.titles
    }

    fn screen(&self) -> Screen {
        match self.session.step() {
            Step::Entry if self.pending_name.is_none() => Screen::AskName,
            Step::Entry => Screen::AskGroup,
            Step::Diagnosis(_) => Screen::Question,
            Step::Report { state, .. } => match state {
                ReportState::Loading => Screen::Loading,
                ReportState::Success(_) => Screen::Report,
                ReportState::Failure(_) => Screen::Failure,
            },
        }
    }

    /// Run until `/quit`, Ctrl-C outside of loading, or end of input.
    pub async fn run(&mut self) -> Result<(), Error> {
        if let Some(tx) = self.ctrl_c.take() {
            tokio::spawn(forward_ctrl_c(tx));
        }
        self.titles.set_title(APP_TITLE)?;
        render_banner(&mut self.out)?;

        if self.pending_name.is_some() {
            if let Some(group) = self.prefill_group.take() {
                let name = self.pending_name.take().unwrap_or_default();
                self.start(&name, group)?;
            }
        }

        let mut redraw = true;
        loop {
            if redraw {
                self.draw()?;
            }
            write!(self.out, "> ")?;
            self.out.flush()?;

            let line = tokio::select! {
                line = self.lines.next_line() => line?,
                Some(()) = self.interrupts.recv() => {
                    writeln!(self.out)?;
                    writeln!(self.out, "안녕히 가세요.")?;
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };
            let input = line.trim();

            redraw = match input {
                "/quit" => {
                    writeln!(self.out, "안녕히 가세요.")?;
                    break;
                }
                "/reset" => {
                    self.reset();
                    render_notice(&mut self.out, "처음 화면으로 돌아갑니다.")?;
                    true
                }
                "" if self.screen() != Screen::AskName => false,
                _ => self.handle(input).await?,
            };
        }

        self.out.flush()?;
        Ok(())
    }

    fn reset(&mut self) {
        self.session.reset();
        self.pending_name = None;
        self.prefill_group = None;
    }

    fn draw(&mut self) -> Result<(), Error> {
        match self.screen() {
            Screen::AskName => render_notice(&mut self.out, "\n이름을 입력해 주세요.")?,
            Screen::AskGroup => {
                render_age_groups(&mut self.out)?;
                render_notice(&mut self.out, "연령대를 선택해 주세요 (1-3).")?;
            }
            Screen::Question => {
                if let Some(flow) = self.session.flow() {
                    render_question(&mut self.out, flow)?;
                }
            }
            Screen::Report => {
                if let (Some(profile), Some(report)) = (self.session.profile(), self.session.report())
                {
                    render_report(&mut self.out, profile, report)?;
                }
            }
            Screen::Failure => {
                if let Some(ReportState::Failure(failure)) = self.session.report_state() {
                    render_failure(&mut self.out, failure)?;
                }
            }
            Screen::Loading => {}
        }
        Ok(())
    }

    /// Handle one non-command line. Returns whether the screen changed.
    async fn handle(&mut self, input: &str) -> Result<bool, Error> {
        match self.screen() {
            Screen::AskName => self.take_name(input),
            Screen::AskGroup => self.take_group(input),
            Screen::Question => self.take_answer(input).await,
            Screen::Report => match input {
                "p" | "P" => self.export().await,
                _ => {
                    render_notice(&mut self.out, "p: PDF/인쇄용 저장, /reset: 처음으로, /quit: 종료")?;
                    Ok(false)
                }
            },
            Screen::Failure => match input {
                "r" | "R" => {
                    let request = self.session.retry()?;
                    self.run_report(request).await?;
                    Ok(true)
                }
                _ => {
                    render_notice(&mut self.out, "r: 다시 시도, /reset: 처음으로, /quit: 종료")?;
                    Ok(false)
                }
            },
            Screen::Loading => Ok(false),
        }
    }

    fn take_name(&mut self, input: &str) -> Result<bool, Error> {
        if input.is_empty() {
            render_notice(&mut self.out, describe(&SessionError::EmptyName))?;
            return Ok(false);
        }
        match self.prefill_group.take() {
            Some(group) => self.start(input, group),
            None => {
                self.pending_name = Some(input.to_string());
                Ok(true)
            }
        }
    }

    fn take_group(&mut self, input: &str) -> Result<bool, Error> {
        match input.parse::<AgeGroup>() {
            Ok(group) => {
                let name = self.pending_name.take().unwrap_or_default();
                self.start(&name, group)
            }
            Err(e) => {
                render_notice(&mut self.out, describe(&e))?;
                Ok(false)
            }
        }
    }

    fn start(&mut self, name: &str, group: AgeGroup) -> Result<bool, Error> {
        match self.session.start(name, group) {
            Ok(()) => Ok(true),
            Err(e) => {
                render_notice(&mut self.out, describe(&e))?;
                Ok(true)
            }
        }
    }

    async fn take_answer(&mut self, input: &str) -> Result<bool, Error> {
        if matches!(input, "b" | "B" | "back") {
            return match self.session.back() {
                Ok(_) => Ok(true),
                Err(e) => {
                    render_notice(&mut self.out, describe(&e))?;
                    Ok(false)
                }
            };
        }

        match self.session.answer(input) {
            Ok(AnswerOutcome::Next) => Ok(true),
            Ok(AnswerOutcome::ReportRequested(request)) => {
                self.run_report(request).await?;
                Ok(true)
            }
            Err(e) => {
                render_notice(&mut self.out, describe(&e))?;
                Ok(false)
            }
        }
    }

    /// Drive one request to completion while animating the loading line.
    async fn run_report(&mut self, request: ReportRequest) -> Result<(), Error> {
        let started = Instant::now();
        let mut progress = LoadingProgress::new();
        let mut rng = StdRng::from_entropy();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        let mut long_wait_shown = false;

        let outcome = {
            let pending = self.service.run(&request);
            tokio::pin!(pending);

            loop {
                tokio::select! {
                    biased;
                    state = &mut pending => break Some(state),
                    Some(()) = self.interrupts.recv() => break None,
                    _ = ticker.tick() => {
                        progress.tick(&mut rng);
                        let long_wait = !long_wait_shown && started.elapsed() >= LONG_WAIT;
                        long_wait_shown |= long_wait;
                        render_loading(&mut self.out, &progress, long_wait)?;
                    }
                }
            }
        };
        writeln!(self.out)?;

        match outcome {
            Some(state) => {
                info!(
                    generation = request.generation,
                    state = state.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Report request settled"
                );
                self.session.apply_report(request.generation, state);
            }
            None => {
                info!(generation = request.generation, "Report request cancelled");
                self.reset();
                render_notice(&mut self.out, "분석을 취소하고 처음 화면으로 돌아갑니다.")?;
            }
        }
        Ok(())
    }

    async fn export(&mut self) -> Result<bool, Error> {
        let (Some(profile), Some(report)) = (self.session.profile(), self.session.report()) else {
            render_notice(&mut self.out, "내보낼 리포트가 없습니다.")?;
            return Ok(false);
        };
        let date = Local::now().date_naive();

        match self
            .exporter
            .export(&mut self.titles, profile, report, date)
            .await
        {
            Ok(outcome) => {
                render_notice(
                    &mut self.out,
                    &format!("저장했습니다: {}", outcome.path.display()),
                )?;
                if let Some(warning) = outcome.warning {
                    render_notice(&mut self.out, &warning)?;
                }
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                render_notice(&mut self.out, &format!("리포트를 저장하지 못했습니다: {e}"))?;
            }
        }
        Ok(false)
    }
}
