//! Print/export surface.
//!
//! The report is written as a print-ready HTML document and handed to the
//! host's default viewer, whose print dialog saves it as PDF. While the
//! export runs, the terminal title carries the export title and is restored
//! afterwards, including on error.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::render::render_document;
use crate::report::ReportData;
use crate::session::UserProfile;

/// Title shown by the terminal outside of an export.
pub const APP_TITLE: &str = "ColorHeart Can";

/// `ColorHeart_진로분석_<name>_<YYYYMMDD>`
pub fn export_title(name: &str, date: NaiveDate) -> String {
    format!("ColorHeart_진로분석_{}_{}", name, date.format("%Y%m%d"))
}

/// File name for a title, with path separators and reserved characters
/// replaced.
fn file_name(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{safe}.html")
}

/// What the host can do with a print document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostEnvironment {
    /// Connected over SSH; a viewer would open on the remote machine.
    pub remote: bool,
    /// `TERM=dumb`.
    pub dumb_terminal: bool,
    /// Linux without X11 or Wayland.
    pub headless: bool,
}

impl HostEnvironment {
    pub fn detect() -> Self {
        Self::from_lookup(std::env::consts::OS, |key| std::env::var(key).ok())
    }

    /// Detect from an injected variable lookup.
    pub fn from_lookup<F>(os: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Self {
            remote: set("SSH_CONNECTION") || set("SSH_TTY"),
            dumb_terminal: lookup("TERM").as_deref() == Some("dumb"),
            headless: os == "linux" && !set("DISPLAY") && !set("WAYLAND_DISPLAY"),
        }
    }

    /// Why the viewer cannot be launched, if it cannot.
    pub fn restriction(&self) -> Option<&'static str> {
        if self.remote {
            Some("원격(SSH) 세션에서는 인쇄 창을 열 수 없습니다.")
        } else if self.dumb_terminal {
            Some("현재 터미널에서는 인쇄 창을 열 수 없습니다.")
        } else if self.headless {
            Some("그래픽 환경이 없어 인쇄 창을 열 수 없습니다.")
        } else {
            None
        }
    }
}

/// Opens a written document in the host's default viewer.
pub type Launcher = fn(&Path) -> io::Result<()>;

/// Hand the file to the desktop's default handler without waiting on it.
fn open_in_viewer(path: &Path) -> io::Result<()> {
    open::that_detached(path)
}

/// Where the window/terminal title goes.
pub trait TitleSink {
    fn set_title(&mut self, title: &str) -> io::Result<()>;
}

/// Title sink backed by the terminal's OSC title sequence.
pub struct TerminalTitle<W: Write> {
    out: W,
}

impl<W: Write> TerminalTitle<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TitleSink for TerminalTitle<W> {
    fn set_title(&mut self, title: &str) -> io::Result<()> {
        // ESC or BEL would terminate the OSC sequence early.
        let title: String = title
            .chars()
            .map(|c| if c.is_control() { '_' } else { c })
            .collect();
        execute!(self.out, SetTitle(title))
    }
}

/// Restores the previous title when dropped.
struct TitleGuard<'a, S: TitleSink> {
    sink: &'a mut S,
    restore: &'a str,
}

impl<'a, S: TitleSink> TitleGuard<'a, S> {
    fn set(sink: &'a mut S, title: &str, restore: &'a str) -> Result<Self, ExportError> {
        sink.set_title(title)?;
        Ok(Self { sink, restore })
    }
}

impl<S: TitleSink> Drop for TitleGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.sink.set_title(self.restore) {
            warn!("Failed to restore terminal title: {}", e);
        }
    }
}

/// Result of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub title: String,
    pub path: PathBuf,
    /// The viewer was launched.
    pub opened: bool,
    /// Shown to the user when the viewer was not launched.
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
    host: HostEnvironment,
    launcher: Launcher,
    app_title: String,
}

impl Exporter {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            host: HostEnvironment::detect(),
            launcher: open_in_viewer,
            app_title: APP_TITLE.to_string(),
        }
    }

    pub fn with_host(mut self, host: HostEnvironment) -> Self {
        self.host = host;
        self
    }

    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the print document and open it where the host allows.
    ///
    /// A viewer launch failure is not an error: the document is already on
    /// disk and the outcome carries a warning instead.
    pub async fn export<S: TitleSink>(
        &self,
        sink: &mut S,
        profile: &UserProfile,
        report: &ReportData,
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let title = export_title(&profile.name, date);
        let _guard = TitleGuard::set(sink, &title, &self.app_title)?;

        let path = self.dir.join(file_name(&title));
        let html = render_document(&title, profile, report, date);
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        let (opened, warning) = match self.host.restriction() {
            Some(reason) => (
                false,
                Some(format!(
                    "{reason} 저장된 파일을 브라우저에서 열어 인쇄해 주세요: {}",
                    path.display()
                )),
            ),
            None => match (self.launcher)(&path).map_err(ExportError::Launch) {
                Ok(()) => (true, None),
                Err(e) => {
                    warn!(path = %path.display(), "{}", e);
                    (
                        false,
                        Some(format!(
                            "인쇄 창을 열지 못했습니다. 저장된 파일을 직접 열어 주세요: {}",
                            path.display()
                        )),
                    )
                }
            },
        };

        info!(path = %path.display(), opened, "Report exported");
        Ok(ExportOutcome {
            title,
            path,
            opened,
            warning,
        })
    }
}
