use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Automatically detect whether to use colors
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            _ => anyhow::bail!("Invalid color mode: {s}. Expected one of: always, auto, never"),
        }
    }
}

impl ColorMode {
    /// Resolve color mode from CLI flag and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. CLI flag (`--color=always|auto|never`)
    /// 2. `NO_COLOR` environment variable
    /// 3. `TERM=dumb` environment variable
    /// 4. Default (Auto)
    #[must_use]
    pub fn resolve(cli_mode: Option<Self>) -> Self {
        if let Some(mode) = cli_mode {
            return mode;
        }
        if env::var_os("NO_COLOR").is_some() {
            return Self::Never;
        }
        if env::var("TERM").is_ok_and(|term| term == "dumb") {
            return Self::Never;
        }
        Self::Auto
    }

    /// Whether to emit ANSI colors on stderr, where all status output goes
    #[must_use]
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Auto => supports_color::on_cached(supports_color::Stream::Stderr).is_some(),
            Self::Never => false,
        }
    }

    /// Colorize a branch name in cyan
    #[must_use]
    pub fn colorize_branch(self, text: &str) -> String {
        if self.should_colorize() {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize an issue or PR reference (`#42`) in bold
    #[must_use]
    pub fn colorize_reference(self, text: &str) -> String {
        if self.should_colorize() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Kind of status line written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warn,
}

/// A status line: symbol plus message, colored when the mode allows
pub struct StatusLine<D> {
    status: Status,
    mode: ColorMode,
    message: D,
}

impl<D: fmt::Display> fmt::Display for StatusLine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (symbol, color) = match self.status {
            Status::Success => ("✓", AnsiColors::BrightGreen),
            Status::Info => ("ℹ", AnsiColors::BrightCyan),
            Status::Warn => ("⚠", AnsiColors::BrightYellow),
        };
        if self.mode.should_colorize() {
            write!(f, "{} {}", symbol.color(color).bold(), self.message)
        } else {
            write!(f, "{symbol} {}", self.message)
        }
    }
}

const fn status_line<D>(status: Status, mode: ColorMode, message: D) -> StatusLine<D> {
    StatusLine {
        status,
        mode,
        message,
    }
}

/// `✓ message`
pub const fn success<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Success, mode, message)
}

/// `ℹ message`
pub const fn info<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Info, mode, message)
}

/// `⚠ message`
pub const fn warn<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Warn, mode, message)
}

/// Secondary text such as previews and summaries
pub struct Dim<D> {
    mode: ColorMode,
    text: D,
}

impl<D: fmt::Display> fmt::Display for Dim<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode.should_colorize() {
            write!(f, "{}", self.text.to_string().dimmed())
        } else {
            write!(f, "{}", self.text)
        }
    }
}

pub const fn dim<D: fmt::Display>(mode: ColorMode, text: D) -> Dim<D> {
    Dim { mode, text }
}

/// Run `f` while showing a spinner on stderr (only when colors are enabled)
pub fn with_spinner<T>(mode: ColorMode, message: &str, f: impl FnOnce() -> T) -> T {
    if !mode.should_colorize() {
        return f();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}
