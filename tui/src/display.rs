//! Display State Types
//!
//! Surface-side state derived from [`QuoteMessage`]s. The machine owns the
//! quote and its fade; the display only adds what a terminal needs on top:
//! a smooth accent crossfade and a transient status line.

use std::time::Duration;

use ratatui::style::Color;

use quotes_core::{AccentColor, QuoteMessage, RequestOutcome, ShareLink};

use crate::theme;

/// How long the background takes to shift to a new accent
pub const ACCENT_FADE: Duration = Duration::from_secs(1);

/// How long a status message stays up
pub const STATUS_TTL: Duration = Duration::from_secs(6);

/// Severity of a status line message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// A transient status line message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    /// Time left on screen
    pub remaining: Duration,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
            remaining: STATUS_TTL,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
            remaining: STATUS_TTL,
        }
    }
}

/// Background crossfade between two accents
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccentFade {
    from: AccentColor,
    to: AccentColor,
    elapsed: Duration,
}

impl AccentFade {
    /// A settled background showing `color`
    pub fn settled(color: AccentColor) -> Self {
        Self {
            from: color,
            to: color,
            elapsed: ACCENT_FADE,
        }
    }

    /// Start shifting toward `to` from whatever is on screen now
    pub fn retarget(&mut self, to: AccentColor) {
        self.from = self.current_rgb();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    pub fn update(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(ACCENT_FADE);
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= ACCENT_FADE
    }

    /// Target accent
    pub fn target(&self) -> AccentColor {
        self.to
    }

    fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / ACCENT_FADE.as_secs_f32()).min(1.0)
    }

    fn current_rgb(&self) -> AccentColor {
        match self.color() {
            Color::Rgb(r, g, b) => AccentColor::rgb(r, g, b),
            _ => self.to,
        }
    }

    /// Color to paint right now
    pub fn color(&self) -> Color {
        let eased = quotes_core::Easing::EaseInOut.apply(self.progress());
        theme::blend(theme::accent(self.from), theme::accent(self.to), eased)
    }
}

/// Everything the renderer needs beyond the machine's [`QuoteView`](quotes_core::QuoteView)
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub background: AccentFade,
    pub status: Option<StatusMessage>,
    /// Most recent share link, kept after the status line clears
    pub last_share: Option<ShareLink>,
}

impl DisplayState {
    pub fn new(accent: AccentColor) -> Self {
        Self {
            background: AccentFade::settled(accent),
            status: None,
            last_share: None,
        }
    }

    /// Apply a machine message
    pub fn apply_message(&mut self, msg: &QuoteMessage) {
        match msg {
            QuoteMessage::Picked { accent, .. } => {
                self.background.retarget(*accent);
            }
            QuoteMessage::Requested(RequestOutcome::Ignored(_)) => {
                self.set_status(StatusMessage::info("Hang on, a new quote is on its way"));
            }
            QuoteMessage::Requested(_) => {}
            QuoteMessage::Share(link) => {
                self.set_status(StatusMessage::info(format!(
                    "Shared on {}: {}",
                    link.target, link.url
                )));
                self.last_share = Some(link.clone());
            }
        }
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Update timers, clearing an expired status
    pub fn update(&mut self, delta: Duration) {
        self.background.update(delta);

        if let Some(ref mut status) = self.status {
            status.remaining = status.remaining.saturating_sub(delta);
            if status.remaining.is_zero() {
                self.status = None;
            }
        }
    }
}
