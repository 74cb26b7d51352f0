//! Quote Machine - The Mounted Widget State
//!
//! [`QuoteMachine`] is the single owned state object of the widget. It is
//! created on mount from immutable configuration (catalog, palette, timings)
//! and dropped on unmount. Surfaces feed it [`QuoteEvent`]s and render the
//! [`QuoteView`] snapshot it produces.
//!
//! # Flow
//!
//! ```text
//! Surface                         QuoteMachine
//!   │  NewQuoteRequested ──────→  phase = Hidden, schedule pick
//!   │  Tick(delta) ────────────→  advance timer ...
//!   │  Tick(delta) ────────────→  due: pick quote, roll accent, phase = Visible
//!   │  ShareRequested(target) ─→  ShareLink for the current quote
//!   │  ←──────────── QuoteView   text, author, accent, visible, opacity
//! ```
//!
//! All mutation happens on the caller's thread; nothing here blocks or sleeps.

use std::time::Duration;

use crate::config::QuotesConfig;
use crate::error::Result;
use crate::palette::{AccentColor, AccentPicker, Palette};
use crate::quote::{Catalog, Quote};
use crate::random::IndexSource;
use crate::selector::{Pick, SelectionState};
use crate::share::{ShareLink, ShareTarget};
use crate::transition::{
    opacity, Easing, RequestOutcome, RequestPolicy, Transition, TransitionId, TransitionPhase,
};

/// Events a surface sends to the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteEvent {
    /// User asked for another quote
    NewQuoteRequested,
    /// User asked to share the current quote
    ShareRequested(ShareTarget),
    /// Time has passed
    Tick(Duration),
}

/// What the machine reports back for an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuoteMessage {
    /// A request was scheduled, ignored, or restarted
    Requested(RequestOutcome),
    /// The deferred pick ran
    Picked {
        id: TransitionId,
        pick: Pick,
        accent: AccentColor,
    },
    /// A share link is ready to open
    Share(ShareLink),
}

/// Outbound observable state for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteView {
    pub text: String,
    pub author: String,
    pub background_color: AccentColor,
    /// Whether the text is in (or fading into) view
    pub visible: bool,
    pub phase: TransitionPhase,
    /// Time since the last phase change
    pub phase_elapsed: Duration,
    /// Eased text opacity, 0.0 to 1.0
    pub opacity: f32,
    /// A pick is scheduled and has not fired yet
    pub pending: bool,
}

/// Timing knobs for a machine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineSettings {
    pub fade_delay: Duration,
    pub fade_duration: Duration,
    pub easing: Easing,
    pub request_policy: RequestPolicy,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self::from(&QuotesConfig::default())
    }
}

impl From<&QuotesConfig> for MachineSettings {
    fn from(config: &QuotesConfig) -> Self {
        Self {
            fade_delay: config.fade_delay,
            fade_duration: config.fade_duration,
            easing: config.easing,
            request_policy: config.request_policy,
        }
    }
}

/// The mounted quote widget
#[derive(Debug)]
pub struct QuoteMachine<R> {
    selection: SelectionState,
    accent: AccentPicker,
    transition: Transition,
    settings: MachineSettings,
    rng: R,
    picks: u64,
}

impl<R: IndexSource> QuoteMachine<R> {
    /// Mount: random first quote, first palette accent, text visible
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidCatalog`](crate::QuoteError::InvalidCatalog)
    /// for an empty catalog.
    pub fn new(
        catalog: Catalog,
        palette: Palette,
        settings: MachineSettings,
        mut rng: R,
    ) -> Result<Self> {
        let selection = SelectionState::initialize(catalog, &mut rng)?;

        tracing::info!(
            quotes = selection.catalog().len(),
            colors = palette.len(),
            delay = ?settings.fade_delay,
            policy = %settings.request_policy,
            "Quote machine mounted"
        );

        Ok(Self {
            selection,
            accent: AccentPicker::new(palette),
            transition: Transition::new(settings.fade_delay, settings.request_policy),
            settings,
            rng,
            picks: 0,
        })
    }

    /// Mount using the timings and palette of a loaded configuration
    ///
    /// # Errors
    ///
    /// Same as [`QuoteMachine::new`].
    pub fn from_config(config: &QuotesConfig, catalog: Catalog, rng: R) -> Result<Self> {
        Self::new(catalog, config.palette.clone(), config.into(), rng)
    }

    /// Hide step of a quote request
    pub fn request_next(&mut self) -> RequestOutcome {
        let outcome = self.transition.begin();
        if let RequestOutcome::Ignored(id) = outcome {
            tracing::warn!(pending = id.value(), "New quote requested while a pick is pending");
        }
        outcome
    }

    /// Advance time; runs the deferred pick once it is due
    ///
    /// # Errors
    ///
    /// Propagates a pick failure, which only an empty catalog can cause.
    pub fn update(&mut self, delta: Duration) -> Result<Option<QuoteMessage>> {
        let Some(id) = self.transition.advance(delta) else {
            return Ok(None);
        };

        let pick = self.selection.pick_next(&mut self.rng)?;
        let accent = self.accent.pick_next(&mut self.rng);
        self.transition.complete();
        self.picks += 1;

        debug_assert!(self.selection.is_consistent());

        tracing::debug!(
            id = id.value(),
            quote = pick.current,
            accent = %accent,
            "Showing new quote"
        );

        Ok(Some(QuoteMessage::Picked { id, pick, accent }))
    }

    /// Drop an in-flight pick and show the current quote again
    pub fn cancel_pending(&mut self) -> Option<TransitionId> {
        let cancelled = self.transition.cancel();
        if let Some(id) = cancelled {
            tracing::debug!(id = id.value(), "Pending pick cancelled");
        }
        cancelled
    }

    /// Share link for the quote on display
    #[must_use]
    pub fn share_link(&self, target: ShareTarget) -> ShareLink {
        ShareLink::new(target, self.selection.current())
    }

    /// Dispatch a surface event
    ///
    /// # Errors
    ///
    /// Propagates errors from [`QuoteMachine::update`].
    pub fn handle_event(&mut self, event: QuoteEvent) -> Result<Option<QuoteMessage>> {
        match event {
            QuoteEvent::NewQuoteRequested => {
                Ok(Some(QuoteMessage::Requested(self.request_next())))
            }
            QuoteEvent::ShareRequested(target) => {
                let link = self.share_link(target);
                tracing::info!(share = %target, "Share requested");
                Ok(Some(QuoteMessage::Share(link)))
            }
            QuoteEvent::Tick(delta) => self.update(delta),
        }
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn view(&self) -> QuoteView {
        let quote = self.selection.current();
        let phase = self.transition.phase();
        let phase_elapsed = self.transition.phase_elapsed();
        // The fade out has to finish before the pick swaps the text
        let fade = match phase {
            TransitionPhase::Hidden => self.settings.fade_duration.min(self.settings.fade_delay),
            TransitionPhase::Visible => self.settings.fade_duration,
        };
        QuoteView {
            text: quote.text.clone(),
            author: quote.author.clone(),
            background_color: self.accent.current(),
            visible: phase == TransitionPhase::Visible,
            phase,
            phase_elapsed,
            opacity: opacity(phase, phase_elapsed, fade, self.settings.easing),
            pending: self.transition.is_pending(),
        }
    }

    /// The quote on display
    #[must_use]
    pub fn current(&self) -> &Quote {
        self.selection.current()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn accent(&self) -> AccentColor {
        self.accent.current()
    }

    #[must_use]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    #[must_use]
    pub fn settings(&self) -> &MachineSettings {
        &self.settings
    }

    /// Number of completed picks since mount
    #[must_use]
    pub fn picks(&self) -> u64 {
        self.picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(500);

    fn abc() -> Catalog {
        Catalog::new(vec![
            Quote::new("A", "alpha"),
            Quote::new("B", "beta"),
            Quote::new("C", "gamma"),
        ])
        .unwrap()
    }

    fn machine(draws: Vec<usize>, policy: RequestPolicy) -> QuoteMachine<ScriptedSource> {
        let settings = MachineSettings {
            request_policy: policy,
            ..MachineSettings::default()
        };
        QuoteMachine::new(abc(), Palette::builtin(), settings, ScriptedSource::new(draws)).unwrap()
    }

    #[test]
    fn test_mount_view() {
        let m = machine(vec![0], RequestPolicy::Ignore);
        let view = m.view();
        assert_eq!(view.text, "A");
        assert_eq!(view.author, "alpha");
        assert_eq!(view.background_color.to_string(), "#ffadad");
        assert!(view.visible);
        assert!(!view.pending);
        assert!((view.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hide_is_observable_before_pick() {
        // initial A; pick draw 0 -> B; accent draw 2
        let mut m = machine(vec![0, 0, 2], RequestPolicy::Ignore);

        assert!(matches!(m.request_next(), RequestOutcome::Scheduled(_)));
        let view = m.view();
        assert!(!view.visible);
        assert!(view.pending);
        assert_eq!(view.text, "A");

        assert_eq!(m.update(DELAY / 2).unwrap(), None);
        assert_eq!(m.view().text, "A");

        let msg = m.update(DELAY / 2).unwrap();
        assert!(matches!(msg, Some(QuoteMessage::Picked { .. })));
        let view = m.view();
        assert!(view.visible);
        assert!(!view.pending);
        assert_eq!(view.text, "B");
        assert_eq!(view.background_color.to_string(), "#fdffb6");
        assert!(view.opacity.abs() < f32::EPSILON);
        assert_eq!(m.picks(), 1);
    }

    #[test]
    fn test_short_delay_fades_out_fully_before_pick() {
        let settings = MachineSettings {
            fade_delay: Duration::from_millis(100),
            ..MachineSettings::default()
        };
        assert_eq!(settings.fade_duration, DELAY);
        let mut m =
            QuoteMachine::new(abc(), Palette::builtin(), settings, ScriptedSource::new(vec![0, 0, 1]))
                .unwrap();

        m.request_next();
        assert_eq!(m.update(Duration::from_millis(99)).unwrap(), None);
        assert!(m.view().opacity < 0.01, "opacity {}", m.view().opacity);
        assert_eq!(m.view().text, "A");

        assert!(m.update(Duration::from_millis(1)).unwrap().is_some());
        assert_eq!(m.view().text, "B");

        // fade in still uses the full fade duration
        m.update(DELAY / 2).unwrap();
        let opacity = m.view().opacity;
        assert!(opacity > 0.4 && opacity < 0.6, "opacity {opacity}");
    }

    #[test]
    fn test_ignore_policy_single_pick() {
        let mut m = machine(vec![0, 0, 1], RequestPolicy::Ignore);
        let first = m.request_next();
        m.update(DELAY / 2).unwrap();
        assert_eq!(m.request_next(), RequestOutcome::Ignored(first.pending_id()));

        assert!(m.update(DELAY / 2).unwrap().is_some());
        assert_eq!(m.update(DELAY).unwrap(), None);
        assert_eq!(m.picks(), 1);
    }

    #[test]
    fn test_restart_policy_delays_pick() {
        let mut m = machine(vec![0, 0, 1], RequestPolicy::Restart);
        m.request_next();
        m.update(DELAY / 2).unwrap();
        assert!(matches!(m.request_next(), RequestOutcome::Restarted { .. }));

        assert_eq!(m.update(DELAY / 2).unwrap(), None);
        assert!(m.update(DELAY / 2).unwrap().is_some());
        assert_eq!(m.picks(), 1);
    }

    #[test]
    fn test_cancel_pending() {
        let mut m = machine(vec![0], RequestPolicy::Ignore);
        let id = m.request_next().pending_id();
        assert_eq!(m.cancel_pending(), Some(id));
        assert!(m.view().visible);
        assert_eq!(m.update(DELAY * 2).unwrap(), None);
        assert_eq!(m.view().text, "A");
    }

    #[test]
    fn test_handle_events() {
        let mut m = machine(vec![1, 1, 3], RequestPolicy::Ignore);
        assert_eq!(m.current().text, "B");

        let msg = m
            .handle_event(QuoteEvent::ShareRequested(ShareTarget::Twitter))
            .unwrap();
        match msg {
            Some(QuoteMessage::Share(link)) => {
                assert_eq!(link.target, ShareTarget::Twitter);
                assert!(link.url.ends_with("text=%22B%22%20beta"));
            }
            other => panic!("unexpected message: {other:?}"),
        }

        let msg = m.handle_event(QuoteEvent::NewQuoteRequested).unwrap();
        assert!(matches!(
            msg,
            Some(QuoteMessage::Requested(RequestOutcome::Scheduled(_)))
        ));
        let msg = m.handle_event(QuoteEvent::Tick(DELAY)).unwrap();
        assert!(matches!(msg, Some(QuoteMessage::Picked { .. })));
        // pool [A, C], draw 1 -> C
        assert_eq!(m.current().text, "C");
    }

    #[test]
    fn test_share_does_not_mutate() {
        let mut m = machine(vec![2], RequestPolicy::Ignore);
        let before = m.view();
        for target in ShareTarget::ALL {
            m.handle_event(QuoteEvent::ShareRequested(target)).unwrap();
        }
        assert_eq!(m.view(), before);
        assert_eq!(m.selection().unused_indices(), &[0, 1]);
    }
}
