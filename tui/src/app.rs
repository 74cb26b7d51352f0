//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, frame ticks)
//! - QuoteMachine for the quote rotation
//! - DisplayState for surface-only effects
//!
//! # Flow
//!
//! 1. Converts key presses to [`QuoteEvent`]s
//! 2. Feeds them, and frame deltas, to the mounted [`QuoteMachine`]
//! 3. Applies the resulting [`QuoteMessage`]s to the [`DisplayState`]
//! 4. Renders the machine's view plus the display state

use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use ratatui::{Frame, Terminal};

use quotes_core::{
    source_for_seed, IndexSource, QuoteEvent, QuoteMachine, QuoteMessage, ShareTarget,
};

use crate::cli::Args;
use crate::display::{DisplayState, StatusKind, StatusMessage};
use crate::opener::{DisabledOpener, LinkOpener, OpenError, SystemOpener};
use crate::theme::{DIM_GRAY, ERROR_RED};
use crate::widgets::QuoteCard;

/// Frame interval, ~30 FPS keeps the fade smooth
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Key hints shown when no status message is up
const HINTS: &str = " n/Space new quote | t tweet | u tumblr | q quit";

/// The mounted machine, randomness chosen at startup
pub type Machine = QuoteMachine<Box<dyn IndexSource + Send>>;

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// The quote widget state
    machine: Machine,
    /// Surface-side state derived from machine messages
    display: DisplayState,
    /// Where share links go
    opener: Box<dyn LinkOpener>,
    /// Last frame time (for animations)
    last_frame: Instant,
}

impl App {
    /// Create a new App around a mounted machine
    pub fn new(machine: Machine, opener: Box<dyn LinkOpener>) -> Self {
        let display = DisplayState::new(machine.accent());
        Self {
            running: true,
            machine,
            display,
            opener,
            last_frame: Instant::now(),
        }
    }

    /// Load configuration and mount the machine described by `args`
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let config = args.load_config().context("failed to load configuration")?;
        let catalog = config
            .load_catalog()
            .context("failed to load quote catalog")?;

        let machine = QuoteMachine::from_config(&config, catalog, source_for_seed(config.seed))?;
        let opener: Box<dyn LinkOpener> = if args.no_open {
            Box::new(DisabledOpener)
        } else {
            Box::new(SystemOpener)
        };

        Ok(Self::new(machine, opener))
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;
        self.last_frame = Instant::now();

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key)?;
                        }
                        Some(Ok(Event::Resize(width, height))) => {
                            tracing::debug!(width, height, "Terminal resized");
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "Terminal event stream failed");
                            self.running = false;
                        }
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = frames.tick() => {
                    let now = Instant::now();
                    let delta = now - self.last_frame;
                    self.last_frame = now;
                    self.tick(delta)?;
                }
            }

            self.render(terminal)?;
        }

        tracing::info!(picks = self.machine.picks(), "Quote widget unmounted");
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            // Quit
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.running = false;
            }

            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('n') => {
                self.dispatch(QuoteEvent::NewQuoteRequested)?;
            }

            KeyCode::Char('t') => {
                self.dispatch(QuoteEvent::ShareRequested(ShareTarget::Twitter))?;
            }
            KeyCode::Char('u') => {
                self.dispatch(QuoteEvent::ShareRequested(ShareTarget::Tumblr))?;
            }

            _ => {}
        }
        Ok(())
    }

    /// Advance the machine and display timers by `delta`
    pub fn tick(&mut self, delta: Duration) -> anyhow::Result<()> {
        self.dispatch(QuoteEvent::Tick(delta))?;
        self.display.update(delta);
        Ok(())
    }

    fn dispatch(&mut self, event: QuoteEvent) -> anyhow::Result<()> {
        if let Some(msg) = self.machine.handle_event(event)? {
            self.display.apply_message(&msg);
            if let QuoteMessage::Share(link) = &msg {
                match self.opener.open(&link.url) {
                    Ok(()) => {}
                    // status line already shows the link
                    Err(OpenError::Disabled) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not open share link");
                        self.display
                            .set_status(StatusMessage::error(format!("Could not open link: {e}")));
                    }
                }
            }
        }
        Ok(())
    }

    /// Render the UI
    pub fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Draw one frame
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let background = self.display.background.color();
        let buf = frame.buffer_mut();

        Block::default()
            .style(Style::default().bg(background))
            .render(area, buf);

        // Card, centered above the status line
        let view = self.machine.view();
        let card = QuoteCard::new(&view.text, &view.author).opacity(view.opacity);
        let card_area = area.height.saturating_sub(1);
        let width = QuoteCard::width_for(area.width);
        let height = card.height_for(width).min(card_area);
        let card_rect = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (card_area - height) / 2,
            width,
            height,
        );
        card.render(card_rect, buf);

        // Status line
        if area.height > 0 {
            let (text, fg) = match &self.display.status {
                Some(status) => {
                    let fg = match status.kind {
                        StatusKind::Info => DIM_GRAY,
                        StatusKind::Error => ERROR_RED,
                    };
                    (format!(" {}", status.text), fg)
                }
                None => (HINTS.to_string(), DIM_GRAY),
            };
            buf.set_stringn(
                area.x,
                area.y + area.height - 1,
                &text,
                area.width as usize,
                Style::default().fg(fg).bg(background),
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }
}
