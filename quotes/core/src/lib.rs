//! Quotes Core - Headless Quote Rotation Engine
//!
//! This crate holds all the stateful logic of the random quote widget,
//! independent of any UI framework. A surface (the terminal UI, a test, a
//! headless driver) mounts a [`QuoteMachine`], feeds it [`QuoteEvent`]s and
//! renders the [`QuoteView`] it exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      QuoteMachine                        │
//! │  ┌───────────────┐  ┌──────────────┐  ┌───────────────┐  │
//! │  │SelectionState │  │ AccentPicker │  │  Transition   │  │
//! │  │ current+pool  │  │  palette     │  │ phase+pending │  │
//! │  └───────┬───────┘  └──────┬───────┘  └───────────────┘  │
//! │          └──── IndexSource ┘                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Catalog`] / [`Quote`]: the fixed set of quotes
//! - [`SelectionState`]: no-repeat-until-exhausted rotation
//! - [`AccentPicker`]: background accent that never repeats twice in a row
//! - [`Transition`]: hide, deferred pick, show
//! - [`IndexSource`]: injectable uniform randomness
//! - [`QuotesConfig`]: TOML + environment + CLI configuration

pub mod config;
pub mod error;
pub mod machine;
pub mod palette;
pub mod quote;
pub mod random;
pub mod selector;
pub mod share;
pub mod transition;

pub use config::{load_config, load_config_from_path, ConfigError, ConfigOverrides, ConfigSource, QuotesConfig};
pub use error::{QuoteError, Result};
pub use machine::{MachineSettings, QuoteEvent, QuoteMachine, QuoteMessage, QuoteView};
pub use palette::{AccentColor, AccentPicker, Palette};
pub use quote::{Catalog, CatalogError, Quote};
pub use random::{source_for_seed, IndexSource, ScriptedSource, SeededSource, ThreadRngSource};
pub use selector::{Pick, SelectionState};
pub use share::{ShareLink, ShareTarget};
pub use transition::{
    Easing, PendingPick, RequestOutcome, RequestPolicy, Transition, TransitionId, TransitionPhase,
    DEFAULT_FADE_DELAY,
};
