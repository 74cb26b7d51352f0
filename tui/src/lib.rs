//! Quotes TUI - Terminal interface for the random quote machine
//!
//! This crate mounts a [`quotes_core::QuoteMachine`] in a full-screen
//! terminal: a pastel accent background with a quote card in the middle.
//!
//! # Architecture
//!
//! - **App**: event loop turning keys and frame ticks into machine events
//! - **Display**: accent crossfade and status line derived from machine messages
//! - **Widgets**: the quote card
//! - **Opener**: hands share links to the system browser

pub mod app;
pub mod cli;
pub mod display;
pub mod opener;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use cli::Args;
