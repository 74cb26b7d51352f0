//! Custom widgets

pub mod quote_card;

pub use quote_card::QuoteCard;
