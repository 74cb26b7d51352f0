//! Theme and Colors
//!
//! The card sits on a full-screen accent background, like a paper note on a
//! pastel wall. Text fades by blending its color toward the card color.

use ratatui::style::Color;

use quotes_core::AccentColor;

// ============================================================================
// Card Palette
// ============================================================================

/// Card face - off-white
pub const CARD_BG: Color = Color::Rgb(245, 245, 245);

/// Card border - charcoal
pub const CARD_BORDER: Color = Color::Rgb(51, 51, 51);

/// Quote text
pub const QUOTE_TEXT: Color = Color::Rgb(34, 34, 34);

/// Author line
pub const AUTHOR_TEXT: Color = Color::Rgb(85, 85, 85);

// ============================================================================
// Buttons
// ============================================================================

/// "New quote" button face
pub const BUTTON_BG: Color = Color::Rgb(51, 51, 51);

/// Button label
pub const BUTTON_FG: Color = Color::Rgb(255, 255, 255);

/// Twitter button face
pub const TWITTER_BLUE: Color = Color::Rgb(29, 161, 242);

/// Tumblr button face
pub const TUMBLR_NAVY: Color = Color::Rgb(54, 70, 93);

// ============================================================================
// Status Line
// ============================================================================

/// Hints and share links
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Opener failures
pub const ERROR_RED: Color = Color::Rgb(190, 40, 40);

/// Convert a core accent into a terminal color
#[must_use]
pub fn accent(color: AccentColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Mix `from` toward `to`; `t = 0.0` is `from`, `t = 1.0` is `to`
///
/// Non-RGB colors cannot be mixed and snap at the halfway point.
#[must_use]
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// Text color at `opacity` on top of `background`
#[must_use]
pub fn faded(text: Color, background: Color, opacity: f32) -> Color {
    blend(background, text, opacity)
}
