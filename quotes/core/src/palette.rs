//! Accent Palette
//!
//! Each successful pick also rolls a new background accent. The roll is
//! uniform over the palette and repeated until it lands on a color other
//! than the one on display (single-color palettes excepted).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::random::IndexSource;

/// Upper bound on re-rolls before stepping to the next palette entry
const MAX_REROLLS: usize = 64;

/// Pastel accents shipped with the widget
const BUILTIN_COLORS: &[AccentColor] = &[
    AccentColor::rgb(0xff, 0xad, 0xad), // red
    AccentColor::rgb(0xff, 0xd6, 0xa5), // peach
    AccentColor::rgb(0xfd, 0xff, 0xb6), // yellow
    AccentColor::rgb(0xca, 0xff, 0xbf), // green
    AccentColor::rgb(0x9b, 0xf6, 0xff), // cyan
    AccentColor::rgb(0xa0, 0xc4, 0xff), // blue
    AccentColor::rgb(0xbd, 0xb2, 0xff), // lavender
];

/// An opaque RGB color, written as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AccentColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for AccentColor {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || QuoteError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for AccentColor {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A fixed, non-empty list of accent colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<[AccentColor]>,
}

impl Palette {
    /// Build a palette, rejecting an empty color list
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidPalette`] when `colors` is empty.
    pub fn new(colors: Vec<AccentColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(QuoteError::InvalidPalette("palette is empty".into()));
        }
        Ok(Self {
            colors: colors.into(),
        })
    }

    /// Parse a palette from `#rrggbb` strings
    ///
    /// # Errors
    ///
    /// Fails on the first malformed color, or if the list is empty.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// The pastel palette shipped with the widget
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            colors: BUILTIN_COLORS.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[AccentColor] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Tracks the accent on display and rolls the next one
#[derive(Clone, Debug)]
pub struct AccentPicker {
    palette: Palette,
    current: usize,
}

impl AccentPicker {
    /// Start on the first palette entry
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            current: 0,
        }
    }

    /// The accent on display
    #[must_use]
    pub fn current(&self) -> AccentColor {
        self.palette.colors[self.current]
    }

    /// Palette position of the accent on display
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Roll a new accent that differs from the current one
    pub fn pick_next<R: IndexSource + ?Sized>(&mut self, rng: &mut R) -> AccentColor {
        let len = self.palette.len();
        if len > 1 {
            let mut next = self.current;
            for _ in 0..MAX_REROLLS {
                next = rng.next_index(len).min(len - 1);
                if next != self.current {
                    break;
                }
            }
            if next == self.current {
                tracing::debug!("Accent re-rolls exhausted, stepping to next color");
                next = (self.current + 1) % len;
            }
            self.current = next;
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedSource, SeededSource};

    #[test]
    fn test_parse_color() {
        let color: AccentColor = "#ffadad".parse().unwrap();
        assert_eq!(color, AccentColor::rgb(0xff, 0xad, 0xad));
        assert_eq!(color.to_string(), "#ffadad");
        assert_eq!("#A0C4FF".parse::<AccentColor>().unwrap().to_string(), "#a0c4ff");
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        for bad in ["ffadad", "#ffad", "#gggggg", "#ffadad00", "", "#ffé123"] {
            assert!(
                matches!(bad.parse::<AccentColor>(), Err(QuoteError::InvalidColor { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(matches!(
            Palette::new(Vec::new()),
            Err(QuoteError::InvalidPalette(_))
        ));
        assert!(Palette::parse::<&str>(&[]).is_err());
    }

    #[test]
    fn test_builtin_palette() {
        let palette = Palette::builtin();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.colors()[0].to_string(), "#ffadad");
        assert_eq!(palette.colors()[6].to_string(), "#bdb2ff");
    }

    #[test]
    fn test_initial_accent_is_first_color() {
        let picker = AccentPicker::new(Palette::builtin());
        assert_eq!(picker.current_index(), 0);
        assert_eq!(picker.current().to_string(), "#ffadad");
    }

    #[test]
    fn test_rerolls_until_different() {
        let mut picker = AccentPicker::new(Palette::builtin());
        // First two draws land on the current color
        let mut rng = ScriptedSource::new([0, 0, 3]);
        picker.pick_next(&mut rng);
        assert_eq!(picker.current_index(), 3);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_stuck_source_steps_forward() {
        let mut picker = AccentPicker::new(Palette::builtin());
        let mut rng = ScriptedSource::new(std::iter::repeat(0).take(MAX_REROLLS));
        picker.pick_next(&mut rng);
        assert_eq!(picker.current_index(), 1);
    }

    #[test]
    fn test_consecutive_accents_differ() {
        let mut picker = AccentPicker::new(Palette::parse(&["#000000", "#ffffff"]).unwrap());
        let mut rng = SeededSource::new(3);
        let mut last = picker.current();
        for _ in 0..50 {
            let next = picker.pick_next(&mut rng);
            assert_ne!(next, last);
            last = next;
        }
    }

    #[test]
    fn test_single_color_palette_is_constant() {
        let mut picker = AccentPicker::new(Palette::parse(&["#123456"]).unwrap());
        let mut rng = SeededSource::new(1);
        for _ in 0..10 {
            assert_eq!(picker.pick_next(&mut rng).to_string(), "#123456");
        }
        assert_eq!(picker.current_index(), 0);
    }

    #[test]
    fn test_color_serde_as_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            colors: Vec<AccentColor>,
        }
        let parsed: Wrapper = toml::from_str(r##"colors = ["#ffadad", "#bdb2ff"]"##).unwrap();
        assert_eq!(parsed.colors[1], AccentColor::rgb(0xbd, 0xb2, 0xff));

        let bad: std::result::Result<Wrapper, _> = toml::from_str(r#"colors = ["red"]"#);
        assert!(bad.is_err());
    }
}
