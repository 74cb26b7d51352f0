//! QuoteCard Widget
//!
//! The off-white card in the middle of the screen: wrapped, centered quote
//! text, a right-aligned italic author line and a row of buttons.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Widget};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::theme::{
    faded, AUTHOR_TEXT, BUTTON_BG, BUTTON_FG, CARD_BG, CARD_BORDER, QUOTE_TEXT, TUMBLR_NAVY,
    TWITTER_BLUE,
};

/// Widest the card gets, in columns
pub const MAX_CARD_WIDTH: u16 = 64;

/// Horizontal padding inside the border
const PAD_X: u16 = 3;

/// Blank rows above the text and between sections
const PAD_Y: u16 = 1;

const NEW_QUOTE_LABEL: &str = " n New Quote ";
const TWEET_LABEL: &str = " t Tweet ";
const TUMBLR_LABEL: &str = " u Tumblr ";

/// A bordered quote card
pub struct QuoteCard<'a> {
    text: &'a str,
    author: &'a str,
    opacity: f32,
}

impl<'a> QuoteCard<'a> {
    pub fn new(text: &'a str, author: &'a str) -> Self {
        Self {
            text,
            author,
            opacity: 1.0,
        }
    }

    /// Quote text opacity, 0.0 (invisible) to 1.0
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Card width for a screen `area_width` columns wide
    #[must_use]
    pub fn width_for(area_width: u16) -> u16 {
        area_width.saturating_sub(4).min(MAX_CARD_WIDTH)
    }

    /// Rows the card needs at `width` columns
    #[must_use]
    pub fn height_for(&self, width: u16) -> u16 {
        let text_rows = self.wrapped(Self::inner_width(width)).len() as u16;
        // border + pad + text + pad + author + pad + buttons + border
        2 + PAD_Y + text_rows + PAD_Y + 1 + PAD_Y + 1
    }

    fn inner_width(width: u16) -> usize {
        width.saturating_sub(2 + 2 * PAD_X) as usize
    }

    fn wrapped(&self, width: usize) -> Vec<String> {
        if width == 0 {
            return Vec::new();
        }
        wrap(self.text, width)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }
}

/// Write `line` centered in `[x, x + width)`
fn set_centered(buf: &mut Buffer, x: u16, y: u16, width: u16, line: &str, style: Style) {
    let line_width = line.width() as u16;
    let offset = width.saturating_sub(line_width) / 2;
    buf.set_stringn(x + offset, y, line, width as usize, style);
}

impl Widget for QuoteCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 * PAD_X + 4 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CARD_BORDER).bg(CARD_BG))
            .style(Style::default().bg(CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let x = inner.x + PAD_X;
        let width = inner.width.saturating_sub(2 * PAD_X);
        let bottom = inner.y + inner.height;
        let mut y = inner.y + PAD_Y;

        // Quote text, faded toward the card color
        let text_style = Style::default()
            .fg(faded(QUOTE_TEXT, CARD_BG, self.opacity))
            .bg(CARD_BG)
            .add_modifier(Modifier::BOLD);
        for line in self.wrapped(width as usize) {
            if y >= bottom {
                return;
            }
            set_centered(buf, x, y, width, &line, text_style);
            y += 1;
        }
        y += PAD_Y;

        // Author, right-aligned
        if y < bottom {
            let author = format!("- {}", self.author);
            let author_width = (author.width() as u16).min(width);
            let author_style = Style::default()
                .fg(AUTHOR_TEXT)
                .bg(CARD_BG)
                .add_modifier(Modifier::ITALIC);
            buf.set_stringn(
                x + width - author_width,
                y,
                &author,
                width as usize,
                author_style,
            );
        }
        y += 1 + PAD_Y;

        // Buttons: New Quote on the left, share targets on the right
        if y < bottom {
            let button = |fg, bg| Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
            buf.set_stringn(x, y, NEW_QUOTE_LABEL, width as usize, button(BUTTON_FG, BUTTON_BG));

            let share_width = (TWEET_LABEL.width() + 1 + TUMBLR_LABEL.width()) as u16;
            let new_quote_width = NEW_QUOTE_LABEL.width() as u16;
            if width >= new_quote_width + 1 + share_width {
                let share_x = x + width - share_width;
                buf.set_string(share_x, y, TWEET_LABEL, button(BUTTON_FG, TWITTER_BLUE));
                buf.set_string(
                    share_x + TWEET_LABEL.width() as u16 + 1,
                    y,
                    TUMBLR_LABEL,
                    button(BUTTON_FG, TUMBLR_NAVY),
                );
            }
        }
    }
}
