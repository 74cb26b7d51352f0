//! Share Links
//!
//! Builds the social-network intent URLs for the quote on display. Building a
//! link never touches selection state; opening it is left to the surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quote::Quote;

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const TUMBLR_SHARE: &str = "https://www.tumblr.com/widgets/share/tool";

/// Escapes `urlencoding` emits for marks that `encodeURIComponent` keeps literal
const KEPT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a query component the way `encodeURIComponent` does
fn encode_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escape, mark) in KEPT_MARKS {
        if encoded.contains(escape) {
            encoded = encoded.replace(escape, mark);
        }
    }
    encoded
}

/// Where a quote can be shared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    Twitter,
    Tumblr,
}

impl ShareTarget {
    /// All supported targets
    pub const ALL: [ShareTarget; 2] = [ShareTarget::Twitter, ShareTarget::Tumblr];

    /// Human-readable name
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Tumblr => "Tumblr",
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShareTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "tumblr" => Ok(Self::Tumblr),
            other => Err(format!("unknown share target '{other}'")),
        }
    }
}

/// A ready-to-open share URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink {
    pub target: ShareTarget,
    pub url: String,
}

impl ShareLink {
    /// Build the link for `quote`
    #[must_use]
    pub fn new(target: ShareTarget, quote: &Quote) -> Self {
        let url = match target {
            ShareTarget::Twitter => format!(
                "{TWITTER_INTENT}?hashtags=quotes&related=freeCodeCamp&text={}",
                encode_component(&format!("\"{}\" {}", quote.text, quote.author))
            ),
            ShareTarget::Tumblr => format!(
                "{TUMBLR_SHARE}?posttype=quote&tags=quotes,freecodecamp&caption={}&content={}\
                 &canonicalUrl={}&shareSource=tumblr_share_button",
                encode_component(&quote.author),
                encode_component(&quote.text),
                encode_component("https://www.tumblr.com/buttons"),
            ),
        };
        Self { target, url }
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
