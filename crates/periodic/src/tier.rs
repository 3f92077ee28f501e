//! # Presentation Tiers
//!
//! Cards are coloured by net worth. The amount is cleaned by dropping every
//! character other than digits, `.` and `-`, then read as a leading decimal
//! number. Anything that does not yield a number lands in [`Tier::High`]
//! because both threshold comparisons fail for it.

use serde::Serialize;
use serde_json::Value;

/// Upper bound (inclusive) of [`Tier::Low`].
pub const LOW_TIER_CEILING: f64 = 100_000.0;

/// Upper bound (inclusive) of [`Tier::Mid`].
pub const MID_TIER_CEILING: f64 = 200_000.0;

/// An sRGB colour with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Creates a colour.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Colours applied to a card of one tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Palette {
    /// Card background tint.
    pub background: Rgba,
    /// Card border.
    pub border: Rgba,
    /// Outer glow.
    pub glow: Rgba,
}

/// Net worth bracket of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Up to 100 000. Red.
    Low,
    /// Up to 200 000. Orange.
    Mid,
    /// Above 200 000, or not a number. Green.
    High,
}

impl Tier {
    /// Buckets an amount. NaN falls through to [`Tier::High`].
    #[must_use]
    pub fn classify(amount: f64) -> Self {
        if amount <= LOW_TIER_CEILING {
            Self::Low
        } else if amount <= MID_TIER_CEILING {
            Self::Mid
        } else {
            Self::High
        }
    }

    /// Classifies a raw `NetWorth` value.
    #[must_use]
    pub fn from_net_worth(value: &Value) -> Self {
        Self::classify(parse_net_worth(value))
    }

    /// Colours for this tier.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Low => Palette {
                background: Rgba::new(255, 0, 0, 0.1),
                border: Rgba::new(239, 48, 34, 0.7),
                glow: Rgba::new(239, 48, 34, 0.6),
            },
            Self::Mid => Palette {
                background: Rgba::new(255, 165, 0, 0.1),
                border: Rgba::new(255, 255, 102, 0.7),
                glow: Rgba::new(255, 255, 102, 0.6),
            },
            Self::High => Palette {
                background: Rgba::new(255, 255, 0, 0.1),
                border: Rgba::new(144, 238, 144, 0.7),
                glow: Rgba::new(144, 238, 144, 0.6),
            },
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads a net worth value as a number, `NaN` if there is none.
///
/// Numbers are taken as is. Strings are cleaned and the longest leading
/// decimal (`-?digits[.digits]`) is parsed, so `"$1,500.50"` reads as
/// `1500.5` and `"1.2.3"` as `1.2`.
#[must_use]
pub fn parse_net_worth(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            leading_decimal(&cleaned).parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// Longest prefix of the form `-?\d*(\.\d*)?`.
fn leading_decimal(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    &text[..end]
}
