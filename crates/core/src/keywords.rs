//! The three "memory" keyword fields and their resolution rules.
//!
//! Fields hold exactly what the user typed (bounded to
//! [`MAX_KEYWORD_CHARS`]). Defaults are substituted only when a generation
//! is submitted, via [`KeywordSet::resolve`]; they are never written back
//! into the fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a single keyword field, in characters.
pub const MAX_KEYWORD_CHARS: u64 = 15;

/// Number of keyword slots on the screen.
pub const KEYWORD_SLOTS: usize = 3;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One of the three keyword inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSlot {
    First,
    Second,
    Third,
}

impl KeywordSlot {
    pub const ALL: [KeywordSlot; KEYWORD_SLOTS] =
        [KeywordSlot::First, KeywordSlot::Second, KeywordSlot::Third];

    /// Value substituted when the field is blank at submission time.
    pub fn default_word(self) -> &'static str {
        match self {
            KeywordSlot::First => "pool",
            KeywordSlot::Second => "clouds",
            KeywordSlot::Third => "empty",
        }
    }

    /// Hint text shown in an empty field.
    pub fn placeholder(self) -> &'static str {
        match self {
            KeywordSlot::First => "Pool",
            KeywordSlot::Second => "Sunset",
            KeywordSlot::Third => "Empty",
        }
    }

    /// 1-based position, as used in routes (`/keywords/1`).
    pub fn number(self) -> u8 {
        match self {
            KeywordSlot::First => 1,
            KeywordSlot::Second => 2,
            KeywordSlot::Third => 3,
        }
    }
}

impl FromStr for KeywordSlot {
    type Err = CoreError;

    /// Accepts `1`/`2`/`3`, `k1`/`k2`/`k3`, or `first`/`second`/`third`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "k1" | "first" => Ok(KeywordSlot::First),
            "2" | "k2" | "second" => Ok(KeywordSlot::Second),
            "3" | "k3" | "third" => Ok(KeywordSlot::Third),
            other => Err(CoreError::Validation(format!(
                "Unknown keyword slot '{other}'. Must be one of: 1, 2, 3"
            ))),
        }
    }
}

impl fmt::Display for KeywordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// KeywordSet
// ---------------------------------------------------------------------------

/// The raw contents of the three keyword fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct KeywordSet {
    #[serde(default)]
    #[validate(length(max = 15))]
    pub k1: String,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub k2: String,
    #[serde(default)]
    #[validate(length(max = 15))]
    pub k3: String,
}

impl KeywordSet {
    /// Build a set, rejecting any field longer than [`MAX_KEYWORD_CHARS`].
    pub fn new(
        k1: impl Into<String>,
        k2: impl Into<String>,
        k3: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let set = Self {
            k1: k1.into(),
            k2: k2.into(),
            k3: k3.into(),
        };
        set.ensure_valid()?;
        Ok(set)
    }

    /// Check the length bound on all three fields.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect();
            fields.sort_unstable();
            CoreError::Validation(format!(
                "Keyword fields {} exceed {MAX_KEYWORD_CHARS} characters",
                fields.join(", ")
            ))
        })
    }

    /// Raw text of one field.
    pub fn get(&self, slot: KeywordSlot) -> &str {
        match slot {
            KeywordSlot::First => &self.k1,
            KeywordSlot::Second => &self.k2,
            KeywordSlot::Third => &self.k3,
        }
    }

    /// Replace one field. The previous value is kept if `value` is too long.
    pub fn set(&mut self, slot: KeywordSlot, value: impl Into<String>) -> Result<(), CoreError> {
        let value = value.into();
        let len = value.chars().count() as u64;
        if len > MAX_KEYWORD_CHARS {
            return Err(CoreError::Validation(format!(
                "Keyword {slot} is {len} characters; the limit is {MAX_KEYWORD_CHARS}"
            )));
        }
        match slot {
            KeywordSlot::First => self.k1 = value,
            KeywordSlot::Second => self.k2 = value,
            KeywordSlot::Third => self.k3 = value,
        }
        Ok(())
    }

    /// Empty all three fields.
    pub fn clear(&mut self) {
        self.k1.clear();
        self.k2.clear();
        self.k3.clear();
    }

    /// True when every field is the empty string (whitespace counts as text).
    pub fn is_empty(&self) -> bool {
        self.k1.is_empty() && self.k2.is_empty() && self.k3.is_empty()
    }

    /// Trim each field and substitute the slot default for blanks.
    pub fn resolve(&self) -> ResolvedKeywords {
        ResolvedKeywords(KeywordSlot::ALL.map(|slot| {
            let trimmed = self.get(slot).trim();
            if trimmed.is_empty() {
                slot.default_word().to_string()
            } else {
                trimmed.to_string()
            }
        }))
    }
}

// ---------------------------------------------------------------------------
// ResolvedKeywords
// ---------------------------------------------------------------------------

/// Keywords as submitted to the collaborators: trimmed, never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedKeywords([String; KEYWORD_SLOTS]);

impl ResolvedKeywords {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, slot: KeywordSlot) -> &str {
        &self.0[usize::from(slot.number() - 1)]
    }

    /// Comma-separated form used inside prompts: `pool, clouds, empty`.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for ResolvedKeywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
