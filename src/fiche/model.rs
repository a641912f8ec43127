//! Serde model for the fiche record and its wire shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The portable unit of meaning: metadata, trust scores, typed variables and
/// the preprompt template. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fiche {
    pub meta: FicheMeta,
    #[serde(default)]
    pub trust: TrustScores,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub preprompt: String,
}

impl Fiche {
    /// Rough character weight of the parts that dominate QR density.
    pub fn source_weight(&self) -> usize {
        let vars: usize = self
            .variables
            .iter()
            .map(|v| v.label.chars().count() + v.id.chars().count())
            .sum();
        self.preprompt.chars().count() + vars
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicheMeta {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub version: String,
}

/// One templated input slot. `id` doubles as the `{{id}}` placeholder key
/// and as the result-map key, and must be unique within a fiche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub label: String,
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: VarKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    #[default]
    Text,
    Number,
    Geolocation,
}

/// The fixed set of AI destinations a fiche carries trust scores for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    ChatGpt,
    Perplexity,
    Mistral,
}

impl Destination {
    pub const ALL: [Destination; 3] = [
        Destination::ChatGpt,
        Destination::Perplexity,
        Destination::Mistral,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Destination::ChatGpt => "chatgpt",
            Destination::Perplexity => "perplexity",
            Destination::Mistral => "mistral",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-destination confidence. Serialized as the wire integers 3/2/1; any
/// other number decodes as `Blocked`, matching the source's loose checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
#[repr(u8)]
pub enum TrustTier {
    Full = 3,
    Caution = 2,
    Blocked = 1,
}

impl TrustTier {
    /// `Number(...)`-like coercion of a raw form field. Empty input keeps
    /// the default tier; anything that is not exactly 3 or 2 is `Blocked`.
    pub fn from_raw(input: &str) -> TrustTier {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return TrustTier::Full;
        }
        match trimmed.parse::<f64>() {
            Ok(score) => TrustTier::from_score(score),
            Err(_) => TrustTier::Blocked,
        }
    }

    pub fn from_score(score: f64) -> TrustTier {
        if score == 3.0 {
            TrustTier::Full
        } else if score == 2.0 {
            TrustTier::Caution
        } else {
            TrustTier::Blocked
        }
    }
}

impl From<i64> for TrustTier {
    fn from(value: i64) -> Self {
        match value {
            3 => TrustTier::Full,
            2 => TrustTier::Caution,
            _ => TrustTier::Blocked,
        }
    }
}

impl From<TrustTier> for u8 {
    fn from(tier: TrustTier) -> u8 {
        tier as u8
    }
}

/// Trust score per destination. A field missing on the wire stays `None`;
/// the affordance mapper blocks such destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatgpt: Option<TrustTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perplexity: Option<TrustTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistral: Option<TrustTier>,
}

impl TrustScores {
    pub fn uniform(tier: TrustTier) -> Self {
        Self {
            chatgpt: Some(tier),
            perplexity: Some(tier),
            mistral: Some(tier),
        }
    }

    pub fn tier(&self, destination: Destination) -> Option<TrustTier> {
        match destination {
            Destination::ChatGpt => self.chatgpt,
            Destination::Perplexity => self.perplexity,
            Destination::Mistral => self.mistral,
        }
    }
}
