//! Send actions toward the fixed AI destinations: endpoint table and
//! percent-encoded URL building. Fire-and-forget; no response is read back.

use crate::fiche::Destination;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;
use url::Url;

const DEFAULT_TABLE: &str = include_str!("destinations.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    pub base: String,
    pub param: String,
}

/// One endpoint per destination. The defaults ship embedded; alternative
/// tables load from the same TOML shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DestinationConfig {
    pub chatgpt: Endpoint,
    pub perplexity: Endpoint,
    pub mistral: Endpoint,
}

impl DestinationConfig {
    pub fn builtin() -> DestinationConfig {
        toml::from_str(DEFAULT_TABLE).expect("embedded destination table parses")
    }

    pub fn from_toml_str(table: &str) -> Result<DestinationConfig, toml::de::Error> {
        toml::from_str(table)
    }

    pub fn endpoint(&self, destination: Destination) -> &Endpoint {
        match destination {
            Destination::ChatGpt => &self.chatgpt,
            Destination::Perplexity => &self.perplexity,
            Destination::Mistral => &self.mistral,
        }
    }
}

impl Default for DestinationConfig {
    fn default() -> DestinationConfig {
        DestinationConfig::builtin()
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no fiche loaded")]
    NoFiche,
    #[error("required variables are missing: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    MissingRequired(BTreeSet<String>),
    #[error("destination {0} is not recommended for this fiche")]
    Blocked(Destination),
    #[error("destination endpoint is not a valid URL: {0}")]
    BadEndpoint(#[from] url::ParseError),
}

/// Percent-encode the compiled prompt into the destination's query
/// parameter. Gating happens upstream; this is the pure URL step.
pub fn send_url(
    config: &DestinationConfig,
    destination: Destination,
    prompt: &str,
) -> Result<Url, DispatchError> {
    let endpoint = config.endpoint(destination);
    let mut url = Url::parse(&endpoint.base)?;
    url.query_pairs_mut().append_pair(&endpoint.param, prompt);
    Ok(url)
}
