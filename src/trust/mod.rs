//! Maps per-destination trust tiers to send affordances.

use crate::fiche::{Destination, TrustScores, TrustTier};
use serde::Serialize;
use std::collections::BTreeSet;

/// Visual tier the surrounding UI renders a send action with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordanceTier {
    Full,
    Caution,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub enabled: bool,
    pub tier: AffordanceTier,
}

impl Affordance {
    const BLOCKED: Affordance = Affordance {
        enabled: false,
        tier: AffordanceTier::Blocked,
    };
}

/// Tier → affordance. Full confidence and caution stay enabled; anything
/// else, including a missing score, is blocked.
pub fn affordance(tier: Option<TrustTier>) -> Affordance {
    match tier {
        Some(TrustTier::Full) => Affordance {
            enabled: true,
            tier: AffordanceTier::Full,
        },
        Some(TrustTier::Caution) => Affordance {
            enabled: true,
            tier: AffordanceTier::Caution,
        },
        Some(TrustTier::Blocked) | None => Affordance::BLOCKED,
    }
}

/// Affordances for the whole destination set, after the global gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DestinationAffordances {
    pub chatgpt: Affordance,
    pub perplexity: Affordance,
    pub mistral: Affordance,
}

impl DestinationAffordances {
    pub fn of(&self, destination: Destination) -> Affordance {
        match destination {
            Destination::ChatGpt => self.chatgpt,
            Destination::Perplexity => self.perplexity,
            Destination::Mistral => self.mistral,
        }
    }
}

/// Per-destination mapping, overridden globally: while any required
/// variable is missing every destination is disabled, whatever its tier.
pub fn destination_affordances(
    trust: &TrustScores,
    missing_required: &BTreeSet<String>,
) -> DestinationAffordances {
    if !missing_required.is_empty() {
        return DestinationAffordances {
            chatgpt: Affordance::BLOCKED,
            perplexity: Affordance::BLOCKED,
            mistral: Affordance::BLOCKED,
        };
    }
    DestinationAffordances {
        chatgpt: affordance(trust.chatgpt),
        perplexity: affordance(trust.perplexity),
        mistral: affordance(trust.mistral),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_mapping_table() {
        let full = affordance(Some(TrustTier::Full));
        assert!(full.enabled);
        assert_eq!(full.tier, AffordanceTier::Full);

        let caution = affordance(Some(TrustTier::Caution));
        assert!(caution.enabled);
        assert_eq!(caution.tier, AffordanceTier::Caution);

        for blocked in [affordance(Some(TrustTier::Blocked)), affordance(None)] {
            assert!(!blocked.enabled);
            assert_eq!(blocked.tier, AffordanceTier::Blocked);
        }
    }

    #[test]
    fn missing_required_disables_everything() {
        let trust = TrustScores::uniform(TrustTier::Full);
        let missing = BTreeSet::from(["commune".to_string()]);
        let gated = destination_affordances(&trust, &missing);
        for destination in Destination::ALL {
            assert!(!gated.of(destination).enabled);
            assert_eq!(gated.of(destination).tier, AffordanceTier::Blocked);
        }
    }

    #[test]
    fn mixed_scores_map_per_destination() {
        let trust = TrustScores {
            chatgpt: Some(TrustTier::Full),
            perplexity: Some(TrustTier::Caution),
            mistral: None,
        };
        let open = destination_affordances(&trust, &BTreeSet::new());
        assert!(open.chatgpt.enabled);
        assert_eq!(open.perplexity.tier, AffordanceTier::Caution);
        assert!(!open.mistral.enabled);
    }
}
