use serde::{Deserialize, Serialize};

/// Pricing rules for synthetic outbound+inbound bundles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Multiplier on the combined cheapest leg fares for the "special" saver bundle
    pub saver_multiplier: f64,

    /// Multiplier for the flexible bundle
    pub flex_multiplier: f64,

    /// Flat agent commission carried by every bundled fare
    pub commission_inr: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            saver_multiplier: 0.95,
            flex_multiplier: 1.02,
            commission_inr: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleTotals {
    pub saver: i64,
    pub flex: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSplit {
    pub agent_net_fare: i64,
    pub commission: i64,
}

pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Saver and flex totals for one outbound/inbound pair, rounded to the rupee.
    pub fn bundle_totals(&self, min_outbound: i64, min_inbound: i64) -> BundleTotals {
        let combined = min_outbound + min_inbound;
        BundleTotals {
            saver: apply_multiplier(combined, self.config.saver_multiplier),
            flex: apply_multiplier(combined, self.config.flex_multiplier),
        }
    }

    /// Fixed commission subtracted from the price. Never exceeds the price.
    pub fn agent_split(&self, price: i64) -> AgentSplit {
        let commission = self.config.commission_inr.clamp(0, price.max(0));
        AgentSplit {
            agent_net_fare: price - commission,
            commission,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

fn apply_multiplier(amount: i64, multiplier: f64) -> i64 {
    (amount as f64 * multiplier).round() as i64
}
