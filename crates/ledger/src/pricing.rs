//! Pricing table for the models the two paid tiers call.
//!
//! Prices are in USD per 1 million tokens. Custom pricing can be added at
//! runtime for models not in the built-in table; unknown models cost 0.0
//! (the economy tier's models are free by definition in the cost model).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-million-token pricing for a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Price per 1M input tokens in USD.
    pub input_per_m: f64,
    /// Price per 1M output tokens in USD.
    pub output_per_m: f64,
}

impl ModelPricing {
    pub fn new(input_per_m: f64, output_per_m: f64) -> Self {
        Self {
            input_per_m,
            output_per_m,
        }
    }

    /// Compute cost for the given token counts.
    pub fn cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        (input_tokens as f64 * self.input_per_m + output_tokens as f64 * self.output_per_m)
            / 1_000_000.0
    }
}

/// Thread-safe pricing table with built-in defaults and custom overrides.
pub struct PricingTable {
    prices: RwLock<HashMap<String, ModelPricing>>,
}

impl PricingTable {
    /// Create a pricing table with built-in model prices.
    pub fn with_defaults() -> Self {
        let mut prices = HashMap::new();

        // Premium tier candidates
        prices.insert(
            "claude-sonnet-4-20250514".into(),
            ModelPricing::new(3.0, 15.0),
        );
        prices.insert(
            "claude-opus-4-20250514".into(),
            ModelPricing::new(15.0, 75.0),
        );
        prices.insert(
            "claude-3-5-sonnet-20241022".into(),
            ModelPricing::new(3.0, 15.0),
        );
        prices.insert(
            "claude-3-5-haiku-20241022".into(),
            ModelPricing::new(0.8, 4.0),
        );

        // Economy tier candidates (negligible, tracked for completeness)
        prices.insert("glm-4-flash".into(), ModelPricing::new(0.0, 0.0));
        prices.insert("glm-4-air".into(), ModelPricing::new(0.1, 0.1));

        Self {
            prices: RwLock::new(prices),
        }
    }

    /// Create an empty pricing table.
    pub fn empty() -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
        }
    }

    /// Look up pricing for a model. Returns None if not found.
    pub fn get(&self, model: &str) -> Option<ModelPricing> {
        let prices = self.prices.read().unwrap();
        prices.get(model).cloned()
    }

    /// Add or update pricing for a model.
    pub fn set(&self, model: impl Into<String>, pricing: ModelPricing) {
        let mut prices = self.prices.write().unwrap();
        prices.insert(model.into(), pricing);
    }

    /// Compute cost for a model call, returning 0.0 if the model is unknown.
    ///
    /// Tries exact match first, then prefix matching so dated variants
    /// (`claude-sonnet-4-20250514` vs a bare `claude-sonnet-4` entry, or the
    /// reverse) still resolve.
    pub fn compute_cost(&self, model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
        let prices = self.prices.read().unwrap();

        if let Some(p) = prices.get(model) {
            return p.cost(input_tokens, output_tokens);
        }

        let model_lower = model.to_lowercase();
        let mut best: Option<(&String, &ModelPricing)> = None;
        for (key, pricing) in prices.iter() {
            let key_lower = key.to_lowercase();
            if model_lower.starts_with(&key_lower) || key_lower.starts_with(&model_lower) {
                if best.is_none_or(|(k, _)| key.len() > k.len()) {
                    best = Some((key, pricing));
                }
            }
        }

        match best {
            Some((_, p)) => p.cost(input_tokens, output_tokens),
            None => 0.0,
        }
    }

    /// List all known model names, sorted.
    pub fn models(&self) -> Vec<String> {
        let prices = self.prices.read().unwrap();
        let mut names: Vec<String> = prices.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.prices.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_models() {
        let table = PricingTable::with_defaults();
        assert!(table.len() >= 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn known_model_cost() {
        let table = PricingTable::with_defaults();

        // Sonnet: $3/M input, $15/M output
        let cost = table.compute_cost("claude-sonnet-4-20250514", 1000, 500);
        // (1000 * 3.0 + 500 * 15.0) / 1M = 0.0105
        assert!((cost - 0.0105).abs() < 1e-10);
    }

    #[test]
    fn unknown_model_returns_zero() {
        let table = PricingTable::with_defaults();
        let cost = table.compute_cost("mystery-model-9000", 1000, 500);
        assert!((cost - 0.0).abs() < 1e-10);
    }

    #[test]
    fn prefix_match_resolves_dated_variants() {
        let table = PricingTable::empty();
        table.set("claude-sonnet-4", ModelPricing::new(3.0, 15.0));
        let cost = table.compute_cost("claude-sonnet-4-20250514", 1_000_000, 0);
        assert!((cost - 3.0).abs() < 1e-10);
    }

    #[test]
    fn economy_model_is_free() {
        let table = PricingTable::with_defaults();
        let cost = table.compute_cost("glm-4-flash", 1_000_000, 1_000_000);
        assert!((cost - 0.0).abs() < 1e-10);
    }

    #[test]
    fn custom_pricing_overrides() {
        let table = PricingTable::with_defaults();
        table.set("glm-4-flash", ModelPricing::new(0.1, 0.1));
        let cost = table.compute_cost("glm-4-flash", 1_000_000, 1_000_000);
        assert!((cost - 0.2).abs() < 1e-10);
    }

    #[test]
    fn list_models_sorted() {
        let table = PricingTable::with_defaults();
        let models = table.models();
        assert!(models.iter().any(|m| m.contains("claude")));
        assert!(models.windows(2).all(|w| w[0] <= w[1]));
    }
}
