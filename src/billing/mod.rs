// Billing module - placeholder for a real payment gateway integration
// (Stripe, Mercado Pago). Plans are real data, checkout is not.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    /// Price in centavos.
    pub price_cents: u64,
}

impl Plan {
    pub fn price_label(&self) -> String {
        format!("R$ {},{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

#[derive(Debug, Clone)]
pub struct BillingGateway {
    plans: Vec<Plan>,
}

impl BillingGateway {
    pub fn new() -> Self {
        Self {
            plans: vec![
                Plan { name: "Mensal".to_string(), price_cents: 2990 },
                Plan { name: "Anual".to_string(), price_cents: 29900 },
            ],
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub async fn start_checkout(&self, plan: &Plan) -> Result<String> {
        // TODO: call the real gateway once one is picked
        Ok(format!("checkout-demo-{}", plan.name.to_lowercase()))
    }
}

impl Default for BillingGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_match_the_demo_pricing() {
        let gateway = BillingGateway::new();
        let labels: Vec<String> = gateway
            .plans()
            .iter()
            .map(|p| format!("{} – {}", p.name, p.price_label()))
            .collect();
        assert_eq!(labels, vec!["Mensal – R$ 29,90", "Anual – R$ 299,00"]);
    }
}
