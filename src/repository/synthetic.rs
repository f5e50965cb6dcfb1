//! Deterministic demo dataset.
//!
//! Objective cycles with `i % 3` and risk with `(i / 3) % 3`, so the first
//! nine records cover every objective/risk pair.

use crate::domain::client::NewClient;
use crate::domain::types::{ClientId, Objective, RiskLevel};

pub const SYNTHETIC_CLIENT_COUNT: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Oliver", "Amelia", "George", "Isla", "Harry", "Ava", "Jack", "Mia", "Charlie", "Sophia",
    "Thomas", "Grace",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Johnson", "Davies", "Patel",
    "Wright", "Walker", "Evans", "Roberts",
];

const MANAGERS: &[&str] = &["James Whitfield", "Sarah Collins", "Daniel Hughes", "Emma Clarke"];

const SALUTATIONS: &[&str] = &["Mr", "Mrs", "Ms", "Dr"];

const CAPACITY_OF_LOSS: &[i32] = &[5, 10, 15, 20, 25, 30];

const OBJECTIVES: [Objective; 3] = [Objective::Balance, Objective::CapitalGrowth, Objective::Income];

const RISKS: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

/// Builds the demo record at position `i`.
pub fn synthetic_client(i: usize) -> NewClient {
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[i % LAST_NAMES.len()];

    let mut client = NewClient::new(ClientId::numbered(i), first, last);
    client.investment_manager = Some(MANAGERS[i % MANAGERS.len()].to_string());
    client.knowledge_experience = RISKS[i % RISKS.len()];
    client.loss_pct = CAPACITY_OF_LOSS[i % CAPACITY_OF_LOSS.len()];
    client.account_number = format!("AC-{}", 100_000 + i);
    client.salutation = Some(format!("{} {last}", SALUTATIONS[i % SALUTATIONS.len()]));
    client.objective = OBJECTIVES[i % OBJECTIVES.len()];
    client.risk = RISKS[(i / 3) % RISKS.len()];
    client.email = Some(format!("client{i}@example.com"));
    client.phone = Some(format!("+44 20 7946 {}", 1000 + i));
    client.address = Some(format!("{i} High Street, London"));
    client
}

/// The full demo dataset in generation order.
pub fn synthetic_clients() -> Vec<NewClient> {
    (0..SYNTHETIC_CLIENT_COUNT).map(synthetic_client).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn first_nine_cover_every_objective_and_risk_pair() {
        let pairs: HashSet<_> = synthetic_clients()
            .iter()
            .take(9)
            .map(|c| (c.objective, c.risk))
            .collect();
        assert_eq!(pairs.len(), 9);
    }

    #[test]
    fn identifiers_and_accounts_follow_the_index() {
        let client = synthetic_client(42);
        assert_eq!(client.id.as_str(), "c42");
        assert_eq!(client.account_number, "AC-100042");
        assert_eq!(client.phone.as_deref(), Some("+44 20 7946 1042"));
        assert_eq!(client.address.as_deref(), Some("42 High Street, London"));
    }

    #[test]
    fn dataset_has_unique_ids() {
        let ids: HashSet<_> = synthetic_clients().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), SYNTHETIC_CLIENT_COUNT);
    }
}
