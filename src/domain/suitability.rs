//! Structured state behind a suitability letter.

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::{AccountType, AssetType, ClientId, Objective, RiskLevel, TradeSide};

/// Number of free-text rationale slots per trade.
pub const REASON_SLOTS: usize = 3;

/// One proposed transaction on the letter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Trade {
    pub asset_name: String,
    pub account_type: AccountType,
    pub asset_type: AssetType,
    pub asset_risk: RiskLevel,
    pub side: TradeSide,
    /// Free text: a number (optionally with currency symbols) or `Sell All`.
    pub quantity: String,
    /// `DD/MM/YYYY`.
    pub date_of_trade: String,
    /// `HH:MM`.
    pub time_of_trade: String,
    pub reasons: [String; REASON_SLOTS],
}

impl Trade {
    /// Reasons with blank slots dropped.
    pub fn filled_reasons(&self) -> impl Iterator<Item = &str> {
        self.reasons
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
    }

    /// Column label for the amount: shares are counted on sales, cash otherwise.
    pub fn quantity_label(&self) -> &'static str {
        if self.side == TradeSide::Sell {
            "Quantity"
        } else {
            "Amount"
        }
    }
}

/// Client reference, denormalized client attributes and the ordered trades.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SuitabilityFormState {
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub investment_manager: String,
    pub knowledge_experience: RiskLevel,
    pub capacity_of_loss: String,
    pub account_number: String,
    pub salutation: String,
    pub objective: Objective,
    pub risk: RiskLevel,
    pub trades: Vec<Trade>,
}

impl Default for SuitabilityFormState {
    fn default() -> Self {
        Self {
            client_id: None,
            client_name: String::new(),
            investment_manager: String::new(),
            knowledge_experience: RiskLevel::Medium,
            capacity_of_loss: String::new(),
            account_number: String::new(),
            salutation: String::new(),
            objective: Objective::Balance,
            risk: RiskLevel::Medium,
            trades: vec![Trade::default()],
        }
    }
}

impl SuitabilityFormState {
    /// Copies the selected client's attributes onto the form.
    ///
    /// Manager and salutation keep their typed values when the record has none.
    pub fn apply_client(&mut self, client: &Client) {
        self.client_id = Some(client.id.clone());
        self.client_name = client.full_name();
        if let Some(manager) = &client.investment_manager {
            self.investment_manager = manager.clone();
        }
        self.knowledge_experience = client.knowledge_experience;
        self.capacity_of_loss = format!("{}%", client.loss_pct);
        self.account_number = client.account_number.clone();
        if let Some(salutation) = &client.salutation {
            self.salutation = salutation.clone();
        }
        self.objective = client.objective;
        self.risk = client.risk;
    }

    /// Side of the first trade; it labels the whole letter.
    pub fn recommendation(&self) -> Option<TradeSide> {
        self.trades.first().map(|t| t.side)
    }

    /// Asset names that were filled in, in trade order.
    pub fn asset_names(&self) -> Vec<&str> {
        self.trades
            .iter()
            .map(|t| t.asset_name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Per-field messages for the client section; `None` means valid.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientErrors {
    pub client: Option<String>,
    pub investment_manager: Option<String>,
    pub capacity_of_loss: Option<String>,
    pub account_number: Option<String>,
    pub salutation: Option<String>,
}

impl ClientErrors {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Per-field messages for one trade.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeErrors {
    pub asset_name: Option<String>,
    pub quantity: Option<String>,
    pub date_of_trade: Option<String>,
    pub time_of_trade: Option<String>,
    pub reasons: Option<String>,
}

impl TradeErrors {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Full error tree: always one [`TradeErrors`] per trade, in trade order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    pub client: ClientErrors,
    pub trades: Vec<TradeErrors>,
}

impl FormErrors {
    /// Empty tree shaped for `trade_count` trades.
    pub fn empty(trade_count: usize) -> Self {
        Self {
            client: ClientErrors::default(),
            trades: vec![TradeErrors::default(); trade_count],
        }
    }

    /// Index of the first trade carrying a message.
    pub fn first_trade_with_error(&self) -> Option<usize> {
        self.trades.iter().position(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::client::NewClient;

    #[test]
    fn default_form_has_one_blank_trade() {
        let form = SuitabilityFormState::default();
        assert_eq!(form.trades.len(), 1);
        assert_eq!(form.trades[0], Trade::default());
        assert_eq!(form.trades[0].account_type, AccountType::Isa);
        assert_eq!(form.recommendation(), Some(TradeSide::Buy));
    }

    #[test]
    fn apply_client_denormalizes_attributes() {
        let mut new = NewClient::new(ClientId::new("c9").unwrap(), "Jane", "Doe");
        new.loss_pct = 15;
        new.account_number = "AC-100009".to_string();
        new.objective = Objective::Income;
        new.risk = RiskLevel::High;
        let client = new.into_client(Utc::now().naive_utc());

        let mut form = SuitabilityFormState {
            salutation: "Jane".to_string(),
            ..SuitabilityFormState::default()
        };
        form.apply_client(&client);

        assert_eq!(form.client_id.as_ref().map(|id| id.as_str()), Some("c9"));
        assert_eq!(form.client_name, "Jane Doe");
        assert_eq!(form.capacity_of_loss, "15%");
        assert_eq!(form.salutation, "Jane");
        assert_eq!(form.objective, Objective::Income);
        assert_eq!(form.risk, RiskLevel::High);
    }

    #[test]
    fn form_deserializes_from_partial_json() {
        let form: SuitabilityFormState = serde_json::from_str(
            r#"{"clientName":"Jane Doe","trades":[{"assetName":"Acme Corp","side":"Sell","reasons":["a","",""]}]}"#,
        )
        .unwrap();
        assert_eq!(form.trades.len(), 1);
        assert_eq!(form.trades[0].side, TradeSide::Sell);
        assert_eq!(form.trades[0].quantity_label(), "Quantity");
        assert_eq!(form.trades[0].filled_reasons().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn error_tree_serializes_camel_case_nulls() {
        let mut errors = FormErrors::empty(2);
        errors.trades[1].date_of_trade = Some("Date is required".to_string());
        let value = serde_json::to_value(&errors).unwrap();
        assert!(value["client"]["capacityOfLoss"].is_null());
        assert_eq!(value["trades"][1]["dateOfTrade"], "Date is required");
        assert_eq!(errors.first_trade_with_error(), Some(1));
    }
}
