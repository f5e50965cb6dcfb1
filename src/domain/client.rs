use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, Objective, RiskLevel};

/// Client record as seen by the application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub investment_manager: Option<String>,
    pub knowledge_experience: RiskLevel,
    /// Capacity for loss as a whole percentage of the portfolio.
    pub loss_pct: i32,
    pub account_number: String,
    pub account_type: Option<String>,
    pub salutation: Option<String>,
    pub objective: Objective,
    pub risk: RiskLevel,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<String>,
    pub fees_commission_rate: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// `"First Last"`, trimmed when one part is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Substring match used by store searches. Case folding is ASCII-only,
    /// the same as SQLite `LIKE`.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.full_name().as_str(),
            self.account_number.as_str(),
        ]
        .iter()
        .any(|field| field.to_ascii_lowercase().contains(&needle))
    }
}

/// List payload returned by store reads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientList {
    pub items: Vec<Client>,
    pub total: usize,
}

impl From<Vec<Client>> for ClientList {
    fn from(items: Vec<Client>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub investment_manager: Option<String>,
    pub knowledge_experience: RiskLevel,
    pub loss_pct: i32,
    pub account_number: String,
    pub account_type: Option<String>,
    pub salutation: Option<String>,
    pub objective: Objective,
    pub risk: RiskLevel,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<String>,
    pub fees_commission_rate: Option<String>,
}

impl NewClient {
    /// Minimal record with every optional attribute unset.
    #[must_use]
    pub fn new(id: ClientId, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            investment_manager: None,
            knowledge_experience: RiskLevel::default(),
            loss_pct: 0,
            account_number: String::new(),
            account_type: None,
            salutation: None,
            objective: Objective::default(),
            risk: RiskLevel::default(),
            email: None,
            phone: None,
            address: None,
            power_of_attorney: None,
            annual_review_date: None,
            fees_commission_rate: None,
        }
    }

    /// Materializes the record with both timestamps set to `at`.
    pub fn into_client(self, at: NaiveDateTime) -> Client {
        Client {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            investment_manager: self.investment_manager,
            knowledge_experience: self.knowledge_experience,
            loss_pct: self.loss_pct,
            account_number: self.account_number,
            account_type: self.account_type,
            salutation: self.salutation,
            objective: self.objective,
            risk: self.risk,
            email: self.email,
            phone: self.phone,
            address: self.address,
            power_of_attorney: self.power_of_attorney,
            annual_review_date: self.annual_review_date,
            fees_commission_rate: self.fees_commission_rate,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Partial update. `None` leaves an attribute untouched; for nullable
/// attributes `Some("")` clears the stored value.
#[derive(Clone, Debug, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub investment_manager: Option<String>,
    pub knowledge_experience: Option<RiskLevel>,
    pub loss_pct: Option<i32>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub salutation: Option<String>,
    pub objective: Option<Objective>,
    pub risk: Option<RiskLevel>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<String>,
    pub fees_commission_rate: Option<String>,
}

/// Maps an update value for a nullable column: blank clears it.
pub(crate) fn nullable_update(value: &Option<String>) -> Option<Option<&str>> {
    value.as_deref().map(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

impl UpdateClient {
    /// True when no attribute would change.
    pub fn is_empty(&self) -> bool {
        self == &UpdateClient::default()
    }

    /// Applies the update to an in-memory record.
    pub fn apply_to(&self, client: &mut Client, at: NaiveDateTime) {
        fn set_nullable(target: &mut Option<String>, value: &Option<String>) {
            if let Some(update) = nullable_update(value) {
                *target = update.map(str::to_string);
            }
        }

        if let Some(first_name) = &self.first_name {
            client.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = &self.last_name {
            client.last_name = last_name.trim().to_string();
        }
        set_nullable(&mut client.investment_manager, &self.investment_manager);
        if let Some(knowledge) = self.knowledge_experience {
            client.knowledge_experience = knowledge;
        }
        if let Some(loss_pct) = self.loss_pct {
            client.loss_pct = loss_pct;
        }
        if let Some(account_number) = &self.account_number {
            client.account_number = account_number.trim().to_string();
        }
        set_nullable(&mut client.account_type, &self.account_type);
        set_nullable(&mut client.salutation, &self.salutation);
        if let Some(objective) = self.objective {
            client.objective = objective;
        }
        if let Some(risk) = self.risk {
            client.risk = risk;
        }
        set_nullable(&mut client.email, &self.email);
        set_nullable(&mut client.phone, &self.phone);
        set_nullable(&mut client.address, &self.address);
        if let Some(power_of_attorney) = self.power_of_attorney {
            client.power_of_attorney = Some(power_of_attorney);
        }
        set_nullable(&mut client.annual_review_date, &self.annual_review_date);
        set_nullable(&mut client.fees_commission_rate, &self.fees_commission_rate);
        client.updated_at = at;
    }
}
