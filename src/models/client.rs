use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
    nullable_update,
};
use crate::domain::types::{ClientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub investment_manager: Option<String>,
    pub knowledge_experience: String,
    pub loss_pct: i32,
    pub account_number: String,
    pub account_type: Option<String>,
    pub salutation: Option<String>,
    pub objective: String,
    pub risk: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<String>,
    pub fees_commission_rate: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub investment_manager: Option<&'a str>,
    pub knowledge_experience: &'a str,
    pub loss_pct: i32,
    pub account_number: &'a str,
    pub account_type: Option<&'a str>,
    pub salutation: Option<&'a str>,
    pub objective: &'a str,
    pub risk: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<&'a str>,
    pub fees_commission_rate: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
///
/// Outer `None` skips a column; `Some(None)` writes `NULL`.
pub struct UpdateClient<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub investment_manager: Option<Option<&'a str>>,
    pub knowledge_experience: Option<&'static str>,
    pub loss_pct: Option<i32>,
    pub account_number: Option<&'a str>,
    pub account_type: Option<Option<&'a str>>,
    pub salutation: Option<Option<&'a str>>,
    pub objective: Option<&'static str>,
    pub risk: Option<&'static str>,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<Option<&'a str>>,
    pub address: Option<Option<&'a str>>,
    pub power_of_attorney: Option<Option<bool>>,
    pub annual_review_date: Option<Option<&'a str>>,
    pub fees_commission_rate: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            first_name: client.first_name,
            last_name: client.last_name,
            investment_manager: client.investment_manager,
            knowledge_experience: client.knowledge_experience.parse()?,
            loss_pct: client.loss_pct,
            account_number: client.account_number,
            account_type: client.account_type,
            salutation: client.salutation,
            objective: client.objective.parse()?,
            risk: client.risk.parse()?,
            email: client.email,
            phone: client.phone,
            address: client.address,
            power_of_attorney: client.power_of_attorney,
            annual_review_date: client.annual_review_date,
            fees_commission_rate: client.fees_commission_rate,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            id: client.id.as_str(),
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            investment_manager: client.investment_manager.as_deref(),
            knowledge_experience: client.knowledge_experience.as_str(),
            loss_pct: client.loss_pct,
            account_number: client.account_number.as_str(),
            account_type: client.account_type.as_deref(),
            salutation: client.salutation.as_deref(),
            objective: client.objective.as_str(),
            risk: client.risk.as_str(),
            email: client.email.as_deref(),
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
            power_of_attorney: client.power_of_attorney,
            annual_review_date: client.annual_review_date.as_deref(),
            fees_commission_rate: client.fees_commission_rate.as_deref(),
        }
    }
}

impl<'a> UpdateClient<'a> {
    /// Builds the changeset for `updates`, stamping `updated_at`.
    pub fn from_domain(updates: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            first_name: updates.first_name.as_deref().map(str::trim),
            last_name: updates.last_name.as_deref().map(str::trim),
            investment_manager: nullable_update(&updates.investment_manager),
            knowledge_experience: updates.knowledge_experience.map(|k| k.as_str()),
            loss_pct: updates.loss_pct,
            account_number: updates.account_number.as_deref().map(str::trim),
            account_type: nullable_update(&updates.account_type),
            salutation: nullable_update(&updates.salutation),
            objective: updates.objective.map(|o| o.as_str()),
            risk: updates.risk.map(|r| r.as_str()),
            email: nullable_update(&updates.email),
            phone: nullable_update(&updates.phone),
            address: nullable_update(&updates.address),
            power_of_attorney: updates.power_of_attorney.map(Some),
            annual_review_date: nullable_update(&updates.annual_review_date),
            fees_commission_rate: nullable_update(&updates.fees_commission_rate),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Objective, RiskLevel};

    fn sample_domain_new() -> DomainNewClient {
        let mut client = DomainNewClient::new(ClientId::new("c1").unwrap(), "John", "Smith");
        client.email = Some("john@example.com".to_string());
        client.objective = Objective::CapitalGrowth;
        client
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = sample_domain_new();
        let new: NewClient = (&domain).into();
        assert_eq!(new.id, "c1");
        assert_eq!(new.first_name, domain.first_name);
        assert_eq!(new.email, domain.email.as_deref());
        assert_eq!(new.objective, "Capital Growth");
        assert_eq!(new.knowledge_experience, "Medium");
    }

    #[test]
    fn from_domain_update_maps_blank_to_null() {
        let domain = DomainUpdateClient {
            last_name: Some(" Smythe ".to_string()),
            salutation: Some(String::new()),
            risk: Some(RiskLevel::Low),
            ..DomainUpdateClient::default()
        };
        let now = Utc::now().naive_utc();
        let update = UpdateClient::from_domain(&domain, now);
        assert_eq!(update.last_name, Some("Smythe"));
        assert_eq!(update.salutation, Some(None));
        assert_eq!(update.email, None);
        assert_eq!(update.risk, Some("Low"));
        assert_eq!(update.updated_at, now);
    }

    #[test]
    fn client_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: "c2".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            investment_manager: Some("John Smith".to_string()),
            knowledge_experience: "High".to_string(),
            loss_pct: 25,
            account_number: "AC-100002".to_string(),
            account_type: None,
            salutation: None,
            objective: "Balanced".to_string(),
            risk: "Low".to_string(),
            email: None,
            phone: None,
            address: None,
            power_of_attorney: Some(false),
            annual_review_date: None,
            fees_commission_rate: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainClient::try_from(db_client).unwrap();
        assert_eq!(domain.id.as_str(), "c2");
        assert_eq!(domain.objective, Objective::Balance);
        assert_eq!(domain.knowledge_experience, RiskLevel::High);
        assert_eq!(domain.loss_pct, 25);
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn client_with_unknown_risk_is_rejected() {
        let now = Utc::now().naive_utc();
        let mut db_client = Client {
            id: "c3".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            investment_manager: None,
            knowledge_experience: "Medium".to_string(),
            loss_pct: 0,
            account_number: String::new(),
            account_type: None,
            salutation: None,
            objective: "Income".to_string(),
            risk: "Medium".to_string(),
            email: None,
            phone: None,
            address: None,
            power_of_attorney: None,
            annual_review_date: None,
            fees_commission_rate: None,
            created_at: now,
            updated_at: now,
        };
        db_client.risk = "Extreme".to_string();
        assert!(DomainClient::try_from(db_client).is_err());
    }
}
