//! JSON forms for creating and editing a single client.

use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientId, Objective, PhoneNumber, RiskLevel};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for adding a client.
pub struct AddClientForm {
    /// Optional explicit identifier; synthesized when absent.
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub last_name: String,
    pub investment_manager: Option<String>,
    #[serde(default)]
    pub knowledge_experience: RiskLevel,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub loss_pct: i32,
    #[serde(default)]
    pub account_number: String,
    pub account_type: Option<String>,
    pub salutation: Option<String>,
    #[serde(default)]
    pub objective: Objective,
    #[serde(default)]
    pub risk: RiskLevel,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub power_of_attorney: Option<bool>,
    pub annual_review_date: Option<String>,
    pub fees_commission_rate: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for updating an existing client. Absent fields stay untouched.
pub struct SaveClientForm {
    #[validate(length(max = 128))]
    pub first_name: Option<String>,
    #[validate(length(max = 128))]
    pub last_name: Option<String>,
    pub investment_manager: Option<String>,
    pub knowledge_experience: Option<RiskLevel>,
    #[validate(range(min = 0, max = 100))]
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

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalizes an optional email; blank input means "no email".
pub(crate) fn parse_email(value: Option<String>) -> Result<Option<String>, FormError> {
    non_blank(value)
        .map(|email| {
            ClientEmail::new(email)
                .map(ClientEmail::into_inner)
                .map_err(|_| FormError::InvalidEmail)
        })
        .transpose()
}

/// Normalizes an optional phone number to E.164.
pub(crate) fn parse_phone(value: Option<String>) -> Result<Option<String>, FormError> {
    non_blank(value)
        .map(|phone| {
            PhoneNumber::new(phone)
                .map(PhoneNumber::into_inner)
                .map_err(|_| FormError::InvalidPhoneNumber)
        })
        .transpose()
}

impl TryFrom<AddClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: AddClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        if form.first_name.trim().is_empty() && form.last_name.trim().is_empty() {
            return Err(FormError::InvalidName);
        }

        let id = match non_blank(form.id) {
            Some(id) => ClientId::new(id).map_err(|_| FormError::InvalidClientId)?,
            None => ClientId::synthesize(Utc::now(), None),
        };

        let mut client = NewClient::new(id, &form.first_name, &form.last_name);
        client.investment_manager = non_blank(form.investment_manager);
        client.knowledge_experience = form.knowledge_experience;
        client.loss_pct = form.loss_pct;
        client.account_number = form.account_number.trim().to_string();
        client.account_type = non_blank(form.account_type);
        client.salutation = non_blank(form.salutation);
        client.objective = form.objective;
        client.risk = form.risk;
        client.email = parse_email(form.email)?;
        client.phone = parse_phone(form.phone)?;
        client.address = non_blank(form.address);
        client.power_of_attorney = form.power_of_attorney;
        client.annual_review_date = non_blank(form.annual_review_date);
        client.fees_commission_rate = non_blank(form.fees_commission_rate);
        Ok(client)
    }
}

impl TryFrom<SaveClientForm> for UpdateClient {
    type Error = FormError;

    fn try_from(form: SaveClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let first_blank = form.first_name.as_deref().is_some_and(|n| n.trim().is_empty());
        let last_blank = form.last_name.as_deref().is_some_and(|n| n.trim().is_empty());
        if first_blank && last_blank {
            return Err(FormError::InvalidName);
        }

        // Blank strings are kept so the store clears the column.
        let email = match form.email {
            Some(email) if email.trim().is_empty() => Some(String::new()),
            other => parse_email(other)?,
        };
        let phone = match form.phone {
            Some(phone) if phone.trim().is_empty() => Some(String::new()),
            other => parse_phone(other)?,
        };

        Ok(UpdateClient {
            first_name: form.first_name,
            last_name: form.last_name,
            investment_manager: form.investment_manager,
            knowledge_experience: form.knowledge_experience,
            loss_pct: form.loss_pct,
            account_number: form.account_number,
            account_type: form.account_type,
            salutation: form.salutation,
            objective: form.objective,
            risk: form.risk,
            email,
            phone,
            address: form.address,
            power_of_attorney: form.power_of_attorney,
            annual_review_date: form.annual_review_date,
            fees_commission_rate: form.fees_commission_rate,
        })
    }
}
