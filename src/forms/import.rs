//! Header-driven CSV import of client records.
//!
//! Recognized headers are the camelCase client attribute names
//! (`firstName`, `lossPct`, ...); other columns are ignored. Every data row
//! either becomes a [`NewClient`] or contributes [`RowError`]s, and a single
//! bad row rejects the whole file.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::client::NewClient;
use crate::domain::types::{ClientEmail, ClientId, PhoneNumber};
use crate::forms::{FormError, RowError};

#[derive(MultipartForm)]
pub struct ImportClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl ImportClientsForm {
    /// Reads the uploaded file and parses it. See [`parse_clients_csv`].
    pub fn parse(&self, now: DateTime<Utc>) -> Result<Vec<NewClient>, FormError> {
        let data = std::fs::read(self.csv.file.path())?;
        parse_clients_csv(&data, now)
    }
}

/// One data row keyed by header name, blank cells omitted.
struct Row<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> Row<'a> {
    fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.trim(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { cells }
    }

    fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    fn text(&self, header: &str) -> Option<String> {
        self.cells.get(header).map(|v| v.to_string())
    }

    fn parsed<T>(&self, header: &str, errors: &mut Vec<String>) -> T
    where
        T: FromStr + Default,
        T::Err: std::fmt::Display,
    {
        match self.cells.get(header) {
            None => T::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                errors.push(format!("{header}: {err}"));
                T::default()
            }),
        }
    }
}

fn parse_loss_pct(raw: &str) -> Option<i32> {
    raw.trim_end_matches('%').trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_row(row: &Row<'_>, row_number: usize, now: DateTime<Utc>) -> Result<NewClient, Vec<String>> {
    let mut errors = Vec::new();

    let id = match row.text("id") {
        Some(id) => ClientId::new(id).unwrap_or_else(|_| ClientId::synthesize(now, Some(row_number))),
        None => ClientId::synthesize(now, Some(row_number)),
    };

    let first_name = row.text("firstName").unwrap_or_default();
    let last_name = row.text("lastName").unwrap_or_default();
    if first_name.is_empty() && last_name.is_empty() {
        errors.push("firstName or lastName is required".to_string());
    }

    let mut client = NewClient::new(id, &first_name, &last_name);
    client.investment_manager = row.text("investmentManager");
    client.knowledge_experience = row.parsed("knowledgeExperience", &mut errors);
    client.objective = row.parsed("objective", &mut errors);
    client.risk = row.parsed("risk", &mut errors);
    client.account_number = row.text("accountNumber").unwrap_or_default();
    client.account_type = row.text("accountType");
    client.salutation = row.text("salutation");
    client.address = row.text("address");
    client.annual_review_date = row.text("annualReviewDate");
    client.fees_commission_rate = row.text("feesCommissionRate");

    if let Some(raw) = row.text("lossPct") {
        match parse_loss_pct(&raw) {
            Some(value) => client.loss_pct = value,
            None => errors.push(format!("lossPct: '{raw}' is not a whole number")),
        }
    }

    if let Some(raw) = row.text("powerOfAttorney") {
        match parse_flag(&raw) {
            Some(value) => client.power_of_attorney = Some(value),
            None => errors.push(format!("powerOfAttorney: '{raw}' is not yes or no")),
        }
    }

    if let Some(raw) = row.text("email") {
        match ClientEmail::new(raw.as_str()) {
            Ok(email) => client.email = Some(email.into_inner()),
            Err(err) => errors.push(format!("email: {err}")),
        }
    }

    if let Some(raw) = row.text("phone") {
        match PhoneNumber::new(raw.as_str()) {
            Ok(phone) => client.phone = Some(phone.into_inner()),
            Err(err) => errors.push(format!("phone: {err}")),
        }
    }

    if errors.is_empty() {
        Ok(client)
    } else {
        Err(errors)
    }
}

/// Parses a CSV document into client records.
///
/// Identifiers missing from the file are synthesized from `now` and the row
/// number. Fails with [`FormError::Rows`] listing every bad row, or with
/// [`FormError::NoClients`] when the file holds no data rows.
pub fn parse_clients_csv(data: &[u8], now: DateTime<Utc>) -> Result<Vec<NewClient>, FormError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);
    let headers = reader.headers()?.clone();

    let mut clients = Vec::new();
    let mut row_errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, record) in reader.records().enumerate() {
        let row_number = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                row_errors.push(RowError {
                    row: row_number,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let row = Row::new(&headers, &record);
        if row.is_blank() {
            continue;
        }

        match parse_row(&row, row_number, now) {
            Ok(client) if !seen_ids.insert(client.id.clone()) => row_errors.push(RowError {
                row: row_number,
                message: format!("id: duplicate id '{}'", client.id),
            }),
            Ok(client) => clients.push(client),
            Err(messages) => row_errors.extend(messages.into_iter().map(|message| RowError {
                row: row_number,
                message,
            })),
        }
    }

    if !row_errors.is_empty() {
        return Err(FormError::Rows(row_errors));
    }
    if clients.is_empty() {
        return Err(FormError::NoClients);
    }

    Ok(clients)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::types::{Objective, RiskLevel};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_rows_with_defaults() {
        let csv = "firstName,lastName,lossPct,objective,risk,favouriteColour\n\
                   Jane,Doe,20%,Growth,High,blue\n\
                   John,Smith,,,,\n";
        let clients = parse_clients_csv(csv.as_bytes(), now()).unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].loss_pct, 20);
        assert_eq!(clients[0].objective, Objective::CapitalGrowth);
        assert_eq!(clients[0].risk, RiskLevel::High);
        assert_eq!(clients[1].loss_pct, 0);
        assert_eq!(clients[1].objective, Objective::Balance);
        assert_eq!(clients[1].risk, RiskLevel::Medium);
        assert_eq!(clients[0].id.as_str(), "c1736121600000-1");
        assert_eq!(clients[1].id.as_str(), "c1736121600000-2");
    }

    #[test]
    fn explicit_ids_are_kept() {
        let csv = "id,firstName,email\nc7,Jane,JANE@example.com\n";
        let clients = parse_clients_csv(csv.as_bytes(), now()).unwrap();
        assert_eq!(clients[0].id.as_str(), "c7");
        assert_eq!(clients[0].email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn header_only_file_has_no_clients() {
        let csv = "firstName,lastName,lossPct,objective,risk\n";
        assert!(matches!(
            parse_clients_csv(csv.as_bytes(), now()),
            Err(FormError::NoClients)
        ));
    }

    #[test]
    fn bad_rows_reject_the_whole_file() {
        let csv = "firstName,lastName,lossPct,risk\n\
                   Jane,Doe,ten,High\n\
                   John,Smith,5,Extreme\n\
                   ,,,\n\
                   Ann,Lee,5,Low\n";
        let Err(FormError::Rows(errors)) = parse_clients_csv(csv.as_bytes(), now()) else {
            panic!("expected row errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].row, 1);
        assert!(errors[0].message.starts_with("lossPct"));
        assert_eq!(errors[1].row, 2);
        assert!(errors[1].message.starts_with("risk"));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let csv = "id,firstName\nc1,Jane\nc1,John\n";
        let Err(FormError::Rows(errors)) = parse_clients_csv(csv.as_bytes(), now()) else {
            panic!("expected row errors");
        };
        assert_eq!(errors, vec![RowError {
            row: 2,
            message: "id: duplicate id 'c1'".to_string()
        }]);
    }

    #[test]
    fn rows_need_a_name() {
        let csv = "firstName,lastName,accountNumber\n,,AC-1\n";
        let Err(FormError::Rows(errors)) = parse_clients_csv(csv.as_bytes(), now()) else {
            panic!("expected row errors");
        };
        assert_eq!(errors[0].message, "firstName or lastName is required");
    }
}
