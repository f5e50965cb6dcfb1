//! Suitability letter validation and the editing workspace around it.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::client::Client;
use crate::domain::suitability::{
    ClientErrors, FormErrors, SuitabilityFormState, Trade, TradeErrors,
};

static CAPACITY_OF_LOSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+%?$").expect("valid capacity regex"));
static QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(([0-9,]+(\.[0-9]+)?)|Sell All)$").expect("valid quantity regex"));
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid date regex")
});
static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("valid time regex"));

fn required(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

fn validate_client(form: &SuitabilityFormState) -> ClientErrors {
    let capacity = form.capacity_of_loss.trim();
    let capacity_of_loss = if capacity.is_empty() {
        Some("Capacity of loss is required".to_string())
    } else if !CAPACITY_OF_LOSS.is_match(capacity) {
        Some("Must be a number (e.g. 10 or 10%)".to_string())
    } else {
        None
    };

    ClientErrors {
        client: form
            .client_id
            .is_none()
            .then(|| "Please select a client".to_string()),
        investment_manager: required(&form.investment_manager, "Investment manager is required"),
        capacity_of_loss,
        account_number: required(&form.account_number, "Account number is required"),
        salutation: required(&form.salutation, "Salutation is required"),
    }
}

fn validate_quantity(raw: &str) -> Option<String> {
    let quantity = raw.trim();
    if quantity.is_empty() {
        return Some("Quantity/Amount is required".to_string());
    }
    let stripped: String = quantity.chars().filter(|c| !matches!(c, '£' | '$' | '€')).collect();
    (!QUANTITY.is_match(&stripped)).then(|| "Must be a valid number or Sell All".to_string())
}

fn validate_date(raw: &str) -> Option<String> {
    let date = raw.trim();
    if date.is_empty() {
        return Some("Date is required".to_string());
    }
    let Some(caps) = DATE.captures(date) else {
        return Some("Format: DD/MM/YYYY".to_string());
    };
    let part = |i: usize| caps[i].parse::<u32>().unwrap_or(0);
    let (day, month, year) = (part(1), part(2), part(3));

    // No day-in-month check: 31/02 passes.
    if !(1..=31).contains(&day) {
        Some("Day must be 01-31".to_string())
    } else if !(1..=12).contains(&month) {
        Some("Month must be 01-12".to_string())
    } else if !(2000..=2100).contains(&year) {
        Some("Year must be 2000-2100".to_string())
    } else {
        None
    }
}

fn validate_time(raw: &str) -> Option<String> {
    let time = raw.trim();
    if time.is_empty() {
        Some("Time is required".to_string())
    } else if !TIME.is_match(time) {
        Some("Format: HH:MM".to_string())
    } else {
        None
    }
}

fn validate_trade(trade: &Trade) -> TradeErrors {
    TradeErrors {
        asset_name: required(&trade.asset_name, "Asset name is required"),
        quantity: validate_quantity(&trade.quantity),
        date_of_trade: validate_date(&trade.date_of_trade),
        time_of_trade: validate_time(&trade.time_of_trade),
        reasons: trade
            .filled_reasons()
            .next()
            .is_none()
            .then(|| "At least one reason is required".to_string()),
    }
}

/// Validates every field and returns the full error tree.
pub fn validate_form(form: &SuitabilityFormState) -> FormErrors {
    FormErrors {
        client: validate_client(form),
        trades: form.trades.iter().map(validate_trade).collect(),
    }
}

/// True when any client or trade field carries a message.
pub fn has_errors(errors: &FormErrors) -> bool {
    !errors.client.is_empty() || errors.first_trade_with_error().is_some()
}

/// Editing state for one letter: the form, its last validation and the
/// trade page being shown. One trade per page, pages are 1-based.
#[derive(Clone, Debug)]
pub struct SuitabilityWorkspace {
    form: SuitabilityFormState,
    errors: FormErrors,
    show_errors: bool,
    page: usize,
}

impl Default for SuitabilityWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl SuitabilityWorkspace {
    pub fn new() -> Self {
        Self::from_form(SuitabilityFormState::default())
    }

    /// Wraps an existing form. A form without trades gets one blank trade.
    pub fn from_form(mut form: SuitabilityFormState) -> Self {
        if form.trades.is_empty() {
            form.trades.push(Trade::default());
        }
        let errors = FormErrors::empty(form.trades.len());
        Self {
            form,
            errors,
            show_errors: false,
            page: 1,
        }
    }

    pub fn form(&self) -> &SuitabilityFormState {
        &self.form
    }

    pub fn into_form(self) -> SuitabilityFormState {
        self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.form.trades.len().max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// The trade shown on the current page.
    pub fn current_trade(&self) -> Option<&Trade> {
        self.form.trades.get(self.page - 1)
    }

    pub fn select_client(&mut self, client: &Client) {
        self.form.apply_client(client);
    }

    /// Appends a blank trade and shows it.
    pub fn add_trade(&mut self) {
        self.form.trades.push(Trade::default());
        self.errors.trades.push(TradeErrors::default());
        self.page = self.total_pages();
    }

    /// Removes the trade at `index`. The last remaining trade cannot be removed.
    pub fn remove_trade(&mut self, index: usize) -> bool {
        if self.form.trades.len() <= 1 || index >= self.form.trades.len() {
            return false;
        }
        self.form.trades.remove(index);
        if index < self.errors.trades.len() {
            self.errors.trades.remove(index);
        }
        self.set_page(self.page);
        true
    }

    pub fn update_trade<F>(&mut self, index: usize, update: F) -> bool
    where
        F: FnOnce(&mut Trade),
    {
        match self.form.trades.get_mut(index) {
            Some(trade) => {
                update(trade);
                true
            }
            None => false,
        }
    }

    /// Validates the form and reveals the messages. On failure the page moves
    /// to the first trade with an error, if any.
    pub fn validate_before_save(&mut self) -> bool {
        self.errors = validate_form(&self.form);
        self.show_errors = true;

        if !has_errors(&self.errors) {
            return true;
        }
        if let Some(index) = self.errors.first_trade_with_error() {
            self.page = index + 1;
        }
        false
    }
}
