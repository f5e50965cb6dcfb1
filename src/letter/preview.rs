//! On-screen HTML preview of a letter, rendered with an embedded tera template.

use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::suitability::{SuitabilityFormState, Trade};
use crate::letter::layout::{KNOWLEDGE, PURPOSE, recommendation_label, signatory};
use crate::letter::{FirmProfile, LetterError};

const TEMPLATE_NAME: &str = "letter_preview.html";
const TEMPLATE: &str = include_str!("../../templates/letter_preview.html");

#[derive(Serialize)]
struct TradePreview<'a> {
    summary: String,
    meta: String,
    asset_name: &'a str,
    asset_risk: &'static str,
    side: &'static str,
    reasons: Vec<&'a str>,
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    match value.trim() {
        "" => placeholder,
        v => v,
    }
}

impl<'a> From<&'a Trade> for TradePreview<'a> {
    fn from(trade: &'a Trade) -> Self {
        Self {
            summary: format!(
                "{} {} of {} ({})",
                trade.side,
                or_placeholder(&trade.quantity, "___"),
                or_placeholder(&trade.asset_name, "________"),
                trade.account_type
            ),
            meta: format!(
                "Type: {} | Risk: {} | Time: {}",
                trade.asset_type,
                trade.asset_risk,
                or_placeholder(&trade.time_of_trade, "\u{2014}")
            ),
            asset_name: trade.asset_name.trim(),
            asset_risk: trade.asset_risk.as_str(),
            side: trade.side.as_str(),
            reasons: trade.filled_reasons().collect(),
        }
    }
}

/// Renders the preview document. Values are HTML-escaped.
pub fn render_preview(form: &SuitabilityFormState, firm: &FirmProfile) -> Result<String, LetterError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

    let salutation = form.salutation.trim();
    let client_name = form.client_name.trim();
    let addressee = if salutation.is_empty() {
        or_placeholder(client_name, "Client Name").to_string()
    } else {
        format!("{salutation} {}", or_placeholder(client_name, "Client Name"))
    };
    let trades: Vec<TradePreview> = form.trades.iter().map(TradePreview::from).collect();

    let mut context = Context::new();
    context.insert("addressee", &addressee);
    context.insert("account_number", or_placeholder(&form.account_number, "\u{2014}"));
    context.insert("purpose", PURPOSE);
    context.insert("recommendation", &recommendation_label(form));
    context.insert("trades", &trades);
    context.insert(
        "greeting",
        &format!(
            "Dear {} {},",
            or_placeholder(salutation, "\u{2026}"),
            or_placeholder(client_name, "\u{2026}")
        ),
    );
    context.insert("knowledge", KNOWLEDGE);
    context.insert("signatory", signatory(form));
    context.insert("firm", firm);

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}
