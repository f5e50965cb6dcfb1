//! Print layout of a suitability letter.
//!
//! [`compose`] turns the form into an ordered list of blocks that a
//! [`crate::letter::pdf::LetterRenderer`] paginates. It is pure: the issue
//! time is passed in.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::suitability::{SuitabilityFormState, Trade};
use crate::letter::FirmProfile;

pub const PURPOSE: &str = "The purpose of this report is to relay to you the client the \
information you have supplied to the firm with regards to your investment preferences, \
objectives and other personal characteristics. This was gathered from the information you \
provided on your on-boarding application form, which has been used to assess your \
suitability for our advisory services. By assessing your suitability, it enables the firm \
to act in your best interests. If any aspects of this report are unclear or you would like \
to discuss any areas further, please do not hesitate to contact us.";

pub const KNOWLEDGE: &str = "The recommendation is considered to suit your relevant knowledge \
and experience as the firm has assessed you to have a good understanding of equities.";

pub const REVIEW_INTRO: &str = "Investing in equities will require us to perform periodic \
reviews to assess your continued suitability to the product. By following this advice and \
opening / closing the recommended instrument, you will be agreeing to the following \
conditions:";

pub const NO_REASONS: &str = "No reasons provided for this trade.";

const PLACEHOLDER: &str = "\u{2014}";

/// A run of text with uniform weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Summary table of the proposed trades.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultsTable {
    pub headers: [String; 3],
    pub rows: Vec<[String; 3]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Block {
    /// Large bold line, e.g. `Recommendation - Sell`.
    Heading(String),
    /// Bold underlined section title.
    Subtitle(String),
    Paragraph(Vec<Span>),
    Table(ResultsTable),
    /// Indented list entry. The marker is part of the text.
    ListItem(String),
    Signature(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LetterLayout {
    pub title: String,
    pub blocks: Vec<Block>,
    /// Printed at the bottom of every page.
    pub footer: String,
}

/// Side of the first trade, or a dash when there are no trades.
pub fn recommendation_label(form: &SuitabilityFormState) -> String {
    form.recommendation()
        .map(|side| side.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Header of the amount column: `Quantity` when the letter recommends a sale.
pub fn quantity_header(form: &SuitabilityFormState) -> &'static str {
    form.trades
        .first()
        .map(Trade::quantity_label)
        .unwrap_or("Amount")
}

pub fn signatory(form: &SuitabilityFormState) -> &str {
    match form.investment_manager.trim() {
        "" => "Investment Manager",
        name => name,
    }
}

fn first_trade_field(form: &SuitabilityFormState, field: fn(&Trade) -> &str) -> String {
    form.trades
        .first()
        .map(|t| field(t).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn paragraph(spans: Vec<Span>) -> Block {
    Block::Paragraph(spans)
}

fn text(value: impl Into<String>) -> Block {
    Block::Paragraph(vec![Span::plain(value)])
}

fn rationale(trade: &Trade) -> Vec<Block> {
    let mut blocks = vec![paragraph(vec![
        Span::plain(format!(
            "{} would be classified as a ",
            trade.asset_name.trim()
        )),
        Span::bold(format!("{}-risk", trade.asset_risk.as_str().to_lowercase())),
        Span::plain(
            " investment and with consideration to your overall risk profile and investment \
             objectives. We believe as part of your overall portfolio it is suitable for you to ",
        ),
        Span::bold(trade.side.as_str().to_lowercase()),
        Span::plain(" because of the following reasons:"),
    ])];

    let reasons: Vec<_> = trade.filled_reasons().collect();
    if reasons.is_empty() {
        blocks.push(text(NO_REASONS));
    } else {
        blocks.extend(
            reasons
                .into_iter()
                .map(|reason| Block::ListItem(format!("\u{2022} {reason}"))),
        );
    }
    blocks
}

/// Builds the full letter for `form` issued at `issued_at`.
pub fn compose(
    form: &SuitabilityFormState,
    firm: &FirmProfile,
    issued_at: NaiveDateTime,
) -> LetterLayout {
    let recommendation = recommendation_label(form);

    let mut blocks = vec![
        text(PURPOSE),
        Block::Heading(format!("Recommendation - {recommendation}")),
        Block::Table(ResultsTable {
            headers: [
                "Shares".to_string(),
                quantity_header(form).to_string(),
                "Account".to_string(),
            ],
            rows: form
                .trades
                .iter()
                .map(|t| {
                    [
                        t.asset_name.trim().to_string(),
                        t.quantity.trim().to_string(),
                        t.account_type.to_string(),
                    ]
                })
                .collect(),
        }),
        text(format!("Dear {},", form.salutation.trim())),
        paragraph(vec![
            Span::plain(format!("{} has recommended you ", firm.name)),
            Span::bold(recommendation.to_lowercase()),
            Span::plain(
                " the above shares. Below summarises how the recommendation is suited to your \
                 individual circumstances.",
            ),
        ]),
        Block::Subtitle("Your Investment Objectives and Risk Tolerance".to_string()),
        paragraph(vec![
            Span::plain(format!(
                "Your objective is to seek returns in the form of both income and capital \
                 appreciation ({}). Your tolerance to risk is deemed ",
                form.objective
            )),
            Span::bold(form.risk.as_str().to_lowercase()),
            Span::plain(" and your capacity for loss is "),
            Span::bold(form.capacity_of_loss.trim()),
            Span::plain(" of the total portfolio."),
        ]),
    ];

    blocks.extend(form.trades.iter().flat_map(rationale));

    blocks.extend([
        Block::Subtitle("Your Relevant Knowledge and Experience".to_string()),
        text(KNOWLEDGE),
        Block::Subtitle("Periodic Review of Suitability".to_string()),
        text(REVIEW_INTRO),
        text("1.  A suitability assessment will be performed at least annually."),
        Block::ListItem(
            "2.  The following information may be subject to full/partial reassessment;"
                .to_string(),
        ),
        Block::ListItem("(i) Your investment objectives".to_string()),
        Block::ListItem("(ii) Your risk tolerance".to_string()),
        Block::ListItem("(iii) Your capacity for loss".to_string()),
        text(
            "3.  A suitability re-assessment will be required should your financial \
             circumstances change at any time.",
        ),
        text(
            "4.  If it is decided that you are no longer suitable for this product, an updated \
             recommendation will be communicated to you by e-mail.",
        ),
        paragraph(vec![
            Span::bold("Declaration:"),
            Span::plain(format!(
                " It is strongly advised that you read all the information set out in this \
                 report for your own benefit and protection. If you do not understand any point \
                 or your personal circumstances have changed please contact us on {}.",
                firm.contact_phone
            )),
        ]),
        text(format!(
            "Date of trade instruction: {}       Time of trade instruction: {}",
            first_trade_field(form, |t| t.date_of_trade.trim()),
            first_trade_field(form, |t| t.time_of_trade.trim()),
        )),
        text(format!(
            "Date of suitability report: {}       Time of suitability report: {}",
            issued_at.format("%d/%m/%Y"),
            issued_at.format("%H:%M"),
        )),
        Block::Signature(signatory(form).to_string()),
    ]);

    LetterLayout {
        title: format!("Suitability Letter - {}", form.client_name.trim()),
        blocks,
        footer: firm.footer.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{RiskLevel, TradeSide};

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 0)
            .unwrap()
    }

    fn sale_form() -> SuitabilityFormState {
        SuitabilityFormState {
            client_name: "Jane Doe".to_string(),
            salutation: "Mrs Doe".to_string(),
            capacity_of_loss: "10%".to_string(),
            risk: RiskLevel::High,
            trades: vec![
                Trade {
                    asset_name: "Acme Corp".to_string(),
                    side: TradeSide::Sell,
                    quantity: "Sell All".to_string(),
                    date_of_trade: "04/03/2025".to_string(),
                    time_of_trade: "09:30".to_string(),
                    reasons: ["Take profit".to_string(), String::new(), "Rebalance".to_string()],
                    ..Trade::default()
                },
                Trade {
                    asset_name: "Globex".to_string(),
                    ..Trade::default()
                },
            ],
            ..SuitabilityFormState::default()
        }
    }

    fn plain_text(block: &Block) -> String {
        match block {
            Block::Paragraph(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            Block::Heading(s) | Block::Subtitle(s) | Block::ListItem(s) | Block::Signature(s) => {
                s.clone()
            }
            Block::Table(_) => String::new(),
        }
    }

    #[test]
    fn heading_and_table_follow_the_first_trade() {
        let layout = compose(&sale_form(), &FirmProfile::default(), issued_at());

        assert_eq!(layout.blocks[1], Block::Heading("Recommendation - Sell".to_string()));
        let Block::Table(table) = &layout.blocks[2] else {
            panic!("expected results table");
        };
        assert_eq!(table.headers[1], "Quantity");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], ["Acme Corp", "Sell All", "ISA"].map(String::from));
    }

    #[test]
    fn reasons_become_bullets_and_blank_trades_get_a_notice() {
        let layout = compose(&sale_form(), &FirmProfile::default(), issued_at());
        let texts: Vec<_> = layout.blocks.iter().map(plain_text).collect();

        assert!(texts.contains(&"\u{2022} Take profit".to_string()));
        assert!(texts.contains(&"\u{2022} Rebalance".to_string()));
        assert_eq!(texts.iter().filter(|t| *t == NO_REASONS).count(), 1);
    }

    #[test]
    fn risk_and_capacity_are_bold() {
        let layout = compose(&sale_form(), &FirmProfile::default(), issued_at());
        let bold: Vec<_> = layout
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(spans) => Some(spans),
                _ => None,
            })
            .flatten()
            .filter(|s| s.bold)
            .map(|s| s.text.as_str())
            .collect();

        assert!(bold.contains(&"high"));
        assert!(bold.contains(&"10%"));
        assert!(bold.contains(&"low-risk") || bold.contains(&"medium-risk"));
    }

    #[test]
    fn report_time_and_signature_use_inputs() {
        let layout = compose(&sale_form(), &FirmProfile::default(), issued_at());
        let texts: Vec<_> = layout.blocks.iter().map(plain_text).collect();

        assert!(texts.contains(
            &"Date of suitability report: 05/03/2025       Time of suitability report: 14:07"
                .to_string()
        ));
        assert!(texts.contains(
            &"Date of trade instruction: 04/03/2025       Time of trade instruction: 09:30"
                .to_string()
        ));
        assert_eq!(
            layout.blocks.last(),
            Some(&Block::Signature("Investment Manager".to_string()))
        );
        assert_eq!(layout.footer, FirmProfile::default().footer);
    }

    #[test]
    fn purchase_letters_use_amount_header() {
        let form = SuitabilityFormState::default();
        assert_eq!(quantity_header(&form), "Amount");
        assert_eq!(recommendation_label(&form), "Buy");
    }
}
