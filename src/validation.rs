// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, Receipt, TxKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// Amounts must stay below 10^15 so sums over any realistic history fit in a `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

// Letters and digits only: `\w` would keep variation selectors such as U+FE0F.
static DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{L}\p{N}]+\s").expect("static regex"));
static AMOUNT_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9,.]").expect("static regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please fill in {0}")]
    MissingFields(&'static str),

    #[error("invalid amount '{0}', enter a value greater than zero")]
    InvalidAmount(String),

    #[error("amount '{0}' is too large")]
    AmountTooLarge(String),

    #[error("receipts can only be attached to expenses")]
    ReceiptOnIncome,
}

/// Raw input from an entry form, before validation.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub receipt: Option<Receipt>,
}

/// Accepts a comma as the decimal separator, e.g. "12,50".
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned = AMOUNT_NOISE.replace_all(raw.trim(), "");
    let normalized = cleaned.replacen(',', ".", 1);
    let value = normalized
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if value <= Decimal::ZERO || raw.trim_start().starts_with('-') {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    if value >= MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(raw.to_string()));
    }
    Ok(value)
}

/// "🍔 Alimentação" -> "Alimentação". Undecorated names are returned as-is.
pub fn strip_decoration(name: &str) -> String {
    DECORATION.replace(name.trim(), "").trim().to_string()
}

fn required_fields(kind: TxKind) -> &'static str {
    match kind {
        TxKind::Expense => "amount, description and category",
        TxKind::Income => "amount, description and source",
    }
}

/// Checks a form and turns it into a record ready for insertion.
///
/// The returned record never carries a receipt reference: the receipt has
/// to be uploaded first and the reference filled in by the caller.
pub fn validate_form(
    owner: &str,
    kind: TxKind,
    form: &EntryForm,
    today: NaiveDate,
) -> Result<NewTransaction, ValidationError> {
    if form.amount.trim().is_empty()
        || form.description.trim().is_empty()
        || form.category.trim().is_empty()
    {
        return Err(ValidationError::MissingFields(required_fields(kind)));
    }
    let amount = parse_amount(&form.amount)?;
    if kind == TxKind::Income && form.receipt.is_some() {
        return Err(ValidationError::ReceiptOnIncome);
    }
    let category = strip_decoration(&form.category);
    if category.is_empty() {
        return Err(ValidationError::MissingFields(required_fields(kind)));
    }

    Ok(NewTransaction {
        owner: owner.to_string(),
        kind,
        amount,
        description: form.description.trim().to_string(),
        category,
        date: form.date.unwrap_or(today),
        receipt: None,
    })
}
