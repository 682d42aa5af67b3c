// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard aggregation over a slice of transactions.
//!
//! Every function here is total: empty and single-element inputs are
//! valid, nothing is mutated, and the output owns its data. Sums saturate
//! at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.

use crate::models::{Dashboard, Highlights, MonthlyBucket, PeriodKey, Transaction, TxKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Reported as the most frequent category when there are no transactions.
pub const NO_CATEGORY: &str = "none";

pub const DEFAULT_MONTHS: usize = 6;

const MONTHS_PT_BR: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month abbreviation table used for bucket labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }

    fn month_names(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::PtBr => &MONTHS_PT_BR,
            Locale::En => &MONTHS_EN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt" | "pt-br" => Ok(Locale::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}' (use pt-BR|en)", other)),
        }
    }
}

/// How buckets are chosen and ordered once grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesOrder {
    /// Most recent `max_months` periods, oldest first, whatever the input order.
    #[default]
    Chronological,
    /// First-seen grouping order, truncated, then reversed. Only yields the
    /// most recent months in ascending order when the input is sorted by
    /// date descending and each month is contiguous.
    FirstSeen,
}

impl SeriesOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesOrder::Chronological => "chronological",
            SeriesOrder::FirstSeen => "first-seen",
        }
    }
}

impl FromStr for SeriesOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chronological" => Ok(SeriesOrder::Chronological),
            "first-seen" | "legacy" => Ok(SeriesOrder::FirstSeen),
            other => Err(format!(
                "unknown series order '{}' (use chronological|first-seen)",
                other
            )),
        }
    }
}

pub fn period_of(date: &NaiveDate) -> PeriodKey {
    PeriodKey {
        year: date.year(),
        month: date.month(),
    }
}

/// e.g. `Fev/25`
pub fn month_label(period: PeriodKey, locale: Locale) -> String {
    let idx = (period.month.clamp(1, 12) - 1) as usize;
    format!(
        "{}/{:02}",
        locale.month_names()[idx],
        period.year.rem_euclid(100)
    )
}

/// Income minus expenses. Zero for an empty slice.
pub fn compute_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |acc, tx| match tx.kind {
            TxKind::Income => acc.saturating_add(tx.amount),
            TxKind::Expense => acc.saturating_sub(tx.amount),
        })
}

pub fn compute_monthly_series(transactions: &[Transaction], max_months: usize) -> Vec<MonthlyBucket> {
    compute_monthly_series_with(
        transactions,
        max_months,
        SeriesOrder::default(),
        Locale::default(),
    )
}

pub fn compute_monthly_series_with(
    transactions: &[Transaction],
    max_months: usize,
    order: SeriesOrder,
    locale: Locale,
) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = Vec::new();
    let mut index: HashMap<PeriodKey, usize> = HashMap::new();

    for tx in transactions {
        let period = period_of(&tx.date);
        let slot = *index.entry(period).or_insert_with(|| {
            buckets.push(MonthlyBucket {
                period,
                label: month_label(period, locale),
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
                net: Decimal::ZERO,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        match tx.kind {
            TxKind::Income => bucket.income = bucket.income.saturating_add(tx.amount),
            TxKind::Expense => bucket.expenses = bucket.expenses.saturating_add(tx.amount),
        }
        bucket.net = bucket.income.saturating_sub(bucket.expenses);
    }

    match order {
        SeriesOrder::Chronological => {
            buckets.sort_by_key(|b| b.period);
            let stale = buckets.len().saturating_sub(max_months);
            buckets.drain(..stale);
        }
        SeriesOrder::FirstSeen => {
            buckets.truncate(max_months);
            buckets.reverse();
        }
    }
    buckets
}

pub fn compute_highlights(transactions: &[Transaction]) -> Highlights {
    if transactions.is_empty() {
        return Highlights {
            largest_expense: None,
            largest_income: None,
            most_frequent_category: NO_CATEGORY.to_string(),
            total_count: 0,
        };
    }

    Highlights {
        largest_expense: largest_of(transactions, TxKind::Expense).cloned(),
        largest_income: largest_of(transactions, TxKind::Income).cloned(),
        most_frequent_category: most_frequent_category(transactions)
            .unwrap_or(NO_CATEGORY)
            .to_string(),
        total_count: transactions.len(),
    }
}

/// Balance, monthly series and highlights in one pass over the same slice.
pub fn summarize(
    transactions: &[Transaction],
    max_months: usize,
    order: SeriesOrder,
    locale: Locale,
) -> Dashboard {
    Dashboard {
        balance: compute_balance(transactions),
        months: compute_monthly_series_with(transactions, max_months, order, locale),
        highlights: compute_highlights(transactions),
    }
}

// Ties keep the earlier transaction.
fn largest_of(transactions: &[Transaction], kind: TxKind) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .fold(None, |max: Option<&Transaction>, tx| match max {
            Some(m) if tx.amount <= m.amount => Some(m),
            _ => Some(tx),
        })
}

// Counts are kept in first-insertion order so ties go to the earliest category.
fn most_frequent_category(transactions: &[Transaction]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for tx in transactions {
        let cat = tx.category.as_str();
        match index.get(cat) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(cat, counts.len());
                counts.push((cat, 1));
            }
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (cat, n)| match best {
            Some((_, m)) if n <= m => best,
            _ => Some((cat, n)),
        })
        .map(|(cat, _)| cat)
}
