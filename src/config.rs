// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{Locale, SeriesOrder, DEFAULT_MONTHS};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

pub const DEFAULT_OWNER: &str = "local";
pub const BLOB_TOKEN_ENV: &str = "MONEYDASH_BLOB_TOKEN";

pub const KEYS: [&str; 6] = [
    "owner",
    "locale",
    "months",
    "series_order",
    "blob_url",
    "blob_bucket",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSettings {
    pub url: String,
    pub bucket: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub owner: String,
    pub locale: Locale,
    pub months: usize,
    pub series_order: SeriesOrder,
    pub blob: Option<BlobSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            locale: Locale::default(),
            months: DEFAULT_MONTHS,
            series_order: SeriesOrder::default(),
            blob: None,
        }
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

/// Validates and stores a setting.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        "owner" if value.is_empty() => return Err(anyhow!("owner cannot be empty")),
        "locale" => {
            value.parse::<Locale>().map_err(|e| anyhow!(e))?;
        }
        "months" => {
            parse_months(value)?;
        }
        "series_order" => {
            value.parse::<SeriesOrder>().map_err(|e| anyhow!(e))?;
        }
        k if !KEYS.contains(&k) => {
            return Err(anyhow!(
                "Unknown setting '{}' (known: {})",
                k,
                KEYS.join(", ")
            ))
        }
        _ => {}
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn parse_months(value: &str) -> Result<usize> {
    let n = value
        .parse::<usize>()
        .with_context(|| format!("Invalid month count '{}'", value))?;
    if n == 0 {
        return Err(anyhow!("month count must be at least 1"));
    }
    Ok(n)
}

/// Reads persisted settings, falling back to defaults for missing keys.
/// The blob token only ever comes from the environment.
pub fn load(conn: &Connection) -> Result<Settings> {
    let mut s = Settings::default();
    if let Some(owner) = get_setting(conn, "owner")? {
        s.owner = owner;
    }
    if let Some(locale) = get_setting(conn, "locale")? {
        s.locale = locale.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(months) = get_setting(conn, "months")? {
        s.months = parse_months(&months)?;
    }
    if let Some(order) = get_setting(conn, "series_order")? {
        s.series_order = order.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(url) = get_setting(conn, "blob_url")? {
        let bucket = get_setting(conn, "blob_bucket")?.unwrap_or_else(|| "receipts".to_string());
        s.blob = Some(BlobSettings {
            url,
            bucket,
            token: std::env::var(BLOB_TOKEN_ENV).ok(),
        });
    }
    Ok(s)
}
