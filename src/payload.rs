//! Transaction payload loading: category totals for the pie chart and
//! per-category series for the bar chart.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::model::{CategoryTotal, TimePoint};

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub amount: f64,
    pub category: String,
    /// Seconds since the Unix epoch.
    pub time: i64,
}

pub fn parse_payload(json: &str) -> Result<Vec<Record>, PayloadError> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    log::debug!("payload: {} records", records.len());
    Ok(records)
}

/// Sums amounts per category, in the order categories first appear.
pub fn category_totals(records: &[Record]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records {
        let amount = record.amount as f32;
        match index.get(record.category.as_str()) {
            Some(&slot) => totals[slot].value += amount,
            None => {
                index.insert(record.category.as_str(), totals.len());
                totals.push(CategoryTotal::new(record.category.as_str(), amount));
            }
        }
    }
    totals
}

/// Records of `category` as `(formatted time, amount)`, in source order.
pub fn category_series(
    records: &[Record],
    category: &str,
    offset: FixedOffset,
) -> Result<Vec<TimePoint>, PayloadError> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.category == category)
        .map(|(index, record)| -> Result<TimePoint, PayloadError> {
            let label = format_timestamp(record.time, offset).ok_or(
                PayloadError::TimeOutOfRange {
                    index,
                    time: record.time,
                },
            )?;
            Ok(TimePoint::new(label, record.amount as f32))
        })
        .collect()
}

/// Formats whole seconds since the epoch as `dd.MM.yyyy HH:mm` at `offset`.
pub fn format_timestamp(seconds: i64, offset: FixedOffset) -> Option<String> {
    let millis = seconds.checked_mul(1000)?;
    let utc = DateTime::from_timestamp_millis(millis)?;
    Some(utc.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string())
}

pub fn utc_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            log::warn!("UTC offset of {minutes} minutes is out of range, using UTC");
            Utc.fix()
        })
}
