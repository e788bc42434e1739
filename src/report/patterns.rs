//! Spending-pattern analysis over the trailing 30 days: day-of-week and
//! hour-of-day expense buckets.

use chrono::{DateTime, Datelike, Days, FixedOffset, Timelike};

use crate::fmt::rupiah;
use crate::transaction::Transaction;

use super::no_transactions;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PatternsReport {
    /// Monday = 0 .. Sunday = 6, expense magnitudes.
    pub by_weekday: [i64; 7],
    pub by_hour: [i64; 24],
    /// Top three hours by total spend, busiest first. Only non-empty buckets.
    pub top_hours: Vec<(u32, i64)>,
    pub max_weekday: usize,
    pub min_weekday: usize,
    /// Monday-Friday total divided by 5, regardless of which days actually
    /// had transactions in the window.
    pub weekday_daily_avg: f64,
    /// Saturday-Sunday total divided by 2.
    pub weekend_daily_avg: f64,
    pub expense_count: usize,
}

/// Buckets expense rows from the trailing 30 days. Rows with a timestamp
/// that does not parse are skipped.
pub fn spending_patterns(rows: &[Transaction], now: DateTime<FixedOffset>) -> PatternsReport {
    let cutoff = (now - Days::new(30)).format("%Y-%m-%d").to_string();

    let mut by_weekday = [0i64; 7];
    let mut by_hour = [0i64; 24];
    let mut expense_count = 0usize;

    for row in rows {
        if row.amount >= 0 || row.timestamp.as_str() < cutoff.as_str() {
            continue;
        }
        let Some(dt) = row.datetime() else {
            continue;
        };
        let magnitude = -row.amount;
        by_weekday[dt.weekday().num_days_from_monday() as usize] += magnitude;
        by_hour[dt.hour() as usize] += magnitude;
        expense_count += 1;
    }

    let mut hours: Vec<(u32, i64)> = by_hour
        .iter()
        .enumerate()
        .filter(|(_, total)| **total > 0)
        .map(|(hour, total)| (hour as u32, *total))
        .collect();
    hours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    hours.truncate(3);

    let max_weekday = argmax(&by_weekday);
    let min_weekday = argmin(&by_weekday);
    let weekday_daily_avg = by_weekday[..5].iter().sum::<i64>() as f64 / 5.0;
    let weekend_daily_avg = by_weekday[5..].iter().sum::<i64>() as f64 / 2.0;

    PatternsReport {
        by_weekday,
        by_hour,
        top_hours: hours,
        max_weekday,
        min_weekday,
        weekday_daily_avg,
        weekend_daily_avg,
        expense_count,
    }
}

fn argmax(values: &[i64; 7]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

fn argmin(values: &[i64; 7]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v < values[best] {
            best = i;
        }
    }
    best
}

pub fn render_patterns(rows: &[Transaction], now: DateTime<FixedOffset>) -> String {
    let report = spending_patterns(rows, now);
    if report.expense_count == 0 {
        return no_transactions("🔍 Pola Pengeluaran (30 hari)");
    }

    let mut out = String::from("🔍 Pola Pengeluaran (30 hari terakhir)\n\n⏰ Jam paling boros:");
    for (rank, (hour, total)) in report.top_hours.iter().enumerate() {
        out.push_str(&format!("\n{}. {hour:02}:00 - {}", rank + 1, rupiah(*total)));
    }

    out.push_str(&format!(
        "\n\n📅 Hari:\n• Paling boros: {} ({})\n• Paling hemat: {} ({})",
        WEEKDAY_NAMES[report.max_weekday],
        rupiah(report.by_weekday[report.max_weekday]),
        WEEKDAY_NAMES[report.min_weekday],
        rupiah(report.by_weekday[report.min_weekday]),
    ));

    out.push_str(&format!(
        "\n\n⚖️ Rata-rata harian:\n• Hari kerja: {}\n• Akhir pekan: {}",
        rupiah(report.weekday_daily_avg.round() as i64),
        rupiah(report.weekend_daily_avg.round() as i64),
    ));
    out
}
