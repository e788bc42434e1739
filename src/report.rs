/*!
Report aggregation over the full transaction log.

All filtering is done by string-prefix / lexicographic comparison on the
stored `YYYY-MM-DD HH:MM:SS` timestamps, evaluated against "now" in WIB.
This preserves the store's string-sortable-timestamp contract: a report never
parses a timestamp unless it needs calendar fields (see `patterns`).
*/

mod analytics;
mod breakdown;
mod compare;
mod patterns;
mod trends;

pub use analytics::*;
pub use breakdown::*;
pub use compare::*;
pub use patterns::*;
pub use trends::*;

use chrono::{DateTime, Datelike, Days, FixedOffset, Months};
use std::collections::BTreeMap;

use crate::fmt::rupiah;
use crate::transaction::Transaction;

/// Period predicate selecting which rows a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub fn title(&self) -> &'static str {
        match self {
            Period::Today => "📊 Laporan Hari Ini",
            Period::Week => "📊 Laporan 7 Hari Terakhir",
            Period::Month => "📊 Laporan Bulan Ini",
            Period::Year => "📊 Laporan Tahun Ini",
            Period::All => "📊 Laporan Keseluruhan",
        }
    }

    /// Selects the rows inside the period. A date-only cutoff string compares
    /// `<=` any full timestamp of the same day, so `>=` implements
    /// "on or after date".
    pub fn filter<'a>(
        &self,
        rows: &'a [Transaction],
        now: DateTime<FixedOffset>,
    ) -> Vec<&'a Transaction> {
        match self {
            Period::Today => {
                let prefix = now.format("%Y-%m-%d").to_string();
                rows.iter().filter(|r| r.timestamp.starts_with(&prefix)).collect()
            }
            Period::Week => {
                let cutoff = (now - Days::new(7)).format("%Y-%m-%d").to_string();
                rows.iter().filter(|r| r.timestamp.as_str() >= cutoff.as_str()).collect()
            }
            Period::Month => {
                let cutoff = now.format("%Y-%m-01").to_string();
                rows.iter().filter(|r| r.timestamp.as_str() >= cutoff.as_str()).collect()
            }
            Period::Year => {
                let cutoff = now.format("%Y-01-01").to_string();
                rows.iter().filter(|r| r.timestamp.as_str() >= cutoff.as_str()).collect()
            }
            Period::All => rows.iter().collect(),
        }
    }
}

/// Aggregated income/expense/balance totals over a filtered row set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub total_income: i64,
    /// Sum of expense magnitudes (always >= 0).
    pub total_expense: i64,
    pub balance: i64,
    /// Expense rows only, keyed by category, magnitudes.
    pub category_totals: BTreeMap<String, i64>,
    pub transaction_count: usize,
}

impl PeriodSummary {
    pub fn from_rows(rows: &[&Transaction]) -> Self {
        let mut summary = PeriodSummary {
            transaction_count: rows.len(),
            ..Default::default()
        };
        for row in rows {
            if row.amount > 0 {
                summary.total_income += row.amount;
            } else {
                let magnitude = -row.amount;
                summary.total_expense += magnitude;
                *summary.category_totals.entry(row.category.clone()).or_insert(0) += magnitude;
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }
}

/// Percentage change against a previous value, defined as 0 when the
/// previous value is 0 so early-lifetime reports never divide by zero.
pub fn pct_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        0.0
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    }
}

pub(crate) fn month_key(now: DateTime<FixedOffset>) -> String {
    now.format("%Y-%m").to_string()
}

pub(crate) fn previous_month_key(now: DateTime<FixedOffset>) -> String {
    // first-of-month minus one day lands in the previous month, handling
    // year rollover
    let first = now.date_naive().with_day(1).unwrap();
    (first - Days::new(1)).format("%Y-%m").to_string()
}

pub(crate) fn days_in_month(now: DateTime<FixedOffset>) -> i64 {
    let first = now.date_naive().with_day(1).unwrap();
    let next = first + Months::new(1);
    (next - first).num_days()
}

pub(crate) fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn no_transactions(title: &str) -> String {
    format!("{title}\n\n📝 Belum ada transaksi dalam periode ini.")
}

/// Current-calendar-month summary, the context for most advice prompts.
pub fn month_summary(rows: &[Transaction], now: DateTime<FixedOffset>) -> PeriodSummary {
    let filtered = Period::Month.filter(rows, now);
    PeriodSummary::from_rows(&filtered)
}

/// Renders the plain income/expense/balance report for a period.
pub fn render_period_report(
    rows: &[Transaction],
    period: Period,
    now: DateTime<FixedOffset>,
) -> String {
    let filtered = period.filter(rows, now);
    if filtered.is_empty() {
        return no_transactions(period.title());
    }
    let summary = PeriodSummary::from_rows(&filtered);

    let mut out = format!(
        "{}\n📅 {}\n\n💰 Ringkasan:\n• Pemasukan: {}\n• Pengeluaran: {}\n• Saldo: {}",
        period.title(),
        now.format("%d/%m/%Y"),
        rupiah(summary.total_income),
        rupiah(summary.total_expense),
        rupiah(summary.balance),
    );

    if !summary.category_totals.is_empty() {
        out.push_str("\n\n📊 Per Kategori:");
        let mut categories: Vec<(&String, &i64)> = summary.category_totals.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1));
        for (category, amount) in categories {
            out.push_str(&format!("\n• {}: {}", title_case(category), rupiah(*amount)));
        }
    }

    out.push_str(&format!("\n\n📈 Total transaksi: {}", summary.transaction_count));
    out
}

/// Renders the all-time balance overview for `/balance`.
pub fn render_balance(rows: &[Transaction], now: DateTime<FixedOffset>) -> String {
    let filtered = Period::All.filter(rows, now);
    if filtered.is_empty() {
        return no_transactions("💰 Saldo");
    }
    let summary = PeriodSummary::from_rows(&filtered);
    format!(
        "💰 Saldo Saat Ini: {}\n\n• Total pemasukan: {}\n• Total pengeluaran: {}\n• Jumlah transaksi: {}",
        rupiah(summary.balance),
        rupiah(summary.total_income),
        rupiah(summary.total_expense),
        summary.transaction_count,
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::transaction::{wib, Transaction};
    use chrono::{DateTime, FixedOffset, TimeZone};

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        wib().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn row(ts: &str, category: &str, amount: i64) -> Transaction {
        Transaction {
            timestamp: ts.to_string(),
            category: category.to_string(),
            description: String::new(),
            amount,
            source: "s1".to_string(),
        }
    }
}
