//! Current-month analytics: comparison with the previous calendar month and
//! a linear full-month expense projection.

use chrono::{DateTime, Datelike, FixedOffset};

use crate::fmt::{percent, rupiah};
use crate::transaction::Transaction;

use super::{days_in_month, month_key, no_transactions, pct_change, previous_month_key, PeriodSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub month: String,
    pub previous_month: String,
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub income_change_pct: f64,
    pub expense_change_pct: f64,
    /// Current-month expense divided by days elapsed so far.
    pub daily_average: f64,
    /// Daily average extrapolated over the actual number of days in the
    /// current month.
    pub projected_expense: f64,
}

pub(crate) fn summary_for_month(rows: &[Transaction], month: &str) -> PeriodSummary {
    let filtered: Vec<&Transaction> = rows
        .iter()
        .filter(|r| r.timestamp.starts_with(month))
        .collect();
    PeriodSummary::from_rows(&filtered)
}

pub fn analytics_summary(rows: &[Transaction], now: DateTime<FixedOffset>) -> AnalyticsReport {
    let month = month_key(now);
    let previous_month = previous_month_key(now);
    let current = summary_for_month(rows, &month);
    let previous = summary_for_month(rows, &previous_month);

    let days_elapsed = now.day() as f64;
    let daily_average = current.total_expense as f64 / days_elapsed;
    let projected_expense = daily_average * days_in_month(now) as f64;

    AnalyticsReport {
        income_change_pct: pct_change(current.total_income, previous.total_income),
        expense_change_pct: pct_change(current.total_expense, previous.total_expense),
        daily_average,
        projected_expense,
        month,
        previous_month,
        current,
        previous,
    }
}

pub fn render_analytics(rows: &[Transaction], now: DateTime<FixedOffset>) -> String {
    let report = analytics_summary(rows, now);
    if report.current.transaction_count == 0 && report.previous.transaction_count == 0 {
        return no_transactions("📉 Analitik Bulan Ini");
    }

    format!(
        "📉 Analitik Bulan Ini ({})\n\n\
         💰 Ringkasan:\n\
         • Pemasukan: {} ({} vs bulan lalu)\n\
         • Pengeluaran: {} ({} vs bulan lalu)\n\
         • Saldo: {}\n\n\
         📅 Proyeksi:\n\
         • Rata-rata harian: {}\n\
         • Estimasi pengeluaran sebulan: {}",
        report.month,
        rupiah(report.current.total_income),
        signed_percent(report.income_change_pct),
        rupiah(report.current.total_expense),
        signed_percent(report.expense_change_pct),
        rupiah(report.current.balance),
        rupiah(report.daily_average.round() as i64),
        rupiah(report.projected_expense.round() as i64),
    )
}

fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", percent(value))
    } else {
        percent(value)
    }
}
