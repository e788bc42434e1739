//! Calendar-month trend over the most recent six months of data.

use std::collections::BTreeMap;

use crate::fmt::{percent, rupiah};
use crate::transaction::Transaction;

use super::{no_transactions, pct_change};

const TREND_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTrend {
    /// `YYYY-MM` key.
    pub month: String,
    pub income: i64,
    pub expense: i64,
    /// Expense change versus the immediately preceding shown month.
    /// `None` for the first shown month, 0 when the previous expense was 0.
    pub expense_change_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendReport {
    /// Chronological, at most [`TREND_MONTHS`] entries.
    pub months: Vec<MonthTrend>,
    pub avg_income: f64,
    pub avg_expense: f64,
}

/// Groups all rows by `YYYY-MM` timestamp prefix and keeps the most recent
/// six months in chronological order.
pub fn monthly_trend(rows: &[Transaction]) -> TrendReport {
    let mut by_month: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let Some(month) = row.timestamp.get(..7) else {
            continue;
        };
        let entry = by_month.entry(month.to_string()).or_insert((0, 0));
        if row.amount > 0 {
            entry.0 += row.amount;
        } else {
            entry.1 += -row.amount;
        }
    }

    // BTreeMap iterates YYYY-MM keys chronologically; keep the tail
    let mut all: Vec<(String, (i64, i64))> = by_month.into_iter().collect();
    let skip = all.len().saturating_sub(TREND_MONTHS);
    let shown = all.split_off(skip);

    let mut months = Vec::with_capacity(shown.len());
    for (i, (month, (income, expense))) in shown.iter().enumerate() {
        let expense_change_pct = if i == 0 {
            None
        } else {
            Some(pct_change(*expense, shown[i - 1].1 .1))
        };
        months.push(MonthTrend {
            month: month.clone(),
            income: *income,
            expense: *expense,
            expense_change_pct,
        });
    }

    let count = months.len() as f64;
    let (avg_income, avg_expense) = if months.is_empty() {
        (0.0, 0.0)
    } else {
        (
            months.iter().map(|m| m.income).sum::<i64>() as f64 / count,
            months.iter().map(|m| m.expense).sum::<i64>() as f64 / count,
        )
    };

    TrendReport {
        months,
        avg_income,
        avg_expense,
    }
}

pub fn render_trends(rows: &[Transaction]) -> String {
    let report = monthly_trend(rows);
    if report.months.is_empty() {
        return no_transactions("📈 Tren Bulanan");
    }

    let mut out = String::from("📈 Tren Bulanan (6 bulan terakhir)\n");
    for month in &report.months {
        out.push_str(&format!(
            "\n{}: 💰 {} | 💸 {}",
            month.month,
            rupiah(month.income),
            rupiah(month.expense),
        ));
        if let Some(change) = month.expense_change_pct {
            let arrow = if change >= 0.0 { "▲" } else { "▼" };
            out.push_str(&format!(" ({arrow} {} vs bulan sebelumnya)", percent(change.abs())));
        }
    }

    out.push_str(&format!(
        "\n\n📊 Rata-rata per bulan:\n• Pemasukan: {}\n• Pengeluaran: {}",
        rupiah(report.avg_income.round() as i64),
        rupiah(report.avg_expense.round() as i64),
    ));
    out
}
