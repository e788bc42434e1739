//! Current-month category breakdown with proportional text gauges and the
//! overall savings rate.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

use crate::fmt::{percent, rupiah};
use crate::transaction::Transaction;

use super::{month_key, no_transactions, title_case};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: i64,
    /// Share of the side's total, 0 when the total is 0.
    pub pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakdownReport {
    pub month: String,
    /// Income categories, largest first.
    pub income: Vec<CategoryShare>,
    /// Expense categories (magnitudes), largest first.
    pub expense: Vec<CategoryShare>,
    /// `balance / total_income * 100`, 0 when there is no income.
    pub savings_rate: f64,
}

pub fn category_breakdown(rows: &[Transaction], now: DateTime<FixedOffset>) -> BreakdownReport {
    let month = month_key(now);
    let mut income_totals: BTreeMap<String, i64> = BTreeMap::new();
    let mut expense_totals: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows.iter().filter(|r| r.timestamp.starts_with(&month)) {
        if row.amount > 0 {
            *income_totals.entry(row.category.clone()).or_insert(0) += row.amount;
        } else {
            *expense_totals.entry(row.category.clone()).or_insert(0) += -row.amount;
        }
    }

    let total_income: i64 = income_totals.values().sum();
    let total_expense: i64 = expense_totals.values().sum();
    let savings_rate = if total_income > 0 {
        (total_income - total_expense) as f64 / total_income as f64 * 100.0
    } else {
        0.0
    };

    BreakdownReport {
        month,
        income: shares(income_totals, total_income),
        expense: shares(expense_totals, total_expense),
        savings_rate,
    }
}

fn shares(totals: BTreeMap<String, i64>, total: i64) -> Vec<CategoryShare> {
    let mut out: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            pct: if total > 0 {
                amount as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

/// Ten-cell proportional gauge, e.g. 35% -> `████░░░░░░`.
fn gauge(pct: f64) -> String {
    let filled = (pct / 10.0).round().clamp(0.0, 10.0) as usize;
    "█".repeat(filled) + &"░".repeat(10 - filled)
}

pub fn render_breakdown(rows: &[Transaction], now: DateTime<FixedOffset>) -> String {
    let report = category_breakdown(rows, now);
    if report.income.is_empty() && report.expense.is_empty() {
        return no_transactions("📊 Breakdown Kategori");
    }

    let mut out = format!("📊 Breakdown Kategori ({})", report.month);

    if !report.expense.is_empty() {
        out.push_str("\n\n💸 Pengeluaran:");
        for share in &report.expense {
            out.push_str(&format!(
                "\n{} {} {} ({})",
                gauge(share.pct),
                title_case(&share.category),
                rupiah(share.amount),
                percent(share.pct),
            ));
        }
    }

    if !report.income.is_empty() {
        out.push_str("\n\n💰 Pemasukan:");
        for share in &report.income {
            out.push_str(&format!(
                "\n{} {} {} ({})",
                gauge(share.pct),
                title_case(&share.category),
                rupiah(share.amount),
                percent(share.pct),
            ));
        }
    }

    out.push_str(&format!(
        "\n\n💎 Savings rate: {}",
        percent(report.savings_rate)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{at, row};
    use super::*;

    fn rows() -> Vec<Transaction> {
        vec![
            row("2024-06-01 08:00:00", "makanan", -600_000),
            row("2024-06-02 08:00:00", "transport", -200_000),
            row("2024-06-03 08:00:00", "hiburan", -200_000),
            row("2024-06-05 08:00:00", "gaji", 2_000_000),
            // previous month, must be ignored
            row("2024-05-05 08:00:00", "makanan", -999_999),
        ]
    }

    #[test]
    fn splits_income_and_expense_sides() {
        let report = category_breakdown(&rows(), at(2024, 6, 15, 12));
        assert_eq!(report.expense.len(), 3);
        assert_eq!(report.income.len(), 1);
        assert_eq!(report.expense[0].category, "makanan");
        assert_eq!(report.expense[0].amount, 600_000);
        assert_eq!(report.expense[0].pct, 60.0);
        assert_eq!(report.income[0].pct, 100.0);
    }

    #[test]
    fn savings_rate_uses_income_denominator() {
        let report = category_breakdown(&rows(), at(2024, 6, 15, 12));
        // (2_000_000 - 1_000_000) / 2_000_000
        assert_eq!(report.savings_rate, 50.0);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let expense_only = vec![row("2024-06-01 08:00:00", "makanan", -50_000)];
        let report = category_breakdown(&expense_only, at(2024, 6, 15, 12));
        assert_eq!(report.savings_rate, 0.0);
    }

    #[test]
    fn gauge_is_proportional() {
        assert_eq!(gauge(0.0), "░░░░░░░░░░");
        assert_eq!(gauge(35.0), "████░░░░░░");
        assert_eq!(gauge(100.0), "██████████");
    }

    #[test]
    fn empty_month_renders_placeholder() {
        let report = render_breakdown(&[], at(2024, 6, 15, 12));
        assert!(report.contains("Belum ada transaksi"));
    }
}
