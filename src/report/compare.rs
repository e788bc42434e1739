//! Month-over-month comparison: totals deltas, the biggest category movers,
//! and a coarse threshold-driven insight.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;

use crate::fmt::{percent, rupiah};
use crate::transaction::Transaction;

use super::analytics::summary_for_month;
use super::{month_key, no_transactions, pct_change, previous_month_key, title_case, PeriodSummary};

/// Fixed policy thresholds for the comparison insight.
const EXPENSE_DROP_PCT: f64 = -5.0;
const EXPENSE_RISE_PCT: f64 = 10.0;
const INCOME_SHIFT_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    /// Expense dropped more than 5%.
    ExpenseDown,
    /// Expense rose more than 10%.
    ExpenseUp,
    /// Income moved more than 15% in either direction.
    IncomeShift,
    Stable,
}

impl Insight {
    pub fn text(&self) -> &'static str {
        match self {
            Insight::ExpenseDown => "✅ Pengeluaran turun dibanding bulan lalu. Pertahankan!",
            Insight::ExpenseUp => "⚠️ Pengeluaran naik cukup besar. Cek kategori yang melonjak.",
            Insight::IncomeShift => "📌 Pendapatan berubah signifikan dibanding bulan lalu.",
            Insight::Stable => "📊 Keuangan relatif stabil dibanding bulan lalu.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareReport {
    pub month: String,
    pub previous_month: String,
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub income_change_pct: f64,
    pub expense_change_pct: f64,
    /// Largest per-category expense increases, at most two, biggest first.
    pub top_increases: Vec<(String, i64)>,
    /// Largest decreases, at most two, biggest drop first.
    pub top_decreases: Vec<(String, i64)>,
    pub insight: Insight,
}

pub fn month_comparison(rows: &[Transaction], now: DateTime<FixedOffset>) -> CompareReport {
    let month = month_key(now);
    let previous_month = previous_month_key(now);
    let current = summary_for_month(rows, &month);
    let previous = summary_for_month(rows, &previous_month);

    let income_change_pct = pct_change(current.total_income, previous.total_income);
    let expense_change_pct = pct_change(current.total_expense, previous.total_expense);

    // union of both months' category sets, in deterministic (sorted) order so
    // equal deltas tie-break stably
    let categories: BTreeSet<&String> = current
        .category_totals
        .keys()
        .chain(previous.category_totals.keys())
        .collect();
    let deltas: Vec<(String, i64)> = categories
        .into_iter()
        .map(|c| {
            let cur = current.category_totals.get(c).copied().unwrap_or(0);
            let prev = previous.category_totals.get(c).copied().unwrap_or(0);
            (c.clone(), cur - prev)
        })
        .collect();

    let mut increases: Vec<(String, i64)> =
        deltas.iter().filter(|(_, d)| *d > 0).cloned().collect();
    increases.sort_by(|a, b| b.1.cmp(&a.1));
    increases.truncate(2);

    let mut decreases: Vec<(String, i64)> =
        deltas.iter().filter(|(_, d)| *d < 0).cloned().collect();
    decreases.sort_by(|a, b| a.1.cmp(&b.1));
    decreases.truncate(2);

    let insight = if expense_change_pct < EXPENSE_DROP_PCT {
        Insight::ExpenseDown
    } else if expense_change_pct > EXPENSE_RISE_PCT {
        Insight::ExpenseUp
    } else if income_change_pct.abs() > INCOME_SHIFT_PCT {
        Insight::IncomeShift
    } else {
        Insight::Stable
    };

    CompareReport {
        month,
        previous_month,
        current,
        previous,
        income_change_pct,
        expense_change_pct,
        top_increases: increases,
        top_decreases: decreases,
        insight,
    }
}

pub fn render_compare(rows: &[Transaction], now: DateTime<FixedOffset>) -> String {
    let report = month_comparison(rows, now);
    if report.current.transaction_count == 0 && report.previous.transaction_count == 0 {
        return no_transactions("🔁 Perbandingan Bulanan");
    }

    let mut out = format!(
        "🔁 Perbandingan {} vs {}\n\n\
         💰 Pemasukan: {} → {} ({})\n\
         💸 Pengeluaran: {} → {} ({})",
        report.previous_month,
        report.month,
        rupiah(report.previous.total_income),
        rupiah(report.current.total_income),
        percent(report.income_change_pct),
        rupiah(report.previous.total_expense),
        rupiah(report.current.total_expense),
        percent(report.expense_change_pct),
    );

    if !report.top_increases.is_empty() {
        out.push_str("\n\n📈 Kenaikan terbesar:");
        for (category, delta) in &report.top_increases {
            out.push_str(&format!("\n• {}: +{}", title_case(category), rupiah(*delta)));
        }
    }
    if !report.top_decreases.is_empty() {
        out.push_str("\n\n📉 Penurunan terbesar:");
        for (category, delta) in &report.top_decreases {
            out.push_str(&format!("\n• {}: -{}", title_case(category), rupiah(-delta)));
        }
    }

    out.push_str(&format!("\n\n{}", report.insight.text()));
    out
}
