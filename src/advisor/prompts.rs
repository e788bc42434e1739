//! Prompt templates for the advice generator.
//!
//! Prompts embed aggregated figures only, plus the transaction description
//! with long digit runs masked so account or phone numbers never leave the
//! process.

use regex::Regex;

use crate::fmt::{percent, rupiah};
use crate::report::PeriodSummary;
use crate::report::TrendReport;
use crate::transaction::Transaction;

const PERSONA: &str =
    "Kamu adalah financial advisor Indonesia yang ramah, praktis, dan memberikan saran yang actionable.";

/// Masks digit runs of 5 or more characters in free text.
pub fn scrub(text: &str) -> String {
    let digits = Regex::new(r"\d{5,}").unwrap();
    digits.replace_all(text, "00000").to_string()
}

/// Current-month context shared by several prompts: totals plus the top-3
/// expense categories with their share.
fn user_context(summary: &PeriodSummary) -> String {
    let mut context = format!(
        "BULAN INI:\n- Pemasukan: {}\n- Pengeluaran: {}\n- Saldo: {}\n- Jumlah transaksi: {}\n",
        rupiah(summary.total_income),
        rupiah(summary.total_expense),
        rupiah(summary.balance),
        summary.transaction_count,
    );

    let mut categories: Vec<(&String, &i64)> = summary.category_totals.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1));
    if !categories.is_empty() {
        context.push_str("\nTop kategori pengeluaran:\n");
        for (category, amount) in categories.into_iter().take(3) {
            let share = if summary.total_expense > 0 {
                *amount as f64 / summary.total_expense as f64 * 100.0
            } else {
                0.0
            };
            context.push_str(&format!("- {}: {} ({})\n", category, rupiah(*amount), percent(share)));
        }
    }
    context
}

/// Immediate tip after an expense is recorded.
pub fn transaction_advice_prompt(transaction: &Transaction, summary: &PeriodSummary) -> String {
    format!(
        "{PERSONA}\n\n\
         User baru saja input transaksi: {} untuk {} - {}\n\n\
         Data keuangan user bulan ini:\n{}\n\
         Berikan 1 saran singkat (max 100 kata) yang positif, actionable, dan \
         relevan dengan kategori transaksi.\n\
         Format: 💡 Tips: [saran singkat]",
        rupiah(-transaction.amount),
        transaction.category,
        scrub(&transaction.description),
        user_context(summary),
    )
}

/// Comprehensive monthly analysis for `/advice`.
pub fn monthly_analysis_prompt(summary: &PeriodSummary, trend: &TrendReport) -> String {
    let mut history = String::new();
    if trend.months.len() >= 2 {
        history.push_str("\nTREND PENGELUARAN:\n");
        for month in &trend.months {
            history.push_str(&format!("- {}: {}\n", month.month, rupiah(month.expense)));
        }
        history.push_str(&format!(
            "- Rata-rata pengeluaran bulanan: {}\n",
            rupiah(trend.avg_expense.round() as i64)
        ));
    }

    format!(
        "{PERSONA}\n\n\
         Analisis data keuangan user berikut dan berikan rekomendasi:\n\n{}{}\n\
         Berikan analisis dalam format:\n\
         📊 ANALISIS KEUANGAN BULAN INI\n\n\
         💰 Ringkasan:\n[ringkasan pendapatan vs pengeluaran]\n\n\
         📈 Tren Pengeluaran:\n[kategori terbesar dan polanya]\n\n\
         💡 Rekomendasi:\n[3 saran konkret untuk bulan depan]\n\n\
         🎯 Target Hemat:\n[target realistis yang bisa dicapai]",
        user_context(summary),
        history,
    )
}

/// 50/30/20 budget recommendation for `/budget`.
pub fn budget_recommendation_prompt(monthly_income: i64, summary: &PeriodSummary) -> String {
    format!(
        "{PERSONA}\n\n\
         User memiliki penghasilan bulanan: {}\n\n{}\n\
         Berikan rekomendasi budget yang realistis menggunakan prinsip 50/30/20:\n\
         🏠 Kebutuhan Pokok (50%): {}\n\
         🎯 Keinginan (30%): {}\n\
         💎 Tabungan & Investasi (20%): {}\n\n\
         Bandingkan dengan pola pengeluaran user dan berikan saran spesifik.",
        rupiah(monthly_income),
        user_context(summary),
        rupiah(monthly_income / 2),
        rupiah(monthly_income * 3 / 10),
        rupiah(monthly_income / 5),
    )
}

/// Feasibility check for `/budgetcheck <amount> <days>`.
pub fn budget_feasibility_prompt(budget: i64, days: i64, daily_average: f64) -> String {
    let daily_budget = budget / days.max(1);
    let mut context = String::new();
    if daily_average > 0.0 {
        context = format!(
            "Rata-rata pengeluaran harian user biasanya: {}\n",
            rupiah(daily_average.round() as i64)
        );
    }
    format!(
        "{PERSONA}\n\n\
         User bertanya apakah budget {} cukup untuk hidup selama {} hari.\n\
         Budget per hari: {}\n{}\n\
         Analisis kelayakannya, berikan rekomendasi alokasi harian \
         (makanan 40%, transport 20%, lain-lain 30%, cadangan 10%), \
         3 tips hemat, dan hal yang perlu diwaspadai.",
        rupiah(budget),
        days,
        rupiah(daily_budget),
        context,
    )
}

/// Daily allocation plan for `/dailyplan <daily_budget>`.
pub fn daily_plan_prompt(daily_budget: i64) -> String {
    format!(
        "{PERSONA}\n\n\
         User memiliki budget harian {} dan ingin rencana pengeluaran.\n\n\
         Berikan rencana alokasi:\n\
         🍽️ Makanan: {}\n\
         🚗 Transport: {}\n\
         ☕ Jajan/Minuman: {}\n\
         🎯 Lain-lain: {}\n\
         💎 Sisa untuk ditabung: {}\n\n\
         Tambahkan strategi hemat yang konkret.",
        rupiah(daily_budget),
        rupiah(daily_budget * 45 / 100),
        rupiah(daily_budget / 4),
        rupiah(daily_budget * 15 / 100),
        rupiah(daily_budget / 10),
        rupiah(daily_budget / 20),
    )
}

/// Saving tips for `/tips [category]`.
pub fn tips_prompt(category: Option<&str>) -> String {
    match category {
        Some(category) => format!(
            "{PERSONA}\n\n\
             Berikan 5 tips praktis untuk menghemat pengeluaran kategori {category} \
             dalam konteks Indonesia. Setiap tip harus actionable dan realistis.",
        ),
        None => format!(
            "{PERSONA}\n\n\
             Berikan 5 tips umum pengelolaan keuangan untuk orang Indonesia. \
             Focus pada tips yang praktis dan mudah diterapkan.",
        ),
    }
}

/// Savings-goal plan for `/goals <amount> <desc>`.
pub fn goals_prompt(goal_amount: i64, goal_description: &str) -> String {
    format!(
        "{PERSONA}\n\n\
         User ingin menabung {} untuk {}.\n\
         Berikan rencana menabung yang realistis dengan opsi timeline \
         6, 12, dan 24 bulan, 3 tips mencapai goal, dan langkah konkret \
         yang bisa dimulai hari ini.",
        rupiah(goal_amount),
        scrub(goal_description),
    )
}
