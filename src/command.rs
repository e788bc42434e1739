/*!
Chat message handling: slash-command dispatch and transaction recording.

Commands are a `strum`-parsed enum rather than a conditional chain over raw
strings, so every command name lives in exactly one place.
*/

use chrono::{DateTime, Datelike, FixedOffset};
use std::str::FromStr;
use strum::EnumString;
use tracing::{error, warn};

use crate::advisor::{
    budget_feasibility_prompt, budget_recommendation_prompt, daily_plan_prompt, goals_fallback,
    goals_prompt, monthly_analysis_prompt, tips_prompt, transaction_advice_prompt, Advisor,
};
use crate::db::TransactionsDb;
use crate::fmt::rupiah;
use crate::parser::{self, ParseError};
use crate::report::{
    month_summary, monthly_trend, render_analytics, render_balance, render_breakdown,
    render_compare, render_patterns, render_period_report, render_trends, title_case, Period,
};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Start,
    Help,
    Categories,
    Report,
    Today,
    Week,
    Month,
    Year,
    Balance,
    Trends,
    Analytics,
    Breakdown,
    Patterns,
    Compare,
    Income,
    BudgetCheck,
    DailyPlan,
    Advice,
    Budget,
    Tips,
    Goals,
}

/// Everything a message handler needs, borrowed from [`crate::app_state::AppState`].
pub struct BotContext<'a> {
    pub db: &'a TransactionsDb,
    pub advisor: &'a Advisor,
    pub taxonomy: &'a Taxonomy,
}

impl BotContext<'_> {
    /// Entry point for one inbound chat message. Always produces a reply.
    pub async fn handle_message(
        &self,
        text: &str,
        source: &str,
        first_name: &str,
        now: DateTime<FixedOffset>,
    ) -> String {
        let text = text.trim();
        if text.starts_with('/') {
            self.handle_command(text, source, first_name, now).await
        } else {
            self.record_transaction(text, source, now).await
        }
    }

    async fn handle_command(
        &self,
        text: &str,
        source: &str,
        first_name: &str,
        now: DateTime<FixedOffset>,
    ) -> String {
        let mut parts = text.split_whitespace();
        let head = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        // accept "/month@MyBot" group-chat form
        let name = head
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();

        let Ok(command) = Command::from_str(&name) else {
            return format!(
                "❌ Command tidak dikenal: /{name}\n\nKetik /help untuk panduan lengkap."
            );
        };

        let rows = self.db.rows();
        match command {
            Command::Start => start_text(first_name),
            Command::Help => HELP_TEXT.to_string(),
            Command::Categories => categories_text(self.taxonomy),
            Command::Report | Command::Today => render_period_report(&rows, Period::Today, now),
            Command::Week => render_period_report(&rows, Period::Week, now),
            Command::Month => render_period_report(&rows, Period::Month, now),
            Command::Year => render_period_report(&rows, Period::Year, now),
            Command::Balance => render_balance(&rows, now),
            Command::Trends => render_trends(&rows),
            Command::Analytics => render_analytics(&rows, now),
            Command::Breakdown => render_breakdown(&rows, now),
            Command::Patterns => render_patterns(&rows, now),
            Command::Compare => render_compare(&rows, now),
            Command::Income => self.record_income(&args, source, now).await,
            Command::BudgetCheck => self.budget_check(&args, &rows, now).await,
            Command::DailyPlan => self.daily_plan(&args).await,
            Command::Advice => {
                let summary = month_summary(&rows, now);
                let prompt = monthly_analysis_prompt(&summary, &monthly_trend(&rows));
                self.advisor.advise(&prompt).await
            }
            Command::Budget => {
                let summary = month_summary(&rows, now);
                let income = match args.first().and_then(|a| parser::parse_amount(a).ok()) {
                    Some(income) => income,
                    None if summary.total_income > 0 => summary.total_income,
                    None => {
                        return "💰 Gunakan format: `/budget [penghasilan bulanan]`\n\nContoh: `/budget 5000000`".to_string();
                    }
                };
                let prompt = budget_recommendation_prompt(income, &summary);
                self.advisor.advise(&prompt).await
            }
            Command::Tips => {
                let prompt = tips_prompt(args.first().copied());
                self.advisor.advise(&prompt).await
            }
            Command::Goals => self.goals(&args).await,
        }
    }

    /// Non-command text: parse, append, confirm. Expenses get an advice tip
    /// appended when one can be generated.
    async fn record_transaction(
        &self,
        text: &str,
        source: &str,
        now: DateTime<FixedOffset>,
    ) -> String {
        let parsed = match parser::parse(text, source, now, self.taxonomy) {
            Ok(parsed) => parsed,
            Err(e) => return parse_error_text(&e),
        };
        let transaction = parsed.transaction;

        if let Err(e) = self.db.append(transaction.clone()) {
            error!("Error saving transaction: {:#?}", e);
            return STORE_ERROR_TEXT.to_string();
        }

        let is_income = transaction.is_income();
        let mut reply = format!(
            "{} *{} Tercatat!*\n\n💵 Jumlah: {}\n📂 Kategori: {}\n📝 Deskripsi: {}\n📅 Waktu: {} WIB\n\n✅ Data tersimpan!",
            if is_income { "💰" } else { "💸" },
            if is_income { "Pemasukan" } else { "Pengeluaran" },
            rupiah(transaction.amount.abs()),
            title_case(&transaction.category),
            transaction.description,
            now.format("%d/%m/%Y %H:%M"),
        );
        if parsed.corrected {
            reply.push_str(&format!(
                "\n✏️ Kategori otomatis dikoreksi ke '{}'.",
                transaction.category
            ));
        }

        if !is_income {
            let summary = month_summary(&self.db.rows(), now);
            let prompt = transaction_advice_prompt(&transaction, &summary);
            let tip = self.advisor.advise(&prompt).await;
            reply.push_str(&format!("\n\n{tip}"));
        }
        reply
    }

    async fn record_income(
        &self,
        args: &[&str],
        source: &str,
        now: DateTime<FixedOffset>,
    ) -> String {
        let Some(amount_token) = args.first() else {
            return "💰 Gunakan format: `/income [jumlah] [deskripsi]`\n\nContoh: `/income 1000000 gaji bulanan`".to_string();
        };
        // /income has no category field; rows land on "gaji"
        let message = format!("+{} gaji {}", amount_token, args[1..].join(" "));
        self.record_transaction(message.trim(), source, now).await
    }

    async fn budget_check(
        &self,
        args: &[&str],
        rows: &[crate::transaction::Transaction],
        now: DateTime<FixedOffset>,
    ) -> String {
        let (Some(budget), Some(days)) = (
            args.first().and_then(|a| parser::parse_amount(a).ok()),
            args.get(1).and_then(|a| a.parse::<i64>().ok().filter(|d| *d > 0)),
        ) else {
            return "💰 Gunakan format: `/budgetcheck [jumlah] [hari]`\n\nContoh: `/budgetcheck 500000 7`".to_string();
        };
        let summary = month_summary(rows, now);
        let daily_average = summary.total_expense as f64 / now.day() as f64;
        let prompt = budget_feasibility_prompt(budget, days, daily_average);
        self.advisor.advise(&prompt).await
    }

    async fn daily_plan(&self, args: &[&str]) -> String {
        let Some(daily_budget) = args.first().and_then(|a| parser::parse_amount(a).ok()) else {
            return "📅 Gunakan format: `/dailyplan [budget harian]`\n\nContoh: `/dailyplan 100000`".to_string();
        };
        self.advisor.advise(&daily_plan_prompt(daily_budget)).await
    }

    async fn goals(&self, args: &[&str]) -> String {
        let Some(amount) = args.first().and_then(|a| parser::parse_amount(a).ok()) else {
            return GOALS_USAGE_TEXT.to_string();
        };
        let description = args[1..].join(" ");
        let prompt = goals_prompt(amount, &description);
        match self.advisor.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Goal advice failed, using installment fallback: {e}");
                goals_fallback(amount, &description)
            }
        }
    }
}

fn parse_error_text(error: &ParseError) -> String {
    match error {
        ParseError::MissingFields => "❌ Format salah!\n\n✅ Contoh yang benar:\n• `50000 makanan nasi padang`\n• `+1000000 gaji salary`\n\nKetik /help untuk panduan lengkap.".to_string(),
        ParseError::InvalidAmount => "❌ Jumlah harus berupa angka!\n\n✅ Contoh: `50000 makanan nasi padang`".to_string(),
        ParseError::NonPositiveAmount => "❌ Jumlah harus lebih dari 0!".to_string(),
    }
}

const STORE_ERROR_TEXT: &str = "❌ Gagal menyimpan data. Coba lagi dalam beberapa saat.";

const GOALS_USAGE_TEXT: &str = "🎯 SET FINANCIAL GOALS\n\nGunakan format: `/goals [jumlah] [deskripsi]`\n\nContoh:\n• `/goals 10000000 emergency fund`\n• `/goals 5000000 liburan bali`\n\n💡 Goals yang clear dan terukur lebih mudah dicapai!";

const HELP_TEXT: &str = "📚 *Panduan CatatUang Bot*\n\n\
*Format Pengeluaran:*\n`[jumlah] [kategori] [deskripsi]`\n\n\
*Format Pemasukan:*\n`+[jumlah] [kategori] [deskripsi]`\n\n\
*Contoh:*\n\
• `50000 makanan nasi padang`\n\
• `25000 transport ojek`\n\
• `+1000000 gaji salary`\n\n\
*Laporan:*\n\
/report - Hari ini\n\
/week - 7 hari terakhir\n\
/month - Bulan ini\n\
/year - Tahun ini\n\
/balance - Saldo total\n\n\
*Analisis:*\n\
/trends - Tren 6 bulan\n\
/analytics - Analitik bulan ini\n\
/breakdown - Breakdown kategori\n\
/patterns - Pola pengeluaran\n\
/compare - Banding bulan lalu\n\n\
*AI Advisor:*\n\
/advice - Analisis keuangan\n\
/budget [income] - Rekomendasi budget\n\
/budgetcheck [jumlah] [hari] - Cek kelayakan budget\n\
/dailyplan [budget] - Rencana harian\n\
/tips [kategori] - Tips hemat\n\
/goals [jumlah] [deskripsi] - Rencana nabung\n\n\
/income [jumlah] [deskripsi] - Catat pemasukan\n\
/categories - Daftar kategori";

fn start_text(first_name: &str) -> String {
    format!(
        "👋 Halo {first_name}! Selamat datang di CatatUang Bot!\n\n\
         🤖 *Cara Pakai:*\n\
         • Tulis pengeluaran: `50000 makanan nasi padang`\n\
         • Tulis pemasukan: `+1000000 gaji salary`\n\
         • Lihat laporan: /report\n\n\
         Ketik /help untuk daftar command lengkap.\n\n\
         💡 *Contoh:*\n`15000 transport ojek ke kantor`\n`+500000 bonus kinerja`"
    )
}

fn categories_text(taxonomy: &Taxonomy) -> String {
    let mut out = String::from("📊 *Kategori Tersedia:*\n");
    for category in taxonomy.canonical_categories() {
        out.push_str(&format!("\n• {category}"));
    }
    out.push_str("\n\n💡 Kategori lain tetap dicatat apa adanya, typo dikoreksi otomatis!");
    out
}
