//! End-to-end flow over the pure core: parse chat messages, append them to a
//! file store, and render reports from the accumulated rows.

use catatuang::db::TransactionsDb;
use catatuang::parser;
use catatuang::report::{
    month_summary, render_breakdown, render_compare, render_period_report, render_trends, Period,
    PeriodSummary,
};
use catatuang::taxonomy::Taxonomy;
use catatuang::transaction::wib;
use chrono::{DateTime, FixedOffset, TimeZone};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    wib().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn messages_accumulate_into_a_month_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json").to_str().unwrap().to_string();
    let db = TransactionsDb::new(path).unwrap();
    let taxonomy = Taxonomy::new();

    let messages = [
        ("50000 makanan nasi padang", at(2024, 6, 1, 8)),
        ("25000 transport ojek", at(2024, 6, 1, 9)),
        ("+1.000.000 gaji salary", at(2024, 6, 2, 10)),
    ];
    for (text, now) in messages {
        let parsed = parser::parse(text, "telegram_it", now, &taxonomy).unwrap();
        db.append(parsed.transaction).unwrap();
    }

    let rows = db.rows();
    let now = at(2024, 6, 15, 12);
    let summary = month_summary(&rows, now);
    assert_eq!(
        summary,
        PeriodSummary {
            total_income: 1_000_000,
            total_expense: 75_000,
            balance: 925_000,
            category_totals: [
                ("makanan".to_string(), 50_000),
                ("transport".to_string(), 25_000)
            ]
            .into_iter()
            .collect(),
            transaction_count: 3,
        }
    );

    let report = render_period_report(&rows, Period::Month, now);
    assert!(report.contains("• Pemasukan: Rp 1.000.000"));
    assert!(report.contains("• Pengeluaran: Rp 75.000"));
    assert!(report.contains("• Saldo: Rp 925.000"));
    assert!(report.contains("📈 Total transaksi: 3"));
}

#[test]
fn typo_categories_do_not_fragment_report_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json").to_str().unwrap().to_string();
    let db = TransactionsDb::new(path).unwrap();
    let taxonomy = Taxonomy::new();

    for (text, now) in [
        ("10000 makanan sarapan", at(2024, 6, 1, 7)),
        ("20000 makan siang warteg", at(2024, 6, 1, 12)),
        ("30000 makanann malam", at(2024, 6, 1, 19)),
    ] {
        let parsed = parser::parse(text, "telegram_it", now, &taxonomy).unwrap();
        db.append(parsed.transaction).unwrap();
    }

    let summary = month_summary(&db.rows(), at(2024, 6, 2, 0));
    assert_eq!(summary.category_totals.len(), 1);
    assert_eq!(summary.category_totals.get("makanan"), Some(&60_000));
}

#[test]
fn derived_reports_render_from_multi_month_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json").to_str().unwrap().to_string();
    let db = TransactionsDb::new(path).unwrap();
    let taxonomy = Taxonomy::new();

    for (text, now) in [
        ("400000 makanan", at(2024, 5, 10, 12)),
        ("+2000000 gaji", at(2024, 5, 25, 9)),
        ("600000 makanan", at(2024, 6, 10, 12)),
        ("+2000000 gaji", at(2024, 6, 25, 9)),
    ] {
        let parsed = parser::parse(text, "telegram_it", now, &taxonomy).unwrap();
        db.append(parsed.transaction).unwrap();
    }

    let rows = db.rows();
    let now = at(2024, 6, 28, 12);

    let trends = render_trends(&rows);
    assert!(trends.contains("2024-05"));
    assert!(trends.contains("2024-06"));
    assert!(trends.contains("▲ 50.0%"));

    let compare = render_compare(&rows, now);
    assert!(compare.contains("Rp 400.000 → Rp 600.000"));

    let breakdown = render_breakdown(&rows, now);
    assert!(breakdown.contains("Makanan"));
    assert!(breakdown.contains("Savings rate: 70.0%"));
}
