//! Rule-based advice used whenever the LLM is unavailable. Deterministic:
//! the same prompt always yields the same tip.

use crate::fmt::rupiah;

const GENERIC_TIPS: [&str; 5] = [
    "💡 Tips: Catat terus pengeluaranmu untuk kontrol yang lebih baik!",
    "💡 Tips: Sisihkan 20% penghasilan untuk tabungan dan investasi.",
    "💡 Tips: Review pengeluaran mingguan untuk mencari area penghematan.",
    "💡 Tips: Buat emergency fund minimal 6 bulan pengeluaran.",
    "💡 Tips: Investasi rutin lebih baik daripada lump sum besar.",
];

/// Picks a tip by scanning the prompt for known category keywords, else a
/// generic tip chosen by a stable hash of the prompt.
pub fn rule_based_advice(prompt: &str) -> String {
    let prompt = prompt.to_lowercase();

    if prompt.contains("makanan") || prompt.contains("food") {
        return "💡 Tips: Coba meal prep untuk hemat pengeluaran makanan! Masak sendiri bisa hemat 30-50%.".to_string();
    }
    if prompt.contains("transport") {
        return "💡 Tips: Pertimbangkan transportasi umum atau carpooling untuk menghemat biaya transport.".to_string();
    }
    if prompt.contains("hiburan") || prompt.contains("entertainment") {
        return "💡 Tips: Set budget hiburan maksimal 10% dari income bulanan ya!".to_string();
    }
    if prompt.contains("belanja") || prompt.contains("shopping") {
        return "💡 Tips: Tunggu 24 jam sebelum membeli barang non-esensial, sering kali keinginan hilang sendiri.".to_string();
    }

    let index = prompt.bytes().map(u64::from).sum::<u64>() as usize % GENERIC_TIPS.len();
    GENERIC_TIPS[index].to_string()
}

/// Installment math used when the LLM cannot plan a savings goal.
pub fn goals_fallback(goal_amount: i64, goal_description: &str) -> String {
    format!(
        "🎯 RENCANA MENCAPAI GOAL\n\n\
         💰 Target: {} - {}\n\n\
         📅 Opsi timeline:\n\
         • 6 bulan: {}/bulan\n\
         • 12 bulan: {}/bulan\n\
         • 24 bulan: {}/bulan\n\n\
         💡 Tips:\n\
         1. Set auto transfer ke rekening terpisah\n\
         2. Kurangi 1-2 kebiasaan pengeluaran kecil\n\
         3. Cari sumber income tambahan\n\n\
         🚀 Mulai hari ini, jangan tunda lagi!",
        rupiah(goal_amount),
        goal_description,
        rupiah(goal_amount / 6),
        rupiah(goal_amount / 12),
        rupiah(goal_amount / 24),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keywords_pick_the_matching_tip() {
        assert!(rule_based_advice("pengeluaran makanan nasi padang").contains("meal prep"));
        assert!(rule_based_advice("biaya transport ojek").contains("transportasi umum"));
        assert!(rule_based_advice("budget hiburan nonton").contains("10%"));
        assert!(rule_based_advice("belanja bulanan").contains("24 jam"));
    }

    #[test]
    fn generic_tip_is_deterministic() {
        let a = rule_based_advice("analisis keuangan bulan ini");
        let b = rule_based_advice("analisis keuangan bulan ini");
        assert_eq!(a, b);
        assert!(a.starts_with("💡 Tips:"));
    }

    #[test]
    fn goal_fallback_divides_by_timeline() {
        let text = goals_fallback(12_000_000, "emergency fund");
        assert!(text.contains("Rp 12.000.000 - emergency fund"));
        assert!(text.contains("• 6 bulan: Rp 2.000.000/bulan"));
        assert!(text.contains("• 12 bulan: Rp 1.000.000/bulan"));
        assert!(text.contains("• 24 bulan: Rp 500.000/bulan"));
    }
}
