/*!
The fixed category taxonomy and the normalizer that maps free-text category
tokens onto it.

Categories are the aggregation key for every report, so a typo'd token must
either land on its canonical category or pass through untouched — silently
fragmenting "makanan" into typo variants would corrupt every percentage
downstream.
*/

use std::collections::HashSet;

/// Minimum similarity for a fuzzy match to be accepted.
const FUZZY_THRESHOLD: f64 = 0.6;

/// Result of normalizing a raw category token.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub canonical: String,
    /// True when the returned label differs from the (lower-cased, trimmed)
    /// input. Used to surface a "category corrected" notice.
    pub corrected: bool,
}

/// Immutable taxonomy, built once at startup and injected wherever category
/// normalization is needed. Iteration order is the declaration order below
/// and must stay deterministic: fuzzy-pass ties are broken by first match.
pub struct Taxonomy {
    entries: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl Taxonomy {
    pub fn new() -> Self {
        let entries = vec![
            (
                "makanan",
                vec!["makanan", "makan", "food", "kuliner", "jajan", "minuman"],
            ),
            (
                "transport",
                vec!["transport", "transportasi", "ojek", "bensin", "parkir"],
            ),
            ("belanja", vec!["belanja", "shopping", "beli"]),
            (
                "kesehatan",
                vec!["kesehatan", "medis", "obat", "dokter", "health"],
            ),
            (
                "hiburan",
                vec!["hiburan", "entertainment", "nonton", "game", "liburan"],
            ),
            (
                "pendidikan",
                vec!["pendidikan", "edukasi", "kursus", "sekolah", "education"],
            ),
            (
                "utilitas",
                vec!["utilitas", "listrik", "air", "internet", "pulsa", "utilities"],
            ),
            (
                "investasi",
                vec!["investasi", "investment", "saham", "reksadana"],
            ),
            ("gaji", vec!["gaji", "salary", "bonus", "freelance", "thr"]),
            ("lainnya", vec!["lainnya", "lain", "other", "misc"]),
        ];
        Taxonomy { entries }
    }

    pub fn canonical_categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Maps a free-text category token to its canonical category.
    ///
    /// Exact alias match wins immediately; otherwise the highest-scoring
    /// alias above [`FUZZY_THRESHOLD`] decides, first encountered winning
    /// ties. Anything below the threshold passes through unchanged.
    pub fn normalize(&self, raw: &str) -> Normalized {
        let raw = raw.trim().to_lowercase();

        for (canonical, aliases) in &self.entries {
            if aliases.iter().any(|a| *a == raw) {
                return Normalized {
                    canonical: canonical.to_string(),
                    corrected: *canonical != raw,
                };
            }
        }

        let mut best: Option<(&str, f64)> = None;
        for (canonical, aliases) in &self.entries {
            for alias in aliases {
                let score = similarity(&raw, alias);
                if score >= FUZZY_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                    best = Some((*canonical, score));
                }
            }
        }

        match best {
            Some((canonical, _)) => Normalized {
                canonical: canonical.to_string(),
                corrected: canonical != raw,
            },
            None => Normalized {
                canonical: raw,
                corrected: false,
            },
        }
    }
}

/// Character-set Jaccard similarity with a length penalty:
/// `jaccard * (1 - length_penalty * 0.3)` where `length_penalty` is the
/// relative length difference. Equal strings score 1.0, an empty operand 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();
    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    let jaccard = intersection / union;

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let length_penalty = (len_a - len_b).abs() / len_a.max(len_b);

    jaccard * (1.0 - length_penalty * 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_alias_is_corrected_to_canonical() {
        let tax = Taxonomy::new();
        let n = tax.normalize("makan");
        assert_eq!(n.canonical, "makanan");
        assert!(n.corrected);
    }

    #[test]
    fn canonical_input_is_not_corrected() {
        let tax = Taxonomy::new();
        let n = tax.normalize("makanan");
        assert_eq!(n.canonical, "makanan");
        assert!(!n.corrected);
    }

    #[test]
    fn input_is_trimmed_and_lowercased() {
        let tax = Taxonomy::new();
        let n = tax.normalize("  Gaji ");
        assert_eq!(n.canonical, "gaji");
        assert!(!n.corrected);
    }

    #[test]
    fn typo_lands_on_fuzzy_match() {
        let tax = Taxonomy::new();
        let n = tax.normalize("makanann");
        assert_eq!(n.canonical, "makanan");
        assert!(n.corrected);
    }

    #[test]
    fn unrelated_token_passes_through() {
        let tax = Taxonomy::new();
        let n = tax.normalize("xyzzyplugh");
        assert_eq!(n.canonical, "xyzzyplugh");
        assert!(!n.corrected);
    }

    #[test]
    fn normalize_is_idempotent() {
        let tax = Taxonomy::new();
        for raw in ["makan", "transpor", "xyzzyplugh", "GAJI", "belanjaa"] {
            let once = tax.normalize(raw);
            let twice = tax.normalize(&once.canonical);
            assert_eq!(twice.canonical, once.canonical, "raw = {raw}");
            assert!(!twice.corrected, "raw = {raw}");
        }
    }

    #[test]
    fn normalize_is_deterministic() {
        let tax = Taxonomy::new();
        assert_eq!(tax.normalize("hibura"), tax.normalize("hibura"));
    }

    #[test]
    fn similarity_of_equal_strings_is_one() {
        assert_eq!(similarity("gaji", "gaji"), 1.0);
    }

    #[test]
    fn similarity_of_empty_string_is_zero() {
        assert_eq!(similarity("", "gaji"), 0.0);
        assert_eq!(similarity("gaji", ""), 0.0);
    }

    #[test]
    fn similarity_counts_repeated_characters_once() {
        // "aab" and "ab" share the full character set {a, b}.
        let expected = 1.0 * (1.0 - (1.0 / 3.0) * 0.3);
        assert!((similarity("aab", "ab") - expected).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_share_taxonomy_order() {
        let tax = Taxonomy::new();
        let cats: Vec<&str> = tax.canonical_categories().collect();
        assert_eq!(cats[0], "makanan");
        assert_eq!(cats.len(), 10);
    }
}
