//! Maps free-text model replies (and gold labels) onto [`CanonicalLabel`].
//!
//! Rules are tried in order and the first hit wins: exact label, Chinese
//! synonyms, English word match, then the `NOT ENOUGH INFO` fallback.

use crate::types::CanonicalLabel;
use once_cell::sync::Lazy;
use regex::Regex;

const SUPPORTS_ZH: &[&str] = &["支持", "为真", "為真"];
const REFUTES_ZH: &[&str] = &["反驳", "反駁", "为假", "為假"];
const NEI_ZH: &[&str] = &["不确定", "不確定", "信息不足", "資訊不足"];

static SUPPORTS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bsupports?\b").expect("static regex"));
static REFUTES_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\brefutes?\b").expect("static regex"));

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Never fails; anything unrecognised is `NOT ENOUGH INFO`.
pub fn normalize_label(text: &str) -> CanonicalLabel {
    let t = text.trim();
    let lower = t.to_lowercase();

    if lower == "supports" {
        return CanonicalLabel::Supports;
    }
    if lower == "refutes" {
        return CanonicalLabel::Refutes;
    }
    if t.to_uppercase() == "NOT ENOUGH INFO" {
        return CanonicalLabel::NotEnoughInfo;
    }

    if contains_any(t, SUPPORTS_ZH) {
        return CanonicalLabel::Supports;
    }
    if contains_any(t, REFUTES_ZH) {
        return CanonicalLabel::Refutes;
    }
    if contains_any(t, NEI_ZH) {
        return CanonicalLabel::NotEnoughInfo;
    }

    if SUPPORTS_WORD.is_match(&lower) {
        return CanonicalLabel::Supports;
    }
    if REFUTES_WORD.is_match(&lower) {
        return CanonicalLabel::Refutes;
    }

    if lower.contains("not enough info") {
        return CanonicalLabel::NotEnoughInfo;
    }

    CanonicalLabel::NotEnoughInfo
}
