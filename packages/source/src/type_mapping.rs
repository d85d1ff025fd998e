//! Incident type mapping utilities.
//!
//! Maps the free-text category and report type recorded by call center
//! operators to the coarse [`BigCategory`] taxonomy and to a [`Validity`]
//! class. Keyword sets overlap, so rules are checked in a fixed priority
//! order and the first match wins.

use callcenter_incident_models::{BigCategory, Validity};

/// Report types (lowercased) that mark a call as invalid.
const INVALID_REPORT_TYPES: &[&str] = &["prank", "ghost", "silent call"];

/// Maps a raw report type and category to the canonical [`BigCategory`].
///
/// Category keywords are matched as substrings of the uppercased, trimmed
/// category. When no category rule matches, the uppercased, trimmed report
/// type is compared exactly against the nuisance/information types. Returns
/// [`BigCategory::Other`] when nothing matches.
#[must_use]
pub fn classify(report_type: &str, category: &str) -> BigCategory {
    let category = category.trim().to_uppercase();

    // ── Category rules (priority order) ─────────────────────────────
    if contains_any(
        &category,
        &["LAKA LANTAS", "TRAFFIC LIGHT", "KEMACETAN", "RAMBU"],
    ) {
        return BigCategory::TrafficIncident;
    }
    if contains_any(&category, &["DARURAT MEDIS", "ODGJ", "PMKS"]) {
        return BigCategory::Health;
    }
    if contains_any(
        &category,
        &[
            "PJU",
            "JALAN RUSAK",
            "KABEL",
            "PDAM",
            "POHON",
            "BANJIR",
            "SUNGAI",
            "TIANG",
            "OLI",
        ],
    ) {
        return BigCategory::Infrastructure;
    }
    if contains_any(&category, &["KRIMINALITAS", "KEAMANAN", "PARKIR"]) {
        return BigCategory::Security;
    }
    if category.contains("KEBAKARAN") {
        return BigCategory::Fire;
    }
    if contains_any(
        &category,
        &["ADMINISTRASI", "REKLAME", "BEASISWA", "SIMULASI"],
    ) {
        return BigCategory::PublicService;
    }

    // ── Report type fallback ────────────────────────────────────────
    match report_type.trim().to_uppercase().as_str() {
        "PRANK" => BigCategory::Prank,
        "GHOST" => BigCategory::Ghost,
        "INFORMATION" => BigCategory::Information,
        _ => BigCategory::Other,
    }
}

/// Classifies a call as [`Validity::Invalid`] when its report type is one
/// of the nuisance types (prank, ghost, silent call), ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn is_valid(report_type: &str) -> Validity {
    let lower = report_type.trim().to_lowercase();
    if INVALID_REPORT_TYPES.contains(&lower.as_str()) {
        Validity::Invalid
    } else {
        Validity::Valid
    }
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_category_keywords() {
        assert_eq!(
            classify("Call", "Laka Lantas Tunggal"),
            BigCategory::TrafficIncident
        );
        assert_eq!(classify("Call", "Darurat Medis"), BigCategory::Health);
        assert_eq!(classify("Call", "Pohon Tumbang"), BigCategory::Infrastructure);
        assert_eq!(classify("Call", "PJU Mati"), BigCategory::Infrastructure);
        assert_eq!(classify("Call", "Parkir Liar"), BigCategory::Security);
        assert_eq!(classify("Call", "Kebakaran Rumah"), BigCategory::Fire);
        assert_eq!(
            classify("Call", "Informasi Beasiswa"),
            BigCategory::PublicService
        );
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        assert_eq!(
            classify("Call", "RAMBU LALU LINTAS RUSAK"),
            BigCategory::TrafficIncident
        );
        assert_eq!(
            classify("Call", "KABEL KEBAKARAN"),
            BigCategory::Infrastructure
        );
        // Category rules are checked before the report type fallback.
        assert_eq!(classify("Prank", "Pohon Tumbang"), BigCategory::Infrastructure);
    }

    #[test]
    fn falls_back_to_report_type() {
        assert_eq!(classify("Prank", "Lain-lain"), BigCategory::Prank);
        assert_eq!(classify("  ghost ", ""), BigCategory::Ghost);
        assert_eq!(classify("Information", "Lain-lain"), BigCategory::Information);
    }

    #[test]
    fn unknown_fallback() {
        assert_eq!(classify("Call", "Lain-lain"), BigCategory::Other);
        assert_eq!(classify("", ""), BigCategory::Other);
    }

    #[test]
    fn classification_is_deterministic() {
        for (report_type, category) in [
            ("Call", "Laka Lantas"),
            ("Prank", "Lain-lain"),
            ("Silent Call", "Kebakaran"),
        ] {
            assert_eq!(
                classify(report_type, category),
                classify(report_type, category)
            );
            assert_eq!(is_valid(report_type), is_valid(report_type));
        }
    }

    #[test]
    fn validity_denylist_is_exact() {
        assert_eq!(is_valid("Prank"), Validity::Invalid);
        assert_eq!(is_valid("  PRANK "), Validity::Invalid);
        assert_eq!(is_valid("Ghost"), Validity::Invalid);
        assert_eq!(is_valid("Silent Call"), Validity::Invalid);
        assert_eq!(is_valid("Accident"), Validity::Valid);
        assert_eq!(is_valid("Prank Call"), Validity::Valid);
        assert_eq!(is_valid(""), Validity::Valid);
    }
}
