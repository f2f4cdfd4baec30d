//! Human-facing identifiers printed on labels and barcodes.
//!
//! Codes are generated once at creation and never regenerated.

use chrono::{DateTime, Datelike, Utc};

fn day_stamp(date: DateTime<Utc>) -> String {
    format!("{:02}{:02}", date.month(), date.day())
}

/// `{direction}-{type}-{MMDD}`, the part shared by every code of a route and calendar day.
///
/// Sequences are counted per prefix, so two codes can only be equal when their
/// sequence numbers are.
pub fn code_prefix(direction_code: &str, type_code: &str, created_at: DateTime<Utc>) -> String {
    format!("{direction_code}-{type_code}-{}", day_stamp(created_at))
}

/// `{prefix}-C{n}` where `n` is the container's sequence within its prefix.
pub fn container_code(prefix: &str, sequence: i64) -> String {
    format!("{prefix}-C{sequence}")
}

/// `{prefix}-{m}` where `m` is the batch's sequence within its prefix.
pub fn batch_number(prefix: &str, sequence: i64) -> String {
    format!("{prefix}-{sequence}")
}

/// One code per piece: `{batch_number} {total}-{index}`, index starting at 1.
pub fn piece_codes(batch_number: &str, total_pieces: i32) -> Vec<String> {
    (1..=total_pieces)
        .map(|index| format!("{batch_number} {total_pieces}-{index}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_container_code() {
        let prefix = code_prefix("KR-UZ", "40HC", date());
        assert_eq!(prefix, "KR-UZ-40HC-0307");
        assert_eq!(container_code(&prefix, 3), "KR-UZ-40HC-0307-C3");
    }

    #[test]
    fn test_batch_number() {
        let prefix = code_prefix("KR-UZ", "40HC", date());
        assert_eq!(batch_number(&prefix, 12), "KR-UZ-40HC-0307-12");
    }

    #[test]
    fn test_prefix_ignores_year() {
        let next_year = Utc.with_ymd_and_hms(2025, 3, 7, 1, 0, 0).unwrap();
        assert_eq!(code_prefix("KR", "40FT", date()), code_prefix("KR", "40FT", next_year));
    }

    #[test]
    fn test_piece_codes() {
        let codes = piece_codes("KR-UZ-40HC-0307-1", 5);

        assert_eq!(codes.len(), 5);
        assert_eq!(codes[0], "KR-UZ-40HC-0307-1 5-1");
        assert_eq!(codes[4], "KR-UZ-40HC-0307-1 5-5");

        let mut unique = codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_no_piece_codes_for_empty_batch() {
        assert!(piece_codes("X", 0).is_empty());
    }
}
