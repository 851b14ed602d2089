use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REPEATED_SPACES: Regex = Regex::new(r"\s{2,}").expect("valid regex");
    static ref COMMA_SPACING: Regex = Regex::new(r"\s*,\s*").expect("valid regex");
    // street up to the first comma, a 5-digit postal code, then an
    // optional locality segment whose leading comma may already have
    // been folded away by a previous formatting pass.
    static ref STREET_POSTAL_LOCALITY: Regex =
        Regex::new(r"^([^,]+?)\s*,\s*(\d{5})\b(?:\s*,?\s*(.+))?$").expect("valid regex");
}

/// Normalizes a backend "match address" into `<street>, <postal> <locality>`.
///
/// The upstream strings come with irregular spacing and an inconsistent
/// number of comma-separated segments; anything that does not fit the
/// expected shape is passed through normalized, with the known postal code
/// appended when it is missing from the text. Idempotent on its own output.
pub fn format_match_address(raw: &str, known_postal_code: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let collapsed = REPEATED_SPACES.replace_all(trimmed, " ");
    let normalized = COMMA_SPACING.replace_all(&collapsed, ", ");

    if let Some(captures) = STREET_POSTAL_LOCALITY.captures(&normalized) {
        let street = captures[1].trim();
        let postal_code = &captures[2];
        let locality = captures
            .get(3)
            .map(|segment| segment.as_str().trim())
            .filter(|segment| !segment.is_empty());
        return match locality {
            Some(locality) => format!("{street}, {postal_code} {locality}"),
            None => format!("{street}, {postal_code}"),
        };
    }

    if !known_postal_code.is_empty() && !normalized.contains(known_postal_code) {
        return format!("{normalized}, {known_postal_code}");
    }
    normalized.into_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::format_match_address;

    #[rstest]
    #[case("12 Rue A, 69003, Lyon 3e", "", "12 Rue A, 69003 Lyon 3e")]
    #[case("5 Rue B, 75001", "", "5 Rue B, 75001")]
    #[case("", "", "")]
    #[case("   ", "", "")]
    #[case("no-comma-text", "75001", "no-comma-text, 75001")]
    #[case("no-comma-text", "", "no-comma-text")]
    #[case("3 Quai C , 33000 ,  Bordeaux", "", "3 Quai C, 33000 Bordeaux")]
    #[case("8 Av D,33000,Bordeaux", "", "8 Av D, 33000 Bordeaux")]
    #[case("already has 75001 inside", "75001", "already has 75001 inside")]
    fn test_format_match_address(
        #[case] raw: &str,
        #[case] known_postal_code: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format_match_address(raw, known_postal_code), expected);
    }

    #[rstest]
    #[case("12 Rue A, 69003, Lyon 3e", "")]
    #[case("5 Rue B, 75001", "")]
    #[case("no-comma-text", "75001")]
    fn test_formatting_is_idempotent(#[case] raw: &str, #[case] known_postal_code: &str) {
        let once = format_match_address(raw, known_postal_code);
        let twice = format_match_address(&once, known_postal_code);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_six_digit_run_is_not_mistaken_for_a_postal_code() {
        assert_eq!(
            format_match_address("12 Rue A, 750012", "69003"),
            "12 Rue A, 750012, 69003"
        );
    }
}
