/// Derives a French department code from a 5-digit postal code.
///
/// Overseas codes (97x/98x) keep three digits. Corsican codes share the
/// `20` prefix across the 2A and 2B departments, so the prefix alone
/// cannot tell them apart and both are reported.
pub fn department_from_postal_code(postal_code: &str) -> String {
    if postal_code.is_empty() {
        return String::new();
    }
    if postal_code.starts_with("97") || postal_code.starts_with("98") {
        return postal_code.chars().take(3).collect();
    }
    if postal_code.starts_with("20") {
        return "2A/2B".to_string();
    }
    postal_code.chars().take(2).collect()
}
