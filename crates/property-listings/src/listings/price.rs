/// Recovers the numeric amount from a formatted price string.
///
/// Strips the currency symbol and thousands separators, then reads the
/// leading run of digits; anything trailing it (a " / week", " / night", or
/// " / year" suffix) is ignored. Returns `None` when no digits lead the
/// cleaned string, e.g. "Contact agent".
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '₦' | ',')).collect();
    let digits: String = cleaned
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
