//! Text coercion used by cell editors.
//!
//! Cell input is never rejected: whatever the user types is coerced to an
//! integer on a best-effort basis and anything unreadable becomes zero.

/// Coerces cell text to a base-10 integer.
///
/// Leading whitespace is skipped, one optional `+` or `-` sign is accepted,
/// and the longest run of ASCII digits that follows is read. Anything after
/// the digits is ignored. Text without a leading number yields `0`, and
/// numbers too large for `i64` saturate at the nearest bound.
///
/// # Examples
///
/// ```
/// use twobytwo::domain::parse_cell_input;
///
/// assert_eq!(parse_cell_input("42"), 42);
/// assert_eq!(parse_cell_input("  -7 apples"), -7);
/// assert_eq!(parse_cell_input("12.9"), 12);
/// assert_eq!(parse_cell_input("abc"), 0);
/// assert_eq!(parse_cell_input(""), 0);
/// ```
pub fn parse_cell_input(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }
    value
}
