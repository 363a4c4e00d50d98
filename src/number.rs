//! Number parsing for prompts and command-line options.
//!
//! Accepts an optional sign, `0x` hex, leading-`0` octal or plain decimal.
//! Anything left over after the digits makes the input invalid. Values too
//! large for `i64` saturate instead of failing.

/// 整数をパース（符号付き、0x/0 プレフィックス対応）
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, rest) = match *s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    // 桁は検査済みなので失敗するのは桁あふれだけ（上限に丸める）
    let magnitude = i64::from_str_radix(digits, radix).unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// 正の整数をパース（clap の value_parser 用）
pub fn parse_positive(s: &str) -> Result<usize, String> {
    match parse_int(s) {
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| format!("'{}' is too large", s)),
        Some(_) => Err(format!("'{}' must be greater than 0", s)),
        None => Err(format!("'{}' is not a number", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_int("100"), Some(100));
        assert_eq!(parse_int("  42 "), Some(42));
        assert_eq!(parse_int("0"), Some(0));
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert_eq!(parse_int("0x20"), Some(32));
        assert_eq!(parse_int("0XfF"), Some(255));
        assert_eq!(parse_int("010"), Some(8));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("-0x10"), Some(-16));
    }

    #[test]
    fn test_parse_saturates_on_overflow() {
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("0xffffffffffffffffff"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(-i64::MAX));
        assert_eq!(parse_int("99999999999999999999x"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("12abc"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("09"), None);
        assert_eq!(parse_int("--1"), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("16"), Ok(16));
        assert_eq!(parse_positive("0x8"), Ok(8));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-3").is_err());
        assert!(parse_positive("x").is_err());
    }
}
