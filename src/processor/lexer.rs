//! Very small hand-written tokenizer for scene description lines.
//!
//! A line is broken into whitespace separated tokens. There is no quoting
//! and no escaping; the section parser gives the tokens their meaning.
//
//  Grammar excerpts (informal):
//
//      line    ::= comment | header | data
//      comment ::= '#' …
//      header  ::= '[' NAME ']'
//      data    ::= token (WS token)*
//
//  Numbers are read the forgiving way scene files were always read:
//  `12abc` is 12, `abc` is 0, `-3.5e1x` is -35.0.

/// Split a raw line into its non-empty tokens.
pub fn split(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Permissive integer parse: optional leading whitespace and sign, then as
/// many decimal digits as are present. Anything else yields 0. Values outside
/// the `i32` range saturate.
pub fn atoi(token: &str) -> i32 {
    let mut chars = token.trim_start().chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = (value * 10 + digit as i64).min(i32::MAX as i64 + 1);
        chars.next();
    }

    let value = if negative { -value } else { value };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Permissive float parse: the longest prefix that reads as a decimal float
/// (sign, digits, fraction, exponent). No usable prefix yields 0.0.
pub fn atof(token: &str) -> f32 {
    let src = token.trim_start().as_bytes();
    let mut end = 0;

    if matches!(src.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while src.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if src.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while src.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    // exponent only counts when at least one digit follows it
    if matches!(src.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(src.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while src.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    std::str::from_utf8(&src[..end])
        .ok()
        .and_then(|prefix| prefix.parse::<f32>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{atof, atoi, split};

    #[test]
    fn test_split() {
        let test_cases = vec![
            ("1 textures\\mario.png 255 0 255", vec!["1", "textures\\mario.png", "255", "0", "255"]),
            ("  22\t120.0   219  7 0 ", vec!["22", "120.0", "219", "7", "0"]),
            ("", vec![]),
            ("   \t ", vec![]),
        ];

        for (src, expected) in test_cases {
            assert_eq!(split(src), expected, "splitting {src:?}");
        }
    }

    #[test]
    fn test_atoi_is_forgiving() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("-17"), -17);
        assert_eq!(atoi("+8"), 8);
        assert_eq!(atoi("12abc"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("-"), 0);
        assert_eq!(atoi("3.9"), 3);
    }

    #[test]
    fn test_atoi_saturates() {
        assert_eq!(atoi("99999999999"), i32::MAX);
        assert_eq!(atoi("-99999999999"), i32::MIN);
        assert_eq!(atoi("-2147483648"), i32::MIN);
    }

    #[test]
    fn test_atof() {
        assert_eq!(atof("10.0"), 10.0);
        assert_eq!(atof("-3.5"), -3.5);
        assert_eq!(atof("7"), 7.0);
        assert_eq!(atof(".5"), 0.5);
        assert_eq!(atof("5."), 5.0);
        assert_eq!(atof("-3.5e1x"), -35.0);
        assert_eq!(atof("2e"), 2.0);
        assert_eq!(atof("x1"), 0.0);
        assert_eq!(atof("."), 0.0);
        assert_eq!(atof(""), 0.0);
    }
}
