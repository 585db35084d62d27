use crate::models::Scalar;
use bigdecimal::BigDecimal;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// 金额最多有效位数 (整数位 + 小数位)
pub const MAX_AMOUNT_DIGITS: usize = 64;

/// 将金额标量转换为十进制；无法转换时返回 None
pub fn normalize_amount(raw: &Scalar) -> Option<BigDecimal> {
    match raw {
        Scalar::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
        Scalar::Text(s) => parse_currency(s),
        Scalar::Other(_) => None,
    }
}

/// 解析 "$1,234.50" 这类货币字符串
pub fn parse_currency(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    let unsigned = trimmed
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(trimmed);
    let digits: String = unsigned.chars().filter(|&c| c != ',').collect();
    let digits = digits.trim();
    if !is_plain_decimal(digits) {
        return None;
    }
    BigDecimal::from_str(digits).ok()
}

/// 仅接受 `[+-]digits[.digits]`，不接受指数写法
fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let digit_count = int_part.len() + frac_part.len();

    digit_count > 0
        && digit_count <= MAX_AMOUNT_DIGITS
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}
