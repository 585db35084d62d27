use crate::models::{GougingFinding, LineItem};
use crate::reference::ReferenceRateTable;
use crate::service::normalizer::normalize_amount;
use bigdecimal::{BigDecimal, One, Signed, Zero};
use std::fmt;

/// 明细被跳过的原因 (只记日志，不向上传播)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingCode,
    UnknownCode(String),
    UncoercibleAmount(String),
    NegativeAmount(String),
    NonPositiveRate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCode => write!(f, "missing billing code"),
            SkipReason::UnknownCode(code) => write!(f, "no reference rate for code {}", code),
            SkipReason::UncoercibleAmount(code) => write!(f, "amount for code {} is not numeric", code),
            SkipReason::NegativeAmount(code) => write!(f, "amount for code {} is negative", code),
            SkipReason::NonPositiveRate(code) => write!(f, "reference rate for code {} is not positive", code),
        }
    }
}

/// 逐条比对明细与参考价，跳过不合规明细，保持输入顺序
pub fn compute_findings(items: &[LineItem], rates: &ReferenceRateTable) -> Vec<GougingFinding> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match assess_line_item(item, rates) {
            Ok(finding) => Some(finding),
            Err(reason) => {
                tracing::debug!("line item {} skipped: {}", idx, reason);
                None
            }
        })
        .collect()
}

/// 单条明细比对
pub fn assess_line_item(
    item: &LineItem,
    rates: &ReferenceRateTable,
) -> Result<GougingFinding, SkipReason> {
    // 1. 编码
    let code = item.billing_code().ok_or(SkipReason::MissingCode)?;

    // 2. 参考价
    let rate = rates
        .get(&code)
        .ok_or_else(|| SkipReason::UnknownCode(code.clone()))?;

    // 3. 金额
    let amount = item
        .amount
        .as_ref()
        .and_then(normalize_amount)
        .ok_or_else(|| SkipReason::UncoercibleAmount(code.clone()))?;
    if amount.is_negative() {
        return Err(SkipReason::NegativeAmount(code));
    }

    // 4. 参考价必须为正，避免除零
    if *rate <= BigDecimal::zero() {
        return Err(SkipReason::NonPositiveRate(code));
    }

    // 5. 倍数
    let markup = round_half_up(&(&amount / rate), 2);

    Ok(GougingFinding {
        billing_code: code,
        charged_amount: amount,
        reference_rate: rate.clone(),
        markup_multiple: markup,
    })
}

/// 四舍五入 (远离零方向) 到指定小数位，精确十进制运算
pub fn round_half_up(value: &BigDecimal, places: i64) -> BigDecimal {
    // 先截断到 places + 1 位，再按该位进位
    let truncated = value.abs().with_scale(places + 1);
    let factor = BigDecimal::new(One::one(), -places);
    let half = BigDecimal::new(5.into(), 1);
    let shifted = (truncated * &factor + half).with_scale(0);
    let (digits, _) = shifted.as_bigint_and_exponent();
    let rounded = BigDecimal::new(digits, places);
    if value.is_negative() {
        -rounded
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn rates(entries: &[(&str, &str)]) -> ReferenceRateTable {
        ReferenceRateTable::from_entries(entries.iter().map(|(c, r)| (*c, dec(r))))
    }

    #[test]
    fn currency_amount_yields_finding() {
        let items = vec![LineItem::new("99213", "$500.00")];
        let findings = compute_findings(&items, &rates(&[("99213", "100.0")]));

        assert_eq!(
            findings,
            vec![GougingFinding {
                billing_code: "99213".to_string(),
                charged_amount: dec("500"),
                reference_rate: dec("100"),
                markup_multiple: dec("5"),
            }]
        );
    }

    #[test]
    fn empty_code_is_skipped_even_if_table_has_it() {
        let items = vec![LineItem::new("", 200i64)];
        let table = rates(&[("", "50")]);
        assert!(compute_findings(&items, &table).is_empty());
        assert_eq!(assess_line_item(&items[0], &table), Err(SkipReason::MissingCode));
    }

    #[test]
    fn malformed_amount_is_skipped() {
        let items = vec![LineItem::new("99213", "not-a-number")];
        let table = rates(&[("99213", "100.0")]);
        assert!(compute_findings(&items, &table).is_empty());
        assert_eq!(
            assess_line_item(&items[0], &table),
            Err(SkipReason::UncoercibleAmount("99213".to_string()))
        );
    }

    #[test]
    fn zero_rate_is_skipped_without_panicking() {
        let items = vec![LineItem::new("99213", 100i64)];
        let table = rates(&[("99213", "0")]);
        assert!(compute_findings(&items, &table).is_empty());
        assert_eq!(
            assess_line_item(&items[0], &table),
            Err(SkipReason::NonPositiveRate("99213".to_string()))
        );
    }

    #[test]
    fn unknown_code_and_missing_amount_are_skipped() {
        let table = rates(&[("99213", "100")]);
        let unknown = LineItem::new("11111", 100i64);
        let no_amount = LineItem {
            cpt_code: Some(Scalar::from("99213")),
            ..LineItem::default()
        };
        let negative = LineItem::new("99213", "-$20.00");

        assert_eq!(
            assess_line_item(&unknown, &table),
            Err(SkipReason::UnknownCode("11111".to_string()))
        );
        assert!(matches!(
            assess_line_item(&no_amount, &table),
            Err(SkipReason::UncoercibleAmount(_))
        ));
        assert!(matches!(
            assess_line_item(&negative, &table),
            Err(SkipReason::UncoercibleAmount(_)) | Err(SkipReason::NegativeAmount(_))
        ));
    }

    #[test]
    fn order_is_preserved_and_skips_are_dropped() {
        let table = rates(&[("A", "10"), ("B", "20"), ("C", "30")]);
        let items = vec![
            LineItem::new("C", 90i64),
            LineItem::new("X", 5i64),
            LineItem::new(" A ", "$15.00"),
            LineItem::new("B", "oops"),
            LineItem::new("B", 10i64),
        ];

        let findings = compute_findings(&items, &table);
        let codes: Vec<_> = findings.iter().map(|f| f.billing_code.as_str()).collect();
        assert_eq!(codes, vec!["C", "A", "B"]);
        assert_eq!(findings[0].markup_multiple, dec("3"));
        assert_eq!(findings[1].markup_multiple, dec("1.5"));
        assert_eq!(findings[2].markup_multiple, dec("0.5"));
        assert!(findings.len() <= items.len());
    }

    #[test]
    fn zero_amount_is_a_valid_charge() {
        let findings = compute_findings(&[LineItem::new("A", 0i64)], &rates(&[("A", "10")]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].markup_multiple, dec("0"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let table = rates(&[("99213", "92.03")]);
        let items = vec![LineItem::new("99213", "$1,234.50"), LineItem::new("0000", 1i64)];
        assert_eq!(compute_findings(&items, &table), compute_findings(&items, &table));
    }

    #[test]
    fn markup_is_rounded_to_two_places() {
        let findings = compute_findings(
            &[LineItem::new("99213", "$1,234.50")],
            &rates(&[("99213", "92.03")]),
        );
        // 1234.50 / 92.03 = 13.4140...
        assert_eq!(findings[0].charged_amount, dec("1234.50"));
        assert_eq!(findings[0].markup_multiple, dec("13.41"));
    }

    #[test]
    fn halfway_cases_round_away_from_zero() {
        assert_eq!(round_half_up(&dec("2.345"), 2), dec("2.35"));
        assert_eq!(round_half_up(&dec("2.355"), 2), dec("2.36"));
        assert_eq!(round_half_up(&dec("2.344"), 2), dec("2.34"));
        assert_eq!(round_half_up(&dec("2.3449999"), 2), dec("2.34"));
        assert_eq!(round_half_up(&dec("-2.345"), 2), dec("-2.35"));
        assert_eq!(round_half_up(&dec("7"), 2), dec("7.00"));
    }

    #[test]
    fn exponent_amounts_are_skipped() {
        let table = rates(&[("99213", "92.03")]);
        let items = vec![
            LineItem::new("99213", "1e-200000000"),
            LineItem::new("99213", "1e200000000"),
        ];

        assert!(compute_findings(&items, &table).is_empty());
        assert_eq!(
            assess_line_item(&items[0], &table),
            Err(SkipReason::UncoercibleAmount("99213".to_string()))
        );
    }

    #[test]
    fn tiny_numeric_amount_rounds_to_zero() {
        let items = vec![LineItem::new("99213", 1e-300)];
        let findings = compute_findings(&items, &rates(&[("99213", "92.03")]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].markup_multiple, dec("0"));
    }

    #[test]
    fn long_fraction_rounds_from_truncated_digits() {
        assert_eq!(round_half_up(&dec("13.41499999999999999999999999"), 2), dec("13.41"));
        assert_eq!(round_half_up(&dec("13.415000000000000000000000001"), 2), dec("13.42"));
    }

    #[test]
    fn exact_halfway_division_rounds_up() {
        // 469 / 200 = 2.345
        let findings = compute_findings(&[LineItem::new("A", 469i64)], &rates(&[("A", "200")]));
        assert_eq!(findings[0].markup_multiple, dec("2.35"));
    }
}
