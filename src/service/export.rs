use crate::models::GougingFinding;
use std::io::Write;

/// 导出比价结果为 CSV
pub fn write_findings_csv<W: Write>(findings: &[GougingFinding], out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["cpt_code", "charged_amount", "medicare_rate", "gouging_multiple"])?;

    for finding in findings {
        writer.write_record(&[
            finding.billing_code.clone(),
            finding.charged_amount.to_string(),
            finding.reference_rate.to_string(),
            finding.markup_multiple.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn writes_header_and_rows() {
        let findings = vec![GougingFinding {
            billing_code: "99213".to_string(),
            charged_amount: BigDecimal::from_str("1234.50").unwrap(),
            reference_rate: BigDecimal::from_str("92.03").unwrap(),
            markup_multiple: BigDecimal::from_str("13.41").unwrap(),
        }];

        let mut buf = Vec::new();
        write_findings_csv(&findings, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "cpt_code,charged_amount,medicare_rate,gouging_multiple\n99213,1234.50,92.03,13.41\n"
        );
    }

    #[test]
    fn empty_findings_write_only_header() {
        let mut buf = Vec::new();
        write_findings_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "cpt_code,charged_amount,medicare_rate,gouging_multiple\n"
        );
    }
}
