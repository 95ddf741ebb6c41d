//! Pipeline Valuator — probability-weighted forecast over the deal pipeline.
//!
//! Weights per stage: Target 10%, Applied 20%, Interviewing 50%, Offer 90%,
//! Rejected 0%. Deal values are display strings ("$220k"); parsing strips
//! every non-digit character, so the scale unit stays implicit and must be
//! consistent across the pipeline. Malformed values contribute 0 rather
//! than failing.

use crate::models::deal::Deal;

/// Parses the digit magnitude out of a display value string.
/// "$220k" → 220, "TBD" → 0, "N/A" → 0.
pub fn parse_deal_value(value: &str) -> u64 {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Sum over all deals of `parsed_value * stage_weight`.
pub fn weighted_forecast(deals: &[Deal]) -> f64 {
    deals
        .iter()
        .map(|d| parse_deal_value(&d.value) as f64 * d.stage.weight())
        .sum()
}

/// Formats a forecast total with thousands separators for display
/// ("1234567" → "1,234,567"). The underlying arithmetic stays plain.
pub fn format_with_separators(total: f64) -> String {
    let rounded = total.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::deal::DealStage;

    fn deal(value: &str, stage: DealStage) -> Deal {
        Deal {
            id: "1".to_string(),
            company: "Acme".to_string(),
            role: "Director".to_string(),
            stage,
            value: value.to_string(),
            contacts: vec![],
            next_step: String::new(),
            date: None,
            date_applied: None,
            next_follow_up: None,
        }
    }

    #[test]
    fn test_parse_strips_currency_and_unit() {
        assert_eq!(parse_deal_value("$220k"), 220);
        assert_eq!(parse_deal_value("250"), 250);
    }

    #[test]
    fn test_parse_unparseable_is_zero() {
        assert_eq!(parse_deal_value("TBD"), 0);
        assert_eq!(parse_deal_value("N/A"), 0);
        assert_eq!(parse_deal_value(""), 0);
    }

    #[test]
    fn test_empty_pipeline_forecasts_zero() {
        assert_eq!(weighted_forecast(&[]), 0.0);
    }

    #[test]
    fn test_forecast_applies_stage_weights() {
        let deals = vec![
            deal("$100k", DealStage::Target),
            deal("$100k", DealStage::Offer),
        ];
        // 100*0.10 + 100*0.90
        assert!((weighted_forecast(&deals) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejected_contributes_nothing() {
        let deals = vec![deal("$500k", DealStage::Rejected)];
        assert_eq!(weighted_forecast(&deals), 0.0);
    }

    #[test]
    fn test_malformed_value_degrades_to_zero() {
        let deals = vec![
            deal("TBD", DealStage::Interviewing),
            deal("$200k", DealStage::Applied),
        ];
        assert!((weighted_forecast(&deals) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_separator_formatting() {
        assert_eq!(format_with_separators(0.0), "0");
        assert_eq!(format_with_separators(999.0), "999");
        assert_eq!(format_with_separators(1234.0), "1,234");
        assert_eq!(format_with_separators(1234567.0), "1,234,567");
    }
}
