use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress stage of a job opportunity.
///
/// Forward progression is Target → Applied → Interviewing → Offer, one step
/// at a time. Rejected is reachable from any stage but only via a direct
/// field edit; the advance operation never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    Target,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl DealStage {
    /// Next stage in the ordered progression. `None` at the terminal stages.
    pub fn next(&self) -> Option<DealStage> {
        match self {
            DealStage::Target => Some(DealStage::Applied),
            DealStage::Applied => Some(DealStage::Interviewing),
            DealStage::Interviewing => Some(DealStage::Offer),
            DealStage::Offer | DealStage::Rejected => None,
        }
    }

    /// Fixed probability weight used by the pipeline forecast.
    pub fn weight(&self) -> f64 {
        match self {
            DealStage::Target => 0.10,
            DealStage::Applied => 0.20,
            DealStage::Interviewing => 0.50,
            DealStage::Offer => 0.90,
            DealStage::Rejected => 0.0,
        }
    }
}

/// A job opportunity in the pipeline.
///
/// `value` is a display string ("$220k") kept verbatim; the forecast parses
/// its digit magnitude on demand. Snake_case wire names match the
/// interchange document's deal records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub company: String,
    pub role: String,
    pub stage: DealStage,
    pub value: String,
    #[serde(default)]
    pub contacts: Vec<String>,
    pub next_step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression_order() {
        assert_eq!(DealStage::Target.next(), Some(DealStage::Applied));
        assert_eq!(DealStage::Applied.next(), Some(DealStage::Interviewing));
        assert_eq!(DealStage::Interviewing.next(), Some(DealStage::Offer));
    }

    #[test]
    fn test_terminal_stages_have_no_successor() {
        assert_eq!(DealStage::Offer.next(), None);
        assert_eq!(DealStage::Rejected.next(), None);
    }

    #[test]
    fn test_rejected_carries_zero_weight() {
        assert_eq!(DealStage::Rejected.weight(), 0.0);
    }

    #[test]
    fn test_deal_parses_without_optional_dates() {
        let json = r#"{
            "id": "1", "company": "Tebra", "role": "Director, GTM",
            "stage": "Interviewing", "value": "$250k", "next_step": "Panel Prep"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.stage, DealStage::Interviewing);
        assert!(deal.contacts.is_empty());
        assert!(deal.date.is_none());
    }
}
