use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Relationship stage of a networking contact.
///
/// Deserialization is lossy on purpose: any unrecognized stage string maps to
/// `Warm`, the documented default-stage fallback. Snapshot ingestion is
/// permissive and must not reject a document over a stray stage label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactStage {
    Cold,
    #[default]
    Warm,
    Hot,
    Champion,
}

impl ContactStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStage::Cold => "Cold",
            ContactStage::Warm => "Warm",
            ContactStage::Hot => "Hot",
            ContactStage::Champion => "Champion",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "Cold" => ContactStage::Cold,
            "Warm" => ContactStage::Warm,
            "Hot" => ContactStage::Hot,
            "Champion" => ContactStage::Champion,
            _ => ContactStage::Warm,
        }
    }
}

impl Serialize for ContactStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContactStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ContactStage::from_str_lossy(&s))
    }
}

/// One logged touch with a contact: when, over what channel, what was said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub date: NaiveDate,
    pub channel: String,
    pub summary: String,
}

/// A person in the professional network.
///
/// Wire names are camelCase to stay byte-compatible with the interchange
/// document (`lastTopic`, `signalScore`, ...). `date` is the last-touch date;
/// health and resurface status are derived from it on read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    /// Last-touch date, refreshed on each new interaction.
    pub date: NaiveDate,
    pub stage: ContactStage,
    pub last_topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Interaction>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trip() {
        for stage in [
            ContactStage::Cold,
            ContactStage::Warm,
            ContactStage::Hot,
            ContactStage::Champion,
        ] {
            let json = serde_json::to_string(&stage).unwrap();
            let back: ContactStage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, stage);
        }
    }

    #[test]
    fn test_unknown_stage_falls_back_to_warm() {
        let stage: ContactStage = serde_json::from_str(r#""Lukewarm""#).unwrap();
        assert_eq!(stage, ContactStage::Warm);
    }

    #[test]
    fn test_contact_wire_names_are_camel_case() {
        let contact = Contact {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            role: "VP Sales".to_string(),
            company: "Tebra".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 8).unwrap(),
            stage: ContactStage::Hot,
            last_topic: "AI SDRs".to_string(),
            priority: None,
            tags: None,
            signal_score: Some(8),
            reasoning: None,
            history: None,
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["lastTopic"], "AI SDRs");
        assert_eq!(json["signalScore"], 8);
        assert_eq!(json["date"], "2024-12-08");
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn test_contact_parses_minimal_document() {
        let json = r#"{
            "id": "2", "name": "Sarah Chen", "role": "Head of GTM",
            "company": "Adobe", "date": "2024-12-07", "stage": "Warm",
            "lastTopic": "Partner Ecosystems"
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.stage, ContactStage::Warm);
        assert!(contact.tags.is_none());
        assert!(contact.history.is_none());
    }
}
