use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily log entry, optionally annotated by the AI collaborator.
///
/// The AI analysis is best-effort annotation, never load-bearing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

/// One scored mock-interview exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub layer: String,
    pub question: String,
    pub score: f64,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_entry_wire_names() {
        let entry = JournalEntry {
            id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 8).unwrap(),
            title: "Deployment Strategy".to_string(),
            content: "Flywheel is live.".to_string(),
            tags: vec!["Strategy".to_string()],
            ai_analysis: Some("The leverage point is the system.".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["aiAnalysis"], "The leverage point is the system.");
    }

    #[test]
    fn test_missing_analysis_deserializes_as_none() {
        let json = r#"{
            "id": "1", "date": "2024-12-08", "title": "t", "content": "c", "tags": []
        }"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert!(entry.ai_analysis.is_none());
    }
}
