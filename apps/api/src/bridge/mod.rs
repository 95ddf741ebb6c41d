//! Snapshot Bridge — bidirectional transcoding between the store and the
//! versioned interchange document shared with the external system of record.
//!
//! Export captures every collection verbatim. Import is permissive: any
//! subset of the top-level keys is accepted, and each key that is present
//! replaces the matching store collection wholesale (last writer wins);
//! absent keys leave the store untouched. The document is parsed in full
//! before any mutation, so a malformed import never changes state.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::contact::Contact;
use crate::models::deal::Deal;
use crate::models::journal::InterviewSession;
use crate::store::NexusStore;

/// Interchange protocol version.
pub const SNAPSHOT_VERSION: &str = "5.0";
/// Producer identifier stamped on every export.
pub const SNAPSHOT_SOURCE: &str = "nexus_api";

/// The interchange document. Collection fields are `Option` so that import
/// can tell "present, replace" apart from "absent, preserve".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals: Option<Vec<Deal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outreach_log: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_log: Option<Vec<InterviewSession>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_text: Option<String>,
}

/// Captures the full store state as an interchange document. Every key is
/// present on export; only import treats keys as optional.
pub fn export_snapshot(store: &NexusStore, now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION.to_string(),
        exported_at: Some(now),
        source: SNAPSHOT_SOURCE.to_string(),
        contacts: Some(store.contacts().to_vec()),
        deals: Some(store.deals().to_vec()),
        outreach_log: Some(store.outreach_log().to_vec()),
        interview_log: Some(store.interview_log().to_vec()),
        resume_text: Some(store.resume_text().to_string()),
        jd_text: Some(store.jd_text().to_string()),
    }
}

/// Parses raw bytes into a snapshot. No schema validation beyond parse
/// success; partial documents are fine.
pub fn parse_snapshot(raw: &[u8]) -> Result<Snapshot, AppError> {
    serde_json::from_slice(raw)
        .map_err(|e| AppError::MalformedDocument(format!("snapshot parse failed: {e}")))
}

/// Applies a snapshot to the store: full replace for each present key.
/// Returns the names of the top-level keys that were applied.
pub fn apply_snapshot(store: &mut NexusStore, snapshot: Snapshot) -> Vec<&'static str> {
    let mut applied = Vec::new();
    if let Some(contacts) = snapshot.contacts {
        store.replace_contacts(contacts);
        applied.push("contacts");
    }
    if let Some(deals) = snapshot.deals {
        store.update_deals(deals);
        applied.push("deals");
    }
    if let Some(outreach_log) = snapshot.outreach_log {
        store.replace_outreach_log(outreach_log);
        applied.push("outreach_log");
    }
    if let Some(interview_log) = snapshot.interview_log {
        store.replace_interview_log(interview_log);
        applied.push("interview_log");
    }
    if let Some(resume_text) = snapshot.resume_text {
        store.set_resume_text(resume_text);
        applied.push("resume_text");
    }
    if let Some(jd_text) = snapshot.jd_text {
        store.set_jd_text(jd_text);
        applied.push("jd_text");
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::ContactStage;
    use crate::models::deal::DealStage;
    use crate::models::journal::JournalEntry;
    use chrono::NaiveDate;

    fn seeded_store() -> NexusStore {
        let mut store = NexusStore::new();
        store.add_contact(Contact {
            id: "1".to_string(),
            name: "John Smith".to_string(),
            role: "VP Sales".to_string(),
            company: "Tebra".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 8).unwrap(),
            stage: ContactStage::Hot,
            last_topic: "AI SDRs".to_string(),
            priority: Some(1),
            tags: Some(vec!["Hiring".to_string()]),
            signal_score: Some(9),
            reasoning: Some("decision maker".to_string()),
            history: None,
        });
        store.add_deal(Deal {
            id: "1".to_string(),
            company: "Tebra".to_string(),
            role: "Director, GTM".to_string(),
            stage: DealStage::Interviewing,
            value: "$250k".to_string(),
            contacts: vec!["John Smith".to_string()],
            next_step: "Panel Prep".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 1),
            date_applied: None,
            next_follow_up: None,
        });
        store.save_journal_entry(JournalEntry {
            id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 8).unwrap(),
            title: "Strategy".to_string(),
            content: "Flywheel live".to_string(),
            tags: vec![],
            ai_analysis: None,
        });
        store.set_resume_text("resume".to_string());
        store.set_jd_text("jd".to_string());
        store
    }

    #[test]
    fn test_export_stamps_version_and_source() {
        let store = seeded_store();
        let snapshot = export_snapshot(&store, Utc::now());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.source, SNAPSHOT_SOURCE);
        assert!(snapshot.exported_at.is_some());
    }

    #[test]
    fn test_round_trip_reproduces_store_state() {
        let store = seeded_store();
        let raw = serde_json::to_vec(&export_snapshot(&store, Utc::now())).unwrap();

        let mut restored = NexusStore::new();
        let snapshot = parse_snapshot(&raw).unwrap();
        apply_snapshot(&mut restored, snapshot);

        assert_eq!(restored.contacts(), store.contacts());
        assert_eq!(restored.deals(), store.deals());
        assert_eq!(restored.interview_log(), store.interview_log());
        assert_eq!(restored.resume_text(), store.resume_text());
        assert_eq!(restored.jd_text(), store.jd_text());
    }

    #[test]
    fn test_partial_import_preserves_absent_collections() {
        let mut store = seeded_store();
        let raw = br#"{
            "version": "5.0",
            "source": "streamlit",
            "deals": []
        }"#;
        let applied = apply_snapshot(&mut store, parse_snapshot(raw).unwrap());

        assert_eq!(applied, vec!["deals"]);
        assert!(store.deals().is_empty());
        assert_eq!(store.contacts().len(), 1);
        assert_eq!(store.resume_text(), "resume");
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let err = parse_snapshot(b"not json at all").unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_import_accepts_foreign_producer_document() {
        // The Python side of the bridge produces the same shape with its own
        // source tag; ingest only cares about parse success.
        let raw = br#"{
            "version": "5.0",
            "exported_at": "2024-12-08T10:00:00Z",
            "source": "streamlit",
            "contacts": [{
                "id": "7", "name": "Mike Ross", "role": "Founder",
                "company": "Stealth", "date": "2024-12-06",
                "stage": "Cold", "lastTopic": "Zero Trust Security"
            }]
        }"#;
        let snapshot = parse_snapshot(raw).unwrap();
        let mut store = NexusStore::new();
        apply_snapshot(&mut store, snapshot);
        assert_eq!(store.contacts()[0].stage, ContactStage::Cold);
    }

    #[test]
    fn test_outreach_log_survives_round_trip_opaquely() {
        let mut store = NexusStore::new();
        store.replace_outreach_log(vec![serde_json::json!({"channel": "email", "n": 3})]);
        let raw = serde_json::to_vec(&export_snapshot(&store, Utc::now())).unwrap();
        let mut restored = NexusStore::new();
        apply_snapshot(&mut restored, parse_snapshot(&raw).unwrap());
        assert_eq!(restored.outreach_log(), store.outreach_log());
    }
}
