//! Relationship/Pipeline Store — the authoritative in-memory state and the
//! single mutation surface.
//!
//! Owned by `AppState` behind an `Arc<RwLock<_>>`; handlers take the lock
//! for the duration of one synchronous mutation and never hold it across an
//! await. Health, resurface status, and forecasts are derived views and are
//! never written back here.

use serde_json::Value;

use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealStage};
use crate::models::journal::{InterviewSession, JournalEntry};

#[derive(Debug, Default)]
pub struct NexusStore {
    contacts: Vec<Contact>,
    deals: Vec<Deal>,
    journal: Vec<JournalEntry>,
    interview_log: Vec<InterviewSession>,
    /// Opaque, forward-compatible records carried through the snapshot.
    outreach_log: Vec<Value>,
    resume_text: String,
    jd_text: String,
}

impl NexusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn interview_log(&self) -> &[InterviewSession] {
        &self.interview_log
    }

    pub fn outreach_log(&self) -> &[Value] {
        &self.outreach_log
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn jd_text(&self) -> &str {
        &self.jd_text
    }

    pub fn find_contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn find_contact_mut(&mut self, id: &str) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    /// Prepends a contact. No de-dup by name or company: logging the same
    /// person twice produces two independent records, by design.
    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.insert(0, contact);
    }

    pub fn add_deal(&mut self, deal: Deal) {
        self.deals.insert(0, deal);
    }

    /// Wholesale replacement of the deal collection.
    pub fn update_deals(&mut self, deals: Vec<Deal>) {
        self.deals = deals;
    }

    /// Moves a deal one step along Target → Applied → Interviewing → Offer.
    /// A no-op at Offer and Rejected; Rejected is only ever set by a direct
    /// field edit. Returns the deal's stage after the call.
    pub fn advance_deal_stage(&mut self, deal_id: &str) -> Option<DealStage> {
        let deal = self.deals.iter_mut().find(|d| d.id == deal_id)?;
        if let Some(next) = deal.stage.next() {
            deal.stage = next;
        }
        Some(deal.stage)
    }

    /// Upsert by id. An existing entry is replaced in place, keeping its
    /// position; a new entry is prepended. If the incoming entry omits the
    /// AI analysis, the stored one is carried forward rather than clobbered.
    pub fn save_journal_entry(&mut self, mut entry: JournalEntry) {
        if let Some(existing) = self.journal.iter_mut().find(|e| e.id == entry.id) {
            if entry.ai_analysis.is_none() {
                entry.ai_analysis = existing.ai_analysis.take();
            }
            *existing = entry;
        } else {
            self.journal.insert(0, entry);
        }
    }

    pub fn log_interview(&mut self, session: InterviewSession) {
        self.interview_log.insert(0, session);
    }

    pub fn set_jd_text(&mut self, jd_text: String) {
        self.jd_text = jd_text;
    }

    pub fn set_resume_text(&mut self, resume_text: String) {
        self.resume_text = resume_text;
    }

    // Snapshot import applies per-collection replacement through these.

    pub fn replace_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    pub fn replace_interview_log(&mut self, interview_log: Vec<InterviewSession>) {
        self.interview_log = interview_log;
    }

    pub fn replace_outreach_log(&mut self, outreach_log: Vec<Value>) {
        self.outreach_log = outreach_log;
    }
}
