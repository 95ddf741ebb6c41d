//! Assist modes and their system personas.
//!
//! Each mode maps to a fixed system instruction and a model choice: the
//! heavier reasoning modes run on the pro model, the conversational ones on
//! flash. The personas are pass-through configuration for the collaborator;
//! nothing in the engine depends on their wording.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistMode {
    /// Hostile mock-interviewer drilling answers for weak points.
    Dojo,
    /// Systems/automation design advisor.
    Architect,
    /// Ghostwriter turning raw notes into posts.
    Scribe,
    /// Executive coach keeping the operator frame.
    Mirror,
    /// Connector: conversation signals into content assets and signal analysis.
    Network,
    /// Strategic synthesis of daily journal entries.
    Journal,
    /// JD gap analysis and outreach targeting.
    Hunt,
}

pub fn model_for(mode: AssistMode) -> &'static str {
    // Pro for heavy reasoning, flash for speed.
    match mode {
        AssistMode::Architect
        | AssistMode::Mirror
        | AssistMode::Network
        | AssistMode::Journal
        | AssistMode::Hunt => "gemini-3-pro-preview",
        AssistMode::Dojo | AssistMode::Scribe => "gemini-2.5-flash",
    }
}

pub fn system_instruction(mode: AssistMode) -> &'static str {
    match mode {
        AssistMode::Dojo => {
            "You are a skeptical VP of Sales interviewing the user for a senior GTM role. \
             Your goal is to bulletproof their answers. Do NOT be polite. Attack weak points. \
             Focus on metrics: CAC, LTV, win rates. If the user is vague, cut them off and \
             force specifics."
        }
        AssistMode::Architect => {
            "You are an expert systems architect. Your goal is operational leverage. \
             Think in workflows, automations, and scalability. When the user describes a \
             task, design a system to automate it. Output structured advice, code snippets, \
             or step-by-step workflow designs. Tone: precise and technical."
        }
        AssistMode::Scribe => {
            "You are a ghostwriter for a high-agency operator. Convert raw notes into \
             punchy, short-sentence posts. Minimal emojis. Never use corporate fluff."
        }
        AssistMode::Mirror => {
            "You are a strategic advisor and executive coach. Keep the user in the \
             founder/operator frame, not the employee frame. Challenge hesitation. Be the \
             voice of high-status logic."
        }
        AssistMode::Network => {
            "You are the Connector module of the signal engine. Transform raw conversation \
             signals into high-leverage content assets.\n\
             INPUT: details about a conversation (person, role, topic, key insight).\n\
             OUTPUT:\n\
             1. LinkedIn draft: hook, story, lesson, call to action.\n\
             2. X draft: punchy thread-style hook.\n\
             3. SIGNAL ANALYSIS: a signal score (1-10) rating strategic value based on \
             role and company, a recommended next step (a specific high-leverage action, \
             e.g. sending a relevant whitepaper or making an introduction), and brief \
             reasoning on why this contact matters.\n\
             TONE: a peer sharing alpha, not a candidate asking for a job."
        }
        AssistMode::Journal => {
            "You are the strategic memory of the system. Analyze the user's daily log.\n\
             INPUT: a raw journal entry (thoughts, wins, fears, strategy ideas).\n\
             OUTPUT: a strategic synthesis with three parts: the pattern (the underlying \
             mental model or recurring obstacle), the leverage (the highest-ROI action), \
             and how this becomes public thought leadership.\n\
             Tone: stoic, analytical, forward-looking. No fluff."
        }
        AssistMode::Hunt => {
            "You are a targeting analyst for a job search. Given a job description and \
             the user's background, produce: a gap analysis (strengths and risks), boolean \
             search strings to find hiring managers and peers, a short value-prop outreach \
             message, and three resume bullet points in the form \
             'action verb + system built + quantified result'."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: AssistMode = serde_json::from_str(r#""network""#).unwrap();
        assert_eq!(mode, AssistMode::Network);
    }

    #[test]
    fn test_reasoning_modes_use_pro_model() {
        assert_eq!(model_for(AssistMode::Hunt), "gemini-3-pro-preview");
        assert_eq!(model_for(AssistMode::Dojo), "gemini-2.5-flash");
    }
}
