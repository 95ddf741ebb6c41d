/// Content-factory prompt: raw conversation details in, content assets and
/// signal analysis out (free text, streamed).
pub const SIGNAL_PROMPT_TEMPLATE: &str = "\
LOG INTERACTION:
Name: {name}
Role: {role}
Company: {company}
Topic: {topic}
Key Insight: {insight}

TASK:
1. LinkedIn draft: hook, story, lesson, call to action.
2. X draft: punchy thread-style hook.
3. SIGNAL ANALYSIS: signal score (1-10), recommended next step, reasoning.";

/// Structured extraction prompt. The response must be bare JSON; the caller
/// strips fences and rejects anything that does not parse.
pub const EXTRACT_PROMPT_TEMPLATE: &str = "\
CONTACT:
Name: {name}
Role: {role}
Company: {company}
Topic: {topic}
Key Insight: {insight}

Rate this contact's strategic value. Respond with valid JSON only, no prose,
no markdown fences, in exactly this shape:
{\"signal_score\": <integer 1-10>, \"recommended_next_step\": \"<specific action>\", \"reasoning\": \"<one or two sentences>\"}";

pub fn render(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in fields {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
