/// Hunt analysis prompt: JD plus resume context in, tactical analysis out
/// (free text, streamed).
pub const HUNT_ANALYZE_PROMPT_TEMPLATE: &str = "\
JOB DESCRIPTION:
{jd_text}

RESUME CONTEXT:
{resume_text}

Analyze this job description against the resume context.

Provide the following sections:
1. Gap Analysis: strengths and risks.
2. Boolean Search Strings: to find hiring managers and peers.
3. Sniper Message: a short value-prop outreach message.
4. Resume Optimization: requirements the resume does not fully capture, plus
   three bullet points to add, each 'action verb + system built + quantified result'.";
