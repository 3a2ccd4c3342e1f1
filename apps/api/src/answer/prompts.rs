//! Prompt template for the application answer.

use crate::scan::extractor::{truncate_chars, ScannedData};

/// The scanned description is clipped before templating so one oversized
/// page cannot blow up the request.
pub const PROMPT_DESCRIPTION_CAP: usize = 5_000;

pub const ANSWER_PROMPT_TEMPLATE: &str = r#"Context: You are a helpful assistant for a job applicant. The user is applying for a job at "{company_name}" for the position of "{job_title}".

Job Description Snippet:
"{description}"

User Resume:
"{resume}"

Task: Write a genuine, professional, and enthusiastic answer to the question "Why do you want to join us?" or "What interests you about this position?".

Requirements:
- Make a direct reference to the company's products, culture, or specific requirements mentioned in the job description.
- Connect these details to the user's experience/skills in the resume.
- Keep the tone personal and human, avoiding overused AI buzzwords (like "delve", "foster", "testament").
- Keep it concise (around 100-150 words).
- Output ONLY the answer text, no preamble or quotes."#;

pub fn build_answer_prompt(data: &ScannedData, resume: &str) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{company_name}", &data.company_name)
        .replace("{job_title}", &data.job_title)
        .replace(
            "{description}",
            &truncate_chars(&data.description, PROMPT_DESCRIPTION_CAP),
        )
        .replace("{resume}", resume)
}
