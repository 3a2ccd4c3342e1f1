// Stored settings: the Gemini API key and the applicant's resume text.
// The popup reads and writes these through the settings routes; the answer
// pipeline reads them server-side. The API key is never part of Config.

pub mod handlers;
pub mod store;
