// Answer generation: stored settings in, tailored application answer out.
// All Gemini traffic goes through llm_client; this module owns the prompt,
// the pipeline, and the history rows.

pub mod generator;
pub mod handlers;
pub mod prompts;
