// Skill scoring: resume intake, prompt assembly, the scoring call and the
// follow-up re-scoring loop. All LLM calls go through llm_client.

pub mod handlers;
pub mod intake;
pub mod prompts;
pub mod scoring;
