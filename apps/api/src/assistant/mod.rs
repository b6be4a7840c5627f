// Program assistant: chat about the academic program with the skill scores
// as context, plus short suggested answers for follow-up questions.

pub mod chat;
pub mod handlers;
pub mod prompts;
pub mod suggestions;
