// Mock interview: question generation → sequential answers → feedback.
// The state machine in `session` is pure; `coach` adds the generator calls.

pub mod coach;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod session;
