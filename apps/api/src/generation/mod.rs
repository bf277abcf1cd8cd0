// Long-form generation: resume, cover letter and the career advice chat.
// All LLM calls go through llm_client; nothing here talks to Gemini directly.

pub mod advice;
pub mod cover_letter;
pub mod handlers;
pub mod prompts;
pub mod resume;
