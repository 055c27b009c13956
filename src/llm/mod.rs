//! LLM module for stokemeet
//!
//! Prompt construction and best-effort text generation via Gemini.

mod client;
mod gemini;
mod prompts;

pub use client::{
    build_provider, Generation, GenerationClient, GenerationOutcome, LlmProvider, ANSWER_EMPTY,
    ANSWER_FAILED, EMAIL_FAILED, SUMMARY_EMPTY, SUMMARY_FAILED,
};
pub use gemini::GeminiClient;
pub use prompts::{build_follow_up_email_prompt, build_question_prompt, build_summary_prompt};
