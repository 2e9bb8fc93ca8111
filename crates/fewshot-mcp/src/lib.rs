//! # Fewshot MCP server
//!
//! Exposes prompt/exemplar curation over the Model Context Protocol:
//! CRUD tools backed by an in-memory [`fewshot::PromptService`], plus
//! the rendered prompts through the MCP prompts capability. Transport
//! and dispatch mechanics are owned by the `rmcp` runtime; this crate
//! only implements `ServerHandler`.
//!
//! # Tools
//!
//! - `add_prompt` - create a prompt (prefix + optional templates)
//! - `add_exemplar` - append a question/answer pair to a prompt
//! - `correct_exemplar` - replace a stored answer in place
//! - `get_prompt` - render a prompt, optionally with a novel input
//! - `get_prompt_info` - markdown summary of a prompt

pub mod server;
pub mod tools;

pub use server::FewShotServer;
