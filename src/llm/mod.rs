//! Generative rewrite collaborator — an optional alternative to the local
//! transformer, backed by the Gemini API.
//!
//! Nothing here is on the default path. Failures never propagate: the
//! caller always gets text back.

pub mod prompts;
pub mod response;
pub mod rewrite;

pub use rewrite::{ai_rewrite, try_ai_rewrite, RewriteError};
