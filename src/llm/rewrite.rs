//! Generative rewrite — asks Gemini to rewrite a draft instead of running
//! the local transformer.
//!
//! Best-effort only. `ai_rewrite` never fails: any problem is logged and
//! the original text comes back unchanged.

use super::prompts::{build_rewrite_prompt, REWRITE_TEMPERATURE};
use super::response;
use crate::config::RewriteSettings;

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Nothing to rewrite")]
    EmptyInput,

    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no text")]
    EmptyResponse,
}

/// Rewrite `text` through the model, falling back to `text` on any error.
pub async fn ai_rewrite(text: &str, settings: &RewriteSettings) -> String {
    match try_ai_rewrite(text, settings).await {
        Ok(rewritten) => rewritten,
        Err(RewriteError::EmptyInput) => text.to_string(),
        Err(e @ RewriteError::MissingApiKey) => {
            log::warn!("[LLM] {}, returning original text", e);
            text.to_string()
        }
        Err(e) => {
            log::error!("[LLM] Rewrite failed: {}, returning original text", e);
            text.to_string()
        }
    }
}

/// Rewrite `text` through the model, surfacing the failure reason.
pub async fn try_ai_rewrite(text: &str, settings: &RewriteSettings) -> Result<String, RewriteError> {
    if text.trim().is_empty() {
        return Err(RewriteError::EmptyInput);
    }
    let api_key = settings
        .api_key
        .as_deref()
        .ok_or(RewriteError::MissingApiKey)?;

    let url = format!("{}/models/{}:generateContent", settings.api_base, settings.model);

    log::info!("[LLM] Provider: gemini");
    log::info!("[LLM] Model: {}", settings.model);
    let start = std::time::Instant::now();

    let client = reqwest::Client::builder().timeout(settings.timeout).build()?;
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&serde_json::json!({
            "contents": [
                { "role": "user", "parts": [{ "text": build_rewrite_prompt(text) }] }
            ],
            "generationConfig": { "temperature": REWRITE_TEMPERATURE }
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RewriteError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }

    let body: serde_json::Value = response.json().await?;
    log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

    let rewritten = response::extract_candidate_text(&body)
        .map(|raw| response::clean_model_text(&raw))
        .filter(|t| !t.is_empty())
        .ok_or(RewriteError::EmptyResponse)?;

    log::info!("[LLM] Rewrote {} chars into {} chars", text.len(), rewritten.len());
    Ok(rewritten)
}
