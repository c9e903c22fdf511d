//! Rewrite prompt for the Gemini collaborator.
//!
//! Kept in one place so the local transformer and the model agree on the
//! marker format (`**word**`) the UI highlights.

/// Model used when `SAFEGUARD_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Lower temperature keeps the `**` markup consistent between calls.
pub const REWRITE_TEMPERATURE: f32 = 0.4;

/// Instructions sent ahead of the user's draft.
pub const REWRITE_INSTRUCTIONS: &str = r#"Act as a marketplace message editor. I will provide a draft message intended for a client.
Rewrite it so automated keyword warnings are not triggered while the meaning stays clear.

Rules:
1. Identify restricted words (e.g. email, phone, whatsapp, skype, telegram, pay, payment, dollar, $).
2. Obfuscate them with hyphens or spaces (e.g. "number" -> "num-ber", "email" -> "e-mail", "pay" -> "p-ay").
3. Keep the rest of the message natural and professional.
4. Wrap every word you modified in double asterisks, like **word**.

Return ONLY the rewritten text."#;

/// Build the full rewrite prompt for `text`.
pub fn build_rewrite_prompt(text: &str) -> String {
    format!("{}\n\nOriginal Message: \"{}\"", REWRITE_INSTRUCTIONS, text)
}
