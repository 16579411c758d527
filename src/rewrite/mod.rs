//! Pluggable text rewriting
//!
//! A rewriter takes a record's text and returns a replacement, and may fail.
//! The ingestion pipeline calls it at most once per chunk; failures are
//! recorded on the record rather than aborting the run.

pub mod huggingface;

pub use huggingface::HuggingFaceRewriter;

use crate::config::RewriteConfig;
use crate::error::Result;

/// Text in, text out, may fail
pub trait Rewriter {
    /// Produce the replacement text for `text`
    fn rewrite(&self, text: &str) -> Result<String>;

    /// A no-op rewriter is never invoked and leaves records unannotated
    fn is_noop(&self) -> bool {
        false
    }
}

/// Returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Rewriter for PassThrough {
    fn rewrite(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Any `Fn(&str) -> anyhow::Result<String>` is a rewriter
impl<F> Rewriter for F
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    fn rewrite(&self, text: &str) -> Result<String> {
        Ok(self(text)?)
    }
}

/// Build the rewriter described by `config`.
///
/// Falls back to [`PassThrough`] when rewriting is disabled or no API token
/// is configured.
pub fn from_config(config: &RewriteConfig) -> Result<Box<dyn Rewriter>> {
    if !config.enabled {
        return Ok(Box::new(PassThrough));
    }
    if !config.has_credentials() {
        log::warn!("Rewrite requested but HUGGINGFACE_API_TOKEN is not set; text passes through unchanged");
        return Ok(Box::new(PassThrough));
    }
    Ok(Box::new(HuggingFaceRewriter::new(config.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        let rewriter = PassThrough;
        assert!(rewriter.is_noop());
        assert_eq!(rewriter.rewrite("unchanged").unwrap(), "unchanged");
    }

    #[test]
    fn test_closure_rewriter() {
        let upper = |text: &str| -> anyhow::Result<String> { Ok(text.to_uppercase()) };
        assert!(!upper.is_noop());
        assert_eq!(upper.rewrite("abc").unwrap(), "ABC");

        let failing = |_: &str| -> anyhow::Result<String> { anyhow::bail!("service down") };
        let err = failing.rewrite("abc").unwrap_err();
        assert!(err.to_string().contains("service down"));
    }

    #[test]
    fn test_from_config_without_token_is_noop() {
        let disabled = from_config(&RewriteConfig::default()).unwrap();
        assert!(disabled.is_noop());

        let no_token = RewriteConfig {
            enabled: true,
            api_token: None,
            ..Default::default()
        };
        assert!(from_config(&no_token).unwrap().is_noop());
    }

    #[test]
    fn test_from_config_with_token() {
        let config = RewriteConfig {
            enabled: true,
            api_token: Some("hf_test".to_string()),
            ..Default::default()
        };
        assert!(!from_config(&config).unwrap().is_noop());
    }
}
