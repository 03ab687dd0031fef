//! Token filter implementations for token transformation.
//!
//! - [`punctuation::PunctuationFilter`] - Removes single punctuation-character tokens

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod punctuation;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
