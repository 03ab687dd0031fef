//! Punctuation filter implementation.
//!
//! Drops tokens that are a single ASCII punctuation character, such as `.`
//! or `,`. Runs like `--` or `...` and tokens that merely contain
//! punctuation (`don't`, `5/10`) are kept.
//!
//! # Examples
//!
//! ```
//! use verdict::analysis::token_filter::Filter;
//! use verdict::analysis::token_filter::punctuation::PunctuationFilter;
//! use verdict::analysis::token::Token;
//!
//! let filter = PunctuationFilter::new();
//! let tokens = vec![Token::new("fine"), Token::new(","), Token::new("film")];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "film");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

static PUNCTUATION_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:punct:]]$").expect("punctuation pattern is valid")
});

/// A filter that removes single-character punctuation tokens.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    /// Create a new punctuation filter.
    pub fn new() -> Self {
        PunctuationFilter
    }

    /// Whether `text` is exactly one punctuation character.
    pub fn is_punctuation(text: &str) -> bool {
        PUNCTUATION_ONLY.is_match(text)
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(
            tokens.filter(|token| !Self::is_punctuation(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
