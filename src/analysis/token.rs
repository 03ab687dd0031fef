//! Token types produced by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// A single term emitted by a tokenizer.
///
/// # Examples
///
/// ```
/// use verdict::analysis::token::Token;
///
/// let token = Token::new("great");
/// assert_eq!(token.text, "great");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A boxed stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
