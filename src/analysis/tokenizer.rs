use std::sync::LazyLock;
use regex::Regex;
use crate::analysis::token::Token;

/// General punctuation blocks plus ASCII punctuation. Matches are replaced
/// by whitespace before splitting, so "This.String." yields two tokens.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[\u{2000}-\u{206F}\u{2E00}-\u{2E7F}\\'!"#$%&()*+,\-./:;<=>?@\[\]^_`{|}~]"##)
        .expect("punctuation pattern is valid")
});

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Whitespace tokenizer that strips punctuation and case-folds.
#[derive(Clone)]
pub struct StandardTokenizer {
    pub lowercase: bool,
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            lowercase: true,
            max_token_length: 64,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let stripped = PUNCTUATION.replace_all(text, " ");
        let text_to_process = if self.lowercase {
            stripped.to_lowercase()
        } else {
            stripped.into_owned()
        };

        let mut tokens = Vec::new();
        let mut position = 0u32;

        for word in text_to_process.split_whitespace() {
            if word.chars().count() <= self.max_token_length {
                tokens.push(Token::new(word.to_string(), position));
                position += 1;
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}
