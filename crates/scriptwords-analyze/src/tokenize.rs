use scriptwords_model::{TextBlock, Token};

/// Flatten text blocks into the ordered sequence of word tokens.
///
/// Each block is trimmed and split on single spaces. A fragment becomes a
/// token only if it is non-empty and every character is alphanumeric; any
/// other fragment (`don't`, `world!`, `--`) is dropped whole. Case and
/// duplicates are kept.
pub fn tokenize(blocks: &[TextBlock]) -> Vec<Token> {
    let tokens: Vec<Token> = blocks
        .iter()
        .flat_map(|block| block.as_str().trim().split(' '))
        .filter(|fragment| is_word(fragment))
        .map(Token::from)
        .collect();

    tracing::debug!(blocks = blocks.len(), tokens = tokens.len(), "Tokenized text blocks");
    tokens
}

fn is_word(fragment: &str) -> bool {
    !fragment.is_empty() && fragment.chars().all(char::is_alphanumeric)
}
