use crate::counts::WordCounts;
use crate::text::Token;
use serde::Serialize;

/// The outcome of one analyzer operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    /// Ordered token sequence (sort).
    Sorted(Vec<Token>),
    /// Token occurrence counts (frequency).
    Frequency(WordCounts),
}

impl AnalysisResult {
    /// Render the result as display lines: one token per line for sequences,
    /// `"<token>: <count>"` per line for counts.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AnalysisResult::Sorted(tokens) => tokens.iter().map(Token::to_string).collect(),
            AnalysisResult::Frequency(counts) => counts
                .iter()
                .map(|(token, count)| format!("{token}: {count}"))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnalysisResult::Sorted(tokens) => tokens.len(),
            AnalysisResult::Frequency(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
