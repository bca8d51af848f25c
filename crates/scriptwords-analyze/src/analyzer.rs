use scriptwords_model::{AnalysisResult, Order, Token, WordCounts};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("unknown operation '{0}' (expected one of: sort, frequency, alphabetize, word-count)")]
    UnknownOperation(String),
}

/// A named analysis over the token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Case-sensitive lexicographic sort, honoring the order preference.
    Sort,
    /// Occurrence counts in first-occurrence order; ignores the order preference.
    Frequency,
}

/// Operation run when none is requested.
pub const DEFAULT_OPERATION: Operation = Operation::Sort;

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sort => "sort",
            Operation::Frequency => "frequency",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sort" | "alphabetize" => Ok(Operation::Sort),
            "frequency" | "word-count" => Ok(Operation::Frequency),
            other => Err(AnalyzeError::UnknownOperation(other.to_string())),
        }
    }
}

/// Read-only view over a token sequence. Every operation works on its own
/// copy, so operations can run any number of times in any order.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    tokens: &'a [Token],
}

impl<'a> Analyzer<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    pub fn run(&self, operation: Operation, order: Order) -> AnalysisResult {
        tracing::debug!(%operation, ?order, tokens = self.tokens.len(), "Running analysis");
        match operation {
            Operation::Sort => AnalysisResult::Sorted(self.sort(order)),
            Operation::Frequency => AnalysisResult::Frequency(self.frequency()),
        }
    }

    /// Stable ascending sort; descending is the exact reverse of that result,
    /// so equal tokens come out in reverse of their input order.
    pub fn sort(&self, order: Order) -> Vec<Token> {
        let mut sorted = self.tokens.to_vec();
        sorted.sort();
        if order == Order::Descending {
            sorted.reverse();
        }
        sorted
    }

    pub fn frequency(&self) -> WordCounts {
        self.tokens.iter().collect()
    }

    /// Run each requested operation by name, in request order, each against
    /// the untouched token sequence. An unknown name yields an error item and
    /// the names after it still run. No names means a single default sort.
    pub fn run_requested<'s>(
        &'s self,
        names: &'s [String],
        order: Order,
    ) -> impl Iterator<Item = Result<(&'s str, AnalysisResult), AnalyzeError>> + 's {
        let names: Vec<&'s str> = if names.is_empty() {
            vec![DEFAULT_OPERATION.name()]
        } else {
            names.iter().map(String::as_str).collect()
        };
        let analyzer: Analyzer<'s> = *self;

        names.into_iter().map(move |name| {
            let operation = name.parse::<Operation>()?;
            Ok((name, analyzer.run(operation, order)))
        })
    }
}
