use scriptwords_model::{AnalysisResult, TextBlock};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("save location '{}' is not a directory; please enter a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// How results are rendered on the console and in saved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// One token per line, or `<token>: <count>` per line
    #[default]
    Text,
    /// Pretty-printed JSON array or object
    Json,
}

/// An existing directory that results are saved into.
#[derive(Debug, Clone)]
pub struct SaveDir {
    dir: PathBuf,
}

impl SaveDir {
    /// Accept `path` only if it is an existing directory.
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        if !path.is_dir() {
            return Err(OutputError::NotADirectory(path.to_path_buf()));
        }
        Ok(Self {
            dir: path.to_path_buf(),
        })
    }

    /// `<dir>/<movie>_<operation>_script.txt`
    pub fn result_path(&self, movie: &str, operation: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{operation}_script.txt", file_stem(movie)))
    }

    /// `<dir>/<movie>_intact_script.txt`
    pub fn intact_path(&self, movie: &str) -> PathBuf {
        self.dir.join(format!("{}_intact_script.txt", file_stem(movie)))
    }

    pub fn write_result(
        &self,
        movie: &str,
        operation: &str,
        result: &AnalysisResult,
        format: Format,
    ) -> Result<PathBuf, OutputError> {
        let path = self.result_path(movie, operation);
        let contents = render_result(result, format)?;
        write_file(&path, &contents)?;
        tracing::info!(path = %path.display(), entries = result.len(), "Saved {operation} result");
        Ok(path)
    }

    pub fn write_intact(
        &self,
        movie: &str,
        blocks: &[TextBlock],
        format: Format,
    ) -> Result<PathBuf, OutputError> {
        let path = self.intact_path(movie);
        let contents = render_intact(blocks, format)?;
        write_file(&path, &contents)?;
        tracing::info!(path = %path.display(), blocks = blocks.len(), "Saved intact script");
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_result(result: &AnalysisResult, format: Format) -> Result<String, OutputError> {
    match format {
        Format::Text => Ok(join_lines(result.lines())),
        Format::Json => Ok(serde_json::to_string_pretty(result)? + "\n"),
    }
}

/// Blocks are emitted untouched, each followed by a newline.
pub fn render_intact(blocks: &[TextBlock], format: Format) -> Result<String, OutputError> {
    match format {
        Format::Text => Ok(join_lines(blocks.iter().map(TextBlock::to_string))),
        Format::Json => Ok(serde_json::to_string_pretty(blocks)? + "\n"),
    }
}

fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn print_result(result: &AnalysisResult, format: Format) -> Result<(), OutputError> {
    print_rendered(&render_result(result, format)?)
}

pub fn print_intact(blocks: &[TextBlock], format: Format) -> Result<(), OutputError> {
    print_rendered(&render_intact(blocks, format)?)
}

fn print_rendered(rendered: &str) -> Result<(), OutputError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(OutputError::Stdout)
}

/// Make a movie identifier safe to use in a file name.
///
/// A URL contributes its last path segment without extension
/// (`https://imsdb.com/scripts/Alien.html` -> `Alien`); anything other than
/// alphanumerics, `-` and `_` becomes `_`.
pub fn file_stem(movie: &str) -> String {
    let name = match movie.split_once("://") {
        Some((_, rest)) => {
            let path = rest.split(['?', '#']).next().unwrap_or(rest);
            let last = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path);
            last.rsplit_once('.').map_or(last, |(stem, _)| stem)
        }
        None => movie,
    };

    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if stem.is_empty() {
        "script".to_string()
    } else {
        stem
    }
}
