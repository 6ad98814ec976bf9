//! Selection Handler
//!
//! The CLI stand-in for an editor's active selection: text read from
//! stdin or from a line range of a file, plus the language identifier
//! used for prompt substitution.

use crate::error::{TweakError, TweakResult};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the selection came from
#[derive(Debug, Clone, PartialEq)]
enum Source {
    /// Whole stdin stream
    Stdin,
    /// Line range of a file (1-based, inclusive)
    File {
        path: PathBuf,
        start: usize,
        end: usize,
    },
}

/// A user-selected region of source text
#[derive(Debug, Clone)]
pub struct Selection {
    text: String,
    language: String,
    source: Source,
}

impl Selection {
    /// Read the whole of stdin as the selection
    pub fn from_stdin(language: Option<&str>) -> TweakResult<Self> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;

        Ok(Self {
            text,
            language: language.unwrap_or("plaintext").to_string(),
            source: Source::Stdin,
        })
    }

    /// Read a line range of a file as the selection
    ///
    /// `lines` is 1-based and inclusive; `None` selects the whole file.
    pub fn from_file(
        path: &Path,
        lines: Option<(usize, usize)>,
        language: Option<&str>,
    ) -> TweakResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let total = content.lines().count();

        let (start, end) = match lines {
            Some((start, end)) => {
                if start == 0 || start > end {
                    return Err(TweakError::Selection(format!(
                        "Invalid line range {start}-{end} (lines are 1-based)"
                    )));
                }
                if end > total {
                    return Err(TweakError::Selection(format!(
                        "Line range {start}-{end} is out of bounds ({total} lines in {})",
                        path.display()
                    )));
                }
                (start, end)
            }
            None => (1, total.max(1)),
        };

        let text = content
            .lines()
            .skip(start - 1)
            .take(end - start + 1)
            .collect::<Vec<_>>()
            .join("\n");

        let language = language
            .map(str::to_string)
            .or_else(|| language_from_path(path).map(str::to_string))
            .unwrap_or_else(|| "plaintext".to_string());

        debug!(
            "Selected lines {}-{} of {} ({})",
            start,
            end,
            path.display(),
            language
        );

        Ok(Self {
            text,
            language,
            source: Source::File {
                path: path.to_path_buf(),
                start,
                end,
            },
        })
    }

    /// Selected text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language identifier for prompt substitution
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whitespace-only selections count as empty
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the selection with `replacement`.
    ///
    /// File selections are spliced back and written in place; stdin
    /// selections print the replacement to stdout. Nothing is written
    /// until a completion has already succeeded.
    pub fn replace_with(&self, replacement: &str) -> TweakResult<()> {
        match &self.source {
            Source::Stdin => {
                println!("{replacement}");
                Ok(())
            }
            Source::File { path, start, end } => {
                let content = std::fs::read_to_string(path)?;
                let spliced = splice_lines(&content, *start, *end, replacement);
                std::fs::write(path, spliced)?;
                info!(
                    "✏️ Replaced lines {}-{} in {}",
                    start,
                    end,
                    path.display()
                );
                Ok(())
            }
        }
    }
}

/// Replace lines `start..=end` (1-based) of `original` with `replacement`,
/// keeping every surrounding line intact.
fn splice_lines(original: &str, start: usize, end: usize, replacement: &str) -> String {
    let lines: Vec<&str> = original.lines().collect();
    let mut out = Vec::with_capacity(lines.len());

    out.extend_from_slice(&lines[..start.saturating_sub(1).min(lines.len())]);
    out.push(replacement);
    if end < lines.len() {
        out.extend_from_slice(&lines[end..]);
    }

    let mut result = out.join("\n");
    if original.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Map a file extension to the language identifier used in prompts
pub fn language_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let language = match ext {
        "rs" => "rust",
        "py" => "python",
        "js" => "javascript",
        "jsx" => "javascriptreact",
        "ts" => "typescript",
        "tsx" => "typescriptreact",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "sh" | "bash" => "shellscript",
        "lua" => "lua",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "sql" => "sql",
        "md" => "markdown",
        _ => return None,
    };
    Some(language)
}
