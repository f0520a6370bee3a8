//! Scanning of `*.tf` files for top-level resource declarations.
//!
//! This is deliberately not an HCL parser. The correlator only needs the
//! type, local name, file, and line of each `resource "<type>" "<name>"`
//! block header, so the scanner tracks block depth line by line and ignores
//! everything that could hide a brace: string literals, `#` and `//` line
//! comments, `/* */` block comments, and heredoc bodies.

use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file}:{line}: {reason}")]
    Malformed {
        file: String,
        line: u32,
        reason: &'static str,
    },
}

/// One `resource` block header found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredResource {
    pub resource_type: String,
    pub name: String,
    /// Base name of the declaring file, display-only.
    pub filename: String,
    /// 1-based line of the block header, display-only.
    pub line: u32,
}

/// Scan every `*.tf` file in `dir` (non-recursive, sorted by file name) for
/// top-level resource declarations, in declaration order.
///
/// An unparsable file is a [`ScanError`], never an empty result: callers can
/// tell "the scan failed" apart from "the scan found nothing".
pub fn scan_dir(dir: &Path) -> Result<Vec<DeclaredResource>, ScanError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "tf"))
        .collect();
    paths.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    let header = Regex::new(r#"^resource\s+"([^"]+)"\s+"([^"]+)""#)
        .expect("resource header pattern is valid");

    let mut declared = Vec::new();
    for path in paths {
        let source = std::fs::read_to_string(&path).map_err(|source| ScanError::Io {
            path: path.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        scan_file(&filename, &source, &header, &mut declared)?;
    }
    Ok(declared)
}

#[derive(Default)]
struct ScanState {
    depth: i32,
    in_block_comment: bool,
    heredoc: Option<String>,
}

fn scan_file(
    filename: &str,
    source: &str,
    header: &Regex,
    declared: &mut Vec<DeclaredResource>,
) -> Result<(), ScanError> {
    let malformed = |line: u32, reason: &'static str| ScanError::Malformed {
        file: filename.to_string(),
        line,
        reason,
    };

    let mut state = ScanState::default();
    let mut last_line = 0;
    for (index, raw_line) in source.lines().enumerate() {
        let line = index as u32 + 1;
        last_line = line;

        if let Some(terminator) = &state.heredoc {
            if raw_line.trim() == terminator {
                state.heredoc = None;
            }
            continue;
        }

        let code = strip_noise(raw_line, &mut state);
        let trimmed = code.trim();

        if state.depth == 0 && !trimmed.is_empty() {
            if let Some(captures) = header.captures(trimmed) {
                declared.push(DeclaredResource {
                    resource_type: captures[1].to_string(),
                    name: captures[2].to_string(),
                    filename: filename.to_string(),
                    line,
                });
            } else if trimmed == "resource"
                || trimmed.starts_with("resource ")
                || trimmed.starts_with("resource\t")
                || trimmed.starts_with("resource\"")
            {
                return Err(malformed(line, "resource block requires a type and a name label"));
            }
        }

        state.depth += brace_balance(&code);
        if state.depth < 0 {
            return Err(malformed(line, "unexpected closing brace"));
        }
    }

    if state.heredoc.is_some() {
        return Err(malformed(last_line, "unterminated heredoc"));
    }
    if state.in_block_comment {
        return Err(malformed(last_line, "unterminated comment"));
    }
    if state.depth != 0 {
        return Err(malformed(last_line, "unclosed block at end of file"));
    }
    Ok(())
}

/// Drop comments from a line and record whether it opens a heredoc, leaving
/// string literals in place (the header regex needs the quoted labels).
/// Brace counting happens separately in [`brace_balance`], which skips over
/// the strings this function preserves.
fn strip_noise(raw_line: &str, state: &mut ScanState) -> String {
    let mut code = String::new();
    let mut chars = raw_line.chars().peekable();
    // HCL string literals never span lines, so this resets per line.
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if state.in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                state.in_block_comment = false;
            }
            continue;
        }

        if in_string {
            code.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    code.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '#' => break,
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                state.in_block_comment = true;
            }
            '"' => {
                in_string = true;
                code.push(c);
            }
            '<' if chars.peek() == Some(&'<') => {
                chars.next();
                if chars.peek() == Some(&'-') {
                    chars.next();
                }
                let terminator: String = {
                    let mut word = String::new();
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            word.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    word
                };
                if !terminator.is_empty() {
                    // Body starts on the next line; the rest of this one is
                    // still code.
                    state.heredoc = Some(terminator);
                }
            }
            _ => code.push(c),
        }
    }
    code
}

/// Net `{`/`}` balance of a comment-stripped line, ignoring braces inside
/// string literals.
fn brace_balance(code: &str) -> i32 {
    let mut balance = 0;
    let mut chars = code.chars();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {}
        }
    }
    balance
}
