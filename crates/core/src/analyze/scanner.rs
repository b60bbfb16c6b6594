// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical-line scanner for Python source.
//!
//! Rebuilds just enough of the tokenizer to see import statements and
//! obvious structural errors: string contents are masked, comments
//! stripped, and physical lines joined across open brackets and backslash
//! continuations. This is not a grammar; anything it cannot reject here is
//! left for the interpreter to reject at run time.

use super::AnalyzeError;

/// One statement after joining continuations.
///
/// `text` is masked: every string literal collapses to `""` and comments
/// are gone, so keyword and bracket scans over it are literal-safe.
pub(crate) struct LogicalLine {
    pub text: String,
    /// Physical line the statement starts on, 1-based.
    pub line: usize,
}

/// Module names imported anywhere in the source, in order of appearance.
/// Duplicates are preserved; the caller dedups.
pub(crate) fn collect_imports(source: &str) -> Result<Vec<String>, AnalyzeError> {
    let mut found = Vec::new();
    for logical in logical_lines(source)? {
        statement_imports(logical.text.trim(), logical.line, &mut found)?;
    }
    Ok(found)
}

pub(crate) fn logical_lines(source: &str) -> Result<Vec<LogicalLine>, AnalyzeError> {
    let chars: Vec<char> = source.chars().collect();
    let mut lines = Vec::new();
    let mut text = String::new();
    // 0 means no statement character seen yet on the current logical line
    let mut start_line = 0usize;
    let mut brackets: Vec<(char, usize)> = Vec::new();
    let mut line = 1usize;
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            '#' => {
                while pos < chars.len() && chars[pos] != '\n' {
                    pos += 1;
                }
            }
            '\'' | '"' => {
                let triple =
                    pos + 2 < chars.len() && chars[pos + 1] == c && chars[pos + 2] == c;
                let opened_at = line;
                pos += if triple { 3 } else { 1 };
                skip_string(&chars, &mut pos, &mut line, c, triple, opened_at)?;
                if start_line == 0 {
                    start_line = opened_at;
                }
                text.push_str("\"\"");
            }
            '(' | '[' | '{' => {
                brackets.push((c, line));
                if start_line == 0 {
                    start_line = line;
                }
                text.push(c);
                pos += 1;
            }
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match brackets.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => return Err(AnalyzeError::UnbalancedBracket { line, bracket: c }),
                }
                text.push(c);
                pos += 1;
            }
            '\\' if pos + 1 < chars.len() && chars[pos + 1] == '\n' => {
                text.push(' ');
                line += 1;
                pos += 2;
            }
            '\n' => {
                if brackets.is_empty() {
                    flush(&mut lines, &mut text, &mut start_line);
                } else {
                    // implicit continuation inside brackets
                    text.push(' ');
                }
                line += 1;
                pos += 1;
            }
            _ => {
                if start_line == 0 && !c.is_whitespace() {
                    start_line = line;
                }
                text.push(c);
                pos += 1;
            }
        }
    }

    if let Some(&(bracket, opened_at)) = brackets.first() {
        return Err(AnalyzeError::UnbalancedBracket {
            line: opened_at,
            bracket,
        });
    }
    flush(&mut lines, &mut text, &mut start_line);
    Ok(lines)
}

fn flush(lines: &mut Vec<LogicalLine>, text: &mut String, start_line: &mut usize) {
    if *start_line != 0 && !text.trim().is_empty() {
        lines.push(LogicalLine {
            text: std::mem::take(text),
            line: *start_line,
        });
    } else {
        text.clear();
    }
    *start_line = 0;
}

/// Advance past a string literal. `pos` sits on the first content character.
///
/// Backslash escapes the next character even in raw strings; that matches
/// how the tokenizer decides where a raw string ends.
fn skip_string(
    chars: &[char],
    pos: &mut usize,
    line: &mut usize,
    quote: char,
    triple: bool,
    opened_at: usize,
) -> Result<(), AnalyzeError> {
    while *pos < chars.len() {
        let c = chars[*pos];
        if c == '\\' {
            if *pos + 1 < chars.len() {
                if chars[*pos + 1] == '\n' {
                    *line += 1;
                }
                *pos += 2;
            } else {
                *pos += 1;
            }
            continue;
        }
        if c == '\n' {
            if !triple {
                return Err(AnalyzeError::UnterminatedString { line: opened_at });
            }
            *line += 1;
            *pos += 1;
            continue;
        }
        if c == quote {
            if triple {
                if *pos + 2 < chars.len() && chars[*pos + 1] == quote && chars[*pos + 2] == quote
                {
                    *pos += 3;
                    return Ok(());
                }
                *pos += 1;
                continue;
            }
            *pos += 1;
            return Ok(());
        }
        *pos += 1;
    }
    Err(AnalyzeError::UnterminatedString { line: opened_at })
}

/// Compound-statement keywords that require a `:` somewhere at top level.
/// `match`/`case` are soft keywords and legal identifiers, so they are
/// deliberately absent.
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
];

fn statement_imports(stmt: &str, line: usize, out: &mut Vec<String>) -> Result<(), AnalyzeError> {
    for part in split_top_level(stmt, ';') {
        simple_statement_imports(part.trim(), line, out)?;
    }
    Ok(())
}

fn simple_statement_imports(
    stmt: &str,
    line: usize,
    out: &mut Vec<String>,
) -> Result<(), AnalyzeError> {
    if stmt.is_empty() || stmt.starts_with('@') {
        return Ok(());
    }
    let word = leading_word(stmt);
    match word {
        "import" => plain_import(&stmt[word.len()..], line, out),
        "from" => from_import(&stmt[word.len()..], line, out),
        "async" => {
            let rest = stmt["async".len()..].trim_start();
            block_statement(leading_word(rest), stmt, line, out)
        }
        _ => block_statement(word, stmt, line, out),
    }
}

fn block_statement(
    keyword: &str,
    stmt: &str,
    line: usize,
    out: &mut Vec<String>,
) -> Result<(), AnalyzeError> {
    if !BLOCK_KEYWORDS.contains(&keyword) {
        return Ok(());
    }
    match top_level_colon(stmt) {
        None => Err(AnalyzeError::MissingColon {
            line,
            keyword: keyword.to_string(),
        }),
        Some(idx) => {
            // One-line compound statement: `if cond: import x`
            let body = stmt[idx + 1..].trim();
            if body.is_empty() {
                Ok(())
            } else {
                statement_imports(body, line, out)
            }
        }
    }
}

fn plain_import(rest: &str, line: usize, out: &mut Vec<String>) -> Result<(), AnalyzeError> {
    let mut any = false;
    for part in split_top_level(rest, ',') {
        let head = module_head(part.trim());
        if head.is_empty() {
            continue;
        }
        if !valid_module_name(head) {
            return Err(AnalyzeError::InvalidImport {
                line,
                detail: format!("'{head}' is not a module name"),
            });
        }
        out.push(top_level(head).to_string());
        any = true;
    }
    if !any {
        return Err(AnalyzeError::InvalidImport {
            line,
            detail: "import names no module".into(),
        });
    }
    Ok(())
}

fn from_import(rest: &str, line: usize, out: &mut Vec<String>) -> Result<(), AnalyzeError> {
    let rest = rest.trim_start();
    let dots = rest.chars().take_while(|c| *c == '.').count();
    let after_dots = &rest[dots..];
    let head = module_head(after_dots);
    if dots == 0 && head.is_empty() {
        return Err(AnalyzeError::InvalidImport {
            line,
            detail: "'from' names no module".into(),
        });
    }
    // Tolerate spaces around dots in the module path: `from a . b import c`
    let mut cursor = after_dots[head.len()..].trim_start();
    while let Some(stripped) = cursor.strip_prefix('.') {
        let trimmed = stripped.trim_start();
        let segment = module_head(trimmed);
        cursor = trimmed[segment.len()..].trim_start();
    }
    if leading_word(cursor) != "import" {
        return Err(AnalyzeError::InvalidImport {
            line,
            detail: "expected 'import' after module name".into(),
        });
    }
    if head.is_empty() {
        // `from . import x` is relative to the script itself; nothing installable
        return Ok(());
    }
    if !valid_module_name(head) {
        return Err(AnalyzeError::InvalidImport {
            line,
            detail: format!("'{head}' is not a module name"),
        });
    }
    out.push(top_level(head).to_string());
    Ok(())
}

fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte offset of the first statement-level `:`, skipping `:=`.
fn top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                if matches!(iter.peek(), Some((_, '='))) {
                    iter.next();
                } else {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Leading identifier run, possibly empty.
fn leading_word(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

/// Leading dotted-path run, possibly empty: `a.b.c` of `a.b.c as x`.
fn module_head(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

fn valid_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut cs = segment.chars();
            matches!(cs.next(), Some(c) if c.is_alphabetic() || c == '_')
        })
}

fn top_level(module_path: &str) -> &str {
    module_path.split('.').next().unwrap_or(module_path)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
