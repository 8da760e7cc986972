//! `CREATE TABLE` extractor
//!
//! This is a line-oriented pattern matcher, not a SQL parser: it pulls the
//! table name and column list out of a single statement and drops anything
//! it does not recognize.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::metadata::{ColumnDescriptor, TableSchema};
use crate::error::{CodegenError, Result};

lazy_static! {
    static ref TABLE_HEADER: Regex = Regex::new(
        r#"(?i)\bCREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:[`"']?\w+[`"']?\.)?[`"']?(\w+)[`"']?"#
    )
    .unwrap();
    static ref CONSTRAINT_LINE: Regex = Regex::new(
        r"(?i)^(?:CONSTRAINT|PRIMARY\s+KEY|FOREIGN\s+KEY|UNIQUE|KEY|INDEX|FULLTEXT|SPATIAL|CHECK)\b"
    )
    .unwrap();
    static ref PRIMARY_KEY_COLUMNS: Regex =
        Regex::new(r#"(?i)PRIMARY\s+KEY\s*(?:[`"']?\w+[`"']?\s*)?\(([^)]*)\)"#).unwrap();
    static ref UNIQUE_KEY_COLUMNS: Regex = Regex::new(
        r#"(?i)UNIQUE(?:\s+(?:KEY|INDEX))?\s*(?:[`"']?\w+[`"']?\s*)?\(([^)]*)\)"#
    )
    .unwrap();
    static ref COLUMN_LINE: Regex =
        Regex::new(r#"(?s)^[`"']?(\w+)[`"']?\s+(\w+(?:\s*\([^)]*\))?)(.*)$"#).unwrap();
    static ref LEADING_IDENT: Regex = Regex::new(r#"^\s*[`"']?(\w+)"#).unwrap();
    static ref DEFAULT_VALUE: Regex = Regex::new(
        r#"(?i)\bDEFAULT\s+(?:'((?:[^']|'')*)'|"([^"]*)"|(\([^)]*\)|[^\s,]+))"#
    )
    .unwrap();
    static ref NOT_NULL: Regex = Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap();
    static ref INLINE_PRIMARY_KEY: Regex = Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap();
    static ref INLINE_UNIQUE: Regex = Regex::new(r"(?i)\bUNIQUE\b").unwrap();
    static ref AUTO_INCREMENT: Regex = Regex::new(r"(?i)\bAUTO_?INCREMENT\b").unwrap();
    static ref UNSIGNED: Regex = Regex::new(r"(?i)\bUNSIGNED\b").unwrap();
}

/// Parse a single `CREATE TABLE` statement into a table schema
///
/// Fails when the header, the parenthesized body, or every column line is
/// missing. Column lines that do not look like `name type ...` are skipped.
pub fn parse_create_table(sql: &str) -> Result<TableSchema> {
    let sql = strip_comments(sql);

    let header = TABLE_HEADER
        .captures(&sql)
        .ok_or_else(|| CodegenError::SchemaNotFound("table name not found".into()))?;
    let name = header[1].to_string();
    let header_end = header.get(0).map(|m| m.end()).unwrap_or(0);

    let body = extract_body(&sql, header_end).ok_or_else(|| {
        CodegenError::SchemaNotFound(format!("table definition not found for `{}`", name))
    })?;
    let lines = split_top_level(body);

    let mut primary_keys: HashSet<String> = HashSet::new();
    let mut unique_keys: HashSet<String> = HashSet::new();

    for line in lines.iter().filter(|l| CONSTRAINT_LINE.is_match(l)) {
        if let Some(caps) = PRIMARY_KEY_COLUMNS.captures(line) {
            primary_keys.extend(column_list(&caps[1]));
        } else if let Some(caps) = UNIQUE_KEY_COLUMNS.captures(line) {
            // Composite unique keys do not make any single column unique
            let cols = column_list(&caps[1]);
            if cols.len() == 1 {
                unique_keys.extend(cols);
            }
        }
    }

    let mut columns = Vec::new();
    for line in lines.iter().filter(|l| !CONSTRAINT_LINE.is_match(l)) {
        match parse_column(line, &primary_keys, &unique_keys) {
            Some(column) => columns.push(column),
            None => debug!("Skipping malformed column definition: {}", line),
        }
    }

    if columns.is_empty() {
        return Err(CodegenError::SchemaNotFound(format!(
            "no column definitions found for table `{}`",
            name
        )));
    }

    debug!("Parsed table {} with {} columns", name, columns.len());
    Ok(TableSchema { name, columns })
}

fn parse_column(
    line: &str,
    primary_keys: &HashSet<String>,
    unique_keys: &HashSet<String>,
) -> Option<ColumnDescriptor> {
    let caps = COLUMN_LINE.captures(line)?;
    let name = caps[1].to_string();
    let raw_type: String = caps[2].split_whitespace().collect();
    let constraints = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    let is_primary_key = primary_keys.contains(&name)
        || name.eq_ignore_ascii_case("id")
        || INLINE_PRIMARY_KEY.is_match(constraints);
    let is_unique = unique_keys.contains(&name) || INLINE_UNIQUE.is_match(constraints);

    let (default_value, default_is_literal) = match DEFAULT_VALUE.captures(constraints) {
        Some(c) => match (c.get(1), c.get(2), c.get(3)) {
            (Some(single), _, _) => (Some(single.as_str().replace("''", "'")), true),
            (_, Some(double), _) => (Some(double.as_str().to_string()), true),
            // `DEFAULT NULL` is the same as no default
            (_, _, Some(bare)) if bare.as_str().eq_ignore_ascii_case("NULL") => (None, false),
            (_, _, Some(bare)) => (Some(bare.as_str().to_string()), false),
            _ => (None, false),
        },
        None => (None, false),
    };

    Some(ColumnDescriptor {
        name,
        raw_type,
        is_primary_key,
        is_unique,
        is_auto_increment: AUTO_INCREMENT.is_match(constraints),
        is_unsigned: UNSIGNED.is_match(constraints),
        nullable: !is_primary_key && !NOT_NULL.is_match(constraints),
        default_value,
        default_is_literal,
    })
}

/// Column names from a key list such as "`a`, b(10)"
fn column_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|part| LEADING_IDENT.captures(part).map(|c| c[1].to_string()))
        .collect()
}

/// Text between the first `(` at or after `from` and its matching `)`
///
/// An unclosed body runs to the end of the input.
fn extract_body(sql: &str, from: usize) -> Option<&str> {
    let open = from + sql[from..].find('(')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, ch) in sql[open..].char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&sql[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }

    Some(&sql[open + 1..])
}

/// Split on commas that are outside parentheses and quotes
fn split_top_level(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in body.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Remove `-- ...` and `/* ... */` comments outside of quoted text
fn strip_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            out.push(ch);
            continue;
        }
        match (ch, chars.peek()) {
            ('\'' | '"' | '`', _) => {
                quote = Some(ch);
                out.push(ch);
            }
            ('-', Some('-')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}
