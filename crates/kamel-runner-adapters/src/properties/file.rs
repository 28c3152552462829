//! Java `.properties` reader.
//!
//! Supports the parts of the format module property files actually use:
//! `#`/`!` comments, `=`, `:` or whitespace separators, backslash line
//! continuations and the usual escapes including `\uXXXX`.

use std::{fs, path::Path};

use tracing::{debug, instrument};

use kamel_runner_core::{
    application::{ApplicationError, ports::PropertiesSource},
    domain::Properties,
    error::RunnerResult,
};

/// Loads properties from disk. A missing file is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFile;

impl PropertiesFile {
    pub fn new() -> Self {
        Self
    }
}

impl PropertiesSource for PropertiesFile {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> RunnerResult<Properties> {
        let error = |reason: String| ApplicationError::PropertiesError {
            path: path.to_path_buf(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| error(e.to_string()))?;
        let properties = parse_properties(&content).map_err(error)?;
        debug!(count = properties.len(), "properties loaded");
        Ok(properties)
    }
}

/// Parse properties text. Later duplicates replace the earlier value but
/// keep its position. A `\u` escape must be followed by four hex digits.
pub fn parse_properties(content: &str) -> Result<Properties, String> {
    let mut properties = Properties::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key)?, unescape(value)?);
    }

    Ok(properties)
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map(|r| r.trim_start_matches([' ', '\t', '\x0c']))
        .unwrap_or(rest);
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars)?;
                match unit {
                    0xD800..=0xDBFF => {
                        let low = match (chars.next(), chars.next()) {
                            (Some('\\'), Some('u')) => read_code_unit(&mut chars)?,
                            _ => return Err(format!("unpaired surrogate \\u{unit:04X}")),
                        };
                        let decoded = char::decode_utf16([unit, low])
                            .next()
                            .and_then(Result::ok)
                            .ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"))?;
                        out.push(decoded);
                    }
                    _ => out.push(
                        char::from_u32(u32::from(unit))
                            .ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"))?,
                    ),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Four hex digits after `\u`.
fn read_code_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\uXXXX encoding: \\u{hex}"));
    }
    u16::from_str_radix(&hex, 16).map_err(|e| e.to_string())
}
