use std::collections::BTreeMap;

use serde::Serialize;

pub const USER_READABLE_NAME: &str = "UserReadableName";

/// Parsed content of one `device-*.properties` profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: BTreeMap<String, String>,
}

impl PropertyBag {
    /// Decodes raw profile bytes. Valid UTF-8 is taken as is; anything else is
    /// read as ISO-8859-1, which is what properties files were historically
    /// written in.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::parse(text),
            Err(_) => {
                let text: String = bytes.iter().map(|&byte| char::from(byte)).collect();
                Self::parse(&text)
            }
        }
    }

    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_key_value(&line);
            entries.insert(key, value);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The `UserReadableName` value, or an empty string when absent.
    pub fn display_name(&self) -> String {
        self.get(USER_READABLE_NAME).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { entries }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn trailing_backslashes(segment: &str) -> usize {
    segment.chars().rev().take_while(|&c| c == '\\').count()
}

/// Joins continuation lines and drops blanks and comments.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in normalized.split(['\n', '\r']) {
        let segment = raw.trim_start_matches(is_blank);

        let mut line = match pending.take() {
            Some(head) if segment.is_empty() => {
                lines.push(head);
                continue;
            }
            Some(mut head) => {
                head.push_str(segment);
                head
            }
            None => {
                if segment.is_empty() || segment.starts_with(['#', '!']) {
                    continue;
                }
                segment.to_string()
            }
        };

        if trailing_backslashes(segment) % 2 == 1 {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    if let Some(line) = pending {
        lines.push(line);
    }

    lines
}

fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut key_end = 0;
    let mut value_start = chars.len();
    let mut has_separator = false;
    let mut escaped = false;

    while key_end < chars.len() {
        let c = chars[key_end];
        if !escaped && (c == '=' || c == ':') {
            value_start = key_end + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            value_start = key_end + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
        key_end += 1;
    }

    while value_start < chars.len() {
        let c = chars[value_start];
        if !is_blank(c) {
            if has_separator || (c != '=' && c != ':') {
                break;
            }
            has_separator = true;
        }
        value_start += 1;
    }

    (
        unescape(&chars[..key_end]),
        unescape(&chars[value_start..]),
    )
}

fn read_unicode_escape(chars: &[char]) -> Option<u32> {
    if chars.len() < 4 {
        return None;
    }
    let hex: String = chars[..4].iter().collect();
    u32::from_str_radix(&hex, 16).ok()
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];
        index += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&next) = chars.get(index) else {
            break;
        };
        index += 1;

        match next {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => {
                let Some(unit) = read_unicode_escape(&chars[index..]) else {
                    out.push_str("\\u");
                    continue;
                };
                index += 4;

                if let Some(decoded) = char::from_u32(unit) {
                    out.push(decoded);
                    continue;
                }

                // High surrogate: pair it with a following \uXXXX low surrogate.
                let low = match chars.get(index..index + 2) {
                    Some(['\\', 'u']) => read_unicode_escape(&chars[index + 2..]),
                    _ => None,
                };
                let pair = low.and_then(|low| {
                    char::decode_utf16([unit as u16, low as u16])
                        .next()
                        .and_then(Result::ok)
                });
                match pair {
                    Some(decoded) => {
                        out.push(decoded);
                        index += 6;
                    }
                    None => out.push(char::REPLACEMENT_CHARACTER),
                }
            }
            other => out.push(other),
        }
    }

    out
}
