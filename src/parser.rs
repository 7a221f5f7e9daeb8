//! Deck print text parsing.
//!
//! The official deck print page renders a deck as plain text, one token per
//! line:
//!
//! ```text
//! ポケモン
//! ピカチュウex
//! 2
//! SV8
//! 033/106
//! グッズ
//! ネストボール
//! 4
//! 小計
//! 4
//! ```
//!
//! A section header is followed by `name` / `count` pairs. In the Pokémon
//! section a pair may be followed by an expansion code and a collector number,
//! which are skipped. Subtotal and total markers are followed by their printed
//! value on the next line.

use log::debug;

use crate::models::{DeckRecord, Section};

/// Subtotal marker line
pub const SUBTOTAL_MARKER: &str = "小計";
/// Grand total marker line
pub const TOTAL_MARKER: &str = "合計";

/// Splits print text into trimmed, non-empty lines in original order.
///
/// Accepts `\n`, `\r\n` and bare `\r` line endings.
pub fn tokenize_lines(text: &str) -> Vec<&str> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses one deck's print text into per-section card counts.
///
/// Never fails: lines that do not fit the `name` / `count` shape are skipped.
pub fn parse_print_text(text: &str) -> DeckRecord {
    let lines = tokenize_lines(text);
    let mut record = DeckRecord::default();
    let mut current: Option<Section> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(section) = Section::from_label(line) {
            current = Some(section);
            record.sections.entry(section).or_default();
            i += 1;
            continue;
        }

        let Some(section) = current else {
            i += 1;
            continue;
        };

        // The printed total is assumed to sit exactly one line below the marker.
        if line == SUBTOTAL_MARKER || line == TOTAL_MARKER {
            i += 2;
            continue;
        }

        let Some(count_line) = lines.get(i + 1).copied().filter(|l| is_count_line(l)) else {
            debug!("Skipping line without count in {section}: {line}");
            i += 1;
            continue;
        };

        match count_line.parse::<u32>() {
            Ok(0) => debug!("Ignoring zero count for {line} in {section}"),
            Ok(count) => record.sections.entry(section).or_default().add(line, count),
            Err(e) => debug!("Ignoring count '{count_line}' for {line} in {section}: {e}"),
        }
        i += 2;

        if section == Section::Pokemon && has_card_number_block(&lines, i) {
            i += 2;
        }
    }

    record
}

/// True for lines made only of ASCII digits
pub fn is_count_line(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// True for expansion codes like `SV8`, `sv4a` or `SVP-EN`
pub fn is_expansion_code(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// True if the line contains a `digits/digits` collector number such as `033/106`
pub fn contains_collector_number(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.iter().enumerate().any(|(slash, &b)| {
        b == b'/'
            && slash > 0
            && bytes[slash - 1].is_ascii_digit()
            && bytes.get(slash + 1).is_some_and(u8::is_ascii_digit)
    })
}

fn has_card_number_block(lines: &[&str], at: usize) -> bool {
    match (lines.get(at), lines.get(at + 1)) {
        (Some(code), Some(number)) => is_expansion_code(code) && contains_collector_number(number),
        _ => false,
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
