use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::aggregate::summarize;
use crate::error::{DeckStatsError, Result};
use crate::models::{DeckSample, SummaryDocument};
use crate::parser::parse_print_text;

/// Reads a JSON object of deck id -> print text, keeping key order.
pub fn read_deck_texts<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>> {
    let path = path.as_ref();
    info!("Reading deck print texts from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| DeckStatsError::io(path, e))?;
    parse_deck_texts(&content)
}

/// Parses the deck text JSON document.
pub fn parse_deck_texts(content: &str) -> Result<Vec<(String, String)>> {
    let root: Value = serde_json::from_str(content)?;
    let Value::Object(map) = root else {
        return Err(DeckStatsError::InvalidInput(
            "expected a JSON object of deck id to print text".to_string(),
        ));
    };

    map.into_iter()
        .map(|(deck_id, text)| match text {
            Value::String(text) => Ok((deck_id, text)),
            other => Err(DeckStatsError::InvalidInput(format!(
                "print text for deck {deck_id} is not a string: {other}"
            ))),
        })
        .collect()
}

/// Parses every deck's print text.
pub fn parse_sample(texts: &[(String, String)]) -> DeckSample {
    let mut sample = DeckSample::new();
    for (deck_id, text) in texts {
        let record = parse_print_text(text);
        debug!(
            "Parsed deck {}: {} sections, {} cards",
            deck_id,
            record.sections.len(),
            record.sections.values().map(|s| s.total()).sum::<u32>()
        );
        sample.push(deck_id.as_str(), record);
    }
    sample
}

/// Parses and aggregates a sample into the output document.
///
/// An empty sample is an error: there is nothing to average over.
pub fn build_summary(texts: &[(String, String)]) -> Result<SummaryDocument> {
    let sample = parse_sample(texts);
    if sample.is_empty() {
        return Err(DeckStatsError::EmptySample);
    }

    let result = summarize(&sample);
    Ok(SummaryDocument {
        parsed_by_deck: sample,
        result,
    })
}

/// Writes a summary document as pretty JSON, creating parent directories.
pub fn write_summary<P: AsRef<Path>>(path: P, doc: &SummaryDocument) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(doc)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DeckStatsError::io(parent, e))?;
            debug!("Created directory: {}", parent.display());
        }
    }

    fs::write(path, json).map_err(|e| DeckStatsError::io(path, e))?;
    info!("Wrote summary of {} decks to {}", doc.result.n, path.display());
    Ok(())
}

/// Reads a summary document written by [`write_summary`].
pub fn read_summary<P: AsRef<Path>>(path: P) -> Result<SummaryDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| DeckStatsError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
