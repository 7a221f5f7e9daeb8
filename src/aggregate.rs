//! Cross-deck aggregation of parsed deck records.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::collation::NameCollator;
use crate::models::{AggregateStat, DeckSample, Section, SummaryResult};

/// Rounds to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average over the whole sample.
///
/// Decks that do not run the card contribute 0 to the sum but still count in
/// `sample_size`; the divisor is never the presence count.
pub fn sample_average(counts: &[u32], sample_size: usize) -> f64 {
    if sample_size == 0 {
        return 0.0;
    }
    let sum: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    round2(sum as f64 / sample_size as f64)
}

/// Aggregates every section of the sample using Japanese name collation.
pub fn summarize(sample: &DeckSample) -> SummaryResult {
    summarize_with(sample, &NameCollator::japanese())
}

pub fn summarize_with(sample: &DeckSample, collator: &NameCollator) -> SummaryResult {
    let n = sample.len();
    let summary: BTreeMap<Section, Vec<AggregateStat>> = Section::ALL
        .into_iter()
        .map(|section| (section, summarize_section(sample, section, collator)))
        .collect();

    debug!(
        "Summarized {} decks: {}",
        n,
        summary
            .iter()
            .map(|(section, stats)| format!("{section}={}", stats.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    SummaryResult {
        n,
        deck_ids: sample.deck_ids(),
        summary,
    }
}

/// Builds the sorted stats for one section.
pub fn summarize_section(
    sample: &DeckSample,
    section: Section,
    collator: &NameCollator,
) -> Vec<AggregateStat> {
    let n = sample.len();

    // Union of names in first-seen order, with per-deck counts in deck order.
    let mut order: Vec<&str> = Vec::new();
    let mut counts_by_name: HashMap<&str, Vec<u32>> = HashMap::new();
    for (_, record) in sample.iter() {
        let Some(counts) = record.section(section) else {
            continue;
        };
        for entry in counts.entries() {
            counts_by_name
                .entry(entry.name)
                .or_insert_with(|| {
                    order.push(entry.name);
                    Vec::new()
                })
                .push(entry.count);
        }
    }

    let mut stats: Vec<AggregateStat> = order
        .into_iter()
        .filter_map(|name| {
            let counts = counts_by_name.remove(name)?;
            let min = counts.iter().copied().min()?;
            let max = counts.iter().copied().max()?;
            Some(AggregateStat {
                name: name.to_string(),
                present: counts.len(),
                avg: sample_average(&counts, n),
                min,
                max,
                counts,
            })
        })
        .collect();

    stats.sort_by(|a, b| {
        b.present
            .cmp(&a.present)
            .then_with(|| b.avg.total_cmp(&a.avg))
            .then_with(|| collator.compare(&a.name, &b.name))
    });
    stats
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
