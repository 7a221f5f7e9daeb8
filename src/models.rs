use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Card category headers printed in an official deck list.
///
/// Declaration order is the print order, and `Ord` follows it so that
/// section-keyed maps serialize in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "ポケモン")]
    Pokemon,
    #[serde(rename = "グッズ")]
    Goods,
    #[serde(rename = "ポケモンのどうぐ")]
    PokemonTool,
    #[serde(rename = "サポート")]
    Supporter,
    #[serde(rename = "スタジアム")]
    Stadium,
    #[serde(rename = "エネルギー")]
    Energy,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Pokemon,
        Section::Goods,
        Section::PokemonTool,
        Section::Supporter,
        Section::Stadium,
        Section::Energy,
    ];

    /// Returns the header label as printed in the deck list
    pub fn label(&self) -> &'static str {
        match self {
            Section::Pokemon => "ポケモン",
            Section::Goods => "グッズ",
            Section::PokemonTool => "ポケモンのどうぐ",
            Section::Supporter => "サポート",
            Section::Stadium => "スタジアム",
            Section::Energy => "エネルギー",
        }
    }

    /// Exact-match lookup of a header line
    pub fn from_label(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == line)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One card line of a deck section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardEntry<'a> {
    pub name: &'a str,
    pub count: u32,
}

/// Card name -> summed count for one section of one deck, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionCounts {
    counts: IndexMap<String, u32>,
}

impl SectionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to the running total for `name`.
    ///
    /// Zero counts are ignored so that every stored entry stays positive.
    pub fn add(&mut self, name: &str, count: u32) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(name) {
            Some(total) => *total = total.saturating_add(count),
            None => {
                self.counts.insert(name.to_string(), count);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.counts.get(name).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = CardEntry<'_>> {
        self.counts.iter().map(|(name, &count)| CardEntry { name, count })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts in this section
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Parsed card counts of one deck, keyed by the sections whose header appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckRecord {
    pub sections: BTreeMap<Section, SectionCounts>,
}

impl DeckRecord {
    pub fn section(&self, section: Section) -> Option<&SectionCounts> {
        self.sections.get(&section)
    }

    /// Count of `name` in `section`, if recorded
    pub fn count(&self, section: Section, name: &str) -> Option<u32> {
        self.section(section).and_then(|s| s.get(name))
    }
}

/// Parsed decks in input order, keyed by deck id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckSample {
    decks: IndexMap<String, DeckRecord>,
}

impl DeckSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a deck. A repeated id replaces the earlier record in place.
    pub fn push(&mut self, deck_id: impl Into<String>, record: DeckRecord) {
        self.decks.insert(deck_id.into(), record);
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn deck_ids(&self) -> Vec<String> {
        self.decks.keys().cloned().collect()
    }

    pub fn get(&self, deck_id: &str) -> Option<&DeckRecord> {
        self.decks.get(deck_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeckRecord)> {
        self.decks.iter().map(|(id, record)| (id.as_str(), record))
    }
}

/// Writes whole-number averages as integers (`1`, not `1.0`).
fn serialize_avg<S: Serializer>(avg: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if avg.is_finite() && avg.fract() == 0.0 && avg.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*avg as i64)
    } else {
        serializer.serialize_f64(*avg)
    }
}

/// Statistics for one card name in one section across the whole sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub name: String,
    /// Number of decks containing the card, `0..=n`
    pub present: usize,
    /// `sum(counts) / n` rounded to 2 places
    #[serde(serialize_with = "serialize_avg")]
    pub avg: f64,
    pub min: u32,
    pub max: u32,
    /// Per-deck counts in deck order; decks without the card are omitted
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub n: usize,
    pub deck_ids: Vec<String>,
    pub summary: BTreeMap<Section, Vec<AggregateStat>>,
}

impl SummaryResult {
    /// Stats for a section; empty if the section was never seen
    pub fn section(&self, section: Section) -> &[AggregateStat] {
        self.summary
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The document written by the `summarize` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    pub parsed_by_deck: DeckSample,
    #[serde(flatten)]
    pub result: SummaryResult,
}
