//! Core-card skeleton derived from a summary.
//!
//! A skeleton is the "average deck" shown on report pages: cards that appear
//! in at least `threshold` decks of the sample, each listed at its average
//! count rounded to a whole card.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::collation::NameCollator;
use crate::models::{AggregateStat, Section, SummaryResult};

/// Presence threshold used for a 5-deck sample
pub const DEFAULT_CORE_THRESHOLD: usize = 3;

const DECK_PRINT_URL: &str = "https://www.pokemon-card.com/deck/print.html/deckID";
const DECK_CONFIRM_URL: &str = "https://www.pokemon-card.com/deck/confirm.html/deckID";

/// Cards present in at least `threshold` decks
pub fn core_cards(stats: &[AggregateStat], threshold: usize) -> impl Iterator<Item = &AggregateStat> {
    stats.iter().filter(move |s| s.present >= threshold)
}

/// Whole-card quantity for an average: nearest integer, never below 0.
pub fn display_qty(avg: f64) -> u32 {
    let rounded = avg.round();
    if rounded.is_finite() && rounded > 0.0 {
        rounded as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonRow {
    pub name: String,
    pub qty: u32,
    pub present: usize,
    pub avg: f64,
    /// Per-deck counts of the decks running the card
    pub counts: Vec<u32>,
}

/// Section groups as laid out on report pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionGroup {
    Pokemon,
    ItemsTools,
    Supporters,
    StadiumsEnergy,
}

impl SectionGroup {
    pub const ALL: [SectionGroup; 4] = [
        SectionGroup::Pokemon,
        SectionGroup::ItemsTools,
        SectionGroup::Supporters,
        SectionGroup::StadiumsEnergy,
    ];

    pub fn of(section: Section) -> Self {
        match section {
            Section::Pokemon => SectionGroup::Pokemon,
            Section::Goods | Section::PokemonTool => SectionGroup::ItemsTools,
            Section::Supporter => SectionGroup::Supporters,
            Section::Stadium | Section::Energy => SectionGroup::StadiumsEnergy,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionGroup::Pokemon => "Pokémon",
            SectionGroup::ItemsTools => "Items/Tools",
            SectionGroup::Supporters => "Supporters",
            SectionGroup::StadiumsEnergy => "Stadiums/Energy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckLinks {
    pub deck_id: String,
    pub print: String,
    pub confirm: String,
}

/// Official print and confirm page URLs for a deck id
pub fn deck_links(deck_id: &str) -> DeckLinks {
    DeckLinks {
        deck_id: deck_id.to_string(),
        print: format!("{DECK_PRINT_URL}/{deck_id}/"),
        confirm: format!("{DECK_CONFIRM_URL}/{deck_id}"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skeleton {
    pub n: usize,
    pub threshold: usize,
    pub sections: BTreeMap<Section, Vec<SkeletonRow>>,
    pub totals: BTreeMap<SectionGroup, u32>,
    pub total: u32,
    pub decks: Vec<DeckLinks>,
}

impl Skeleton {
    pub fn build(result: &SummaryResult, threshold: usize, collator: &NameCollator) -> Self {
        let mut sections = BTreeMap::new();
        let mut totals: BTreeMap<SectionGroup, u32> =
            SectionGroup::ALL.into_iter().map(|g| (g, 0)).collect();

        for section in Section::ALL {
            let stats = result.section(section);

            let section_total: u32 = core_cards(stats, threshold).map(|s| display_qty(s.avg)).sum();
            *totals.entry(SectionGroup::of(section)).or_default() += section_total;

            sections.insert(section, skeleton_rows(stats, threshold, collator));
        }

        let total = totals.values().sum();
        Self {
            n: result.n,
            threshold,
            sections,
            totals,
            total,
            decks: result.deck_ids.iter().map(|id| deck_links(id)).collect(),
        }
    }

    pub fn rows(&self, section: Section) -> &[SkeletonRow] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn group_total(&self, group: SectionGroup) -> u32 {
        self.totals.get(&group).copied().unwrap_or(0)
    }

    /// Plain text rendering for terminal output
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Skeleton (present >= {}/{}, average rounded): {} cards\n",
            self.threshold, self.n, self.total
        ));
        for group in SectionGroup::ALL {
            output.push_str(&format!("  {}: {}\n", group.title(), self.group_total(group)));
        }

        for section in Section::ALL {
            let rows = self.rows(section);
            if rows.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{section}\n"));
            for row in rows {
                output.push_str(&format!(
                    "  {:>2}  {} ({}/{}, avg {}) {:?}\n",
                    row.qty, row.name, row.present, self.n, row.avg, row.counts
                ));
            }
        }

        if !self.decks.is_empty() {
            output.push_str("\nDecks\n");
            for deck in &self.decks {
                output.push_str(&format!("  {}  {}\n", deck.deck_id, deck.print));
            }
        }

        output
    }
}

/// Core cards with a non-zero quantity, sorted by qty, presence, then name.
pub fn skeleton_rows(
    stats: &[AggregateStat],
    threshold: usize,
    collator: &NameCollator,
) -> Vec<SkeletonRow> {
    let mut rows: Vec<SkeletonRow> = core_cards(stats, threshold)
        .map(|s| SkeletonRow {
            name: s.name.clone(),
            qty: display_qty(s.avg),
            present: s.present,
            avg: s.avg,
            counts: s.counts.clone(),
        })
        .filter(|row| row.qty > 0)
        .collect();

    rows.sort_by(|a, b| {
        b.qty
            .cmp(&a.qty)
            .then_with(|| b.present.cmp(&a.present))
            .then_with(|| collator.compare(&a.name, &b.name))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, present: usize, avg: f64) -> AggregateStat {
        AggregateStat {
            name: name.to_string(),
            present,
            avg,
            min: 1,
            max: 4,
            counts: vec![1; present],
        }
    }

    fn result_with(section: Section, stats: Vec<AggregateStat>) -> SummaryResult {
        let mut summary: BTreeMap<Section, Vec<AggregateStat>> =
            Section::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        summary.insert(section, stats);
        SummaryResult {
            n: 5,
            deck_ids: vec!["abc".to_string(), "def".to_string()],
            summary,
        }
    }

    #[test]
    fn display_qty_rounds_and_clamps() {
        assert_eq!(display_qty(1.2), 1);
        assert_eq!(display_qty(1.5), 2);
        assert_eq!(display_qty(2.49), 2);
        assert_eq!(display_qty(0.4), 0);
        assert_eq!(display_qty(-1.0), 0);
        assert_eq!(display_qty(f64::NAN), 0);
        assert_eq!(display_qty(f64::INFINITY), 0);
    }

    #[test]
    fn core_cards_respects_threshold() {
        let stats = vec![stat("A", 5, 4.0), stat("B", 3, 1.2), stat("C", 2, 0.8)];

        let names: Vec<_> = core_cards(&stats, 3).map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn rows_drop_zero_quantity_and_sort_by_qty() {
        let stats = vec![
            stat("A", 5, 1.0),
            stat("B", 3, 3.6),
            stat("C", 3, 0.4),
            stat("D", 4, 1.2),
        ];

        let rows = skeleton_rows(&stats, 3, &NameCollator::code_point());
        let names: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.qty)).collect();

        assert_eq!(names, vec![("B", 4), ("A", 1), ("D", 1)]);
        assert_eq!(rows[0].counts, vec![1, 1, 1]);
    }

    #[test]
    fn totals_group_sections() {
        let mut result = result_with(Section::Goods, vec![stat("ネストボール", 5, 4.0)]);
        result
            .summary
            .insert(Section::PokemonTool, vec![stat("勇気のおまもり", 3, 1.2)]);
        result
            .summary
            .insert(Section::Energy, vec![stat("基本雷エネルギー", 5, 8.4)]);
        result
            .summary
            .insert(Section::Pokemon, vec![stat("ピカチュウex", 5, 3.0), stat("ミュウ", 2, 0.4)]);

        let skeleton = Skeleton::build(&result, DEFAULT_CORE_THRESHOLD, &NameCollator::code_point());

        assert_eq!(skeleton.group_total(SectionGroup::Pokemon), 3);
        assert_eq!(skeleton.group_total(SectionGroup::ItemsTools), 5);
        assert_eq!(skeleton.group_total(SectionGroup::Supporters), 0);
        assert_eq!(skeleton.group_total(SectionGroup::StadiumsEnergy), 8);
        assert_eq!(skeleton.total, 16);
        assert_eq!(skeleton.rows(Section::Pokemon).len(), 1);
    }

    #[test]
    fn deck_links_point_to_official_pages() {
        let links = deck_links("xY12ab-CDEF34-gh5678");

        assert_eq!(
            links.print,
            "https://www.pokemon-card.com/deck/print.html/deckID/xY12ab-CDEF34-gh5678/"
        );
        assert_eq!(
            links.confirm,
            "https://www.pokemon-card.com/deck/confirm.html/deckID/xY12ab-CDEF34-gh5678"
        );
    }

    #[test]
    fn text_output_lists_rows_and_decks() {
        let result = result_with(Section::Supporter, vec![stat("ナンジャモ", 5, 3.6)]);

        let text = Skeleton::build(&result, 3, &NameCollator::code_point()).to_text();

        assert!(text.contains("Skeleton (present >= 3/5, average rounded): 4 cards"));
        assert!(text.contains("サポート"));
        assert!(text.contains("ナンジャモ (5/5, avg 3.6) [1, 1, 1, 1, 1]"));
        assert!(text.contains("print.html/deckID/abc/"));
        assert!(!text.contains("スタジアム"));
    }
}
