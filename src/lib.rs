//! PTCG Deck Stats - deck list statistics for Pokémon TCG report pages
//!
//! Parses official deck print text into per-section card counts, aggregates
//! them across a sample of decks and derives the core-card skeleton.

pub mod aggregate;
pub mod collation;
pub mod error;
pub mod io;
pub mod models;
pub mod parser;
pub mod skeleton;

pub use aggregate::{summarize, summarize_with};
pub use collation::NameCollator;
pub use error::{DeckStatsError, Result};
pub use io::{build_summary, read_deck_texts, read_summary, write_summary};
pub use models::{
    AggregateStat, CardEntry, DeckRecord, DeckSample, Section, SectionCounts, SummaryDocument,
    SummaryResult,
};
pub use parser::{parse_print_text, tokenize_lines};
pub use skeleton::{Skeleton, SkeletonRow, DEFAULT_CORE_THRESHOLD};
