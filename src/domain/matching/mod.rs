//! Process matching: lexical gate, semantic matcher, provenance.

mod matcher;
mod mention;
mod provenance;
mod verdict;

pub use matcher::{ProcessMatcher, DEFAULT_MATCH_TIMEOUT};
pub use mention::mentions_process;
pub use provenance::ProvenanceResolver;
pub use verdict::{
    prepare_candidates, CatalogEntry, MatchVerdict, Provenance, CATALOG_CANDIDATE_CAP,
};
