//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Generation
//!
//! - `TextGenerator` - the generative text capability
//!
//! ## Read side
//!
//! - `ContextProvider` - interview context snapshots (catalog, identity, history)
//! - `DirectoryService` - employee/role lookups for provenance resolution
//!
//! ## Write side
//!
//! - `ReferenceStore` - process references with idempotent writes
//! - `TurnStore` - persisted conversation turns

mod context_provider;
mod directory;
mod reference_store;
mod text_generator;
mod turn_store;

pub use context_provider::{
    ContextError, ContextProvider, HistorySummary, InterviewContextSnapshot, MAX_RECENT_TOPICS,
};
pub use directory::{
    DirectoryCredentials, DirectoryError, DirectoryService, EmployeeRecord, RoleRecord,
};
pub use reference_store::{
    InterviewRecord, ProcessReference, ReferenceStore, ReferenceStoreError, SaveOutcome,
};
pub use text_generator::{TextGenerationError, TextGenerator};
pub use turn_store::{TurnStore, TurnStoreError};
