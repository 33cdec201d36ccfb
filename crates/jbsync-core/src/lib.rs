// Rust guideline compliant 2026-02-06

//! jira-beads-sync core library
//!
//! This crate holds the parts of the importer that do not talk to the network:
//! - Raw source records and the [`IssueSource`] capability
//! - Graph fetcher (seed keys to a deduplicated record set)
//! - Schema converter (records to beads issues and epics)
//! - Target renderers (JSONL and YAML under `.beads/`)
//! - Configuration and error types

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod ids;
pub mod models;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod source;

pub use config::{Config, OutputFormat, TruncationPolicy};
pub use convert::{convert, map_priority, map_status, Converter, DependencyRules};
pub use error::{Error, Result};
pub use fetch::{FetchAdvisory, FetchOutcome, GraphFetcher};
pub use graph::{DependencyGraph, GraphAdvisory};
pub use ids::{to_id, Registry};
pub use models::{Entity, Epic, Export, Issue, Metadata, Priority, Status};
pub use pipeline::{ImportReport, Pipeline};
pub use record::{EpicRef, IssueType, Link, LinkType, RawRecord, RecordRef, StatusInfo, User};
pub use render::{renderer_for, JsonlRenderer, RenderSummary, Renderer, YamlRenderer};
pub use source::{IssueSource, MemorySource, SearchPage};
