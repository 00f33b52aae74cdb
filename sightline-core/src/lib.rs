//! Sightline Core — rule engine for timed sighting events.
//!
//! This crate is the decision layer of a notification pipeline:
//! - Domain types (sightings, canonical ids, the unknown-distance sentinel)
//! - Alias resolution (integers, digit strings, and display names collapse
//!   to canonical id sets at construction)
//! - Rule configuration parsing with construction-time validation
//! - Egg and raid filter evaluators built on a shared predicate set
//!
//! Evaluation is pure and infallible: a filter is built once from its rule
//! configuration, never mutated, and answers `check` with a plain boolean.
//! Misconfigured values fail at construction; at evaluation time every
//! event/rule combination has a defined outcome, because a bad rule should
//! silently exclude events rather than crash a long-running monitor.
//! Replacing a rule set means building a new filter and swapping the whole
//! object, so concurrent evaluators never observe a half-updated rule.
//!
//! Event ingestion, geodistance computation, the name→id tables, and
//! notification dispatch are external collaborators; the tables are
//! injected read-only at construction.

pub mod aliases;
pub mod config;
pub mod domain;
pub mod filters;
