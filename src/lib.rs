//! Process Compass - Conversational Business Process Elicitation
//!
//! This crate implements a multi-turn interview engine that elicits
//! business-process descriptions from employees, matches what they
//! describe against an organization's known process catalog, and tells
//! them who first reported a matched process.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
