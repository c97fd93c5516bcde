//! # sleuth-core
//!
//! Core types, ID generation, and time utilities for Sleuth.
//!
//! This crate provides the foundational types shared across all Sleuth crates:
//! - Entity structs for all domain objects (services, findings, root causes, etc.)
//! - Enums for categories, significance, and confidence levels
//! - ID prefix constants and formatting helpers
//! - The raw log record / query batch value types
//! - Time window parsing and permissive timestamp parsing
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod ids;
pub mod record;
pub mod responses;
pub mod timeutil;
