//! Core use-case services.
//!
//! # Responsibility
//! - Map user events onto store mutations, saves and view recomputation.
//! - Keep presentation layers decoupled from storage details.

pub mod program_service;
