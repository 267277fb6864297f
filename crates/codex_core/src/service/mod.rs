//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and suggestion calls into use-case level APIs.
//! - Keep front ends decoupled from storage details.

pub mod atom_service;
pub mod suggestion_service;
pub mod text_service;
