//! # Bindery Support
//!
//! Shared utilities for the Bindery IoC container.
//!
//! This crate provides:
//! - Text rendering for error messages
//! - "Did you mean?" suggestions for unknown abstract names

pub mod rendering;
