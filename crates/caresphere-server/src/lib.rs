//! # CareSphere Server Library
//!
//! Service wiring and startup utilities for the CareSphere server binary.

pub mod startup;
