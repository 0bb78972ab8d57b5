//! FortiGate configuration export extraction.
//!
//! The block grammar and CSV emission live in `fgconf-core`; this crate adds
//! the section catalogue (which `config ...` blocks can be extracted and
//! where their CSV goes by default) and terminal reporting for the `fgconf`
//! binary.
//!
//! - [`catalogue`] — built-in and TOML-defined section definitions
//! - [`report`] — colored per-section counts and extraction summaries

pub mod catalogue;
pub mod report;
