//! Qualifier-based config definitions.
//!
//! Each configuration key has several candidate values, each tagged with
//! qualifier conditions (e.g. `env=prod`, `region={eu,us}`). This crate
//! validates candidate sets against a priority-ordered qualifier schema and
//! establishes a deterministic total order over them, most specific first.
//!
//! The [`definition`] module is the pure core; [`source`], [`config`] and
//! [`cli`] are the file, settings and command-line layers around it.

pub mod cli;
pub mod config;
pub mod definition;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
