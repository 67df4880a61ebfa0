//! # rtype_app
//!
//! Entity registry, tick loop and demo configuration driven by the
//! `rtype_app` binary.

pub mod config;
pub mod registry;
pub mod tick;
