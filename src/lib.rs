//! Estate Tax and Insurance Strategy Advisory Engine
//!
//! This crate provides two pure computation engines used by a wealth
//! advisory service: a progressive estate tax calculator with statutory
//! deductions, and a rule-based recommender that maps a client profile to
//! an ordered list of insurance strategies. A thin axum adapter exposes
//! both over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod recommendation;
