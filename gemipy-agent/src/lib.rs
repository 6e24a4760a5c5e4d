//! Query logic for gemipy
//!
//! This crate turns the session state and a new user prompt into a single
//! model request, and turns the result back into a displayable turn.

pub mod context;
pub mod dispatcher;

pub use dispatcher::{QueryDispatcher, QueryOutcome, API_KEY_ENV};
