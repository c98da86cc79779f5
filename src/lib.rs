//! Posts a random meme to a Mastodon-compatible server on a fixed interval.

pub mod config;
pub mod domain;
pub mod errors;
pub mod mastodon;
pub mod meme_source;
pub mod models;
pub mod orchestrator;
pub mod scratch;
pub mod startup;
