//! Lume Connect - client state core for the Lume dating app
//!
//! This library holds the local state behind the app: the discovery feed,
//! the three-stage like escalation that turns a like into a match, and the
//! negotiation of date proposals between matched users.

pub mod config;
pub mod core;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use crate::core::{DateNegotiator, DiscoveryFeed, MatchEngine};
pub use crate::models::{DateProposal, LikeStage, ProfileMatch, ProposalStatus, ResponseAction, User};
pub use crate::store::{Action, Store, StoreError};
