//! # daybook-api
//!
//! REST resource clients for the Daybook backend.
//!
//! [`DaybookClient`] wraps the session and exposes one method per backend
//! operation:
//! - diary entries, per-entry content blocks and diary statistics
//! - habits, habit logs and per-habit statistics
//! - reflection questions, daily reflections, streaks and dashboard data
//!
//! Every call goes through the session's authorized executor. [`Loadable`]
//! settles a result into what a screen shows: loaded, empty, or an inline
//! failure. The quote and image integrations live in [`external`] and do not
//! use the session.

pub mod client;
pub mod diary;
pub mod external;
pub mod fetch;
pub mod reflection;
pub mod tracker;

mod error;
mod http;

pub use client::DaybookClient;
pub use error::ApiError;
pub use external::{CategoryCycle, ImageClient, Quote, QuoteClient, RandomImage};
pub use fetch::Loadable;
