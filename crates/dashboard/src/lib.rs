//! Query/result core of the mission dashboard.
//!
//! - [`controller`] owns the query form state and orders overlapping submissions.
//! - [`client`] talks to the backend through a pluggable [`client::QueryTransport`].
//! - [`render`] turns visualization descriptors into drawable chart panels.

pub mod client;
pub mod config;
pub mod controller;
pub mod palette;
pub mod render;

pub use client::*;
pub use config::*;
pub use controller::*;
pub use render::*;
