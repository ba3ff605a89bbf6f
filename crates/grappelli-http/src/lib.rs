//! HTTP boundary types consumed by the grappelli resolution engine.
//!
//! The engine itself only ever reads a request's path (and, through guard
//! selectors, its method and headers). Everything here exists so route
//! trees have a concrete request to resolve against and concrete handlers
//! to attach: [`Request`] with its builder, [`Response`], the [`Handler`]
//! trait, and the [`PathParams`] multi-value parameter map the engine
//! fills in on a successful match.

pub mod handler;
pub mod params;
pub mod request;
pub mod response;

pub use handler::Handler;
pub use params::PathParams;
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use grappelli_core::{Error, Result};
