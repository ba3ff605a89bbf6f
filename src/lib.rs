//! # Grappelli
//!
//! A best-match route resolution engine for Rust web services.
//!
//! Given a tree of route nodes, each guarded by a selector with a match
//! quality, grappelli finds the single best-matching node for a request
//! path, the handlers attached to it, and the parameters it captured —
//! with backtracking, multi-criteria tie-breaking, and an optional
//! tracing side-channel for diagnostics.
//!
//! ## Feature Flags
//!
//! - `core` - Exception types only
//! - `http` - Request/response boundary types
//! - `routing` (default) - The resolution engine
//!
//! ## Crates
//!
//! - `grappelli-core`: the error enum and `Result` alias
//! - `grappelli-http`: `Request`, `Response`, `Handler`, `PathParams`
//! - `grappelli-routing`: route nodes, selectors, resolution, tracing

#[cfg(feature = "core")]
pub use grappelli_core as core;

#[cfg(feature = "http")]
pub use grappelli_http as http;

#[cfg(feature = "routing")]
pub use grappelli_routing as routing;

// Re-export commonly used types
#[cfg(feature = "routing")]
pub mod prelude {
	pub use grappelli_http::{Handler, PathParams, Request, Response};
	pub use grappelli_routing::{
		ConstantSegmentSelector, Evaluation, MethodSelector, OptionalParamSegmentSelector,
		ParamSegmentSelector, Resolution, ResolveContext, RouteNode, RouteSelector,
		TailcardSelector, WildcardSegmentSelector,
	};
}
