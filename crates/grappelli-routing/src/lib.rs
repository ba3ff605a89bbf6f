//! Best-match route tree resolution.
//!
//! Given an already-built tree of [`RouteNode`]s — each guarded by a
//! [`RouteSelector`] that reports whether and *how well* it matches a
//! path position — the engine finds the single best-matching node, the
//! handlers attached to it, and the path parameters captured on the way
//! down. Resolution collects every structurally valid candidate path,
//! then ranks them by per-position quality, preferring deeper matches on
//! ties; pass-through guards (transparent quality) never participate in
//! the comparison.
//!
//! The walk is a pure, synchronous computation over an immutable tree:
//! no locks, no I/O, no shared state between concurrent resolutions. An
//! optional [`ResolveTrace`] records every visited and skipped node for
//! diagnostics and costs nothing when no trace callback is registered.
//!
//! ```
//! use grappelli_http::Request;
//! use grappelli_routing::{ConstantSegmentSelector, ParamSegmentSelector};
//! use grappelli_routing::{ResolveContext, Resolution, RouteNode};
//! use hyper::Method;
//! # use async_trait::async_trait;
//! # use grappelli_http::{Handler, Response};
//! # struct DummyHandler;
//! # #[async_trait]
//! # impl Handler for DummyHandler {
//! #     async fn handle(&self, _req: Request) -> grappelli_core::Result<Response> {
//! #         Ok(Response::ok())
//! #     }
//! # }
//!
//! let mut root = RouteNode::root();
//! let users = root.create_child(ConstantSegmentSelector::new("users"));
//! let detail = users.create_child(ParamSegmentSelector::new("id"));
//! detail.add_handler(std::sync::Arc::new(DummyHandler));
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/users/42")
//!     .build()
//!     .unwrap();
//!
//! let context = ResolveContext::new(&root, &request, Vec::new()).unwrap();
//! match context.resolve() {
//!     Resolution::Success { route, params, .. } => {
//!         assert_eq!(route.to_string(), "/users/{id}");
//!         assert_eq!(params.get("id"), Some("42"));
//!     }
//!     Resolution::Failure { .. } => unreachable!(),
//! }
//! ```

pub mod node;
pub mod resolve;
pub mod segments;
pub mod selector;
pub mod trace;

pub use node::RouteNode;
pub use resolve::{NodeMatch, Resolution, ResolveContext, TraceCallback};
pub use segments::parse_path_segments;
pub use selector::{
	ConstantSegmentSelector, Evaluation, HeaderSelector, MethodSelector,
	OptionalParamSegmentSelector, ParamSegmentSelector, RootSelector, RouteSelector,
	TailcardSelector, TrailingSlashSelector, WildcardSegmentSelector, QUALITY_CONSTANT,
	QUALITY_MISSING, QUALITY_PARAMETER, QUALITY_TRANSPARENT, QUALITY_WILDCARD,
};
pub use trace::{ResolveTrace, TraceCandidate, TraceEntry, TraceOutcome, TraceResult};
