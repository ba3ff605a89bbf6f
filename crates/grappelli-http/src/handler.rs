use crate::{Request, Response};
use async_trait::async_trait;
use grappelli_core::Result;
use std::sync::Arc;

/// Handler trait for processing requests.
///
/// This is the attachment point between a route tree and application
/// code: route nodes own `Arc<dyn Handler>` values, and whoever dispatches
/// a successful resolution invokes one of them. The resolution engine
/// itself never awaits a handler.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles an HTTP request and produces a response.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed.
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation for `Arc<T>` where T: Handler.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct DummyHandler;

	#[async_trait]
	impl Handler for DummyHandler {
		async fn handle(&self, _req: Request) -> Result<Response> {
			Ok(Response::ok())
		}
	}

	#[tokio::test]
	async fn test_arc_handler_delegates() {
		let handler: Arc<dyn Handler> = Arc::new(DummyHandler);
		let request = Request::builder().uri("/").build().unwrap();
		let response = handler.handle(request).await.unwrap();
		assert_eq!(response.status, hyper::StatusCode::OK);
	}
}
