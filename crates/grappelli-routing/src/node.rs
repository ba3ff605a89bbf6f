use crate::selector::{RootSelector, RouteSelector};
use grappelli_http::Handler;
use std::fmt;
use std::sync::Arc;

/// A node in the route tree.
///
/// Each node owns a selector, an ordered list of children (registration
/// order is significant: first registered, first tried), and zero or
/// more attached handlers. A node with no handlers cannot terminate a
/// match — it only passes through to its children.
///
/// Trees are built once through [`RouteNode::root`] and
/// [`create_child`](RouteNode::create_child), then treated as read-only
/// for the lifetime of any in-flight resolution. The engine never
/// mutates a node.
pub struct RouteNode {
	selector: Box<dyn RouteSelector>,
	children: Vec<RouteNode>,
	handlers: Vec<Arc<dyn Handler>>,
	/// Diagnostic path from the root, e.g. "/users/{id}"
	path: String,
}

impl RouteNode {
	/// Create the root of a route tree
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::RouteNode;
	///
	/// let root = RouteNode::root();
	/// assert_eq!(root.to_string(), "/");
	/// assert!(root.children().is_empty());
	/// ```
	pub fn root() -> Self {
		Self {
			selector: Box::new(RootSelector),
			children: Vec::new(),
			handlers: Vec::new(),
			path: String::new(),
		}
	}

	/// Create a tree root guarded by a custom selector instead of the
	/// default [`RootSelector`]. Useful for trees that gate everything
	/// behind a method or header guard.
	pub fn with_selector(selector: impl RouteSelector + 'static) -> Self {
		let path = selector.to_string();
		Self {
			selector: Box::new(selector),
			children: Vec::new(),
			handlers: Vec::new(),
			path,
		}
	}

	/// Append a child guarded by `selector` and return it for further
	/// building.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::{ConstantSegmentSelector, ParamSegmentSelector, RouteNode};
	///
	/// let mut root = RouteNode::root();
	/// let users = root.create_child(ConstantSegmentSelector::new("users"));
	/// let detail = users.create_child(ParamSegmentSelector::new("id"));
	/// assert_eq!(detail.to_string(), "/users/{id}");
	/// ```
	pub fn create_child(&mut self, selector: impl RouteSelector + 'static) -> &mut RouteNode {
		let rendered = selector.to_string();
		let path = if rendered.is_empty() {
			self.path.clone()
		} else {
			format!("{}/{}", self.path, rendered)
		};
		self.children.push(RouteNode {
			selector: Box::new(selector),
			children: Vec::new(),
			handlers: Vec::new(),
			path,
		});
		// Just pushed, cannot be empty
		let index = self.children.len() - 1;
		&mut self.children[index]
	}

	/// Attach a handler, making this node a possible match terminal
	pub fn add_handler(&mut self, handler: Arc<dyn Handler>) {
		self.handlers.push(handler);
	}

	/// The selector guarding this node
	pub fn selector(&self) -> &dyn RouteSelector {
		&*self.selector
	}

	/// Children in registration order
	pub fn children(&self) -> &[RouteNode] {
		&self.children
	}

	/// Handlers attached to this node
	pub fn handlers(&self) -> &[Arc<dyn Handler>] {
		&self.handlers
	}
}

impl fmt::Display for RouteNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.path.is_empty() {
			f.write_str("/")
		} else {
			f.write_str(&self.path)
		}
	}
}

impl fmt::Debug for RouteNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteNode")
			.field("path", &self.to_string())
			.field("selector", &self.selector)
			.field("children", &self.children.len())
			.field("handlers", &self.handlers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::selector::{ConstantSegmentSelector, MethodSelector, ParamSegmentSelector};
	use async_trait::async_trait;
	use grappelli_http::{Request, Response};
	use hyper::Method;

	struct DummyHandler;

	#[async_trait]
	impl Handler for DummyHandler {
		async fn handle(&self, _req: Request) -> grappelli_core::Result<Response> {
			Ok(Response::ok())
		}
	}

	#[test]
	fn test_children_keep_registration_order() {
		let mut root = RouteNode::root();
		root.create_child(ConstantSegmentSelector::new("first"));
		root.create_child(ConstantSegmentSelector::new("second"));

		let rendered: Vec<String> = root
			.children()
			.iter()
			.map(|child| child.to_string())
			.collect();
		assert_eq!(rendered, ["/first", "/second"]);
	}

	#[test]
	fn test_display_path_includes_guards() {
		let mut root = RouteNode::root();
		let api = root.create_child(ConstantSegmentSelector::new("api"));
		let get = api.create_child(MethodSelector::new(Method::GET));
		// Only the root renders as nothing; guards appear in the path
		assert_eq!(get.to_string(), "/api/(method:GET)");
	}

	#[test]
	fn test_handlers_mark_terminals() {
		let mut root = RouteNode::root();
		let detail = root.create_child(ParamSegmentSelector::new("id"));
		assert!(detail.handlers().is_empty());
		detail.add_handler(std::sync::Arc::new(DummyHandler));
		assert_eq!(detail.handlers().len(), 1);
	}
}
