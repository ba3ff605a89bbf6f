// Trace sink tests: the diagnostic record is complete, observational
// only, and costs nothing when nobody listens.

use async_trait::async_trait;
use grappelli_http::{Handler, Request, Response};
use grappelli_routing::{
	ConstantSegmentSelector, MethodSelector, ParamSegmentSelector, Resolution, ResolveContext,
	ResolveTrace, RouteNode, TraceEntry, TraceOutcome, TraceResult,
};
use hyper::Method;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct DummyHandler;

#[async_trait]
impl Handler for DummyHandler {
	async fn handle(&self, _req: Request) -> grappelli_core::Result<Response> {
		Ok(Response::ok())
	}
}

fn handler() -> Arc<dyn Handler> {
	Arc::new(DummyHandler)
}

fn get(path: &str) -> Request {
	Request::builder()
		.method(Method::GET)
		.uri(path)
		.build()
		.expect("Valid request")
}

/// A tree with a literal and a capturing sibling under /users
fn users_tree() -> RouteNode {
	let mut root = RouteNode::root();
	let users = root.create_child(ConstantSegmentSelector::new("users"));
	let me = users.create_child(ConstantSegmentSelector::new("me"));
	me.add_handler(handler());
	let detail = users.create_child(ParamSegmentSelector::new("id"));
	detail.add_handler(handler());
	root
}

/// Resolve with a callback that clones the finished trace out
fn resolve_traced<'a>(
	root: &'a RouteNode,
	request: &'a Request,
) -> (Resolution<'a>, ResolveTrace) {
	let slot: Arc<Mutex<Option<ResolveTrace>>> = Arc::new(Mutex::new(None));
	let sink = slot.clone();
	let context = ResolveContext::new(
		root,
		request,
		vec![Box::new(move |trace: &ResolveTrace| {
			*sink.lock().expect("Trace slot lock") = Some(trace.clone());
		})],
	)
	.expect("Valid path");
	let resolution = context.resolve();
	let trace = slot
		.lock()
		.expect("Trace slot lock")
		.take()
		.expect("Callback ran");
	(resolution, trace)
}

fn count_skips(entries: &[TraceEntry], reason: &str) -> usize {
	entries
		.iter()
		.map(|entry| {
			let own = match &entry.outcome {
				TraceOutcome::Skipped(skip_reason) if skip_reason == reason => 1,
				_ => 0,
			};
			own + count_skips(&entry.children, reason)
		})
		.sum()
}

// Test: every callback runs exactly once, after the outcome is final
#[test]
fn test_callbacks_run_once_each() {
	let root = users_tree();
	let request = get("/users/me");

	let first = Arc::new(AtomicUsize::new(0));
	let second = Arc::new(AtomicUsize::new(0));
	let (a, b) = (first.clone(), second.clone());
	let context = ResolveContext::new(
		&root,
		&request,
		vec![
			Box::new(move |trace: &ResolveTrace| {
				assert!(trace.result().is_some(), "Result must be final");
				a.fetch_add(1, Ordering::SeqCst);
			}),
			Box::new(move |_trace: &ResolveTrace| {
				b.fetch_add(1, Ordering::SeqCst);
			}),
		],
	)
	.expect("Valid path");
	context.resolve();

	assert_eq!(first.load(Ordering::SeqCst), 1);
	assert_eq!(second.load(Ordering::SeqCst), 1);
}

// Test: tracing is purely observational — outcomes are identical with
// and without callbacks registered
#[test]
fn test_trace_is_observational_only() {
	let root = users_tree();
	let request = get("/users/42");

	let untraced = ResolveContext::new(&root, &request, Vec::new())
		.expect("Valid path")
		.resolve();
	let (traced, _) = resolve_traced(&root, &request);

	match (untraced, traced) {
		(
			Resolution::Success {
				route: a,
				params: pa,
				quality: qa,
			},
			Resolution::Success {
				route: b,
				params: pb,
				quality: qb,
			},
		) => {
			assert!(std::ptr::eq(a, b));
			assert_eq!(pa, pb);
			assert_eq!(qa, qb);
		}
		other => panic!("Expected two successes, got {other:?}"),
	}
}

// Test: skipped nodes appear with their reasons
#[test]
fn test_skips_are_recorded_with_reasons() {
	let root = users_tree();
	// "me" matches first and seeds the pruning threshold; "{id}" is
	// outranked and pruned without descending.
	let request = get("/users/me");
	let (_, trace) = resolve_traced(&root, &request);

	assert_eq!(
		count_skips(trace.entries(), "Better match was already found"),
		1
	);

	// An unmatchable path records selector rejections instead
	let request = get("/users/42/extra");
	let (_, trace) = resolve_traced(&root, &request);
	assert_eq!(count_skips(trace.entries(), "Selector didn't match"), 1);
	assert!(count_skips(trace.entries(), "Not all segments matched") >= 1);
}

// Test: every recorded candidate shows up in the trace
#[test]
fn test_candidates_are_recorded() {
	let root = users_tree();
	let request = get("/users/42");
	let (_, trace) = resolve_traced(&root, &request);
	assert_eq!(trace.candidates().len(), 1);
	assert_eq!(trace.candidates()[0].route, "/users/{id}");

	match trace.result() {
		Some(TraceResult::Success { route, .. }) => assert_eq!(route, "/users/{id}"),
		other => panic!("Expected success result, got {other:?}"),
	}
}

// Test: failures carry the nearest route and reason into the trace
#[test]
fn test_failure_result_is_recorded() {
	let root = users_tree();
	let request = get("/orders");
	let (_, trace) = resolve_traced(&root, &request);

	assert!(trace.candidates().is_empty());
	match trace.result() {
		Some(TraceResult::Failure { route, reason }) => {
			assert_eq!(route, "/");
			assert_eq!(reason, "No matched subtrees found");
		}
		other => panic!("Expected failure result, got {other:?}"),
	}
}

// Test: the text rendering covers the walk, candidates and outcome
#[test]
fn test_build_text_renders_the_walk() {
	let root = users_tree();
	let request = get("/users/me");
	let (_, trace) = resolve_traced(&root, &request);

	let text = trace.build_text();
	assert!(text.contains("Trace for '/users/me'"));
	assert!(text.contains("'/users' at segment 0"));
	assert!(text.contains("'/users/me' at segment 1"));
	assert!(text.contains("skipped (Better match was already found)"));
	assert!(text.contains("Matched routes:"));
	assert!(text.contains("Resolved '/users/me'"));
}

// Test: a transparent guard shows up in the walk but not the outcome
#[test]
fn test_guard_nodes_are_traced() {
	let mut root = RouteNode::root();
	let api = root.create_child(ConstantSegmentSelector::new("api"));
	let get_node = api.create_child(MethodSelector::new(Method::GET));
	get_node.add_handler(handler());

	let request = get("/api");
	let (resolution, trace) = resolve_traced(&root, &request);

	assert!(resolution.is_success());
	let text = trace.build_text();
	assert!(text.contains("(method:GET)"));
	assert_eq!(trace.segments(), ["api"]);
}
