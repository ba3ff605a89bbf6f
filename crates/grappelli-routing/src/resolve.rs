use crate::node::RouteNode;
use crate::segments::parse_path_segments;
use crate::selector::{Evaluation, QUALITY_CONSTANT, QUALITY_TRANSPARENT};
use crate::trace::ResolveTrace;
use grappelli_core::Result;
use grappelli_http::{PathParams, Request};
use std::cmp::Ordering;
use tracing::debug;

const REASON_ROOT: &str = "rootPath didn't match";
const REASON_UNCONSUMED: &str = "Not all segments matched";
const REASON_SELECTOR: &str = "Selector didn't match";
const REASON_OUTRANKED: &str = "Better match was already found";
const REASON_NO_CANDIDATES: &str = "No matched subtrees found";

/// Observer invoked once per resolution with the finished trace record.
///
/// Callbacks run synchronously on the resolving thread, after the
/// outcome is finalized; they must be fast and non-blocking.
pub type TraceCallback = Box<dyn Fn(&ResolveTrace) + Send + Sync>;

/// One node's successful evaluation on a candidate path.
#[derive(Debug, Clone)]
pub struct NodeMatch<'a> {
	pub node: &'a RouteNode,
	pub quality: f64,
	pub params: PathParams,
	pub segment_increment: usize,
}

/// Outcome of a resolution.
///
/// Failure to match is an expected, common result and is modeled as
/// data, never as an error. The captured parameters only exist on the
/// `Success` variant; misusing a failed resolution as a match is
/// unrepresentable.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
	Success {
		/// The winning terminal node
		route: &'a RouteNode,
		/// Captures merged along the winning path, root to leaf
		params: PathParams,
		/// Minimum non-transparent quality along the winning path
		quality: f64,
	},
	Failure {
		/// The nearest node reached before resolution gave up
		route: &'a RouteNode,
		reason: String,
	},
}

impl<'a> Resolution<'a> {
	/// The resolved node on success, the nearest node reached on failure
	pub fn route(&self) -> &'a RouteNode {
		match self {
			Resolution::Success { route, .. } | Resolution::Failure { route, .. } => route,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Resolution::Success { .. })
	}
}

/// Orchestrates one resolution: parses the path once, walks the tree,
/// collects every structurally valid candidate path, and picks the best
/// one.
///
/// The context borrows the tree and the request; all working state is
/// local to one [`resolve`](ResolveContext::resolve) call, so any number
/// of resolutions may run concurrently over the same frozen tree.
pub struct ResolveContext<'a> {
	root: &'a RouteNode,
	request: &'a Request,
	segments: Vec<String>,
	tracers: Vec<TraceCallback>,
}

impl<'a> std::fmt::Debug for ResolveContext<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolveContext")
			.field("root", &self.root)
			.field("request", &self.request)
			.field("segments", &self.segments)
			.field("tracers", &self.tracers.len())
			.finish()
	}
}

impl<'a> ResolveContext<'a> {
	/// Build a context for one resolution.
	///
	/// The request path is parsed into segments here, once.
	///
	/// # Errors
	///
	/// Returns [`grappelli_core::Error::PathDecode`] when the path
	/// contains malformed percent-encoding — a client input error,
	/// surfaced before any tree walk starts.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use grappelli_routing::{ResolveContext, RouteNode};
	///
	/// let root = RouteNode::root();
	/// let request = Request::builder().uri("/users/42").build().unwrap();
	/// let context = ResolveContext::new(&root, &request, Vec::new()).unwrap();
	/// assert_eq!(context.segments(), ["users", "42"]);
	/// ```
	pub fn new(
		root: &'a RouteNode,
		request: &'a Request,
		tracers: Vec<TraceCallback>,
	) -> Result<Self> {
		let segments = parse_path_segments(request.path())?;
		Ok(Self {
			root,
			request,
			segments,
			tracers,
		})
	}

	/// The decoded segment sequence of the request path
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// The request being resolved
	pub fn request(&self) -> &Request {
		self.request
	}

	/// Resolve the request path against the tree.
	///
	/// Pure and deterministic: repeated calls over the same tree and
	/// request return the same outcome. Registered trace callbacks are
	/// invoked once, synchronously, after the outcome is finalized.
	pub fn resolve(&self) -> Resolution<'a> {
		let mut trace = (!self.tracers.is_empty()).then(|| {
			ResolveTrace::new(self.request.path().to_string(), self.segments.clone())
		});

		let resolution = self.resolve_with(&mut trace);

		match &resolution {
			Resolution::Success { route, quality, .. } => {
				debug!(route = %route, quality, "route resolved");
			}
			Resolution::Failure { route, reason } => {
				debug!(nearest = %route, reason = %reason, "route resolution failed");
			}
		}

		if let Some(trace) = &mut trace {
			trace.complete(&resolution);
		}
		if let Some(trace) = &trace {
			for tracer in &self.tracers {
				tracer(trace);
			}
		}
		resolution
	}

	fn resolve_with(&self, trace: &mut Option<ResolveTrace>) -> Resolution<'a> {
		let root_eval = self.root.selector().evaluate(self, 0);
		let Evaluation::Success {
			quality,
			params,
			segment_increment,
		} = root_eval
		else {
			if let Some(trace) = trace {
				trace.skip(self.root, 0, REASON_ROOT);
			}
			return Resolution::Failure {
				route: self.root,
				reason: REASON_ROOT.to_string(),
			};
		};

		let mut candidates: Vec<Vec<NodeMatch<'a>>> = Vec::new();
		let mut prefix = vec![NodeMatch {
			node: self.root,
			quality,
			params,
			segment_increment,
		}];

		if let Some(trace) = trace {
			trace.begin(self.root, 0);
		}
		let matched =
			self.resolve_step(self.root, &mut prefix, &mut candidates, trace, segment_increment);
		if let Some(trace) = trace {
			trace.finish(self.root, 0, matched);
		}

		match self.find_best_route(&candidates) {
			Some(resolution) => resolution,
			None => Resolution::Failure {
				route: self.root,
				reason: REASON_NO_CANDIDATES.to_string(),
			},
		}
	}

	/// Depth-first descent from `node`, whose own match already sits at
	/// the end of `prefix` and consumed segments up to `segment_index`.
	/// Returns whether this subtree produced at least one candidate.
	fn resolve_step(
		&self,
		node: &'a RouteNode,
		prefix: &mut Vec<NodeMatch<'a>>,
		candidates: &mut Vec<Vec<NodeMatch<'a>>>,
		trace: &mut Option<ResolveTrace>,
		segment_index: usize,
	) -> bool {
		let total = self.segments.len();

		if node.children().is_empty() && segment_index < total {
			// Dead subtree: nothing below can consume the rest
			if let Some(trace) = trace {
				trace.skip(node, segment_index, REASON_UNCONSUMED);
			}
			return false;
		}

		let mut matched = false;
		if !node.handlers().is_empty() && segment_index == total {
			candidates.push(prefix.clone());
			if let Some(trace) = trace {
				trace.register_candidate(prefix);
			}
			matched = true;
		}

		// Quality of the first successful sibling at this level. Later
		// siblings with strictly lower quality are pruned without
		// descending; the threshold is NOT updated afterwards, so a
		// low-quality first success does not shield later high-quality
		// siblings from being tried.
		let mut first_success_quality: Option<f64> = None;

		for child in node.children() {
			match child.selector().evaluate(self, segment_index) {
				Evaluation::Failed => {
					if let Some(trace) = trace {
						trace.skip(child, segment_index, REASON_SELECTOR);
					}
				}
				Evaluation::Success {
					quality,
					params,
					segment_increment,
				} => {
					if let Some(best) = first_success_quality
						&& quality < best
					{
						if let Some(trace) = trace {
							trace.skip(child, segment_index, REASON_OUTRANKED);
						}
						continue;
					}

					if let Some(trace) = trace {
						trace.begin(child, segment_index);
					}
					prefix.push(NodeMatch {
						node: child,
						quality,
						params,
						segment_increment,
					});
					let subtree_matched = self.resolve_step(
						child,
						prefix,
						candidates,
						trace,
						segment_index + segment_increment,
					);
					prefix.pop();
					if let Some(trace) = trace {
						trace.finish(child, segment_index, subtree_matched);
					}

					if subtree_matched {
						matched = true;
						if first_success_quality.is_none() {
							first_success_quality = Some(quality);
						}
					}
				}
			}
		}

		matched
	}

	/// Rank candidates and assemble the winner. Returns `None` when the
	/// candidate set is empty.
	fn find_best_route(&self, candidates: &[Vec<NodeMatch<'a>>]) -> Option<Resolution<'a>> {
		let mut best = candidates.first()?;
		for candidate in &candidates[1..] {
			// Strict comparison keeps the selection stable: ties resolve
			// to traversal (registration) order.
			if compare_paths(candidate, best) == Ordering::Greater {
				best = candidate;
			}
		}

		let terminal = best.last()?.node;
		let mut params = PathParams::new();
		for node_match in best {
			params.extend(&node_match.params);
		}
		let quality = best
			.iter()
			.map(|node_match| node_match.quality)
			.filter(|quality| *quality != QUALITY_TRANSPARENT)
			.fold(f64::INFINITY, f64::min);
		let quality = if quality.is_finite() {
			quality
		} else {
			QUALITY_CONSTANT
		};

		Some(Resolution::Success {
			route: terminal,
			params,
			quality,
		})
	}
}

/// Compare two candidate paths position by position, left to right.
///
/// Transparent elements are skipped on whichever side carries them. At
/// the first pair of non-transparent elements with different qualities
/// the higher quality wins; with equal qualities both cursors advance.
/// A path that outlives the other wins on length (the deeper, equally
/// good match is the more specific one).
fn compare_paths(a: &[NodeMatch<'_>], b: &[NodeMatch<'_>]) -> Ordering {
	let mut i = 0;
	let mut j = 0;
	loop {
		while i < a.len() && a[i].quality == QUALITY_TRANSPARENT {
			i += 1;
		}
		while j < b.len() && b[j].quality == QUALITY_TRANSPARENT {
			j += 1;
		}
		match (i < a.len(), j < b.len()) {
			(false, false) => return Ordering::Equal,
			(true, false) => return Ordering::Greater,
			(false, true) => return Ordering::Less,
			(true, true) => match a[i].quality.total_cmp(&b[j].quality) {
				Ordering::Equal => {
					i += 1;
					j += 1;
				}
				decided => return decided,
			},
		}
	}
}
