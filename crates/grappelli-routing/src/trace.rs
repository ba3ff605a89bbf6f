use crate::node::RouteNode;
use crate::resolve::{NodeMatch, Resolution};
use std::fmt::Write as _;

/// Diagnostic record of one resolution: every node visited or skipped
/// (with its starting segment index and the reason for skipping), the
/// full candidate set, and the final outcome.
///
/// A trace is only allocated when at least one trace callback is
/// registered on the context; with no observers every emit site is a
/// no-op, and the outcome of resolution is identical either way.
#[derive(Debug, Clone)]
pub struct ResolveTrace {
	path: String,
	segments: Vec<String>,
	entries: Vec<TraceEntry>,
	stack: Vec<TraceEntry>,
	candidates: Vec<TraceCandidate>,
	result: Option<TraceResult>,
}

/// One visited or skipped node in the trace tree.
#[derive(Debug, Clone)]
pub struct TraceEntry {
	/// Diagnostic path of the node, e.g. "/users/{id}"
	pub route: String,
	/// Segment index the node was evaluated at
	pub segment_index: usize,
	pub outcome: TraceOutcome,
	/// Nodes visited or skipped while inside this one
	pub children: Vec<TraceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOutcome {
	/// The subtree below produced at least one candidate
	Matched,
	/// The subtree was walked but produced nothing
	Unmatched,
	/// The node was pruned without descending
	Skipped(String),
}

/// One candidate path recorded during traversal.
#[derive(Debug, Clone)]
pub struct TraceCandidate {
	/// Diagnostic path of the terminal node
	pub route: String,
	/// Per-node qualities along the path, root to leaf
	pub qualities: Vec<f64>,
}

/// Summary of the final outcome, detached from the tree borrow.
#[derive(Debug, Clone)]
pub enum TraceResult {
	Success { route: String, quality: f64 },
	Failure { route: String, reason: String },
}

impl ResolveTrace {
	pub(crate) fn new(path: String, segments: Vec<String>) -> Self {
		Self {
			path,
			segments,
			entries: Vec::new(),
			stack: Vec::new(),
			candidates: Vec::new(),
			result: None,
		}
	}

	/// The raw path this resolution was asked about
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The decoded segments of that path
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Top-level trace entries (normally just the root node)
	pub fn entries(&self) -> &[TraceEntry] {
		&self.entries
	}

	/// Every candidate recorded during traversal, in traversal order
	pub fn candidates(&self) -> &[TraceCandidate] {
		&self.candidates
	}

	/// The final outcome; `None` while the resolution is still running
	pub fn result(&self) -> Option<&TraceResult> {
		self.result.as_ref()
	}

	pub(crate) fn begin(&mut self, node: &RouteNode, segment_index: usize) {
		self.stack.push(TraceEntry {
			route: node.to_string(),
			segment_index,
			outcome: TraceOutcome::Unmatched,
			children: Vec::new(),
		});
	}

	pub(crate) fn finish(&mut self, _node: &RouteNode, _segment_index: usize, matched: bool) {
		let Some(mut entry) = self.stack.pop() else {
			return;
		};
		entry.outcome = if matched {
			TraceOutcome::Matched
		} else {
			TraceOutcome::Unmatched
		};
		self.attach(entry);
	}

	pub(crate) fn skip(&mut self, node: &RouteNode, segment_index: usize, reason: &str) {
		let entry = TraceEntry {
			route: node.to_string(),
			segment_index,
			outcome: TraceOutcome::Skipped(reason.to_string()),
			children: Vec::new(),
		};
		self.attach(entry);
	}

	pub(crate) fn register_candidate(&mut self, path: &[NodeMatch<'_>]) {
		let Some(terminal) = path.last() else {
			return;
		};
		self.candidates.push(TraceCandidate {
			route: terminal.node.to_string(),
			qualities: path.iter().map(|m| m.quality).collect(),
		});
	}

	pub(crate) fn complete(&mut self, resolution: &Resolution<'_>) {
		self.result = Some(match resolution {
			Resolution::Success { route, quality, .. } => TraceResult::Success {
				route: route.to_string(),
				quality: *quality,
			},
			Resolution::Failure { route, reason } => TraceResult::Failure {
				route: route.to_string(),
				reason: reason.clone(),
			},
		});
	}

	fn attach(&mut self, entry: TraceEntry) {
		match self.stack.last_mut() {
			Some(parent) => parent.children.push(entry),
			None => self.entries.push(entry),
		}
	}

	/// Render the trace as an indented, human-readable report.
	///
	/// One line per visited or skipped node, followed by the candidate
	/// set and the final outcome. Intended for diagnostics output, not
	/// for machine parsing.
	pub fn build_text(&self) -> String {
		let mut text = String::new();
		let _ = writeln!(
			text,
			"Trace for '{}', segments {:?}",
			self.path, self.segments
		);
		for entry in &self.entries {
			Self::render_entry(&mut text, entry, 1);
		}
		if !self.candidates.is_empty() {
			let _ = writeln!(text, "Matched routes:");
			for candidate in &self.candidates {
				let _ = writeln!(
					text,
					"  '{}' with qualities {:?}",
					candidate.route, candidate.qualities
				);
			}
		}
		match &self.result {
			Some(TraceResult::Success { route, quality }) => {
				let _ = writeln!(text, "Resolved '{route}', quality {quality}");
			}
			Some(TraceResult::Failure { route, reason }) => {
				let _ = writeln!(text, "Failed at '{route}': {reason}");
			}
			None => {}
		}
		text
	}

	fn render_entry(text: &mut String, entry: &TraceEntry, depth: usize) {
		let indent = "  ".repeat(depth);
		let outcome = match &entry.outcome {
			TraceOutcome::Matched => "matched".to_string(),
			TraceOutcome::Unmatched => "no match".to_string(),
			TraceOutcome::Skipped(reason) => format!("skipped ({reason})"),
		};
		let _ = writeln!(
			text,
			"{indent}'{}' at segment {} -> {outcome}",
			entry.route, entry.segment_index
		);
		for child in &entry.children {
			Self::render_entry(text, child, depth + 1);
		}
	}
}
