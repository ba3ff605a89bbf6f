use crate::resolve::ResolveContext;
use grappelli_http::PathParams;
use hyper::Method;
use std::fmt;

/// Quality of a pass-through selector; excluded from specificity
/// comparison entirely.
pub const QUALITY_TRANSPARENT: f64 = -1.0;
/// Quality of a selector that succeeded without consuming a segment
/// (an optional part that is absent).
pub const QUALITY_MISSING: f64 = 0.2;
/// Quality of a wildcard segment match.
pub const QUALITY_WILDCARD: f64 = 0.5;
/// Quality of a captured parameter segment match.
pub const QUALITY_PARAMETER: f64 = 0.8;
/// Quality of an exact segment match. The range above
/// [`QUALITY_TRANSPARENT`] outside these reserved values is open for
/// matcher-specific gradation.
pub const QUALITY_CONSTANT: f64 = 1.0;

/// Outcome of asking a selector "does this path position match, and how
/// well?".
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
	/// The selector rejected this position; the subtree is pruned.
	Failed,
	/// The selector matched.
	Success {
		/// Relative specificity on the quality scale above; higher wins.
		quality: f64,
		/// Parameters captured at this position.
		params: PathParams,
		/// How many segments this match consumed.
		segment_increment: usize,
	},
}

impl Evaluation {
	/// A success without captures
	pub fn success(quality: f64, segment_increment: usize) -> Self {
		Evaluation::Success {
			quality,
			params: PathParams::new(),
			segment_increment,
		}
	}

	/// A success capturing a single parameter
	pub fn success_with_param(
		quality: f64,
		name: impl Into<String>,
		value: impl Into<String>,
		segment_increment: usize,
	) -> Self {
		let mut params = PathParams::new();
		params.append(name, value);
		Evaluation::Success {
			quality,
			params,
			segment_increment,
		}
	}

	pub fn succeeded(&self) -> bool {
		matches!(self, Evaluation::Success { .. })
	}
}

/// A matcher attached to a route node.
///
/// The resolution engine knows nothing about what kind of selector a
/// node carries — literal segment, parameter capture, wildcard, method
/// guard — it only consumes the [`Evaluation`]. Implementing this trait
/// is the extension point for new matching strategies; the algorithm
/// itself never changes.
///
/// The `Display` rendering is used to build the diagnostic path of a
/// route (`/users/{id}`), so it should produce the selector's path-DSL
/// form.
pub trait RouteSelector: fmt::Debug + fmt::Display + Send + Sync {
	/// Evaluate this selector against the context at `segment_index`.
	///
	/// A success must never report a `segment_increment` that would
	/// advance past the end of the segment sequence; selectors reject
	/// such positions instead.
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation;
}

/// Matches the start of the path. Succeeds only at segment index 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootSelector;

impl RouteSelector for RootSelector {
	fn evaluate(&self, _context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		if segment_index == 0 {
			Evaluation::success(QUALITY_CONSTANT, 0)
		} else {
			Evaluation::Failed
		}
	}
}

impl fmt::Display for RootSelector {
	fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Renders as nothing so child paths read "/users", not "//users"
		Ok(())
	}
}

/// Matches one segment by exact string equality.
#[derive(Debug, Clone)]
pub struct ConstantSegmentSelector {
	value: String,
}

impl ConstantSegmentSelector {
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::ConstantSegmentSelector;
	///
	/// let selector = ConstantSegmentSelector::new("users");
	/// assert_eq!(selector.to_string(), "users");
	/// ```
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
		}
	}
}

impl RouteSelector for ConstantSegmentSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		match context.segments().get(segment_index) {
			Some(segment) if *segment == self.value => {
				Evaluation::success(QUALITY_CONSTANT, 1)
			}
			_ => Evaluation::Failed,
		}
	}
}

impl fmt::Display for ConstantSegmentSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.value)
	}
}

/// Captures one segment under a parameter name, optionally requiring a
/// literal prefix and/or suffix around the captured part.
#[derive(Debug, Clone)]
pub struct ParamSegmentSelector {
	name: String,
	prefix: Option<String>,
	suffix: Option<String>,
}

impl ParamSegmentSelector {
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::ParamSegmentSelector;
	///
	/// let selector = ParamSegmentSelector::new("id");
	/// assert_eq!(selector.to_string(), "{id}");
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			prefix: None,
			suffix: None,
		}
	}

	/// Require a literal prefix before the captured part
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::ParamSegmentSelector;
	///
	/// let selector = ParamSegmentSelector::new("name").with_prefix("file-");
	/// assert_eq!(selector.to_string(), "file-{name}");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Require a literal suffix after the captured part
	pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.suffix = Some(suffix.into());
		self
	}
}

impl RouteSelector for ParamSegmentSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		let Some(segment) = context.segments().get(segment_index) else {
			return Evaluation::Failed;
		};
		let mut value = segment.as_str();
		if let Some(prefix) = &self.prefix {
			match value.strip_prefix(prefix.as_str()) {
				Some(rest) => value = rest,
				None => return Evaluation::Failed,
			}
		}
		if let Some(suffix) = &self.suffix {
			match value.strip_suffix(suffix.as_str()) {
				Some(rest) => value = rest,
				None => return Evaluation::Failed,
			}
		}
		// An empty capture would make "/file-.txt" match "file-{name}.txt";
		// captures are always non-empty.
		if value.is_empty() {
			return Evaluation::Failed;
		}
		Evaluation::success_with_param(QUALITY_PARAMETER, self.name.as_str(), value, 1)
	}
}

impl fmt::Display for ParamSegmentSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}{{{}}}{}",
			self.prefix.as_deref().unwrap_or(""),
			self.name,
			self.suffix.as_deref().unwrap_or("")
		)
	}
}

/// Captures one segment when present; succeeds without consuming
/// anything when the path has ended.
#[derive(Debug, Clone)]
pub struct OptionalParamSegmentSelector {
	name: String,
}

impl OptionalParamSegmentSelector {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl RouteSelector for OptionalParamSegmentSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		match context.segments().get(segment_index) {
			Some(segment) if !segment.is_empty() => Evaluation::success_with_param(
				QUALITY_PARAMETER,
				self.name.as_str(),
				segment.as_str(),
				1,
			),
			_ => Evaluation::success(QUALITY_MISSING, 0),
		}
	}
}

impl fmt::Display for OptionalParamSegmentSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{{}?}}", self.name)
	}
}

/// Matches any single non-empty segment without capturing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WildcardSegmentSelector;

impl RouteSelector for WildcardSegmentSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		match context.segments().get(segment_index) {
			Some(segment) if !segment.is_empty() => {
				Evaluation::success(QUALITY_WILDCARD, 1)
			}
			_ => Evaluation::Failed,
		}
	}
}

impl fmt::Display for WildcardSegmentSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("*")
	}
}

/// Consumes every remaining segment, capturing the non-empty ones in
/// order when a name is given.
#[derive(Debug, Clone)]
pub struct TailcardSelector {
	name: Option<String>,
}

impl TailcardSelector {
	/// A tailcard capturing nothing
	pub fn new() -> Self {
		Self { name: None }
	}

	/// A tailcard capturing each consumed segment under `name`
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::TailcardSelector;
	///
	/// let selector = TailcardSelector::named("path");
	/// assert_eq!(selector.to_string(), "{path...}");
	/// ```
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
		}
	}
}

impl Default for TailcardSelector {
	fn default() -> Self {
		Self::new()
	}
}

impl RouteSelector for TailcardSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		let segments = context.segments();
		let start = segment_index.min(segments.len());
		let rest = &segments[start..];
		let quality = if rest.is_empty() {
			QUALITY_MISSING
		} else {
			QUALITY_WILDCARD
		};
		let mut params = PathParams::new();
		if let Some(name) = &self.name {
			for segment in rest.iter().filter(|s| !s.is_empty()) {
				params.append(name.clone(), segment.clone());
			}
		}
		Evaluation::Success {
			quality,
			params,
			segment_increment: rest.len(),
		}
	}
}

impl fmt::Display for TailcardSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.name {
			Some(name) => write!(f, "{{{name}...}}"),
			None => f.write_str("{...}"),
		}
	}
}

/// Pass-through guard on the request method. Transparent quality:
/// never counts toward specificity comparison.
#[derive(Debug, Clone)]
pub struct MethodSelector {
	method: Method,
}

impl MethodSelector {
	/// # Examples
	///
	/// ```
	/// use grappelli_routing::MethodSelector;
	/// use hyper::Method;
	///
	/// let selector = MethodSelector::new(Method::GET);
	/// assert_eq!(selector.to_string(), "(method:GET)");
	/// ```
	pub fn new(method: Method) -> Self {
		Self { method }
	}
}

impl RouteSelector for MethodSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, _segment_index: usize) -> Evaluation {
		if context.request().method == self.method {
			Evaluation::success(QUALITY_TRANSPARENT, 0)
		} else {
			Evaluation::Failed
		}
	}
}

impl fmt::Display for MethodSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(method:{})", self.method)
	}
}

/// Pass-through guard requiring an exact header value.
#[derive(Debug, Clone)]
pub struct HeaderSelector {
	name: String,
	value: String,
}

impl HeaderSelector {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

impl RouteSelector for HeaderSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, _segment_index: usize) -> Evaluation {
		match context.request().header(&self.name) {
			Some(value) if value == self.value => {
				Evaluation::success(QUALITY_TRANSPARENT, 0)
			}
			_ => Evaluation::Failed,
		}
	}
}

impl fmt::Display for HeaderSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(header:{} = {})", self.name, self.value)
	}
}

/// Matches the trailing empty segment produced by a trailing slash.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSlashSelector;

impl RouteSelector for TrailingSlashSelector {
	fn evaluate(&self, context: &ResolveContext<'_>, segment_index: usize) -> Evaluation {
		match context.segments().get(segment_index) {
			Some(segment) if segment.is_empty() => Evaluation::success(QUALITY_CONSTANT, 1),
			_ => Evaluation::Failed,
		}
	}
}

impl fmt::Display for TrailingSlashSelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("<slash>")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_quality_scale_ordering() {
		assert!(QUALITY_TRANSPARENT < QUALITY_MISSING);
		assert!(QUALITY_MISSING < QUALITY_WILDCARD);
		assert!(QUALITY_WILDCARD < QUALITY_PARAMETER);
		assert!(QUALITY_PARAMETER < QUALITY_CONSTANT);
	}

	#[test]
	fn test_evaluation_helpers() {
		let success = Evaluation::success_with_param(QUALITY_PARAMETER, "id", "42", 1);
		assert!(success.succeeded());
		match success {
			Evaluation::Success { params, segment_increment, .. } => {
				assert_eq!(params.get("id"), Some("42"));
				assert_eq!(segment_increment, 1);
			}
			Evaluation::Failed => panic!("Expected success"),
		}
		assert!(!Evaluation::Failed.succeeded());
	}

	#[test]
	fn test_selector_rendering() {
		assert_eq!(RootSelector.to_string(), "");
		assert_eq!(ConstantSegmentSelector::new("users").to_string(), "users");
		assert_eq!(
			ParamSegmentSelector::new("name")
				.with_prefix("file-")
				.with_suffix(".txt")
				.to_string(),
			"file-{name}.txt"
		);
		assert_eq!(
			OptionalParamSegmentSelector::new("page").to_string(),
			"{page?}"
		);
		assert_eq!(WildcardSegmentSelector.to_string(), "*");
		assert_eq!(TailcardSelector::named("rest").to_string(), "{rest...}");
		assert_eq!(TrailingSlashSelector.to_string(), "<slash>");
	}
}
