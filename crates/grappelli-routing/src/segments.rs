use grappelli_core::{Error, Result};
use percent_encoding::percent_decode_str;

/// Split a raw request path into decoded segments.
///
/// Runs between `/` delimiters are percent-decoded and collected in
/// order; empty runs (consecutive slashes) are dropped. A trailing slash
/// contributes one trailing empty-string segment, so a route tree can
/// distinguish `/foo` from `/foo/` by segment count.
///
/// # Errors
///
/// Returns [`Error::PathDecode`] when a segment's percent-encoded bytes
/// do not form valid UTF-8. This is a client input error, raised before
/// any route tree is walked.
///
/// # Examples
///
/// ```
/// use grappelli_routing::parse_path_segments;
///
/// assert_eq!(parse_path_segments("/").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_path_segments("/a/b").unwrap(), ["a", "b"]);
/// assert_eq!(parse_path_segments("/a/").unwrap(), ["a", ""]);
/// assert_eq!(parse_path_segments("/caf%C3%A9").unwrap(), ["café"]);
/// ```
pub fn parse_path_segments(path: &str) -> Result<Vec<String>> {
	if path.is_empty() || path == "/" {
		return Ok(Vec::new());
	}

	let mut segments = Vec::new();
	for run in path.split('/') {
		if run.is_empty() {
			continue;
		}
		let decoded = percent_decode_str(run)
			.decode_utf8()
			.map_err(|source| Error::PathDecode {
				path: path.to_string(),
				source,
			})?;
		segments.push(decoded.into_owned());
	}

	if path.ends_with('/') {
		segments.push(String::new());
	}

	Ok(segments)
}
