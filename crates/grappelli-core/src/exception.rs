use hyper::StatusCode;
use thiserror::Error;

/// Errors produced at the request boundary.
///
/// Resolution *failure* (no route matched) is not an error — it is a
/// normal value returned by the resolution engine. The variants here are
/// reserved for conditions the transport layer must turn into an error
/// response of its own: malformed client input and programming mistakes.
#[derive(Debug, Error)]
pub enum Error {
	/// The request path contained percent-encoded bytes that do not form
	/// valid UTF-8. Raised before any route tree is walked.
	#[error("Failed to decode request path '{path}': {source}")]
	PathDecode {
		path: String,
		source: std::str::Utf8Error,
	},

	/// The request URI could not be parsed
	#[error("Invalid URI: {0}")]
	InvalidUri(#[from] hyper::http::uri::InvalidUri),

	/// No resource exists for the request
	#[error("Not found: {0}")]
	NotFound(String),

	/// Unexpected internal condition
	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// The HTTP status the transport layer should answer with.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_core::Error;
	/// use hyper::StatusCode;
	///
	/// let err = Error::NotFound("no route for /missing".to_string());
	/// assert_eq!(err.status(), StatusCode::NOT_FOUND);
	/// ```
	pub fn status(&self) -> StatusCode {
		match self {
			Error::PathDecode { .. } | Error::InvalidUri(_) => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

/// Result type for grappelli operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_errors_map_to_bad_request() {
		let raw = percent_decode_failure();
		assert_eq!(raw.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn test_error_message_carries_offending_path() {
		let err = percent_decode_failure();
		let text = err.to_string();
		assert!(text.contains("/caf%FF"));
	}

	fn percent_decode_failure() -> Error {
		// Invalid UTF-8 after percent decoding: a lone 0xFF byte.
		let source = std::str::from_utf8(&[0xFF]).unwrap_err();
		Error::PathDecode {
			path: "/caf%FF".to_string(),
			source,
		}
	}
}
