use crate::params::PathParams;
use bytes::Bytes;
use grappelli_core::Result;
use hyper::{HeaderMap, Method, Uri, Version};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// HTTP request representation.
///
/// The resolution engine reads `path()` once per resolution; method and
/// header access exists for guard selectors. `path_params` starts empty
/// and is filled in by whoever dispatches a successful resolution.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub query_params: HashMap<String, String>,
	pub path_params: PathParams,
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/api/users")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/api/users");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// The raw request path, before segment splitting
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// First header value under `name`, as UTF-8, if present and valid
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Get URL-decoded query parameters
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/search?q=jazz%20manouche")
	///     .build()
	///     .unwrap();
	///
	/// let decoded = request.decoded_query_params();
	/// assert_eq!(decoded.get("q"), Some(&"jazz manouche".to_string()));
	/// ```
	pub fn decoded_query_params(&self) -> HashMap<String, String> {
		self.query_params
			.iter()
			.map(|(k, v)| {
				let decoded_key = percent_decode_str(k).decode_utf8_lossy().to_string();
				let decoded_value = percent_decode_str(v).decode_utf8_lossy().to_string();
				(decoded_key, decoded_value)
			})
			.collect()
	}

	/// Replace the captured path parameters (used after route resolution)
	pub fn set_path_params(&mut self, params: PathParams) {
		self.path_params = params;
	}

	/// Parse query parameters from a URI
	fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter_map(|pair| {
						// Split on first '=' only to preserve '=' in values
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = version;
		self
	}

	/// Add a header; invalid names or values are silently dropped
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/feed")
	///     .header("accept", "application/json")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.header("accept"), Some("application/json"));
	/// ```
	pub fn header(mut self, name: &str, value: &str) -> Self {
		if let Ok(name) = hyper::header::HeaderName::try_from(name)
			&& let Ok(value) = hyper::header::HeaderValue::try_from(value)
		{
			self.headers.append(name, value);
		}
		self
	}

	pub fn body(mut self, body: Bytes) -> Self {
		self.body = body;
		self
	}

	/// Build the request
	///
	/// # Errors
	///
	/// Returns `Error::InvalidUri` when the URI string does not parse.
	pub fn build(self) -> Result<Request> {
		let uri: Uri = self.uri.unwrap_or_else(|| "/".to_string()).parse()?;
		let query_params = Request::parse_query_params(&uri);
		Ok(Request {
			method: self.method.unwrap_or(Method::GET),
			uri,
			version: self.version,
			headers: self.headers,
			body: self.body,
			query_params,
			path_params: PathParams::new(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults() {
		let request = Request::builder().build().unwrap();
		assert_eq!(request.method, Method::GET);
		assert_eq!(request.path(), "/");
		assert!(request.path_params.is_empty());
	}

	#[test]
	fn test_invalid_uri_is_rejected() {
		let result = Request::builder().uri("http://[broken").build();
		assert!(result.is_err());
	}

	#[test]
	fn test_query_params_split_on_first_equals() {
		let request = Request::builder()
			.uri("/callback?token=a=b&plain=1")
			.build()
			.unwrap();
		assert_eq!(request.query_params.get("token"), Some(&"a=b".to_string()));
		assert_eq!(request.query_params.get("plain"), Some(&"1".to_string()));
	}
}
