pub mod webapi;

#[cfg(test)]
pub(crate) mod mock;

use std::io::{ErrorKind, Read};
use std::path::PathBuf;

use log::trace;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

pub use webapi::WebApiTransport;

use crate::errors::{DecodingError, Error, TransportError};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Performs exactly one HTTP round trip per call. Implementations must not retry.
pub trait Transport {
	fn send(&self, req: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug)]
pub struct ApiRequest {
	pub method: Method,
	pub url: Url,
	pub headers: HeaderMap,
	pub body: RequestBody,
}

impl ApiRequest {
	pub fn new(method: Method, url: Url, headers: HeaderMap) -> Self {
		Self {
			method,
			url,
			headers,
			body: RequestBody::Empty,
		}
	}

	pub fn body(mut self, body: RequestBody) -> Self {
		self.body = body;
		self
	}
}

#[derive(Debug)]
pub enum RequestBody {
	Empty,
	Json(serde_json::Value),
	/// Raw XML document, sent as `application/xml`.
	Xml(String),
	/// A file on disk sent as a single named multipart part.
	File { field: &'static str, path: PathBuf },
}

/// A response whose body has not been read yet.
pub struct ApiResponse {
	status: StatusCode,
	body: Box<dyn Read + Send>,
}

impl ApiResponse {
	pub fn new(status: StatusCode, body: Box<dyn Read + Send>) -> Self {
		Self { status, body }
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// True when the reason phrase is exactly `OK`.
	pub fn is_ok(&self) -> bool {
		self.status.canonical_reason() == Some("OK")
	}

	/// Drains the body stream. The body can arrive in any number of chunks.
	pub fn read_body(&mut self) -> Result<Vec<u8>, TransportError> {
		let mut body = Vec::new();
		let mut buf = [0u8; READ_CHUNK_SIZE];
		loop {
			match self.body.read(&mut buf) {
				Ok(0) => break,
				Ok(n) => body.extend_from_slice(&buf[..n]),
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			}
		}
		trace!("Read {} byte response body", body.len());
		Ok(body)
	}

	/// Reads the whole body, then deserializes it.
	pub fn json<T, E>(mut self) -> Result<T, E>
	where
		T: DeserializeOwned,
		E: From<TransportError> + From<DecodingError>,
	{
		let body = self.read_body()?;
		Ok(decode_json(&body)?)
	}

	/// Like [`json`](Self::json), but traces the raw body first. Not for responses that carry secrets.
	pub(crate) fn traced_json<T: DeserializeOwned>(mut self) -> Result<T, Error> {
		let body = self.read_body()?;
		trace!("Response body: {}", String::from_utf8_lossy(&body));
		Ok(decode_json(&body)?)
	}
}

impl std::fmt::Debug for ApiResponse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiResponse")
			.field("status", &self.status)
			.finish_non_exhaustive()
	}
}

pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodingError> {
	let mut deser = serde_json::Deserializer::from_slice(bytes);
	Ok(serde_path_to_error::deserialize(&mut deser)?)
}
