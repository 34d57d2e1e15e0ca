use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::{header::HeaderMap, Method, StatusCode};
use url::Url;

use super::{ApiRequest, ApiResponse, RequestBody, Transport};
use crate::errors::TransportError;

/// Replays queued responses and records every request it is handed.
pub(crate) struct MockTransport {
	responses: RefCell<VecDeque<Reply>>,
	requests: RefCell<Vec<RecordedRequest>>,
	body_reads: Arc<AtomicUsize>,
}

enum Reply {
	Respond {
		status: StatusCode,
		chunks: Vec<Vec<u8>>,
	},
	Fail(io::ErrorKind),
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
	pub method: Method,
	pub url: Url,
	pub headers: HeaderMap,
	pub body: RecordedBody,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedBody {
	Empty,
	Json(serde_json::Value),
	Xml(String),
	File {
		field: &'static str,
		path: PathBuf,
		contents: Vec<u8>,
	},
}

impl MockTransport {
	pub fn new() -> Self {
		Self {
			responses: RefCell::new(VecDeque::new()),
			requests: RefCell::new(vec![]),
			body_reads: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Queues the authentication answer every client construction consumes first.
	pub fn authenticated(token: &str) -> Self {
		Self::new().respond(
			StatusCode::OK,
			&serde_json::json!({ "id_token": token }).to_string(),
		)
	}

	pub fn respond(self, status: StatusCode, body: &str) -> Self {
		self.respond_chunked(status, &[body.as_bytes()])
	}

	/// The body is handed out one chunk per `read`, the way a streamed response may arrive.
	pub fn respond_chunked(self, status: StatusCode, chunks: &[&[u8]]) -> Self {
		self.responses.borrow_mut().push_back(Reply::Respond {
			status,
			chunks: chunks.iter().map(|c| c.to_vec()).collect(),
		});
		self
	}

	pub fn fail(self) -> Self {
		self.responses
			.borrow_mut()
			.push_back(Reply::Fail(io::ErrorKind::ConnectionRefused));
		self
	}

	pub fn requests(&self) -> Ref<'_, Vec<RecordedRequest>> {
		self.requests.borrow()
	}

	pub fn last_request(&self) -> RecordedRequest {
		self.requests
			.borrow()
			.last()
			.cloned()
			.expect("no request was sent")
	}

	/// Number of `read` calls made against response bodies so far.
	pub fn body_reads(&self) -> usize {
		self.body_reads.load(Ordering::SeqCst)
	}
}

impl Transport for MockTransport {
	fn send(&self, req: ApiRequest) -> Result<ApiResponse, TransportError> {
		let body = match req.body {
			RequestBody::Empty => RecordedBody::Empty,
			RequestBody::Json(value) => RecordedBody::Json(value),
			RequestBody::Xml(document) => RecordedBody::Xml(document),
			RequestBody::File { field, path } => {
				let contents = std::fs::read(&path)?;
				RecordedBody::File {
					field,
					path,
					contents,
				}
			}
		};
		self.requests.borrow_mut().push(RecordedRequest {
			method: req.method,
			url: req.url,
			headers: req.headers,
			body,
		});

		match self
			.responses
			.borrow_mut()
			.pop_front()
			.expect("mock transport ran out of responses")
		{
			Reply::Respond { status, chunks } => Ok(ApiResponse::new(
				status,
				Box::new(ChunkedBody::new(chunks, self.body_reads.clone())),
			)),
			Reply::Fail(kind) => Err(io::Error::new(kind, "simulated network failure").into()),
		}
	}
}

/// A body stream that hands out at most one chunk per `read`.
pub(crate) struct ChunkedBody {
	chunks: VecDeque<Vec<u8>>,
	reads: Arc<AtomicUsize>,
}

impl ChunkedBody {
	pub fn new(chunks: Vec<Vec<u8>>, reads: Arc<AtomicUsize>) -> Self {
		Self {
			chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
			reads,
		}
	}
}

impl Read for ChunkedBody {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		let chunk = match self.chunks.front_mut() {
			Some(chunk) => chunk,
			None => return Ok(0),
		};
		let n = chunk.len().min(buf.len());
		buf[..n].copy_from_slice(&chunk[..n]);
		chunk.drain(..n);
		if chunk.is_empty() {
			self.chunks.pop_front();
		}
		Ok(n)
	}
}
