use log::debug;
use reqwest::{blocking::multipart::Form, header::CONTENT_TYPE};

use super::{ApiRequest, ApiResponse, RequestBody, Transport};
use crate::errors::TransportError;

const USER_AGENT: &str = concat!("hepsiburada-rs/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP transport backed by `reqwest`. Timeouts, proxies and TLS settings belong to the wrapped client.
#[derive(Debug, Clone)]
pub struct WebApiTransport {
	client: reqwest::blocking::Client,
}

impl WebApiTransport {
	pub fn new() -> Result<WebApiTransport, TransportError> {
		let client = reqwest::blocking::ClientBuilder::new()
			.user_agent(USER_AGENT)
			.build()?;
		Ok(Self::with_client(client))
	}

	pub fn with_client(client: reqwest::blocking::Client) -> WebApiTransport {
		WebApiTransport { client }
	}
}

impl Transport for WebApiTransport {
	fn send(&self, apireq: ApiRequest) -> Result<ApiResponse, TransportError> {
		debug!("HTTP Request: {} {}", apireq.method, apireq.url);
		let mut req = self
			.client
			.request(apireq.method, apireq.url)
			.headers(apireq.headers);
		req = match apireq.body {
			RequestBody::Empty => req,
			RequestBody::Json(value) => req.json(&value),
			RequestBody::Xml(document) => req.header(CONTENT_TYPE, "application/xml").body(document),
			RequestBody::File { field, path } => req.multipart(Form::new().file(field, &path)?),
		};

		let resp = req.send()?;
		debug!("Response HTTP status: {}", resp.status());

		Ok(ApiResponse::new(resp.status(), Box::new(resp)))
	}
}
