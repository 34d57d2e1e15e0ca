//! Client for the Hepsiburada merchant integration API.
//!
//! A [`HepsiburadaClient`] authenticates once on construction and then issues exactly one
//! request per operation. Catalog operations (categories, product imports) use the bearer token;
//! listing operations use basic auth with the raw credentials.
//!
//! Every operation returns a typed [`Result`]. For code written against the older lenient
//! contract, where failures turn into `false` or `None`, see [`HepsiburadaClient::lenient`].

use log::*;
use reqwest::Method;
use url::Url;

pub use api_responses::TrackingId;
pub use config::{Endpoints, Environment};
pub use errors::{AuthenticationError, DecodingError, Error, TransportError};
pub use inventory::Listing;
pub use lenient::Lenient;
pub use session::{authenticate, Credentials, Session};
pub use transport::{ApiRequest, ApiResponse, RequestBody, Transport, WebApiTransport};

#[macro_use]
extern crate lazy_static;
#[cfg(test)]
#[macro_use]
extern crate maplit;

mod api_responses;
mod catalog;
mod config;
mod errors;
mod inventory;
mod lenient;
mod listings;
mod session;
pub mod transport;

#[derive(Debug)]
pub struct HepsiburadaClient<T: Transport = WebApiTransport> {
	transport: T,
	endpoints: Endpoints,
	session: Session,
}

impl HepsiburadaClient<WebApiTransport> {
	/// Authenticates over HTTPS. Fails if the token exchange fails; no client is built in that case.
	pub fn login(credentials: Credentials, endpoints: Endpoints) -> Result<Self, Error> {
		Self::login_with_transport(WebApiTransport::new()?, credentials, endpoints)
	}
}

impl<T: Transport> HepsiburadaClient<T> {
	pub fn login_with_transport(
		transport: T,
		credentials: Credentials,
		endpoints: Endpoints,
	) -> Result<Self, Error> {
		let session = Session::login(&transport, &endpoints, credentials)?;
		Ok(Self::from_session(transport, session, endpoints))
	}

	/// Reuses an already authenticated session. No request is made.
	pub fn from_session(transport: T, session: Session, endpoints: Endpoints) -> Self {
		Self {
			transport,
			endpoints,
			session,
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// A view that reports failures as `false`/`None` instead of errors.
	pub fn lenient(&self) -> Lenient<'_, T> {
		Lenient::new(self)
	}

	/// Sends one request. Any non-2xx answer is an error.
	pub(crate) fn execute(&self, req: ApiRequest) -> Result<ApiResponse, Error> {
		let method = req.method.clone();
		let url = req.url.clone();
		let resp = self.transport.send(req)?;
		if !resp.status().is_success() {
			debug!("{} {} failed with status {}", method, url, resp.status());
			return Err(TransportError::Status(resp.status()).into());
		}
		Ok(resp)
	}

	/// Like `execute`, but anything other than `200 OK` is a rejection.
	pub(crate) fn execute_expecting_ok(&self, req: ApiRequest) -> Result<ApiResponse, Error> {
		let resp = self.execute(req)?;
		if !resp.is_ok() {
			return Err(Error::Rejected {
				status: resp.status(),
			});
		}
		Ok(resp)
	}

	pub(crate) fn catalog_request(&self, method: Method, url: Url) -> ApiRequest {
		ApiRequest::new(method, url, self.session.bearer_headers())
	}

	pub(crate) fn listing_request(&self, method: Method, url: Url) -> ApiRequest {
		ApiRequest::new(method, url, self.session.basic_auth_headers())
	}

	pub(crate) fn catalog_url(&self, segments: &[&str]) -> Result<Url, Error> {
		config::endpoint_url(&self.endpoints.catalog, segments)
	}

	/// Prefixes `segments` with `listings/merchantid/{merchantId}`.
	pub(crate) fn listing_url(&self, segments: &[&str]) -> Result<Url, Error> {
		let merchant_id = self.session.merchant_id();
		if merchant_id.is_empty() {
			return Err(Error::MissingMerchantId);
		}
		let mut path = vec!["listings", "merchantid", merchant_id];
		path.extend_from_slice(segments);
		config::endpoint_url(&self.endpoints.listing, &path)
	}
}
