use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::*;
use reqwest::{
	header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION},
	Method,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
	api_responses::{AuthenticateRequest, AuthenticateResponse, AUTHENTICATION_TYPE_INTEGRATOR},
	config::{endpoint_url, Endpoints},
	errors::{AuthenticationError, Error, TransportError},
	transport::{ApiRequest, RequestBody, Transport},
};

/// Merchant account credentials. The same pair is used to obtain the bearer token and as basic auth on listing endpoints.
#[derive(Debug, Deserialize)]
pub struct Credentials {
	pub username: String,
	password: SecretString,
	#[serde(default)]
	pub merchant_id: String,
}

impl Credentials {
	pub fn new(
		username: impl Into<String>,
		password: impl Into<String>,
		merchant_id: impl Into<String>,
	) -> Self {
		Self {
			username: username.into(),
			password: SecretString::new(password.into()),
			merchant_id: merchant_id.into(),
		}
	}

	pub fn password(&self) -> &SecretString {
		&self.password
	}
}

/// An authenticated merchant session. Immutable: to use other credentials or a fresh token, build a new session.
#[derive(Debug)]
pub struct Session {
	credentials: Credentials,
	token: SecretString,
	bearer_headers: HeaderMap,
	basic_auth_headers: HeaderMap,
}

impl Session {
	/// Derives both auth header sets up front, so they can never go stale relative to the credentials or token.
	pub fn new(credentials: Credentials, token: impl Into<String>) -> Result<Self, InvalidHeaderValue> {
		let token = SecretString::new(token.into());

		let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
		bearer.set_sensitive(true);
		let mut bearer_headers = HeaderMap::new();
		bearer_headers.insert(AUTHORIZATION, bearer);
		bearer_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		let encoded = STANDARD.encode(format!(
			"{}:{}",
			credentials.username,
			credentials.password.expose_secret()
		));
		let mut basic = HeaderValue::from_str(&format!("Basic {}", encoded))?;
		basic.set_sensitive(true);
		let mut basic_auth_headers = HeaderMap::new();
		basic_auth_headers.insert(AUTHORIZATION, basic);

		Ok(Self {
			credentials,
			token,
			bearer_headers,
			basic_auth_headers,
		})
	}

	pub fn token(&self) -> &SecretString {
		&self.token
	}

	pub fn username(&self) -> &str {
		&self.credentials.username
	}

	pub fn merchant_id(&self) -> &str {
		&self.credentials.merchant_id
	}

	/// `Authorization: Bearer <token>` and `Accept: application/json`, used by catalog endpoints.
	pub fn bearer_headers(&self) -> HeaderMap {
		self.bearer_headers.clone()
	}

	/// `Authorization: Basic ...` built from the raw credentials, used by listing endpoints.
	pub fn basic_auth_headers(&self) -> HeaderMap {
		self.basic_auth_headers.clone()
	}

	/// Exchanges `credentials` for a token and builds a session from it.
	pub fn login<T: Transport>(
		transport: &T,
		endpoints: &Endpoints,
		credentials: Credentials,
	) -> Result<Self, Error> {
		let token = authenticate(transport, endpoints, &credentials)?;
		Session::new(credentials, token.expose_secret().as_str())
			.map_err(|e| AuthenticationError::InvalidToken(e).into())
	}
}

/// Host: auth endpoint
/// Endpoint: POST /api/authenticate
pub fn authenticate<T: Transport>(
	transport: &T,
	endpoints: &Endpoints,
	credentials: &Credentials,
) -> Result<SecretString, Error> {
	trace!("authenticate");
	let url = endpoint_url(&endpoints.auth, &["api", "authenticate"])?;
	let body = serde_json::to_value(AuthenticateRequest {
		username: &credentials.username,
		password: credentials.password.expose_secret(),
		authentication_type: AUTHENTICATION_TYPE_INTEGRATOR,
	})
	.map_err(|e| Error::Encoding(e.to_string()))?;

	let req = ApiRequest::new(Method::POST, url, HeaderMap::new()).body(RequestBody::Json(body));
	let resp = transport.send(req).map_err(AuthenticationError::from)?;
	if !resp.status().is_success() {
		return Err(AuthenticationError::Transport(TransportError::Status(resp.status())).into());
	}

	let body: AuthenticateResponse = resp.json::<_, AuthenticationError>()?;
	match body.id_token {
		Some(token) if !token.is_empty() => {
			debug!("authenticated as {}", credentials.username);
			Ok(SecretString::new(token))
		}
		_ => Err(AuthenticationError::MissingToken.into()),
	}
}
