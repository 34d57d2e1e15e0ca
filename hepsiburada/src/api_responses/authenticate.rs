use serde::{Deserialize, Serialize};

/// Marks the login as a machine integration rather than an interactive user.
pub const AUTHENTICATION_TYPE_INTEGRATOR: &str = "INTEGRATOR";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthenticateRequest<'a> {
	pub username: &'a str,
	pub password: &'a str,
	pub authentication_type: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthenticateResponse {
	#[serde(default)]
	pub id_token: Option<String>,
}
