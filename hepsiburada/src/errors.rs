use reqwest::{header::InvalidHeaderValue, StatusCode};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Authentication failed: {0}")]
	Authentication(#[from] AuthenticationError),
	#[error("API request failed: {0}")]
	Transport(#[from] TransportError),
	#[error("Failed to parse API response body: {0}")]
	Decoding(#[from] DecodingError),
	/// The API answered with a success status, but not `200 OK`, where the operation requires it.
	#[error("API responded with {status} instead of 200 OK")]
	Rejected { status: StatusCode },
	/// The API accepted the upload but the response did not carry a usable tracking id.
	#[error("API response did not contain a tracking id")]
	MissingTrackingId,
	#[error("Failed to encode request payload: {0}")]
	Encoding(String),
	#[error("Failed to stage product upload file: {0}")]
	Staging(#[source] std::io::Error),
	#[error("Endpoint base url cannot carry a path: {0}")]
	InvalidEndpoint(Url),
	/// Listing endpoints are scoped to a merchant; the credentials carry no merchant id.
	#[error("Credentials do not carry a merchant id, which listing endpoints require")]
	MissingMerchantId,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("Network failure: {0}")]
	NetworkFailure(#[from] reqwest::Error),
	#[error("API responded with non-success status {0}")]
	Status(StatusCode),
	#[error("I/O failure: {0}")]
	Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
	#[error("Authentication response did not contain an id_token")]
	MissingToken,
	#[error("Authentication returned a token that cannot be sent in a header: {0}")]
	InvalidToken(#[source] InvalidHeaderValue),
	#[error(transparent)]
	Transport(#[from] TransportError),
	#[error("Failed to parse authentication response: {0}")]
	Decoding(#[from] DecodingError),
}

/// A response body that was not the JSON we expected. Carries the path to the offending field.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DecodingError(#[from] serde_path_to_error::Error<serde_json::Error>);

impl DecodingError {
	/// Dotted path to the field that failed to deserialize, `.` for the document root.
	pub fn path(&self) -> String {
		self.0.path().to_string()
	}
}
