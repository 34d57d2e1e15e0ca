mod authenticate;
mod import;

pub use authenticate::*;
pub use import::*;

use serde::{Deserialize, Serialize};

/// Identifies an asynchronous job on the remote side, either a product import or an inventory upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Treats an empty id as no id at all.
	pub(crate) fn non_empty(id: Option<String>) -> Option<Self> {
		id.filter(|id| !id.is_empty()).map(Self)
	}
}

impl AsRef<str> for TrackingId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TrackingId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<TrackingId> for String {
	fn from(id: TrackingId) -> Self {
		id.0
	}
}
