use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Error;

lazy_static! {
	static ref SANDBOX: Endpoints = Endpoints {
		auth: "https://mpop-sit.hepsiburada.com".parse::<Url>().unwrap(),
		catalog: "https://mpop-sit.hepsiburada.com".parse::<Url>().unwrap(),
		listing: "https://listing-external-sit.hepsiburada.com"
			.parse::<Url>()
			.unwrap(),
	};
	static ref PRODUCTION: Endpoints = Endpoints {
		auth: "https://mpop.hepsiburada.com".parse::<Url>().unwrap(),
		catalog: "https://mpop.hepsiburada.com".parse::<Url>().unwrap(),
		listing: "https://listing-external.hepsiburada.com"
			.parse::<Url>()
			.unwrap(),
	};
}

/// Base urls of the three API hosts a merchant integration talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Host serving `/api/authenticate`.
	pub auth: Url,
	/// Host serving `/product/api/...`.
	pub catalog: Url,
	/// Host serving `/listings/...`.
	pub listing: Url,
}

impl Endpoints {
	/// The SIT (integration test) environment.
	pub fn sandbox() -> Self {
		SANDBOX.clone()
	}

	pub fn production() -> Self {
		PRODUCTION.clone()
	}
}

impl Default for Endpoints {
	fn default() -> Self {
		Endpoints::sandbox()
	}
}

impl From<Environment> for Endpoints {
	fn from(env: Environment) -> Self {
		match env {
			Environment::Sandbox => Endpoints::sandbox(),
			Environment::Production => Endpoints::production(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	#[default]
	Sandbox,
	Production,
}

/// Appends `segments` to the path of `base`, percent-encoding each one.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, Error> {
	let mut url = base.clone();
	url.path_segments_mut()
		.map_err(|_| Error::InvalidEndpoint(base.clone()))?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}

/// Appends the parameters that are present, in the given order. Leaves the url untouched when none are.
pub(crate) fn with_query(mut url: Url, params: &[(&str, Option<u32>)]) -> Url {
	let present: Vec<(&str, u32)> = params
		.iter()
		.filter_map(|(name, value)| value.map(|v| (*name, v)))
		.collect();
	if !present.is_empty() {
		let mut pairs = url.query_pairs_mut();
		for (name, value) in present {
			pairs.append_pair(name, &value.to_string());
		}
	}
	url
}
