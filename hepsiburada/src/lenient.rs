use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::{
	api_responses::TrackingId, errors::Error, inventory::Listing, transport::Transport,
	HepsiburadaClient,
};

/// The older contract of this API surface: state-changing calls report `false` or `None` on any
/// failure, while plain fetches still return errors.
///
/// A `false`/`None` does not say whether the remote side refused the call or the network failed.
/// Use the methods on [`HepsiburadaClient`] directly when that matters.
pub struct Lenient<'a, T: Transport> {
	client: &'a HepsiburadaClient<T>,
}

impl<'a, T: Transport> Lenient<'a, T> {
	pub(crate) fn new(client: &'a HepsiburadaClient<T>) -> Self {
		Self { client }
	}

	pub fn fetch_categories(&self, page: Option<u32>, size: Option<u32>) -> Result<Value, Error> {
		self.client.fetch_categories(page, size)
	}

	pub fn submit_products(&self, products_json: &str) -> Option<TrackingId> {
		swallow("submit_products", self.client.submit_products(products_json))
	}

	pub fn submit_products_from_records<R: Serialize>(&self, records: &[R]) -> Option<TrackingId> {
		swallow(
			"submit_products_from_records",
			self.client.submit_products_from_records(records),
		)
	}

	pub fn import_status(&self, tracking_id: impl AsRef<str>) -> Option<Value> {
		swallow("import_status", self.client.import_status(tracking_id))
	}

	pub fn fetch_listings(&self, offset: Option<u32>, limit: Option<u32>) -> Result<Value, Error> {
		self.client.fetch_listings(offset, limit)
	}

	pub fn activate_listing(&self, sku: &str) -> bool {
		swallow("activate_listing", self.client.activate_listing(sku)).is_some()
	}

	pub fn deactivate_listing(&self, sku: &str) -> bool {
		swallow("deactivate_listing", self.client.deactivate_listing(sku)).is_some()
	}

	pub fn delete_listing(&self, sku: &str, merchant_sku: &str) -> bool {
		swallow(
			"delete_listing",
			self.client.delete_listing(sku, merchant_sku),
		)
		.is_some()
	}

	pub fn create_or_update_listing(&self, listing: &Listing) -> Option<TrackingId> {
		swallow(
			"create_or_update_listing",
			self.client.create_or_update_listing(listing),
		)
	}

	pub fn listing_update_status(&self, tracking_id: impl AsRef<str>) -> Result<Value, Error> {
		self.client.listing_update_status(tracking_id)
	}
}

fn swallow<V>(operation: &str, result: Result<V, Error>) -> Option<V> {
	match result {
		Ok(v) => Some(v),
		Err(e) => {
			warn!("{} failed: {}", operation, e);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::{
		errors::Error,
		inventory::Listing,
		tests::client,
		transport::mock::MockTransport,
	};
	use reqwest::StatusCode;

	#[test]
	fn test_toggles_report_false_on_network_failure() {
		let client = client(MockTransport::new().fail().fail().fail());
		let lenient = client.lenient();

		assert!(!lenient.activate_listing("HBV00000ABCDE"));
		assert!(!lenient.deactivate_listing("HBV00000ABCDE"));
		assert!(!lenient.delete_listing("HBV00000ABCDE", "SAMPLE-SKU-001"));
	}

	#[test]
	fn test_toggles_report_true_on_ok() {
		let client = client(
			MockTransport::new()
				.respond(StatusCode::OK, "")
				.respond(StatusCode::OK, "")
				.respond(StatusCode::OK, ""),
		);
		let lenient = client.lenient();

		assert!(lenient.activate_listing("HBV00000ABCDE"));
		assert!(lenient.deactivate_listing("HBV00000ABCDE"));
		assert!(lenient.delete_listing("HBV00000ABCDE", "SAMPLE-SKU-001"));
	}

	#[test]
	fn test_toggles_report_false_when_not_ok() {
		let client = client(
			MockTransport::new()
				.respond(StatusCode::ACCEPTED, "")
				.respond(StatusCode::NOT_FOUND, ""),
		);
		let lenient = client.lenient();

		assert!(!lenient.activate_listing("HBV00000ABCDE"));
		assert!(!lenient.delete_listing("HBV00000ABCDE", "SAMPLE-SKU-001"));
	}

	#[test]
	fn test_tracking_ids_become_none() {
		let client = client(
			MockTransport::new()
				.fail()
				.respond(StatusCode::OK, r#"{"data":{}}"#)
				.respond(StatusCode::OK, "{}")
				.fail(),
		);
		let lenient = client.lenient();

		assert_eq!(lenient.submit_products("[]"), None);
		assert_eq!(lenient.submit_products_from_records(&[1, 2, 3][..]), None);
		assert_eq!(
			lenient.create_or_update_listing(&Listing::new().field("MerchantSku", "x")),
			None
		);
		assert_eq!(lenient.import_status("4d2a6e1f"), None);
	}

	#[test]
	fn test_tracking_id_passthrough() {
		let client = client(MockTransport::new().respond(
			StatusCode::OK,
			include_str!("fixtures/api-responses/inventory-upload.json"),
		));

		let id = client
			.lenient()
			.create_or_update_listing(&Listing::new().field("MerchantSku", "x"));

		assert_eq!(
			id.map(String::from).as_deref(),
			Some("7b1f0c52-58d3-4a39-8f57-2e6c9d4a0b13")
		);
	}

	#[test]
	fn test_fetches_still_propagate() {
		let client = client(MockTransport::new().fail().fail().fail());
		let lenient = client.lenient();

		assert!(matches!(
			lenient.fetch_categories(None, None),
			Err(Error::Transport(_))
		));
		assert!(matches!(
			lenient.fetch_listings(Some(0), Some(10)),
			Err(Error::Transport(_))
		));
		assert!(matches!(
			lenient.listing_update_status("7b1f0c52"),
			Err(Error::Transport(_))
		));
	}
}
