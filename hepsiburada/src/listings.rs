use log::*;
use reqwest::Method;
use serde_json::Value;

use crate::{
	api_responses::{InventoryUploadResponse, TrackingId},
	config::with_query,
	errors::Error,
	inventory::Listing,
	transport::{RequestBody, Transport},
	HepsiburadaClient,
};

impl<T: Transport> HepsiburadaClient<T> {
	/// Lists the merchant's listings. `offset` and `limit` are only sent when at least one is given.
	///
	/// Host: listing
	/// Endpoint: GET /listings/merchantid/{merchantId}
	pub fn fetch_listings(&self, offset: Option<u32>, limit: Option<u32>) -> Result<Value, Error> {
		let url = with_query(
			self.listing_url(&[])?,
			&[("offset", offset), ("limit", limit)],
		);
		let resp = self.execute(self.listing_request(Method::GET, url))?;
		resp.traced_json()
	}

	/// Host: listing
	/// Endpoint: POST /listings/merchantid/{merchantId}/sku/{sku}/activate
	pub fn activate_listing(&self, sku: &str) -> Result<(), Error> {
		self.toggle_listing(sku, "activate")
	}

	/// Host: listing
	/// Endpoint: POST /listings/merchantid/{merchantId}/sku/{sku}/deactivate
	pub fn deactivate_listing(&self, sku: &str) -> Result<(), Error> {
		self.toggle_listing(sku, "deactivate")
	}

	fn toggle_listing(&self, sku: &str, action: &str) -> Result<(), Error> {
		let url = self.listing_url(&["sku", sku, action])?;
		self.execute_expecting_ok(self.listing_request(Method::POST, url))?;
		debug!("{} listing {}: OK", action, sku);
		Ok(())
	}

	/// Host: listing
	/// Endpoint: DELETE /listings/merchantid/{merchantId}/sku/{sku}/merchantsku/{merchantSku}
	pub fn delete_listing(&self, sku: &str, merchant_sku: &str) -> Result<(), Error> {
		let url = self.listing_url(&["sku", sku, "merchantsku", merchant_sku])?;
		self.execute_expecting_ok(self.listing_request(Method::DELETE, url))?;
		debug!("deleted listing {} ({})", sku, merchant_sku);
		Ok(())
	}

	/// Uploads price, stock and shipping data for one SKU. The upload is processed asynchronously;
	/// poll it with [`listing_update_status`](Self::listing_update_status).
	///
	/// Host: listing
	/// Endpoint: POST /listings/merchantid/{merchantId}/inventory-uploads
	pub fn create_or_update_listing(&self, listing: &Listing) -> Result<TrackingId, Error> {
		let document = listing.to_xml()?;
		trace!("inventory upload document: {}", document);

		let url = self.listing_url(&["inventory-uploads"])?;
		let req = self
			.listing_request(Method::POST, url)
			.body(RequestBody::Xml(document));
		let resp = self.execute_expecting_ok(req)?;
		let body: InventoryUploadResponse = resp.traced_json()?;

		TrackingId::non_empty(body.id).ok_or(Error::MissingTrackingId)
	}

	/// Host: listing
	/// Endpoint: GET /listings/merchantid/{merchantId}/inventory-uploads/id/{trackingId}
	pub fn listing_update_status(&self, tracking_id: impl AsRef<str>) -> Result<Value, Error> {
		let url = self.listing_url(&["inventory-uploads", "id", tracking_id.as_ref()])?;
		let resp = self.execute(self.listing_request(Method::GET, url))?;
		resp.traced_json()
	}
}
