use std::io::Write;

use log::*;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{
	api_responses::{ImportProductsResponse, TrackingId},
	config::with_query,
	errors::Error,
	transport::{RequestBody, Transport},
	HepsiburadaClient,
};

/// Name of the multipart part the import endpoint reads the product file from.
const IMPORT_FILE_FIELD: &str = "file";

impl<T: Transport> HepsiburadaClient<T> {
	/// Fetches the category tree. `page` and `size` are only sent when at least one is given.
	///
	/// Host: catalog
	/// Endpoint: GET /product/api/categories/get-all-categories
	pub fn fetch_categories(&self, page: Option<u32>, size: Option<u32>) -> Result<Value, Error> {
		let url = with_query(
			self.catalog_url(&["product", "api", "categories", "get-all-categories"])?,
			&[("page", page), ("size", size)],
		);
		let resp = self.execute(self.catalog_request(Method::GET, url))?;
		resp.traced_json()
	}

	/// Uploads a JSON array of product records as an import job and returns its tracking id.
	///
	/// The payload is staged in a temporary file and sent as the multipart part `file`.
	/// The file is removed before this returns, whatever the outcome.
	///
	/// Host: catalog
	/// Endpoint: POST /product/api/products/import
	pub fn submit_products(&self, products_json: &str) -> Result<TrackingId, Error> {
		let mut staged = tempfile::Builder::new()
			.prefix("hepsiburada-products-")
			.suffix(".json")
			.tempfile()
			.map_err(Error::Staging)?;
		staged
			.write_all(products_json.as_bytes())
			.and_then(|_| staged.flush())
			.map_err(Error::Staging)?;
		trace!("staged product import at {}", staged.path().display());

		let url = self.catalog_url(&["product", "api", "products", "import"])?;
		let req = self.catalog_request(Method::POST, url).body(RequestBody::File {
			field: IMPORT_FILE_FIELD,
			path: staged.path().to_owned(),
		});
		let resp = self.execute_expecting_ok(req)?;
		let body: ImportProductsResponse = resp.traced_json()?;

		match TrackingId::non_empty(body.into_tracking_id()) {
			Some(id) => {
				debug!("product import accepted, tracking id {}", id);
				Ok(id)
			}
			None => Err(Error::MissingTrackingId),
		}
	}

	/// Serializes `records` to a JSON array and submits it with [`submit_products`](Self::submit_products).
	pub fn submit_products_from_records<R: Serialize>(
		&self,
		records: &[R],
	) -> Result<TrackingId, Error> {
		let json = serde_json::to_string(records).map_err(|e| Error::Encoding(e.to_string()))?;
		self.submit_products(&json)
	}

	/// Host: catalog
	/// Endpoint: GET /product/api/products/status/{trackingId}
	pub fn import_status(&self, tracking_id: impl AsRef<str>) -> Result<Value, Error> {
		let url = self.catalog_url(&["product", "api", "products", "status", tracking_id.as_ref()])?;
		let resp = self.execute(self.catalog_request(Method::GET, url))?;
		resp.traced_json()
	}
}
