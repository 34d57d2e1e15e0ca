use serde::Deserialize;

/// Body of `POST /product/api/products/import`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImportProductsResponse {
	#[serde(default)]
	pub data: Option<ImportProductsData>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImportProductsData {
	#[serde(default, rename = "trackingId")]
	pub tracking_id: Option<String>,
}

impl ImportProductsResponse {
	pub fn into_tracking_id(self) -> Option<String> {
		self.data.and_then(|data| data.tracking_id)
	}
}

/// Body of `POST /listings/merchantid/{merchantId}/inventory-uploads`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InventoryUploadResponse {
	#[serde(default)]
	pub id: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_import_response() -> anyhow::Result<()> {
		let resp: ImportProductsResponse = serde_json::from_str(include_str!(
			"../fixtures/api-responses/products-import.json"
		))?;
		assert_eq!(
			resp.into_tracking_id().as_deref(),
			Some("4d2a6e1f-3a94-4d4b-9c1e-7a0f3b8e5d21")
		);
		Ok(())
	}

	#[test]
	fn test_parse_import_response_without_data() -> anyhow::Result<()> {
		let resp: ImportProductsResponse =
			serde_json::from_str(r#"{"success":false,"message":"file is empty"}"#)?;
		assert_eq!(resp.into_tracking_id(), None);
		Ok(())
	}

	#[test]
	fn test_parse_inventory_upload_response() -> anyhow::Result<()> {
		let resp: InventoryUploadResponse = serde_json::from_str(include_str!(
			"../fixtures/api-responses/inventory-upload.json"
		))?;
		assert_eq!(
			resp.id.as_deref(),
			Some("7b1f0c52-58d3-4a39-8f57-2e6c9d4a0b13")
		);
		Ok(())
	}
}
