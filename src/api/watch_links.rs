//! Streaming and broadcast links.

// self
use crate::{
	_prelude::*,
	api::{self, Acknowledgement, WatchLinkId},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const WATCH_LINKS_PATH: &str = "/watch-links";
const ADMIN_WATCH_LINKS_PATH: &str = "/admin/watch-links";

/// Where fans can watch matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchLink {
	/// Link identifier.
	pub id: WatchLinkId,
	/// Broadcaster or service name.
	pub name: String,
	/// Target URL.
	pub url: String,
	/// Link category (e.g. `tv`, `stream`).
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Broadcaster logo URL.
	#[serde(default)]
	pub logo_url: String,
}

/// Fields required to create a watch link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WatchLinkInput {
	/// Broadcaster or service name.
	pub name: String,
	/// Target URL.
	pub url: String,
	/// Link category.
	#[serde(rename = "type")]
	pub kind: String,
	/// Broadcaster logo URL.
	pub logo_url: String,
}

/// Partial watch link update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WatchLinkPatch {
	/// New name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// New category.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// New logo URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logo_url: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists every watch link.
	pub async fn list_watch_links(&self) -> Result<Vec<WatchLink>> {
		self.fetch(ApiRequest::get(WATCH_LINKS_PATH)).await
	}

	/// Fetches one watch link.
	pub async fn get_watch_link(&self, id: &WatchLinkId) -> Result<WatchLink> {
		self.fetch(ApiRequest::get(api::item_path(WATCH_LINKS_PATH, id))).await
	}

	/// Creates a watch link and returns the stored record.
	pub async fn create_watch_link(&self, input: &WatchLinkInput) -> Result<WatchLink> {
		self.send_json(ApiRequest::post(ADMIN_WATCH_LINKS_PATH), input).await
	}

	/// Applies a partial update to a watch link.
	pub async fn update_watch_link(
		&self,
		id: &WatchLinkId,
		patch: &WatchLinkPatch,
	) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(api::item_path(ADMIN_WATCH_LINKS_PATH, id)), patch).await
	}

	/// Deletes a watch link.
	pub async fn delete_watch_link(&self, id: &WatchLinkId) -> Result<Acknowledgement> {
		self.fetch(ApiRequest::delete(api::item_path(ADMIN_WATCH_LINKS_PATH, id))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kind_maps_to_type_field() {
		let input = WatchLinkInput {
			name: "EBC".into(),
			url: "https://ebc.example/live".into(),
			kind: "tv".into(),
			logo_url: String::new(),
		};
		let value = serde_json::to_value(&input).expect("Input should serialize.");

		assert_eq!(value["type"], "tv");

		let patch = WatchLinkPatch { kind: Some("stream".into()), ..Default::default() };

		assert_eq!(
			serde_json::to_string(&patch).expect("Patch should serialize."),
			r#"{"type":"stream"}"#
		);
	}
}
