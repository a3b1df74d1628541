//! Match highlight videos.

// self
use crate::{
	_prelude::*,
	api::{self, Acknowledgement, ClubId, HighlightId},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const HIGHLIGHTS_PATH: &str = "/highlights";
const ADMIN_HIGHLIGHTS_PATH: &str = "/admin/highlights";

/// Highlight video linked to the clubs that played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
	/// Highlight identifier.
	pub id: HighlightId,
	/// Match title, e.g. `Saint George vs Fasil Kenema`.
	pub match_title: String,
	/// YouTube URL of the video.
	pub youtube_url: String,
	/// Clubs involved in the match.
	#[serde(default)]
	pub club_ids: Vec<ClubId>,
}

/// Fields required to publish a highlight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HighlightInput {
	/// Match title.
	pub match_title: String,
	/// YouTube URL.
	pub youtube_url: String,
	/// Clubs involved in the match.
	pub club_ids: Vec<ClubId>,
}

/// Partial highlight update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HighlightPatch {
	/// New match title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub match_title: Option<String>,
	/// New YouTube URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub youtube_url: Option<String>,
	/// Replacement club list.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub club_ids: Option<Vec<ClubId>>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists highlights, optionally only those featuring `club_id`.
	pub async fn list_highlights(&self, club_id: Option<&ClubId>) -> Result<Vec<Highlight>> {
		let request =
			ApiRequest::get(HIGHLIGHTS_PATH).with_optional_query("club_id", club_id.cloned());

		self.fetch(request).await
	}

	/// Fetches one highlight.
	pub async fn get_highlight(&self, id: &HighlightId) -> Result<Highlight> {
		self.fetch(ApiRequest::get(api::item_path(HIGHLIGHTS_PATH, id))).await
	}

	/// Publishes a highlight and returns the stored record.
	pub async fn create_highlight(&self, input: &HighlightInput) -> Result<Highlight> {
		self.send_json(ApiRequest::post(ADMIN_HIGHLIGHTS_PATH), input).await
	}

	/// Applies a partial update to a highlight.
	pub async fn update_highlight(
		&self,
		id: &HighlightId,
		patch: &HighlightPatch,
	) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(api::item_path(ADMIN_HIGHLIGHTS_PATH, id)), patch).await
	}

	/// Deletes a highlight.
	pub async fn delete_highlight(&self, id: &HighlightId) -> Result<Acknowledgement> {
		self.fetch(ApiRequest::delete(api::item_path(ADMIN_HIGHLIGHTS_PATH, id))).await
	}
}
