//! Football clubs.

// self
use crate::{
	_prelude::*,
	api::{self, Acknowledgement, ClubId},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const CLUBS_PATH: &str = "/clubs";
const ADMIN_CLUBS_PATH: &str = "/admin/clubs";

/// Club listed in the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
	/// Club identifier.
	pub id: ClubId,
	/// Display name.
	pub name: String,
	/// Crest URL.
	#[serde(default)]
	pub logo_url: String,
	/// League the club plays in.
	#[serde(default)]
	pub league: String,
}

/// Fields required to create a club.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClubInput {
	/// Display name.
	pub name: String,
	/// Crest URL.
	pub logo_url: String,
	/// League the club plays in.
	pub league: String,
}

/// Partial club update; unset fields are left untouched server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClubPatch {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New crest URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logo_url: Option<String>,
	/// New league.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub league: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists every club.
	pub async fn list_clubs(&self) -> Result<Vec<Club>> {
		self.fetch(ApiRequest::get(CLUBS_PATH)).await
	}

	/// Fetches one club.
	pub async fn get_club(&self, id: &ClubId) -> Result<Club> {
		self.fetch(ApiRequest::get(api::item_path(CLUBS_PATH, id))).await
	}

	/// Creates a club and returns the stored record.
	pub async fn create_club(&self, input: &ClubInput) -> Result<Club> {
		self.send_json(ApiRequest::post(ADMIN_CLUBS_PATH), input).await
	}

	/// Applies a partial update to a club.
	pub async fn update_club(&self, id: &ClubId, patch: &ClubPatch) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(api::item_path(ADMIN_CLUBS_PATH, id)), patch).await
	}

	/// Deletes a club.
	pub async fn delete_club(&self, id: &ClubId) -> Result<Acknowledgement> {
		self.fetch(ApiRequest::delete(api::item_path(ADMIN_CLUBS_PATH, id))).await
	}
}
