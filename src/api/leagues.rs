//! Leagues.

// self
use crate::{
	_prelude::*,
	api::{self, Acknowledgement, LeagueId},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const LEAGUES_PATH: &str = "/leagues";
const ADMIN_LEAGUES_PATH: &str = "/admin/leagues";

/// Competition grouping clubs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
	/// League identifier.
	pub id: LeagueId,
	/// Display name.
	pub name: String,
	/// Logo URL.
	#[serde(default)]
	pub logo_url: String,
	/// Host country.
	#[serde(default)]
	pub country: String,
}

/// Fields required to create a league.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeagueInput {
	/// Display name.
	pub name: String,
	/// Logo URL.
	pub logo_url: String,
	/// Host country.
	pub country: String,
}

/// Partial league update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeaguePatch {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New logo URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logo_url: Option<String>,
	/// New host country.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists every league.
	pub async fn list_leagues(&self) -> Result<Vec<League>> {
		self.fetch(ApiRequest::get(LEAGUES_PATH)).await
	}

	/// Fetches one league.
	pub async fn get_league(&self, id: &LeagueId) -> Result<League> {
		self.fetch(ApiRequest::get(api::item_path(LEAGUES_PATH, id))).await
	}

	/// Creates a league and returns the stored record.
	pub async fn create_league(&self, input: &LeagueInput) -> Result<League> {
		self.send_json(ApiRequest::post(ADMIN_LEAGUES_PATH), input).await
	}

	/// Applies a partial update to a league.
	pub async fn update_league(
		&self,
		id: &LeagueId,
		patch: &LeaguePatch,
	) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(api::item_path(ADMIN_LEAGUES_PATH, id)), patch).await
	}

	/// Deletes a league.
	pub async fn delete_league(&self, id: &LeagueId) -> Result<Acknowledgement> {
		self.fetch(ApiRequest::delete(api::item_path(ADMIN_LEAGUES_PATH, id))).await
	}
}
