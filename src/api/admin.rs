//! Admin dashboard statistics, analytics, audit trail, and account listings.

// self
use crate::{
	_prelude::*,
	api::UserId,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const STATS_PATH: &str = "/admin/stats";
const ANALYTICS_PATH: &str = "/admin/analytics";
const ACTIVITIES_PATH: &str = "/admin/activities";
const USERS_PATH: &str = "/admin/users";
const ADMINS_PATH: &str = "/super-admin/admins";

/// Entity counts shown on the dashboard home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStats {
	/// Admin accounts.
	pub admins: u64,
	/// Published articles.
	pub content: u64,
	/// Highlight videos.
	pub highlights: u64,
	/// Fan accounts.
	pub users: u64,
	/// Leagues.
	pub leagues: u64,
	/// Clubs.
	pub clubs: u64,
	/// Watch links.
	pub watch_links: u64,
}

/// Registrations per month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrowthPoint {
	/// Month label as reported by the server.
	pub month: String,
	/// New accounts in that month.
	pub count: u64,
}

/// Number of fans who picked a club as favorite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubPopularity {
	/// Club display name.
	pub club_name: String,
	/// Fans following the club.
	pub fan_count: u64,
}

/// Fans per preferred language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageBreakdown {
	/// English.
	pub en: u64,
	/// Amharic.
	pub am: u64,
	/// Afaan Oromo.
	pub om: u64,
}

/// Aggregated analytics for the dashboard charts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminAnalytics {
	/// Monthly registrations.
	pub user_growth: Vec<UserGrowthPoint>,
	/// Clubs ranked by fan count.
	pub club_popularity: Vec<ClubPopularity>,
	/// Language preferences.
	pub languages: LanguageBreakdown,
}

/// Audit-trail entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminActivity {
	/// Entry identifier.
	pub id: String,
	/// Acting account.
	pub user_id: String,
	/// Acting account's display name.
	#[serde(default)]
	pub user_name: String,
	/// Verb, e.g. `create` or `delete`.
	pub action: String,
	/// Entity kind affected.
	pub entity: String,
	/// Free-form detail.
	#[serde(default)]
	pub detail: String,
	/// When the action happened.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

/// Account row in the users and admins listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
	/// Account identifier.
	pub id: UserId,
	/// Display name.
	pub name: String,
	/// Login e-mail.
	pub email: String,
	/// Role label (`user`, `admin`, or `super_admin`).
	pub role: String,
	/// Preferred language; fans only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Favorite club identifier; fans only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fav_club_id: Option<String>,
	/// Account creation instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Whether the account is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
	/// Avatar URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub profile_image_url: Option<String>,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches dashboard entity counts.
	pub async fn admin_stats(&self) -> Result<AdminStats> {
		self.fetch(ApiRequest::get(STATS_PATH)).await
	}

	/// Fetches dashboard analytics.
	pub async fn admin_analytics(&self) -> Result<AdminAnalytics> {
		self.fetch(ApiRequest::get(ANALYTICS_PATH)).await
	}

	/// Fetches the audit trail.
	pub async fn admin_activities(&self) -> Result<Vec<AdminActivity>> {
		self.fetch(ApiRequest::get(ACTIVITIES_PATH)).await
	}

	/// Lists every fan account.
	pub async fn list_users(&self) -> Result<Vec<UserInfo>> {
		self.fetch(ApiRequest::get(USERS_PATH)).await
	}

	/// Lists every admin account; requires a super-admin session.
	pub async fn list_admins(&self) -> Result<Vec<UserInfo>> {
		self.fetch(ApiRequest::get(ADMINS_PATH)).await
	}
}
