//! News articles with trilingual title and body.

// self
use crate::{
	_prelude::*,
	api::{self, Acknowledgement, ClubId, ContentId},
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const CONTENT_PATH: &str = "/content";
const ADMIN_CONTENT_PATH: &str = "/admin/content";

/// Content language supported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	/// English.
	En,
	/// Amharic.
	Am,
	/// Afaan Oromo.
	Om,
}
impl Language {
	/// Every supported language.
	pub const ALL: [Self; 3] = [Self::En, Self::Am, Self::Om];

	/// Returns the ISO 639-1 code used on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::En => "en",
			Self::Am => "am",
			Self::Om => "om",
		}
	}
}
impl Display for Language {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Text translated into every [`Language`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilingualText {
	/// English text.
	#[serde(default)]
	pub en: String,
	/// Amharic text.
	#[serde(default)]
	pub am: String,
	/// Afaan Oromo text.
	#[serde(default)]
	pub om: String,
}
impl MultilingualText {
	/// Returns the translation for `language`.
	pub fn get(&self, language: Language) -> &str {
		match language {
			Language::En => &self.en,
			Language::Am => &self.am,
			Language::Om => &self.om,
		}
	}

	/// Returns the translation for `language`, falling back to English when it is blank.
	pub fn get_or_english(&self, language: Language) -> &str {
		let text = self.get(language);

		if text.trim().is_empty() { &self.en } else { text }
	}
}

/// Published article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
	/// Article identifier.
	pub id: ContentId,
	/// Headline.
	pub title: MultilingualText,
	/// Article body.
	pub body: MultilingualText,
	/// Cover image URL.
	#[serde(default)]
	pub image_url: String,
	/// Free-form category (e.g. `news`, `transfer`).
	#[serde(default)]
	pub category: String,
	/// Club the article is about, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub club_id: Option<ClubId>,
	/// Publication instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}

/// Fields required to publish an article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContentInput {
	/// Headline.
	pub title: MultilingualText,
	/// Article body.
	pub body: MultilingualText,
	/// Cover image URL.
	pub image_url: String,
	/// Category.
	pub category: String,
	/// Related club.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub club_id: Option<ClubId>,
}

/// Partial article update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContentPatch {
	/// New headline.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<MultilingualText>,
	/// New body.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<MultilingualText>,
	/// New cover image URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// New category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// New related club.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub club_id: Option<ClubId>,
}

/// Filters for [`Gateway::list_content`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentQuery {
	/// Only articles about this club.
	pub club_id: Option<ClubId>,
	/// Only articles in this category.
	pub category: Option<String>,
}
impl ContentQuery {
	/// Restricts the listing to one club.
	pub fn club(mut self, club_id: ClubId) -> Self {
		self.club_id = Some(club_id);

		self
	}

	/// Restricts the listing to one category.
	pub fn category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());

		self
	}

	fn apply(&self, request: ApiRequest) -> ApiRequest {
		request
			.with_optional_query("club_id", self.club_id.clone())
			.with_optional_query("category", self.category.clone())
	}
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists articles matching `query`.
	pub async fn list_content(&self, query: &ContentQuery) -> Result<Vec<Content>> {
		self.fetch(query.apply(ApiRequest::get(CONTENT_PATH))).await
	}

	/// Fetches one article.
	pub async fn get_content(&self, id: &ContentId) -> Result<Content> {
		self.fetch(ApiRequest::get(api::item_path(CONTENT_PATH, id))).await
	}

	/// Publishes an article and returns the stored record.
	pub async fn create_content(&self, input: &ContentInput) -> Result<Content> {
		self.send_json(ApiRequest::post(ADMIN_CONTENT_PATH), input).await
	}

	/// Applies a partial update to an article.
	pub async fn update_content(
		&self,
		id: &ContentId,
		patch: &ContentPatch,
	) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(api::item_path(ADMIN_CONTENT_PATH, id)), patch).await
	}

	/// Deletes an article.
	pub async fn delete_content(&self, id: &ContentId) -> Result<Acknowledgement> {
		self.fetch(ApiRequest::delete(api::item_path(ADMIN_CONTENT_PATH, id))).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn content_decodes_server_payload() {
		let content: Content = serde_json::from_str(
			r#"{
				"id":"66a0",
				"title":{"en":"Derby day","am":"","om":"Guyyaa"},
				"body":{"en":"Kick-off at 3.","am":"","om":""},
				"image_url":"https://cdn.example/derby.jpg",
				"category":"news",
				"club_id":"65f1",
				"created_at":"2025-11-10T12:00:00.5Z"
			}"#,
		)
		.expect("Content payload should deserialize.");

		assert_eq!(content.club_id.as_deref(), Some("65f1"));
		assert_eq!(content.title.get(Language::Om), "Guyyaa");
		assert_eq!(content.title.get_or_english(Language::Am), "Derby day");
		assert_eq!(
			content.created_at,
			Some(macros::datetime!(2025-11-10 12:00:00.5 UTC))
		);
	}

	#[test]
	fn query_emits_only_set_filters() {
		let request = ContentQuery::default()
			.category("transfer")
			.apply(ApiRequest::get(CONTENT_PATH));

		assert_eq!(request.query, vec![("category".to_owned(), "transfer".to_owned())]);
	}

	#[test]
	fn languages_use_wire_codes() {
		let codes: Vec<_> = Language::ALL.iter().map(|language| language.to_string()).collect();

		assert_eq!(codes, ["en", "am", "om"]);
		assert_eq!(
			serde_json::from_str::<Language>("\"om\"").expect("Language should deserialize."),
			Language::Om
		);
	}
}
