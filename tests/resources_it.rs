#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use fanzone_gateway::{
	_preludet::*,
	api::{
		ClubId, ClubInput, ContentId, ContentPatch, ContentQuery, HighlightInput, Language,
		LeagueId, PasswordChange, ProfileUpdate, RegisterAdminRequest, WatchLinkId,
	},
	auth::TokenSecret,
	gateway::ReqwestGateway,
};

fn signed_in(server: &MockServer) -> ReqwestGateway {
	let (gateway, _) = build_reqwest_test_gateway(&server.url("/api"));

	gateway.session.set_credentials(TokenSecret::new("A1"), TokenSecret::new("R1"), None);

	gateway
}

#[tokio::test]
async fn content_listing_forwards_filters() {
	let server = MockServer::start_async().await;
	let gateway = signed_in(&server);
	let listing = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/content")
				.query_param("club_id", "65f1")
				.query_param("category", "news")
				.header("authorization", "Bearer A1");
			then.status(200).json_body(json!([{
				"id": "66a0",
				"title": { "en": "Derby day", "am": "", "om": "" },
				"body": { "en": "Kick-off at 3.", "am": "", "om": "" },
				"image_url": "",
				"category": "news",
				"club_id": "65f1",
				"created_at": "2025-11-10T12:00:00Z"
			}]));
		})
		.await;
	let query = ContentQuery::default()
		.club(ClubId::new("65f1").expect("Club fixture should be valid."))
		.category("news");
	let content = gateway.list_content(&query).await.expect("Content listing should succeed.");

	listing.assert_calls_async(1).await;

	assert_eq!(content.len(), 1);
	assert_eq!(content[0].title.get(Language::En), "Derby day");
}

#[tokio::test]
async fn admin_create_update_delete_round_trip() {
	let server = MockServer::start_async().await;
	let gateway = signed_in(&server);
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/admin/clubs").json_body(json!({
				"name": "Fasil Kenema",
				"logo_url": "https://cdn.example/fasil.png",
				"league": "Ethiopian Premier League"
			}));
			then.status(201).json_body(json!({
				"id": "65f2",
				"name": "Fasil Kenema",
				"logo_url": "https://cdn.example/fasil.png",
				"league": "Ethiopian Premier League"
			}));
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/admin/content/66a0")
				.json_body(json!({ "category": "transfer" }));
			then.status(200).json_body(json!({ "message": "Content updated successfully" }));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/admin/watch-links/77b0");
			then.status(200).json_body(json!({ "message": "Watch link deleted successfully" }));
		})
		.await;
	let club = gateway
		.create_club(&ClubInput {
			name: "Fasil Kenema".into(),
			logo_url: "https://cdn.example/fasil.png".into(),
			league: "Ethiopian Premier League".into(),
		})
		.await
		.expect("Club creation should succeed.");
	let content_id = ContentId::new("66a0").expect("Content fixture should be valid.");
	let updated = gateway
		.update_content(
			&content_id,
			&ContentPatch { category: Some("transfer".into()), ..Default::default() },
		)
		.await
		.expect("Content update should succeed.");
	let link_id = WatchLinkId::new("77b0").expect("Watch link fixture should be valid.");
	let deleted = gateway.delete_watch_link(&link_id).await.expect("Deletion should succeed.");

	create.assert_calls_async(1).await;
	update.assert_calls_async(1).await;
	delete.assert_calls_async(1).await;

	assert_eq!(club.id.as_ref(), "65f2");
	assert_eq!(updated.message, "Content updated successfully");
	assert_eq!(deleted.message, "Watch link deleted successfully");
}

#[tokio::test]
async fn server_errors_surface_with_message() {
	let server = MockServer::start_async().await;
	let gateway = signed_in(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/leagues/6600");
			then.status(404).json_body(json!({ "error": "League not found" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/admin/highlights");
			then.status(400).json_body(json!({ "error": "Invalid club ID: bad" }));
		})
		.await;

	let league_id = LeagueId::new("6600").expect("League fixture should be valid.");
	let missing = gateway.get_league(&league_id).await.expect_err("Missing league should fail.");

	assert!(matches!(
		missing,
		Error::Api { status: 404, ref message } if message == "League not found"
	));

	let invalid = gateway
		.create_highlight(&HighlightInput {
			match_title: "Saint George vs Fasil Kenema".into(),
			youtube_url: "https://youtu.be/abc".into(),
			club_ids: Vec::new(),
		})
		.await
		.expect_err("Invalid highlight should fail.");

	assert_eq!(invalid.status(), Some(400));
}

#[tokio::test]
async fn malformed_success_body_reports_json_path() {
	let server = MockServer::start_async().await;
	let gateway = signed_in(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/admin/analytics");
			then.status(200).json_body(json!({
				"user_growth": [{ "month": "2025-10", "count": "twelve" }]
			}));
		})
		.await;

	let err = gateway.admin_analytics().await.expect_err("Malformed analytics should fail.");

	assert!(matches!(err, Error::Decode(_)));
	assert!(err.to_string().contains("user_growth[0].count"), "Unexpected message: {err}");
}

#[tokio::test]
async fn profile_and_super_admin_calls_use_expected_routes() {
	let server = MockServer::start_async().await;
	let gateway = signed_in(&server);
	let profile = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/user/profile").json_body(json!({ "language": "om" }));
			then.status(200).json_body(json!({ "message": "Profile updated successfully" }));
		})
		.await;
	let password = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/user/password").json_body(json!({
				"current_password": "old-pw",
				"new_password": "new-pw"
			}));
			then.status(200).json_body(json!({ "message": "Password updated successfully" }));
		})
		.await;
	let register = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/super-admin/register-admin");
			then.status(201).json_body(json!({ "message": "Admin registered successfully" }));
		})
		.await;
	let admins = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/super-admin/admins");
			then.status(200).json_body(json!([{
				"id": "65f0",
				"name": "Hana",
				"email": "hana@fanzone.example",
				"role": "admin",
				"created_at": "2025-01-02T03:04:05Z"
			}]));
		})
		.await;

	gateway
		.update_profile(&ProfileUpdate { language: Some(Language::Om), ..Default::default() })
		.await
		.expect("Profile update should succeed.");
	gateway
		.change_password(&PasswordChange {
			current_password: "old-pw".into(),
			new_password: "new-pw".into(),
		})
		.await
		.expect("Password change should succeed.");
	gateway
		.register_admin(&RegisterAdminRequest {
			name: "Hana".into(),
			email: "hana@fanzone.example".into(),
			password: "secret1".into(),
		})
		.await
		.expect("Admin registration should succeed.");

	let listed = gateway.list_admins().await.expect("Admin listing should succeed.");

	profile.assert_calls_async(1).await;
	password.assert_calls_async(1).await;
	register.assert_calls_async(1).await;
	admins.assert_calls_async(1).await;

	assert_eq!(listed.len(), 1);
	assert_eq!(listed[0].role, "admin");
	assert!(listed[0].language.is_none());
}
