//! Profile of the signed-in account as returned by the login endpoint.

// self
use crate::_prelude::*;

/// Signed-in account stored alongside the session tokens.
///
/// Every field is optional because admins and regular users expose different subsets, and a
/// token refresh never returns a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
	/// Account identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Login e-mail.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Role label (`user`, `admin`, or `super_admin`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Avatar URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub profile_image_url: Option<String>,
	/// Preferred content language (`en`, `am`, `om`); regular users only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Favorite club identifier; regular users only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fav_club_id: Option<String>,
	/// Account creation instant.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub created_at: Option<OffsetDateTime>,
}
impl CurrentUser {
	const ROLE_ADMIN: &str = "admin";
	const ROLE_SUPER_ADMIN: &str = "super_admin";

	/// Returns `true` for accounts allowed to use the `/admin` endpoints.
	pub fn is_admin(&self) -> bool {
		matches!(self.role.as_deref(), Some(Self::ROLE_ADMIN | Self::ROLE_SUPER_ADMIN))
	}

	/// Returns `true` for accounts allowed to use the `/super-admin` endpoints.
	pub fn is_super_admin(&self) -> bool {
		self.role.as_deref() == Some(Self::ROLE_SUPER_ADMIN)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn login_payload_deserializes_with_partial_fields() {
		let user: CurrentUser = serde_json::from_str(
			r#"{"id":"65f0","name":"Abebe","email":"a@b.com","role":"super_admin","profile_image_url":"","created_at":"2025-11-10T12:00:00Z"}"#,
		)
		.expect("Login user payload should deserialize.");

		assert_eq!(user.id.as_deref(), Some("65f0"));
		assert_eq!(user.language, None);
		assert_eq!(user.created_at, Some(macros::datetime!(2025-11-10 12:00 UTC)));
		assert!(user.is_admin());
		assert!(user.is_super_admin());
	}

	#[test]
	fn regular_users_are_not_admins() {
		let user = CurrentUser { role: Some("user".into()), ..Default::default() };

		assert!(!user.is_admin());
		assert!(!CurrentUser::default().is_admin());
	}

	#[test]
	fn absent_fields_are_not_serialized() {
		let user = CurrentUser { email: Some("a@b.com".into()), ..Default::default() };

		assert_eq!(
			serde_json::to_string(&user).expect("Current user should serialize."),
			r#"{"email":"a@b.com"}"#
		);
	}
}
