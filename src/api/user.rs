//! Signed-in account profile and password management.

// self
use crate::{
	_prelude::*,
	api::{Acknowledgement, ClubId, Language},
	auth::CurrentUser,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

const PROFILE_PATH: &str = "/user/profile";
const PASSWORD_PATH: &str = "/user/password";

/// Partial profile update; at least one field must be set for the server to accept it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New preferred language.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<Language>,
	/// New favorite club.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fav_club_id: Option<ClubId>,
	/// New avatar URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profile_image_url: Option<String>,
}
impl ProfileUpdate {
	/// Returns `true` when no field is set.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// Password rotation request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
	/// Password currently on file.
	pub current_password: String,
	/// Replacement password.
	pub new_password: String,
}
impl Debug for PasswordChange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PasswordChange(<redacted>)")
	}
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the signed-in account's profile.
	pub async fn profile(&self) -> Result<CurrentUser> {
		self.fetch(ApiRequest::get(PROFILE_PATH)).await
	}

	/// Updates the signed-in account's profile.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(PROFILE_PATH), update).await
	}

	/// Rotates the signed-in account's password.
	///
	/// The server answers a wrong current password with 401, which goes through the same
	/// refresh handling as any other request.
	pub async fn change_password(&self, change: &PasswordChange) -> Result<Acknowledgement> {
		self.send_json(ApiRequest::put(PASSWORD_PATH), change).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_update_serializes_set_fields() {
		let update = ProfileUpdate { language: Some(Language::Am), ..Default::default() };

		assert!(!update.is_empty());
		assert!(ProfileUpdate::default().is_empty());
		assert_eq!(
			serde_json::to_string(&update).expect("Update should serialize."),
			r#"{"language":"am"}"#
		);
	}

	#[test]
	fn password_change_is_redacted() {
		let change =
			PasswordChange { current_password: "old-pw".into(), new_password: "new-pw".into() };

		assert_eq!(format!("{change:?}"), "PasswordChange(<redacted>)");
	}
}
