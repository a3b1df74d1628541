//! Typed FanZone resource calls layered on [`Gateway`](crate::gateway::Gateway).
//!
//! Every helper goes through [`Gateway::execute`](crate::gateway::Gateway::execute), so it
//! inherits bearer attachment and single-flight refresh. Login and logout are the exceptions:
//! they talk to the auth endpoints directly and mutate the session themselves.

pub mod admin;
pub mod auth;
pub mod clubs;
pub mod content;
pub mod highlights;
pub mod id;
pub mod leagues;
pub mod user;
pub mod watch_links;

pub use admin::*;
pub use auth::*;
pub use clubs::*;
pub use content::*;
pub use highlights::*;
pub use id::*;
pub use leagues::*;
pub use user::*;
pub use watch_links::*;

// self
use crate::{
	_prelude::*,
	gateway::Gateway,
	http::{ApiRequest, HttpTransport},
};

/// Server acknowledgement returned by update, delete, and registration endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
	/// Human-readable confirmation.
	#[serde(default)]
	pub message: String,
}

impl<T> Gateway<T>
where
	T: ?Sized + HttpTransport,
{
	/// Sends `request` with `body` encoded as JSON and decodes the 2xx response into `R`.
	pub(crate) async fn send_json<B, R>(&self, request: ApiRequest, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize + Sync,
		R: DeserializeOwned,
	{
		let request = request.with_json(body)?;

		self.fetch(request).await
	}
}

pub(crate) fn item_path(collection: &str, id: &str) -> String {
	format!("{collection}/{id}")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn acknowledgement_tolerates_extra_fields() {
		let ack: Acknowledgement = serde_json::from_str(
			r#"{"message":"Profile updated successfully","collection":"admins"}"#,
		)
		.expect("Acknowledgement should deserialize.");

		assert_eq!(ack.message, "Profile updated successfully");
		assert_eq!(
			serde_json::from_str::<Acknowledgement>("{}").expect("Empty body should decode."),
			Acknowledgement::default()
		);
	}

	#[test]
	fn item_path_appends_identifier() {
		let club = ClubId::new("65f1").expect("Club fixture should be valid.");

		assert_eq!(item_path("/admin/clubs", &club), "/admin/clubs/65f1");
	}
}
