//! Signs in against a running FanZone back end and lists clubs, reusing the persisted session.
//!
//! 1. Configure the base URL with `API_BASE_URL` (and `API_ORIGIN` for a relative base).
//! 2. Point `FANZONE_SESSION_PATH` at a writable file; it defaults to the temp directory.
//! 3. Provide `FANZONE_EMAIL` and `FANZONE_PASSWORD` for the first run. Later runs restore the
//!    stored session and let the gateway refresh expired access tokens on its own.

// std
use std::{env, path::PathBuf, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use fanzone_gateway::{
	api::LoginRequest,
	config::GatewayConfig,
	gateway::ReqwestGateway,
	storage::{FileStorage, SessionStorage},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = GatewayConfig::from_env()?;
	let path = env::var_os("FANZONE_SESSION_PATH")
		.map(PathBuf::from)
		.unwrap_or_else(|| env::temp_dir().join("fanzone_session.json"));
	let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::open(&path)?);
	let gateway = ReqwestGateway::new(config, storage)?;

	if !gateway.session.is_authenticated() {
		let email = env::var("FANZONE_EMAIL").map_err(|_| eyre!("FANZONE_EMAIL is not set."))?;
		let password =
			env::var("FANZONE_PASSWORD").map_err(|_| eyre!("FANZONE_PASSWORD is not set."))?;
		let login = gateway.login(&LoginRequest::new(email, password)).await?;

		println!(
			"Signed in as {}.",
			login.user.and_then(|user| user.name).unwrap_or_else(|| "unknown user".into())
		);
	}

	for club in gateway.list_clubs().await? {
		println!("{} ({})", club.name, club.league);
	}

	println!(
		"Requests: {}, refresh exchanges: {}, session stored at {}.",
		gateway.metrics.requests(),
		gateway.metrics.refresh_exchanges(),
		path.display()
	);

	Ok(())
}
