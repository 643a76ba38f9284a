//! Demonstrates a player lookup against a mocked API: one `createsession` call, then a signed
//! `getplayer` call reusing the cached session for a follow-up `getplayerstatus`.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use hirez_api::{
	Client,
	auth::Credentials,
	endpoint::Endpoint,
	error::Error,
	http::ReqwestHttpClient,
	reqwest::Client as HttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let session_mock = server
		.mock_async(|when, then| {
			when.method(GET).path_prefix("/createsessionJson/1004/");
			then.status(200).header("content-type", "application/json").body(
				"{\"ret_msg\":\"Approved\",\"session_id\":\"DEMO-SESSION\",\"timestamp\":\"\"}",
			);
		})
		.await;
	let player_mock = server
		.mock_async(|when, then| {
			when.method(GET).path_prefix("/getplayerJson/1004/").path_suffix("/Zapman");
			then.status(200).header("content-type", "application/json").body(
				"[{\"Id\":12345,\"Name\":\"Zapman\",\"Level\":30,\"Region\":\"North America\"}]",
			);
		})
		.await;
	let status_mock = server
		.mock_async(|when, then| {
			when.method(GET).path_prefix("/getplayerstatusJson/1004/");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let http_client =
		ReqwestHttpClient::with_client(HttpClient::builder().user_agent("hirez-demo").build()?);
	let client = <Client<ReqwestHttpClient>>::with_http_client(
		Endpoint::custom(Url::parse(&server.base_url())?)?,
		Credentials::new("1004", "23DF3C7E9BD14D84BF892AD206B6755C")?,
		http_client,
	);
	let player = client.player("Zapman").await?;

	println!(
		"{} is level {} in {}.",
		player.name().unwrap_or("?"),
		player.level().unwrap_or_default(),
		player.region().unwrap_or("an unknown region"),
	);

	match client.player_status("Zapman").await {
		Err(Error::NotFound { key }) => println!("No status reported for {key}."),
		other => println!("Status: {:?}.", other?.status_string()),
	}

	session_mock.assert_async().await;
	player_mock.assert_async().await;
	status_mock.assert_async().await;

	Ok(())
}
