//! API client orchestrating session acquisition, signing, transport, and decoding.

mod endpoints;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, DeveloperId, Session},
	clock::{Clock, SystemClock},
	endpoint::Endpoint,
	error::TransportError,
	http::ApiHttpClient,
	obs::{self, CallSpan, Operation, Outcome},
	session::{SessionGrant, SessionManager},
	sign::{RequestSigner, Timestamp},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// API method names used by the client.
pub mod method {
	/// Session creation (unauthenticated).
	pub const CREATE_SESSION: &str = "createsession";
	/// Session diagnostics.
	pub const TEST_SESSION: &str = "testsession";
	/// Daily usage counters.
	pub const GET_DATA_USED: &str = "getdataused";
	/// Player profile lookup.
	pub const GET_PLAYER: &str = "getplayer";
	/// Player online status.
	pub const GET_PLAYER_STATUS: &str = "getplayerstatus";
	/// Team details.
	pub const GET_TEAM_DETAILS: &str = "getteamdetails";
	/// Team roster.
	pub const GET_TEAM_PLAYERS: &str = "getteamplayers";
	/// Recent matches of a player.
	pub const GET_MATCH_HISTORY: &str = "getmatchhistory";
}

const BODY_PREVIEW_CHARS: usize = 256;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Client bound to one endpoint and one set of developer credentials.
///
/// Clones share the transport and the session, so a refreshed session is visible to every
/// clone.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	endpoint: Endpoint,
	credentials: Credentials,
	signer: RequestSigner,
	sessions: Arc<SessionManager>,
	clock: Arc<dyn Clock>,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		endpoint: Endpoint,
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			endpoint,
			signer: RequestSigner::new(&credentials),
			credentials,
			sessions: Default::default(),
			clock: Arc::new(SystemClock),
		}
	}

	/// Replaces the time source used for staleness checks and request timestamps.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Replaces the session TTL, discarding any stored session.
	pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
		self.sessions = Arc::new(SessionManager::new(ttl));

		self
	}

	/// Returns the endpoint requests are sent to.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	/// Returns the developer identifier.
	pub fn developer_id(&self) -> &DeveloperId {
		&self.credentials.developer_id
	}

	/// Returns the request signer.
	pub fn signer(&self) -> &RequestSigner {
		&self.signer
	}

	/// Returns the session manager.
	pub fn sessions(&self) -> &SessionManager {
		&self.sessions
	}

	/// Returns a valid session, creating one if none exists or the stored one is stale.
	pub async fn session(&self) -> Result<Session> {
		self.sessions.acquire(self.clock.as_ref(), |started| self.create_session(started)).await
	}

	/// Issues an authenticated call and returns the decoded JSON body.
	///
	/// `args` are appended as path segments after the timestamp.
	pub async fn call(&self, method: &str, args: &[&str]) -> Result<Value> {
		const OPERATION: Operation = Operation::Call;

		let span = CallSpan::new(OPERATION, method);

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				let session = self.session().await?;
				let timestamp = Timestamp::now(self.clock.as_ref())?;
				let url = self.request_url(method, Some(&session), &timestamp, args)?;

				self.dispatch(method, url).await
			})
			.await;

		obs::record_result(OPERATION, &result);

		result
	}

	async fn create_session(&self, timestamp: Timestamp) -> Result<SessionGrant> {
		const OPERATION: Operation = Operation::CreateSession;

		let span = CallSpan::new(OPERATION, method::CREATE_SESSION);

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				let url = self.request_url(method::CREATE_SESSION, None, &timestamp, &[])?;

				self.dispatch(method::CREATE_SESSION, url).await
			})
			.await;

		obs::record_result(OPERATION, &result);

		result
	}

	/// Builds `{base}/{method}Json/{developer}/{signature}/{session?}/{timestamp}/{args...}`.
	fn request_url(
		&self,
		method: &str,
		session: Option<&Session>,
		timestamp: &Timestamp,
		args: &[&str],
	) -> Result<Url> {
		let signature = self.signer.sign(method, timestamp);
		let developer_id: &str = &self.credentials.developer_id;
		let mut segments = vec![developer_id, signature.as_str()];

		if let Some(session) = session {
			segments.push(session.id.expose());
		}

		segments.push(timestamp.as_str());
		segments.extend_from_slice(args);

		Ok(self.endpoint.method_url(method, segments)?)
	}

	async fn dispatch<T>(&self, method: &str, url: Url) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.http_client.get(method, url).await?;

		if !response.is_success() {
			return Err(TransportError::Status {
				method: method.to_owned(),
				status: response.status,
				body: response.body.chars().take(BODY_PREVIEW_CHARS).collect(),
			}
			.into());
		}

		let mut deserializer = serde_json::Deserializer::from_str(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| TransportError::Decode { method: method.to_owned(), source }.into())
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client for the platform `endpoint_key` (e.g. `smite-pc`) using a default
	/// reqwest transport.
	///
	/// Unknown keys fail here, before any client exists.
	pub fn new(endpoint_key: &str, credentials: Credentials) -> Result<Self> {
		let endpoint = Endpoint::from_key(endpoint_key)?;

		Ok(Self::with_http_client(endpoint, credentials, ReqwestHttpClient::default()))
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			endpoint: self.endpoint.clone(),
			credentials: self.credentials.clone(),
			signer: self.signer.clone(),
			sessions: self.sessions.clone(),
			clock: self.clock.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoint", &self.endpoint.base().as_str())
			.field("developer_id", &self.credentials.developer_id)
			.field("session_ttl", &self.sessions.ttl())
			.finish()
	}
}
