// std
use std::{
	collections::VecDeque,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use time::{OffsetDateTime, macros::datetime};
use url::Url;
// self
use hirez_api::{
	Client,
	auth::{Credentials, SESSION_TTL},
	client::method::CREATE_SESSION,
	clock::ManualClock,
	endpoint::Endpoint,
	error::{Error, TransportError},
	http::{ApiHttpClient, HttpFuture, HttpResponse},
	record::Record,
};

const START: OffsetDateTime = datetime!(2024-03-01 12:00:00 UTC);

#[derive(Debug)]
struct NetworkDown;
impl std::fmt::Display for NetworkDown {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("network is down")
	}
}
impl std::error::Error for NetworkDown {}

/// Scripted behavior of one `createsession` exchange.
enum SessionStep {
	Grant { delay: StdDuration },
	Fail,
}

/// Test double that counts requests and echoes the session segment back from data calls.
#[derive(Default)]
struct ScriptedApi {
	creates: AtomicUsize,
	calls: AtomicUsize,
	script: Mutex<VecDeque<SessionStep>>,
}
impl ScriptedApi {
	fn with_script(steps: impl IntoIterator<Item = SessionStep>) -> Self {
		Self { script: Mutex::new(steps.into_iter().collect()), ..Default::default() }
	}
}
impl ApiHttpClient for ScriptedApi {
	fn get<'a>(&'a self, method: &'a str, url: Url) -> HttpFuture<'a> {
		Box::pin(async move {
			if method == CREATE_SESSION {
				let n = self.creates.fetch_add(1, Ordering::SeqCst);
				let step = self
					.script
					.lock()
					.expect("Script lock should not be poisoned.")
					.pop_front()
					.unwrap_or(SessionStep::Grant { delay: StdDuration::ZERO });

				return match step {
					SessionStep::Grant { delay } => {
						tokio::time::sleep(delay).await;

						Ok(HttpResponse::new(
							200,
							format!(r#"{{"ret_msg":"Approved","session_id":"S{n}"}}"#),
						))
					},
					SessionStep::Fail => Err(TransportError::network(method, NetworkDown)),
				};
			}

			self.calls.fetch_add(1, Ordering::SeqCst);

			// /smiteapi.svc/{method}Json/{developer}/{signature}/{session}/{timestamp}/{args...}
			let session = url
				.path_segments()
				.and_then(|mut segments| segments.nth(4))
				.unwrap_or_default()
				.to_owned();

			let body = serde_json::json!([{ "Id": 1, "Session": session }]);

			Ok(HttpResponse::new(200, body.to_string()))
		})
	}
}

fn build_client(api: Arc<ScriptedApi>) -> Client<ScriptedApi> {
	let endpoint = Endpoint::custom(
		Url::parse("http://api.example.test/smiteapi.svc").expect("Fixture URL should parse."),
	)
	.expect("Fixture URL should be usable as an endpoint.");
	let credentials = Credentials::new("1004", "23DF3C7E9BD14D84BF892AD206B6755C")
		.expect("Credential fixture should be valid.");

	Client::with_http_client(endpoint, credentials, api)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_session_refresh() {
	const CALLERS: usize = 16;

	let api = Arc::new(ScriptedApi::with_script([SessionStep::Grant {
		delay: StdDuration::from_millis(50),
	}]));
	let client = build_client(api.clone());
	let handles = (0..CALLERS)
		.map(|_| {
			let client = client.clone();

			tokio::spawn(async move { client.player(1).await })
		})
		.collect::<Vec<_>>();
	let mut sessions = Vec::with_capacity(CALLERS);

	for handle in handles {
		let player = handle
			.await
			.expect("Caller task should not panic.")
			.expect("Every concurrent call should succeed.");

		sessions.push(player.fields().get("session").cloned());
	}

	assert_eq!(api.creates.load(Ordering::SeqCst), 1);
	assert_eq!(api.calls.load(Ordering::SeqCst), CALLERS);
	assert!(sessions.iter().all(|s| s.as_ref().and_then(|v| v.as_str()) == Some("S0")));
	assert_eq!(client.sessions().metrics().attempts(), 1);
	assert_eq!(client.sessions().metrics().successes(), 1);
}

#[tokio::test]
async fn cancelled_refresh_releases_the_guard_and_keeps_previous_session() {
	let clock = Arc::new(ManualClock::new(START));
	let api = Arc::new(ScriptedApi::with_script([
		SessionStep::Grant { delay: StdDuration::ZERO },
		SessionStep::Grant { delay: StdDuration::from_secs(60) },
		SessionStep::Grant { delay: StdDuration::ZERO },
	]));
	let client = build_client(api.clone()).with_clock(clock.clone());
	let original = client.session().await.expect("Initial session should be created.");

	clock.advance(SESSION_TTL);

	let timed_out =
		tokio::time::timeout(StdDuration::from_millis(50), client.session()).await.is_err();

	assert!(timed_out, "The hanging refresh should be cancelled by the timeout.");
	assert_eq!(client.sessions().current(), Some(original));

	let renewed = tokio::time::timeout(StdDuration::from_secs(5), client.session())
		.await
		.expect("The refresh guard must be released after cancellation.")
		.expect("The next refresh should succeed.");

	assert_eq!(renewed.id.expose(), "S2");
	assert_eq!(renewed.created_at, START + SESSION_TTL);
	assert_eq!(api.creates.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn refresh_transport_failure_propagates_and_next_call_retries() {
	let api = Arc::new(ScriptedApi::with_script([SessionStep::Fail]));
	let client = build_client(api.clone());
	let err = client.player("Zapman").await.expect_err("Transport failures must surface.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Network { ref method, .. })
			if method == CREATE_SESSION
	));
	assert!(client.sessions().current().is_none());
	assert_eq!(api.calls.load(Ordering::SeqCst), 0);

	let player = client.player("Zapman").await.expect("The next call should refresh again.");

	assert_eq!(player.id(), Some(1));
	assert_eq!(api.creates.load(Ordering::SeqCst), 2);
	assert_eq!(client.sessions().metrics().failures(), 1);
}
