//! Transport primitives for API calls.
//!
//! The client only needs a GET that yields a status code and a body. [`ApiHttpClient`] is
//! that seam: implement it to plug in a custom stack or a test double, or use
//! [`ReqwestHttpClient`] (enabled by the default `reqwest` feature). Connection reuse is the
//! transport's concern.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Future returned by [`ApiHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing GET requests.
///
/// Implementations must be `Send + Sync + 'static` so one instance can be shared by every
/// concurrent call of a client, and the returned futures must be `Send`.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a GET for `url`. `method` names the API method for error context only.
	fn get<'a>(&'a self, method: &'a str, url: Url) -> HttpFuture<'a>;
}

/// Status + body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Creates a response value.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn get<'a>(&'a self, method: &'a str, url: Url) -> HttpFuture<'a> {
		Box::pin(async move {
			let response =
				self.0.get(url).send().await.map_err(|e| TransportError::network(method, e))?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(|e| TransportError::network(method, e))?;

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_range_covers_2xx_only() {
		assert!(HttpResponse::new(200, "[]").is_success());
		assert!(HttpResponse::new(204, "").is_success());
		assert!(!HttpResponse::new(302, "").is_success());
		assert!(!HttpResponse::new(503, "busy").is_success());
	}
}
