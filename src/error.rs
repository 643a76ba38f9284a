//! Client-level error types shared across sessions, transports, and result mapping.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised at construction.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Session creation was refused by the API.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Transport or decoding failure.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request timestamp could not be rendered.
	#[error("Request timestamp could not be formatted.")]
	Timestamp(#[from] time::error::Format),

	/// Single-entity lookup returned no results.
	#[error("No result was found for `{key}`.")]
	NotFound {
		/// Lookup key that produced the empty result.
		key: String,
	},
}
impl Error {
	/// Returns `true` when the error is the recoverable not-found signal.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The endpoint key is not present in the platform table.
	#[error("Unknown endpoint `{key}`.")]
	UnknownEndpoint {
		/// Key supplied by the caller.
		key: String,
	},
	/// Endpoint base URL cannot be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint base URL cannot carry path segments.
	#[error("Endpoint URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Developer identifier failed validation.
	#[error("Developer identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Session creation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AuthError {
	/// The API answered `createsession` with a status other than `Approved`.
	#[error("Failed to create session: {status}.")]
	Rejected {
		/// Status text returned in `ret_msg`, verbatim.
		status: String,
	},
	/// The API approved the session but omitted its identifier.
	#[error("Session was approved without a session identifier.")]
	MissingSessionId,
}

/// Transport-level failures (network, HTTP status, payload decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{method}`.")]
	Network {
		/// API method being called.
		method: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The API answered with a non-success HTTP status.
	#[error("API method `{method}` returned HTTP {status}.")]
	Status {
		/// API method being called.
		method: String,
		/// HTTP status code.
		status: u16,
		/// Leading portion of the response body.
		body: String,
	},
	/// Response body is not valid JSON for the expected shape.
	#[error("API method `{method}` returned malformed JSON.")]
	Decode {
		/// API method being called.
		method: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Top-level JSON value does not match the lookup shape.
	#[error("Expected a JSON {expected} but found {found}.")]
	UnexpectedShape {
		/// Shape required by the record kind.
		expected: &'static str,
		/// Shape actually received.
		found: &'static str,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		method: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { method: method.into(), source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_rejection_surfaces_status_verbatim() {
		let err: Error = AuthError::Rejected { status: "Invalid Developer Id".into() }.into();

		assert!(matches!(err, Error::Auth(AuthError::Rejected { .. })));
		assert_eq!(err.to_string(), "Failed to create session: Invalid Developer Id.");
	}

	#[test]
	fn not_found_carries_lookup_key() {
		let err = Error::NotFound { key: "12345".into() };

		assert!(err.is_not_found());
		assert!(err.to_string().contains("12345"));
		assert!(!Error::from(AuthError::MissingSessionId).is_not_found());
	}

	#[test]
	fn network_error_exposes_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err: Error = TransportError::network("getplayer", io).into();
		let source = std::error::Error::source(&err)
			.expect("Network error should expose the transport failure as its source.");

		assert_eq!(source.to_string(), "refused");
	}
}
