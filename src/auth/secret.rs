//! Secret wrappers that keep key material and session tokens out of logs.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { AuthKey, "Developer authorization key mixed into every request signature." }
def_secret! { SessionId, "Server-issued session token embedded in authenticated request paths." }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let key = AuthKey::new("23DF3C7E9BD14D84BF892AD206B6755C");
		let session = SessionId::new("1465AFCA32DBDB800BEF8C4F16A32B57");

		assert_eq!(format!("{key:?}"), "AuthKey(\"<redacted>\")");
		assert_eq!(format!("{session}"), "<redacted>");
		assert_eq!(session.expose(), "1465AFCA32DBDB800BEF8C4F16A32B57");
	}
}
