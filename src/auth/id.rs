//! Validated developer identifier issued by the API vendor.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Developer identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Developer identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier contains characters that cannot appear in a path segment.
	#[error("Developer identifier contains a path separator.")]
	ContainsSeparator,
	/// The identifier exceeded the allowed character count.
	#[error("Developer identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Developer identifier embedded in every request path and signature.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeveloperId(String);
impl DeveloperId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for DeveloperId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for DeveloperId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for DeveloperId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<DeveloperId> for String {
	fn from(value: DeveloperId) -> Self {
		value.0
	}
}
impl TryFrom<String> for DeveloperId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for DeveloperId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Developer({})", self.0)
	}
}
impl Display for DeveloperId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for DeveloperId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.contains(['/', '\\']) {
		return Err(IdentifierError::ContainsSeparator);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert!(DeveloperId::new(" 1004").is_err(), "Leading whitespace must be rejected.");
		assert!(DeveloperId::new("1004 ").is_err(), "Trailing whitespace must be rejected.");
		assert_eq!(DeveloperId::new(""), Err(IdentifierError::Empty));
		assert_eq!(DeveloperId::new("10/04"), Err(IdentifierError::ContainsSeparator));

		let id = DeveloperId::new("1004").expect("Developer fixture should be considered valid.");

		assert_eq!(&*id, "1004");
		assert_eq!(format!("{id:?}"), "Developer(1004)");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: DeveloperId =
			serde_json::from_str("\"1004\"").expect("Developer id should deserialize successfully.");

		assert_eq!(&*id, "1004");
		assert!(serde_json::from_str::<DeveloperId>("\"with space\"").is_err());
	}

	#[test]
	fn length_limit_is_inclusive() {
		let exact = "7".repeat(IDENTIFIER_MAX_LEN);

		DeveloperId::new(&exact).expect("Exact length should succeed.");

		assert_eq!(
			DeveloperId::new("7".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN })
		);
	}
}
