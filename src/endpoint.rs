//! Static platform table and validated endpoint base URLs.

// self
use crate::{_prelude::*, error::ConfigError};

/// Game + platform pairs served by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
	/// Smite on PC.
	#[serde(rename = "smite-pc")]
	SmitePc,
	/// Smite on Xbox.
	#[serde(rename = "smite-xbl")]
	SmiteXbox,
	/// Smite on PlayStation.
	#[serde(rename = "smite-psn")]
	SmitePlaystation,
	/// Paladins on PC.
	#[serde(rename = "paladins-pc")]
	PaladinsPc,
}
impl Platform {
	/// Every platform in the table.
	pub const ALL: [Self; 4] =
		[Self::SmitePc, Self::SmiteXbox, Self::SmitePlaystation, Self::PaladinsPc];

	/// Returns the configuration key of the platform.
	pub const fn key(self) -> &'static str {
		match self {
			Self::SmitePc => "smite-pc",
			Self::SmiteXbox => "smite-xbl",
			Self::SmitePlaystation => "smite-psn",
			Self::PaladinsPc => "paladins-pc",
		}
	}

	/// Returns the API base URL of the platform.
	pub const fn base_url(self) -> &'static str {
		match self {
			Self::SmitePc => "http://api.smitegame.com/smiteapi.svc",
			Self::SmiteXbox => "http://api.xbox.smitegame.com/smiteapi.svc",
			Self::SmitePlaystation => "http://api.ps4.smitegame.com/smiteapi.svc",
			Self::PaladinsPc => "http://api.paladins.com/paladinsapi.svc",
		}
	}
}
impl Display for Platform {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.key())
	}
}
impl FromStr for Platform {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|platform| platform.key() == s)
			.ok_or_else(|| ConfigError::UnknownEndpoint { key: s.to_owned() })
	}
}

/// Validated base URL that API method paths are appended to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	base: Url,
}
impl Endpoint {
	/// Looks up `key` in the platform table.
	pub fn from_key(key: &str) -> Result<Self, ConfigError> {
		Self::platform(key.parse()?)
	}

	/// Builds the endpoint of a known platform.
	pub fn platform(platform: Platform) -> Result<Self, ConfigError> {
		let base = Url::parse(platform.base_url())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Self::custom(base)
	}

	/// Uses an arbitrary base URL (proxies, regional mirrors, test servers).
	pub fn custom(base: Url) -> Result<Self, ConfigError> {
		if base.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: base.into() });
		}

		Ok(Self { base })
	}

	/// Returns the base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Builds `{base}/{method}Json/{segments...}`, percent-encoding each segment.
	pub fn method_url<'a>(
		&self,
		method: &str,
		segments: impl IntoIterator<Item = &'a str>,
	) -> Result<Url, ConfigError> {
		let mut url = self.base.clone();

		url.set_query(None);
		url.set_fragment(None);

		{
			let mut path = url
				.path_segments_mut()
				.map_err(|_| ConfigError::CannotBeABase { url: self.base.to_string() })?;

			path.pop_if_empty().push(&format!("{method}Json")).extend(segments);
		}

		Ok(url)
	}
}
impl FromStr for Endpoint {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_key(s)
	}
}
