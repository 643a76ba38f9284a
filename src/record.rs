//! Typed result records decoded from API responses.
//!
//! Every record keeps the full lower-cased field map of the object it was built from, so
//! fields the schema does not know about stay reachable through [`Record::get`]. The typed
//! accessors read the known fields without coercion: a field of an unexpected JSON type
//! reads as `None`.

// self
use crate::_prelude::*;

/// Lower-cased field map backing every record.
pub type Fields = serde_json::Map<String, Value>;

/// Top-level response shape expected for a record kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
	/// JSON array whose first element is the entity; empty means not found.
	Single,
	/// JSON object mapped directly.
	Object,
	/// JSON array mapped element by element.
	List,
}

/// Schema used to interpret one API response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
	/// `getplayer` entry.
	PlayerSummary,
	/// `getplayerstatus` entry.
	PlayerStatus,
	/// `getteamdetails` object.
	Team,
	/// `getteamplayers` entry.
	TeamMember,
	/// `getmatchhistory` entry.
	Match,
}
impl RecordKind {
	/// Returns the response shape the API uses for this kind.
	pub const fn lookup(self) -> Lookup {
		match self {
			Self::PlayerSummary | Self::PlayerStatus => Lookup::Single,
			Self::Team => Lookup::Object,
			Self::TeamMember | Self::Match => Lookup::List,
		}
	}

	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::PlayerSummary => "player_summary",
			Self::PlayerStatus => "player_status",
			Self::Team => "team",
			Self::TeamMember => "team_member",
			Self::Match => "match",
		}
	}
}
impl Display for RecordKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Common behavior of every record type.
pub trait Record
where
	Self: Sized + Into<ApiRecord>,
{
	/// Kind tag of the record type.
	const KIND: RecordKind;

	/// Wraps an already lower-cased field map.
	fn from_fields(fields: Fields) -> Self;

	/// Returns the backing field map.
	fn fields(&self) -> &Fields;

	/// Consumes the record, returning the backing field map.
	fn into_fields(self) -> Fields;

	/// Looks up a field by name, case-insensitively.
	fn get(&self, name: &str) -> Option<&Value> {
		self.fields().get(&name.to_lowercase())
	}

	/// Status message the API attaches to most entries; `None` when empty.
	fn ret_msg(&self) -> Option<&str> {
		self.get("ret_msg").and_then(Value::as_str).filter(|msg| !msg.is_empty())
	}
}

macro_rules! def_record {
	(
		$name:ident, $doc:literal, {
			$($(#[$meta:meta])* $getter:ident: $ret:ty = $key:literal => $conv:path;)*
		}
	) => {
		#[doc = $doc]
		#[derive(Clone, Debug, Default, PartialEq, Serialize)]
		#[serde(transparent)]
		pub struct $name(Fields);
		impl $name {
			$(
				$(#[$meta])*
				pub fn $getter(&self) -> Option<$ret> {
					self.0.get($key).and_then($conv)
				}
			)*
		}
		impl Record for $name {
			const KIND: RecordKind = RecordKind::$name;

			fn from_fields(fields: Fields) -> Self {
				Self(fields)
			}

			fn fields(&self) -> &Fields {
				&self.0
			}

			fn into_fields(self) -> Fields {
				self.0
			}
		}
		impl From<$name> for ApiRecord {
			fn from(value: $name) -> Self {
				Self::$name(value)
			}
		}
	};
}

def_record! { PlayerSummary, "Account-level player profile returned by `getplayer`.", {
	/// Numeric player identifier.
	id: i64 = "id" => Value::as_i64;
	/// Display name.
	name: &str = "name" => Value::as_str;
	/// Account level.
	level: i64 = "level" => Value::as_i64;
	/// Lifetime wins.
	wins: i64 = "wins" => Value::as_i64;
	/// Lifetime losses.
	losses: i64 = "losses" => Value::as_i64;
	/// Leaves (disconnects).
	leaves: i64 = "leaves" => Value::as_i64;
	/// Server region.
	region: &str = "region" => Value::as_str;
	/// Identifier of the player's team, `0` when unaffiliated.
	team_id: i64 = "teamid" => Value::as_i64;
	/// Name of the player's team.
	team_name: &str = "team_name" => Value::as_str;
	/// Account creation date as sent by the API.
	created_datetime: &str = "created_datetime" => Value::as_str;
	/// Last login date as sent by the API.
	last_login_datetime: &str = "last_login_datetime" => Value::as_str;
}}

def_record! { PlayerStatus, "Online status returned by `getplayerstatus`.", {
	/// Numeric status code (0 offline, 1 lobby, 2 god selection, 3 in match, ...).
	status: i64 = "status" => Value::as_i64;
	/// Human-readable status.
	status_string: &str = "status_string" => Value::as_str;
	/// Identifier of the live match, `0` when not in a match.
	match_id: i64 = "match" => Value::as_i64;
	/// Personal status message.
	personal_status_message: &str = "personal_status_message" => Value::as_str;
}}

def_record! { Team, "Clan details returned by `getteamdetails`.", {
	/// Team identifier.
	team_id: i64 = "teamid" => Value::as_i64;
	/// Team name.
	name: &str = "name" => Value::as_str;
	/// Team tag.
	tag: &str = "tag" => Value::as_str;
	/// Founder's player name.
	founder: &str = "founder" => Value::as_str;
	/// Member count.
	players: i64 = "players" => Value::as_i64;
	/// Team wins.
	wins: i64 = "wins" => Value::as_i64;
	/// Team losses.
	losses: i64 = "losses" => Value::as_i64;
	/// Team rating.
	rating: i64 = "rating" => Value::as_i64;
}}

def_record! { TeamMember, "Roster entry returned by `getteamplayers`.", {
	/// Player name.
	name: &str = "name" => Value::as_str;
	/// Account level.
	account_level: i64 = "accountlevel" => Value::as_i64;
	/// Date the player joined the team.
	joined_datetime: &str = "joineddatetime" => Value::as_str;
	/// Last login date.
	last_login_datetime: &str = "lastlogindatetime" => Value::as_str;
}}

def_record! { Match, "Match history entry returned by `getmatchhistory`.", {
	/// Match identifier.
	match_id: i64 = "match" => Value::as_i64;
	/// God played.
	god: &str = "god" => Value::as_str;
	/// Queue name.
	queue: &str = "queue" => Value::as_str;
	/// `Win` or `Loss`.
	win_status: &str = "win_status" => Value::as_str;
	/// Kills.
	kills: i64 = "kills" => Value::as_i64;
	/// Deaths.
	deaths: i64 = "deaths" => Value::as_i64;
	/// Assists.
	assists: i64 = "assists" => Value::as_i64;
	/// Match duration in minutes.
	minutes: i64 = "minutes" => Value::as_i64;
	/// Match start time as sent by the API.
	match_time: &str = "match_time" => Value::as_str;
}}

/// Tagged union over every record kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum ApiRecord {
	/// See [`PlayerSummary`].
	PlayerSummary(PlayerSummary),
	/// See [`PlayerStatus`].
	PlayerStatus(PlayerStatus),
	/// See [`Team`].
	Team(Team),
	/// See [`TeamMember`].
	TeamMember(TeamMember),
	/// See [`Match`].
	Match(Match),
}
impl ApiRecord {
	/// Builds the record of `kind` around `fields`.
	pub fn from_fields(kind: RecordKind, fields: Fields) -> Self {
		match kind {
			RecordKind::PlayerSummary => PlayerSummary::from_fields(fields).into(),
			RecordKind::PlayerStatus => PlayerStatus::from_fields(fields).into(),
			RecordKind::Team => Team::from_fields(fields).into(),
			RecordKind::TeamMember => TeamMember::from_fields(fields).into(),
			RecordKind::Match => Match::from_fields(fields).into(),
		}
	}

	/// Returns the kind tag.
	pub fn kind(&self) -> RecordKind {
		match self {
			Self::PlayerSummary(_) => RecordKind::PlayerSummary,
			Self::PlayerStatus(_) => RecordKind::PlayerStatus,
			Self::Team(_) => RecordKind::Team,
			Self::TeamMember(_) => RecordKind::TeamMember,
			Self::Match(_) => RecordKind::Match,
		}
	}

	/// Returns the backing field map.
	pub fn fields(&self) -> &Fields {
		match self {
			Self::PlayerSummary(r) => r.fields(),
			Self::PlayerStatus(r) => r.fields(),
			Self::Team(r) => r.fields(),
			Self::TeamMember(r) => r.fields(),
			Self::Match(r) => r.fields(),
		}
	}
}
