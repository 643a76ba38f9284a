//! Per-endpoint call wrappers.

// self
use crate::{
	_prelude::*,
	client::{Client, method},
	http::ApiHttpClient,
	mapper,
	record::{Match, PlayerStatus, PlayerSummary, Team, TeamMember},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Checks the current session server-side; returns the raw status message.
	pub async fn test_session(&self) -> Result<Value> {
		self.call(method::TEST_SESSION, &[]).await
	}

	/// Returns the daily usage counters of the developer account as raw JSON.
	pub async fn data_used(&self) -> Result<Value> {
		self.call(method::GET_DATA_USED, &[]).await
	}

	/// Looks up a player profile by name or numeric identifier.
	///
	/// Fails with [`Error::NotFound`] carrying `player` when the API returns no entry.
	pub async fn player(&self, player: impl Display) -> Result<PlayerSummary> {
		let key = player.to_string();
		let value = self.call(method::GET_PLAYER, &[key.as_str()]).await?;

		mapper::single(&key, value)
	}

	/// Looks up the online status of a player.
	pub async fn player_status(&self, player: impl Display) -> Result<PlayerStatus> {
		let key = player.to_string();
		let value = self.call(method::GET_PLAYER_STATUS, &[key.as_str()]).await?;

		mapper::single(&key, value)
	}

	/// Fetches team details.
	///
	/// The API answers a missing team with an ordinary object, so this never fails with
	/// [`Error::NotFound`].
	pub async fn team(&self, team_id: impl Display) -> Result<Team> {
		let key = team_id.to_string();
		let value = self.call(method::GET_TEAM_DETAILS, &[key.as_str()]).await?;

		mapper::object(value)
	}

	/// Fetches the roster of a team.
	pub async fn team_players(&self, team_id: impl Display) -> Result<Vec<TeamMember>> {
		let key = team_id.to_string();
		let value = self.call(method::GET_TEAM_PLAYERS, &[key.as_str()]).await?;

		mapper::list(value, None)
	}

	/// Fetches the most recent matches of a player, keeping at most `limit` in server order.
	pub async fn match_history(&self, player: impl Display, limit: usize) -> Result<Vec<Match>> {
		let key = player.to_string();
		let value = self.call(method::GET_MATCH_HISTORY, &[key.as_str()]).await?;

		mapper::list(value, Some(limit))
	}
}
