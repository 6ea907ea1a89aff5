use redis::aio::MultiplexedConnection;
use redis::{Client, RedisError};
use url::Url;

use super::{Entry, LeaderboardSink};

/// An error returned by the cache.
#[derive(Debug, Display, Error, From)]
#[display("cache error: {_0}")]
pub struct CacheError(RedisError);

impl CacheError
{
	/// Returns whether the connection to the cache was lost or could not be established.
	pub fn is_connectivity(&self) -> bool
	{
		self.0.is_io_error()
			|| self.0.is_connection_refusal()
			|| self.0.is_connection_dropped()
			|| self.0.is_timeout()
	}
}

/// Leaderboards stored as sorted sets in Redis.
#[derive(Debug, Clone)]
pub struct RedisLeaderboard
{
	#[debug(skip)]
	connection: MultiplexedConnection,
	key_prefix: Box<str>,
}

impl RedisLeaderboard
{
	/// Connects to Redis and makes sure it answers commands.
	#[instrument(skip(url), fields(host = url.host_str()), err)]
	pub async fn connect(url: &Url, key_prefix: &str) -> Result<Self, CacheError>
	{
		let client = Client::open(url.as_str())?;
		let mut connection = client.get_multiplexed_async_connection().await?;
		let (): () = redis::cmd("PING").query_async(&mut connection).await?;

		debug!("connected to cache");

		Ok(Self { connection, key_prefix: Box::from(key_prefix) })
	}
}

impl LeaderboardSink for RedisLeaderboard
{
	#[instrument(level = "trace", skip_all, fields(entries = entries.len()), err)]
	async fn publish(&mut self, entries: &[Entry]) -> Result<(), CacheError>
	{
		let mut pipe = redis::pipe();

		for entry in entries {
			let member = entry.user_id.get();

			pipe.zadd(entry.global_key(&self.key_prefix), member, entry.pp)
				.ignore();

			pipe.zadd(entry.country_key(&self.key_prefix), member, entry.pp)
				.ignore();
		}

		let (): () = pipe.query_async(&mut self.connection).await?;

		Ok(())
	}
}
