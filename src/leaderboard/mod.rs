//! Leaderboard publishing.
//!
//! Every user with statistics in a mode gets an entry in the global leaderboard of that mode and
//! in the leaderboard of their country. Entries are only ever added or updated; users that lost
//! their statistics or became restricted keep whatever entry they already had.

use std::num::NonZero;

use bancho::{GameMode, Privileges};
use futures_util::TryStreamExt as _;

use crate::database::{DatabaseError, Pool, RowStream};
use crate::filter::Filter;
use crate::ids::UserId;
use crate::progress::Progress;
use crate::query;

mod cache;
pub use cache::{CacheError, RedisLeaderboard};


/// The key prefix used by bancho.py.
pub const DEFAULT_KEY_PREFIX: &str = "bancho:leaderboard";

/// The default number of rows sent to the cache at once.
pub const DEFAULT_BATCH_SIZE: NonZero<usize> = match NonZero::new(1000) {
	Some(size) => size,
	None => unreachable!(),
};

/// A row of `stats` joined with its user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatsRow
{
	pub id: UserId,
	pub mode: GameMode,
	pub pp: u32,
	pub country: String,

	#[sqlx(rename = "priv")]
	pub privileges: Privileges,
}

impl StatsRow
{
	/// Returns the leaderboard entry for this row, or [`None`] if the user should not show up
	/// on leaderboards.
	pub fn entry(&self) -> Option<Entry>
	{
		self.privileges.is_unrestricted().then(|| Entry {
			user_id: self.id,
			mode: self.mode,
			country: Box::from(self.country.as_str()),
			pp: f64::from(self.pp),
		})
	}
}

/// A user's position on the leaderboards of a mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry
{
	pub user_id: UserId,
	pub mode: GameMode,
	pub country: Box<str>,
	pub pp: f64,
}

impl Entry
{
	/// The key of the global leaderboard this entry belongs to.
	pub fn global_key(&self, prefix: &str) -> String
	{
		format!("{prefix}:{}", u8::from(self.mode))
	}

	/// The key of the country leaderboard this entry belongs to.
	pub fn country_key(&self, prefix: &str) -> String
	{
		format!("{prefix}:{}:{}", u8::from(self.mode), self.country)
	}
}

/// Where leaderboard entries end up.
pub trait LeaderboardSink: Send
{
	/// Upserts a batch of entries.
	fn publish(&mut self, entries: &[Entry]) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// An error that can occur while publishing leaderboards.
#[derive(Debug, Display, Error, From)]
pub enum PublishError
{
	#[display("failed to read statistics: {_0}")]
	Database(DatabaseError),

	#[display("failed to publish entries: {_0}")]
	Cache(CacheError),
}

/// Publishes the statistics of every user and mode selected by `filter`.
///
/// Only the `modes` and `user_ids` of the filter apply. Returns the number of published rows.
#[instrument(skip(pool, sink), err)]
pub async fn republish<S>(
	pool: &Pool,
	filter: &Filter,
	sink: &mut S,
	batch_size: NonZero<usize>,
	progress_interval: NonZero<u64>,
) -> Result<u64, PublishError>
where
	S: LeaderboardSink,
{
	let (total,) = query::count_leaderboard_rows(filter)
		.query_as::<(i64,)>()
		.fetch_one(pool)
		.await
		.map_err(DatabaseError::from)?;

	let total = u64::try_from(total).unwrap_or_default();
	let progress = Progress::new("leaderboard", total, progress_interval);

	let sql = query::leaderboard_rows(filter);
	let rows = sql
		.query_as::<StatsRow>()
		.fetch(pool)
		.map_err(DatabaseError::from);

	let published = publish(rows, sink, batch_size, &progress).await?;

	info!(published, total, "published leaderboards");

	Ok(published)
}

/// Turns `rows` into entries and hands them to `sink` in batches of `batch_size`.
///
/// Rows of restricted users are skipped. Returns the number of published rows.
pub(crate) async fn publish<S>(
	mut rows: impl RowStream<'_, StatsRow>,
	sink: &mut S,
	batch_size: NonZero<usize>,
	progress: &Progress,
) -> Result<u64, PublishError>
where
	S: LeaderboardSink,
{
	let mut batch = Vec::with_capacity(batch_size.get());
	let mut published = 0_u64;

	while let Some(row) = rows.try_next().await? {
		progress.advance(1);

		let Some(entry) = row.entry() else {
			trace!(user_id = %row.id, "skipping restricted user");
			continue;
		};

		batch.push(entry);

		if batch.len() >= batch_size.get() {
			sink.publish(&batch).await?;
			published += batch.len() as u64;
			batch.clear();
		}
	}

	if !batch.is_empty() {
		sink.publish(&batch).await?;
		published += batch.len() as u64;
	}

	Ok(published)
}
