//! Database plumbing.

use std::num::NonZero;
use std::thread;

use sqlx::pool::PoolOptions;
use url::Url;

mod error;
pub use error::{DatabaseError, DatabaseResult};

mod row_stream;
pub use row_stream::RowStream;

pub type DB = sqlx::MySql;
pub type Pool = sqlx::Pool<DB>;
pub type Row = sqlx::mysql::MySqlRow;
pub type Arguments = sqlx::mysql::MySqlArguments;
pub type QueryBuilder<'args> = sqlx::QueryBuilder<'args, DB>;

/// Options for [`connect()`].
#[derive(Debug, bon::Builder)]
pub struct ConnectOptions<'a>
{
	url: &'a Url,

	#[builder(default = 1)]
	min_connections: u32,

	/// Defaults to the number of available CPUs.
	max_connections: Option<NonZero<u32>>,

	/// How many tasks write while a reader holds a connection open.
	///
	/// The pool always has room for the reader plus this many writers.
	#[builder(default = 0)]
	concurrent_writers: usize,
}

impl ConnectOptions<'_>
{
	/// The number of connections the pool may open.
	pub fn pool_size(&self) -> u32
	{
		let required = u32::try_from(self.concurrent_writers)
			.unwrap_or(u32::MAX)
			.saturating_add(1);

		self.max_connections
			.map_or_else(core_count, NonZero::get)
			.max(self.min_connections)
			.max(required)
	}
}

/// Connects to the database and makes sure it answers queries.
#[instrument(skip_all, fields(host = options.url.host_str()), err)]
pub async fn connect(options: ConnectOptions<'_>) -> DatabaseResult<Pool>
{
	let max_connections = options.pool_size();

	if let Some(configured) = options.max_connections.filter(|max| max.get() < max_connections) {
		warn!(configured = configured.get(), max_connections, "raising connection limit to fit every worker");
	}

	let pool = PoolOptions::<DB>::new()
		.min_connections(options.min_connections)
		.max_connections(max_connections)
		.connect(options.url.as_str())
		.await?;

	sqlx::query("SELECT 1").execute(&pool).await?;

	debug!(min_connections = options.min_connections, max_connections, "connected to database");

	Ok(pool)
}

fn core_count() -> u32
{
	thread::available_parallelism()
		.ok()
		.and_then(|count| u32::try_from(count.get()).ok())
		.unwrap_or(4)
}

#[cfg(test)]
mod tests
{
	use std::num::NonZero;

	use url::Url;

	use super::ConnectOptions;

	fn url() -> Url
	{
		Url::parse("mysql://bancho@localhost/banchopy").unwrap()
	}

	#[test]
	fn pool_fits_the_reader_and_every_writer()
	{
		let url = url();
		let options = ConnectOptions::builder()
			.url(&url)
			.max_connections(NonZero::new(1).unwrap())
			.concurrent_writers(4)
			.build();

		assert_eq!(options.pool_size(), 5);
	}

	#[test]
	fn larger_limits_are_kept()
	{
		let url = url();
		let options = ConnectOptions::builder()
			.url(&url)
			.min_connections(2)
			.max_connections(NonZero::new(16).unwrap())
			.concurrent_writers(4)
			.build();

		assert_eq!(options.pool_size(), 16);
	}

	#[test]
	fn single_connection_without_writers()
	{
		let url = url();
		let options = ConnectOptions::builder()
			.url(&url)
			.max_connections(NonZero::new(1).unwrap())
			.build();

		assert_eq!(options.pool_size(), 1);
	}
}
