pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// An error returned by the database
#[derive(Debug, Display, Error, From)]
#[display("database error: {_0}")]
pub struct DatabaseError(sqlx::Error);

impl DatabaseError
{
	/// Returns whether the connection to the database was lost or could not be established.
	pub fn is_connectivity(&self) -> bool
	{
		matches!(
			self.0,
			sqlx::Error::Io(_)
				| sqlx::Error::Tls(_)
				| sqlx::Error::PoolTimedOut
				| sqlx::Error::PoolClosed
				| sqlx::Error::WorkerCrashed
		)
	}
}
