//! Trait implementations for the [`sqlx`] crate.
//!
//! Grades are stored as `VARCHAR(2)`.

use sqlx::Database;
use sqlx::encode::IsNull;

use super::Grade;

impl<DB> sqlx::Type<DB> for Grade
where
	DB: Database,
	str: sqlx::Type<DB>,
{
	fn type_info() -> <DB as Database>::TypeInfo
	{
		<str as sqlx::Type<DB>>::type_info()
	}

	fn compatible(ty: &<DB as Database>::TypeInfo) -> bool
	{
		<str as sqlx::Type<DB>>::compatible(ty)
	}
}

impl<'q, DB> sqlx::Encode<'q, DB> for Grade
where
	DB: Database,
	&'q str: sqlx::Encode<'q, DB>,
{
	fn encode_by_ref(
		&self,
		buf: &mut <DB as Database>::ArgumentBuffer<'q>,
	) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>>
	{
		<&'q str as sqlx::Encode<'q, DB>>::encode_by_ref(&self.as_str(), buf)
	}
}

impl<'r, DB> sqlx::Decode<'r, DB> for Grade
where
	DB: Database,
	&'r str: sqlx::Decode<'r, DB>,
{
	fn decode(
		value: <DB as Database>::ValueRef<'r>,
	) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
	{
		<&'r str as sqlx::Decode<'r, DB>>::decode(value)?
			.parse()
			.map_err(Into::into)
	}
}
