//! A recording counterpart to [`sqlx::QueryBuilder`].
//!
//! [`sqlx::QueryBuilder`] keeps its arguments encoded and out of reach once they are pushed. The
//! builder here records them as [`Param`]s instead, so a finished [`Sql`] can be compared,
//! inspected in tests, and bound to a fresh [`sqlx::query()`] every time it is executed.

use sqlx::FromRow;
use sqlx::query::{Query, QueryAs};
use time::OffsetDateTime;

use crate::database::{Arguments, DB, Row};

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param
{
	Int(i64),
	Time(OffsetDateTime),
}

impl From<i64> for Param
{
	fn from(value: i64) -> Self
	{
		Self::Int(value)
	}
}

impl From<OffsetDateTime> for Param
{
	fn from(value: OffsetDateTime) -> Self
	{
		Self::Time(value)
	}
}

/// A finished query: SQL text with `?` placeholders and the values for them, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql
{
	text: String,
	params: Vec<Param>,
}

impl Sql
{
	pub fn text(&self) -> &str
	{
		&self.text
	}

	pub fn params(&self) -> &[Param]
	{
		&self.params
	}

	/// Prepares the query for execution.
	pub fn query(&self) -> Query<'_, DB, Arguments>
	{
		self.params
			.iter()
			.fold(sqlx::query(&self.text), |query, param| match *param {
				Param::Int(value) => query.bind(value),
				Param::Time(value) => query.bind(value),
			})
	}

	/// Prepares the query for execution, mapping every row to a `T`.
	pub fn query_as<T>(&self) -> QueryAs<'_, DB, T, Arguments>
	where
		T: for<'r> FromRow<'r, Row>,
	{
		self.params
			.iter()
			.fold(sqlx::query_as(&self.text), |query, param| match *param {
				Param::Int(value) => query.bind(value),
				Param::Time(value) => query.bind(value),
			})
	}
}

/// Incrementally builds an [`Sql`].
///
/// Only fixed SQL goes through [`push()`]; every value goes through [`push_bind()`] or
/// [`push_list()`].
///
/// [`push()`]: SqlBuilder::push
/// [`push_bind()`]: SqlBuilder::push_bind
/// [`push_list()`]: SqlBuilder::push_list
#[derive(Debug, Default)]
pub struct SqlBuilder
{
	text: String,
	params: Vec<Param>,
}

impl SqlBuilder
{
	pub fn new(init: &str) -> Self
	{
		Self { text: String::from(init), params: Vec::new() }
	}

	pub fn push(&mut self, sql: &str) -> &mut Self
	{
		self.text.push_str(sql);
		self
	}

	pub fn push_bind(&mut self, value: impl Into<Param>) -> &mut Self
	{
		self.text.push('?');
		self.params.push(value.into());
		self
	}

	/// Pushes a parenthesized, comma separated list of placeholders, e.g. `(?, ?, ?)`.
	pub fn push_list<I>(&mut self, values: I) -> &mut Self
	where
		I: IntoIterator<Item: Into<Param>>,
	{
		self.text.push('(');

		for (idx, value) in values.into_iter().enumerate() {
			if idx > 0 {
				self.text.push_str(", ");
			}

			self.push_bind(value);
		}

		self.text.push(')');
		self
	}

	pub fn build(self) -> Sql
	{
		Sql { text: self.text, params: self.params }
	}
}
