//! SQL generation.
//!
//! Every query is built from a [`Filter`] and comes out as an [`Sql`]: plain text with `?`
//! placeholders plus the values for them. Building the same query from the same input always
//! produces the same text and the same parameters.
//!
//! Table aliases are fixed: `scores s`, `maps m`, `stats st`, `users u`.
//!
//! [`Filter`]: crate::filter::Filter

mod builder;
pub use builder::{Param, Sql, SqlBuilder};

mod predicate;
pub use predicate::{Conditions, Predicate};

mod plays;
pub use plays::{count_plays, group_plays, partition_plays};

mod status;
pub use status::reconcile_statuses;

mod statistics;
pub use statistics::{
	aggregate_statistics,
	count_leaderboard_rows,
	leaderboard_rows,
	picked_plays,
	stored_statistics,
};
