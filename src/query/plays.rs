use super::{Conditions, Predicate, Sql, SqlBuilder};
use crate::filter::Filter;
use crate::status::FailedPlays;

const PLAYS_WITH_MAPS: &str = " FROM scores s INNER JOIN maps m ON m.md5 = s.map_md5";

pub(super) const JOIN_PARTITIONS: &str = " INNER JOIN partitions p ON p.userid = s.userid AND \
                                          p.mode = s.mode AND p.map_md5 = s.map_md5";

/// Counts the plays matching `filter`.
///
/// The result has a single `BIGINT` column.
pub fn count_plays(filter: &Filter) -> Sql
{
	let mut sql = SqlBuilder::new("SELECT COUNT(*)");

	sql.push(PLAYS_WITH_MAPS);
	Conditions::for_plays(filter).render_where(&mut sql);
	sql.build()
}

/// Selects the performance inputs of every play matching `filter`.
///
/// Rows are sorted by beatmap hash, mode and play, so plays sharing a beatmap and mode are
/// adjacent.
pub fn group_plays(filter: &Filter) -> Sql
{
	let mut sql = SqlBuilder::new(
		"SELECT m.id AS map_id, s.map_md5, s.mode, s.id, s.mods, s.max_combo, s.ngeki, s.n300, \
		 s.nkatu, s.n100, s.n50, s.nmiss",
	);

	sql.push(PLAYS_WITH_MAPS);
	Conditions::for_plays(filter).render_where(&mut sql);
	sql.push(" ORDER BY s.map_md5, s.mode, s.id");
	sql.build()
}

/// Selects every play of every `(user, mode, beatmap)` that has at least one play matching
/// `filter`.
///
/// Rows are sorted by user, mode, beatmap and play. Failed plays are only included if they may
/// be updated.
pub fn partition_plays(filter: &Filter, failed: FailedPlays) -> Sql
{
	let mut sql = SqlBuilder::default();

	push_partitions(&mut sql, filter);
	sql.push(
		" SELECT s.id, s.userid, s.mode, s.map_md5, s.pp, s.score, s.grade, s.status FROM scores s",
	);
	sql.push(JOIN_PARTITIONS);

	if failed == FailedPlays::Exclude {
		Conditions::default()
			.and(Predicate::NotFailed)
			.render_where(&mut sql);
	}

	sql.push(" ORDER BY s.userid, s.mode, s.map_md5, s.id");
	sql.build()
}

/// Pushes a `WITH partitions AS (…)` clause holding every `(userid, mode, map_md5)` that has at
/// least one play matching `filter`.
pub(super) fn push_partitions(sql: &mut SqlBuilder, filter: &Filter)
{
	sql.push("WITH partitions AS (SELECT DISTINCT s.userid, s.mode, s.map_md5");
	sql.push(PLAYS_WITH_MAPS);
	Conditions::for_plays(filter).render_where(sql);
	sql.push(")");
}
