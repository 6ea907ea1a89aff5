use super::plays::{JOIN_PARTITIONS, push_partitions};
use super::{Conditions, Predicate, Sql, SqlBuilder};
use crate::filter::Filter;
use crate::status::FailedPlays;

/// Picks the best play of every `(user, mode, beatmap)` touched by `filter` and updates the
/// status of all plays in those partitions.
///
/// The best play is the first eligible one (positive pp, not failed) ordered by pp, score and
/// id, all descending. Each updated play gets the first matching status out of:
///
/// 1. DNF if it is failed and `failed` is [`FailedPlays::Include`]
/// 2. picked if it is the best play
/// 3. DNF if it has no positive pp
/// 4. normal if it was picked before
/// 5. whatever it was before
pub fn reconcile_statuses(filter: &Filter, failed: FailedPlays) -> Sql
{
	let mut sql = SqlBuilder::default();

	push_partitions(&mut sql, filter);

	sql.push(", ranked AS (SELECT s.id, ROW_NUMBER() OVER (PARTITION BY s.userid, s.mode, s.map_md5 ");
	sql.push("ORDER BY s.pp DESC, s.score DESC, s.id DESC) AS position FROM scores s");
	sql.push(JOIN_PARTITIONS);
	sql.push(" WHERE s.pp > 0 AND s.grade != 'F')");
	sql.push(", picked AS (SELECT id FROM ranked WHERE position = 1)");

	sql.push(" UPDATE scores s");
	sql.push(JOIN_PARTITIONS);
	sql.push(" LEFT JOIN picked b ON b.id = s.id SET s.status = CASE");

	if failed == FailedPlays::Include {
		sql.push(" WHEN s.grade = 'F' THEN 0");
	}

	sql.push(" WHEN b.id IS NOT NULL THEN 2");
	sql.push(" WHEN s.pp <= 0 THEN 0");
	sql.push(" WHEN s.status = 2 THEN 1");
	sql.push(" ELSE s.status END");

	if failed == FailedPlays::Exclude {
		Conditions::default()
			.and(Predicate::NotFailed)
			.render_where(&mut sql);
	}

	sql.build()
}
