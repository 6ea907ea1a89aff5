use bancho::GameMode;

use super::{Sql, SqlBuilder};
use crate::filter::Filter;
use crate::ids::UserId;
use crate::statistics::Tiers;

/// Recomputes the statistics of every user and mode selected by `filter`.
///
/// Only the `modes` and `user_ids` of the filter apply. Returns [`None`] if no tier is enabled.
pub fn aggregate_statistics(filter: &Filter, tiers: Tiers) -> Option<Sql>
{
	if tiers.is_empty() {
		return None;
	}

	let mut sql = SqlBuilder::new("WITH ");
	let mut separator = "";

	if tiers.performance {
		sql.push(separator);
		sql.push(
			"performance AS (SELECT b.userid, b.mode, \
			 SUM(POW(0.95, b.position - 1) * b.pp) + (1 - POW(0.9994, COUNT(*))) * 416.6667 AS pp, \
			 SUM(POW(0.95, b.position - 1) * b.acc) / SUM(POW(0.95, b.position - 1)) AS acc \
			 FROM (SELECT s.userid, s.mode, s.pp, s.acc, ROW_NUMBER() OVER (PARTITION BY s.userid, \
			 s.mode ORDER BY s.pp DESC, s.acc DESC, s.id DESC) AS position \
			 FROM scores s WHERE s.status = 2 AND s.pp > 0",
		);
		push_scope(&mut sql, filter, ("s.mode", "s.userid"), " AND ");
		sql.push(") b GROUP BY b.userid, b.mode)");
		separator = ", ";
	}

	if tiers.lifetime {
		sql.push(separator);
		sql.push(
			"lifetime AS (SELECT s.userid, s.mode, SUM(s.score) AS total_score, \
			 SUM(s.time_elapsed) AS playtime, SUM(s.grade = 'XH') AS xh_count, \
			 SUM(s.grade = 'X') AS x_count, SUM(s.grade = 'S') AS s_count, \
			 SUM(s.grade = 'A') AS a_count FROM scores s",
		);
		push_scope(&mut sql, filter, ("s.mode", "s.userid"), " WHERE ");
		sql.push(" GROUP BY s.userid, s.mode)");
		separator = ", ";
	}

	if tiers.ranked {
		sql.push(separator);
		sql.push(
			"ranked AS (SELECT s.userid, s.mode, SUM(s.score) AS ranked_score FROM scores s \
			 INNER JOIN maps m ON m.md5 = s.map_md5 WHERE s.status = 2 AND m.status IN (2, 3)",
		);
		push_scope(&mut sql, filter, ("s.mode", "s.userid"), " AND ");
		sql.push(" GROUP BY s.userid, s.mode)");
	}

	sql.push(" UPDATE stats st");

	let mut assignments = Vec::new();

	if tiers.performance {
		sql.push(" LEFT JOIN performance p ON p.userid = st.id AND p.mode = st.mode");
		assignments.extend(["st.pp = COALESCE(p.pp, 0)", "st.acc = COALESCE(p.acc, 0)"]);
	}

	if tiers.lifetime {
		sql.push(" LEFT JOIN lifetime l ON l.userid = st.id AND l.mode = st.mode");
		assignments.extend([
			"st.tscore = COALESCE(l.total_score, 0)",
			"st.playtime = COALESCE(l.playtime, 0)",
			"st.xh_count = COALESCE(l.xh_count, 0)",
			"st.x_count = COALESCE(l.x_count, 0)",
			"st.s_count = COALESCE(l.s_count, 0)",
			"st.a_count = COALESCE(l.a_count, 0)",
		]);
	}

	if tiers.ranked {
		sql.push(" LEFT JOIN ranked r ON r.userid = st.id AND r.mode = st.mode");
		assignments.push("st.rscore = COALESCE(r.ranked_score, 0)");
	}

	sql.push(" SET ");
	sql.push(&assignments.join(", "));
	push_scope(&mut sql, filter, ("st.mode", "st.id"), " WHERE ");

	Some(sql.build())
}

/// Selects the leaderboard-relevant statistics of every user and mode selected by `filter`.
pub fn leaderboard_rows(filter: &Filter) -> Sql
{
	let mut sql = SqlBuilder::new(
		"SELECT st.id, st.mode, st.pp, u.country, u.priv FROM stats st INNER JOIN users u ON u.id \
		 = st.id",
	);

	push_scope(&mut sql, filter, ("st.mode", "st.id"), " WHERE ");
	sql.push(" ORDER BY st.mode, st.id");
	sql.build()
}

/// Counts the rows [`leaderboard_rows()`] would return.
pub fn count_leaderboard_rows(filter: &Filter) -> Sql
{
	let mut sql = SqlBuilder::new("SELECT COUNT(*) FROM stats st");

	push_scope(&mut sql, filter, ("st.mode", "st.id"), " WHERE ");
	sql.build()
}

/// Selects the picked plays of a single user, best first.
pub fn picked_plays(user_id: UserId, mode: GameMode) -> Sql
{
	let mut sql = SqlBuilder::new("SELECT s.id, s.pp, s.acc FROM scores s WHERE s.userid = ");

	sql.push_bind(i64::from(user_id.get()));
	sql.push(" AND s.mode = ").push_bind(i64::from(u8::from(mode)));
	sql.push(" AND s.status = 2 AND s.pp > 0 ORDER BY s.pp DESC, s.acc DESC, s.id DESC");
	sql.build()
}

/// Selects the stored pp and accuracy of a single user.
pub fn stored_statistics(user_id: UserId, mode: GameMode) -> Sql
{
	let mut sql = SqlBuilder::new("SELECT st.pp, st.acc FROM stats st WHERE st.id = ");

	sql.push_bind(i64::from(user_id.get()));
	sql.push(" AND st.mode = ").push_bind(i64::from(u8::from(mode)));
	sql.build()
}

/// Restricts the given `(mode, user)` columns to the modes and users of `filter`.
///
/// `joiner` goes before the first condition.
fn push_scope(sql: &mut SqlBuilder, filter: &Filter, (mode, user): (&str, &str), joiner: &str)
{
	let mut joiner = joiner;

	if !filter.modes.is_empty() {
		sql.push(joiner).push(mode).push(" IN ");
		sql.push_list(filter.modes.iter().map(|&game_mode| i64::from(u8::from(game_mode))));
		joiner = " AND ";
	}

	if !filter.user_ids.is_empty() {
		sql.push(joiner).push(user).push(" IN ");
		sql.push_list(filter.user_ids.iter().map(|user_id| i64::from(user_id.get())));
	}
}
