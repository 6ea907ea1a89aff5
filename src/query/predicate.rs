use bancho::{GameMode, MapMode, MapStatus, ScoreStatus};
use time::OffsetDateTime;

use super::SqlBuilder;
use crate::filter::Filter;
use crate::ids::UserId;

/// A single condition on plays (`scores s`) joined with their beatmap (`maps m`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate
{
	/// `s.status > 0`
	Eligible,

	/// `s.status IN (…)`
	ScoreStatusIn(Vec<ScoreStatus>),

	/// `s.mode IN (…)`
	ModeIn(Vec<GameMode>),

	/// `s.userid IN (…)`
	UserIn(Vec<UserId>),

	/// `m.status IN (…)`
	MapStatusIn(Vec<MapStatus>),

	/// `m.mode IN (…)`
	MapModeIn(Vec<MapMode>),

	/// `s.play_time >= ?`
	PlayedAfter(OffsetDateTime),

	/// `s.play_time < ?`
	PlayedBefore(OffsetDateTime),

	/// `s.grade != 'F'`
	NotFailed,
}

impl Predicate
{
	pub fn render(&self, sql: &mut SqlBuilder)
	{
		match self {
			Self::Eligible => {
				sql.push("s.status > 0");
			},
			Self::ScoreStatusIn(statuses) => {
				sql.push("s.status IN ")
					.push_list(statuses.iter().map(|&status| i64::from(i8::from(status))));
			},
			Self::ModeIn(modes) => {
				sql.push("s.mode IN ")
					.push_list(modes.iter().map(|&mode| i64::from(u8::from(mode))));
			},
			Self::UserIn(user_ids) => {
				sql.push("s.userid IN ")
					.push_list(user_ids.iter().map(|user_id| i64::from(user_id.get())));
			},
			Self::MapStatusIn(statuses) => {
				sql.push("m.status IN ")
					.push_list(statuses.iter().map(|&status| i64::from(i8::from(status))));
			},
			Self::MapModeIn(modes) => {
				sql.push("m.mode IN ")
					.push_list(modes.iter().map(|&mode| i64::from(u8::from(mode))));
			},
			Self::PlayedAfter(timestamp) => {
				sql.push("s.play_time >= ").push_bind(*timestamp);
			},
			Self::PlayedBefore(timestamp) => {
				sql.push("s.play_time < ").push_bind(*timestamp);
			},
			Self::NotFailed => {
				sql.push("s.grade != 'F'");
			},
		}
	}
}

/// A conjunction of [`Predicate`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Conditions(Vec<Predicate>);

impl Conditions
{
	/// Translates a [`Filter`] into conditions on `scores s` joined with `maps m`.
	///
	/// The order of the predicates is fixed, and a missing status filter turns into
	/// [`Predicate::Eligible`], so this never returns an empty set of conditions.
	pub fn for_plays(filter: &Filter) -> Self
	{
		let mut predicates = Vec::new();

		if filter.score_statuses.is_empty() {
			predicates.push(Predicate::Eligible);
		} else {
			predicates.push(Predicate::ScoreStatusIn(filter.score_statuses.iter().copied().collect()));
		}

		if !filter.modes.is_empty() {
			predicates.push(Predicate::ModeIn(filter.modes.iter().copied().collect()));
		}

		if !filter.user_ids.is_empty() {
			predicates.push(Predicate::UserIn(filter.user_ids.iter().copied().collect()));
		}

		if !filter.map_statuses.is_empty() {
			predicates.push(Predicate::MapStatusIn(filter.map_statuses.iter().copied().collect()));
		}

		if !filter.map_modes.is_empty() {
			predicates.push(Predicate::MapModeIn(filter.map_modes.iter().copied().collect()));
		}

		if let Some(after) = filter.played.after {
			predicates.push(Predicate::PlayedAfter(after));
		}

		if let Some(before) = filter.played.before {
			predicates.push(Predicate::PlayedBefore(before));
		}

		Self(predicates)
	}

	pub fn and(mut self, predicate: Predicate) -> Self
	{
		self.0.push(predicate);
		self
	}

	pub fn predicates(&self) -> &[Predicate]
	{
		&self.0
	}

	/// Pushes ` WHERE a AND b …`, or nothing at all if there are no conditions.
	pub fn render_where(&self, sql: &mut SqlBuilder)
	{
		for (idx, predicate) in self.0.iter().enumerate() {
			sql.push(if idx == 0 { " WHERE " } else { " AND " });
			predicate.render(sql);
		}
	}
}
