//! Declarative filters over plays.
//!
//! A [`Filter`] only describes which rows a stage should touch; turning it into SQL is the job of
//! the [`query`] module. Every field is optional and an empty field never restricts anything.
//!
//! [`query`]: crate::query

use std::collections::BTreeSet;

use bancho::{GameMode, MapMode, MapStatus, ScoreStatus};
use time::OffsetDateTime;

use crate::ids::UserId;

/// Restricts which plays (and users) a stage operates on.
///
/// Sets are ordered so the generated queries are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq, bon::Builder)]
pub struct Filter
{
	/// Modes the play was submitted in.
	#[builder(default, into)]
	pub modes: BTreeSet<GameMode>,

	/// Modes of the beatmap the play was set on.
	#[builder(default, into)]
	pub map_modes: BTreeSet<MapMode>,

	/// Statuses of the play.
	///
	/// If this is empty, only plays with a status other than [`ScoreStatus::Dnf`] match.
	#[builder(default, into)]
	pub score_statuses: BTreeSet<ScoreStatus>,

	/// Ranked statuses of the beatmap the play was set on.
	#[builder(default, into)]
	pub map_statuses: BTreeSet<MapStatus>,

	/// Users who submitted the play.
	#[builder(default, into)]
	pub user_ids: BTreeSet<UserId>,

	/// When the play was submitted.
	#[builder(default)]
	pub played: TimeWindow,
}

/// A half-open time range `[after, before)`.
///
/// Either bound may be missing. A window whose `after` is not earlier than its `before` is valid
/// and matches nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow
{
	pub after: Option<OffsetDateTime>,
	pub before: Option<OffsetDateTime>,
}

impl TimeWindow
{
	/// Everything at or after `timestamp`.
	pub const fn after(timestamp: OffsetDateTime) -> Self
	{
		Self { after: Some(timestamp), before: None }
	}

	/// Everything before `timestamp`.
	pub const fn before(timestamp: OffsetDateTime) -> Self
	{
		Self { after: None, before: Some(timestamp) }
	}

	/// Everything in `[after, before)`.
	pub const fn between(after: OffsetDateTime, before: OffsetDateTime) -> Self
	{
		Self { after: Some(after), before: Some(before) }
	}
}
