use bancho::GameMode;
use futures_util::{Stream, TryStreamExt as _, future};

use crate::database::{DatabaseError, DatabaseResult, Pool, RowStream};
use crate::ids::{MapId, ScoreId};
use crate::performance::{HitCounts, PlayInput};
use crate::query::Sql;
use crate::stream::TryStreamExt as _;

/// Plays that share a beatmap (by hash) and mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Group
{
	pub map_id: MapId,
	pub map_md5: Box<str>,
	pub mode: GameMode,
	pub plays: Vec<PlayInput>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct PlayRow
{
	pub map_id: MapId,
	pub map_md5: String,
	pub mode: GameMode,
	pub id: ScoreId,
	pub mods: i32,
	pub max_combo: i32,
	pub ngeki: i32,
	pub n300: i32,
	pub nkatu: i32,
	pub n100: i32,
	pub n50: i32,
	pub nmiss: i32,
}

impl PlayRow
{
	fn into_input(self) -> PlayInput
	{
		PlayInput {
			id: self.id,
			mods: unsigned(self.mods),
			combo: unsigned(self.max_combo),
			hits: HitCounts {
				geki: unsigned(self.ngeki),
				n300: unsigned(self.n300),
				katu: unsigned(self.nkatu),
				n100: unsigned(self.n100),
				n50: unsigned(self.n50),
				misses: unsigned(self.nmiss),
			},
		}
	}
}

/// Streams the plays selected by a [`group_plays()`] query, grouped by beatmap and mode.
///
/// Rows are pulled from the database as the groups are consumed.
///
/// [`group_plays()`]: crate::query::group_plays
pub fn read_groups<'a>(
	pool: &'a Pool,
	sql: &'a Sql,
) -> impl Stream<Item = DatabaseResult<Group>> + Send + 'a
{
	group_rows(sql.query_as::<PlayRow>().fetch(pool).map_err(DatabaseError::from))
}

pub(crate) fn group_rows<'a>(
	rows: impl RowStream<'a, PlayRow>,
) -> impl Stream<Item = DatabaseResult<Group>> + Send + 'a
{
	// `maps.id` is only unique per server, the hash is unique across all of them
	rows.try_group_by(|row| (row.map_md5.clone(), row.mode))
		.try_filter_map(|((map_md5, mode), rows)| {
			let map_id = rows.first().map(|row| row.map_id);
			let group = map_id.map(|map_id| Group {
				map_id,
				map_md5: map_md5.into_boxed_str(),
				mode,
				plays: rows.into_iter().map(PlayRow::into_input).collect(),
			});

			future::ready(Ok(group))
		})
}

/// Hit counts and mods are never negative, the columns just happen to be signed.
fn unsigned(value: i32) -> u32
{
	u32::try_from(value).unwrap_or_default()
}
