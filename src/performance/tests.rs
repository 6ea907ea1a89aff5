use std::sync::atomic::Ordering;

use bancho::GameMode;

use super::{HitCounts, MAX_PERFORMANCE, PlayInput, calculate_group, sanitize};
use crate::ids::{MapId, ScoreId};
use crate::testing::FakeCalculator;

fn play(id: u64, mods: u32) -> PlayInput
{
	PlayInput { id: ScoreId::from(id), mods, combo: 100, hits: HitCounts::default() }
}

#[test]
fn sanitize_keeps_regular_values()
{
	assert_eq!(sanitize(0.0), 0.0);
	assert_eq!(sanitize(123.456), 123.456);
	assert_eq!(sanitize(MAX_PERFORMANCE), MAX_PERFORMANCE);
}

#[test]
fn sanitize_discards_garbage()
{
	assert_eq!(sanitize(f64::NAN), 0.0);
	assert_eq!(sanitize(f64::INFINITY), 0.0);
	assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
	assert_eq!(sanitize(MAX_PERFORMANCE + 0.001), 0.0);
	assert_eq!(sanitize(1e12), 0.0);
}

#[test]
fn nan_is_written_as_zero()
{
	let calculator = FakeCalculator::with_values([(1, 42.0), (2, f64::NAN)]);
	let results =
		calculate_group(&calculator, &MapId::from(7), GameMode::VanillaOsu, &[play(1, 0), play(2, 0)]);

	assert_eq!(results, [(ScoreId::from(1), 42.0), (ScoreId::from(2), 0.0)]);
}

#[test]
fn attributes_are_reused_per_mods()
{
	let calculator = FakeCalculator::with_values([(1, 100.0), (2, 110.0), (3, 120.0), (4, 130.0)]);
	let plays = [play(1, 0), play(2, 64), play(3, 0), play(4, 64)];
	let results = calculate_group(&calculator, &MapId::from(7), GameMode::VanillaOsu, &plays);

	assert_eq!(results.len(), 4);
	assert_eq!(calculator.from_beatmap.load(Ordering::SeqCst), 2);
	assert_eq!(calculator.from_attributes.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_calculation_is_left_out()
{
	let mut calculator = FakeCalculator::with_values([(1, 100.0), (2, 200.0), (3, 300.0)]);
	calculator.failing_scores.insert(ScoreId::from(2));

	let plays = [play(1, 0), play(2, 8), play(3, 8)];
	let results = calculate_group(&calculator, &MapId::from(7), GameMode::RelaxOsu, &plays);

	assert_eq!(results, [(ScoreId::from(1), 100.0), (ScoreId::from(3), 300.0)]);

	// the failed play must not have populated the cache
	assert_eq!(calculator.from_beatmap.load(Ordering::SeqCst), 3);
}
