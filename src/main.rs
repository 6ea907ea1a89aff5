//! nyamatrix - bulk recalculation of scores and statistics for bancho.py servers.

/*
 * nyamatrix
 *
 * Copyright (C) 2024  nyamatrix contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#[macro_use]
extern crate tracing as _;

use std::sync::Arc;

use color_eyre::Section;
use color_eyre::eyre::{self, WrapErr};
use nyamatrix::database::{self, Pool};
use nyamatrix::filter::Filter;
use nyamatrix::leaderboard::{self, RedisLeaderboard};
use nyamatrix::performance::RosuCalculator;
use nyamatrix::recalc::{self, DatabaseSink};
use nyamatrix::status::{self, FailedPlays};
use nyamatrix::{pipeline, statistics};

mod cli;
mod config;
mod runtime;
mod telemetry;

use self::cli::{Args, Command};
use self::config::Config;

fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	let args = cli::args();
	let mut config = Config::load(args.config_path.as_deref())?;

	args.apply_to_config(&mut config);

	let _guard = telemetry::init(&config.tracing).wrap_err("failed to initialize tracing")?;

	runtime::build(&config.runtime)
		.wrap_err("failed to build tokio runtime")?
		.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> eyre::Result<()>
{
	let filter = args.filter.into_filter(&config.recalculation.default_modes);
	let pool = database::connect(config.database.connect_options(config.recalculation.workers)?)
		.await
		.wrap_err("failed to connect to database")?;

	match args.command {
		Command::Performance => {
			recalc::recalculate(
				&pool,
				&filter,
				calculator(&config),
				performance_sink(&pool, &config),
				config.recalculation.options(),
			)
			.await?;
		},
		Command::Statuses { include_failed, dry_run: true } => {
			status::preview(&pool, &filter, FailedPlays::from(include_failed)).await?;
		},
		Command::Statuses { include_failed, dry_run: false } => {
			status::reconcile(&pool, &filter, FailedPlays::from(include_failed)).await?;
		},
		Command::Statistics { tiers, publish } => {
			statistics::aggregate(&pool, &filter, tiers.into()).await?;

			if publish {
				republish(&pool, &filter, &config).await?;
			}
		},
		Command::Leaderboard => {
			republish(&pool, &filter, &config).await?;
		},
		Command::Recalc { include_failed, tiers } => {
			let mut publisher = connect_cache(&config).await?;
			let options = pipeline::Options::builder()
				.recalculation(config.recalculation.options())
				.failed(FailedPlays::from(include_failed))
				.tiers(tiers.into())
				.batch_size(config.leaderboard.batch_size)
				.build();

			let outcome = pipeline::run(
				&pool,
				&filter,
				calculator(&config),
				performance_sink(&pool, &config),
				Some(&mut publisher),
				options,
			)
			.await?;

			let failed_stages = [
				("performance", outcome.performance.is_none()),
				("statuses", outcome.statuses.is_none()),
				("statistics", outcome.statistics.is_none()),
				("leaderboard", outcome.leaderboard.is_none()),
			]
			.into_iter()
			.filter_map(|(stage, failed)| failed.then_some(stage))
			.collect::<Vec<_>>();

			if !failed_stages.is_empty() {
				return Err(eyre::eyre!("some stages failed: {}", failed_stages.join(", ")))
					.suggestion("check the log for details; every stage can be re-run on its own");
			}
		},
		Command::Profile { user, mode } => {
			let profile = statistics::profile(&pool, user, mode).await?;

			info!(
				%user,
				%mode,
				plays = profile.computed.plays,
				weighted = profile.computed.weighted,
				bonus = profile.computed.bonus,
				pp = profile.computed.total(),
				accuracy = profile.computed.accuracy,
				stored_pp = profile.stored.map(|stored| stored.pp),
				stored_accuracy = profile.stored.map(|stored| stored.acc),
				"computed profile",
			);
		},
	}

	info!("done");

	Ok(())
}

fn calculator(config: &Config) -> Arc<RosuCalculator>
{
	Arc::new(RosuCalculator::new(config.beatmaps.directory.clone()))
}

fn performance_sink(pool: &Pool, config: &Config) -> Arc<DatabaseSink>
{
	Arc::new(DatabaseSink::new(pool.clone(), config.recalculation.write_chunk_size))
}

async fn connect_cache(config: &Config) -> eyre::Result<RedisLeaderboard>
{
	RedisLeaderboard::connect(&config.cache.url, &config.cache.key_prefix)
		.await
		.wrap_err("failed to connect to cache")
		.suggestion("check `cache.url` in the configuration file or pass `--redis-url`")
}

async fn republish(pool: &Pool, filter: &Filter, config: &Config) -> eyre::Result<u64>
{
	let mut publisher = connect_cache(config).await?;
	let published = leaderboard::republish(
		pool,
		filter,
		&mut publisher,
		config.leaderboard.batch_size,
		config.recalculation.progress_interval,
	)
	.await?;

	Ok(published)
}
