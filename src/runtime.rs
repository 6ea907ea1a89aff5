use std::io;

use tokio::runtime::{Builder, Runtime};

use crate::config::RuntimeConfig;

pub(crate) fn build(config: &RuntimeConfig) -> io::Result<Runtime>
{
	let mut builder = Builder::new_multi_thread();

	builder.enable_time();
	builder.enable_io();

	if let Some(threads) = config.worker_threads {
		builder.worker_threads(threads.get());
	}

	if let Some(threads) = config.max_blocking_threads {
		builder.max_blocking_threads(threads.get());
	}

	builder.build()
}
