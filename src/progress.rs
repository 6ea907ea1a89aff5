use std::num::NonZero;
use std::sync::atomic::{self, AtomicU64};

/// Counts processed items and logs every time another `interval` of them is done.
#[derive(Debug)]
pub(crate) struct Progress
{
	stage: &'static str,
	total: u64,
	interval: NonZero<u64>,
	processed: AtomicU64,
}

impl Progress
{
	pub(crate) const fn new(stage: &'static str, total: u64, interval: NonZero<u64>) -> Self
	{
		Self { stage, total, interval, processed: AtomicU64::new(0) }
	}

	pub(crate) fn advance(&self, amount: u64)
	{
		let before = self.processed.fetch_add(amount, atomic::Ordering::Relaxed);
		let after = before + amount;
		let interval = self.interval.get();

		if (before / interval != after / interval) || (after == self.total && amount > 0) {
			info!(stage = self.stage, processed = after, total = self.total, "{}", self.percentage(after));
		}
	}

	pub(crate) fn processed(&self) -> u64
	{
		self.processed.load(atomic::Ordering::Relaxed)
	}

	#[expect(clippy::cast_precision_loss, reason = "only used for display")]
	fn percentage(&self, processed: u64) -> String
	{
		if self.total == 0 {
			return String::from("100.0%");
		}

		format!("{:.1}%", (processed as f64 / self.total as f64) * 100.0)
	}
}

#[cfg(test)]
mod tests
{
	use std::num::NonZero;

	use super::Progress;

	#[test]
	fn counts_across_calls()
	{
		let progress = Progress::new("test", 10, NonZero::<u64>::MIN);

		progress.advance(3);
		progress.advance(0);
		progress.advance(7);

		assert_eq!(progress.processed(), 10);
		assert_eq!(progress.percentage(5), "50.0%");
	}
}
