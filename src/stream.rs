use std::mem;
use std::pin::Pin;
use std::task::{self, Poll, ready};

use futures_util::stream::{Fuse, FusedStream, StreamExt as _};
use futures_util::{Stream, TryStream};

pub(crate) trait TryStreamExt: TryStream
{
	/// Folds runs of adjacent items with the same key into `(key, items)` pairs.
	///
	/// The underlying stream has to be sorted by that key, otherwise a key can show up more than
	/// once. The first error ends the stream; the run that was being collected is discarded.
	fn try_group_by<K, F>(self, key: F) -> GroupBy<Self, K, F>
	where
		Self: Sized + Stream<Item = Result<Self::Ok, Self::Error>>,
		K: PartialEq,
		F: FnMut(&Self::Ok) -> K,
	{
		GroupBy { stream: self.fuse(), key, current: None, failed: false }
	}
}

impl<S: TryStream> TryStreamExt for S
{
}

#[pin_project]
#[derive(Debug)]
pub(crate) struct GroupBy<S, K, F>
where
	S: TryStream,
{
	#[pin]
	stream: Fuse<S>,
	key: F,
	current: Option<(K, Vec<S::Ok>)>,
	failed: bool,
}

impl<S, K, F> Stream for GroupBy<S, K, F>
where
	S: TryStream + Stream<Item = Result<S::Ok, S::Error>>,
	K: PartialEq,
	F: FnMut(&S::Ok) -> K,
{
	type Item = Result<(K, Vec<S::Ok>), S::Error>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Option<Self::Item>>
	{
		let mut this = self.project();

		if *this.failed {
			return Poll::Ready(None);
		}

		loop {
			match ready!(this.stream.as_mut().poll_next(cx)) {
				Some(Ok(item)) => {
					let key = (this.key)(&item);

					match this.current.as_mut() {
						Some((current_key, items)) if *current_key == key => {
							items.push(item);
							continue;
						},
						_ => {},
					}

					if let Some(run) = mem::replace(this.current, Some((key, vec![item]))) {
						return Poll::Ready(Some(Ok(run)));
					}
				},
				Some(Err(error)) => {
					*this.current = None;
					*this.failed = true;
					return Poll::Ready(Some(Err(error)));
				},
				None => return Poll::Ready(this.current.take().map(Ok)),
			}
		}
	}
}

impl<S, K, F> FusedStream for GroupBy<S, K, F>
where
	S: TryStream + Stream<Item = Result<S::Ok, S::Error>>,
	K: PartialEq,
	F: FnMut(&S::Ok) -> K,
{
	fn is_terminated(&self) -> bool
	{
		self.failed || (self.stream.is_terminated() && self.current.is_none())
	}
}
