use futures_util::Stream;

use crate::database::DatabaseResult;

/// A [`Stream`] of database rows.
///
/// `impl RowStream<'a, T>` is a shorthand for
/// `impl Stream<Item = DatabaseResult<T>> + Unpin + Send + 'a`.
pub trait RowStream<'a, T>: Stream<Item = DatabaseResult<T>> + Unpin + Send + 'a {}

impl<'a, S, T> RowStream<'a, T> for S where S: Stream<Item = DatabaseResult<T>> + Unpin + Send + 'a
{}
