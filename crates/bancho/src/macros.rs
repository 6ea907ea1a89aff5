//! Macros used by this crate.

#![allow(unused_macros, unused_macro_rules)]

/// Enables items conditionally based on whether the `serde` feature is enabled.
macro_rules! cfg_serde {
	(
		$($item:item)*
	) => {
		$(
			#[cfg(feature = "serde")]
			#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
			$item
		)*
	};
}

/// Enables items conditionally based on whether the `sqlx` feature is enabled.
macro_rules! cfg_sqlx {
	(
		$($item:item)*
	) => {
		$(
			#[cfg(feature = "sqlx")]
			#[cfg_attr(docsrs, doc(cfg(feature = "sqlx")))]
			$item
		)*
	};
}

/// Implements [`sqlx::Type`], [`sqlx::Encode`] and [`sqlx::Decode`] for an enum that is stored
/// as an integer column.
///
/// The type must implement `From<$ty> for $repr` and `TryFrom<$repr>`.
macro_rules! impl_sqlx_integer {
	($ty:ty => $repr:ty) => {
		impl<DB> ::sqlx::Type<DB> for $ty
		where
			DB: ::sqlx::Database,
			$repr: ::sqlx::Type<DB>,
		{
			fn type_info() -> <DB as ::sqlx::Database>::TypeInfo
			{
				<$repr as ::sqlx::Type<DB>>::type_info()
			}

			fn compatible(ty: &<DB as ::sqlx::Database>::TypeInfo) -> bool
			{
				<$repr as ::sqlx::Type<DB>>::compatible(ty)
			}
		}

		impl<'q, DB> ::sqlx::Encode<'q, DB> for $ty
		where
			DB: ::sqlx::Database,
			$repr: ::sqlx::Encode<'q, DB>,
		{
			fn encode_by_ref(
				&self,
				buf: &mut <DB as ::sqlx::Database>::ArgumentBuffer<'q>,
			) -> Result<::sqlx::encode::IsNull, Box<dyn ::std::error::Error + Send + Sync>>
			{
				<$repr as ::sqlx::Encode<'q, DB>>::encode_by_ref(&<$repr>::from(*self), buf)
			}

			fn produces(&self) -> Option<<DB as ::sqlx::Database>::TypeInfo>
			{
				<$repr as ::sqlx::Encode<'q, DB>>::produces(&<$repr>::from(*self))
			}

			fn size_hint(&self) -> usize
			{
				<$repr as ::sqlx::Encode<'q, DB>>::size_hint(&<$repr>::from(*self))
			}
		}

		impl<'r, DB> ::sqlx::Decode<'r, DB> for $ty
		where
			DB: ::sqlx::Database,
			$repr: ::sqlx::Decode<'r, DB>,
		{
			fn decode(
				value: <DB as ::sqlx::Database>::ValueRef<'r>,
			) -> Result<Self, Box<dyn ::std::error::Error + Send + Sync>>
			{
				<$repr as ::sqlx::Decode<'r, DB>>::decode(value)?
					.try_into()
					.map_err(Into::into)
			}
		}
	};
}
