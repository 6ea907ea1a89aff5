use std::collections::HashMap;

/// Attributes of a single beatmap, keyed by mods.
///
/// Lives for exactly one group of plays, so it never needs to be invalidated.
#[derive(Debug)]
pub struct AttributeCache<A>
{
	by_mods: HashMap<u32, A>,
}

impl<A> AttributeCache<A>
{
	pub fn get(&self, mods: u32) -> Option<&A>
	{
		self.by_mods.get(&mods)
	}

	pub fn insert(&mut self, mods: u32, attributes: A)
	{
		self.by_mods.insert(mods, attributes);
	}

	pub(crate) fn len(&self) -> usize
	{
		self.by_mods.len()
	}
}

impl<A> Default for AttributeCache<A>
{
	fn default() -> Self
	{
		Self { by_mods: HashMap::new() }
	}
}
