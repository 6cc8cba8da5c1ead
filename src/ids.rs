use crate::entry::EntryId;
use hashbrown::HashMap;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{instrument, trace, warn};

/// Number of decimal digits in an allocated id.
pub const ID_DIGITS: usize = 6;
const ID_SPACE: u32 = 1_000_000;

/// Every currently live [`EntryId`].
///
/// Serializes as a JSON object mapping each id to `true`.
/// Ids mapped to anything but `true` are treated as absent when loading.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdentitySet(HashMap<EntryId, bool>);
impl IdentitySet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.0.get(id).copied().unwrap_or(false)
	}

	/// Returns whether `id` was newly inserted.
	pub fn insert(&mut self, id: EntryId) -> bool {
		self.0.insert(id, true) != Some(true)
	}

	/// Returns whether `id` was present.
	pub fn remove(&mut self, id: &str) -> bool {
		self.0.remove(id) == Some(true)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromIterator<EntryId> for IdentitySet {
	fn from_iter<T: IntoIterator<Item = EntryId>>(iter: T) -> Self {
		Self(iter.into_iter().map(|id| (id, true)).collect())
	}
}
impl Serialize for IdentitySet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.0.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for IdentitySet {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let mut map = HashMap::<EntryId, serde_json::Value>::deserialize(deserializer)?;
		Ok(Self(map.drain().filter(|(_, present)| present == &serde_json::Value::Bool(true)).map(|(id, _)| (id, true)).collect()))
	}
}

/// Hands out fresh six-digit [`EntryId`]s and tracks them in an [`IdentitySet`].
///
/// Candidates are drawn uniformly and redrawn until one isn't live.
/// There is no bound on the number of redraws: the id space is sparse compared to any realistic leaderboard,
/// but allocation would spin forever on a full set.
#[derive(Debug)]
pub struct IdAllocator<R> {
	ids: IdentitySet,
	rng: R,
}
impl<R> IdAllocator<R> {
	#[must_use]
	pub fn new(ids: IdentitySet, rng: R) -> Self {
		Self { ids, rng }
	}

	#[must_use]
	pub fn ids(&self) -> &IdentitySet {
		&self.ids
	}
}
impl<R: Rng> IdAllocator<R> {
	/// Draws an id that isn't live yet and marks it as live.
	#[instrument(skip(self), fields(live = self.ids.len()))]
	pub fn allocate(&mut self) -> EntryId {
		let mut collisions = 0_usize;
		let id = loop {
			let candidate = EntryId::new(format!("{:0width$}", self.rng.gen_range(0..ID_SPACE), width = ID_DIGITS));
			if !self.ids.contains(candidate.as_str()) {
				break candidate;
			}
			collisions += 1;
		};
		if collisions > 0 {
			trace!(collisions, "Redrew colliding id candidates.");
		}
		self.ids.insert(id.clone());
		trace!(%id, "Allocated id.");
		id
	}

	/// Frees `id`, making it eligible for reallocation.
	///
	/// Returns whether `id` was live.
	#[instrument(skip(self))]
	pub fn release(&mut self, id: &str) -> bool {
		let released = self.ids.remove(id);
		if !released {
			warn!("Released an id that wasn't live.");
		}
		released
	}
}
