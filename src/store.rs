use crate::entry::{Entry, EntryId};
use core::cmp::Reverse;
use tracing::{instrument, trace};

/// Outcome of [`EntryStore::adjust_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Adjustment {
	Applied { from: u8, to: u8 },
	/// The new score would have left the allowed range. Nothing changed.
	OutOfRange { score: u8, delta: i32 },
	/// No entry with the given id exists. Nothing changed.
	Missing,
}
impl Adjustment {
	#[must_use]
	pub fn is_applied(self) -> bool {
		matches!(self, Self::Applied { .. })
	}
}

/// The authoritative entry collection, always sorted by descending score.
///
/// Sorting is stable, so entries with equal scores keep their previous relative order
/// (which for fresh entries is insertion order).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryStore {
	entries: Vec<Entry>,
}
impl EntryStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Takes over `entries`, sorting them if necessary.
	#[must_use]
	pub fn from_entries(entries: Vec<Entry>) -> Self {
		let mut this = Self { entries };
		this.resort();
		this
	}

	#[must_use]
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn position(&self, id: &str) -> Option<usize> {
		self.entries.iter().position(|entry| entry.id.as_str() == id)
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&Entry> {
		self.entries.iter().find(|entry| entry.id.as_str() == id)
	}

	/// Translates a displayed position into the id of the entry currently at that position.
	#[must_use]
	pub fn id_at(&self, index: usize) -> Option<&EntryId> {
		self.entries.get(index).map(|entry| &entry.id)
	}

	/// Appends `entry` and restores the ordering.
	#[instrument(skip(self, entry), fields(id = %entry.id, score = entry.score))]
	pub fn insert(&mut self, entry: Entry) {
		self.entries.push(entry);
		self.resort();
	}

	/// Adds `delta` to the score of the entry with `id`, refreshing its time with `now`.
	///
	/// Adjustments that would leave the allowed score range are silently ignored;
	/// `now` is only called if the score actually changes.
	#[instrument(skip(self, now))]
	pub fn adjust_score(&mut self, id: &str, delta: i32, now: impl FnOnce() -> String) -> Adjustment {
		let entry = match self.entries.iter_mut().find(|entry| entry.id.as_str() == id) {
			Some(entry) => entry,
			None => return Adjustment::Missing,
		};
		let from = entry.score;
		let to = match entry.adjusted_score(delta) {
			Some(to) => to,
			None => {
				trace!(score = from, "Out of range. Ignoring.");
				return Adjustment::OutOfRange { score: from, delta };
			}
		};
		entry.score = to;
		entry.time = now();
		self.resort();
		Adjustment::Applied { from, to }
	}

	/// Removes and returns the entry with `id`.
	#[instrument(skip(self))]
	pub fn remove(&mut self, id: &str) -> Option<Entry> {
		let index = self.position(id)?;
		let removed = self.entries.remove(index);
		self.resort();
		Some(removed)
	}

	/// Stable sort by descending score.
	pub fn resort(&mut self) {
		self.entries.sort_by_key(|entry| Reverse(entry.score));
	}
}
