//! The leaderboard's state: the [`EntryStore`] and [`IdAllocator`] together with their persistence.
//!
//! Every mutation is flushed to storage immediately. Storage failures are logged but don't abort a mutation,
//! so the in-memory state stays authoritative for the rest of the session.

use crate::{
	entry::{timestamp_now, Entry, EntryId, MAX_SCORE, MIN_SCORE},
	ids::{IdAllocator, IdentitySet},
	storage::{load_json, save_json, KeyValueStore, StorageKeys},
	store::{Adjustment, EntryStore},
};
use rand::Rng;
use tracing::{error, info, instrument, trace, warn};

/// Validated, upper-cased form input for a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
	pub first_name: String,
	pub last_name: String,
	pub country: String,
	pub score: u8,
}

pub struct Session<S, R> {
	store: EntryStore,
	allocator: IdAllocator<R>,
	storage: S,
	keys: StorageKeys,
	clock: fn() -> String,
}
impl<S, R> core::fmt::Debug for Session<S, R> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Session")
			.field("entries", &self.store.len())
			.field("ids", &self.allocator.ids().len())
			.field("keys", &self.keys)
			.finish_non_exhaustive()
	}
}
impl<S: KeyValueStore, R: Rng> Session<S, R> {
	/// Loads the persisted collection and identity set from `storage`.
	///
	/// Absent values are treated as empty. Malformed values are logged and also treated as empty.
	/// Stored entries with a score outside [`MIN_SCORE`]`..=`[`MAX_SCORE`] or a repeated id are dropped.
	/// If the identity set doesn't match the remaining entries' ids, it's rebuilt from them.
	/// Either repair is saved again right away.
	#[instrument(skip(storage, rng))]
	pub fn load(storage: S, keys: StorageKeys, rng: R) -> Self {
		let stored: Vec<Entry> = load_json(&storage, &keys.entries)
			.unwrap_or_else(|error| {
				error!("Failed to load entries: {}", error);
				None
			})
			.unwrap_or_default();
		let ids: IdentitySet = load_json(&storage, &keys.ids)
			.unwrap_or_else(|error| {
				error!("Failed to load ids: {}", error);
				None
			})
			.unwrap_or_default();

		let stored_len = stored.len();
		let mut expected = IdentitySet::new();
		let entries = stored
			.into_iter()
			.filter(|entry| {
				if !(MIN_SCORE..=MAX_SCORE).contains(&entry.score) {
					warn!(id = %entry.id, score = entry.score, "Dropping stored entry with out-of-range score.");
					return false;
				}
				if !expected.insert(entry.id.clone()) {
					warn!(id = %entry.id, "Dropping stored entry with repeated id.");
					return false;
				}
				true
			})
			.collect::<Vec<_>>();
		let pruned = entries.len() != stored_len;

		let repaired = expected != ids;
		if repaired {
			warn!(stored = ids.len(), expected = expected.len(), "Stored ids don't match stored entries. Rebuilding them from the entries.");
		}

		let mut this = Self {
			store: EntryStore::from_entries(entries),
			allocator: IdAllocator::new(expected, rng),
			storage,
			keys,
			clock: timestamp_now,
		};
		if pruned {
			this.persist_entries();
		}
		if pruned || repaired {
			this.persist_ids();
		}
		info!(entries = this.store.len(), "Loaded leaderboard.");
		this
	}

	/// Replaces the timestamp source, which defaults to [`timestamp_now`].
	#[must_use]
	pub fn with_clock(mut self, clock: fn() -> String) -> Self {
		self.clock = clock;
		self
	}

	#[must_use]
	pub fn entries(&self) -> &[Entry] {
		self.store.entries()
	}

	#[must_use]
	pub fn ids(&self) -> &IdentitySet {
		self.allocator.ids()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.store.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&Entry> {
		self.store.get(id)
	}

	/// See [`EntryStore::id_at`].
	#[must_use]
	pub fn id_at(&self, index: usize) -> Option<&EntryId> {
		self.store.id_at(index)
	}

	#[must_use]
	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Allocates an id for `new`, inserts the resulting entry and persists everything.
	///
	/// Returns a copy of the inserted entry.
	#[instrument(skip(self, new), fields(score = new.score))]
	pub fn add(&mut self, new: NewEntry) -> Entry {
		let id = self.allocator.allocate();
		self.persist_ids();

		let entry = Entry {
			id,
			name: format!("{} {}", new.first_name, new.last_name),
			country: new.country,
			score: new.score,
			time: (self.clock)(),
		};
		if cfg!(feature = "dangerous-logging") {
			trace!(id = %entry.id, name = %entry.name, country = %entry.country, "Adding entry.");
		} else {
			trace!(id = %entry.id, "Adding entry.");
		}

		self.store.insert(entry.clone());
		self.persist_entries();
		entry
	}

	/// Adds `delta` to the score of the entry with `id`.
	///
	/// Out-of-range results and unknown ids leave everything untouched, including storage.
	#[instrument(skip(self))]
	pub fn adjust_score(&mut self, id: &str, delta: i32) -> Adjustment {
		let adjustment = self.store.adjust_score(id, delta, self.clock);
		match adjustment {
			Adjustment::Applied { .. } => self.persist_entries(),
			Adjustment::OutOfRange { .. } => trace!("Ignored out-of-range adjustment."),
			Adjustment::Missing => warn!("No entry to adjust."),
		}
		adjustment
	}

	/// Removes the entry with `id` and frees its id.
	#[instrument(skip(self))]
	pub fn delete(&mut self, id: &str) -> Option<Entry> {
		let removed = match self.store.remove(id) {
			Some(removed) => removed,
			None => {
				warn!("No entry to delete.");
				return None;
			}
		};
		self.allocator.release(id);
		self.persist_ids();
		self.persist_entries();
		Some(removed)
	}

	fn persist_entries(&mut self) {
		if let Err(error) = save_json(&mut self.storage, &self.keys.entries, self.store.entries()) {
			error!("Failed to persist entries: {}", error)
		}
	}

	fn persist_ids(&mut self) {
		if let Err(error) = save_json(&mut self.storage, &self.keys.ids, self.allocator.ids()) {
			error!("Failed to persist ids: {}", error)
		}
	}
}
