//! Keyed reconciliation of live rows against the sorted entry collection.
//!
//! Unlike a general keyed diff, rows are never moved within their parent: each row is absolutely positioned,
//! so reordering only rewrites its offset. That lets the browser transition the offset instead of snapping
//! a recreated element into place.

use crate::{entry::Entry, ids::IdentitySet, layout::Layout};
use hashbrown::{hash_map::Entry as MapEntry, HashMap};
use tracing::{info, instrument, trace, trace_span, warn};

/// A place rows can be rendered to.
///
/// [`DomSurface`](`crate::dom::DomSurface`) is the browser implementation.
pub trait Surface {
	/// Handle to a live row. Cloning a handle must not clone the row itself.
	type Row: Clone;

	/// All live rows in document order, each with the key (entry id) it was rendered for.
	fn live_rows(&self) -> Vec<(String, Self::Row)>;

	/// Creates a row for `entry`, appended after all existing rows.
	fn create_row(&mut self, entry: &Entry, index: usize, offset: u32);

	/// Rewrites the offset, time, score and positional control indices of an existing row.
	fn update_row(&mut self, row: &Self::Row, entry: &Entry, index: usize, offset: u32);

	fn remove_row(&mut self, row: Self::Row);

	/// Sets the height of the rows' wrapper, which can't derive it from its absolutely positioned children.
	fn set_wrapper_height(&mut self, height: u32);
}

/// Statistics of one [`reconcile`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pass {
	pub removed: usize,
	pub updated: usize,
	pub created: usize,
}

/// Aligns `surface` with `entries`.
///
/// 1. Rows whose key isn't in `ids` (deleted entries) and duplicate rows are removed.
/// 2. Each entry's row is updated in place if it exists or created otherwise, at the entry's index.
/// 3. Rows left over without a matching entry are removed.
///
/// Running this twice without intervening mutation leaves the surface unchanged by the second pass,
/// apart from rewriting identical values.
#[instrument(skip(entries, ids, surface), fields(entries = entries.len()))]
pub fn reconcile<S: Surface>(entries: &[Entry], ids: &IdentitySet, layout: Layout, surface: &mut S) -> Pass {
	let mut pass = Pass::default();

	let mut live = HashMap::new();
	for (key, row) in surface.live_rows() {
		if !ids.contains(&key) {
			trace!(%key, "Removing row of deleted entry.");
			surface.remove_row(row);
			pass.removed += 1;
			continue;
		}
		match live.entry(key) {
			MapEntry::Occupied(occupied) => {
				warn!(key = %occupied.key(), "Duplicate row. Removing it.");
				surface.remove_row(row);
				pass.removed += 1;
			}
			MapEntry::Vacant(vacant) => {
				vacant.insert(row);
			}
		}
	}

	for (index, entry) in entries.iter().enumerate() {
		let span = trace_span!("Placing row", id = %entry.id, index);
		let _enter = span.enter();
		let offset = layout.offset(index);
		match live.remove(entry.id.as_str()) {
			Some(row) => {
				surface.update_row(&row, entry, index, offset);
				pass.updated += 1;
			}
			None => {
				trace!("No live row. Creating one.");
				surface.create_row(entry, index, offset);
				pass.created += 1;
			}
		}
	}

	for (key, row) in live {
		warn!(%key, "Live id without entry. Removing its row.");
		surface.remove_row(row);
		pass.removed += 1;
	}

	surface.set_wrapper_height(layout.wrapper_height(entries.len()));
	info!(removed = pass.removed, updated = pass.updated, created = pass.created, "Reconciled.");
	pass
}
