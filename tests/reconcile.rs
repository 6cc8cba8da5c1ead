use leaderboard_dom::{
	layout::{LayoutConfig, ViewportClass},
	reconcile,
	session::{NewEntry, Session},
	storage::{MemoryStore, StorageKeys},
	Entry, Pass, Surface,
};
use rand::{rngs::StdRng, SeedableRng};

/// A rendered row, as far as the reconciler is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
	/// Stands in for DOM node identity.
	serial: u64,
	key: String,
	offset: u32,
	index: usize,
	score: u8,
	time: String,
}

#[derive(Debug, Default)]
struct TestSurface {
	rows: Vec<Row>,
	next_serial: u64,
	height: Option<u32>,
}
impl TestSurface {
	fn serial_of(&self, key: &str) -> Option<u64> {
		self.rows.iter().find(|row| row.key == key).map(|row| row.serial)
	}

	fn row(&self, key: &str) -> &Row {
		self.rows.iter().find(|row| row.key == key).unwrap()
	}

	fn push(&mut self, key: &str, offset: u32) -> u64 {
		let serial = self.next_serial;
		self.next_serial += 1;
		self.rows.push(Row {
			serial,
			key: key.to_owned(),
			offset,
			index: usize::MAX,
			score: 0,
			time: String::new(),
		});
		serial
	}
}
impl Surface for TestSurface {
	type Row = u64;

	fn live_rows(&self) -> Vec<(String, u64)> {
		self.rows.iter().map(|row| (row.key.clone(), row.serial)).collect()
	}

	fn create_row(&mut self, entry: &Entry, index: usize, offset: u32) {
		let serial = self.push(entry.id.as_str(), offset);
		let row = self.rows.iter_mut().find(|row| row.serial == serial).unwrap();
		row.index = index;
		row.score = entry.score;
		row.time = entry.time.clone();
	}

	fn update_row(&mut self, serial: &u64, entry: &Entry, index: usize, offset: u32) {
		let row = self.rows.iter_mut().find(|row| row.serial == *serial).unwrap();
		assert_eq!(row.key, entry.id.as_str());
		row.offset = offset;
		row.index = index;
		row.score = entry.score;
		row.time = entry.time.clone();
	}

	fn remove_row(&mut self, serial: u64) {
		let before = self.rows.len();
		self.rows.retain(|row| row.serial != serial);
		assert_eq!(self.rows.len(), before - 1, "removed a row twice");
	}

	fn set_wrapper_height(&mut self, height: u32) {
		self.height = Some(height);
	}
}

fn session() -> Session<MemoryStore, StdRng> {
	Session::load(MemoryStore::new(), StorageKeys::default(), StdRng::seed_from_u64(0)).with_clock(|| "Jan 01, 2024 00:00".to_owned())
}

fn add(session: &mut Session<MemoryStore, StdRng>, first_name: &str, score: u8) -> String {
	session
		.add(NewEntry {
			first_name: first_name.to_owned(),
			last_name: "TESTER".to_owned(),
			country: "ICELAND".to_owned(),
			score,
		})
		.id
		.as_str()
		.to_owned()
}

fn desktop() -> leaderboard_dom::layout::Layout {
	LayoutConfig::default().layout(ViewportClass::Desktop)
}

fn assert_matches_session(surface: &TestSurface, session: &Session<MemoryStore, StdRng>) {
	assert_eq!(surface.rows.len(), session.len());
	for (index, entry) in session.entries().iter().enumerate() {
		let row = surface.row(entry.id.as_str());
		assert_eq!(row.index, index);
		assert_eq!(row.offset, desktop().offset(index));
		assert_eq!(row.score, entry.score);
		assert_eq!(row.time, entry.time);
	}
	assert_eq!(surface.height, Some(desktop().wrapper_height(session.len())));
}

#[test]
fn creates_missing_rows_in_order() {
	let mut session = session();
	add(&mut session, "A", 10);
	add(&mut session, "B", 30);
	add(&mut session, "C", 20);

	let mut surface = TestSurface::default();
	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	assert_eq!(pass, Pass { removed: 0, updated: 0, created: 3 });
	assert_eq!(surface.rows.iter().map(|row| row.offset).collect::<Vec<_>>(), [0, 92, 184]);
	assert_eq!(surface.height, Some(88 * 3 + 4 * 2));
	assert_matches_session(&surface, &session);
}

#[test]
fn second_pass_is_idempotent() {
	let mut session = session();
	for (name, score) in [("A", 10), ("B", 30), ("C", 20), ("D", 30)] {
		add(&mut session, name, score);
	}
	let mut surface = TestSurface::default();

	reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	let first = (surface.rows.clone(), surface.height);

	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	assert_eq!(pass, Pass { removed: 0, updated: 4, created: 0 });
	assert_eq!((surface.rows.clone(), surface.height), first);
}

#[test]
fn reordering_keeps_row_identity() {
	let mut session = session();
	let a = add(&mut session, "A", 80);
	let b = add(&mut session, "B", 90);
	let mut surface = TestSurface::default();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	let serial_a = surface.serial_of(&a);
	let serial_b = surface.serial_of(&b);
	assert_eq!(surface.row(&a).offset, 92);

	assert!(session.adjust_score(&a, 15).is_applied());
	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	assert_eq!(pass, Pass { removed: 0, updated: 2, created: 0 });
	assert_eq!(surface.serial_of(&a), serial_a);
	assert_eq!(surface.serial_of(&b), serial_b);
	assert_eq!(surface.row(&a).offset, 0);
	assert_eq!(surface.row(&a).index, 0);
	assert_eq!(surface.row(&a).score, 95);
	assert_eq!(surface.row(&b).offset, 92);
	assert_eq!(surface.row(&b).index, 1);
	assert_matches_session(&surface, &session);
}

#[test]
fn deleted_entries_lose_their_rows_only() {
	let mut session = session();
	let a = add(&mut session, "A", 80);
	let b = add(&mut session, "B", 90);
	let c = add(&mut session, "C", 70);
	let mut surface = TestSurface::default();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	let serial_a = surface.serial_of(&a);
	let serial_c = surface.serial_of(&c);

	session.delete(&b).unwrap();
	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	assert_eq!(pass, Pass { removed: 1, updated: 2, created: 0 });
	assert_eq!(surface.serial_of(&b), None);
	assert_eq!(surface.serial_of(&a), serial_a);
	assert_eq!(surface.serial_of(&c), serial_c);
	assert_matches_session(&surface, &session);
}

#[test]
fn pre_rendered_row_slides_into_place() {
	let mut session = session();
	add(&mut session, "A", 50);
	add(&mut session, "B", 40);
	let mut surface = TestSurface::default();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	// Adding pre-renders the new row at the end of the list, before the deferred pass.
	let index = session.len();
	let c = add(&mut session, "C", 60);
	let entry = session.get(&c).unwrap().clone();
	surface.create_row(&entry, index, desktop().offset(index));
	let serial_c = surface.serial_of(&c);
	assert_eq!(surface.row(&c).offset, 184);

	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	assert_eq!(pass, Pass { removed: 0, updated: 3, created: 0 });
	assert_eq!(surface.serial_of(&c), serial_c);
	assert_eq!(surface.row(&c).offset, 0);
	assert_matches_session(&surface, &session);
}

#[test]
fn stray_and_duplicate_rows_are_removed() {
	let mut session = session();
	let a = add(&mut session, "A", 50);
	let mut surface = TestSurface::default();
	surface.push(&a, 0);
	surface.push(&a, 0);
	surface.push("gone", 92);

	let pass = reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	assert_eq!(pass, Pass { removed: 2, updated: 1, created: 0 });
	assert_matches_session(&surface, &session);
}

#[test]
fn viewport_change_recomputes_offsets() {
	let mut session = session();
	add(&mut session, "A", 50);
	add(&mut session, "B", 40);
	add(&mut session, "C", 30);
	let mut surface = TestSurface::default();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	let serials = surface.rows.iter().map(|row| row.serial).collect::<Vec<_>>();

	let mobile = LayoutConfig::default().layout(ViewportClass::Mobile);
	reconcile(session.entries(), session.ids(), mobile, &mut surface);

	assert_eq!(surface.rows.iter().map(|row| row.serial).collect::<Vec<_>>(), serials);
	assert_eq!(surface.rows.iter().map(|row| row.offset).collect::<Vec<_>>(), [0, 164, 328]);
	assert_eq!(surface.height, Some(160 * 3 + 4 * 2));
}

#[test]
fn empty_board_has_no_height() {
	let mut session = session();
	let a = add(&mut session, "A", 50);
	let mut surface = TestSurface::default();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);

	session.delete(&a).unwrap();
	reconcile(session.entries(), session.ids(), desktop(), &mut surface);
	assert!(surface.rows.is_empty());
	assert_eq!(surface.height, Some(0));
}
