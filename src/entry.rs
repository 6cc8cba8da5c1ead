use chrono::{DateTime, Local, TimeZone};
use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// Lowest score an [`Entry`] can hold.
pub const MIN_SCORE: u8 = 0;
/// Highest score an [`Entry`] can hold.
pub const MAX_SCORE: u8 = 100;

/// Opaque identifier of a leaderboard [`Entry`], also used as the `id` of its row element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);
impl EntryId {
	#[must_use]
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for EntryId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
impl core::borrow::Borrow<str> for EntryId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// One leaderboard row's data.
///
/// The serialized form (`id`, `name`, `country`, `score`, `time`) is what ends up in `localStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
	pub id: EntryId,
	pub name: String,
	pub country: String,
	pub score: u8,
	/// Human-readable timestamp of the last score-affecting mutation.
	pub time: String,
}
impl Entry {
	/// Applies `delta` to a copy of the current score.
	///
	/// Returns [`None`] if the result would leave [`MIN_SCORE`]..=[`MAX_SCORE`].
	#[must_use]
	pub fn adjusted_score(&self, delta: i32) -> Option<u8> {
		let score = i32::from(self.score).checked_add(delta)?;
		if (i32::from(MIN_SCORE)..=i32::from(MAX_SCORE)).contains(&score) {
			u8::try_from(score).ok()
		} else {
			None
		}
	}
}

/// Formats `moment` the way row timestamps are displayed, e.g. `Mar 05, 2024 14:30`.
pub fn format_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
	Tz::Offset: Display,
{
	moment.format("%b %d, %Y %H:%M").to_string()
}

/// The current local time as a row timestamp.
#[must_use]
pub fn timestamp_now() -> String {
	format_timestamp(&Local::now())
}
