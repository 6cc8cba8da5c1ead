//! String key-value persistence, as provided by [***localStorage***](https://developer.mozilla.org/en-US/docs/Web/API/Window/localStorage).

use hashbrown::HashMap;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, trace};
use wasm_bindgen::JsValue;

/// Storage key of the serialized entry collection.
pub const ENTRIES_KEY: &str = "leaderboard";
/// Storage key of the serialized identity set.
pub const IDS_KEY: &str = "leaderboard_ids";

/// The pair of keys a leaderboard persists itself under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
	pub entries: String,
	pub ids: String,
}
impl Default for StorageKeys {
	fn default() -> Self {
		Self {
			entries: ENTRIES_KEY.to_owned(),
			ids: IDS_KEY.to_owned(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	#[error("`localStorage` is not available")]
	Unavailable,
	#[error("storage access failed: {0}")]
	Access(String),
	#[error("stored value for {key:?} is malformed: {source}")]
	Malformed { key: String, source: serde_json::Error },
	#[error("value for {key:?} could not be serialized: {source}")]
	Serialize { key: String, source: serde_json::Error },
}
impl StorageError {
	fn access(error: &JsValue) -> Self {
		Self::Access(format!("{:?}", error))
	}
}

/// A string key-value store.
pub trait KeyValueStore {
	/// Reads the value stored under `key`, if any.
	///
	/// # Errors
	///
	/// Iff the underlying storage can't be read.
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

	/// Stores `value` under `key`, overwriting any previous value.
	///
	/// # Errors
	///
	/// Iff the underlying storage can't be written, e.g. because its quota is exhausted.
	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and deserializes the JSON value stored under `key`.
///
/// An absent key is not an error and yields [`None`].
///
/// # Errors
///
/// Iff reading fails or the stored value isn't valid JSON for `T`.
#[instrument(skip(store))]
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
	match store.get(key)? {
		None => {
			trace!("Nothing stored yet.");
			Ok(None)
		}
		Some(json) => serde_json::from_str(&json).map(Some).map_err(|source| StorageError::Malformed { key: key.to_owned(), source }),
	}
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Iff serialization or writing fails.
#[instrument(skip(store, value))]
pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
	let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize { key: key.to_owned(), source })?;
	trace!(len = json.len(), "Saving.");
	store.set(key, &json)
}

/// An in-memory [`KeyValueStore`], mainly for tests and non-browser hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore(HashMap<String, String>);
impl MemoryStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn raw(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}
}
impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.0.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
		self.0.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}

/// The window's [***localStorage***](https://developer.mozilla.org/en-US/docs/Web/API/Window/localStorage).
#[derive(Debug, Clone)]
pub struct BrowserStore(web_sys::Storage);
impl BrowserStore {
	/// # Errors
	///
	/// Iff `localStorage` is disabled or inaccessible (e.g. in some private browsing modes).
	pub fn local(window: &web_sys::Window) -> Result<Self, StorageError> {
		match window.local_storage() {
			Ok(Some(storage)) => Ok(Self(storage)),
			Ok(None) => Err(StorageError::Unavailable),
			Err(error) => Err(StorageError::access(&error)),
		}
	}
}
impl KeyValueStore for BrowserStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		self.0.get_item(key).map_err(|error| StorageError::access(&error))
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
		self.0.set_item(key, value).map_err(|error| StorageError::access(&error))
	}
}
