use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Opaque value stored in a [`Metas`] map.
pub type MetaValue = Arc<dyn Any + Send + Sync>;

static EMPTY: LazyLock<Arc<HashMap<String, MetaValue>>> = LazyLock::new(|| Arc::new(HashMap::new()));

/// Out-of-band metadata attached to an element.
///
/// Metas map string keys to opaque values and are excluded from element
/// equality and hashing; the type deliberately implements neither
/// `PartialEq` nor `Hash`, so they cannot leak into comparisons. Cloning is
/// an `Arc` bump; the empty map is a shared singleton.
#[derive(Clone)]
pub struct Metas {
	entries: Arc<HashMap<String, MetaValue>>,
}

impl std::fmt::Debug for Metas {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Values are opaque; show the keys only.
		f.debug_set().entries(self.entries.keys()).finish()
	}
}

impl Metas {
	/// The shared empty metadata map.
	pub fn empty() -> Self {
		Self { entries: EMPTY.clone() }
	}

	/// Build a metadata map from key/value pairs.
	pub fn from_entries<I, K>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, MetaValue)>,
		K: Into<String>,
	{
		let entries: HashMap<String, MetaValue> = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
		if entries.is_empty() {
			return Self::empty();
		}
		Self { entries: Arc::new(entries) }
	}

	/// Return a new map with `value` stored under `key`, replacing any
	/// existing entry for that key.
	pub fn with(&self, key: impl Into<String>, value: impl Any + Send + Sync) -> Self {
		let mut entries: HashMap<String, MetaValue> = (*self.entries).clone();
		entries.insert(key.into(), Arc::new(value));
		Self { entries: Arc::new(entries) }
	}

	/// Return a new map containing the entries of both maps; entries in
	/// `other` win on key collision.
	pub fn merged(&self, other: &Metas) -> Self {
		if other.is_empty() {
			return self.clone();
		}
		if self.is_empty() {
			return other.clone();
		}
		let mut entries: HashMap<String, MetaValue> = (*self.entries).clone();
		for (key, value) in other.entries.iter() {
			entries.insert(key.clone(), value.clone());
		}
		Self { entries: Arc::new(entries) }
	}

	/// Retrieve the value under `key` downcast to `T`, if present and of
	/// that type.
	pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
		self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
	}

	/// Retrieve the raw opaque value under `key`.
	pub fn get_raw(&self, key: &str) -> Option<&MetaValue> {
		self.entries.get(key)
	}

	/// True when `key` has an entry.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no entries are present.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate the entry keys in unspecified order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

impl Default for Metas {
	fn default() -> Self {
		Self::empty()
	}
}
