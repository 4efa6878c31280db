//! Thread-safe in-memory [`KeyValueStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{KeyValueStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Thread-safe storage backend that keeps entries in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Creates a store pre-populated with the provided entries.
	pub fn with_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self(Arc::new(RwLock::new(map)))
	}

	/// Returns the number of stored entries.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing has been stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn set_now(map: StoreMap, key: String, value: String) -> Result<(), StoreError> {
		map.write().insert(key, value);

		Ok(())
	}
}
impl KeyValueStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(key).cloned()) })
	}

	fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::set_now(map, key, value) })
	}
}
