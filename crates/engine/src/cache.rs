//! Per-type memoisation of declared descriptors.
//!
//! Readers load the current snapshot without locking. A miss builds the
//! descriptor outside of any critical section and publishes an extended
//! snapshot with compare-and-swap; if another thread published the same type
//! first, its entry wins and the local build is dropped. Each type therefore
//! maps to exactly one `Arc` for the lifetime of the cache.

use std::any::TypeId;
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;
use tracing::trace;

use crate::descriptor::TargetDescriptor;
use crate::introspect::Introspect;

type Snapshot = HashMap<TypeId, Arc<TargetDescriptor>>;

pub struct DescriptorCache {
	snap: ArcSwap<Snapshot>,
}

impl Default for DescriptorCache {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for DescriptorCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DescriptorCache").field("types", &self.len()).finish()
	}
}

impl DescriptorCache {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(Snapshot::default()),
		}
	}

	/// Returns the descriptor for `T`, declaring it on first access.
	pub fn get_or_describe<T: Introspect>(&self) -> Arc<TargetDescriptor> {
		let key = TypeId::of::<T>();
		if let Some(desc) = self.snap.load().get(&key) {
			return Arc::clone(desc);
		}

		let built = Arc::new(T::describe());
		loop {
			let cur = self.snap.load_full();
			if let Some(existing) = cur.get(&key) {
				return Arc::clone(existing);
			}

			let mut next = (*cur).clone();
			next.insert(key, Arc::clone(&built));

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				trace!(
					target_type = built.type_name(),
					methods = built.methods().len(),
					"descriptor cached"
				);
				return built;
			}
		}
	}

	/// Returns the cached descriptor for `T` without declaring it.
	pub fn get<T: Introspect>(&self) -> Option<Arc<TargetDescriptor>> {
		self.snap.load().get(&TypeId::of::<T>()).cloned()
	}

	/// Number of cached types.
	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}
}
