use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::sync::Arc;

/// One-time, per-type setup, such as filling in shared state every instance uses.
pub trait StaticInit: 'static {
	fn init_static();
}

/// Runs `T::init_static` if it hasn't been run yet, returning whether it already had.
///
/// Constructors call this first thing. Concurrent callers wait for the one that's running it.
///
/// # Examples
/// ```
/// # use strongtype::property::{construct_static, StaticInit};
/// struct Registry;
///
/// impl StaticInit for Registry {
/// 	fn init_static() {}
/// }
///
/// assert!(!construct_static::<Registry>());
/// assert!(construct_static::<Registry>());
/// ```
pub fn construct_static<T: StaticInit>() -> bool {
	static INITIALIZED: OnceCell<DashMap<TypeId, Arc<OnceCell<()>>>> = OnceCell::new();

	// Cloned out so `init_static` can itself construct other types without holding the shard.
	let cell = INITIALIZED
		.get_or_init(DashMap::new)
		.entry(TypeId::of::<T>())
		.or_default()
		.clone();

	let mut ran = false;
	cell.get_or_init(|| {
		trace!(name=std::any::type_name::<T>(), "running static initializer");
		T::init_static();
		ran = true;
	});

	!ran
}
