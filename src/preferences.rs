use lazy_static::lazy_static;
use std::sync::RwLock;

use crate::storage::Startup;

lazy_static! {
    /// How newly created memory starts out, shared by the whole process.
    static ref MEMORY_STARTUP: RwLock<Startup> = RwLock::new(Startup::default());
}

/// Current memory startup preference.
pub fn memory_startup() -> Startup {
    *MEMORY_STARTUP
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Replaces the memory startup preference. Only storage created afterwards
/// is affected.
#[tracing::instrument]
pub fn set_memory_startup(startup: Startup) {
    *MEMORY_STARTUP
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = startup;
}
