//! Process-wide archetype table handle.
//!
//! Readers take an `Arc` snapshot and score against it without holding any
//! lock. A recalibrated table is swapped in with [`SharedArchetypes::replace`];
//! snapshots taken earlier keep pointing at the table they started with.

use std::sync::Arc;

use parking_lot::RwLock;

use super::ArchetypeTable;

/// Cheaply cloneable handle to the current archetype table.
#[derive(Debug, Clone)]
pub struct SharedArchetypes {
    inner: Arc<RwLock<Arc<ArchetypeTable>>>,
}

impl SharedArchetypes {
    pub fn new(table: ArchetypeTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// The table as of now. Never changes underneath the caller.
    pub fn snapshot(&self) -> Arc<ArchetypeTable> {
        Arc::clone(&*self.inner.read())
    }

    /// Install a new table and return the one it replaced.
    pub fn replace(&self, table: ArchetypeTable) -> Arc<ArchetypeTable> {
        let to = table.version().to_string();
        let previous = std::mem::replace(&mut *self.inner.write(), Arc::new(table));
        tracing::info!(from = previous.version(), to = %to, "archetype table replaced");
        previous
    }

    pub fn version(&self) -> String {
        self.inner.read().version().to_string()
    }
}

impl Default for SharedArchetypes {
    fn default() -> Self {
        Self::new(ArchetypeTable::builtin())
    }
}
