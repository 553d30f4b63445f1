//! Drawable-surface identifier allocation.
//!
//! Instructions reference drawable surfaces by signed integer identifier.
//! Zero is the always-visible default layer; positive identifiers are
//! caller-indexed visible layers; negative identifiers are invisible
//! buffers handed out by the allocator and pooled for reuse. Each session
//! owns exactly one allocator — no locking, no sharing.

use std::collections::HashSet;

use tracing::trace;

/// A drawable-surface identifier.
pub type LayerId = i32;

/// The always-visible default layer. Never allocated, never freed.
pub const DEFAULT_LAYER: LayerId = 0;

/// A caller contract violation against the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayerError {
    /// `alloc_layer` requires a positive index; zero is the reserved
    /// default and negative indices belong to the buffer pool.
    #[error("{0} is not a valid layer index (must be positive)")]
    NotALayer(LayerId),

    /// `free_buffer` was given the default layer or a caller-indexed
    /// layer; only allocator-assigned buffer identifiers can be freed.
    #[error("{0} is not a buffer identifier (must be negative)")]
    NotABuffer(LayerId),

    /// `free_buffer` was given an identifier that is not currently live —
    /// either never allocated or already freed.
    #[error("buffer {0} is not live")]
    NotLive(LayerId),
}

/// Identifier allocator for one session's buffers and layers.
///
/// Freed buffer identifiers are reused most-recently-freed first (LIFO);
/// this order is a deliberate, tested contract. Caller-indexed layers have
/// no reuse path — their index is caller-chosen, so the allocator only
/// tracks them for teardown bookkeeping. All identifiers are invalidated
/// together when the allocator is dropped with its session.
#[derive(Debug)]
pub struct LayerAllocator {
    /// Every identifier currently in use, the default layer included.
    live: HashSet<LayerId>,
    /// Freed buffer identifiers awaiting reuse, top of stack last.
    free: Vec<LayerId>,
    /// The next never-issued buffer identifier.
    next_buffer: LayerId,
}

impl Default for LayerAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerAllocator {
    /// Creates an allocator with only the default layer live.
    pub fn new() -> Self {
        Self {
            live: HashSet::from([DEFAULT_LAYER]),
            free: Vec::new(),
            next_buffer: -1,
        }
    }

    /// Allocates a buffer (invisible surface).
    ///
    /// Reuses the most recently freed buffer identifier if any, otherwise
    /// mints a fresh negative identifier one below the most negative ever
    /// issued.
    pub fn alloc_buffer(&mut self) -> LayerId {
        let id = self.free.pop().unwrap_or_else(|| {
            let fresh = self.next_buffer;
            self.next_buffer -= 1;
            fresh
        });
        self.live.insert(id);
        trace!(id, "buffer allocated");
        id
    }

    /// Registers the caller-chosen visible layer `index`.
    ///
    /// Idempotent: registering an index that is already live returns it
    /// unchanged. Index 0 (the reserved default) and negative indices are
    /// rejected.
    pub fn alloc_layer(&mut self, index: LayerId) -> Result<LayerId, LayerError> {
        if index <= 0 {
            return Err(LayerError::NotALayer(index));
        }
        if self.live.insert(index) {
            trace!(index, "layer registered");
        }
        Ok(index)
    }

    /// Returns a buffer identifier to the pool for reuse.
    ///
    /// The identifier must be a currently-live buffer; freeing the default
    /// layer, a positive layer, or an identifier that is not live is a
    /// contract violation.
    pub fn free_buffer(&mut self, id: LayerId) -> Result<(), LayerError> {
        if id >= 0 {
            return Err(LayerError::NotABuffer(id));
        }
        if !self.live.remove(&id) {
            return Err(LayerError::NotLive(id));
        }
        self.free.push(id);
        trace!(id, "buffer freed");
        Ok(())
    }

    /// Returns whether `id` is currently in use.
    pub fn is_live(&self, id: LayerId) -> bool {
        self.live.contains(&id)
    }

    /// The number of identifiers currently live, the default included.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
