use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::PoolConfig;

/// Default number of idle buffers a pool keeps around.
pub const DEFAULT_MAX_BUFFERS: usize = 32;

/// Default capacity above which a returned buffer is dropped instead of retained.
pub const DEFAULT_MAX_CAPACITY: usize = 4096;

static SHARED_NODE_POOL: ScratchPool<usize> = ScratchPool::new();

/// The process-wide pool backing traversals over [`crate::SpanTree`].
pub fn shared() -> &'static ScratchPool<usize> {
    &SHARED_NODE_POOL
}

/// Apply `config` to the process-wide pool.
pub fn configure_shared(config: &PoolConfig) {
    SHARED_NODE_POOL.configure(config);
    log::debug!(
        "shared scratch pool configured: max_buffers={}, max_capacity={}",
        config.max_buffers,
        config.max_capacity
    );
}

///
/// A bounded pool of reusable stack buffers.
///
/// Buffers are handed out as [`PooledStack`] guards that clear and return
/// themselves on drop, so a buffer goes back to the pool on every exit path of
/// the borrowing scope, unwinding included. At most `max_buffers` idle buffers
/// are retained; buffers that grew past `max_capacity` are dropped.
///
#[derive(Debug)]
pub struct ScratchPool<N> {
    buffers: Mutex<Vec<Vec<N>>>,
    max_buffers: AtomicUsize,
    max_capacity: AtomicUsize,
}

impl<N> ScratchPool<N> {
    pub const fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_BUFFERS, DEFAULT_MAX_CAPACITY)
    }

    pub const fn with_limits(max_buffers: usize, max_capacity: usize) -> Self {
        ScratchPool {
            buffers: Mutex::new(Vec::new()),
            max_buffers: AtomicUsize::new(max_buffers),
            max_capacity: AtomicUsize::new(max_capacity),
        }
    }

    /// Update the pool limits, dropping idle buffers that no longer fit.
    pub fn configure(&self, config: &PoolConfig) {
        self.max_buffers.store(config.max_buffers, Ordering::Relaxed);
        self.max_capacity
            .store(config.max_capacity, Ordering::Relaxed);

        let mut buffers = self.lock();
        buffers.retain(|buffer| buffer.capacity() <= config.max_capacity);
        buffers.truncate(config.max_buffers);
    }

    /// Borrow a cleared buffer, allocating a fresh one when the pool is drained.
    pub fn acquire(&self) -> PooledStack<'_, N> {
        let buffer = self.lock().pop().unwrap_or_default();
        PooledStack {
            buffer,
            pool: Some(self),
        }
    }

    /// Number of idle buffers currently held.
    pub fn retained(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, mut buffer: Vec<N>) {
        buffer.clear();
        if buffer.capacity() > self.max_capacity.load(Ordering::Relaxed) {
            log::trace!(
                "dropping scratch buffer with capacity {}",
                buffer.capacity()
            );
            return;
        }

        let mut buffers = self.lock();
        if buffers.len() < self.max_buffers.load(Ordering::Relaxed) {
            buffers.push(buffer);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<N>>> {
        // buffers are cleared on release, so a poisoned list is still usable
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N> Default for ScratchPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A stack buffer borrowed from a [`ScratchPool`], or a plain one when no pool is given.
#[derive(Debug)]
pub struct PooledStack<'p, N> {
    buffer: Vec<N>,
    pool: Option<&'p ScratchPool<N>>,
}

impl<'p, N> PooledStack<'p, N> {
    pub fn acquire_from(pool: Option<&'p ScratchPool<N>>) -> Self {
        match pool {
            Some(pool) => pool.acquire(),
            None => Self::unpooled(),
        }
    }

    pub fn unpooled() -> Self {
        PooledStack {
            buffer: Vec::new(),
            pool: None,
        }
    }
}

impl<N> Deref for PooledStack<'_, N> {
    type Target = Vec<N>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl<N> DerefMut for PooledStack<'_, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl<N> Drop for PooledStack<'_, N> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool {
            pool.release(mem::take(&mut self.buffer));
        }
    }
}
