//! Bounded pools of reusable digest engines.
//!
//! A pool is a bounded `flume` channel pre-filled with `capacity` engines.
//! Acquiring receives an engine, and the returned [`PooledEngine`] sends it
//! back when dropped, so an engine can never be kept past its scope.

use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use flume::{Receiver, Sender};
use ripemd::Ripemd160;
use sha2::{
    Sha256,
    digest::{Digest, FixedOutputReset, Output},
};

use crate::errors::CipherError;

pub type Sha256Pool = HashEnginePool<Sha256>;
pub type Ripemd160Pool = HashEnginePool<Ripemd160>;

/// A fixed-capacity pool of digest engines of one algorithm.
///
/// Clones share the same engines.
pub struct HashEnginePool<D> {
    sender: Sender<D>,
    receiver: Receiver<D>,
    capacity: usize,
}

impl<D> Clone for HashEnginePool<D> {
    fn clone(&self) -> Self {
        HashEnginePool {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            capacity: self.capacity,
        }
    }
}

impl<D> std::fmt::Debug for HashEnginePool<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashEnginePool")
            .field("capacity", &self.capacity)
            .field("available", &self.receiver.len())
            .finish()
    }
}

impl<D> HashEnginePool<D>
where
    D: Digest + FixedOutputReset,
{
    /// Creates a pool holding `capacity` fresh engines.
    ///
    /// # Returns
    ///
    /// * `Err(CipherError::InvalidPoolSize)` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CipherError> {
        if capacity == 0 {
            return Err(CipherError::InvalidPoolSize(capacity));
        }
        let (sender, receiver) = flume::bounded(capacity);
        for _ in 0..capacity {
            sender
                .try_send(<D as Digest>::new())
                .expect("channel is sized to hold every engine");
        }
        tracing::debug!(capacity, "hash engine pool created");
        Ok(HashEnginePool { sender, receiver, capacity })
    }

    /// Takes an engine out of the pool, waiting as long as needed for one to
    /// be released. The engine is reset before it is handed out.
    pub fn acquire(&self) -> PooledEngine<'_, D> {
        if self.receiver.is_empty() {
            tracing::trace!(capacity = self.capacity, "hash engine pool exhausted, waiting");
        }
        let engine = self
            .receiver
            .recv()
            .expect("pool holds a sender for its own channel");
        self.checkout(engine)
    }

    /// Like [`HashEnginePool::acquire`] but gives up after `wait`.
    pub fn acquire_timeout(&self, wait: Duration) -> Result<PooledEngine<'_, D>, CipherError> {
        match self.receiver.recv_timeout(wait) {
            Ok(engine) => Ok(self.checkout(engine)),
            Err(_) => {
                tracing::warn!(capacity = self.capacity, ?wait, "timed out waiting for a hash engine");
                Err(CipherError::PoolTimeout(wait))
            }
        }
    }

    /// Takes an engine only if one is free right now.
    pub fn try_acquire(&self) -> Option<PooledEngine<'_, D>> {
        self.receiver.try_recv().ok().map(|engine| self.checkout(engine))
    }

    /// Returns an engine to the pool. Dropping the handle has the same effect.
    pub fn release(&self, engine: PooledEngine<'_, D>) {
        if !self.sender.same_channel(&engine.pool.sender) {
            tracing::warn!("engine released to a pool it was not acquired from");
        }
        drop(engine);
    }

    fn checkout(&self, mut engine: D) -> PooledEngine<'_, D> {
        Digest::reset(&mut engine);
        PooledEngine { engine: Some(engine), pool: self }
    }
}

impl<D> HashEnginePool<D> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of engines currently sitting in the pool.
    pub fn available(&self) -> usize {
        self.receiver.len()
    }
}

/// An engine checked out of a [`HashEnginePool`].
///
/// Goes back to its pool on drop, including during unwinding.
pub struct PooledEngine<'a, D> {
    engine: Option<D>,
    pool: &'a HashEnginePool<D>,
}

impl<D> PooledEngine<'_, D>
where
    D: Digest + FixedOutputReset,
{
    /// Feeds `data` once, finalizes, and returns the engine to the pool.
    pub fn digest(mut self, data: impl AsRef<[u8]>) -> Output<D> {
        Digest::update(&mut *self, data);
        Digest::finalize_reset(&mut *self)
    }

    /// Finalizes whatever was fed through `update` and returns the engine.
    pub fn finalize(mut self) -> Output<D> {
        Digest::finalize_reset(&mut *self)
    }
}

impl<D> Deref for PooledEngine<'_, D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        self.engine.as_ref().expect("engine is present until drop")
    }
}

impl<D> DerefMut for PooledEngine<'_, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.engine.as_mut().expect("engine is present until drop")
    }
}

impl<D> Drop for PooledEngine<'_, D> {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            if self.pool.sender.try_send(engine).is_err() {
                tracing::warn!("hash engine pool is full, discarding engine");
            }
        }
    }
}
