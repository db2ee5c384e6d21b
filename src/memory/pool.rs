use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

/// Bounded pool of reusable objects.
///
/// A checkout hands out an idle object, or builds a fresh one when none is
/// idle. The returned guard gives exclusive access and puts the object back
/// when dropped, so an early return with `?` still returns it. At most
/// `capacity` idle objects are retained; extras are dropped on return.
pub struct ObjectPool<T> {
    idle: Mutex<Vec<T>>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    capacity: usize,
    created: AtomicUsize,
}

impl<T> ObjectPool<T> {
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        ObjectPool {
            idle: Mutex::new(Vec::with_capacity(capacity)),
            factory: Box::new(factory),
            capacity,
            created: AtomicUsize::new(0),
        }
    }

    pub fn checkout(&self) -> Pooled<'_, T> {
        let item = self.idle.lock().pop().unwrap_or_else(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            (self.factory)()
        });

        Pooled {
            pool: self,
            item: ManuallyDrop::new(item),
        }
    }

    fn give_back(&self, item: T) {
        let mut idle = self.idle.lock();
        if idle.len() < self.capacity {
            idle.push(item);
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Number of objects the factory has built over the pool's lifetime.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

/// Exclusive checkout from an [`ObjectPool`].
pub struct Pooled<'a, T> {
    pool: &'a ObjectPool<T>,
    item: ManuallyDrop<T>,
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        // SAFETY: `item` is not touched again after this point.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.give_back(item);
    }
}
