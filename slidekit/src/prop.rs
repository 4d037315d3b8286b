//! Shared handler handles with identity equality.
//!
//! Change listeners, formatters, the display scale and global event
//! handlers are stored as reference-counted trait objects. Two handles are
//! equal only when one was cloned from the other, which is what lets
//! [`crate::Slider::remove_on_change`] and [`crate::EventTarget`] remove
//! exactly the registration they were given.

use std::{fmt, sync::Arc};

/// A cloneable handle around a shared, possibly unsized, handler.
pub struct Slot<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Slot<F> {
    /// Wraps an already shared handler.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self(handler)
    }

    /// Borrows the handler.
    pub fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// A `Fn(T) -> R` handler, for example a change listener
/// (`CallbackWith<SliderChange>`) or a label formatter
/// (`CallbackWith<f64, String>`).
pub struct CallbackWith<T, R = ()>(Slot<dyn Fn(T) -> R + Send + Sync>);

impl<T, R> CallbackWith<T, R> {
    /// Wraps a closure in a fresh handle.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self(Slot::from_shared(Arc::new(handler)))
    }

    /// Runs the handler.
    pub fn call(&self, value: T) -> R {
        (self.0.get())(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackWith(..)")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn formatter_clone_is_the_same_handler() {
        let percent = CallbackWith::new(|value: f64| format!("{value}%"));
        let clone = percent.clone();
        assert_eq!(percent, clone);
        assert_eq!(clone.call(40.0), "40%");
    }

    #[test]
    fn equal_closures_are_different_handlers() {
        let first = CallbackWith::new(|value: f64| value);
        let second = CallbackWith::new(|value: f64| value);
        assert_ne!(first, second);
    }

    #[test]
    fn slot_clones_share_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let slot: Slot<dyn Fn(u32) + Send + Sync> = Slot::from_shared(Arc::new(move |n: u32| {
            counter.fetch_add(n as usize, Ordering::SeqCst);
        }));
        let copy = slot.clone();
        (slot.get())(2);
        (copy.get())(3);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(slot == copy);
    }
}
