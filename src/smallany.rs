use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr;

use crate::error::BadAnyCast;
use crate::space::S4;
use crate::storage::{Representation, Storage};
use crate::vtable::Operations;

/// A type-erased container for one value of any `Clone + 'static` type.
///
/// Values that fit in `Space` are stored inline, everything else goes behind a
/// single heap allocation. See [`fits`](crate::fits) for the exact rule.
///
/// The stored type can only be recovered exactly: a container holding an `i32`
/// does not answer to `i64`, and there is no subtype matching.
///
/// `SmallAny` is neither `Send` nor `Sync`, since the held type is not known to be.
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<smallany::SmallAny>();
/// ```
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<smallany::SmallAny>();
/// ```
///
/// # Example
///
/// ```
/// use smallany::SmallAny;
///
/// let mut a: SmallAny = SmallAny::new(42i32);
/// assert_eq!(a.cast::<i32>(), Ok(42));
///
/// *a.cast_mut::<i32>().unwrap() = 10;
/// assert_eq!(a.cast::<i32>(), Ok(10));
/// assert!(a.cast::<i16>().is_err());
/// ```
pub struct SmallAny<Space = S4> {
    storage: Storage<Space>,
    operations: Option<&'static Operations>,
    _marker: PhantomData<*mut ()>,
}

impl<Space> SmallAny<Space> {
    /// Creates an empty container. Does not allocate.
    pub const fn empty() -> Self {
        SmallAny {
            storage: Storage::uninit(),
            operations: None,
            _marker: PhantomData,
        }
    }

    /// Returns true if a value is held.
    pub fn has_value(&self) -> bool {
        self.operations.is_some()
    }

    /// Returns where the value is held.
    pub fn representation(&self) -> Representation {
        self.operations
            .map_or(Representation::Empty, |ops| ops.representation)
    }

    /// Returns true if the value is stored inside the container.
    pub fn is_inline(&self) -> bool {
        self.representation() == Representation::Inline
    }

    /// Returns true if the value is heap-allocated.
    pub fn is_heap(&self) -> bool {
        self.representation() == Representation::Heap
    }

    /// Returns the [`TypeId`] of the stored value, or `None` when empty.
    pub fn type_id(&self) -> Option<TypeId> {
        self.operations.map(|ops| (ops.type_id)())
    }

    /// Returns the type name of the stored value, or `None` when empty.
    pub fn type_name(&self) -> Option<&'static str> {
        self.operations.map(|ops| (ops.type_name)())
    }

    /// Returns true if the stored value is exactly a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id() == Some(TypeId::of::<T>())
    }

    /// Returns a reference to the value if it is exactly a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let ops = self.operations?;
        if (ops.type_id)() != TypeId::of::<T>() {
            return None;
        }
        // SAFETY: the bound table describes a live `T` in this storage,
        // and the pointer is only read through.
        unsafe { Some(&*(ops.get)(self.storage.as_ptr().cast_mut()).cast::<T>()) }
    }

    /// Returns a mutable reference to the value if it is exactly a `T`.
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        let ops = self.operations?;
        if (ops.type_id)() != TypeId::of::<T>() {
            return None;
        }
        // SAFETY: the bound table describes a live `T` in this storage.
        unsafe { Some(&mut *(ops.get)(self.storage.as_mut_ptr()).cast::<T>()) }
    }

    /// Moves the value out if it is exactly a `T`, otherwise gives the container back.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    ///
    /// let a: SmallAny = SmallAny::new(String::from("hello"));
    /// let a = a.downcast::<u32>().unwrap_err();
    /// assert_eq!(a.downcast::<String>().unwrap(), "hello");
    /// ```
    pub fn downcast<T: 'static>(mut self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        self.operations = None;
        // SAFETY: the storage holds a `T` placed for this `Space`, and the binding
        // was cleared so the value is not dropped again.
        Ok(unsafe { self.storage.read::<T>() })
    }

    /// Returns a clone of the value, or [`BadAnyCast`] if it is not exactly a `T`.
    pub fn cast<T: Clone + 'static>(&self) -> Result<T, BadAnyCast> {
        self.cast_ref::<T>().cloned()
    }

    /// Returns a reference to the value, or [`BadAnyCast`] if it is not exactly a `T`.
    pub fn cast_ref<T: 'static>(&self) -> Result<&T, BadAnyCast> {
        self.downcast_ref::<T>().ok_or(BadAnyCast)
    }

    /// Returns a mutable reference to the value, or [`BadAnyCast`] if it is not exactly a `T`.
    pub fn cast_mut<T: 'static>(&mut self) -> Result<&mut T, BadAnyCast> {
        self.downcast_mut::<T>().ok_or(BadAnyCast)
    }

    /// Moves the value out, or fails with [`BadAnyCast`] if it is not exactly a `T`.
    ///
    /// The container is consumed either way; use [`SmallAny::downcast`] to keep it on failure.
    pub fn into_value<T: 'static>(self) -> Result<T, BadAnyCast> {
        self.downcast::<T>().map_err(|_| BadAnyCast)
    }

    /// Moves the value into a new container, leaving this one empty.
    ///
    /// Heap values only hand over their pointer.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    ///
    /// let mut a: SmallAny = SmallAny::new(vec![1, 2, 3]);
    /// let b = a.take();
    /// assert!(!a.has_value());
    /// assert_eq!(b.cast_ref::<Vec<i32>>().unwrap(), &[1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Self {
        let Some(ops) = self.operations.take() else {
            return Self::empty();
        };
        let mut storage = Storage::uninit();
        // SAFETY: the table describes the live value in `self.storage`; the binding
        // was cleared above so the source slot is never used again.
        unsafe { (ops.relocate)(self.storage.as_mut_ptr(), storage.as_mut_ptr()) };
        SmallAny {
            storage,
            operations: Some(ops),
            _marker: PhantomData,
        }
    }

    /// Drops the value, if any, leaving the container empty.
    pub fn reset(&mut self) {
        // The binding goes first so a panicking destructor cannot cause a second drop.
        if let Some(ops) = self.operations.take() {
            // SAFETY: the table describes the live value in `self.storage`.
            unsafe { (ops.destroy)(self.storage.as_mut_ptr()) }
        }
    }

    /// Exchanges the values of two containers.
    ///
    /// Values are moved `other -> temp`, `self -> other`, `temp -> self`. Moving a
    /// heap value only moves its pointer.
    pub fn swap(&mut self, other: &mut Self) {
        if self.operations.is_none() && other.operations.is_none() {
            return;
        }
        let mut temp = Storage::<Space>::uninit();
        // SAFETY: each table describes the live value in its own container's
        // storage, and each value is relocated exactly once into an unused slot.
        unsafe {
            if let Some(ops) = other.operations {
                (ops.relocate)(other.storage.as_mut_ptr(), temp.as_mut_ptr());
            }
            if let Some(ops) = self.operations {
                (ops.relocate)(self.storage.as_mut_ptr(), other.storage.as_mut_ptr());
            }
            if let Some(ops) = other.operations {
                (ops.relocate)(temp.as_mut_ptr(), self.storage.as_mut_ptr());
            }
        }
        core::mem::swap(&mut self.operations, &mut other.operations);
    }
}

impl<Space: 'static> SmallAny<Space> {
    /// Stores `value`, inline if it fits in `Space` and on the heap otherwise.
    ///
    /// Passing a `SmallAny<Space>` yields that container itself, never a nested one.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    /// use smallany::space::S4;
    ///
    /// let small: SmallAny<S4> = SmallAny::new([0usize; 4]);
    /// assert!(small.is_inline());
    ///
    /// let large: SmallAny<S4> = SmallAny::new([0usize; 5]);
    /// assert!(large.is_heap());
    /// ```
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        let mut any = Self::empty();
        any.place(value);
        any
    }

    /// Stores the value built by `f`.
    pub fn new_with<T: Clone + 'static, F: FnOnce() -> T>(f: F) -> Self {
        Self::new(f())
    }

    /// Replaces the held value with `value`.
    ///
    /// A `SmallAny<Space>` passed as `value` replaces the container itself
    /// instead of being nested in it, like [`SmallAny::new`].
    pub fn set<T: Clone + 'static>(&mut self, value: T) {
        self.place(value);
    }

    /// Replaces the held value with `value` and returns a reference to it.
    ///
    /// A `SmallAny<Space>` passed as `value` is adopted as the container, so the
    /// returned reference is the container itself.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    ///
    /// let mut a: SmallAny = SmallAny::new(1u8);
    /// let b: SmallAny = SmallAny::new(2u16);
    /// let inner = a.emplace(b);
    /// assert_eq!(inner.cast::<u16>(), Ok(2));
    /// assert_eq!(a.cast::<u16>(), Ok(2));
    /// ```
    pub fn emplace<T: Clone + 'static>(&mut self, value: T) -> &mut T {
        self.place(value)
    }

    /// Replaces the held value with the one built by `f` and returns a reference to it.
    ///
    /// The old value is dropped only after `f` returns. A `SmallAny<Space>` built
    /// by `f` is adopted as the container, as with [`SmallAny::emplace`].
    pub fn emplace_with<T: Clone + 'static, F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.place(f())
    }

    /// Replaces the held value with a `T` collected from `iter` and returns a reference to it.
    ///
    /// # Example
    ///
    /// ```
    /// use smallany::SmallAny;
    /// use std::collections::BTreeSet;
    ///
    /// let mut a: SmallAny = SmallAny::empty();
    /// let set = a.emplace_from_iter::<BTreeSet<u8>, _>([3, 1, 2, 1]);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn emplace_from_iter<T, I>(&mut self, iter: I) -> &mut T
    where
        T: Clone + FromIterator<I::Item> + 'static,
        I: IntoIterator,
    {
        self.place(iter.into_iter().collect::<T>())
    }

    fn place<T: Clone + 'static>(&mut self, value: T) -> &mut T {
        let value = match Self::adopt(value) {
            Ok(any) => {
                *self = any;
                // SAFETY: `T` is `Self`.
                return unsafe { &mut *ptr::from_mut(self).cast::<T>() };
            }
            Err(value) => value,
        };

        // Build the new storage before dropping the old value.
        let storage = Storage::new(value);
        let ops = Operations::of::<T, Space>();
        self.reset();
        self.storage = storage;
        self.operations = Some(ops);
        // SAFETY: `ops` describes the `T` just placed in `self.storage`.
        unsafe { &mut *(ops.get)(self.storage.as_mut_ptr()).cast::<T>() }
    }

    fn adopt<T: 'static>(value: T) -> Result<Self, T> {
        if TypeId::of::<T>() != TypeId::of::<Self>() {
            return Err(value);
        }
        let value = ManuallyDrop::new(value);
        // SAFETY: `T` is `Self`, and `value` is never dropped.
        Ok(unsafe { ptr::read(ptr::from_ref::<T>(&*value).cast::<Self>()) })
    }
}

/// Builds a container with the default space from the value `f` returns.
///
/// # Example
///
/// ```
/// use smallany::make_any;
///
/// let a = make_any(|| String::from("built in place"));
/// assert_eq!(a.cast_ref::<String>().unwrap(), "built in place");
/// ```
pub fn make_any<T: Clone + 'static, F: FnOnce() -> T>(f: F) -> SmallAny {
    SmallAny::new_with(f)
}

/// Exchanges the values of two containers. Same as [`SmallAny::swap`].
pub fn swap<Space>(a: &mut SmallAny<Space>, b: &mut SmallAny<Space>) {
    a.swap(b)
}

impl<Space> Default for SmallAny<Space> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Space> Clone for SmallAny<Space> {
    fn clone(&self) -> Self {
        let Some(ops) = self.operations else {
            return Self::empty();
        };
        let mut storage = Storage::uninit();
        // SAFETY: the table describes the live value in `self.storage`; `storage`
        // stays unbound until the clone has been written.
        unsafe { (ops.clone)(self.storage.as_ptr(), storage.as_mut_ptr()) };
        SmallAny {
            storage,
            operations: Some(ops),
            _marker: PhantomData,
        }
    }
}

impl<Space> Drop for SmallAny<Space> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<Space> fmt::Debug for SmallAny<Space> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SmallAny")
            .field("type", &self.type_name())
            .field("representation", &self.representation())
            .finish()
    }
}
