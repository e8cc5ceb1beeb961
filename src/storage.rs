use alloc::boxed::Box;
use core::mem::{align_of, size_of, ManuallyDrop, MaybeUninit};
use core::ptr;

/// Where a [`SmallAny`](crate::SmallAny) keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// No value is held.
    Empty,
    /// The value lives inside the container's own buffer.
    Inline,
    /// The value lives in a single heap allocation owned by the container.
    Heap,
}

/// Returns true if `T` can be stored inline in `Space`.
///
/// The size check is inclusive, and `T` must not require a stricter alignment
/// than `Space`. Every other type is stored on the heap.
///
/// # Example
///
/// ```
/// use smallany::fits;
/// use smallany::space::{S1, S4};
///
/// assert!(fits::<[usize; 4], S4>());
/// assert!(!fits::<[usize; 5], S4>());
/// assert!(!fits::<(u8, u8), [u8; 1]>());
/// assert!(fits::<(), S1>());
/// ```
pub const fn fits<T, Space>() -> bool {
    size_of::<T>() <= size_of::<Space>() && align_of::<T>() <= align_of::<Space>()
}

/// Returns the representation a value of type `T` gets in a container with `Space`.
///
/// Never returns [`Representation::Empty`].
pub const fn classify<T, Space>() -> Representation {
    if fits::<T, Space>() {
        Representation::Inline
    } else {
        Representation::Heap
    }
}

#[repr(C)]
union Slot<Space> {
    inline: ManuallyDrop<Space>,
    heap: *mut (),
}

/// Raw, untyped storage for one value.
///
/// `Storage` never drops what it holds; the owner does that through the bound
/// operations table.
pub(crate) struct Storage<Space> {
    slot: MaybeUninit<Slot<Space>>,
}

impl<Space> Storage<Space> {
    pub(crate) const fn uninit() -> Self {
        Storage {
            slot: MaybeUninit::uninit(),
        }
    }

    /// Places `value` inline or on the heap, as [`fits`] decides.
    pub(crate) fn new<T>(value: T) -> Self {
        let mut storage = Self::uninit();
        if fits::<T, Space>() {
            // SAFETY: `T` is no larger and no more aligned than `Space`,
            // and the slot is at least as large and as aligned as `Space`.
            unsafe { storage.as_mut_ptr().cast::<T>().write(value) };
        } else {
            let heap = Box::into_raw(Box::new(value));
            storage.slot.write(Slot { heap: heap.cast() });
        }
        storage
    }

    /// Moves the stored `T` out.
    ///
    /// # Safety
    ///
    /// The storage must hold a live `T` placed by [`Storage::new`] (or a table of
    /// the same `T` and `Space`), and must be treated as uninitialized afterwards.
    pub(crate) unsafe fn read<T>(&mut self) -> T {
        if fits::<T, Space>() {
            // SAFETY: guaranteed by the caller.
            unsafe { self.as_mut_ptr().cast::<T>().read() }
        } else {
            // SAFETY: guaranteed by the caller; the pointer came from `Box::into_raw`.
            let heap = unsafe { Box::from_raw(self.slot.assume_init_ref().heap.cast::<T>()) };
            *heap
        }
    }

    /// Address of the inline buffer. The heap pointer shares it, as both fields sit at offset 0.
    pub(crate) fn as_ptr(&self) -> *const () {
        // SAFETY: a place projection, nothing is read.
        unsafe { ptr::addr_of!((*self.slot.as_ptr()).inline) }.cast()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut () {
        // SAFETY: a place projection, nothing is read.
        unsafe { ptr::addr_of_mut!((*self.slot.as_mut_ptr()).inline) }.cast()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::*;

    #[repr(align(16))]
    struct Aligned16;

    #[test]
    fn test_boundary() {
        assert!(fits::<[usize; 4], S4>());
        assert!(!fits::<[usize; 5], S4>());
        assert!(fits::<[u8; 32], [u8; 32]>());
        assert!(!fits::<[u8; 33], [u8; 32]>());
    }

    #[test]
    fn test_alignment() {
        assert!(!fits::<Aligned16, S64>());
        assert!(!fits::<u16, [u8; 128]>());
        assert!(fits::<u16, [u16; 1]>());
    }

    #[test]
    fn test_zst() {
        assert!(fits::<(), S1>());
        assert!(fits::<(), ()>());
        assert_eq!(classify::<[usize; 0], S1>(), Representation::Inline);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify::<u32, S1>(), Representation::Inline);
        assert_eq!(classify::<(usize, usize), S1>(), Representation::Heap);
        assert_eq!(classify::<Aligned16, S4>(), Representation::Heap);
    }

    #[test]
    fn test_new_read() {
        let mut inline = Storage::<S1>::new(7usize);
        assert_eq!(unsafe { inline.read::<usize>() }, 7);

        let mut heap = Storage::<S1>::new([1usize, 2, 3]);
        assert_eq!(unsafe { heap.read::<[usize; 3]>() }, [1, 2, 3]);
    }

    #[test]
    fn test_slot_layout() {
        assert_eq!(size_of::<Storage<S1>>(), size_of::<usize>());
        assert_eq!(size_of::<Storage<S4>>(), size_of::<S4>());
        // a tiny space still has room for the heap pointer
        assert_eq!(size_of::<Storage<[u8; 1]>>(), size_of::<*mut ()>());
        assert_eq!(align_of::<Storage<[u8; 1]>>(), align_of::<*mut ()>());

        let mut heap = Storage::<[u8; 1]>::new(0x1234_5678u32);
        assert_eq!(unsafe { heap.read::<u32>() }, 0x1234_5678);
    }
}
