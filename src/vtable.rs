use alloc::boxed::Box;
use core::any::{type_name, TypeId};
use core::ptr;

use crate::storage::{fits, Representation};

/// Type-erased operations for one stored type in one representation.
///
/// Every pointer argument points at the start of a container's storage slot.
/// Tables are promoted to `'static` and shared by all containers holding the
/// same type, so they are never built at runtime and never freed.
pub(crate) struct Operations {
    /// Drops the value, freeing its heap block if it has one.
    pub(crate) destroy: unsafe fn(*mut ()),
    /// Clones the value at `src` into the uninitialized `dst`.
    pub(crate) clone: unsafe fn(*const (), *mut ()),
    /// Moves the value from `src` into the uninitialized `dst`.
    /// `src` must not be used again.
    pub(crate) relocate: unsafe fn(*mut (), *mut ()),
    /// Returns a pointer to the value itself.
    pub(crate) get: unsafe fn(*mut ()) -> *mut (),
    pub(crate) type_id: fn() -> TypeId,
    pub(crate) type_name: fn() -> &'static str,
    pub(crate) representation: Representation,
}

impl Operations {
    /// Returns the table matching how [`Storage::new`](crate::storage::Storage::new)
    /// places a `T` in `Space`.
    pub(crate) fn of<T: Clone + 'static, Space>() -> &'static Operations {
        if fits::<T, Space>() {
            &Operations {
                destroy: destroy_inline::<T>,
                clone: clone_inline::<T>,
                relocate: relocate_inline::<T>,
                get: get_inline,
                type_id: TypeId::of::<T>,
                type_name: type_name::<T>,
                representation: Representation::Inline,
            }
        } else {
            &Operations {
                destroy: destroy_heap::<T>,
                clone: clone_heap::<T>,
                relocate: relocate_heap,
                get: get_heap,
                type_id: TypeId::of::<T>,
                type_name: type_name::<T>,
                representation: Representation::Heap,
            }
        }
    }
}

unsafe fn destroy_inline<T>(data: *mut ()) {
    // SAFETY: `data` holds a live inline `T`.
    unsafe { ptr::drop_in_place(data.cast::<T>()) }
}

unsafe fn destroy_heap<T>(data: *mut ()) {
    // SAFETY: `data` holds a pointer produced by `Box::<T>::into_raw`.
    drop(unsafe { Box::from_raw(data.cast::<*mut T>().read()) })
}

unsafe fn clone_inline<T: Clone>(src: *const (), dst: *mut ()) {
    // SAFETY: `src` holds a live inline `T`.
    let value = unsafe { &*src.cast::<T>() }.clone();
    // SAFETY: `dst` is a slot of the same space, so `T` fits it too.
    unsafe { dst.cast::<T>().write(value) }
}

unsafe fn clone_heap<T: Clone>(src: *const (), dst: *mut ()) {
    // SAFETY: `src` holds a pointer to a live heap `T`.
    let value = unsafe { &*src.cast::<*const T>().read() }.clone();
    let heap = Box::into_raw(Box::new(value));
    // SAFETY: every slot has room for a pointer.
    unsafe { dst.cast::<*mut T>().write(heap) }
}

unsafe fn relocate_inline<T>(src: *mut (), dst: *mut ()) {
    // SAFETY: `src` holds a live inline `T`, `dst` is a distinct slot of the same space.
    unsafe { ptr::copy_nonoverlapping(src.cast::<T>(), dst.cast::<T>(), 1) }
}

unsafe fn relocate_heap(src: *mut (), dst: *mut ()) {
    // SAFETY: both slots have room for a pointer; only ownership of the block moves.
    unsafe { dst.cast::<*mut ()>().write(src.cast::<*mut ()>().read()) }
}

unsafe fn get_inline(data: *mut ()) -> *mut () {
    data
}

unsafe fn get_heap(data: *mut ()) -> *mut () {
    // SAFETY: `data` holds the heap pointer.
    unsafe { data.cast::<*mut ()>().read() }
}
