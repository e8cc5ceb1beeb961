//! # SmallAny: Type-Erased Values With Inline Storage
//!
//! [`SmallAny`] holds one value of any `Clone + 'static` type behind a single,
//! non-generic type. Small values are stored inside the container itself and
//! larger ones fall back to a heap allocation, so holding an integer or a short
//! tuple never allocates.
//!
//! ## Core Concept
//!
//! A `Box<dyn Any>` always heap-allocates and cannot be cloned. [`SmallAny`]
//! picks a storage strategy when a value is placed into it and binds a static,
//! per-type table of operations. Cloning, moving, dropping and type checks all
//! go through that table, so the container never needs to know the stored type
//! again until it is asked for it by name.
//!
//! ## Quick Start
//!
//! ```rust
//! use smallany::SmallAny;
//!
//! // Small values are stored inline
//! let mut a: SmallAny = SmallAny::new(42i32);
//! assert!(a.is_inline());
//! assert_eq!(a.cast::<i32>(), Ok(42));
//!
//! // Large values go on the heap
//! let big: SmallAny = SmallAny::new([0u64; 32]);
//! assert!(big.is_heap());
//!
//! // Containers clone deeply
//! let b = a.clone();
//! *a.cast_mut::<i32>().unwrap() = 10;
//! assert_eq!(b.cast::<i32>(), Ok(42));
//!
//! // Type recovery is exact
//! assert!(a.cast::<i64>().is_err());
//! assert!(a.downcast_ref::<u32>().is_none());
//! ```
//!
//! ## Configuration
//!
//! ### Feature Flags
//!
//! - **`std`** (enabled by default)
//!   - Links to the standard library
//!   - Disable for `#![no_std]` environments: `default-features = false`
//!
//! ### Custom Space Types
//!
//! The inline capacity is the `Space` type parameter. The default, [`space::S4`],
//! holds four pointer widths at pointer alignment. Any `Sized` type can serve as
//! a space:
//!
//! ```rust
//! use smallany::SmallAny;
//!
//! // Custom 128-byte capacity
//! type MySpace = [u64; 16];
//! type MyAny = SmallAny<MySpace>;
//!
//! let value = MyAny::new([0u8; 100]);
//! assert!(value.is_inline()); // Fits in custom space
//! ```
//!
//! **Important**: Space alignment matters! If the space alignment is smaller than the value's
//! required alignment, the value will be heap-allocated regardless of size.
//!
//! ## Casting
//!
//! The `downcast_ref` and `downcast_mut` accessors return `None` on a type
//! mismatch. The `cast`, `cast_ref`, `cast_mut` and `into_value` accessors return
//! [`BadAnyCast`] instead.
//!
//! ```rust
//! use smallany::{BadAnyCast, SmallAny};
//!
//! let a: SmallAny = SmallAny::new(String::from("hello"));
//!
//! assert_eq!(a.downcast_ref::<&str>(), None);
//! assert_eq!(a.cast_ref::<&str>(), Err(BadAnyCast));
//! assert_eq!(a.into_value::<String>().unwrap(), "hello");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::as_conversions)]

extern crate alloc;

mod error;
mod smallany;
pub mod space;
mod storage;
mod vtable;

pub use crate::error::BadAnyCast;
pub use crate::smallany::{make_any, swap, SmallAny};
pub use crate::storage::{classify, fits, Representation};
