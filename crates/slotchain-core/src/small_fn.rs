//! SmallFn - 固定容量インラインストレージの型消去 callable
//!
//! 単項の callable `Fn(A) -> R` を 1 つだけ、ヒープを使わずに保持します。
//! 具体型は bind 時にだけ分かり、その後は bind 時に捕捉した関数ポインタ
//! (invoke / destroy / clone) 経由で操作します。
//!
//! # 学習ポイント
//! - `MaybeUninit` + `#[repr(align)]` による生ストレージ
//! - ジェネリック関数を関数ポインタとして保存する手書き vtable
//! - associated const の `assert!` による post-monomorphization チェック
//!   (容量オーバーはビルドエラーで、ヒープへのフォールバックはしない)
//!
//! Rust の move は常にビット単位のコピーなので、move 用の関数ポインタは
//! 持ちません。move-assign は `*dst = src` (古い値は drop) や
//! `std::mem::take` で表現します。
//!
//! ```compile_fail
//! use slotchain_core::SmallFn;
//!
//! let big = [7u8; 128];
//! // 128 bytes of captured state do not fit the default 64-byte storage.
//! let f: SmallFn<u8, u8> = SmallFn::new(move |x: u8| x.wrapping_add(big[0]));
//! ```
//!
//! ```compile_fail
//! use slotchain_core::SmallFn;
//!
//! #[derive(Clone, Copy)]
//! #[repr(align(32))]
//! struct Wide(u8);
//!
//! impl Wide {
//!     fn get(&self) -> u8 {
//!         self.0
//!     }
//! }
//!
//! let w = Wide(1);
//! // The method call captures `w` whole, so the closure is 32-byte aligned.
//! let f: SmallFn<u8, u8> = SmallFn::new(move |x: u8| x + w.get());
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::mem::{MaybeUninit, align_of, size_of};
use std::ptr;

/// Inline capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 64;

/// Alignment of the inline storage. Matches `max_align_t` on common 64-bit targets.
pub const STORAGE_ALIGN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("empty invocation: no callable is bound to this SmallFn")]
    Empty,
}

#[repr(C, align(16))]
struct InlineStorage<const N: usize> {
    bytes: [MaybeUninit<u8>; N],
}

const _: () = assert!(align_of::<InlineStorage<0>>() == STORAGE_ALIGN);

impl<const N: usize> InlineStorage<N> {
    const fn uninit() -> Self {
        Self {
            bytes: [MaybeUninit::uninit(); N],
        }
    }

    fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr().cast()
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr().cast()
    }
}

/// Function pointers bound to one concrete callable type.
struct VTable<A, R> {
    invoke: unsafe fn(*const u8, A) -> R,
    destroy: unsafe fn(*mut u8),
    clone: unsafe fn(*const u8, *mut u8),
}

impl<A, R> Clone for VTable<A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, R> Copy for VTable<A, R> {}

unsafe fn invoke_erased<F, A, R>(storage: *const u8, arg: A) -> R
where
    F: Fn(A) -> R,
{
    // SAFETY: the caller passes storage holding a live `F`, bound together with this pointer.
    let f = unsafe { &*storage.cast::<F>() };
    f(arg)
}

unsafe fn destroy_erased<F>(storage: *mut u8) {
    // SAFETY: storage holds a live `F`; the vtable is cleared before this runs.
    unsafe { ptr::drop_in_place(storage.cast::<F>()) }
}

unsafe fn clone_erased<F: Clone>(src: *const u8, dst: *mut u8) {
    // SAFETY: src holds a live `F`; dst is uninitialised storage with the same capacity.
    unsafe {
        let f = &*src.cast::<F>();
        ptr::write(dst.cast::<F>(), f.clone());
    }
}

/// Compile-time fit check for a callable type.
struct Fits<F, const N: usize>(PhantomData<F>);

impl<F, const N: usize> Fits<F, N> {
    const OK: () = {
        assert!(
            size_of::<F>() <= N,
            "SmallFn: callable too large for inline storage"
        );
        assert!(
            align_of::<F>() <= STORAGE_ALIGN,
            "SmallFn: callable alignment exceeds inline storage alignment"
        );
    };
}

/// Fixed-capacity, type-erased holder for one `Fn(A) -> R`.
///
/// Either empty (no vtable, storage uninitialised) or bound (vtable set,
/// storage holds exactly one live value of the bound type).
///
/// # 使用例
/// ```
/// use slotchain_core::SmallFn;
///
/// let double: SmallFn<i32, i32> = SmallFn::new(|x: i32| x * 2);
/// assert_eq!(double.call(21), Ok(42));
///
/// let empty: SmallFn<i32, i32> = SmallFn::empty();
/// assert!(empty.call(1).is_err());
/// ```
pub struct SmallFn<A, R = (), const N: usize = DEFAULT_CAPACITY> {
    storage: InlineStorage<N>,
    vtable: Option<VTable<A, R>>,
    // Stored callables are not required to be Send or Sync.
    _not_send: PhantomData<*const ()>,
}

impl<A, R, const N: usize> SmallFn<A, R, N> {
    pub const fn empty() -> Self {
        Self {
            storage: InlineStorage::uninit(),
            vtable: None,
            _not_send: PhantomData,
        }
    }

    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Clone + 'static,
    {
        let mut this = Self::empty();
        this.emplace(f);
        this
    }

    /// Bind `f`, tearing down any previously bound callable first.
    pub fn emplace<F>(&mut self, f: F)
    where
        F: Fn(A) -> R + Clone + 'static,
    {
        let () = Fits::<F, N>::OK;

        self.reset();
        // SAFETY: `Fits` guarantees size and alignment; storage is vacant after reset.
        unsafe { ptr::write(self.storage.as_mut_ptr().cast::<F>(), f) };
        self.vtable = Some(VTable {
            invoke: invoke_erased::<F, A, R>,
            destroy: destroy_erased::<F>,
            clone: clone_erased::<F>,
        });
    }

    /// Destroy the bound callable, if any. The instance is empty afterwards.
    pub fn reset(&mut self) {
        // Taken before destroy so a panicking destructor cannot cause a second drop.
        if let Some(vtable) = self.vtable.take() {
            // SAFETY: the vtable was bound to the value living in storage.
            unsafe { (vtable.destroy)(self.storage.as_mut_ptr()) };
        }
    }

    pub fn is_bound(&self) -> bool {
        self.vtable.is_some()
    }

    pub const fn capacity() -> usize {
        N
    }

    pub fn call(&self, arg: A) -> Result<R, CallError> {
        let vtable = self.vtable.as_ref().ok_or(CallError::Empty)?;
        // SAFETY: a set vtable means storage holds the value it was bound to.
        Ok(unsafe { (vtable.invoke)(self.storage.as_ptr(), arg) })
    }
}

impl<A, R, const N: usize> Clone for SmallFn<A, R, N> {
    fn clone(&self) -> Self {
        let mut out = Self::empty();
        if let Some(vtable) = self.vtable {
            // SAFETY: source storage is live for this vtable; `out` storage is vacant.
            unsafe { (vtable.clone)(self.storage.as_ptr(), out.storage.as_mut_ptr()) };
            out.vtable = Some(vtable);
        }
        out
    }
}

impl<A, R, const N: usize> Default for SmallFn<A, R, N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A, R, const N: usize> Drop for SmallFn<A, R, N> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<A, R, const N: usize> fmt::Debug for SmallFn<A, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmallFn")
            .field("bound", &self.is_bound())
            .field("capacity", &N)
            .finish()
    }
}
