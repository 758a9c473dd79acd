//! Object handles and soft references.
//!
//! [`Obj`] is the nullable, liveness-checked handle the walker accepts as a
//! container and visits as an object-pointer field. [`SoftRef`] and its typed
//! wrappers are deferred references resolved by identity path rather than
//! strong ownership; the typed wrappers are layout-compatible with the erased
//! form, which is what makes the erased union search possible.

use core::cell::{Cell, Ref, RefCell, RefMut};
use core::fmt;
use core::marker::PhantomData;
use std::rc::Rc;

use crate::member::Member;
use crate::shape::{Class, Object, Shape};

struct Slot<T: ?Sized> {
    alive: Cell<bool>,
    value: RefCell<T>,
}

/// A nullable, reference-counted handle to an object-like record.
///
/// A handle is *valid* when it is non-null and its referent has not been
/// reclaimed. The walker checks validity before dereferencing a handle passed
/// as a container; an invalid handle yields a zero-invocation walk rather
/// than an error.
pub struct Obj<T: ?Sized + Object> {
    slot: Option<Rc<Slot<T>>>,
}

impl<T: Object> Obj<T> {
    /// Allocates a new referent and returns a valid handle to it.
    pub fn new(value: T) -> Self {
        Obj {
            slot: Some(Rc::new(Slot {
                alive: Cell::new(true),
                value: RefCell::new(value),
            })),
        }
    }

    /// Erases the concrete class, keeping dynamic field-list resolution.
    ///
    /// Walking the returned handle still discovers the concrete class's full
    /// field list through [`Object::class`].
    pub fn into_dyn(self) -> Obj<dyn Object> {
        let slot: Option<Rc<Slot<dyn Object>>> = match self.slot {
            Some(slot) => Some(slot),
            None => None,
        };
        Obj { slot }
    }
}

impl<T: ?Sized + Object> Obj<T> {
    /// The null handle.
    pub fn null() -> Self {
        Obj { slot: None }
    }

    /// Whether this handle is null.
    pub fn is_null(&self) -> bool {
        self.slot.is_none()
    }

    /// Whether this handle is non-null and its referent is still live.
    ///
    /// A handle whose referent was [destroyed](Obj::destroy) is non-null but
    /// no longer valid — the reclaimed-but-not-yet-nulled case.
    pub fn is_valid(&self) -> bool {
        self.slot.as_deref().is_some_and(|slot| slot.alive.get())
    }

    /// Marks the referent reclaimed. Every clone of this handle stops being
    /// valid; the storage itself is freed when the last clone drops.
    pub fn destroy(&self) {
        if let Some(slot) = &self.slot {
            slot.alive.set(false);
        }
    }

    /// Borrows the referent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is null or the referent is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.slot.as_ref().expect("borrow of a null Obj").value.borrow()
    }

    /// Mutably borrows the referent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is null or the referent is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.slot
            .as_ref()
            .expect("borrow of a null Obj")
            .value
            .borrow_mut()
    }
}

impl<T: ?Sized + Object> Clone for Obj<T> {
    fn clone(&self) -> Self {
        Obj {
            slot: self.slot.clone(),
        }
    }
}

impl<T: ?Sized + Object> Default for Obj<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + Object> fmt::Debug for Obj<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            None => f.write_str("Obj(null)"),
            Some(slot) => match slot.value.try_borrow() {
                Ok(value) => {
                    let stale = if slot.alive.get() { "" } else { ", stale" };
                    write!(f, "Obj({}{stale})", value.class().name)
                }
                Err(_) => f.write_str("Obj(<borrowed>)"),
            },
        }
    }
}

// SAFETY: `matches` only accepts object shapes whose declared class is
// exactly `C`, and such fields hold an `Obj<C>`.
unsafe impl<C: Class> Member for Obj<C> {
    const SHAPE: &'static Shape = &Shape::Object(C::CLASS);

    fn matches(shape: &Shape) -> bool {
        matches!(shape, Shape::Object(class) if class.is::<C>())
    }
}

/// A type-erased soft reference: a deferred handle resolved by identity path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftRef {
    path: Option<String>,
}

impl SoftRef {
    /// A soft reference to the given identity path.
    pub fn new(path: impl Into<String>) -> Self {
        SoftRef {
            path: Some(path.into()),
        }
    }

    /// The identity path, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Whether this reference points at anything.
    pub fn is_set(&self) -> bool {
        self.path.is_some()
    }

    /// Clears the reference.
    pub fn reset(&mut self) {
        self.path = None;
    }
}

// SAFETY: every soft-reference field is layout-compatible with `SoftRef` (the
// typed wrappers below are `repr(transparent)` over it), so the erased form
// matches all of them — typed object and class references included.
unsafe impl Member for SoftRef {
    const SHAPE: &'static Shape = &Shape::SoftRef;

    fn matches(_shape: &Shape) -> bool {
        true
    }
}

/// A soft reference to an *instance* of class `C`.
#[repr(transparent)]
pub struct SoftObjectRef<C: Class> {
    raw: SoftRef,
    _class: PhantomData<fn() -> C>,
}

impl<C: Class> SoftObjectRef<C> {
    /// A soft reference to the instance at the given identity path.
    pub fn new(path: impl Into<String>) -> Self {
        SoftObjectRef {
            raw: SoftRef::new(path),
            _class: PhantomData,
        }
    }

    /// The erased form of this reference.
    pub fn as_raw(&self) -> &SoftRef {
        &self.raw
    }

    /// The identity path, if set.
    pub fn path(&self) -> Option<&str> {
        self.raw.path()
    }

    /// Whether this reference points at anything.
    pub fn is_set(&self) -> bool {
        self.raw.is_set()
    }
}

impl<C: Class> Clone for SoftObjectRef<C> {
    fn clone(&self) -> Self {
        SoftObjectRef {
            raw: self.raw.clone(),
            _class: PhantomData,
        }
    }
}

impl<C: Class> Default for SoftObjectRef<C> {
    fn default() -> Self {
        SoftObjectRef {
            raw: SoftRef::default(),
            _class: PhantomData,
        }
    }
}

impl<C: Class> fmt::Debug for SoftObjectRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoftObjectRef<{}>({:?})", C::CLASS.name, self.raw.path)
    }
}

// SAFETY: `matches` only accepts soft-object shapes targeting exactly `C`,
// and such fields hold a `SoftObjectRef<C>`.
unsafe impl<C: Class> Member for SoftObjectRef<C> {
    const SHAPE: &'static Shape = &Shape::SoftObject(C::CLASS);

    fn matches(shape: &Shape) -> bool {
        matches!(shape, Shape::SoftObject(class) if class.is::<C>())
    }
}

/// A soft reference to the class `C` *itself* rather than an instance of it.
#[repr(transparent)]
pub struct SoftClassRef<C: Class> {
    raw: SoftRef,
    _class: PhantomData<fn() -> C>,
}

impl<C: Class> SoftClassRef<C> {
    /// A soft reference to the class at the given identity path.
    pub fn new(path: impl Into<String>) -> Self {
        SoftClassRef {
            raw: SoftRef::new(path),
            _class: PhantomData,
        }
    }

    /// The erased form of this reference.
    pub fn as_raw(&self) -> &SoftRef {
        &self.raw
    }

    /// The identity path, if set.
    pub fn path(&self) -> Option<&str> {
        self.raw.path()
    }

    /// Whether this reference points at anything.
    pub fn is_set(&self) -> bool {
        self.raw.is_set()
    }
}

impl<C: Class> Clone for SoftClassRef<C> {
    fn clone(&self) -> Self {
        SoftClassRef {
            raw: self.raw.clone(),
            _class: PhantomData,
        }
    }
}

impl<C: Class> Default for SoftClassRef<C> {
    fn default() -> Self {
        SoftClassRef {
            raw: SoftRef::default(),
            _class: PhantomData,
        }
    }
}

impl<C: Class> fmt::Debug for SoftClassRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoftClassRef<{}>({:?})", C::CLASS.name, self.raw.path)
    }
}

// SAFETY: `matches` only accepts soft-class shapes whose meta class is
// exactly `C`, and such fields hold a `SoftClassRef<C>`.
unsafe impl<C: Class> Member for SoftClassRef<C> {
    const SHAPE: &'static Shape = &Shape::SoftClass(C::CLASS);

    fn matches(shape: &Shape) -> bool {
        matches!(shape, Shape::SoftClass(class) if class.is::<C>())
    }
}
