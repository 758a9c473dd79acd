#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod handle;
mod macros;
mod member;
mod shape;

pub use handle::{Obj, SoftClassRef, SoftObjectRef, SoftRef};
pub use member::Member;
pub use shape::{
    Class, ClassType, Field, FieldKind, Object, Record, RecordType, Shape, Struct, StructType,
};

/// A container the walker can traverse immutably.
///
/// Implemented for `&R` and `&mut R` where `R` is a [`Record`], for
/// `Option<&R>` / `Option<&mut R>` (a plain nullable reference — `None` walks
/// nothing), and for [`Obj<T>`] handles passed by value (a handle is a cheap
/// clone; a null or stale one walks nothing).
pub trait RecordRef {
    /// The record type behind this container.
    type Target: Record + ?Sized;

    /// Runs `f` on the referenced record, or not at all if the container is
    /// null or stale.
    fn with_record<F: FnOnce(&Self::Target)>(self, f: F);
}

/// A container the walker can traverse mutably.
///
/// Shared references deliberately don't implement this: pairing a shared
/// container with a mutating visitor is a compile error.
pub trait RecordMut: RecordRef {
    /// Runs `f` on the referenced record, or not at all if the container is
    /// null or stale.
    fn with_record_mut<F: FnOnce(&mut Self::Target)>(self, f: F);
}

impl<R: Record + ?Sized> RecordRef for &R {
    type Target = R;

    fn with_record<F: FnOnce(&R)>(self, f: F) {
        f(self)
    }
}

impl<R: Record + ?Sized> RecordRef for &mut R {
    type Target = R;

    fn with_record<F: FnOnce(&R)>(self, f: F) {
        f(self)
    }
}

impl<R: Record + ?Sized> RecordMut for &mut R {
    fn with_record_mut<F: FnOnce(&mut R)>(self, f: F) {
        f(self)
    }
}

impl<R: Record + ?Sized> RecordRef for Option<&R> {
    type Target = R;

    fn with_record<F: FnOnce(&R)>(self, f: F) {
        if let Some(record) = self {
            f(record)
        }
    }
}

impl<R: Record + ?Sized> RecordRef for Option<&mut R> {
    type Target = R;

    fn with_record<F: FnOnce(&R)>(self, f: F) {
        if let Some(record) = self {
            f(record)
        }
    }
}

impl<R: Record + ?Sized> RecordMut for Option<&mut R> {
    fn with_record_mut<F: FnOnce(&mut R)>(self, f: F) {
        if let Some(record) = self {
            f(record)
        }
    }
}

// Handles are containers by value, like any other cheap pointer. The borrow
// of the referent lasts exactly one walk.
impl<T: Object + Record + ?Sized> RecordRef for Obj<T> {
    type Target = T;

    fn with_record<F: FnOnce(&T)>(self, f: F) {
        if self.is_valid() {
            f(&self.borrow())
        } else {
            log::trace!("skipping walk of invalid handle {:?}", self);
        }
    }
}

impl<T: Object + Record + ?Sized> RecordMut for Obj<T> {
    fn with_record_mut<F: FnOnce(&mut T)>(self, f: F) {
        if self.is_valid() {
            f(&mut self.borrow_mut())
        } else {
            log::trace!("skipping walk of invalid handle {:?}", self);
        }
    }
}

/// Invokes `visitor` once per field of `container` whose type is exactly the
/// visitor's parameter type, in declaration order.
///
/// The target type is inferred from the closure's parameter annotation.
/// Matching is exact and recursive — see the crate docs for the rules per
/// shape. A container with zero matching fields, or a null/stale container,
/// is a valid walk of zero invocations. The walk never terminates early.
///
/// ```
/// reflect_walk::reflect_struct! {
///     struct Mix {
///         a: i32,
///         gain: f32,
///         b: i32,
///     }
/// }
///
/// let mix = Mix { a: 1, gain: 0.5, b: 2 };
/// let mut seen = Vec::new();
/// reflect_walk::for_each_member(&mix, |each: &i32| seen.push(*each));
/// assert_eq!(seen, [1, 2]);
/// ```
pub fn for_each_member<C, T, F>(container: C, mut visitor: F)
where
    C: RecordRef,
    T: Member,
    F: FnMut(&T),
{
    container.with_record(|record| walk(record, |value, _name| visitor(value)));
}

/// Like [`for_each_member`], but the visitor receives `&mut` and may mutate
/// matching fields in place.
///
/// The container must support mutable access ([`RecordMut`]); passing a
/// shared reference here fails to compile.
///
/// ```
/// reflect_walk::reflect_struct! {
///     #[derive(Default)]
///     struct Counters {
///         hits: i32,
///         misses: i32,
///     }
/// }
///
/// let mut counters = Counters::default();
/// reflect_walk::for_each_member_mut(&mut counters, |each: &mut i32| *each = 7);
/// assert_eq!(counters.hits, 7);
/// assert_eq!(counters.misses, 7);
/// ```
pub fn for_each_member_mut<C, T, F>(container: C, mut visitor: F)
where
    C: RecordMut,
    T: Member,
    F: FnMut(&mut T),
{
    container.with_record_mut(|record| walk_mut(record, |value, _name| visitor(value)));
}

/// Like [`for_each_member`], but the visitor also receives each matching
/// field's declared name.
///
/// ```
/// reflect_walk::reflect_struct! {
///     struct Size {
///         width: i32,
///         height: i32,
///     }
/// }
///
/// let size = Size { width: 3, height: 4 };
/// let mut names = Vec::new();
/// reflect_walk::for_each_member_with_name(&size, |_: &i32, name| names.push(name));
/// assert_eq!(names, ["width", "height"]);
/// ```
pub fn for_each_member_with_name<C, T, F>(container: C, visitor: F)
where
    C: RecordRef,
    T: Member,
    F: FnMut(&T, &'static str),
{
    container.with_record(|record| walk(record, visitor));
}

/// Like [`for_each_member_mut`], but the visitor also receives each matching
/// field's declared name.
pub fn for_each_member_with_name_mut<C, T, F>(container: C, visitor: F)
where
    C: RecordMut,
    T: Member,
    F: FnMut(&mut T, &'static str),
{
    container.with_record_mut(|record| walk_mut(record, visitor));
}

fn walk<T, R, F>(record: &R, mut visitor: F)
where
    T: Member,
    R: Record + ?Sized,
    F: FnMut(&T, &'static str),
{
    let record_type = record.record_type();
    log::trace!(
        "walking `{}` for {:?} fields",
        record_type.name(),
        T::SHAPE.kind()
    );

    let base = (record as *const R).cast::<u8>();
    for field in record_type.fields() {
        let shape = (field.shape)();
        if shape.kind() != T::SHAPE.kind() {
            continue;
        }
        if !T::matches(shape) {
            log::trace!("field `{}` is kind-compatible but not an exact match", field.name);
            continue;
        }
        log::trace!("visiting field `{}`", field.name);

        // SAFETY: `Record::record_type` guarantees `field.offset` is the
        // offset of a value of shape `shape` within `*record`, and
        // `Member::matches` guarantees such a value can be viewed as a `T`.
        let value = unsafe { &*base.add(field.offset).cast::<T>() };
        visitor(value, field.name);
    }
}

fn walk_mut<T, R, F>(record: &mut R, mut visitor: F)
where
    T: Member,
    R: Record + ?Sized,
    F: FnMut(&mut T, &'static str),
{
    let record_type = record.record_type();
    log::trace!(
        "walking `{}` mutably for {:?} fields",
        record_type.name(),
        T::SHAPE.kind()
    );

    let base = (record as *mut R).cast::<u8>();
    for field in record_type.fields() {
        let shape = (field.shape)();
        if shape.kind() != T::SHAPE.kind() {
            continue;
        }
        if !T::matches(shape) {
            log::trace!("field `{}` is kind-compatible but not an exact match", field.name);
            continue;
        }
        log::trace!("visiting field `{}`", field.name);

        // SAFETY: as in `walk`, plus: the mutable borrow of `*record` is held
        // for the whole walk and only one field reference is live at a time,
        // so the `&mut T` does not alias.
        let value = unsafe { &mut *base.add(field.offset).cast::<T>() };
        visitor(value, field.name);
    }
}
