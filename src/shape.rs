//! Runtime descriptors for record types and their fields.
//!
//! Descriptors are plain `'static` data produced by the [`reflect_struct!`]
//! and [`reflect_class!`] registration macros. The walker in the crate root
//! borrows them for the duration of one walk and never owns them.
//!
//! [`reflect_struct!`]: crate::reflect_struct
//! [`reflect_class!`]: crate::reflect_class

use core::any::TypeId;

/// Category tag carried by every field descriptor.
///
/// Exactly one kind corresponds to each supported member type; the walker
/// filters on kind before running the exact-match check, so a kind mismatch
/// short-circuits without inspecting nested descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed 16-bit integer field.
    Int16,
    /// Signed 32-bit integer field.
    Int32,
    /// Single-precision float field.
    Float32,
    /// Boolean field.
    Bool,
    /// Text string field.
    String,
    /// Nested struct-like record field.
    Struct,
    /// Handle to an object-like record.
    Object,
    /// Homogeneous sequence field.
    List,
    /// Soft reference field, typed or erased.
    SoftRef,
    /// Key/value map field.
    Map,
}

/// Runtime descriptor for a field's value type.
///
/// Composite variants carry nested descriptors: an element shape for lists,
/// key and value shapes for maps, and the referenced record type for structs,
/// object handles, and typed soft references.
#[derive(Debug)]
pub enum Shape {
    /// An `i16` value.
    Int16,
    /// An `i32` value.
    Int32,
    /// An `f32` value.
    Float32,
    /// A `bool` value.
    Bool,
    /// A `String` value.
    String,
    /// A nested struct-like record of the given type.
    Struct(&'static StructType),
    /// An object handle whose declared class is the given one.
    Object(&'static ClassType),
    /// A sequence with the given element shape.
    List(&'static Shape),
    /// A soft reference to an instance of the given class.
    SoftObject(&'static ClassType),
    /// A soft reference to the given class itself.
    SoftClass(&'static ClassType),
    /// A type-erased soft reference.
    SoftRef,
    /// A map with the given key and value shapes.
    Map {
        /// Shape of the map's keys.
        key: &'static Shape,
        /// Shape of the map's values.
        value: &'static Shape,
    },
}

impl Shape {
    /// The category tag for this shape.
    ///
    /// The three soft-reference forms share a single kind: iterating by the
    /// erased form visits typed soft references as well.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Shape::Int16 => FieldKind::Int16,
            Shape::Int32 => FieldKind::Int32,
            Shape::Float32 => FieldKind::Float32,
            Shape::Bool => FieldKind::Bool,
            Shape::String => FieldKind::String,
            Shape::Struct(_) => FieldKind::Struct,
            Shape::Object(_) => FieldKind::Object,
            Shape::List(_) => FieldKind::List,
            Shape::SoftObject(_) | Shape::SoftClass(_) | Shape::SoftRef => FieldKind::SoftRef,
            Shape::Map { .. } => FieldKind::Map,
        }
    }
}

/// One field of a reflected record: its declared name, its byte offset within
/// the record, and its value shape.
///
/// The shape is behind a function pointer so that self-referential records
/// (a class holding a handle to its own class, say) don't form a cycle during
/// constant evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// The field's declared identifier.
    pub name: &'static str,
    /// Byte offset of the field's value within the record.
    pub offset: usize,
    /// Lazy accessor for the field's value shape.
    pub shape: fn() -> &'static Shape,
}

/// Type descriptor for a struct-like record.
#[derive(Debug)]
pub struct StructType {
    /// The struct's declared name.
    pub name: &'static str,
    /// The struct's fields, in declaration order.
    pub fields: &'static [Field],
    /// Accessor for the struct's `TypeId`, used for identity comparison.
    pub id: fn() -> TypeId,
}

impl StructType {
    /// Whether this descriptor describes exactly the type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        (self.id)() == TypeId::of::<T>()
    }
}

/// Type descriptor for an object-like record.
#[derive(Debug)]
pub struct ClassType {
    /// The class's declared name.
    pub name: &'static str,
    /// The class's fields, in declaration order.
    pub fields: &'static [Field],
    /// Accessor for the class's `TypeId`, used for identity comparison.
    pub id: fn() -> TypeId,
}

impl ClassType {
    /// Whether this descriptor describes exactly the class `T`.
    pub fn is<T: 'static>(&self) -> bool {
        (self.id)() == TypeId::of::<T>()
    }
}

/// The runtime type descriptor of a record, in either of its two flavors.
#[derive(Debug, Clone, Copy)]
pub enum RecordType {
    /// A struct-like record, resolved statically from the declared type.
    Struct(&'static StructType),
    /// An object-like record, resolved dynamically from the instance.
    Class(&'static ClassType),
}

impl RecordType {
    /// The record type's declared name.
    pub fn name(&self) -> &'static str {
        match self {
            RecordType::Struct(ty) => ty.name,
            RecordType::Class(class) => class.name,
        }
    }

    /// The record type's fields, in declaration order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            RecordType::Struct(ty) => ty.fields,
            RecordType::Class(class) => class.fields,
        }
    }
}

/// A record the walker can traverse.
///
/// Struct-like records answer with their static descriptor; object-like
/// records answer through dynamic dispatch, so a `dyn Object` holding a
/// concrete class reports that class's full field list.
///
/// # Safety
///
/// The returned descriptor must truthfully describe `*self`: every field's
/// offset must be the offset of a value of that field's shape within the
/// record's memory. The walker turns offsets into references without further
/// checks.
pub unsafe trait Record {
    /// The runtime type descriptor for this instance.
    fn record_type(&self) -> RecordType;
}

/// A struct-like record with a static type descriptor.
///
/// # Safety
///
/// Same contract as [`Record`]: `TYPE` must truthfully describe the layout of
/// `Self`. Use [`reflect_struct!`](crate::reflect_struct), which derives the
/// descriptor from the definition itself.
pub unsafe trait Struct: Record + Sized + 'static {
    /// The struct's type descriptor.
    const TYPE: &'static StructType;
}

/// An object-like record, reflected through dynamic dispatch.
///
/// # Safety
///
/// `class` must return the descriptor of the instance's concrete class, and
/// that descriptor must truthfully describe the instance's layout.
pub unsafe trait Object: 'static {
    /// The class descriptor of this instance's concrete class.
    fn class(&self) -> &'static ClassType;
}

/// An object-like record with a statically known class.
///
/// # Safety
///
/// `CLASS` must be the same descriptor [`Object::class`] returns for every
/// instance of `Self`. Use [`reflect_class!`](crate::reflect_class).
pub unsafe trait Class: Object + Record + Sized {
    /// The class's type descriptor.
    const CLASS: &'static ClassType;
}

// Base-typed traversal: a `dyn Object` resolves the concrete class's
// descriptor through the vtable.
unsafe impl Record for dyn Object {
    fn record_type(&self) -> RecordType {
        RecordType::Class(self.class())
    }
}
