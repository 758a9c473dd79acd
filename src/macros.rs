//! Registration macros for struct-like and object-like records.
//!
//! Both macros take an ordinary struct definition and emit it unchanged,
//! followed by the reflection impls derived from it. Offsets come from
//! `core::mem::offset_of!` and shapes from each field type's [`Member`]
//! impl, so the emitted descriptors are truthful by construction; that is
//! what discharges the safety contracts of the reflection traits.
//!
//! [`Member`]: crate::Member

/// Declares a struct-like record and registers it for walking.
///
/// Emits the struct definition as written, plus [`Struct`](crate::Struct),
/// [`Record`](crate::Record), and [`Member`](crate::Member) impls for it.
/// Because struct records are members themselves, they can nest: a field of
/// one registered struct type inside another is matched by identity, not by
/// kind.
///
/// Every field type must implement [`Member`](crate::Member); a field of an
/// unsupported type fails to compile.
///
/// ```
/// reflect_walk::reflect_struct! {
///     #[derive(Default)]
///     struct Extent {
///         width: i32,
///         height: i32,
///     }
/// }
///
/// let extent = Extent { width: 640, height: 480 };
/// let mut total = 0;
/// reflect_walk::for_each_member(&extent, |each: &i32| total += *each);
/// assert_eq!(total, 1120);
/// ```
#[macro_export]
macro_rules! reflect_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        // SAFETY: the descriptor is derived from the definition above, with
        // offsets from `offset_of!` and shapes from each field type's
        // `Member` impl, so it describes the actual layout.
        unsafe impl $crate::Struct for $name {
            const TYPE: &'static $crate::StructType = &$crate::StructType {
                name: ::core::stringify!($name),
                fields: &[
                    $(
                        $crate::Field {
                            name: ::core::stringify!($field),
                            offset: ::core::mem::offset_of!($name, $field),
                            shape: || <$field_ty as $crate::Member>::SHAPE,
                        },
                    )*
                ],
                id: ::core::any::TypeId::of::<$name>,
            };
        }

        // SAFETY: forwards the descriptor checked above.
        unsafe impl $crate::Record for $name {
            fn record_type(&self) -> $crate::RecordType {
                $crate::RecordType::Struct(<$name as $crate::Struct>::TYPE)
            }
        }

        // SAFETY: `matches` only accepts struct shapes that are exactly this
        // type, by descriptor identity.
        unsafe impl $crate::Member for $name {
            const SHAPE: &'static $crate::Shape =
                &$crate::Shape::Struct(<$name as $crate::Struct>::TYPE);

            fn matches(shape: &$crate::Shape) -> bool {
                ::core::matches!(shape, $crate::Shape::Struct(ty) if ty.is::<$name>())
            }
        }
    };
}

/// Declares an object-like record and registers it for walking.
///
/// Emits the struct definition as written, plus [`Class`](crate::Class),
/// [`Object`](crate::Object), and [`Record`](crate::Record) impls for it.
/// Object-like records are reached through [`Obj`](crate::Obj) handles — an
/// `Obj<TheClass>` field is matched by declared class identity — and resolve
/// their field list dynamically, so walking an `Obj<dyn Object>` sees the
/// concrete class's fields.
///
/// ```
/// reflect_walk::reflect_class! {
///     #[derive(Default)]
///     struct Sensor {
///         reading: f32,
///         samples: i32,
///     }
/// }
///
/// let sensor = reflect_walk::Obj::new(Sensor { reading: 0.25, samples: 4 });
/// let mut seen = Vec::new();
/// reflect_walk::for_each_member(sensor, |each: &f32| seen.push(*each));
/// assert_eq!(seen, [0.25]);
/// ```
#[macro_export]
macro_rules! reflect_class {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        // SAFETY: the descriptor is derived from the definition above, with
        // offsets from `offset_of!` and shapes from each field type's
        // `Member` impl, so it describes the actual layout.
        unsafe impl $crate::Class for $name {
            const CLASS: &'static $crate::ClassType = &$crate::ClassType {
                name: ::core::stringify!($name),
                fields: &[
                    $(
                        $crate::Field {
                            name: ::core::stringify!($field),
                            offset: ::core::mem::offset_of!($name, $field),
                            shape: || <$field_ty as $crate::Member>::SHAPE,
                        },
                    )*
                ],
                id: ::core::any::TypeId::of::<$name>,
            };
        }

        // SAFETY: there is exactly one class descriptor per class, so the
        // dynamic answer is the static one.
        unsafe impl $crate::Object for $name {
            fn class(&self) -> &'static $crate::ClassType {
                <$name as $crate::Class>::CLASS
            }
        }

        // SAFETY: forwards the descriptor checked above.
        unsafe impl $crate::Record for $name {
            fn record_type(&self) -> $crate::RecordType {
                $crate::RecordType::Class($crate::Object::class(self))
            }
        }
    };
}
