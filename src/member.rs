//! The compile-time map from member types to their runtime shapes, and the
//! exact-match check that runs against field descriptors during a walk.

use std::collections::BTreeMap;

use crate::shape::Shape;

/// A value type the walker can search for.
///
/// `SHAPE` is the closed, compile-time map from a Rust type to the descriptor
/// shape the registry uses for it; asking the walker for an unsupported type
/// is a missing-impl compile error, never a runtime fallback.
///
/// `matches` is the exact-instantiation check. It is only ever called on a
/// shape whose [kind](Shape::kind) already equals `SHAPE`'s kind, so for
/// scalar and string types — where the kind is unique to the type — the
/// default body is correct and no runtime check happens at all. Composite
/// types override it to compare nested descriptors, recursing kind-first the
/// same way the walker does.
///
/// # Safety
///
/// `SHAPE` must describe `Self` truthfully, and `matches(shape)` may only
/// return `true` if a value laid out as `shape` describes can be soundly
/// viewed as a `Self`. The walker relies on this when it turns a field offset
/// into a `&Self`.
pub unsafe trait Member: Sized + 'static {
    /// The runtime shape representing `Self` in field descriptors.
    const SHAPE: &'static Shape;

    /// Whether a kind-compatible field shape is exactly `Self`.
    fn matches(shape: &Shape) -> bool {
        let _ = shape;
        true
    }
}

// SAFETY: kind `Int16` is only ever produced by this impl, so a kind match is
// an exact match.
unsafe impl Member for i16 {
    const SHAPE: &'static Shape = &Shape::Int16;
}

// SAFETY: as for `i16`.
unsafe impl Member for i32 {
    const SHAPE: &'static Shape = &Shape::Int32;
}

// SAFETY: as for `i16`.
unsafe impl Member for f32 {
    const SHAPE: &'static Shape = &Shape::Float32;
}

// SAFETY: as for `i16`.
unsafe impl Member for bool {
    const SHAPE: &'static Shape = &Shape::Bool;
}

// SAFETY: as for `i16`.
unsafe impl Member for String {
    const SHAPE: &'static Shape = &Shape::String;
}

// SAFETY: `matches` only accepts list shapes whose element is exactly `E`.
unsafe impl<E: Member> Member for Vec<E> {
    const SHAPE: &'static Shape = &Shape::List(E::SHAPE);

    fn matches(shape: &Shape) -> bool {
        match shape {
            Shape::List(element) => element.kind() == E::SHAPE.kind() && E::matches(element),
            _ => false,
        }
    }
}

// SAFETY: `matches` only accepts map shapes whose key and value are exactly
// `K` and `V`.
unsafe impl<K: Member, V: Member> Member for BTreeMap<K, V> {
    const SHAPE: &'static Shape = &Shape::Map {
        key: K::SHAPE,
        value: V::SHAPE,
    };

    fn matches(shape: &Shape) -> bool {
        match shape {
            Shape::Map { key, value } => {
                key.kind() == K::SHAPE.kind()
                    && K::matches(key)
                    && value.kind() == V::SHAPE.kind()
                    && V::matches(value)
            }
            _ => false,
        }
    }
}
