#![allow(missing_docs)]

use reflect_walk::{Obj, Object, for_each_member, for_each_member_mut};

reflect_walk::reflect_class! {
    #[derive(Default)]
    struct Widget {
        gain: f32,
        gain2: f32,
        gain3: f32,
        count: i32,
    }
}

#[test]
fn null_handle_walks_nothing() {
    let mut visits = 0;
    for_each_member(Obj::<Widget>::null(), |_: &f32| visits += 1);

    assert_eq!(visits, 0);
}

#[test]
fn stale_handle_walks_nothing() {
    let widget = Obj::new(Widget::default());
    widget.destroy();
    assert!(!widget.is_null());
    assert!(!widget.is_valid());

    let mut visits = 0;
    for_each_member(widget, |_: &f32| visits += 1);

    assert_eq!(visits, 0);
}

#[test]
fn none_reference_walks_nothing() {
    let mut visits = 0;
    for_each_member(None::<&Widget>, |_: &f32| visits += 1);

    assert_eq!(visits, 0);
}

#[test]
fn some_reference_walks_normally() {
    let widget = Widget {
        gain2: 2.0,
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(Some(&widget), |each: &f32| collected.push(*each));

    assert_eq!(collected, [0.0, 2.0, 0.0]);
}

#[test]
fn nullable_mutable_reference() {
    let mut widget = Widget::default();

    for_each_member_mut(Some(&mut widget), |each: &mut f32| *each = 1.0);
    assert_eq!(widget.gain, 1.0);
    assert_eq!(widget.gain3, 1.0);

    for_each_member_mut(None::<&mut Widget>, |each: &mut f32| *each = 9.0);
    assert_eq!(widget.gain, 1.0);
}

#[test]
fn erased_handle_resolves_the_concrete_field_list() {
    let widget = Obj::new(Widget {
        gain: 1.0,
        gain2: 2.0,
        gain3: 3.0,
        ..Default::default()
    })
    .into_dyn();
    assert_eq!(widget.borrow().class().name, "Widget");

    let mut collected = Vec::new();
    for_each_member(widget, |each: &f32| collected.push(*each));

    assert_eq!(collected, [1.0, 2.0, 3.0]);
}

#[test]
fn handle_mutation_goes_through_the_interior_cell() {
    let widget = Obj::new(Widget::default());

    for_each_member_mut(widget.clone(), |each: &mut i32| *each = 5);

    assert_eq!(widget.borrow().count, 5);
}

// Pairing a shared container with a mutating visitor is rejected at compile
// time: `&Widget` implements `RecordRef` but not `RecordMut`, so
// `for_each_member_mut(&widget, |_: &mut f32| {})` does not build.
