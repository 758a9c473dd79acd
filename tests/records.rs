#![allow(missing_docs)]

use reflect_walk::{Obj, for_each_member, for_each_member_mut};

reflect_walk::reflect_struct! {
    #[derive(Default, Debug, PartialEq)]
    struct Inner {
        value: i32,
    }
}

// Same shape as `Inner`, but a different type: exact matching must tell them
// apart by identity, not by kind.
reflect_walk::reflect_struct! {
    #[derive(Default, Debug, PartialEq)]
    struct Decoy {
        value: i32,
    }
}

reflect_walk::reflect_struct! {
    #[derive(Default)]
    struct Outer {
        first: Inner,
        decoy: Decoy,
        second: Inner,
        third: Inner,
        count: i32,
    }
}

#[test]
fn nested_struct_match_is_by_identity() {
    let outer = Outer {
        first: Inner { value: 42 },
        decoy: Decoy { value: 99 },
        second: Inner { value: 43 },
        third: Inner { value: 44 },
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(&outer, |each: &Inner| collected.push(each.value));

    assert_eq!(collected, [42, 43, 44]);
}

#[test]
fn decoy_struct_is_matched_separately() {
    let outer = Outer {
        decoy: Decoy { value: 99 },
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(&outer, |each: &Decoy| collected.push(each.value));

    assert_eq!(collected, [99]);
}

reflect_walk::reflect_class! {
    #[derive(Default)]
    struct Payload {
        ratio: f32,
    }
}

reflect_walk::reflect_class! {
    #[derive(Default)]
    struct Holder {
        link: Obj<Payload>,
        link2: Obj<Payload>,
        link3: Obj<Payload>,
        count: i32,
    }
}

#[test]
fn object_handle_fields_visited_in_order() {
    let holder = Obj::new(Holder {
        link: Obj::new(Payload { ratio: 100.0 }),
        link2: Obj::new(Payload { ratio: 200.0 }),
        link3: Obj::new(Payload { ratio: 300.0 }),
        ..Default::default()
    });

    let mut collected = Vec::new();
    for_each_member(holder, |each: &Obj<Payload>| {
        collected.push(each.borrow().ratio);
    });

    assert_eq!(collected, [100.0, 200.0, 300.0]);
}

#[test]
fn handle_fields_can_be_cleared_through_the_visitor() {
    let holder = Obj::new(Holder {
        link: Obj::new(Payload::default()),
        ..Default::default()
    });
    assert!(!holder.borrow().link.is_null());

    for_each_member_mut(holder.clone(), |each: &mut Obj<Payload>| *each = Obj::null());

    assert!(holder.borrow().link.is_null());
    assert!(holder.borrow().link2.is_null());
    assert!(holder.borrow().link3.is_null());
}
