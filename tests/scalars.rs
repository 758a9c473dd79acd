#![allow(missing_docs)]

use reflect_walk::{for_each_member, for_each_member_mut};

reflect_walk::reflect_struct! {
    #[derive(Default)]
    struct Numbers {
        small: i16,
        small2: i16,
        small3: i16,
        count: i32,
        count2: i32,
        count3: i32,
        ratio: f32,
        ratio2: f32,
        ratio3: f32,
        flag: bool,
        flag2: bool,
        flag3: bool,
        title: String,
        subtitle: String,
    }
}

#[test]
fn int32_fields_visited_in_declaration_order() {
    let numbers = Numbers {
        count: 11,
        count2: 22,
        count3: 33,
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(&numbers, |each: &i32| collected.push(*each));

    assert_eq!(collected, [11, 22, 33]);
}

#[test]
fn bool_fields_visited_with_by_value_pattern() {
    let numbers = Numbers {
        flag2: true,
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(&numbers, |&each: &bool| collected.push(each));

    assert_eq!(collected, [false, true, false]);
}

#[test]
fn string_fields_visited() {
    let numbers = Numbers {
        title: "title".to_string(),
        subtitle: "subtitle".to_string(),
        ..Default::default()
    };

    let mut collected = Vec::new();
    for_each_member(&numbers, |each: &String| collected.push(each.clone()));

    assert_eq!(collected, ["title", "subtitle"]);
}

#[test]
fn mutation_through_the_visitor_is_observable_afterwards() {
    let mut numbers = Numbers::default();

    let mut counter = 15;
    for_each_member_mut(&mut numbers, |each: &mut i16| {
        *each = counter;
        counter += 1;
    });

    assert_eq!(numbers.small, 15);
    assert_eq!(numbers.small2, 16);
    assert_eq!(numbers.small3, 17);
    // Fields of other types stay untouched.
    assert_eq!(numbers.count, 0);
    assert_eq!(numbers.count2, 0);
    assert_eq!(numbers.count3, 0);
}

#[test]
fn zero_matching_fields_is_a_valid_walk() {
    reflect_walk::reflect_struct! {
        #[derive(Default)]
        struct Flags {
            on: bool,
            off: bool,
        }
    }

    let flags = Flags::default();

    let mut visits = 0;
    for_each_member(&flags, |_: &i32| visits += 1);

    assert_eq!(visits, 0);
}

#[test]
fn every_match_is_visited_with_no_early_exit() {
    let numbers = Numbers::default();

    let mut visits = 0;
    for_each_member(&numbers, |_: &f32| visits += 1);

    assert_eq!(visits, 3);
}
