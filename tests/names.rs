#![allow(missing_docs)]

use reflect_walk::{for_each_member_with_name, for_each_member_with_name_mut};

reflect_walk::reflect_struct! {
    #[derive(Default)]
    struct Script {
        id: i32,
        retries: i32,
        timeout_ms: i32,
        label: String,
    }
}

#[test]
fn field_names_follow_declaration_order() {
    let script = Script::default();

    let mut names = Vec::new();
    for_each_member_with_name(&script, |_: &i32, name| names.push(name));

    assert_eq!(names, ["id", "retries", "timeout_ms"]);
}

#[test]
fn values_and_names_stay_paired() {
    let script = Script {
        id: 1,
        retries: 3,
        timeout_ms: 500,
        ..Default::default()
    };

    let mut seen = Vec::new();
    for_each_member_with_name(&script, |each: &i32, name| seen.push((name, *each)));

    assert_eq!(seen, [("id", 1), ("retries", 3), ("timeout_ms", 500)]);
}

#[test]
fn named_mutation_can_target_a_single_field() {
    let mut script = Script::default();

    for_each_member_with_name_mut(&mut script, |each: &mut i32, name| {
        if name == "retries" {
            *each = 8;
        }
    });

    assert_eq!(script.id, 0);
    assert_eq!(script.retries, 8);
    assert_eq!(script.timeout_ms, 0);
}
