use rowedit::element::DisplayElement;
use rowedit::element::memory::{MemoryEditor, MemoryRecord};
use rowedit::{FieldValue, ValueMap};

use super::{attach, people_record};

#[test]
fn text_and_select_values_round_trip() {
    let record = people_record();
    let controller = attach(&record);
    for text in ["", "Bob", "  padded  ", "ünïcødé", "multi\nline"] {
        let mut values = ValueMap::new();
        values.insert("name", text);
        values.insert("tier", text);
        controller.set_values(&values);

        let read = controller.values();
        assert_eq!(read.get("name"), Some(&FieldValue::from(text)));
        assert_eq!(read.get("tier"), Some(&FieldValue::from(text)));
    }
}

#[test]
fn checkbox_reads_yes_in_any_case() {
    for (text, expected) in [
        ("Yes", true),
        ("yes", true),
        ("YES", true),
        ("No", false),
        ("", false),
        ("true", false),
        (" yes", false),
    ] {
        let record = MemoryRecord::builder().checkbox("active", text).build();
        let controller = attach(&record);
        assert_eq!(
            controller.values().get("active"),
            Some(&FieldValue::Bool(expected)),
            "display text {text:?}"
        );
    }
}

#[test]
fn checkbox_accepts_booleans_and_renders_yes_no() {
    let record = MemoryRecord::builder().checkbox("active", "Yes").build();
    let controller = attach(&record);

    let mut values = ValueMap::new();
    values.insert("active", false);
    controller.set_values(&values);
    assert_eq!(controller.values().get("active"), Some(&FieldValue::Bool(false)));

    controller.refresh_view();
    assert_eq!(record.display("active").unwrap().text(), "No");
}

#[test]
fn radio_group_checks_the_matching_member() {
    let record = MemoryRecord::builder()
        .radio("role", "admin", &["admin", "user"])
        .build();
    let controller = attach(&record);
    assert_eq!(
        controller.values().get("role"),
        Some(&FieldValue::from("admin"))
    );
    match record.editor("role") {
        Some(editor @ MemoryEditor::Radio(_)) => {
            assert_eq!(editor.render(), "(•) admin ( ) user");
        }
        other => panic!("unexpected editor {other:?}"),
    }
}

#[test]
fn radio_group_without_match_is_absent() {
    let record = MemoryRecord::builder()
        .radio("role", "guest", &["admin", "user"])
        .build();
    let controller = attach(&record);
    assert!(!controller.values().contains("role"));

    controller.refresh_view();
    assert_eq!(record.display("role").unwrap().text(), "");
}

#[test]
fn inert_fields_never_reach_the_value_map() {
    let record = people_record();
    let controller = attach(&record);
    let mut values = ValueMap::new();
    values.insert("id", "99");
    controller.set_values(&values);

    let read = controller.values();
    assert!(!read.contains("id"));
    assert_eq!(
        read.names().collect::<Vec<_>>(),
        vec!["name", "active", "tier", "role"]
    );
    assert_eq!(record.display("id").unwrap().text(), "7");
}

#[test]
fn set_values_leaves_unnamed_fields_alone() {
    let record = people_record();
    let controller = attach(&record);
    let mut values = ValueMap::new();
    values.insert("tier", "silver");
    controller.set_values(&values);

    let read = controller.values();
    assert_eq!(read.get("name"), Some(&FieldValue::from("Alice")));
    assert_eq!(read.get("tier"), Some(&FieldValue::from("silver")));
}

#[test]
fn value_map_serialises_flat() {
    let record = people_record();
    let controller = attach(&record);
    assert_eq!(
        controller.values().to_json(),
        serde_json::json!({
            "name": "Alice",
            "active": true,
            "tier": "gold",
            "role": "user"
        })
    );
}
