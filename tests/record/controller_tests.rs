use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rowedit::element::memory::{MemoryCell, MemoryEditor, MemoryInput, MemoryRecord};
use rowedit::element::{CheckEditor, DisplayElement, EditorElement, ValueEditor, Visibility};
use rowedit::persist::{EchoPersistence, SaveFailure, from_fn};
use rowedit::{ControllerState, FailurePolicy, FieldValue, RecordError, RecordOptions};

use super::{attach, attach_with, people_record};

fn text_input(record: &MemoryRecord, name: &str) -> MemoryInput {
    match record.editor(name) {
        Some(MemoryEditor::Text(input)) | Some(MemoryEditor::Select(input)) => input.clone(),
        other => panic!("{name} is not a text editor: {other:?}"),
    }
}

#[test]
fn attach_hides_editors_and_seeds_them_from_the_view() {
    let record = people_record();
    let controller = attach(&record);

    assert_eq!(controller.state(), ControllerState::Viewing);
    assert!(!record.editor("name").unwrap().is_visible());
    assert!(record.display("name").unwrap().is_visible());
    assert_eq!(text_input(&record, "name").value(), "Alice");
    assert_eq!(controller.controls().visible_labels(), vec!["Edit"]);
    assert_eq!(record.trigger().visible_labels(), vec!["Edit"]);
}

#[test]
fn edit_only_from_viewing() {
    let record = people_record();
    let mut controller = attach(&record);

    assert!(controller.edit());
    assert_eq!(controller.state(), ControllerState::Editing);
    assert!(!controller.edit());
    assert_eq!(controller.state(), ControllerState::Editing);

    assert!(record.editor("name").unwrap().is_visible());
    assert!(record.editor("name").unwrap().is_enabled());
    assert!(!record.display("name").unwrap().is_visible());
    assert_eq!(
        controller.controls().visible_labels(),
        vec!["Save", "Reset"]
    );
}

#[test]
fn display_only_cells_keep_their_view_while_editing() {
    let record = people_record();
    let mut controller = attach(&record);
    controller.edit();
    assert!(record.display("id").unwrap().is_visible());
    assert!(controller.binding("id").unwrap().is_inert());
}

#[tokio::test]
async fn save_is_refused_while_viewing() {
    let record = people_record();
    let mut controller = attach(&record);
    assert_eq!(
        controller.save().await.unwrap_err(),
        RecordError::NotEditing(ControllerState::Viewing)
    );
    assert_eq!(controller.state(), ControllerState::Viewing);
}

#[tokio::test(start_paused = true)]
async fn scenario_disables_editors_for_the_duration_of_the_save() {
    let record = MemoryRecord::builder()
        .text("name", "Alice")
        .checkbox("active", "Yes")
        .build();
    let observed = record.clone();
    let during = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&during);
    let adapter = from_fn(move |values| {
        let observed = observed.clone();
        let seen = Rc::clone(&seen);
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            for name in ["name", "active"] {
                seen.borrow_mut()
                    .push(observed.editor(name).unwrap().is_enabled());
            }
            Ok(values.to_json())
        }
    });
    let mut controller = attach_with(&record, RecordOptions::default(), Rc::new(adapter));

    assert!(controller.edit());
    assert!(record.editor("name").unwrap().is_enabled());
    assert!(record.editor("active").unwrap().is_visible());
    match record.editor("active") {
        Some(MemoryEditor::Checkbox(toggle)) => assert!(toggle.is_checked()),
        other => panic!("unexpected editor {other:?}"),
    }

    let outcome = controller.save().await.unwrap();
    assert!(outcome.is_ok());
    assert_eq!(*during.borrow(), vec![false, false]);
    assert_eq!(record.display("active").unwrap().text(), "Yes");
    assert_eq!(controller.state(), ControllerState::Viewing);
    assert!(record.editor("name").unwrap().is_enabled());
    assert!(!record.editor("name").unwrap().is_visible());
}

#[test]
fn second_save_while_in_flight_changes_nothing() {
    let record = people_record();
    let mut controller = attach(&record);
    controller.edit();

    let ticket = controller.begin_save().unwrap();
    assert_eq!(controller.state(), ControllerState::Saving);
    assert!(!record.editor("name").unwrap().is_enabled());

    assert_eq!(
        controller.begin_save().unwrap_err(),
        RecordError::SaveInFlight
    );
    assert!(!controller.edit());
    assert!(!controller.cancel());
    assert!(!record.editor("name").unwrap().is_enabled());
    assert_eq!(controller.state(), ControllerState::Saving);

    let values = ticket.values().clone();
    controller
        .complete_save(ticket, Ok(values.to_json()))
        .unwrap();
    assert_eq!(controller.state(), ControllerState::Viewing);
}

#[test]
fn snapshot_is_taken_when_the_save_begins() {
    let record = people_record();
    let mut controller = attach(&record);
    controller.edit();
    let name = text_input(&record, "name");
    name.set_value("Bob");

    let ticket = controller.begin_save().unwrap();
    assert!(!name.push_char('!'));
    assert_eq!(
        ticket.values().get("name"),
        Some(&FieldValue::from("Bob"))
    );
    assert!(!ticket.values().contains("id"));
    controller.complete_save(ticket, Ok(serde_json::Value::Null)).unwrap();
    assert_eq!(record.display("name").unwrap().text(), "Bob");
}

#[test]
fn tickets_from_another_save_are_stale() {
    let first = people_record();
    let second = people_record();
    let mut a = attach(&first);
    let mut b = attach(&second);

    b.edit();
    let done = b.begin_save().unwrap();
    b.complete_save(done, Ok(serde_json::Value::Null)).unwrap();

    a.edit();
    let foreign = a.begin_save().unwrap();
    assert_eq!(
        b.complete_save(foreign, Ok(serde_json::Value::Null)),
        Err(RecordError::StaleTicket)
    );

    b.edit();
    let _own = b.begin_save().unwrap();
    let other = people_record();
    let mut c = attach(&other);
    c.edit();
    let from_c = c.begin_save().unwrap();
    assert_eq!(
        b.complete_save(from_c, Ok(serde_json::Value::Null)),
        Err(RecordError::StaleTicket)
    );
    assert_eq!(b.state(), ControllerState::Saving);
}

#[test]
fn failed_save_stays_editing_by_default() {
    let record = people_record();
    let mut controller = attach(&record);
    controller.edit();
    text_input(&record, "name").set_value("Bob");

    let ticket = controller.begin_save().unwrap();
    controller
        .complete_save(ticket, Err(SaveFailure::Transport("offline".into())))
        .unwrap();

    assert_eq!(controller.state(), ControllerState::Editing);
    assert!(record.editor("name").unwrap().is_enabled());
    assert!(record.editor("name").unwrap().is_visible());
    assert_eq!(text_input(&record, "name").value(), "Bob");
    assert_eq!(record.display("name").unwrap().text(), "Alice");
    assert_eq!(
        controller.controls().visible_labels(),
        vec!["Save", "Reset"]
    );
}

#[test]
fn failed_save_can_return_to_viewing() {
    let record = people_record();
    let options = RecordOptions::default().with_failure_policy(FailurePolicy::ReturnToViewing);
    let mut controller = attach_with(&record, options, Rc::new(EchoPersistence));
    controller.edit();
    text_input(&record, "name").set_value("Bob");

    let ticket = controller.begin_save().unwrap();
    controller
        .complete_save(
            ticket,
            Err(SaveFailure::Rejected {
                status: 500,
                body: "boom".into(),
            }),
        )
        .unwrap();

    assert_eq!(controller.state(), ControllerState::Viewing);
    assert!(record.editor("name").unwrap().is_enabled());
    assert_eq!(record.display("name").unwrap().text(), "Bob");
    assert_eq!(controller.controls().visible_labels(), vec!["Edit"]);
}

#[tokio::test]
async fn hooks_fire_around_the_adapter() {
    let record = people_record();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    let adapter_log = Rc::clone(&log);
    let adapter = from_fn(move |values| {
        let log = Rc::clone(&adapter_log);
        async move {
            log.borrow_mut().push("adapter".into());
            Ok(values.to_json())
        }
    });

    let observed = record.clone();
    let (edit_log, save_log, done_log) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
    let options = RecordOptions::default()
        .on_edit(move || edit_log.borrow_mut().push("edit".into()))
        .on_save(move || save_log.borrow_mut().push("save".into()))
        .on_save_complete(move |outcome| {
            let editor = observed.editor("name").unwrap();
            done_log.borrow_mut().push(format!(
                "complete ok={} enabled={} shown={}",
                outcome.is_ok(),
                editor.is_enabled(),
                editor.is_visible()
            ));
        });
    let mut controller = attach_with(&record, options, Rc::new(adapter));

    controller.edit();
    controller.save().await.unwrap().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "edit",
            "save",
            "adapter",
            "complete ok=true enabled=true shown=true"
        ]
    );
}

#[tokio::test]
async fn completion_hook_sees_failures() {
    let record = people_record();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outcomes);
    let options = RecordOptions::default()
        .on_save_complete(move |outcome| sink.borrow_mut().push(outcome.clone()));
    let adapter = from_fn(|_values| async { Err(SaveFailure::TimedOut(Duration::from_secs(1))) });
    let mut controller = attach_with(&record, options, Rc::new(adapter));

    controller.edit();
    let outcome = controller.save().await.unwrap();
    assert!(outcome.is_err());
    assert_eq!(
        *outcomes.borrow(),
        vec![Err(SaveFailure::TimedOut(Duration::from_secs(1)))]
    );
}

#[test]
fn cancel_resets_editors_and_stays_editing() {
    let record = people_record();
    let mut controller = attach(&record);
    assert!(!controller.cancel());

    controller.edit();
    text_input(&record, "name").set_value("Bob");
    assert!(controller.cancel());

    assert_eq!(controller.state(), ControllerState::Editing);
    assert_eq!(text_input(&record, "name").value(), "Alice");
    assert!(record.editor("name").unwrap().is_visible());
}

#[test]
fn discard_resets_editors_and_returns_to_viewing() {
    let record = people_record();
    let mut controller = attach(&record);
    assert!(!controller.discard());

    controller.edit();
    text_input(&record, "name").set_value("Bob");
    assert!(controller.discard());

    assert_eq!(controller.state(), ControllerState::Viewing);
    assert_eq!(text_input(&record, "name").value(), "Alice");
    assert_eq!(record.display("name").unwrap().text(), "Alice");
    assert!(!record.editor("name").unwrap().is_visible());
    assert_eq!(controller.controls().visible_labels(), vec!["Edit"]);
}

#[test]
fn duplicate_editor_names_are_rejected() {
    let record = MemoryRecord::builder()
        .text("name", "Alice")
        .text("name", "Bob")
        .build();
    let error = rowedit::RecordController::attach(
        &record,
        RecordOptions::default(),
        Rc::new(EchoPersistence),
    )
    .unwrap_err();
    assert_eq!(error, RecordError::DuplicateField("name".into()));
}

#[test]
fn duplicate_display_only_names_are_allowed() {
    let record = MemoryRecord::builder()
        .display_only("note", "a")
        .display_only("note", "b")
        .text("name", "Alice")
        .build();
    let controller = attach(&record);
    assert_eq!(controller.values().len(), 1);
}

#[test]
fn editors_disabled_before_attach_are_inert() {
    let input = MemoryInput::new("");
    input.set_enabled(false);
    let record = MemoryRecord::builder()
        .cell(
            MemoryCell::new("locked")
                .with_display("frozen")
                .with_editor(MemoryEditor::Text(input.clone())),
        )
        .text("name", "Alice")
        .build();
    let mut controller = attach(&record);
    controller.edit();

    assert!(controller.binding("locked").unwrap().is_inert());
    assert!(!input.is_enabled());
    assert!(!controller.values().contains("locked"));
    assert!(record.display("locked").unwrap().is_visible());
    assert!(!input.is_visible());
}

#[test]
fn records_without_trigger_area_still_cycle() {
    let record = MemoryRecord::builder()
        .text("name", "Alice")
        .trigger_classes(["toolbar"])
        .build();
    let mut controller = attach(&record);
    assert!(controller.controls().visible_labels().is_empty());
    assert!(record.trigger().controls().is_empty());
    assert!(controller.edit());
    let ticket = controller.begin_save().unwrap();
    controller.complete_save(ticket, Ok(serde_json::Value::Null)).unwrap();
    assert_eq!(controller.state(), ControllerState::Viewing);
}

#[test]
fn reset_button_can_be_left_out() {
    let record = people_record();
    let options = RecordOptions::default()
        .with_reset_button(None)
        .with_edit_button("Change")
        .with_save_button("Store");
    let mut controller = attach_with(&record, options, Rc::new(EchoPersistence));
    assert!(!controller.controls().has_reset());
    assert_eq!(record.trigger().visible_labels(), vec!["Change"]);
    controller.edit();
    assert_eq!(record.trigger().visible_labels(), vec!["Store"]);
}

#[test]
fn custom_selectors_pick_other_elements() {
    let record = MemoryRecord::builder()
        .cell(
            MemoryCell::new("name")
                .with_display("Alice")
                .with_display_classes(["label"])
                .with_editor(MemoryEditor::Text(MemoryInput::new("")))
                .with_editor_classes(["input"]),
        )
        .build();

    let controller = attach(&record);
    assert!(controller.binding("name").unwrap().is_inert());

    let options = RecordOptions::default()
        .with_view_selector(".label")
        .with_editor_selector(".input");
    let controller = attach_with(&record, options, Rc::new(EchoPersistence));
    assert_eq!(
        controller.values().get("name"),
        Some(&FieldValue::from("Alice"))
    );
}

#[test]
fn auto_populate_can_be_disabled() {
    let record = people_record();
    let options = RecordOptions::default().with_auto_populate(false);
    let controller = attach_with(&record, options, Rc::new(EchoPersistence));
    assert_eq!(text_input(&record, "name").value(), "");
    controller.set_values_from_view();
    assert_eq!(text_input(&record, "name").value(), "Alice");
}
