use std::rc::Rc;

use rowedit::element::memory::{MemoryEditor, MemoryRecord};
use rowedit::element::{CheckEditor, ValueEditor};
use rowedit::persist::JsonFileStore;
use rowedit::{
    ControllerState, PersistenceAdapter, RecordController, RecordOptions, TableDocument,
};
use serde_json::{Value, json};

fn write_table(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("people.json");
    let document = json!({
        "title": "People",
        "key": "id",
        "columns": [
            {"name": "id", "editable": false},
            {"name": "name"},
            {"name": "active", "kind": "checkbox"},
            {"name": "role", "kind": "radio", "options": ["admin", "user"]}
        ],
        "rows": [
            {"id": 1, "name": "Alice", "active": true, "role": "admin"},
            {"id": 2, "name": "Bob", "active": false, "role": "user"}
        ]
    });
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

fn read(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn edited_row_is_written_back_by_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&dir);
    let document = TableDocument::load(&path).unwrap();
    let store = JsonFileStore::new(&path);

    let raw = &document.rows[1];
    let record = document.build_record(raw);
    let adapter = store.row("id", document.key_value(raw).unwrap());
    let mut controller = RecordController::attach(
        &record,
        RecordOptions::from(document.options.clone()),
        Rc::new(adapter),
    )
    .unwrap();

    controller.edit();
    if let Some(MemoryEditor::Text(input)) = record.editor("name") {
        input.set_value("Bobby");
    }
    if let Some(MemoryEditor::Checkbox(toggle)) = record.editor("active") {
        toggle.toggle();
    }
    let outcome = controller.save().await.unwrap();

    assert_eq!(
        outcome,
        Ok(json!({"id": 2, "name": "Bobby", "active": true, "role": "user"}))
    );
    assert_eq!(controller.state(), ControllerState::Viewing);
    let on_disk = read(&path);
    assert_eq!(on_disk["rows"][1]["name"], json!("Bobby"));
    assert_eq!(on_disk["rows"][1]["active"], json!(true));
    assert_eq!(on_disk["rows"][0]["name"], json!("Alice"));
    assert_eq!(on_disk["columns"][0]["name"], json!("id"));
}

#[tokio::test]
async fn rows_saving_at_once_both_land() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&dir);
    let document = TableDocument::load(&path).unwrap();
    let store = JsonFileStore::new(&path);

    let mut rows: Vec<_> = document
        .rows
        .iter()
        .map(|raw| {
            let record = document.build_record(raw);
            let adapter = store.row("id", document.key_value(raw).unwrap());
            let controller = RecordController::attach(
                &record,
                RecordOptions::default(),
                Rc::new(adapter),
            )
            .unwrap();
            (record, controller)
        })
        .collect();

    let mut tickets = Vec::new();
    let mut saves = Vec::new();
    for (record, controller) in &mut rows {
        controller.edit();
        if let Some(MemoryEditor::Radio(members)) = record.editor("role") {
            for member in members {
                member.set_checked(member.value() == "admin");
            }
        }
        let ticket = controller.begin_save().unwrap();
        let adapter = controller.adapter();
        let values = ticket.values().clone();
        saves.push(async move { adapter.save(values).await });
        tickets.push(ticket);
    }

    let outcomes = futures::future::join_all(saves).await;
    for (((_, controller), ticket), outcome) in rows.iter_mut().zip(tickets).zip(outcomes) {
        assert!(outcome.is_ok());
        controller.complete_save(ticket, outcome).unwrap();
        assert_eq!(controller.state(), ControllerState::Viewing);
    }

    let on_disk = read(&path);
    assert_eq!(on_disk["rows"][0]["role"], json!("admin"));
    assert_eq!(on_disk["rows"][1]["role"], json!("admin"));
    assert_eq!(on_disk["rows"][1]["name"], json!("Bob"));
}

fn attach_row(path: &std::path::Path, document: &TableDocument) -> (MemoryRecord, RecordController) {
    let raw = &document.rows[0];
    let record = document.build_record(raw);
    let key = document.key.clone().unwrap();
    let adapter = JsonFileStore::new(path).row(key, document.key_value(raw).unwrap());
    let controller =
        RecordController::attach(&record, RecordOptions::default(), Rc::new(adapter)).unwrap();
    (record, controller)
}

fn set_text(record: &MemoryRecord, name: &str, text: &str) {
    if let Some(MemoryEditor::Text(input)) = record.editor(name) {
        input.set_value(text);
    }
}

#[tokio::test]
async fn row_can_be_saved_again_after_its_key_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stock.json");
    let table = json!({
        "key": "sku",
        "columns": [{"name": "sku"}, {"name": "name"}],
        "rows": [{"sku": "A1", "name": "widget"}]
    });
    std::fs::write(&path, table.to_string()).unwrap();
    let document = TableDocument::load(&path).unwrap();
    let (record, mut controller) = attach_row(&path, &document);

    controller.edit();
    set_text(&record, "sku", "A2");
    assert!(controller.save().await.unwrap().is_ok());

    controller.edit();
    set_text(&record, "name", "gadget");
    let outcome = controller.save().await.unwrap();
    assert_eq!(outcome, Ok(json!({"sku": "A2", "name": "gadget"})));
    assert_eq!(read(&path)["rows"], json!([{"sku": "A2", "name": "gadget"}]));
}

#[tokio::test]
async fn untouched_save_keeps_numeric_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ages.json");
    let table = json!({
        "key": "id",
        "columns": [{"name": "id", "editable": false}, {"name": "age"}],
        "rows": [{"id": 1, "age": 30}]
    });
    std::fs::write(&path, table.to_string()).unwrap();
    let document = TableDocument::load(&path).unwrap();
    let (_record, mut controller) = attach_row(&path, &document);

    controller.edit();
    assert!(controller.save().await.unwrap().is_ok());
    assert_eq!(read(&path)["rows"][0], json!({"id": 1, "age": 30}));
}
