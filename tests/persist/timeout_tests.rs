use std::rc::Rc;
use std::time::Duration;

use rowedit::element::memory::MemoryRecord;
use rowedit::persist::{SaveFailure, WithTimeout, from_fn};
use rowedit::{ControllerState, RecordController, RecordOptions};

fn slow(delay: Duration) -> WithTimeout<impl rowedit::PersistenceAdapter> {
    let adapter = from_fn(move |values| async move {
        tokio::time::sleep(delay).await;
        Ok(values.to_json())
    });
    WithTimeout::new(adapter, Duration::from_millis(50))
}

#[tokio::test(start_paused = true)]
async fn overrun_fails_the_save_and_keeps_editing() {
    let record = MemoryRecord::builder().text("name", "Alice").build();
    let mut controller = RecordController::attach(
        &record,
        RecordOptions::default(),
        Rc::new(slow(Duration::from_secs(5))),
    )
    .unwrap();

    controller.edit();
    let outcome = controller.save().await.unwrap();
    assert_eq!(
        outcome,
        Err(SaveFailure::TimedOut(Duration::from_millis(50)))
    );
    assert_eq!(controller.state(), ControllerState::Editing);
    assert!(record.editor("name").unwrap().is_enabled());
}

#[tokio::test(start_paused = true)]
async fn quick_adapters_pass_through() {
    let record = MemoryRecord::builder().text("name", "Alice").build();
    let mut controller = RecordController::attach(
        &record,
        RecordOptions::default(),
        Rc::new(slow(Duration::from_millis(5))),
    )
    .unwrap();

    controller.edit();
    let outcome = controller.save().await.unwrap();
    assert_eq!(outcome, Ok(serde_json::json!({"name": "Alice"})));
    assert_eq!(controller.state(), ControllerState::Viewing);
}
