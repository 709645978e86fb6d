use ride_booking::adapters::{command, MemorySink, PresentationEvent, RecordingPresenter};
use ride_booking::config::{CatalogConfig, ScriptConfig};
use ride_booking::utils::validation::Validate;
use ride_booking::{BookingCoordinator, BookingSnapshot, Category, FlowState, Screen};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn replay(
    script: &ScriptConfig,
    catalog: &CatalogConfig,
) -> (
    BookingCoordinator<RecordingPresenter, MemorySink>,
    Vec<usize>,
) {
    let presenter = RecordingPresenter::answering(script.responses().unwrap());
    let mut coordinator = BookingCoordinator::with_policy(
        Arc::new(catalog.to_catalog().unwrap()),
        catalog.policy().unwrap(),
        presenter,
        MemorySink::new(),
    );
    coordinator.render();

    let mut rejected = Vec::new();
    for (i, cmd) in script.commands().unwrap().iter().enumerate() {
        if command::execute(&mut coordinator, cmd).is_err() {
            rejected.push(i);
        }
    }
    (coordinator, rejected)
}

#[test]
fn test_bundled_script_books_a_moto() {
    let script = ScriptConfig::from_file("scripts/book-moto.toml").unwrap();
    assert!(script.validate().is_ok());
    let catalog = CatalogConfig::builtin().unwrap();

    let (coordinator, rejected) = replay(&script, &catalog);
    assert!(rejected.is_empty());

    let receipts = coordinator.sink().receipts();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].snapshot.vehicle.as_deref(), Some("moto"));
    assert_eq!(receipts[0].snapshot.payment.as_deref(), Some("cash"));

    let presenter = coordinator.presenter();
    // first confirm lacked a drop-off location
    assert_eq!(presenter.warnings().len(), 1);
    assert_eq!(presenter.prompts().len(), 2);
    assert!(presenter.events().contains(&PresentationEvent::Success {
        message: "Enavroom booked successfully!".to_string()
    }));
    assert_eq!(presenter.navigations(), vec![Screen::Home, Screen::History]);

    assert_eq!(coordinator.flow_state(), FlowState::Idle);
    assert_eq!(coordinator.current_screen(), Screen::History);
}

#[test]
fn test_script_with_custom_catalog_file() {
    let mut catalog_file = NamedTempFile::new().unwrap();
    catalog_file
        .write_all(
            br#"
[catalog.pickup_location]
options = [{ id = "dorm", name = "Dormitory" }]

[catalog.dropoff_location]
options = [{ id = "library", name = "Library" }]

[catalog.vehicle_type]
options = [{ id = "bike", name = "Bike", price = 20 }]

[booking]
required = ["pickup", "dropoff", "vehicle"]
success_message = "See you soon"
"#,
        )
        .unwrap();

    let script = ScriptConfig::from_toml_str(
        r#"
steps = [
    "select pickup dorm",
    "select vehicle rocket",
    "select vehicle bike",
    "select dropoff library",
    "confirm",
]
answers = ["accept"]

[script]
name = "campus"
"#,
    )
    .unwrap();
    let catalog = CatalogConfig::from_file(catalog_file.path()).unwrap();
    assert!(catalog.validate().is_ok());

    let (coordinator, rejected) = replay(&script, &catalog);
    assert_eq!(rejected, vec![1]);

    let receipt = &coordinator.sink().receipts()[0];
    assert_eq!(
        receipt.snapshot,
        BookingSnapshot {
            pickup: Some("dorm".to_string()),
            dropoff: Some("library".to_string()),
            vehicle: Some("bike".to_string()),
            payment: None,
        }
    );
    assert_eq!(receipt.fare, Some(20.0));
    assert!(coordinator
        .presenter()
        .events()
        .contains(&PresentationEvent::Success {
            message: "See you soon".to_string()
        }));
    assert_eq!(coordinator.current(Category::PickupLocation), None);
}
