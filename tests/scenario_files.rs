use std::io::Write;
use std::rc::Rc;

use order_form::{ConfigError, RecordingTrace, Scenario, TraceSink};
use tempfile::NamedTempFile;

fn write_scenario(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_run_scenario_file() {
    let file = write_scenario(
        r#"
[[steps]]
action = "select_date"
value = "Завтра"

[[steps]]
action = "toggle_other_person"
state = true
"#,
    );

    let scenario = Scenario::load(file.path()).unwrap();
    let recording = Rc::new(RecordingTrace::new());
    let trace: Rc<dyn TraceSink> = recording.clone();
    let state = scenario.run(trace).unwrap();

    assert_eq!(state.slots, vec!["10:00", "12:00", "15:00", "18:00"]);
    assert!(state.name_visible);
    assert!(state.phone_visible);
    assert!(!recording.lines().is_empty());
}

#[test]
fn test_pickup_twice_then_off() {
    let file = write_scenario(
        r#"
[[steps]]
action = "select_date"
value = "Сьогодні"

[[steps]]
action = "toggle_pickup"
state = true

[[steps]]
action = "toggle_pickup"
state = true

[[steps]]
action = "toggle_pickup"
state = false
"#,
    );

    let state = Scenario::load(file.path())
        .unwrap()
        .run(Rc::new(RecordingTrace::new()))
        .unwrap();
    assert!(state.slots.is_empty());
    assert!(!state.pickup);
}

#[test]
fn test_invalid_rules_in_file() {
    let file = write_scenario("[rules]\nother_day_slots = [\"10:00\", \"7pm\"]\n");
    let err = Scenario::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSlot { .. }));
    assert!(err.to_string().contains("7pm"));
}

#[test]
fn test_state_serializes_to_json() {
    let state = Scenario::default()
        .run(Rc::new(RecordingTrace::new()))
        .unwrap();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["date"], "Сьогодні");
    assert_eq!(json["other_person"], true);
    assert_eq!(json["slots"].as_array().map(Vec::len), Some(0));
}
