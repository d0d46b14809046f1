use super::*;

use serde_json::json;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_initial_form() {
    let form = FormState::default();
    assert_eq!(form.user_request, "");
    assert!(form.review);
    assert_eq!(form.max_iterations, 2);
    assert_eq!(form.root_directory, ".");
}

#[test]
fn default_serializes_with_client_field_names() {
    let value = serde_json::to_value(FormState::default()).unwrap();
    assert_eq!(
        value,
        json!({ "userRequest": "", "review": true, "max_iterations": 2, "rootDirectory": "." })
    );
}

// =============================================================
// Deserialization
// =============================================================

#[test]
fn parses_entry_written_by_browser_client() {
    let raw = r#"{"userRequest":"add tests","review":false,"max_iterations":4,"rootDirectory":"src"}"#;
    let form: FormState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        form,
        FormState {
            user_request: "add tests".into(),
            review: false,
            max_iterations: 4,
            root_directory: "src".into(),
        }
    );
}

#[test]
fn missing_fields_take_defaults() {
    let form: FormState = serde_json::from_str(r#"{"userRequest":"fix bug"}"#).unwrap();
    assert_eq!(form.user_request, "fix bug");
    assert!(form.review);
    assert_eq!(form.max_iterations, DEFAULT_MAX_ITERATIONS);
    assert_eq!(form.root_directory, DEFAULT_ROOT_DIRECTORY);
}

#[test]
fn wrong_field_type_is_rejected() {
    let result = serde_json::from_str::<FormState>(r#"{"max_iterations":"many"}"#);
    assert!(result.is_err());
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn blank_request_is_not_submittable() {
    let form = FormState { user_request: "   ".into(), ..FormState::default() };
    assert!(!form.is_submittable());
}

#[test]
fn zero_iterations_is_not_submittable() {
    let form = FormState { user_request: "do it".into(), max_iterations: 0, ..FormState::default() };
    assert!(!form.is_submittable());
}

#[test]
fn filled_request_is_submittable() {
    let form = FormState { user_request: "do it".into(), ..FormState::default() };
    assert!(form.is_submittable());
}

#[test]
fn init_message_carries_form_settings() {
    let form = FormState {
        user_request: "  rename module \n".into(),
        review: false,
        max_iterations: 3,
        root_directory: "/repo".into(),
    };
    let msg = form.init_message();
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({ "content": "rename module", "review": false, "max_iterations": 3, "rootDirectory": "/repo" })
    );
}
