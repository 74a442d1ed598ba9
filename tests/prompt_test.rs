use foundry::prompt::{DialoguerPrompter, Prompter};

#[test]
fn test_confirm_skip_answers_yes() {
    let prompter = DialoguerPrompter::new();
    assert!(prompter.confirm(true, "Replace existing directory?".to_string()).unwrap());
}
