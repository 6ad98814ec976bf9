use std::io::Write;

use codetweak::actions::Action;
use codetweak::config::Config;
use codetweak::core::openai::OpenAiClient;
use codetweak::error::TweakError;
use codetweak::executor::{self, RunOutcome};
use codetweak::selection::Selection;
use tempfile::NamedTempFile;

mod common;
use common::{MockBackend, MockCall};

/// Write `content` to a temp file with the given suffix
fn source_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[tokio::test]
async fn test_empty_selection_never_calls_backend() {
    let file = source_file(".rs", "   \n\t\n");
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    let backend = MockBackend::replying("unused");
    let config = Config::default();

    for action in Action::ALL {
        let outcome = executor::run(*action, &selection, Some("q"), &config, &backend)
            .await
            .expect("Guard should not error");
        assert_eq!(outcome, RunOutcome::NoSelection);
    }

    assert_eq!(backend.call_count(), 0, "Empty selection must not hit the network");
}

#[tokio::test]
async fn test_document_replaces_exactly_the_selected_range() {
    let file = source_file(
        ".js",
        "const x = 1;\nfunction add(a,b){return a+b}\nconst y = 2;\n",
    );
    let selection =
        Selection::from_file(file.path(), Some((2, 2)), None).expect("Failed to select");
    let backend = MockBackend::replying("// adds two numbers\nfunction add(a,b){return a+b}");
    let config = Config::default();

    let outcome = executor::run(Action::Document, &selection, None, &config, &backend)
        .await
        .expect("Run should succeed");

    let replacement = match outcome {
        RunOutcome::Edited(text) => text,
        other => panic!("Expected Edited, got {other:?}"),
    };
    selection
        .replace_with(&replacement)
        .expect("Failed to splice");

    let content = std::fs::read_to_string(file.path()).expect("Failed to read");
    assert_eq!(
        content,
        "const x = 1;\n// adds two numbers\nfunction add(a,b){return a+b}\nconst y = 2;\n",
        "Only the selected range may change"
    );

    // The instruction sent upstream had the language identifier substituted
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        MockCall::Edit { input, instruction } => {
            assert_eq!(input, "function add(a,b){return a+b}");
            assert!(instruction.contains("javascript"));
            assert!(!instruction.contains("{{LANG}}"));
        }
        other => panic!("Expected an edit call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyze_answers_without_touching_the_file() {
    let original = "fn main() { println!(\"hi\"); }\n";
    let file = source_file(".rs", original);
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    let backend = MockBackend::replying("It prints a greeting.");
    let config = Config::default();

    let outcome = executor::run(Action::Analyze, &selection, None, &config, &backend)
        .await
        .expect("Run should succeed");

    assert_eq!(
        outcome,
        RunOutcome::Message("It prints a greeting.".to_string())
    );
    let content = std::fs::read_to_string(file.path()).expect("Failed to read");
    assert_eq!(content, original, "Inquiry mode must not mutate the file");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        MockCall::Complete { prompt } => {
            assert!(prompt.contains("code analyzer"));
            assert!(prompt.ends_with(original.trim_end()));
        }
        other => panic!("Expected a completion call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_inquire_sends_question_then_selection() {
    let file = source_file(".py", "def add(a, b):\n    return a + b\n");
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    let backend = MockBackend::replying("Yes, it handles negatives.");
    let config = Config::default();

    let outcome = executor::run(
        Action::Inquire,
        &selection,
        Some("Does this handle negative numbers?"),
        &config,
        &backend,
    )
    .await
    .expect("Run should succeed");

    assert!(matches!(outcome, RunOutcome::Message(_)));
    match &backend.calls()[0] {
        MockCall::Complete { prompt } => {
            assert!(prompt.starts_with("Does this handle negative numbers?"));
            assert!(prompt.contains("def add(a, b):"));
        }
        other => panic!("Expected a completion call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_inquire_without_question_is_abandoned() {
    let file = source_file(".py", "print(1)\n");
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    let backend = MockBackend::replying("unused");
    let config = Config::default();

    let outcome = executor::run(Action::Inquire, &selection, None, &config, &backend)
        .await
        .expect("Guard should not error");
    assert_eq!(outcome, RunOutcome::NoQuestion);

    let outcome = executor::run(Action::Inquire, &selection, Some("  "), &config, &backend)
        .await
        .expect("Guard should not error");
    assert_eq!(outcome, RunOutcome::NoQuestion);

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_empty_completion_is_a_visible_failure() {
    let original = "let x = 1;\n";
    let file = source_file(".rs", original);
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    let backend = MockBackend::empty();
    let config = Config::default();

    let result = executor::run(Action::Optimize, &selection, None, &config, &backend).await;
    assert!(matches!(result, Err(TweakError::EmptyCompletion)));

    let content = std::fs::read_to_string(file.path()).expect("Failed to read");
    assert_eq!(content, original, "Failures must leave the file untouched");
}

#[tokio::test]
async fn test_missing_api_key_short_circuits_through_executor() {
    let file = source_file(".rs", "let x = 1;\n");
    let selection =
        Selection::from_file(file.path(), None, None).expect("Failed to select");
    // Default config has no API key configured
    let config = Config::default();
    let client = OpenAiClient::new(&config);

    let result = executor::run(Action::Optimize, &selection, None, &config, &client).await;
    assert!(matches!(result, Err(TweakError::MissingApiKey)));
}
