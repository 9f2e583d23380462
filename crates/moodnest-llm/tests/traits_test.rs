use moodnest_llm::{ChatOptions, ChatRequest, ChatResponse, Message, SafetySetting};
use serde_json::json;

fn response(content: Option<&str>, finish: Option<&str>, block: Option<&str>) -> ChatResponse {
    ChatResponse {
        content: content.map(str::to_string),
        finish_reason: finish.map(str::to_string),
        block_reason: block.map(str::to_string),
        usage: None,
        raw: json!({}),
    }
}

#[test]
fn test_chat_request_creation() {
    let messages = vec![Message::human("Hello")];
    let request = ChatRequest::new("gemini-2.0-flash", messages);

    assert_eq!(request.model, "gemini-2.0-flash");
    assert_eq!(request.messages.len(), 1);
    assert!(request.system_instruction.is_none());
}

#[test]
fn test_chat_request_with_instruction_and_options() {
    let options = ChatOptions::new()
        .temperature(0.7)
        .max_output_tokens(256)
        .safety_settings(SafetySetting::block_medium_and_above());

    let request = ChatRequest::new("gemini-2.0-flash", vec![Message::human("Hello")])
        .with_system_instruction("You are kind")
        .with_options(options);

    assert_eq!(request.system_instruction.as_deref(), Some("You are kind"));
    assert_eq!(request.options.temperature, Some(0.7));
    assert_eq!(request.options.max_output_tokens, Some(256));
    assert_eq!(request.options.safety_settings.len(), 4);
}

#[test]
fn test_chat_options_default() {
    let options = ChatOptions::default();

    assert_eq!(options.temperature, None);
    assert_eq!(options.max_output_tokens, None);
    assert!(options.safety_settings.is_empty());
}

#[test]
fn test_blank_response_has_no_text() {
    assert_eq!(response(Some("  \n"), Some("STOP"), None).text(), None);
    assert_eq!(response(None, Some("STOP"), None).text(), None);
    assert_eq!(response(Some("ok"), Some("STOP"), None).text(), Some("ok"));
}

#[test]
fn test_blocked_detection() {
    assert!(response(None, None, Some("SAFETY")).is_blocked());
    assert!(response(None, Some("SAFETY"), None).is_blocked());
    assert!(!response(Some("fine"), Some("STOP"), None).is_blocked());
    assert!(!response(None, Some("MAX_TOKENS"), None).is_blocked());
}
