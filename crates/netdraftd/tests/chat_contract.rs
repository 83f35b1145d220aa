//! Contract tests for the chat proxy's prompt assembly and wire shapes.

use netdraft_common::conversation::{ConversationContext, Stage};
use netdraft_common::rpc::{ChatMessage, ChatRequest, ChatResponse};
use netdraftd::gemini::{build_contents, system_prompt};

#[test]
fn prompt_lists_pending_questions_in_priority_order() {
    let ctx = ConversationContext::default();
    let prompt = system_prompt(&ctx);
    let first = prompt.find("What is your company size?").unwrap();
    let last = prompt
        .find("What are your primary network security concerns?")
        .unwrap();
    assert!(first < last);
    assert!(prompt.contains("- Collected Information: {}"));
}

#[test]
fn history_keeps_order_behind_the_system_turn() {
    let messages = vec![
        ChatMessage::assistant("Welcome!"),
        ChatMessage::user("We run a clinic."),
        ChatMessage::assistant("Industry: healthcare"),
        ChatMessage::user("50 staff."),
    ];
    let contents = build_contents("sys", &messages);
    let arr = contents.as_array().unwrap();
    assert_eq!(arr.len(), 5);
    assert_eq!(arr[0]["parts"][0]["text"], "sys");
    assert_eq!(arr[1]["role"], "model");
    assert_eq!(arr[4]["parts"][0]["text"], "50 staff.");
}

#[test]
fn tracked_reply_round_trips_through_the_wire_types() {
    // What the daemon does between upstream reply and HTTP response.
    let request: ChatRequest = serde_json::from_str(
        r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
    )
    .unwrap();
    let mut context = request.context.unwrap_or_default();
    assert_eq!(context.stage, Stage::Initial);

    let reply = "Noted.\nCompany size: 50\nIndustry: retail\nLocations: 1\nUptime: 99.9%";
    context.track_reply(reply);
    let response = ChatResponse {
        content: reply.to_string(),
        context,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["context"]["stage"], "recommending");
    assert_eq!(json["context"]["collectedInfo"]["companySize"], "50");
}
