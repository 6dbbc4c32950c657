//! Integration tests for the handler tree using teloxide_tests
//!
//! These tests dispatch mock updates through the same `schema` the
//! production dispatcher uses, with the in-memory gateway standing in for
//! PostgreSQL. Run with: cargo test --test handlers_integration_test

use serial_test::serial;
use std::sync::Arc;
use teloxide_tests::{MockBot, MockMessageText};

use salombot::storage::{MemoryStore, Storage};
use salombot::telegram::{schema, HandlerDeps};

fn deps(store: &Arc<MemoryStore>) -> HandlerDeps {
    let store: Arc<dyn Storage> = store.clone();
    HandlerDeps::new(store)
}

#[tokio::test]
#[serial]
async fn test_start_for_unseen_user_greets_and_asks_for_contact() {
    let store = Arc::new(MemoryStore::new());

    let message = MockMessageText::new().text("/start");
    let mut bot = MockBot::new(message, schema(deps(&store)));

    bot.dispatch().await;

    let responses = bot.get_responses();
    let sent_messages = &responses.sent_messages;

    assert_eq!(sent_messages.len(), 2, "Should send greeting and contact prompt");

    let greeting = sent_messages[0].text().expect("Greeting should have text");
    assert!(greeting.contains("Assalomu alaykum"), "Should greet the new user");

    let prompt = sent_messages[1].text().expect("Prompt should have text");
    assert_eq!(prompt, "You should share your contact");

    // /start alone must not register anybody
    assert_eq!(store.user_count(), 0, "/start must not create a user record");
}

#[tokio::test]
#[serial]
async fn test_start_is_read_only_across_repeats() {
    let store = Arc::new(MemoryStore::new());

    let messages = vec![MockMessageText::new().text("/start"), MockMessageText::new().text("/start")];
    let mut bot = MockBot::new(messages, schema(deps(&store)));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 4, "Two messages per /start");
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.media_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_media_command_with_no_records() {
    let store = Arc::new(MemoryStore::new());

    let message = MockMessageText::new().text("/media");
    let mut bot = MockBot::new(message, schema(deps(&store)));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1, "Should send exactly one reply");

    let text = responses.sent_messages[0].text().expect("Reply should have text");
    assert_eq!(text, "You haven't sent any media to the bot.");
}

#[tokio::test]
#[serial]
async fn test_plain_text_is_dropped_without_reply() {
    let store = Arc::new(MemoryStore::new());

    let message = MockMessageText::new().text("hello there");
    let mut bot = MockBot::new(message, schema(deps(&store)));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert!(
        responses.sent_messages.is_empty(),
        "Unmatched text must produce no reply"
    );
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.media_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_start_then_unmatched_text_in_sequence() {
    let store = Arc::new(MemoryStore::new());

    let messages = vec![
        MockMessageText::new().text("/start"),
        MockMessageText::new().text("just chatting"),
        MockMessageText::new().text("/media"),
    ];
    let mut bot = MockBot::new(messages, schema(deps(&store)));

    bot.dispatch().await;

    let responses = bot.get_responses();

    // /start -> greeting + prompt, text -> nothing, /media -> "no media"
    assert_eq!(responses.sent_messages.len(), 3);
    assert!(responses.sent_messages[0]
        .text()
        .expect("Greeting should have text")
        .contains("Assalomu alaykum"));
    assert_eq!(
        responses.sent_messages[2].text().expect("Reply should have text"),
        "You haven't sent any media to the bot."
    );
}
