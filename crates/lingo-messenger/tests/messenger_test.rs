//! Integration tests for the messenger facade

use lingo_common::test_utils::init_test_logging;
use lingo_common::test_utils::locale_fixtures::english_translations;
use lingo_i18n::{I18nError, LocaleRegistry, MessageResolver};
use lingo_messenger::{
    Channel, Delivery, DeliveryError, DeliveryResult, MessageSink, Messenger, RecipientId,
    TitleTimes,
};
use mockall::mock;
use mockall::predicate::eq;
use parking_lot::Mutex;
use std::sync::Arc;

mock! {
    pub Sink {}

    impl MessageSink for Sink {
        fn deliver(&self, delivery: Delivery) -> DeliveryResult<()>;
    }
}

/// Sink that keeps every delivery for inspection
#[derive(Default)]
struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSink {
    fn taken(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }
}

impl MessageSink for RecordingSink {
    fn deliver(&self, delivery: Delivery) -> DeliveryResult<()> {
        self.deliveries.lock().push(delivery);
        Ok(())
    }
}

fn create_resolver() -> Arc<MessageResolver> {
    init_test_logging();
    let registry = LocaleRegistry::new("en_US");
    registry.load_map("en_US", english_translations());
    Arc::new(MessageResolver::new(Arc::new(registry)))
}

fn recording_messenger() -> (Messenger, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let messenger = Messenger::new(create_resolver(), sink.clone());
    (messenger, sink)
}

const NO_PARAMS: &[&str] = &[];

#[test]
fn test_broadcast_resolves_embedded_keys() {
    let (messenger, sink) = recording_messenger();

    assert!(messenger.broadcast("(greet.hello)", &["Steve"]).unwrap());

    assert_eq!(
        sink.taken(),
        vec![Delivery::new(
            Channel::Broadcast { permission: None },
            "Hello, Steve!"
        )]
    );
}

#[test]
fn test_broadcast_with_permission() {
    let (messenger, sink) = recording_messenger();

    assert!(messenger
        .broadcast_with_permission("lingo.staff", "(status.online)", NO_PARAMS)
        .unwrap());

    assert_eq!(
        sink.taken(),
        vec![Delivery::new(
            Channel::Broadcast {
                permission: Some("lingo.staff".to_string())
            },
            "\u{a7}aonline"
        )]
    );
}

#[test]
fn test_suppressed_messages_never_reach_the_sink() {
    let mut sink = MockSink::new();
    sink.expect_deliver().never();
    let messenger = Messenger::new(create_resolver(), Arc::new(sink));
    let steve = RecipientId::from("steve");

    assert!(!messenger.broadcast("none", NO_PARAMS).unwrap());
    assert!(!messenger.broadcast("", NO_PARAMS).unwrap());
    assert!(!messenger.send(&steve, "none", NO_PARAMS).unwrap());
    assert!(!messenger.action_bar(&steve, "", NO_PARAMS).unwrap());
    assert!(!messenger.console("none", &["ignored"]).unwrap());
    assert!(!messenger.title(&steve, "none", "", NO_PARAMS).unwrap());
}

#[test]
fn test_send_applies_prefix_markup() {
    let (messenger, sink) = recording_messenger();
    let messenger = messenger.with_prefix("&7[Server] ");
    let steve = RecipientId::from("steve");

    assert!(messenger.send(&steve, "(greet.bye)", NO_PARAMS).unwrap());

    assert_eq!(
        sink.taken(),
        vec![Delivery::new(
            Channel::Recipient { recipient: steve },
            "\u{a7}7[Server] Goodbye."
        )]
    );
}

#[test]
fn test_prefix_is_not_interpolated() {
    let (messenger, sink) = recording_messenger();
    let alex = RecipientId::from("alex");

    messenger
        .send_with_prefix(&alex, "{0}> ", "(greet.hello)", &["Alex"])
        .unwrap();

    assert_eq!(sink.taken()[0].text, "{0}> Hello, Alex!");
}

#[test]
fn test_prefix_token_completed_by_message() {
    let (messenger, sink) = recording_messenger();
    let messenger = messenger.with_prefix("[Server] &");
    let steve = RecipientId::from("steve");

    messenger.send(&steve, "lwelcome", NO_PARAMS).unwrap();
    messenger.send_key(&steve, "greet.bye", NO_PARAMS).unwrap();

    let texts: Vec<String> = sink.taken().into_iter().map(|d| d.text).collect();
    assert_eq!(
        texts,
        vec!["[Server] \u{a7}lwelcome", "[Server] &Goodbye."]
    );
}

#[test]
fn test_action_bar_and_console_channels() {
    let (messenger, sink) = recording_messenger();
    let alex = RecipientId::from("alex");

    messenger
        .action_bar(&alex, "(status.players)", &["3", "20"])
        .unwrap();
    messenger.console("&cshutting down", NO_PARAMS).unwrap();

    assert_eq!(
        sink.taken(),
        vec![
            Delivery::new(
                Channel::ActionBar { recipient: alex },
                "3 of 20 players online"
            ),
            Delivery::new(Channel::Console, "\u{a7}cshutting down"),
        ]
    );
}

#[test]
fn test_title_uses_default_times() {
    let mut sink = MockSink::new();
    sink.expect_deliver()
        .withf(|delivery| {
            matches!(
                &delivery.channel,
                Channel::Title { subtitle, times, .. }
                    if subtitle == "Goodbye." && *times == TitleTimes::new(10, 70, 20)
            ) && delivery.text == "Hello, Steve!"
        })
        .times(1)
        .returning(|_| Ok(()));
    let messenger = Messenger::new(create_resolver(), Arc::new(sink));

    assert!(messenger
        .title(
            &RecipientId::from("steve"),
            "(greet.hello)",
            "(greet.bye)",
            &["Steve"]
        )
        .unwrap());
}

#[test]
fn test_title_with_one_suppressed_part() {
    let (messenger, sink) = recording_messenger();
    let steve = RecipientId::from("steve");
    let times = TitleTimes::new(5, 40, 5);

    messenger
        .title_with_times(&steve, "none", "(greet.bye)", times, NO_PARAMS)
        .unwrap();

    assert_eq!(
        sink.taken(),
        vec![Delivery::new(
            Channel::Title {
                recipient: steve,
                subtitle: "Goodbye.".to_string(),
                times,
            },
            ""
        )]
    );
}

#[test]
fn test_reset_title() {
    let mut sink = MockSink::new();
    let steve = RecipientId::from("steve");
    sink.expect_deliver()
        .with(eq(Delivery::new(
            Channel::ResetTitle {
                recipient: steve.clone(),
            },
            "",
        )))
        .times(1)
        .returning(|_| Ok(()));
    let messenger = Messenger::new(create_resolver(), Arc::new(sink));

    messenger.reset_title(&steve).unwrap();
}

#[test]
fn test_send_key_is_strict() {
    let (messenger, sink) = recording_messenger();
    let steve = RecipientId::from("steve");

    messenger.send_key(&steve, "greet.hello", &["Steve"]).unwrap();
    assert_eq!(sink.taken()[0].text, "Hello, Steve!");

    let err = messenger
        .send_key(&steve, "greet.missing", NO_PARAMS)
        .unwrap_err();
    assert!(matches!(
        err,
        DeliveryError::I18n(I18nError::KeyNotFound { .. })
    ));
    assert!(sink.taken().is_empty());
}

#[test]
fn test_sink_errors_propagate() {
    let mut sink = MockSink::new();
    sink.expect_deliver()
        .times(1)
        .returning(|_| Err(DeliveryError::Sink("session closed".to_string())));
    let messenger = Messenger::new(create_resolver(), Arc::new(sink));

    let err = messenger
        .send(&RecipientId::from("gone"), "(greet.bye)", NO_PARAMS)
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Sink(_)));
}

#[test]
fn test_delivery_serializes_with_channel_tag() {
    let delivery = Delivery::new(
        Channel::ActionBar {
            recipient: RecipientId::from("steve"),
        },
        "hi",
    );

    let json = serde_json::to_value(&delivery).unwrap();
    assert_eq!(json["channel"]["channel"], "action_bar");
    assert_eq!(json["channel"]["recipient"], "steve");
    assert_eq!(json["text"], "hi");
}
