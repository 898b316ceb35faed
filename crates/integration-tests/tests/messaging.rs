use domains::{ConversationId, DomainError, FeatureFlag, UserId};
use integration_tests::{seeded_services, ADMIN};

#[tokio::test]
async fn opening_a_conversation_is_idempotent() {
    let services = seeded_services();
    let messaging = &services.messaging;
    let me = UserId::from(ADMIN);

    let (existing, created) = messaging.open_conversation(&me, &"1".into()).await.unwrap();
    assert!(!created);
    assert_eq!(existing.id.as_str(), "conv1");

    let (fresh, created) = messaging.open_conversation(&"4".into(), &me).await.unwrap();
    assert!(created);
    assert!(fresh.messages.is_empty());
    let (again, created) = messaging.open_conversation(&me, &"4".into()).await.unwrap();
    assert!(!created);
    assert_eq!(again.id, fresh.id);

    let found = messaging.conversation_with(&me, &"4".into()).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(fresh.id));
    assert_eq!(messaging.conversations_for(&me).await.unwrap().len(), 3);
}

#[tokio::test]
async fn messages_append_to_the_conversation() {
    let services = seeded_services();
    let messaging = &services.messaging;
    let conv = ConversationId::from("conv2");

    let message = messaging
        .send_message(&"2".into(), &conv, "  Is it still available?  ")
        .await
        .unwrap();
    assert_eq!(message.text, "Is it still available?");
    assert_eq!(message.sender_id.as_str(), "2");
    assert!(!message.timestamp.is_empty());

    let convs = messaging.conversations_for(&"2".into()).await.unwrap();
    let conv2 = convs.iter().find(|c| c.id == conv).unwrap();
    assert_eq!(conv2.messages.len(), 2);
    assert_eq!(conv2.messages.last().unwrap().id, message.id);
}

#[tokio::test]
async fn message_rules() {
    let services = seeded_services();
    let messaging = &services.messaging;
    let conv = ConversationId::from("conv1");

    let err = messaging.send_message(&"1".into(), &conv, "   ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = messaging.send_message(&"4".into(), &conv, "hi").await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let err = messaging
        .send_message(&"1".into(), &"conv404".into(), "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound("Conversation", _)));

    let err = messaging.open_conversation(&"1".into(), &"1".into()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    services
        .site
        .toggle_flag(&ADMIN.into(), FeatureFlag::AllowMessaging)
        .await
        .unwrap();
    let err = messaging.send_message(&"1".into(), &conv, "hi").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn mark_all_read_clears_unread_and_is_idempotent() {
    let services = seeded_services();
    let notifications = &services.notifications;

    assert_eq!(notifications.list().await.unwrap().len(), 4);
    assert_eq!(notifications.unread_count().await.unwrap(), 2);

    assert_eq!(notifications.mark_all_read().await.unwrap(), 2);
    assert_eq!(notifications.unread_count().await.unwrap(), 0);

    assert_eq!(notifications.mark_all_read().await.unwrap(), 0);
    assert!(notifications.list().await.unwrap().iter().all(|n| n.is_read));
}

#[test]
fn unread_count_on_a_fresh_store() {
    let services = seeded_services();
    let unread = tokio_test::block_on(services.notifications.unread_count()).unwrap();
    assert_eq!(unread, 2);
}
