mod common;

use chat_service::common::error::AppError;
use chat_service::models::messages::{MessageContent, SendMessageArgs, SendOutcome};
use chat_service::models::scheduled_messages::{ScheduledMessage, ScheduledMessageStatus};
use chat_service::usecases::{conversations, messages, scheduler};
use chrono::{DateTime, TimeDelta, Utc};
use common::{TestContext, remove_db_files, temp_db_path};
use std::sync::Arc;

const BATCH_SIZE: u32 = 100;

async fn schedule_text(
    ctx: &TestContext,
    sender: i64,
    receiver: i64,
    body: &str,
    at: DateTime<Utc>,
) -> ScheduledMessage {
    let args = SendMessageArgs {
        text: Some(body.to_string()),
        image: None,
        scheduled_time: Some(at),
    };
    match messages::send(ctx, sender, receiver, args).await.unwrap() {
        SendOutcome::Scheduled(scheduled) => scheduled,
        SendOutcome::Sent(_) => panic!("expected a scheduled send"),
    }
}

#[tokio::test]
async fn scheduled_message_is_promoted_once_due() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let t0 = Utc::now();

    let scheduled = schedule_text(&ctx, alice, bob, "later", t0 + TimeDelta::seconds(60)).await;
    assert_eq!(scheduled.status, ScheduledMessageStatus::Pending);
    assert!(conversations::list_messages(&ctx, alice, bob).await.unwrap().is_empty());

    let early = scheduler::poll_and_promote(&ctx, t0 + TimeDelta::seconds(30), BATCH_SIZE)
        .await
        .unwrap();
    assert!(early.is_empty());
    assert!(conversations::list_messages(&ctx, alice, bob).await.unwrap().is_empty());

    let due = scheduler::poll_and_promote(&ctx, t0 + TimeDelta::seconds(61), BATCH_SIZE)
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].text.as_deref(), Some("later"));
    assert_eq!(due[0].sender_id, alice);
    assert_eq!(due[0].receiver_id, bob);
    assert!(!due[0].read);

    let thread = conversations::list_messages(&ctx, alice, bob).await.unwrap();
    assert_eq!(thread, due);
    assert!(scheduler::list_pending(&ctx, alice).await.unwrap().is_empty());

    let again = scheduler::poll_and_promote(&ctx, t0 + TimeDelta::seconds(120), BATCH_SIZE)
        .await
        .unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn past_trigger_time_is_due_on_next_poll() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    schedule_text(&ctx, alice, bob, "overdue", now - TimeDelta::hours(1)).await;

    let promoted = scheduler::poll_and_promote(&ctx, now, BATCH_SIZE).await.unwrap();
    assert_eq!(promoted.len(), 1);
    assert_eq!(promoted[0].text.as_deref(), Some("overdue"));
}

#[tokio::test]
async fn interleaved_polls_promote_each_entry_once() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    for i in 0..10 {
        let at = now - TimeDelta::seconds(i);
        schedule_text(&ctx, alice, bob, &format!("msg {i}"), at).await;
    }

    let (first, second) = tokio::join!(
        scheduler::poll_and_promote(&ctx, now, 3),
        scheduler::poll_and_promote(&ctx, now, 3),
    );
    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.len() + second.len(), 10);

    let thread = conversations::list_messages(&ctx, alice, bob).await.unwrap();
    assert_eq!(thread.len(), 10);
    let mut texts: Vec<_> = thread.iter().filter_map(|m| m.text.clone()).collect();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_pollers_on_a_shared_database_promote_each_entry_once() {
    const ENTRIES: usize = 200;

    let path = temp_db_path();
    let ctx = Arc::new(TestContext::on_disk(&path, 8).await);
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    for i in 0..ENTRIES {
        let body = format!("msg {i}");
        let content = MessageContent {
            text: Some(&body),
            image: None,
        };
        scheduler::schedule(&*ctx, alice, bob, content, now - TimeDelta::seconds(1))
            .await
            .unwrap();
    }

    let pollers: Vec<_> = (0..6)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move { scheduler::poll_and_promote(&*ctx, now, 7).await })
        })
        .collect();
    let mut promoted_ids = vec![];
    for poller in pollers {
        let promoted = poller.await.unwrap().unwrap();
        promoted_ids.extend(promoted.iter().map(|m| m.id));
    }

    assert_eq!(promoted_ids.len(), ENTRIES);
    promoted_ids.sort_unstable();
    promoted_ids.dedup();
    assert_eq!(promoted_ids.len(), ENTRIES);

    let thread = conversations::list_messages(&*ctx, alice, bob).await.unwrap();
    assert_eq!(thread.len(), ENTRIES);
    assert!(scheduler::list_pending(&*ctx, alice).await.unwrap().is_empty());

    ctx.db.close().await;
    remove_db_files(&path);
}

#[tokio::test]
async fn sweep_fails_when_no_due_entry_can_be_promoted() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    schedule_text(&ctx, alice, bob, "stuck", now).await;
    sqlx::query(
        "CREATE TRIGGER reject_messages BEFORE INSERT ON messages \
         BEGIN SELECT RAISE(ABORT, 'disk full'); END",
    )
    .execute(&ctx.db)
    .await
    .unwrap();

    let result = scheduler::poll_and_promote(&ctx, now, BATCH_SIZE).await;
    assert!(matches!(result, Err(AppError::StoreUnavailable)));
    assert_eq!(scheduler::list_pending(&ctx, alice).await.unwrap().len(), 1);
    assert!(conversations::list_messages(&ctx, alice, bob).await.unwrap().is_empty());

    sqlx::query("DROP TRIGGER reject_messages")
        .execute(&ctx.db)
        .await
        .unwrap();
    let promoted = scheduler::poll_and_promote(&ctx, now, BATCH_SIZE).await.unwrap();
    assert_eq!(promoted.len(), 1);
    assert_eq!(promoted[0].text.as_deref(), Some("stuck"));
}

#[tokio::test]
async fn promotion_pushes_to_reachable_receiver() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let session_id = ctx.transport.connect(bob);
    let now = Utc::now();

    schedule_text(&ctx, alice, bob, "surprise", now).await;
    assert!(ctx.transport.pushed().is_empty());

    let promoted = scheduler::poll_and_promote(&ctx, now, BATCH_SIZE).await.unwrap();
    let pushed = ctx.transport.pushed();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].session_id, session_id);
    assert_eq!(pushed[0].event, "newMessage");
    assert_eq!(pushed[0].payload["id"], promoted[0].id);
    assert_eq!(pushed[0].payload["text"], "surprise");
}

#[tokio::test]
async fn scheduled_image_is_uploaded_when_scheduling() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    let args = SendMessageArgs {
        text: None,
        image: Some("data:image/png;base64,AAAA".to_string()),
        scheduled_time: Some(now + TimeDelta::minutes(5)),
    };
    let SendOutcome::Scheduled(scheduled) = messages::send(&ctx, alice, bob, args).await.unwrap()
    else {
        panic!("expected a scheduled send");
    };
    assert_eq!(ctx.blob_store.uploads(), ["data:image/png;base64,AAAA"]);
    assert_eq!(scheduled.image.as_deref(), Some("https://blobs.example/1.png"));

    let promoted = scheduler::poll_and_promote(&ctx, now + TimeDelta::minutes(5), BATCH_SIZE)
        .await
        .unwrap();
    assert_eq!(promoted[0].image.as_deref(), Some("https://blobs.example/1.png"));
}

#[tokio::test]
async fn cancelled_entries_are_never_promoted() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    let kept = schedule_text(&ctx, alice, bob, "kept", now + TimeDelta::seconds(10)).await;
    let dropped = schedule_text(&ctx, alice, bob, "dropped", now + TimeDelta::seconds(10)).await;

    let cancelled = scheduler::cancel(&ctx, alice, dropped.id).await.unwrap();
    assert_eq!(cancelled.status, ScheduledMessageStatus::Cancelled);

    let pending = scheduler::list_pending(&ctx, alice).await.unwrap();
    assert_eq!(pending.iter().map(|s| s.id).collect::<Vec<_>>(), [kept.id]);

    let promoted = scheduler::poll_and_promote(&ctx, now + TimeDelta::seconds(10), BATCH_SIZE)
        .await
        .unwrap();
    assert_eq!(promoted.len(), 1);
    assert_eq!(promoted[0].text.as_deref(), Some("kept"));
}

#[tokio::test]
async fn cancel_rejects_foreign_and_finished_entries() {
    let ctx = TestContext::new().await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let now = Utc::now();

    let entry = schedule_text(&ctx, alice, bob, "hello", now).await;

    let foreign = scheduler::cancel(&ctx, bob, entry.id).await;
    assert!(matches!(foreign, Err(AppError::ScheduledMessagesNotFound)));

    let missing = scheduler::cancel(&ctx, alice, entry.id + 1000).await;
    assert!(matches!(missing, Err(AppError::ScheduledMessagesNotFound)));

    scheduler::poll_and_promote(&ctx, now, BATCH_SIZE).await.unwrap();
    let finished = scheduler::cancel(&ctx, alice, entry.id).await;
    assert!(matches!(finished, Err(AppError::ScheduledMessagesNotPending)));
}

#[tokio::test]
async fn schedule_applies_message_policy() {
    let mut ctx = TestContext::new().await;
    ctx.message_policy.require_content = true;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;

    let result = scheduler::schedule(
        &ctx,
        alice,
        bob,
        MessageContent::default(),
        Utc::now() + TimeDelta::seconds(5),
    )
    .await;
    assert!(matches!(result, Err(AppError::MessagesEmpty)));
    assert!(scheduler::list_pending(&ctx, alice).await.unwrap().is_empty());
}
