use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};
use twilight_model::{
    application::interaction::Interaction,
    gateway::payload::incoming::InteractionCreate,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
    util::Timestamp,
};

use warden_commands::{CommandInvocation, ModerationCommand, dispatch, execute, handle_interaction};
use warden_core::{
    Context, Platform, Reply, ReplyKind,
    model::{BulkDeleteOutcome, InteractionHandle, TargetUser, UnbanOutcome},
};

const GUILD: Id<GuildMarker> = Id::new(10);
const CHANNEL: Id<ChannelMarker> = Id::new(20);

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Ban(Id<UserMarker>, String),
    Unban(Id<UserMarker>),
    Kick(Id<UserMarker>, String),
    SetTimeout(Id<UserMarker>, Option<Timestamp>, Option<String>),
    BulkDelete(Id<ChannelMarker>, u16),
    Reply(Reply),
    DeleteReply,
}

#[derive(Default)]
struct FakePlatform {
    calls: Mutex<Vec<Call>>,
    fail_actions: Mutex<bool>,
    not_banned: bool,
    too_old: usize,
}

impl FakePlatform {
    fn failing() -> Self {
        let platform = Self::default();
        *platform.fail_actions.lock().unwrap() = true;
        platform
    }

    fn record(&self, call: Call) -> anyhow::Result<()> {
        let is_reply = matches!(call, Call::Reply(_) | Call::DeleteReply);
        self.calls.lock().unwrap().push(call);
        if !is_reply && *self.fail_actions.lock().unwrap() {
            anyhow::bail!("Missing Permissions");
        }
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Reply(_) | Call::DeleteReply))
            .collect()
    }

    fn replies(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Reply(reply) => Some(reply),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn ban(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::Ban(user_id, reason.to_owned()))
    }

    async fn unban(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<UnbanOutcome> {
        self.record(Call::Unban(user_id))?;
        Ok(if self.not_banned {
            UnbanOutcome::NotBanned
        } else {
            UnbanOutcome::Lifted
        })
    }

    async fn kick(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::Kick(user_id, reason.to_owned()))
    }

    async fn set_timeout(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Option<Timestamp>,
        reason: Option<&str>,
    ) -> anyhow::Result<()> {
        self.record(Call::SetTimeout(user_id, until, reason.map(ToOwned::to_owned)))
    }

    async fn bulk_delete(
        &self,
        channel_id: Id<ChannelMarker>,
        count: u16,
    ) -> anyhow::Result<BulkDeleteOutcome> {
        self.record(Call::BulkDelete(channel_id, count))?;
        let deleted = usize::from(count).saturating_sub(self.too_old);
        Ok(BulkDeleteOutcome {
            deleted,
            too_old: self.too_old,
        })
    }

    async fn reply(&self, _interaction: &InteractionHandle, reply: &Reply) -> anyhow::Result<()> {
        self.record(Call::Reply(reply.clone()))
    }

    async fn delete_reply(&self, _interaction: &InteractionHandle) -> anyhow::Result<()> {
        self.record(Call::DeleteReply)
    }
}

fn context(platform: &Arc<FakePlatform>) -> Context {
    Context::new(platform.clone(), GUILD)
}

fn invocation(command: ModerationCommand) -> CommandInvocation {
    CommandInvocation {
        command,
        guild_id: GUILD,
        channel_id: CHANNEL,
        interaction: InteractionHandle {
            id: Id::new(30),
            application_id: Id::new(40),
            token: "interaction-token".to_owned(),
        },
    }
}

fn alice() -> TargetUser {
    TargetUser::new(Id::new(42), "Alice")
}

fn timeout(duration: &str) -> ModerationCommand {
    ModerationCommand::Timeout {
        target: alice(),
        duration: duration.to_owned(),
        reason: None,
    }
}

/// An `INTERACTION_CREATE` payload as the gateway delivers it.
fn gateway_interaction(kind: u8, guild_id: u64, data: Option<Value>) -> Box<InteractionCreate> {
    let mut payload = json!({
        "id": "30",
        "application_id": "40",
        "type": kind,
        "token": "interaction-token",
        "guild_id": guild_id.to_string(),
        "channel": { "id": CHANNEL.get().to_string(), "type": 0 },
        "locale": "de",
        "authorizing_integration_owners": {},
        "entitlements": [],
    });
    if let Some(data) = data {
        payload["data"] = data;
    }

    let interaction: Interaction = serde_json::from_value(payload).unwrap();
    Box::new(InteractionCreate(interaction))
}

fn slash_command(guild_id: u64, name: &str, options: Value) -> Box<InteractionCreate> {
    gateway_interaction(
        2,
        guild_id,
        Some(json!({
            "id": "1",
            "name": name,
            "type": 1,
            "options": options,
            "resolved": {
                "users": {
                    "42": {
                        "id": "42",
                        "username": "alice",
                        "global_name": "Alice",
                        "discriminator": "0",
                        "avatar": null,
                    }
                }
            },
        })),
    )
}

#[tokio::test]
async fn slash_command_is_routed_and_answered_once() {
    let platform = Arc::new(FakePlatform::default());

    handle_interaction(
        context(&platform),
        slash_command(GUILD.get(), "ban", json!([{ "name": "user", "type": 6, "value": "42" }])),
    )
    .await
    .unwrap();

    assert_eq!(
        platform.actions(),
        vec![Call::Ban(Id::new(42), "Kein Grund angegeben.".to_owned())]
    );
    let replies = platform.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].content.contains("Alice"));
}

#[tokio::test]
async fn interactions_without_command_data_are_ignored() {
    let platform = Arc::new(FakePlatform::default());

    handle_interaction(context(&platform), gateway_interaction(1, GUILD.get(), None))
        .await
        .unwrap();

    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn context_menu_commands_are_ignored() {
    let platform = Arc::new(FakePlatform::default());
    let user_command = gateway_interaction(
        2,
        GUILD.get(),
        Some(json!({ "id": "1", "name": "ban", "type": 2, "target_id": "42" })),
    );

    handle_interaction(context(&platform), user_command).await.unwrap();

    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn commands_from_other_guilds_are_ignored() {
    let platform = Arc::new(FakePlatform::default());

    handle_interaction(
        context(&platform),
        slash_command(999, "ban", json!([{ "name": "user", "type": 6, "value": "42" }])),
    )
    .await
    .unwrap();

    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn missing_options_get_one_validation_reply() {
    let platform = Arc::new(FakePlatform::default());

    handle_interaction(context(&platform), slash_command(GUILD.get(), "ban", json!([])))
        .await
        .unwrap();

    assert!(platform.actions().is_empty());
    let replies = platform.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].kind, ReplyKind::Validation);
    assert_eq!(replies[0].content, "❌ Fehlende Option: user");
}

#[tokio::test]
async fn stale_command_names_still_get_a_reply() {
    let platform = Arc::new(FakePlatform::default());

    handle_interaction(
        context(&platform),
        slash_command(GUILD.get(), "purge", json!([{ "name": "anzahl", "type": 4, "value": 5 }])),
    )
    .await
    .unwrap();

    assert!(platform.actions().is_empty());
    let replies = platform.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].kind, ReplyKind::Failure);
    assert_eq!(replies[0].content, "❌ Fehler bei der Ausführung.");
    assert!(replies[0].ephemeral);
}

#[tokio::test]
async fn padded_or_blank_durations_are_invalid_formats() {
    for raw in [" 10m ", "   "] {
        let platform = Arc::new(FakePlatform::default());

        handle_interaction(
            context(&platform),
            slash_command(
                GUILD.get(),
                "timeout",
                json!([
                    { "name": "user", "type": 6, "value": "42" },
                    { "name": "dauer", "type": 3, "value": raw },
                ]),
            ),
        )
        .await
        .unwrap();

        assert!(platform.actions().is_empty(), "{raw:?}");
        assert_eq!(
            platform.replies(),
            vec![Reply::validation("❌ Ungültiges Zeitformat! Beispiel: 10m, 1h, 1d")],
            "{raw:?}"
        );
    }
}

#[tokio::test]
async fn ban_without_reason_uses_the_fallback_text() {
    let platform = Arc::new(FakePlatform::default());
    let ctx = context(&platform);

    let kind = execute(
        &ctx,
        &invocation(ModerationCommand::Ban {
            target: alice(),
            reason: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(kind, ReplyKind::Success);
    assert_eq!(
        platform.actions(),
        vec![Call::Ban(Id::new(42), "Kein Grund angegeben.".to_owned())]
    );
    let replies = platform.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].content.contains("Kein Grund angegeben."));
    assert!(replies[0].content.contains("Alice"));
    assert!(!replies[0].ephemeral);
}

#[tokio::test]
async fn kick_passes_the_reason_through() {
    let platform = Arc::new(FakePlatform::default());

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Kick {
            target: alice(),
            reason: Some("spam".to_owned()),
        }),
    )
    .await;

    assert!(reply.is_success());
    assert_eq!(reply.content, "👢 Alice wurde gekickt. Grund: spam");
    assert_eq!(platform.actions(), vec![Call::Kick(Id::new(42), "spam".to_owned())]);
}

#[tokio::test]
async fn timeout_converts_the_duration() {
    let platform = Arc::new(FakePlatform::default());
    let before = warden_utils::time::now_unix_secs() as i64;

    let reply = dispatch(&context(&platform), &invocation(timeout("10m"))).await;

    assert!(reply.is_success());
    assert!(reply.content.contains("10m"));
    let actions = platform.actions();
    let [Call::SetTimeout(user_id, Some(until), reason)] = actions.as_slice() else {
        panic!("expected a single timeout call, got {actions:?}");
    };
    assert_eq!(*user_id, Id::new(42));
    assert_eq!(reason.as_deref(), Some("Kein Grund angegeben."));
    let offset = until.as_secs() - before;
    assert!((600..=602).contains(&offset), "offset was {offset}");
}

#[tokio::test]
async fn malformed_durations_never_reach_the_platform() {
    for raw in ["abc", "10", "10x", ""] {
        let platform = Arc::new(FakePlatform::default());

        let reply = dispatch(&context(&platform), &invocation(timeout(raw))).await;

        assert_eq!(reply.kind, ReplyKind::Validation, "{raw:?}");
        assert_eq!(reply.content, "❌ Ungültiges Zeitformat! Beispiel: 10m, 1h, 1d");
        assert!(platform.actions().is_empty(), "{raw:?}");
    }
}

#[tokio::test]
async fn durations_outside_the_platform_limit_are_rejected() {
    for raw in ["0s", "29d", "99999999999999999999d"] {
        let platform = Arc::new(FakePlatform::default());

        let reply = dispatch(&context(&platform), &invocation(timeout(raw))).await;

        assert_eq!(reply.kind, ReplyKind::Validation, "{raw:?}");
        assert!(platform.actions().is_empty(), "{raw:?}");
    }

    let platform = Arc::new(FakePlatform::default());
    let reply = dispatch(&context(&platform), &invocation(timeout("28d"))).await;
    assert!(reply.is_success());
}

#[tokio::test]
async fn untimeout_clears_the_timeout() {
    let platform = Arc::new(FakePlatform::default());

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Untimeout { target: alice() }),
    )
    .await;

    assert_eq!(reply.content, "🔊 Timeout für Alice wurde aufgehoben.");
    assert_eq!(
        platform.actions(),
        vec![Call::SetTimeout(Id::new(42), None, None)]
    );
}

#[tokio::test]
async fn unban_of_a_user_without_a_ban_is_a_success() {
    let platform = Arc::new(FakePlatform {
        not_banned: true,
        ..FakePlatform::default()
    });

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Unban {
            user_id: "123456789".to_owned(),
        }),
    )
    .await;

    assert!(reply.is_success());
    assert_eq!(reply.content, "✅ Nutzer mit ID 123456789 wurde entbannt.");
    assert_eq!(platform.actions(), vec![Call::Unban(Id::new(123_456_789))]);
}

#[tokio::test]
async fn unban_rejects_ids_that_are_not_snowflakes() {
    let platform = Arc::new(FakePlatform::default());

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Unban {
            user_id: "not-an-id".to_owned(),
        }),
    )
    .await;

    assert_eq!(reply.kind, ReplyKind::Validation);
    assert!(platform.actions().is_empty());
}

#[tokio::test]
async fn clear_bounds_are_inclusive() {
    for count in [0, 101, -5] {
        let platform = Arc::new(FakePlatform::default());

        let reply = dispatch(
            &context(&platform),
            &invocation(ModerationCommand::Clear { count }),
        )
        .await;

        assert_eq!(reply.content, "❌ Bitte Zahl zwischen 1 und 100 angeben.");
        assert!(platform.actions().is_empty());
    }

    for count in [1, 100] {
        let platform = Arc::new(FakePlatform::default());

        let reply = dispatch(
            &context(&platform),
            &invocation(ModerationCommand::Clear { count }),
        )
        .await;

        assert!(reply.is_success());
        assert_eq!(reply.content, format!("🧹 {count} Nachrichten gelöscht."));
        assert_eq!(
            platform.actions(),
            vec![Call::BulkDelete(CHANNEL, count as u16)]
        );
    }
}

#[tokio::test]
async fn clear_reports_what_was_actually_deleted() {
    let platform = Arc::new(FakePlatform {
        too_old: 3,
        ..FakePlatform::default()
    });

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Clear { count: 10 }),
    )
    .await;

    assert_eq!(reply.content, "🧹 7 Nachrichten gelöscht.");
}

#[tokio::test]
async fn clear_with_only_old_messages_gets_a_specific_error() {
    let platform = Arc::new(FakePlatform {
        too_old: 5,
        ..FakePlatform::default()
    });

    let reply = dispatch(
        &context(&platform),
        &invocation(ModerationCommand::Clear { count: 5 }),
    )
    .await;

    assert_eq!(reply.kind, ReplyKind::Validation);
    assert!(reply.content.contains("14 Tage"));
    assert_eq!(reply.delete_after, None);
}

#[tokio::test(start_paused = true)]
async fn clear_confirmation_removes_itself() {
    let platform = Arc::new(FakePlatform::default());
    let ctx = context(&platform);

    execute(&ctx, &invocation(ModerationCommand::Clear { count: 3 }))
        .await
        .unwrap();
    assert!(!platform.calls().contains(&Call::DeleteReply));

    tokio::time::sleep(Duration::from_millis(3_100)).await;

    assert_eq!(platform.calls().last(), Some(&Call::DeleteReply));
}

#[tokio::test]
async fn platform_failures_become_one_generic_ephemeral_reply() {
    let platform = Arc::new(FakePlatform::failing());
    let ctx = context(&platform);

    let kind = execute(
        &ctx,
        &invocation(ModerationCommand::Ban {
            target: alice(),
            reason: Some("raid".to_owned()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(kind, ReplyKind::Failure);
    let replies = platform.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].content, "❌ Fehler bei der Ausführung.");
    assert!(replies[0].ephemeral);
    assert!(!replies[0].content.contains("Missing Permissions"));
}

#[tokio::test]
async fn a_failed_command_does_not_affect_the_next_one() {
    let platform = Arc::new(FakePlatform::failing());
    let ctx = context(&platform);

    let first = execute(&ctx, &invocation(ModerationCommand::Untimeout { target: alice() }))
        .await
        .unwrap();
    *platform.fail_actions.lock().unwrap() = false;
    let second = execute(&ctx, &invocation(ModerationCommand::Untimeout { target: alice() }))
        .await
        .unwrap();

    assert_eq!(first, ReplyKind::Failure);
    assert_eq!(second, ReplyKind::Success);
    assert_eq!(platform.replies().len(), 2);
}
