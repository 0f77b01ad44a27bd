//! Member management lifecycle

use serde_json::{json, Value};
use tracing::info;

use crate::common::Result;

use super::{created_id, unique_suffix, Ctx};

fn member_payload() -> Value {
    json!({
        "account": format!("test_{}", unique_suffix()),
        "password": "123456",
        "name": "smoke test member",
        "phone_number": "13800138000",
        "department": "陪玩部",
        "user_role": "陪玩",
        "notes": "created by smoke test",
        "is_auditor": false,
        "can_report": true,
        "can_accept_order": true,
        "commission_rate": 0.15,
        "creator_id": 1
    })
}

pub async fn members(ctx: &mut Ctx<'_>) -> Result<()> {
    info!("exercising member management endpoints");

    ctx.get(
        "/members",
        &[("page", "1".into()), ("page_size", "10".into())],
    )
    .await;
    ctx.get("/members", &[("account", "admin".into())]).await;

    let payload = member_payload();
    let created = ctx.post("/members", payload.clone()).await;

    if let Some(id) = created_id(&created, "member_id") {
        ctx.session.record_id("member_id", id);

        ctx.get(&format!("/members/{id}"), &[]).await;

        // Update reuses the creation payload; an empty password means
        // "leave the password unchanged" to the backend.
        let mut updated = payload;
        updated["name"] = json!("smoke test member (updated)");
        updated["password"] = json!("");
        ctx.put(&format!("/members/{id}"), updated).await;

        ctx.delete(&format!("/members/{id}")).await;
    }

    Ok(())
}
