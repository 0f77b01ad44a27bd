//! System configuration round-trip
//!
//! Configs are keyed by name rather than id, and there is no create/delete
//! surface: the scenario updates whichever config the backend lists first.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::common::Result;

use super::Ctx;

pub async fn system_config(ctx: &mut Ctx<'_>) -> Result<()> {
    info!("exercising system config endpoints");

    let listed = ctx.get("/configs", &[]).await;

    let first_key = listed
        .body
        .as_ref()
        .and_then(|body| body.get("data"))
        .and_then(Value::as_array)
        .and_then(|configs| configs.first())
        .and_then(|config| config.get("config_key"))
        .and_then(Value::as_str)
        .map(str::to_string);

    match first_key {
        Some(key) if listed.success => {
            let update = json!({
                "config_value": "0.18",
                "config_description": "updated by smoke test",
                "is_active": true
            });
            ctx.put(&format!("/configs/{key}"), update).await;
        }
        _ => warn!("config list empty or unreadable, skipping config update"),
    }

    ctx.get("/configs", &[("is_active", "true".into())]).await;

    Ok(())
}
