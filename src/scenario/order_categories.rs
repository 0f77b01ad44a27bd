//! Order category lifecycle

use serde_json::{json, Value};
use tracing::info;

use crate::common::Result;

use super::{created_id, unique_suffix, Ctx};

fn category_payload() -> Value {
    json!({
        "category_name": format!("smoke_game_{}", unique_suffix()),
        "sort_order": 100,
        "usage_scenario": "smoke test",
        "commission_rate": 0.20,
        "is_participating": true,
        "is_required": false,
        "is_accelerated": false,
        "additional_info": "created by smoke test"
    })
}

pub async fn order_categories(ctx: &mut Ctx<'_>) -> Result<()> {
    info!("exercising order category endpoints");

    ctx.get("/order-categories", &[]).await;

    let payload = category_payload();
    let created = ctx.post("/order-categories", payload.clone()).await;

    if let Some(id) = created_id(&created, "category_id") {
        ctx.session.record_id("category_id", id);

        let mut updated = payload;
        updated["category_name"] = json!(format!("smoke_game_{}_updated", unique_suffix()));
        ctx.put(&format!("/order-categories/{id}"), updated).await;

        ctx.delete(&format!("/order-categories/{id}")).await;
    }

    Ok(())
}
