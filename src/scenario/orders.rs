//! Order lifecycle, including the status transitions
//!
//! Orders reference a customer and an order category, so this scenario only
//! runs when the earlier scenarios managed to create both. The status values
//! (`待处理` / `已确认` / `驳回`) are the backend's workflow enum.

use chrono::{Duration, Local};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::common::Result;

use super::{created_id, today, Ctx};

fn order_payload(customer_id: i64, category_id: i64) -> Value {
    let start = Local::now();
    let end = start + Duration::hours(2);
    let time_format = "%Y-%m-%d %H:%M:%S";

    json!({
        "customer_id": customer_id,
        "order_category_id": category_id,
        "game": "smoke test game",
        "project_category": "smoke test",
        "playmate_level": "standard",
        "start_time": start.format(time_format).to_string(),
        "end_time": end.format(time_format).to_string(),
        "duration_hours": 2.0,
        "unit_price": 50.00,
        "is_teammate": false,
        "mode": "smoke test mode",
        "service_additional_info": "smoke test",
        "internal_notes": "created by smoke test",
        "order_notes": "smoke test order",
        "platform_owner": "smoke test platform",
        "exclusive_discount": false
    })
}

pub async fn orders(ctx: &mut Ctx<'_>) -> Result<()> {
    let (customer_id, category_id) = match (
        ctx.session.id("customer_id"),
        ctx.session.id("category_id"),
    ) {
        (Some(customer), Some(category)) => (customer, category),
        _ => {
            warn!("missing customer or category from earlier scenarios, skipping order tests");
            return Ok(());
        }
    };

    info!("exercising order endpoints");

    ctx.get(
        "/orders",
        &[("page", "1".into()), ("page_size", "10".into())],
    )
    .await;

    let payload = order_payload(customer_id, category_id);
    let created = ctx.post("/orders", payload.clone()).await;

    if let Some(id) = created_id(&created, "order_id") {
        ctx.session.record_id("order_id", id);

        ctx.get(&format!("/orders/{id}"), &[]).await;

        let mut updated = payload;
        updated["game"] = json!("smoke test game (updated)");
        ctx.put(&format!("/orders/{id}"), updated).await;

        ctx.put(
            &format!("/orders/{id}/status"),
            json!({"order_status": "已确认"}),
        )
        .await;

        ctx.put(
            &format!("/orders/{id}/status"),
            json!({
                "order_status": "驳回",
                "rejection_reason": "rejected by smoke test"
            }),
        )
        .await;
    }

    // Filter queries run regardless of whether creation succeeded.
    ctx.get("/orders", &[("order_status", "待处理".into())]).await;

    let date = today();
    ctx.get(
        "/orders",
        &[("start_date", date.clone()), ("end_date", date)],
    )
    .await;

    Ok(())
}
