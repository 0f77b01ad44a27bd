//! Customer management lifecycle, including recharge bookkeeping

use serde_json::{json, Value};
use tracing::info;

use crate::common::Result;

use super::{created_id, unique_suffix, Ctx};

fn customer_payload() -> Value {
    json!({
        "account": format!("customer_{}", unique_suffix()),
        "customer_name": "smoke test customer",
        "contact_method": "wechat: test_wx",
        "phone_number": "13900139000",
        "member_birthday": "1990-01-01",
        "room_code": "ROOM001",
        "notes": "created by smoke test",
        "initial_real_charge": 1000.00,
        "exclusive_discount_type": "固定折扣",
        "platform_boss": "平台老板A",
        "exclusive_cs": "客服小王"
    })
}

pub async fn customers(ctx: &mut Ctx<'_>) -> Result<()> {
    info!("exercising customer management endpoints");

    ctx.get(
        "/customers",
        &[("page", "1".into()), ("page_size", "10".into())],
    )
    .await;

    let payload = customer_payload();
    let created = ctx.post("/customers", payload.clone()).await;

    if let Some(id) = created_id(&created, "customer_id") {
        ctx.session.record_id("customer_id", id);

        ctx.get(&format!("/customers/{id}"), &[]).await;

        let mut updated = payload;
        updated["customer_name"] = json!("smoke test customer (updated)");
        ctx.put(&format!("/customers/{id}"), updated).await;

        let recharge = json!({
            "real_charge_amount": 500.00,
            "gift_amount": 50.00,
            "payment_method": "微信",
            "transaction_id": format!("WX{}", unique_suffix()),
            "notes": "smoke test recharge"
        });
        ctx.post(&format!("/customers/{id}/recharge"), recharge).await;
        ctx.get(&format!("/customers/{id}/recharge-history"), &[]).await;

        ctx.delete(&format!("/customers/{id}")).await;
    }

    Ok(())
}
