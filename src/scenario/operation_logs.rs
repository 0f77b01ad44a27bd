//! Operation log queries
//!
//! Read-only scenario: logs are written by the backend as a side effect of
//! the earlier scenarios, so this only exercises the filter surface. The
//! filter values (`创建`, `订单管理`) are the backend's audit vocabulary.

use tracing::info;

use crate::common::Result;

use super::{today, Ctx};

pub async fn operation_logs(ctx: &mut Ctx<'_>) -> Result<()> {
    info!("exercising operation log endpoints");

    ctx.get(
        "/logs",
        &[("page", "1".into()), ("page_size", "10".into())],
    )
    .await;
    ctx.get("/logs", &[("operation_type", "创建".into())]).await;
    ctx.get("/logs", &[("operation_module", "订单管理".into())])
        .await;

    let date = today();
    ctx.get(
        "/logs",
        &[("start_date", date.clone()), ("end_date", date)],
    )
    .await;

    Ok(())
}
