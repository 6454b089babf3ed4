//! Dashboard analytics endpoint with a read-through cache.

use actix_web::{HttpResponse, web};

use crate::auth::AuthUser;
use crate::cache::{self, Cache};
use crate::db::{DbPool, analytics};
use crate::error::AppResult;
use crate::models::DashboardAnalytics;

/// Dashboard snapshot: entity counts, execution/priority histograms, and
/// the trailing 7-day execution series. A cache hit is returned
/// byte-identical; a miss recomputes and stores with a fixed expiry.
/// Writers elsewhere delete the key, so staleness is bounded by the TTL.
#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "Analytics",
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardAnalytics),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn dashboard(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
) -> AppResult<HttpResponse> {
    if let Some(cached) = cache.get_json(cache::ANALYTICS_DASHBOARD).await {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let snapshot = analytics::dashboard_snapshot(pool.connection()).await?;

    let value = serde_json::to_value(&snapshot)?;
    cache
        .put_json(
            cache::ANALYTICS_DASHBOARD,
            &value,
            cache::ANALYTICS_TTL_SECS,
        )
        .await;

    Ok(HttpResponse::Ok().json(value))
}

/// Configure analytics routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/analytics").route(web::get().to(dashboard)));
}
