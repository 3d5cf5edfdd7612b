// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::ResumoDashboard,
};

#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses((status = 200, description = "KPIs do recorte de visibilidade do usuário", body = ResumoDashboard)),
    security(("api_jwt" = []))
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<ResumoDashboard>, AppError> {
    Ok(Json(app_state.dashboard_service.resumo(&usuario).await?))
}
