// src/handlers/clientes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::RespostaApi},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::cliente::{Cliente, CriarClientePayload},
};

#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CriarClientePayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = RespostaApi),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
    Json(payload): Json<CriarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state.cliente_repo.criar(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RespostaApi::sucesso_com_dados("Cliente cadastrado com sucesso.", cliente)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses((status = 200, description = "Clientes em ordem alfabética", body = Vec<Cliente>)),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
) -> Result<Json<Vec<Cliente>>, AppError> {
    Ok(Json(app_state.cliente_repo.listar().await?))
}

#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Cliente>, AppError> {
    let cliente = app_state
        .cliente_repo
        .buscar_por_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?;

    Ok(Json(cliente))
}
