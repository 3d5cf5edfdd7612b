// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, response::RespostaApi},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, CadastrarUsuarioPayload, LoginPayload, Usuario},
};

// Cadastro de usuário: rota protegida, só o Gestor cadastra.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = CadastrarUsuarioPayload,
    responses(
        (status = 201, description = "Usuário cadastrado", body = RespostaApi),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas gestores cadastram usuários")
    ),
    security(("api_jwt" = []))
)]
pub async fn register(
    State(app_state): State<AppState>,
    AuthenticatedUser(ator): AuthenticatedUser,
    Json(payload): Json<CadastrarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let usuario = app_state.auth_service.cadastrar_usuario(&ator, &payload).await?;

    let mensagem =
        format!("Usuário {} cadastrado como {}.", usuario.username, usuario.funcao.rotulo());

    Ok((StatusCode::CREATED, Json(RespostaApi::sucesso_com_dados(mensagem, usuario))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token de acesso", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state.auth_service.login(&payload.username, &payload.password).await?;

    Ok(Json(AuthResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses((status = 200, description = "Usuário autenticado", body = Usuario)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}
