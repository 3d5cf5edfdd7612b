// src/handlers/processos.rs

use axum::{
    extract::{Path, Query, State},
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
    models::processo::{
        AlterarStatusPayload, AnexoPayload, AtualizarRastreioPayload, ComentarioPayload,
        CriarProcessoPayload, FiltroProcessos, ProcessoDetalhe, ProcessoResumo, StatusProcesso,
        TipoAmostra,
    },
};

#[utoipa::path(
    post,
    path = "/api/processos",
    tag = "Processos",
    request_body = CriarProcessoPayload,
    responses(
        (status = 201, description = "Processo criado com código PRC-ANO-NNNN", body = RespostaApi),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Separadores não criam processos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CriarProcessoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let processo = app_state.processo_service.criar(&usuario, &payload).await?;

    let mensagem = format!(
        "Processo {} criado com sucesso.",
        processo.codigo.as_deref().unwrap_or("")
    );

    Ok((StatusCode::CREATED, Json(RespostaApi::sucesso_com_dados(mensagem, processo))))
}

#[utoipa::path(
    get,
    path = "/api/processos",
    tag = "Processos",
    params(FiltroProcessos),
    responses((status = 200, description = "Processos visíveis ao usuário, mais recentes primeiro", body = Vec<ProcessoResumo>)),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Query(filtro): Query<FiltroProcessos>,
) -> Result<Json<Vec<ProcessoResumo>>, AppError> {
    Ok(Json(app_state.processo_service.listar_visiveis(&usuario, &filtro).await?))
}

#[utoipa::path(
    get,
    path = "/api/processos/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo com cliente, anexos, comentários e timeline", body = ProcessoDetalhe),
        (status = 403, description = "Fora do recorte de visibilidade do usuário"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn detalhar(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessoDetalhe>, AppError> {
    Ok(Json(app_state.processo_service.detalhar(&usuario, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/tipos-amostra",
    tag = "Processos",
    responses((status = 200, description = "Catálogo de tipos de amostra", body = Vec<TipoAmostra>)),
    security(("api_jwt" = []))
)]
pub async fn listar_tipos_amostra(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
) -> Result<Json<Vec<TipoAmostra>>, AppError> {
    Ok(Json(app_state.processo_service.listar_tipos_amostra().await?))
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/atribuir",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo assumido", body = RespostaApi),
        (status = 400, description = "Processo cancelado ou já com responsável"),
        (status = 403, description = "Apenas separadores assumem processos")
    ),
    security(("api_jwt" = []))
)]
pub async fn atribuir(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RespostaApi>, AppError> {
    app_state.processo_service.atribuir(&usuario, id).await?;

    Ok(Json(RespostaApi::sucesso("Processo assumido com sucesso.")))
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/status",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = AlterarStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = RespostaApi),
        (status = 400, description = "Processo cancelado ou em conflito de posse"),
        (status = 403, description = "Apenas separadores alteram status")
    ),
    security(("api_jwt" = []))
)]
pub async fn alterar_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AlterarStatusPayload>,
) -> Result<Json<RespostaApi>, AppError> {
    let novo_status =
        app_state.processo_service.alterar_status(&usuario, id, payload.novo_status).await?;

    Ok(Json(RespostaApi::sucesso(format!("Status atualizado para {}.", novo_status))))
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/rastreio",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = AtualizarRastreioPayload,
    responses(
        (status = 200, description = "Código de rastreio gravado", body = RespostaApi),
        (status = 403, description = "Usuário sem permissão sobre o rastreio deste processo")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_rastreio(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarRastreioPayload>,
) -> Result<Json<RespostaApi>, AppError> {
    payload.validate()?;

    let alterado = app_state
        .processo_service
        .atualizar_rastreio(&usuario, id, &payload.codigo_rastreio)
        .await?;

    if alterado {
        Ok(Json(RespostaApi::sucesso("Código de rastreio atualizado com sucesso.")))
    } else {
        Ok(Json(RespostaApi::info("O código informado é igual ao atual. Nada a fazer.")))
    }
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/comentarios",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = ComentarioPayload,
    responses(
        (status = 200, description = "Comentário registrado", body = RespostaApi),
        (status = 400, description = "Comentário vazio ou processo cancelado")
    ),
    security(("api_jwt" = []))
)]
pub async fn adicionar_comentario(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ComentarioPayload>,
) -> Result<Json<RespostaApi>, AppError> {
    app_state.processo_service.adicionar_comentario(&usuario, id, &payload).await?;

    let mensagem = if payload.encaminhar_gestao {
        "Ocorrência registrada e encaminhada à gestão."
    } else {
        "Comentário adicionado com sucesso."
    };

    Ok(Json(RespostaApi::sucesso(mensagem)))
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/anexos",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = AnexoPayload,
    responses(
        (status = 200, description = "Anexo registrado", body = RespostaApi),
        (status = 400, description = "Arquivo grande demais ou extensão não suportada"),
        (status = 403, description = "Usuário sem vínculo com o processo")
    ),
    security(("api_jwt" = []))
)]
pub async fn anexar_arquivo(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnexoPayload>,
) -> Result<Json<RespostaApi>, AppError> {
    payload.validate()?;

    let anexo = app_state.processo_service.anexar_arquivo(&usuario, id, &payload).await?;

    Ok(Json(RespostaApi::sucesso_com_dados("Anexo adicionado com sucesso.", anexo)))
}

#[utoipa::path(
    post,
    path = "/api/processos/{id}/cancelar",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Processo cancelado ou reativado", body = RespostaApi),
        (status = 403, description = "Apenas o gestor ou o criador cancelam")
    ),
    security(("api_jwt" = []))
)]
pub async fn alternar_cancelamento(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RespostaApi>, AppError> {
    let novo_status = app_state.processo_service.alternar_cancelamento(&usuario, id).await?;

    let mensagem = if novo_status == StatusProcesso::Cancelado {
        "Processo cancelado."
    } else {
        "Processo reativado e devolvido à fila."
    };

    Ok(Json(RespostaApi::sucesso(mensagem)))
}
