// src/handlers/correios.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::RespostaApi},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::Funcao,
    models::correios::{ConsultaCepParams, ParametrosFrete},
};

// Preenchimento automático de endereço nos formulários.
#[utoipa::path(
    get,
    path = "/api/correios/cep",
    tag = "Correios",
    params(ConsultaCepParams),
    responses(
        (status = 200, description = "Endereço encontrado", body = RespostaApi),
        (status = 400, description = "CEP malformado"),
        (status = 404, description = "CEP inexistente na base dos Correios"),
        (status = 503, description = "Sem token de acesso aos Correios")
    ),
    security(("api_jwt" = []))
)]
pub async fn consultar_cep(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
    Query(params): Query<ConsultaCepParams>,
) -> Result<Json<RespostaApi>, AppError> {
    let endereco = app_state
        .correios_service
        .consultar_cep(&params.cep)
        .await?
        .ok_or_else(|| AppError::NotFound("CEP".to_string()))?;

    Ok(Json(RespostaApi::sucesso_com_dados("CEP encontrado.", endereco)))
}

#[utoipa::path(
    post,
    path = "/api/correios/frete",
    tag = "Correios",
    request_body = ParametrosFrete,
    responses(
        (status = 200, description = "Cotações SEDEX/PAC ordenadas por preço", body = RespostaApi),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 503, description = "Nenhum serviço disponível para a consulta")
    ),
    security(("api_jwt" = []))
)]
pub async fn calcular_frete(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
    Json(params): Json<ParametrosFrete>,
) -> Result<Json<RespostaApi>, AppError> {
    params.validate()?;

    let cotacoes = app_state.correios_service.calcular_frete(&params).await?;

    Ok(Json(RespostaApi::sucesso_com_dados("Cotação realizada com sucesso.", cotacoes)))
}

// Botão "Atualizar Rastreio" da tela de detalhes (AJAX).
#[utoipa::path(
    post,
    path = "/api/processos/{id}/rastreio/atualizar",
    tag = "Correios",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "Consulta realizada, com ou sem novidades", body = RespostaApi),
        (status = 400, description = "Processo sem código de rastreio"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_rastreio_processo(
    State(app_state): State<AppState>,
    AuthenticatedUser(_usuario): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RespostaApi>, AppError> {
    let houve_novidade = app_state.rastreio_service.atualizar_por_id(id).await?;

    if houve_novidade {
        Ok(Json(RespostaApi::sucesso(
            "Rastreamento atualizado! Novas movimentações encontradas.",
        )))
    } else {
        Ok(Json(RespostaApi::info("Consulta realizada. Nenhuma novidade nos Correios.")))
    }
}

// Varredura em massa, pensada para um cron externo autenticado como Gestor.
#[utoipa::path(
    post,
    path = "/api/correios/rastreios/atualizar-todos",
    tag = "Correios",
    responses(
        (status = 200, description = "Contadores da varredura", body = RespostaApi),
        (status = 403, description = "Apenas o gestor dispara a varredura")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_todos_rastreios(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
) -> Result<Json<RespostaApi>, AppError> {
    if usuario.funcao != Funcao::Gestor {
        return Err(AppError::PermissionDenied(
            "Apenas gestores podem disparar a atualização massiva de rastreios.".to_string(),
        ));
    }

    let resumo = app_state.rastreio_service.atualizar_todos().await?;

    let mensagem = format!(
        "Varredura concluída. Processados: {}. Atualizados: {}.",
        resumo.processados, resumo.atualizados
    );

    Ok(Json(RespostaApi::sucesso_com_dados(mensagem, resumo)))
}
