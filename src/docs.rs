// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clientes::criar,
        handlers::clientes::listar,
        handlers::clientes::buscar,

        // --- Processos ---
        handlers::processos::criar,
        handlers::processos::listar,
        handlers::processos::detalhar,
        handlers::processos::listar_tipos_amostra,
        handlers::processos::atribuir,
        handlers::processos::alterar_status,
        handlers::processos::atualizar_rastreio,
        handlers::processos::adicionar_comentario,
        handlers::processos::anexar_arquivo,
        handlers::processos::alternar_cancelamento,

        // --- Correios ---
        handlers::correios::consultar_cep,
        handlers::correios::calcular_frete,
        handlers::correios::atualizar_rastreio_processo,
        handlers::correios::atualizar_todos_rastreios,

        // --- Dashboard ---
        handlers::dashboard::resumo,
    ),
    components(
        schemas(
            // --- Envelope ---
            common::response::RespostaApi,

            // --- Auth ---
            models::auth::Funcao,
            models::auth::Usuario,
            models::auth::LoginPayload,
            models::auth::CadastrarUsuarioPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::cliente::Cliente,
            models::cliente::CriarClientePayload,

            // --- Processos ---
            models::processo::Prioridade,
            models::processo::TipoTransporte,
            models::processo::StatusProcesso,
            models::processo::Processo,
            models::processo::ProcessoResumo,
            models::processo::ProcessoDetalhe,
            models::processo::TipoAmostra,
            models::processo::Anexo,
            models::processo::Comentario,
            models::processo::CriarProcessoPayload,
            models::processo::AnexoPayload,
            models::processo::AlterarStatusPayload,
            models::processo::AtualizarRastreioPayload,
            models::processo::ComentarioPayload,
            models::timeline::EventoTimeline,

            // --- Correios ---
            models::correios::EnderecoNormalizado,
            models::correios::ParametrosFrete,
            models::correios::CotacaoFrete,
            models::correios::ResumoRastreioLote,

            // --- Dashboard ---
            models::dashboard::ResumoDashboard,
            models::dashboard::ContagemStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e cadastro de usuários"),
        (name = "Users", description = "Dados do usuário autenticado"),
        (name = "Clientes", description = "Clientes destinatários das amostras"),
        (name = "Processos", description = "Fluxo de processos de amostra"),
        (name = "Correios", description = "CEP, rastreamento e cotação de frete"),
        (name = "Dashboard", description = "Indicadores do setor")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
