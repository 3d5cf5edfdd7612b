// src/models/processo.rs

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::cliente::Cliente;
use crate::models::timeline::EventoTimeline;

// --- Enums do fluxo ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "prioridade_processo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Prioridade {
    Baixa,
    Normal,
    Alta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_transporte", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoTransporte {
    Correios,
    Carga,
    Balcao,
}

/// Os nove estados do fluxo de um processo.
///
/// O caminho normal é:
/// `NaoAtribuido → Atribuido → EmSeparacao → Pendente → ProntoEnvio → EmRota → Entregue`.
/// `Cancelado` é alcançável de qualquer estado não-terminal e é reversível
/// exatamente para `NaoAtribuido` (com o responsável limpo). `Entregue` e
/// `NaoEntregue` encerram o fluxo normal, mas ainda podem ser gravados pelo
/// reconciliador de rastreio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_processo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusProcesso {
    NaoAtribuido,
    Atribuido,
    EmSeparacao,
    Pendente,
    ProntoEnvio,
    EmRota,
    Entregue,
    NaoEntregue,
    Cancelado,
}

impl StatusProcesso {
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusProcesso::NaoAtribuido => "Não Atribuído",
            StatusProcesso::Atribuido => "Atribuído",
            StatusProcesso::EmSeparacao => "Em Separação",
            StatusProcesso::Pendente => "Pendente",
            StatusProcesso::ProntoEnvio => "Pronto para Envio",
            StatusProcesso::EmRota => "Em Rota de Entrega",
            StatusProcesso::Entregue => "Entregue",
            StatusProcesso::NaoEntregue => "Não Entregue",
            StatusProcesso::Cancelado => "Cancelado",
        }
    }

    pub fn eh_terminal(&self) -> bool {
        matches!(
            self,
            StatusProcesso::Entregue | StatusProcesso::NaoEntregue | StatusProcesso::Cancelado
        )
    }
}

impl fmt::Display for StatusProcesso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rotulo())
    }
}

// --- Entidades ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Processo {
    pub id: Uuid,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub seq: i64,
    // Nunca vazio depois do primeiro save (estampado na mesma transação do INSERT)
    #[schema(example = "PRC-2025-0001")]
    pub codigo: Option<String>,
    pub titulo: String,
    pub descricao: String,
    pub codigo_pedido_iniflex: Option<String>,
    pub tipo_transporte: TipoTransporte,
    pub prioridade: Prioridade,
    pub status: StatusProcesso,
    pub codigo_rastreio: Option<String>,
    pub cliente_id: Uuid,
    pub criado_por: Uuid,
    pub responsavel_separacao: Option<Uuid>,
    pub data_criacao: DateTime<Utc>,
    pub ultima_atualizacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipoAmostra {
    pub id: Uuid,
    #[schema(example = "Pré-forma PET")]
    pub nome: String,
    pub ordem: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Anexo {
    pub id: Uuid,
    pub processo_id: Uuid,
    // Caminho/URL no armazenamento externo de arquivos
    pub arquivo: String,
    pub data_upload: DateTime<Utc>,
}

impl Anexo {
    pub fn nome_arquivo(&self) -> &str {
        self.arquivo.rsplit('/').next().unwrap_or(&self.arquivo)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comentario {
    pub id: Uuid,
    pub processo_id: Uuid,
    pub autor_id: Option<Uuid>,
    pub texto: String,
    pub encaminhar_gestao: bool,
    pub data: DateTime<Utc>,
}

// Linha da listagem de processos (JOIN com clientes e usuários)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessoResumo {
    pub id: Uuid,
    pub codigo: Option<String>,
    pub titulo: String,
    pub status: StatusProcesso,
    pub prioridade: Prioridade,
    pub tipo_transporte: TipoTransporte,
    pub codigo_rastreio: Option<String>,
    pub cliente_nome: String,
    pub responsavel_nome: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub ultima_atualizacao: DateTime<Utc>,
}

// Visão completa de um processo (aba de detalhes)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessoDetalhe {
    #[serde(flatten)]
    pub processo: Processo,
    pub cliente: Cliente,
    pub tipos_amostra: Vec<TipoAmostra>,
    pub anexos: Vec<Anexo>,
    pub comentarios: Vec<Comentario>,
    pub timeline: Vec<EventoTimeline>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnexoPayload {
    #[validate(length(min = 1, message = "O caminho do arquivo é obrigatório."))]
    #[schema(example = "anexos_processos/laudo-lote-a123.pdf")]
    pub arquivo: String,
    #[schema(example = 482_113)]
    pub tamanho_bytes: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarProcessoPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[schema(example = "Análise de Pré-forma - Lote A123")]
    pub titulo: String,
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,
    pub codigo_pedido_iniflex: Option<String>,
    pub cliente_id: Uuid,
    #[validate(length(min = 1, message = "Informe ao menos um tipo de amostra."))]
    pub tipos_amostra: Vec<Uuid>,
    pub tipo_transporte: TipoTransporte,
    pub prioridade: Prioridade,
    // Anexo inicial opcional, criado na mesma transação do processo
    pub anexo_inicial: Option<AnexoPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlterarStatusPayload {
    #[schema(example = "em_separacao")]
    pub novo_status: StatusProcesso,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarRastreioPayload {
    #[validate(length(min = 1, message = "O código de rastreio é obrigatório."))]
    #[schema(example = "AA123456789BR")]
    pub codigo_rastreio: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComentarioPayload {
    pub texto: String,
    #[serde(default)]
    pub encaminhar_gestao: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroProcessos {
    // Busca livre por código, título, rastreio ou nome do cliente
    pub q: Option<String>,
    pub status: Option<StatusProcesso>,
    pub prioridade: Option<Prioridade>,
}

// --- Código do processo (PRC-ANO-NNNN) ---

/// Ano do momento de criação no fuso de Brasília (UTC-3), que é o fuso
/// operacional do sistema.
pub fn ano_criacao(momento: DateTime<Utc>) -> i32 {
    let fuso = FixedOffset::west_opt(3 * 3600).expect("offset fixo válido");
    momento.with_timezone(&fuso).year()
}

/// Formata o código único do processo: sequência com zeros à esquerda até 4
/// dígitos (cresce além de 4 quando a sequência passa de 9999).
pub fn formatar_codigo(ano: i32, seq: i64) -> String {
    format!("PRC-{}-{:04}", ano, seq)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formata_codigo_com_zeros_a_esquerda() {
        assert_eq!(formatar_codigo(2025, 1), "PRC-2025-0001");
        assert_eq!(formatar_codigo(2025, 42), "PRC-2025-0042");
        assert_eq!(formatar_codigo(2026, 12345), "PRC-2026-12345");
    }

    #[test]
    fn ano_do_codigo_usa_fuso_de_brasilia() {
        // 01:30 UTC do dia 1º de janeiro ainda é 22:30 do dia 31/12 em Brasília
        let virada = Utc.with_ymd_and_hms(2026, 1, 1, 1, 30, 0).unwrap();
        assert_eq!(ano_criacao(virada), 2025);

        let tarde = Utc.with_ymd_and_hms(2025, 6, 10, 18, 0, 0).unwrap();
        assert_eq!(ano_criacao(tarde), 2025);
    }

    #[test]
    fn estados_terminais() {
        assert!(StatusProcesso::Entregue.eh_terminal());
        assert!(StatusProcesso::NaoEntregue.eh_terminal());
        assert!(StatusProcesso::Cancelado.eh_terminal());
        assert!(!StatusProcesso::NaoAtribuido.eh_terminal());
        assert!(!StatusProcesso::EmRota.eh_terminal());
    }

    #[test]
    fn rotulos_dos_status() {
        assert_eq!(StatusProcesso::NaoAtribuido.rotulo(), "Não Atribuído");
        assert_eq!(StatusProcesso::ProntoEnvio.to_string(), "Pronto para Envio");
    }

    #[test]
    fn nome_do_arquivo_do_anexo() {
        let anexo = Anexo {
            id: Uuid::new_v4(),
            processo_id: Uuid::new_v4(),
            arquivo: "anexos_processos/laudo-lote-a123.pdf".to_string(),
            data_upload: Utc::now(),
        };
        assert_eq!(anexo.nome_arquivo(), "laudo-lote-a123.pdf");
    }
}
