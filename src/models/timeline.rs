// src/models/timeline.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Registro append-only do histórico de um processo. Uma vez gravado, um
// evento nunca é alterado ou removido: a timeline é a única fonte da
// história do processo. Só o motor de fluxo e o reconciliador de rastreio
// escrevem aqui — nunca entrada direta de usuário.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventoTimeline {
    pub id: Uuid,
    pub processo_id: Uuid,
    #[schema(example = "Status Alterado")]
    pub titulo: String,
    #[schema(example = "Mudou de Pendente para Em Separação")]
    pub descricao: Option<String>,
    pub data: DateTime<Utc>,
    // None = evento gerado pelo sistema
    pub autor_id: Option<Uuid>,
    // Classe do Bootstrap Icons usada no template (ex: 'bi-truck')
    #[schema(example = "bi-truck")]
    pub icone: String,
}
