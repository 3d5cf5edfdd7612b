// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::processo::StatusProcesso;

// KPIs do painel, sempre calculados sobre o recorte de visibilidade do
// usuário (Vendedor vê os seus, Separador vê a fila do setor, Gestor vê tudo).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub total: i64,
    pub nao_atribuidos: i64,
    pub pendentes: i64,
    // Sem atualização há mais de 48h e ainda não finalizados
    pub em_atraso: i64,
    pub por_status: Vec<ContagemStatus>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContagemStatus {
    pub status: StatusProcesso,
    pub quantidade: i64,
}
