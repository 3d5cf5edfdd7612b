// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::Funcao,
    models::dashboard::{ContagemStatus, ResumoDashboard},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

// Mesmo recorte de visibilidade da listagem de processos:
// vendedor conta só o que criou, separador conta o que assumiu mais a fila
// aberta, gestor conta tudo.
const FILTRO_VISIBILIDADE: &str = r#"
    CASE $1::funcao_usuario
        WHEN 'vendedor' THEN criado_por = $2
        WHEN 'separador' THEN (responsavel_separacao = $2 OR responsavel_separacao IS NULL)
        ELSE TRUE
    END
"#;

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resumo(
        &self,
        funcao: Funcao,
        usuario_id: Uuid,
    ) -> Result<ResumoDashboard, AppError> {
        // Transação só para ler um retrato consistente dos contadores
        let mut tx = self.pool.begin().await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM processos WHERE {FILTRO_VISIBILIDADE}"
        ))
        .bind(funcao)
        .bind(usuario_id)
        .fetch_one(&mut *tx)
        .await?;

        let nao_atribuidos = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM processos WHERE status = 'nao_atribuido' AND {FILTRO_VISIBILIDADE}"
        ))
        .bind(funcao)
        .bind(usuario_id)
        .fetch_one(&mut *tx)
        .await?;

        let pendentes = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM processos WHERE status = 'pendente' AND {FILTRO_VISIBILIDADE}"
        ))
        .bind(funcao)
        .bind(usuario_id)
        .fetch_one(&mut *tx)
        .await?;

        // Em atraso: parado há mais de 48h e ainda não finalizado
        let em_atraso = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*) FROM processos
            WHERE ultima_atualizacao < NOW() - INTERVAL '48 hours'
              AND status NOT IN ('entregue', 'nao_entregue', 'cancelado')
              AND {FILTRO_VISIBILIDADE}
            "#
        ))
        .bind(funcao)
        .bind(usuario_id)
        .fetch_one(&mut *tx)
        .await?;

        let por_status = sqlx::query_as::<_, ContagemStatus>(&format!(
            r#"
            SELECT status, COUNT(*) AS quantidade FROM processos
            WHERE {FILTRO_VISIBILIDADE}
            GROUP BY status
            ORDER BY quantidade DESC
            "#
        ))
        .bind(funcao)
        .bind(usuario_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ResumoDashboard { total, nao_atribuidos, pendentes, em_atraso, por_status })
    }
}
