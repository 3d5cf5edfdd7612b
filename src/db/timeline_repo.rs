// src/db/timeline_repo.rs

use std::collections::HashSet;

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::timeline::EventoTimeline};

// A timeline é append-only: este repositório só insere e lê.
// Não existe UPDATE nem DELETE de eventos.
#[derive(Clone)]
pub struct TimelineRepository {
    pool: PgPool,
}

impl TimelineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn registrar<'e, E>(
        &self,
        executor: E,
        processo_id: Uuid,
        titulo: &str,
        descricao: Option<&str>,
        autor_id: Option<Uuid>,
        icone: &str,
    ) -> Result<EventoTimeline, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let evento = sqlx::query_as::<_, EventoTimeline>(
            r#"
            INSERT INTO eventos_timeline (processo_id, titulo, descricao, autor_id, icone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(processo_id)
        .bind(titulo)
        .bind(descricao)
        .bind(autor_id)
        .bind(icone)
        .fetch_one(executor)
        .await?;

        Ok(evento)
    }

    pub async fn listar(&self, processo_id: Uuid) -> Result<Vec<EventoTimeline>, AppError> {
        let eventos = sqlx::query_as::<_, EventoTimeline>(
            "SELECT * FROM eventos_timeline WHERE processo_id = $1 ORDER BY data ASC",
        )
        .bind(processo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(eventos)
    }

    // Chave de deduplicação do reconciliador: (processo, titulo fixo, descricao).
    // Carregamos as descrições de uma vez só por reconciliação, em vez de
    // um EXISTS por evento da API.
    pub async fn descricoes_registradas(
        &self,
        processo_id: Uuid,
        titulo: &str,
    ) -> Result<HashSet<String>, AppError> {
        let descricoes = sqlx::query_scalar::<_, Option<String>>(
            "SELECT descricao FROM eventos_timeline WHERE processo_id = $1 AND titulo = $2",
        )
        .bind(processo_id)
        .bind(titulo)
        .fetch_all(&self.pool)
        .await?;

        Ok(descricoes.into_iter().flatten().collect())
    }
}
