// src/db/cliente_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cliente::{Cliente, CriarClientePayload},
};

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &CriarClientePayload) -> Result<Cliente, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (
                nome, responsavel, logradouro, numero, complemento,
                bairro, cidade, estado, cep
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.responsavel)
        .bind(&payload.logradouro)
        .bind(&payload.numero)
        .bind(&payload.complemento)
        .bind(&payload.bairro)
        .bind(&payload.cidade)
        .bind(payload.estado.to_uppercase())
        .bind(&payload.cep)
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    pub async fn listar(&self) -> Result<Vec<Cliente>, AppError> {
        let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clientes)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }
}
