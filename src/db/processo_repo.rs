// src/db/processo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::processo::{
        Anexo, Comentario, FiltroProcessos, Prioridade, Processo, ProcessoResumo, StatusProcesso,
        TipoAmostra, TipoTransporte,
    },
    models::auth::Funcao,
};

#[derive(Clone)]
pub struct ProcessoRepository {
    pool: PgPool,
}

impl ProcessoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CRIAÇÃO (duas fases: INSERT devolve a sequência, depois grava o código)
    // =========================================================================

    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        titulo: &str,
        descricao: &str,
        codigo_pedido_iniflex: Option<&str>,
        tipo_transporte: TipoTransporte,
        prioridade: Prioridade,
        cliente_id: Uuid,
        criado_por: Uuid,
    ) -> Result<Processo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let processo = sqlx::query_as::<_, Processo>(
            r#"
            INSERT INTO processos (
                titulo, descricao, codigo_pedido_iniflex,
                tipo_transporte, prioridade, cliente_id, criado_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(descricao)
        .bind(codigo_pedido_iniflex)
        .bind(tipo_transporte)
        .bind(prioridade)
        .bind(cliente_id)
        .bind(criado_por)
        .fetch_one(executor)
        .await?;

        Ok(processo)
    }

    pub async fn gravar_codigo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        codigo: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE processos SET codigo = $1 WHERE id = $2")
            .bind(codigo)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn vincular_tipo_amostra<'e, E>(
        &self,
        executor: E,
        processo_id: Uuid,
        tipo_amostra_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO processo_tipos_amostra (processo_id, tipo_amostra_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(processo_id)
        .bind(tipo_amostra_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Processo>, AppError> {
        let processo = sqlx::query_as::<_, Processo>("SELECT * FROM processos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(processo)
    }

    // A visibilidade é decidida no banco, num único WHERE:
    // vendedor vê o que criou; separador vê o que assumiu mais a fila aberta
    // (responsável vazio); gestor vê tudo.
    pub async fn listar_visiveis(
        &self,
        funcao: Funcao,
        usuario_id: Uuid,
        filtro: &FiltroProcessos,
    ) -> Result<Vec<ProcessoResumo>, AppError> {
        let processos = sqlx::query_as::<_, ProcessoResumo>(
            r#"
            SELECT
                p.id, p.codigo, p.titulo, p.status, p.prioridade, p.tipo_transporte,
                p.codigo_rastreio, c.nome AS cliente_nome,
                u.nome_completo AS responsavel_nome,
                p.data_criacao, p.ultima_atualizacao
            FROM processos p
            JOIN clientes c ON c.id = p.cliente_id
            LEFT JOIN usuarios u ON u.id = p.responsavel_separacao
            WHERE
                CASE $1::funcao_usuario
                    WHEN 'vendedor' THEN p.criado_por = $2
                    WHEN 'separador' THEN (p.responsavel_separacao = $2
                                           OR p.responsavel_separacao IS NULL)
                    ELSE TRUE
                END
                AND ($3::status_processo IS NULL OR p.status = $3)
                AND ($4::prioridade_processo IS NULL OR p.prioridade = $4)
                AND ($5::text IS NULL
                     OR p.codigo ILIKE '%' || $5 || '%'
                     OR p.titulo ILIKE '%' || $5 || '%'
                     OR p.codigo_rastreio ILIKE '%' || $5 || '%'
                     OR c.nome ILIKE '%' || $5 || '%')
            ORDER BY p.data_criacao DESC
            "#,
        )
        .bind(funcao)
        .bind(usuario_id)
        .bind(filtro.status)
        .bind(filtro.prioridade)
        .bind(filtro.q.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(processos)
    }

    // Processos elegíveis para a atualização massiva de rastreio:
    // transporte Correios, não finalizados, com código de rastreio preenchido.
    pub async fn listar_elegiveis_rastreio(&self) -> Result<Vec<Processo>, AppError> {
        let processos = sqlx::query_as::<_, Processo>(
            r#"
            SELECT * FROM processos
            WHERE tipo_transporte = 'correios'
              AND status NOT IN ('entregue', 'cancelado', 'nao_entregue')
              AND codigo_rastreio IS NOT NULL
              AND codigo_rastreio <> ''
            ORDER BY data_criacao ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(processos)
    }

    pub async fn listar_tipos_amostra(&self) -> Result<Vec<TipoAmostra>, AppError> {
        let tipos = sqlx::query_as::<_, TipoAmostra>(
            "SELECT * FROM tipos_amostra ORDER BY ordem ASC, nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tipos)
    }

    pub async fn tipos_amostra_do_processo(
        &self,
        processo_id: Uuid,
    ) -> Result<Vec<TipoAmostra>, AppError> {
        let tipos = sqlx::query_as::<_, TipoAmostra>(
            r#"
            SELECT t.* FROM tipos_amostra t
            JOIN processo_tipos_amostra pt ON pt.tipo_amostra_id = t.id
            WHERE pt.processo_id = $1
            ORDER BY t.ordem ASC, t.nome ASC
            "#,
        )
        .bind(processo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tipos)
    }

    // =========================================================================
    //  MUTAÇÕES DE FLUXO (sempre renovam ultima_atualizacao)
    // =========================================================================

    pub async fn atualizar_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: StatusProcesso,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE processos SET status = $1, ultima_atualizacao = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn atualizar_responsavel<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        responsavel: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE processos SET responsavel_separacao = $1, ultima_atualizacao = NOW() WHERE id = $2",
        )
        .bind(responsavel)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn atualizar_codigo_rastreio<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        codigo_rastreio: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE processos SET codigo_rastreio = $1, ultima_atualizacao = NOW() WHERE id = $2",
        )
        .bind(codigo_rastreio)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Para mutações que não tocam a linha do processo (comentário, anexo),
    // mas que ainda assim contam como atividade.
    pub async fn tocar<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE processos SET ultima_atualizacao = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  ANEXOS E COMENTÁRIOS
    // =========================================================================

    pub async fn inserir_anexo<'e, E>(
        &self,
        executor: E,
        processo_id: Uuid,
        arquivo: &str,
    ) -> Result<Anexo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let anexo = sqlx::query_as::<_, Anexo>(
            r#"
            INSERT INTO anexos (processo_id, arquivo)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(processo_id)
        .bind(arquivo)
        .fetch_one(executor)
        .await?;

        Ok(anexo)
    }

    pub async fn listar_anexos(&self, processo_id: Uuid) -> Result<Vec<Anexo>, AppError> {
        let anexos = sqlx::query_as::<_, Anexo>(
            "SELECT * FROM anexos WHERE processo_id = $1 ORDER BY data_upload ASC",
        )
        .bind(processo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(anexos)
    }

    pub async fn inserir_comentario<'e, E>(
        &self,
        executor: E,
        processo_id: Uuid,
        autor_id: Uuid,
        texto: &str,
        encaminhar_gestao: bool,
    ) -> Result<Comentario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comentario = sqlx::query_as::<_, Comentario>(
            r#"
            INSERT INTO comentarios (processo_id, autor_id, texto, encaminhar_gestao)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(processo_id)
        .bind(autor_id)
        .bind(texto)
        .bind(encaminhar_gestao)
        .fetch_one(executor)
        .await?;

        Ok(comentario)
    }

    pub async fn listar_comentarios(&self, processo_id: Uuid) -> Result<Vec<Comentario>, AppError> {
        let comentarios = sqlx::query_as::<_, Comentario>(
            "SELECT * FROM comentarios WHERE processo_id = $1 ORDER BY data ASC",
        )
        .bind(processo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comentarios)
    }
}
