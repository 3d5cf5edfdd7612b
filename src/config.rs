// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClienteRepository, DashboardRepository, ProcessoRepository, TimelineRepository,
        UserRepository,
    },
    services::{
        correios_service::CacheTokenCorreios, AuthService, CorreiosService, DashboardService,
        ProcessoService, RastreioService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub cliente_repo: ClienteRepository,
    pub processo_service: ProcessoService,
    pub correios_service: CorreiosService,
    pub rastreio_service: RastreioService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let correios_usuario =
            env::var("CORREIOS_USUARIO").expect("CORREIOS_USUARIO deve ser definido");
        let correios_codigo_acesso =
            env::var("CORREIOS_CODIGO_ACESSO").expect("CORREIOS_CODIGO_ACESSO deve ser definido");
        let correios_contrato =
            env::var("CORREIOS_CONTRATO").expect("CORREIOS_CONTRATO deve ser definido");
        let correios_url_base = env::var("CORREIOS_URL_BASE")
            .unwrap_or_else(|_| "https://api.correios.com.br".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let processo_repo = ProcessoRepository::new(db_pool.clone());
        let timeline_repo = TimelineRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);

        let correios_service = CorreiosService::with_base_url(
            correios_usuario,
            correios_codigo_acesso,
            correios_contrato,
            CacheTokenCorreios::novo(),
            correios_url_base,
        );

        let processo_service = ProcessoService::new(
            db_pool.clone(),
            processo_repo.clone(),
            timeline_repo.clone(),
            cliente_repo.clone(),
        );

        let rastreio_service = RastreioService::new(
            db_pool.clone(),
            processo_repo,
            timeline_repo,
            correios_service.clone(),
        );

        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            cliente_repo,
            processo_service,
            correios_service,
            rastreio_service,
            dashboard_service,
        })
    }
}
