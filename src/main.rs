// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Cadastro exige um Gestor autenticado
    let registro_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let cliente_routes = Router::new()
        .route("/", post(handlers::clientes::criar).get(handlers::clientes::listar))
        .route("/{id}", get(handlers::clientes::buscar))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let processo_routes = Router::new()
        .route("/", post(handlers::processos::criar).get(handlers::processos::listar))
        .route("/{id}", get(handlers::processos::detalhar))
        .route("/{id}/atribuir", post(handlers::processos::atribuir))
        .route("/{id}/status", post(handlers::processos::alterar_status))
        .route("/{id}/rastreio", post(handlers::processos::atualizar_rastreio))
        .route("/{id}/rastreio/atualizar", post(handlers::correios::atualizar_rastreio_processo))
        .route("/{id}/comentarios", post(handlers::processos::adicionar_comentario))
        .route("/{id}/anexos", post(handlers::processos::anexar_arquivo))
        .route("/{id}/cancelar", post(handlers::processos::alternar_cancelamento))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let correios_routes = Router::new()
        .route("/cep", get(handlers::correios::consultar_cep))
        .route("/frete", post(handlers::correios::calcular_frete))
        .route("/rastreios/atualizar-todos", post(handlers::correios::atualizar_todos_rastreios))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::resumo))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let tipos_amostra_routes = Router::new()
        .route("/", get(handlers::processos::listar_tipos_amostra))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", registro_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clientes", cliente_routes)
        .nest("/api/tipos-amostra", tipos_amostra_routes)
        .nest("/api/processos", processo_routes)
        .nest("/api/correios", correios_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
