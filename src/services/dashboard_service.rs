// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{auth::Usuario, dashboard::ResumoDashboard},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    // Os contadores já saem recortados pela visibilidade do usuário.
    pub async fn resumo(&self, usuario: &Usuario) -> Result<ResumoDashboard, AppError> {
        self.repo.resumo(usuario.funcao, usuario.id).await
    }
}
