pub mod auth;
pub use auth::AuthService;
pub mod correios_service;
pub use correios_service::CorreiosService;
pub mod rastreio_service;
pub use rastreio_service::RastreioService;
pub mod processo_service;
pub use processo_service::ProcessoService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
