pub mod user_repo;
pub use user_repo::UserRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod processo_repo;
pub use processo_repo::ProcessoRepository;
pub mod timeline_repo;
pub use timeline_repo::TimelineRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
