pub mod auth;
pub mod clientes;
pub mod correios;
pub mod dashboard;
pub mod processos;
