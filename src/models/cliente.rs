// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Cliente destinatário das amostras. Protegido contra remoção enquanto
// houver processo apontando para ele (FK RESTRICT no banco).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    #[schema(example = "Indústria de Bebidas Aurora Ltda")]
    pub nome: String,
    // A/C (Aos Cuidados de)
    pub responsavel: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    #[schema(example = "SP")]
    pub estado: String,
    #[schema(example = "01310-100")]
    pub cep: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarClientePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O responsável (A/C) é obrigatório."))]
    pub responsavel: String,
    #[validate(length(min = 1, message = "O logradouro é obrigatório."))]
    pub logradouro: String,
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    pub numero: String,
    pub complemento: Option<String>,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    pub bairro: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub cidade: String,
    #[validate(length(equal = 2, message = "A UF deve ter exatamente 2 letras."))]
    pub estado: String,
    #[validate(length(min = 8, message = "O CEP é obrigatório."))]
    pub cep: String,
}
