use serde::Serialize;
use utoipa::ToSchema;

// Envelope padrão das respostas de mutação da API:
// { "status": "success" | "info" | "error", "message": ..., "data": ... }
#[derive(Debug, Serialize, ToSchema)]
pub struct RespostaApi {
    #[schema(example = "success")]
    pub status: &'static str,

    #[schema(example = "Processo atualizado com sucesso.")]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RespostaApi {
    pub fn sucesso(message: impl Into<String>) -> Self {
        Self { status: "success", message: message.into(), data: None }
    }

    pub fn sucesso_com_dados(message: impl Into<String>, data: impl Serialize) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: serde_json::to_value(data).ok(),
        }
    }

    // "info" sinaliza uma consulta bem sucedida que não mudou nada
    // (ex.: rastreio consultado sem novidades nos Correios).
    pub fn info(message: impl Into<String>) -> Self {
        Self { status: "info", message: message.into(), data: None }
    }
}
