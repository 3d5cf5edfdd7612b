// src/models/correios.rs
//
// DTOs da API CWS dos Correios (https://cws.correios.com.br/).
// O payload da API é dinâmico (campos opcionais, erro embutido como dado),
// então tudo aqui é decodificado explicitamente via serde em vez de
// sondagem de chaves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// --- Autenticação ---

#[derive(Debug, Deserialize)]
pub struct RespostaToken {
    pub token: Option<String>,
    #[serde(rename = "expiraEm")]
    pub expira_em: Option<String>,
}

// --- CEP ---

// Resposta crua do endpoint /cep/v1/enderecos/{cep}
#[derive(Debug, Deserialize)]
pub struct RespostaCepCorreios {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    // Correios usa 'localidade' para o que chamamos de cidade
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
}

// Mapeamento para o padrão interno do sistema (localidade -> cidade, uf -> estado)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoNormalizado {
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub complemento: String,
}

impl From<RespostaCepCorreios> for EnderecoNormalizado {
    fn from(resposta: RespostaCepCorreios) -> Self {
        Self {
            logradouro: resposta.logradouro.unwrap_or_default(),
            bairro: resposta.bairro.unwrap_or_default(),
            cidade: resposta.localidade.unwrap_or_default(),
            estado: resposta.uf.unwrap_or_default(),
            cep: resposta.cep.unwrap_or_default(),
            complemento: resposta.complemento.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsultaCepParams {
    pub cep: String,
}

// --- Rastreamento (SRO) ---

#[derive(Debug, Deserialize)]
pub struct RespostaRastro {
    #[serde(default)]
    pub objetos: Vec<ObjetoRastro>,
}

// A API devolve ou os dados do objeto ou uma 'mensagem' de erro embutida
// no mesmo lugar; 'mensagem' presente significa "sem dados".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjetoRastro {
    #[serde(default)]
    pub cod_objeto: Option<String>,
    #[serde(default)]
    pub eventos: Option<Vec<EventoRastro>>,
    #[serde(default)]
    pub mensagem: Option<String>,
}

// Os eventos chegam do mais recente para o mais antigo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoRastro {
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub dt_hr_criado: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub detalhe: Option<String>,
    #[serde(default)]
    pub unidade: Option<UnidadeRastro>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnidadeRastro {
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub endereco: Option<EnderecoUnidade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnderecoUnidade {
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
}

// --- Preço e Prazo ---

// Parâmetros de uma cotação de frete pedida pelo frontend
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParametrosFrete {
    #[validate(length(min = 8, message = "CEP de origem inválido."))]
    pub cep_origem: String,
    #[validate(length(min = 8, message = "CEP de destino inválido."))]
    pub cep_destino: String,
    // Dimensões em centímetros
    #[validate(range(min = 1, message = "Comprimento inválido."))]
    pub comprimento: i32,
    #[validate(range(min = 1, message = "Largura inválida."))]
    pub largura: i32,
    #[validate(range(min = 1, message = "Altura inválida."))]
    pub altura: i32,
    // Peso em gramas
    #[validate(range(min = 1, message = "Peso inválido."))]
    pub peso_gramas: i32,
    pub valor_declarado: Option<Decimal>,
}

// Corpo dos POSTs em lote: {idLote, parametrosProduto} / {idLote, parametrosPrazo}
#[derive(Debug, Serialize)]
pub struct LotePreco {
    #[serde(rename = "idLote")]
    pub id_lote: String,
    #[serde(rename = "parametrosProduto")]
    pub parametros_produto: Vec<ParametroProduto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametroProduto {
    pub co_produto: String,
    pub nu_requisicao: String,
    pub cep_origem: String,
    pub cep_destino: String,
    // A API espera os campos numéricos como strings
    pub ps_objeto: String,
    pub tp_objeto: String,
    pub comprimento: String,
    pub largura: String,
    pub altura: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vl_declarado: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LotePrazo {
    #[serde(rename = "idLote")]
    pub id_lote: String,
    #[serde(rename = "parametrosPrazo")]
    pub parametros_prazo: Vec<ParametroPrazo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametroPrazo {
    pub co_produto: String,
    pub nu_requisicao: String,
    pub cep_origem: String,
    pub cep_destino: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecoResposta {
    #[serde(default)]
    pub co_produto: Option<String>,
    // Preço final com vírgula decimal (ex: "28,70")
    #[serde(default)]
    pub pc_final: Option<String>,
    #[serde(default)]
    pub tx_erro: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrazoResposta {
    #[serde(default)]
    pub co_produto: Option<String>,
    #[serde(default)]
    pub prazo_entrega: Option<i32>,
    #[serde(default)]
    pub data_maxima: Option<String>,
    #[serde(default)]
    pub tx_erro: Option<String>,
}

// Contadores da varredura em massa de rastreios
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoRastreioLote {
    pub processados: i64,
    pub atualizados: i64,
    pub falhas: i64,
}

// Resultado unificado por código de serviço, ordenado por preço
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CotacaoFrete {
    #[schema(example = "03220")]
    pub co_produto: String,
    #[schema(example = "SEDEX")]
    pub servico: String,
    #[schema(example = "28.70")]
    pub preco: Decimal,
    #[schema(example = 3)]
    pub prazo_dias: Option<i32>,
    pub data_maxima: Option<String>,
}
