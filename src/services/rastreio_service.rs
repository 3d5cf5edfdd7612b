// src/services/rastreio_service.rs
//
// Sincronização de mão única: eventos de rastreio dos Correios entram na
// timeline do processo, com deduplicação e derivação automática de status.
// A reconciliação é planejada por uma função pura (testável sem banco) e
// persistida em seguida.

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProcessoRepository, TimelineRepository},
    models::correios::{EventoRastro, ResumoRastreioLote},
    models::processo::{Processo, StatusProcesso},
    services::CorreiosService,
};

// Título fixo dos eventos espelhados dos Correios; junto com a descrição
// composta, forma a chave de deduplicação.
pub const TITULO_RASTREIO: &str = "Rastreio Correios";

const TITULO_STATUS_AUTO: &str = "Status Atualizado";
const DESCRICAO_STATUS_AUTO: &str =
    "Processo finalizado automaticamente via confirmação dos Correios.";

#[derive(Clone)]
pub struct RastreioService {
    pool: PgPool,
    processo_repo: ProcessoRepository,
    timeline_repo: TimelineRepository,
    correios: CorreiosService,
}

// Um evento da API que ainda não existe na timeline, já com ícone e com a
// eventual mudança de status que ele dispara.
#[derive(Debug, PartialEq)]
pub(crate) struct EventoPlanejado {
    pub descricao: String,
    pub icone: &'static str,
    pub novo_status: Option<StatusProcesso>,
    // true somente na confirmação de entrega, que ganha um evento sintético extra
    pub finalizacao_automatica: bool,
}

impl RastreioService {
    pub fn new(
        pool: PgPool,
        processo_repo: ProcessoRepository,
        timeline_repo: TimelineRepository,
        correios: CorreiosService,
    ) -> Self {
        Self { pool, processo_repo, timeline_repo, correios }
    }

    // Entrada do botão "Atualizar Rastreio" da tela de detalhes.
    pub async fn atualizar_por_id(&self, processo_id: Uuid) -> Result<bool, AppError> {
        let processo = self
            .processo_repo
            .buscar_por_id(processo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Processo".to_string()))?;

        if processo.codigo_rastreio.as_deref().unwrap_or("").is_empty() {
            return Err(AppError::ValidationMessage(
                "Este processo não possui código de rastreio configurado.".to_string(),
            ));
        }

        self.atualizar_processo(&processo).await
    }

    // Reconcilia um único processo. Devolve true se algo mudou (evento novo
    // ou status derivado). Seguro para re-execução: a segunda passada com a
    // mesma resposta dos Correios não insere nada.
    pub async fn atualizar_processo(&self, processo: &Processo) -> Result<bool, AppError> {
        let Some(codigo_rastreio) = processo.codigo_rastreio.as_deref() else {
            return Ok(false);
        };
        if codigo_rastreio.is_empty() {
            return Ok(false);
        }

        let Some(objeto) = self.correios.rastrear_objeto(codigo_rastreio).await? else {
            return Ok(false);
        };

        let Some(eventos) = objeto.eventos else {
            return Ok(false);
        };
        if eventos.is_empty() {
            return Ok(false);
        }

        let ja_registradas = self
            .timeline_repo
            .descricoes_registradas(processo.id, TITULO_RASTREIO)
            .await?;

        let plano = planejar_reconciliacao(&eventos, &ja_registradas, processo.status);

        if plano.is_empty() {
            return Ok(false);
        }

        self.persistir_plano(processo.id, &plano).await?;

        Ok(true)
    }

    async fn persistir_plano(
        &self,
        processo_id: Uuid,
        plano: &[EventoPlanejado],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for evento in plano {
            self.timeline_repo
                .registrar(
                    &mut *tx,
                    processo_id,
                    TITULO_RASTREIO,
                    Some(&evento.descricao),
                    None,
                    evento.icone,
                )
                .await?;

            if let Some(novo_status) = evento.novo_status {
                self.processo_repo.atualizar_status(&mut *tx, processo_id, novo_status).await?;

                if evento.finalizacao_automatica {
                    self.timeline_repo
                        .registrar(
                            &mut *tx,
                            processo_id,
                            TITULO_STATUS_AUTO,
                            Some(DESCRICAO_STATUS_AUTO),
                            None,
                            "bi-check-circle-fill",
                        )
                        .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    // Varredura em massa, acionada por um agendador externo. Um erro num
    // processo é logado e não interrompe os demais.
    pub async fn atualizar_todos(&self) -> Result<ResumoRastreioLote, AppError> {
        let elegiveis = self.processo_repo.listar_elegiveis_rastreio().await?;

        let mut resumo = ResumoRastreioLote {
            processados: elegiveis.len() as i64,
            atualizados: 0,
            falhas: 0,
        };

        for processo in &elegiveis {
            let codigo = processo.codigo.as_deref().unwrap_or("?");
            tracing::info!(
                "Verificando {} ({})...",
                codigo,
                processo.codigo_rastreio.as_deref().unwrap_or("-")
            );

            match self.atualizar_processo(processo).await {
                Ok(true) => {
                    resumo.atualizados += 1;
                    tracing::info!("-> {} ATUALIZADO!", codigo);
                }
                Ok(false) => {}
                Err(erro) => {
                    resumo.falhas += 1;
                    tracing::error!("-> Erro em {}: {}", codigo, erro);
                }
            }
        }

        tracing::info!(
            "FIM. Processados: {}. Atualizados: {}.",
            resumo.processados,
            resumo.atualizados
        );

        Ok(resumo)
    }
}

// =========================================================================
//  PLANEJAMENTO (puro)
// =========================================================================

// Os eventos chegam do mais recente para o mais antigo; o plano é montado
// na ordem inversa para que a timeline fique cronológica.
pub(crate) fn planejar_reconciliacao(
    eventos: &[EventoRastro],
    ja_registradas: &HashSet<String>,
    status_atual: StatusProcesso,
) -> Vec<EventoPlanejado> {
    let mut plano = Vec::new();
    let mut status = status_atual;

    for evento in eventos.iter().rev() {
        let descricao = descricao_composta(evento);

        if ja_registradas.contains(&descricao) {
            continue;
        }

        let codigo = evento.codigo.as_deref();
        let tipo = evento.tipo.as_deref();
        let texto = evento.descricao.as_deref().unwrap_or("");

        // A derivação de status só acontece em eventos recém-inseridos
        let novo_status = status_derivado(codigo, tipo, texto, status);
        if let Some(s) = novo_status {
            status = s;
        }

        plano.push(EventoPlanejado {
            icone: icone_do_evento(codigo, texto),
            finalizacao_automatica: novo_status == Some(StatusProcesso::Entregue),
            descricao,
            novo_status,
        });
    }

    plano
}

// Descrição composta: descrição base + detalhe + "(cidade/uf)" da unidade,
// quando presentes.
pub(crate) fn descricao_composta(evento: &EventoRastro) -> String {
    let mut texto = evento.descricao.clone().unwrap_or_default();

    if let Some(detalhe) = evento.detalhe.as_deref() {
        if !detalhe.is_empty() {
            texto.push_str(" - ");
            texto.push_str(detalhe);
        }
    }

    if let Some(endereco) = evento.unidade.as_ref().and_then(|u| u.endereco.as_ref()) {
        texto.push_str(&format!(
            " ({}/{})",
            endereco.cidade.as_deref().unwrap_or(""),
            endereco.uf.as_deref().unwrap_or("")
        ));
    }

    texto
}

// BDE = Baixa de Distribuição (Entrega); OEC = Objeto Saiu para Entrega;
// PO = Postagem. O resto viaja de caminhão.
pub(crate) fn icone_do_evento(codigo: Option<&str>, descricao: &str) -> &'static str {
    if codigo == Some("BDE") || descricao.to_lowercase().contains("entregue") {
        "bi-box-seam-fill"
    } else if codigo == Some("OEC") {
        "bi-bicycle"
    } else if codigo == Some("PO") {
        "bi-box"
    } else {
        "bi-truck"
    }
}

// BDE tipo 01 é a entrega confirmada ao destinatário. A devolução não tem
// código estável na API, então fica a heurística de substring na descrição.
pub(crate) fn status_derivado(
    codigo: Option<&str>,
    tipo: Option<&str>,
    descricao: &str,
    status_atual: StatusProcesso,
) -> Option<StatusProcesso> {
    if codigo == Some("BDE") && tipo == Some("01") {
        if status_atual != StatusProcesso::Entregue {
            return Some(StatusProcesso::Entregue);
        }
    } else if descricao.to_lowercase().contains("não entregue")
        && status_atual != StatusProcesso::NaoEntregue
    {
        return Some(StatusProcesso::NaoEntregue);
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::models::correios::{EnderecoUnidade, UnidadeRastro};

    use super::*;

    fn evento(codigo: &str, tipo: &str, descricao: &str) -> EventoRastro {
        EventoRastro {
            codigo: Some(codigo.to_string()),
            tipo: Some(tipo.to_string()),
            dt_hr_criado: None,
            descricao: Some(descricao.to_string()),
            detalhe: None,
            unidade: None,
        }
    }

    #[test]
    fn descricao_composta_inclui_detalhe_e_unidade() {
        let mut e = evento("RO", "01", "Objeto em transferência");
        e.detalhe = Some("de Unidade de Tratamento para Unidade de Distribuição".to_string());
        e.unidade = Some(UnidadeRastro {
            tipo: Some("Unidade de Tratamento".to_string()),
            endereco: Some(EnderecoUnidade {
                cidade: Some("Cajamar".to_string()),
                uf: Some("SP".to_string()),
            }),
        });

        assert_eq!(
            descricao_composta(&e),
            "Objeto em transferência - de Unidade de Tratamento para Unidade de Distribuição (Cajamar/SP)"
        );
    }

    #[test]
    fn descricao_composta_sem_extras_e_so_a_base() {
        let e = evento("PO", "01", "Objeto postado");
        assert_eq!(descricao_composta(&e), "Objeto postado");
    }

    #[test]
    fn plano_inverte_para_ordem_cronologica() {
        // API entrega [E3, E2, E1] (mais recente primeiro)
        let eventos = vec![
            evento("OEC", "01", "Saiu para entrega"),
            evento("RO", "01", "Em transferência"),
            evento("PO", "01", "Objeto postado"),
        ];

        let plano = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::EmRota);

        let descricoes: Vec<&str> = plano.iter().map(|p| p.descricao.as_str()).collect();
        assert_eq!(descricoes, vec!["Objeto postado", "Em transferência", "Saiu para entrega"]);
    }

    #[test]
    fn plano_e_idempotente() {
        let eventos = vec![evento("RO", "01", "Em transferência"), evento("PO", "01", "Objeto postado")];

        let primeira = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::EmRota);
        assert_eq!(primeira.len(), 2);

        // Segunda passada com as descrições já gravadas: nada a fazer
        let registradas: HashSet<String> = primeira.into_iter().map(|p| p.descricao).collect();
        let segunda = planejar_reconciliacao(&eventos, &registradas, StatusProcesso::EmRota);
        assert!(segunda.is_empty());
    }

    #[test]
    fn icones_por_codigo_de_evento() {
        assert_eq!(icone_do_evento(Some("BDE"), "Objeto entregue ao destinatário"), "bi-box-seam-fill");
        assert_eq!(icone_do_evento(Some("OEC"), "Saiu para entrega"), "bi-bicycle");
        assert_eq!(icone_do_evento(Some("PO"), "Objeto postado"), "bi-box");
        assert_eq!(icone_do_evento(Some("RO"), "Em transferência"), "bi-truck");
        // Sem código BDE mas com "entregue" no texto também ganha o ícone de caixa
        assert_eq!(icone_do_evento(None, "Objeto entregue"), "bi-box-seam-fill");
    }

    #[test]
    fn entrega_confirmada_deriva_status_e_evento_sintetico() {
        let eventos = vec![evento("BDE", "01", "Objeto entregue ao destinatário")];

        let plano = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::EmRota);

        assert_eq!(plano.len(), 1);
        assert_eq!(plano[0].novo_status, Some(StatusProcesso::Entregue));
        assert!(plano[0].finalizacao_automatica);
    }

    #[test]
    fn entrega_ja_refletida_nao_muda_status_de_novo() {
        let eventos = vec![evento("BDE", "01", "Objeto entregue ao destinatário")];

        let plano = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::Entregue);

        // O evento entra na timeline, mas sem derivação de status
        assert_eq!(plano.len(), 1);
        assert_eq!(plano[0].novo_status, None);
        assert!(!plano[0].finalizacao_automatica);
    }

    #[test]
    fn devolucao_por_texto_deriva_nao_entregue_sem_evento_extra() {
        let eventos = vec![evento("BDI", "01", "Objeto não entregue - carteiro não atendido")];

        let plano = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::EmRota);

        assert_eq!(plano.len(), 1);
        assert_eq!(plano[0].novo_status, Some(StatusProcesso::NaoEntregue));
        assert!(!plano[0].finalizacao_automatica);
    }

    #[test]
    fn derivacao_nao_repete_dentro_da_mesma_passada() {
        // Dois eventos BDE 01 na mesma resposta: só o primeiro (cronológico) muda o status
        let eventos = vec![
            evento("BDE", "01", "Objeto entregue ao destinatário"),
            evento("BDE", "01", "Objeto entregue ao remetente"),
        ];

        let plano = planejar_reconciliacao(&eventos, &HashSet::new(), StatusProcesso::EmRota);

        assert_eq!(plano.len(), 2);
        assert_eq!(plano[0].novo_status, Some(StatusProcesso::Entregue));
        assert_eq!(plano[1].novo_status, None);
    }
}
