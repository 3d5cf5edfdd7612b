// src/services/processo_service.rs
//
// Motor de fluxo do processo: criação, atribuição, mudança de status,
// cancelamento/reativação, comentários e anexos. Todas as pré-condições
// (papel, estado, conflito de posse) são verificadas antes de qualquer
// escrita; cada operação grava seus eventos de timeline na mesma transação.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, ProcessoRepository, TimelineRepository},
    models::auth::{Funcao, Usuario},
    models::processo::{
        ano_criacao, formatar_codigo, Anexo, AnexoPayload, Comentario, ComentarioPayload,
        CriarProcessoPayload, FiltroProcessos, Processo, ProcessoDetalhe, ProcessoResumo,
        StatusProcesso, TipoAmostra, TipoTransporte,
    },
};

const LIMITE_ANEXO_BYTES: i64 = 10 * 1024 * 1024;
const EXTENSOES_VALIDAS: [&str; 6] = [".pdf", ".jpg", ".jpeg", ".png", ".doc", ".docx"];

#[derive(Clone)]
pub struct ProcessoService {
    pool: PgPool,
    repo: ProcessoRepository,
    timeline_repo: TimelineRepository,
    cliente_repo: ClienteRepository,
}

impl ProcessoService {
    pub fn new(
        pool: PgPool,
        repo: ProcessoRepository,
        timeline_repo: TimelineRepository,
        cliente_repo: ClienteRepository,
    ) -> Self {
        Self { pool, repo, timeline_repo, cliente_repo }
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    pub async fn criar(
        &self,
        usuario: &Usuario,
        payload: &CriarProcessoPayload,
    ) -> Result<Processo, AppError> {
        garantir_pode_criar(usuario.funcao)?;

        if let Some(anexo) = &payload.anexo_inicial {
            validar_anexo(&anexo.arquivo, anexo.tamanho_bytes)?;
        }

        self.cliente_repo
            .buscar_por_id(payload.cliente_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let mut processo = self
            .repo
            .inserir(
                &mut *tx,
                &payload.titulo,
                &payload.descricao,
                payload.codigo_pedido_iniflex.as_deref(),
                payload.tipo_transporte,
                payload.prioridade,
                payload.cliente_id,
                usuario.id,
            )
            .await?;

        // Segunda fase: o código depende da sequência gerada pelo INSERT
        let codigo = formatar_codigo(ano_criacao(processo.data_criacao), processo.seq);
        self.repo.gravar_codigo(&mut *tx, processo.id, &codigo).await?;
        processo.codigo = Some(codigo);

        for tipo_id in &payload.tipos_amostra {
            self.repo.vincular_tipo_amostra(&mut *tx, processo.id, *tipo_id).await?;
        }

        // Anexo inicial entra na mesma transação do processo
        if let Some(anexo) = &payload.anexo_inicial {
            self.repo.inserir_anexo(&mut *tx, processo.id, &anexo.arquivo).await?;
        }

        self.timeline_repo
            .registrar(
                &mut *tx,
                processo.id,
                "Processo Criado",
                Some(&format!("Aberto por {}.", usuario.nome_completo)),
                Some(usuario.id),
                "bi-plus-circle",
            )
            .await?;

        tx.commit().await?;

        Ok(processo)
    }

    // =========================================================================
    //  ATRIBUIÇÃO E STATUS
    // =========================================================================

    // Auto-atribuição explícita do separador.
    pub async fn atribuir(&self, usuario: &Usuario, processo_id: Uuid) -> Result<(), AppError> {
        if usuario.funcao != Funcao::Separador {
            return Err(AppError::PermissionDenied(
                "Apenas separadores podem assumir processos.".to_string(),
            ));
        }

        let processo = self.buscar(processo_id).await?;
        garantir_processo_vivo(&processo)?;

        if processo.responsavel_separacao.is_some() {
            return Err(AppError::Conflict(
                "Este processo já possui um responsável.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        self.repo.atualizar_responsavel(&mut *tx, processo.id, Some(usuario.id)).await?;

        if processo.status == StatusProcesso::NaoAtribuido {
            self.repo.atualizar_status(&mut *tx, processo.id, StatusProcesso::Atribuido).await?;
        }

        self.timeline_repo
            .registrar(
                &mut *tx,
                processo.id,
                "Processo Atribuído",
                Some(&format!("{} assumiu a separação do processo.", usuario.nome_completo)),
                Some(usuario.id),
                "bi-person-check-fill",
            )
            .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn alterar_status(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
        novo_status: StatusProcesso,
    ) -> Result<StatusProcesso, AppError> {
        let processo = self.buscar(processo_id).await?;
        let plano = plano_alteracao_status(&processo, usuario, novo_status)?;

        let mut tx = self.pool.begin().await?;

        // Atribuição implícita: quem mexe num processo sem dono vira o dono,
        // e o evento de posse entra na timeline antes do evento de status.
        if plano.assumir {
            self.repo.atualizar_responsavel(&mut *tx, processo.id, Some(usuario.id)).await?;
            self.timeline_repo
                .registrar(
                    &mut *tx,
                    processo.id,
                    "Processo Assumido",
                    Some(&format!("{} assumiu a separação do processo.", usuario.nome_completo)),
                    Some(usuario.id),
                    "bi-person-check-fill",
                )
                .await?;
        }

        self.repo.atualizar_status(&mut *tx, processo.id, novo_status).await?;

        self.timeline_repo
            .registrar(
                &mut *tx,
                processo.id,
                "Status Alterado",
                Some(&format!("Mudou de {} para {}.", processo.status, novo_status)),
                Some(usuario.id),
                "bi-arrow-repeat",
            )
            .await?;

        tx.commit().await?;

        Ok(novo_status)
    }

    // Devolve false quando o código enviado é igual ao atual (nenhuma
    // escrita, nenhum evento).
    pub async fn atualizar_rastreio(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
        codigo_rastreio: &str,
    ) -> Result<bool, AppError> {
        let processo = self.buscar(processo_id).await?;
        garantir_pode_atualizar_rastreio(&processo, usuario)?;

        let codigo_rastreio = codigo_rastreio.trim();
        if processo.codigo_rastreio.as_deref() == Some(codigo_rastreio) {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        let assumir =
            usuario.funcao == Funcao::Separador && processo.responsavel_separacao.is_none();
        if assumir {
            self.repo.atualizar_responsavel(&mut *tx, processo.id, Some(usuario.id)).await?;
            self.timeline_repo
                .registrar(
                    &mut *tx,
                    processo.id,
                    "Processo Assumido",
                    Some(&format!("{} assumiu a separação do processo.", usuario.nome_completo)),
                    Some(usuario.id),
                    "bi-person-check-fill",
                )
                .await?;
        }

        self.repo.atualizar_codigo_rastreio(&mut *tx, processo.id, codigo_rastreio).await?;

        // O título distingue quem informou o código: expedição ou vendas
        let titulo = match usuario.funcao {
            Funcao::Separador => "Código de Rastreio Atualizado",
            _ => "Código de Rastreio Informado",
        };

        self.timeline_repo
            .registrar(
                &mut *tx,
                processo.id,
                titulo,
                Some(&format!("Rastreamento definido como {}.", codigo_rastreio)),
                Some(usuario.id),
                "bi-upc-scan",
            )
            .await?;

        tx.commit().await?;

        Ok(true)
    }

    // =========================================================================
    //  COMENTÁRIOS, ANEXOS E CANCELAMENTO
    // =========================================================================

    pub async fn adicionar_comentario(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
        payload: &ComentarioPayload,
    ) -> Result<Comentario, AppError> {
        let processo = self.buscar(processo_id).await?;
        garantir_processo_vivo(&processo)?;

        let texto = payload.texto.trim();
        if texto.is_empty() {
            return Err(AppError::ValidationMessage(
                "O comentário não pode ser vazio.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let comentario = self
            .repo
            .inserir_comentario(&mut *tx, processo.id, usuario.id, texto, payload.encaminhar_gestao)
            .await?;

        // Ocorrência encaminhada à gestão ganha título e ícone próprios
        let (titulo, icone) = if payload.encaminhar_gestao {
            ("Ocorrência Registrada", "bi-exclamation-triangle-fill")
        } else {
            ("Comentário Adicionado", "bi-chat-left-text")
        };

        self.timeline_repo
            .registrar(&mut *tx, processo.id, titulo, Some(texto), Some(usuario.id), icone)
            .await?;

        self.repo.tocar(&mut *tx, processo.id).await?;

        tx.commit().await?;

        Ok(comentario)
    }

    pub async fn anexar_arquivo(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
        payload: &AnexoPayload,
    ) -> Result<Anexo, AppError> {
        let processo = self.buscar(processo_id).await?;
        garantir_pode_anexar(&processo, usuario)?;
        garantir_processo_vivo(&processo)?;
        validar_anexo(&payload.arquivo, payload.tamanho_bytes)?;

        let mut tx = self.pool.begin().await?;

        let anexo = self.repo.inserir_anexo(&mut *tx, processo.id, &payload.arquivo).await?;

        self.timeline_repo
            .registrar(
                &mut *tx,
                processo.id,
                "Anexo Adicionado",
                Some(anexo.nome_arquivo()),
                Some(usuario.id),
                "bi-paperclip",
            )
            .await?;

        self.repo.tocar(&mut *tx, processo.id).await?;

        tx.commit().await?;

        Ok(anexo)
    }

    // Cancelado vira reativado e vice-versa. Na reativação o processo volta
    // para a fila (status inicial, responsável limpo); no cancelamento o
    // responsável fica registrado para histórico.
    pub async fn alternar_cancelamento(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
    ) -> Result<StatusProcesso, AppError> {
        let processo = self.buscar(processo_id).await?;
        garantir_pode_cancelar(&processo, usuario)?;
        garantir_cancelavel(&processo)?;

        let mut tx = self.pool.begin().await?;

        let novo_status = if processo.status == StatusProcesso::Cancelado {
            self.repo.atualizar_status(&mut *tx, processo.id, StatusProcesso::NaoAtribuido).await?;
            self.repo.atualizar_responsavel(&mut *tx, processo.id, None).await?;

            self.timeline_repo
                .registrar(
                    &mut *tx,
                    processo.id,
                    "Processo Reativado",
                    Some("Processo reativado e devolvido à fila de separação."),
                    Some(usuario.id),
                    "bi-arrow-counterclockwise",
                )
                .await?;

            StatusProcesso::NaoAtribuido
        } else {
            self.repo.atualizar_status(&mut *tx, processo.id, StatusProcesso::Cancelado).await?;

            self.timeline_repo
                .registrar(
                    &mut *tx,
                    processo.id,
                    "Processo Cancelado",
                    Some(&format!("Cancelado por {}.", usuario.nome_completo)),
                    Some(usuario.id),
                    "bi-x-circle-fill",
                )
                .await?;

            StatusProcesso::Cancelado
        };

        tx.commit().await?;

        Ok(novo_status)
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn listar_visiveis(
        &self,
        usuario: &Usuario,
        filtro: &FiltroProcessos,
    ) -> Result<Vec<ProcessoResumo>, AppError> {
        self.repo.listar_visiveis(usuario.funcao, usuario.id, filtro).await
    }

    pub async fn detalhar(
        &self,
        usuario: &Usuario,
        processo_id: Uuid,
    ) -> Result<ProcessoDetalhe, AppError> {
        let processo = self.buscar(processo_id).await?;
        garantir_visibilidade(&processo, usuario)?;

        let cliente = self
            .cliente_repo
            .buscar_por_id(processo.cliente_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?;

        let tipos_amostra = self.repo.tipos_amostra_do_processo(processo.id).await?;
        let anexos = self.repo.listar_anexos(processo.id).await?;
        let comentarios = self.repo.listar_comentarios(processo.id).await?;
        let timeline = self.timeline_repo.listar(processo.id).await?;

        Ok(ProcessoDetalhe { processo, cliente, tipos_amostra, anexos, comentarios, timeline })
    }

    pub async fn listar_tipos_amostra(&self) -> Result<Vec<TipoAmostra>, AppError> {
        self.repo.listar_tipos_amostra().await
    }

    async fn buscar(&self, processo_id: Uuid) -> Result<Processo, AppError> {
        self.repo
            .buscar_por_id(processo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Processo".to_string()))
    }
}

// =========================================================================
//  GUARDAS (puras)
// =========================================================================

// Separador não abre processo; quem vende (ou gere) abre.
pub(crate) fn garantir_pode_criar(funcao: Funcao) -> Result<(), AppError> {
    if funcao == Funcao::Separador {
        return Err(AppError::PermissionDenied(
            "Separadores não podem criar processos.".to_string(),
        ));
    }
    Ok(())
}

// Processo cancelado não aceita mais nenhuma mutação além da reativação.
pub(crate) fn garantir_processo_vivo(processo: &Processo) -> Result<(), AppError> {
    if processo.status == StatusProcesso::Cancelado {
        return Err(AppError::InvalidState(
            "Este processo está cancelado e não aceita alterações.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) struct PlanoStatus {
    pub assumir: bool,
}

pub(crate) fn plano_alteracao_status(
    processo: &Processo,
    usuario: &Usuario,
    novo_status: StatusProcesso,
) -> Result<PlanoStatus, AppError> {
    if usuario.funcao != Funcao::Separador {
        return Err(AppError::PermissionDenied(
            "Apenas separadores podem alterar o status do processo.".to_string(),
        ));
    }

    garantir_processo_vivo(processo)?;

    // Cancelamento tem operação própria, com outra regra de permissão
    if novo_status == StatusProcesso::Cancelado {
        return Err(AppError::InvalidState(
            "Cancelamento é feito pela operação de cancelar, não pela troca de status.".to_string(),
        ));
    }

    match processo.responsavel_separacao {
        Some(responsavel) if responsavel != usuario.id => Err(AppError::Conflict(
            "Este processo já está sendo tratado por outro separador.".to_string(),
        )),
        Some(_) => Ok(PlanoStatus { assumir: false }),
        None => Ok(PlanoStatus { assumir: true }),
    }
}

// Separador sempre pode; vendedor só no processo que criou e quando o
// transporte é carga (o rastreio vem da transportadora, não dos Correios).
pub(crate) fn garantir_pode_atualizar_rastreio(
    processo: &Processo,
    usuario: &Usuario,
) -> Result<(), AppError> {
    let permitido = match usuario.funcao {
        Funcao::Separador => true,
        Funcao::Vendedor => {
            processo.criado_por == usuario.id
                && processo.tipo_transporte == TipoTransporte::Carga
        }
        Funcao::Gestor => false,
    };

    if !permitido {
        return Err(AppError::PermissionDenied(
            "Você não pode alterar o código de rastreio deste processo.".to_string(),
        ));
    }

    garantir_processo_vivo(processo)
}

pub(crate) fn garantir_pode_cancelar(
    processo: &Processo,
    usuario: &Usuario,
) -> Result<(), AppError> {
    if usuario.funcao != Funcao::Gestor && processo.criado_por != usuario.id {
        return Err(AppError::PermissionDenied(
            "Apenas o gestor ou o criador podem cancelar ou reativar o processo.".to_string(),
        ));
    }
    Ok(())
}

// Cancelamento só alcança estados não-terminais; a volta (reativação) só
// existe a partir de Cancelado.
pub(crate) fn garantir_cancelavel(processo: &Processo) -> Result<(), AppError> {
    if processo.status != StatusProcesso::Cancelado && processo.status.eh_terminal() {
        return Err(AppError::InvalidState(
            "Um processo finalizado não pode ser cancelado.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn garantir_pode_anexar(
    processo: &Processo,
    usuario: &Usuario,
) -> Result<(), AppError> {
    let permitido = usuario.funcao == Funcao::Gestor
        || processo.criado_por == usuario.id
        || processo.responsavel_separacao == Some(usuario.id);

    if !permitido {
        return Err(AppError::PermissionDenied(
            "Você não pode anexar arquivos a este processo.".to_string(),
        ));
    }
    Ok(())
}

// Mesmo recorte da listagem, aplicado na leitura de um processo específico.
pub(crate) fn garantir_visibilidade(
    processo: &Processo,
    usuario: &Usuario,
) -> Result<(), AppError> {
    let visivel = match usuario.funcao {
        Funcao::Gestor => true,
        Funcao::Vendedor => processo.criado_por == usuario.id,
        Funcao::Separador => {
            processo.responsavel_separacao.is_none()
                || processo.responsavel_separacao == Some(usuario.id)
        }
    };

    if !visivel {
        return Err(AppError::PermissionDenied(
            "Você não tem acesso a este processo.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validar_anexo(arquivo: &str, tamanho_bytes: i64) -> Result<(), AppError> {
    if tamanho_bytes > LIMITE_ANEXO_BYTES {
        return Err(AppError::ValidationMessage(
            "O arquivo é muito grande. O tamanho máximo é 10MB.".to_string(),
        ));
    }

    let nome = arquivo.to_lowercase();
    if !EXTENSOES_VALIDAS.iter().any(|ext| nome.ends_with(ext)) {
        return Err(AppError::ValidationMessage(format!(
            "Extensão não suportada. Use: {}",
            EXTENSOES_VALIDAS.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::processo::Prioridade;

    use super::*;

    fn usuario(funcao: Funcao) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            username: "fulano".to_string(),
            nome_completo: "Fulano de Tal".to_string(),
            email: "fulano@example.com".to_string(),
            password_hash: String::new(),
            funcao,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn processo(criado_por: Uuid) -> Processo {
        Processo {
            id: Uuid::new_v4(),
            seq: 1,
            codigo: Some("PRC-2025-0001".to_string()),
            titulo: "Amostras de pré-forma".to_string(),
            descricao: "Lote para análise".to_string(),
            codigo_pedido_iniflex: None,
            tipo_transporte: TipoTransporte::Correios,
            prioridade: Prioridade::Normal,
            status: StatusProcesso::NaoAtribuido,
            codigo_rastreio: None,
            cliente_id: Uuid::new_v4(),
            criado_por,
            responsavel_separacao: None,
            data_criacao: Utc::now(),
            ultima_atualizacao: Utc::now(),
        }
    }

    #[test]
    fn separador_nao_cria_processo() {
        assert!(matches!(
            garantir_pode_criar(Funcao::Separador),
            Err(AppError::PermissionDenied(_))
        ));
        assert!(garantir_pode_criar(Funcao::Vendedor).is_ok());
        assert!(garantir_pode_criar(Funcao::Gestor).is_ok());
    }

    #[test]
    fn processo_cancelado_nao_aceita_mutacao() {
        let mut p = processo(Uuid::new_v4());
        p.status = StatusProcesso::Cancelado;

        assert!(matches!(garantir_processo_vivo(&p), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn vendedor_nao_altera_status() {
        let vendedor = usuario(Funcao::Vendedor);
        let p = processo(vendedor.id);

        assert!(matches!(
            plano_alteracao_status(&p, &vendedor, StatusProcesso::EmSeparacao),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn alteracao_em_processo_sem_dono_planeja_atribuicao_implicita() {
        let separador = usuario(Funcao::Separador);
        let p = processo(Uuid::new_v4());

        let plano =
            plano_alteracao_status(&p, &separador, StatusProcesso::EmSeparacao).unwrap();
        assert!(plano.assumir);
    }

    #[test]
    fn alteracao_pelo_proprio_responsavel_nao_reatribui() {
        let separador = usuario(Funcao::Separador);
        let mut p = processo(Uuid::new_v4());
        p.responsavel_separacao = Some(separador.id);

        let plano = plano_alteracao_status(&p, &separador, StatusProcesso::Pendente).unwrap();
        assert!(!plano.assumir);
    }

    #[test]
    fn alteracao_em_processo_de_outro_separador_e_conflito() {
        let separador = usuario(Funcao::Separador);
        let mut p = processo(Uuid::new_v4());
        p.responsavel_separacao = Some(Uuid::new_v4());

        assert!(matches!(
            plano_alteracao_status(&p, &separador, StatusProcesso::Pendente),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn alteracao_de_status_nao_cancela() {
        let separador = usuario(Funcao::Separador);
        let p = processo(Uuid::new_v4());

        assert!(matches!(
            plano_alteracao_status(&p, &separador, StatusProcesso::Cancelado),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn alteracao_em_cancelado_e_estado_invalido() {
        let separador = usuario(Funcao::Separador);
        let mut p = processo(Uuid::new_v4());
        p.status = StatusProcesso::Cancelado;

        assert!(matches!(
            plano_alteracao_status(&p, &separador, StatusProcesso::Pendente),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn rastreio_separador_sempre_pode() {
        let separador = usuario(Funcao::Separador);
        let p = processo(Uuid::new_v4());

        assert!(garantir_pode_atualizar_rastreio(&p, &separador).is_ok());
    }

    #[test]
    fn rastreio_vendedor_so_no_proprio_processo_de_carga() {
        let vendedor = usuario(Funcao::Vendedor);

        let mut proprio_carga = processo(vendedor.id);
        proprio_carga.tipo_transporte = TipoTransporte::Carga;
        assert!(garantir_pode_atualizar_rastreio(&proprio_carga, &vendedor).is_ok());

        // Transporte Correios: o código vem da expedição, não do vendedor
        let proprio_correios = processo(vendedor.id);
        assert!(matches!(
            garantir_pode_atualizar_rastreio(&proprio_correios, &vendedor),
            Err(AppError::PermissionDenied(_))
        ));

        let mut de_outro = processo(Uuid::new_v4());
        de_outro.tipo_transporte = TipoTransporte::Carga;
        assert!(matches!(
            garantir_pode_atualizar_rastreio(&de_outro, &vendedor),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn cancelamento_e_do_gestor_ou_do_criador() {
        let gestor = usuario(Funcao::Gestor);
        let vendedor = usuario(Funcao::Vendedor);
        let separador = usuario(Funcao::Separador);

        let p = processo(vendedor.id);

        assert!(garantir_pode_cancelar(&p, &gestor).is_ok());
        assert!(garantir_pode_cancelar(&p, &vendedor).is_ok());
        assert!(matches!(
            garantir_pode_cancelar(&p, &separador),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn cancelamento_nao_alcanca_estados_terminais() {
        let mut p = processo(Uuid::new_v4());

        p.status = StatusProcesso::Entregue;
        assert!(matches!(garantir_cancelavel(&p), Err(AppError::InvalidState(_))));

        p.status = StatusProcesso::NaoEntregue;
        assert!(matches!(garantir_cancelavel(&p), Err(AppError::InvalidState(_))));

        // Cancelado segue para a reativação; em rota ainda pode cancelar
        p.status = StatusProcesso::Cancelado;
        assert!(garantir_cancelavel(&p).is_ok());
        p.status = StatusProcesso::EmRota;
        assert!(garantir_cancelavel(&p).is_ok());
    }

    #[test]
    fn visibilidade_por_funcao() {
        let gestor = usuario(Funcao::Gestor);
        let vendedor = usuario(Funcao::Vendedor);
        let separador = usuario(Funcao::Separador);

        let mut p = processo(Uuid::new_v4());

        // Gestor vê tudo; vendedor não vê processo de outro
        assert!(garantir_visibilidade(&p, &gestor).is_ok());
        assert!(matches!(
            garantir_visibilidade(&p, &vendedor),
            Err(AppError::PermissionDenied(_))
        ));

        // Separador vê a fila aberta...
        assert!(garantir_visibilidade(&p, &separador).is_ok());

        // ...mas não o processo assumido por outro separador
        p.responsavel_separacao = Some(Uuid::new_v4());
        assert!(matches!(
            garantir_visibilidade(&p, &separador),
            Err(AppError::PermissionDenied(_))
        ));

        p.responsavel_separacao = Some(separador.id);
        assert!(garantir_visibilidade(&p, &separador).is_ok());
    }

    #[test]
    fn anexo_grande_demais_e_rejeitado() {
        assert!(matches!(
            validar_anexo("laudo.pdf", 11 * 1024 * 1024),
            Err(AppError::ValidationMessage(_))
        ));
        assert!(validar_anexo("laudo.pdf", 5 * 1024 * 1024).is_ok());
    }

    #[test]
    fn anexo_com_extensao_estranha_e_rejeitado() {
        assert!(matches!(validar_anexo("script.exe", 100), Err(AppError::ValidationMessage(_))));
        assert!(matches!(validar_anexo("sem-extensao", 100), Err(AppError::ValidationMessage(_))));
        assert!(validar_anexo("FOTO.JPG", 100).is_ok());
        assert!(validar_anexo("anexos/laudo.docx", 100).is_ok());
    }
}
