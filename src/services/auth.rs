// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{CadastrarUsuarioPayload, Claims, Funcao, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    // Cadastro é restrito ao Gestor: o SGA não tem auto-registro.
    pub async fn cadastrar_usuario(
        &self,
        ator: &Usuario,
        payload: &CadastrarUsuarioPayload,
    ) -> Result<Usuario, AppError> {
        if ator.funcao != Funcao::Gestor {
            return Err(AppError::PermissionDenied(
                "Apenas gestores podem cadastrar novos usuários.".to_string(),
            ));
        }

        if self.user_repo.find_by_username(&payload.username).await?.is_some() {
            return Err(AppError::Conflict(
                "Já existe um usuário com este nome de usuário.".to_string(),
            ));
        }

        // O hashing do bcrypt é pesado demais para o runtime async
        let password_clone = payload.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_user(
                &payload.username,
                &payload.nome_completo,
                &payload.email,
                &password_hash,
                payload.funcao,
            )
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let usuario = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = usuario.password_hash.clone();

        let senha_valida =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::InvalidCredentials);
        }

        self.criar_token(usuario.id)
    }

    pub async fn validar_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn criar_token(&self, usuario_id: Uuid) -> Result<String, AppError> {
        let agora = Utc::now();
        let expira_em = agora + chrono::Duration::days(7);

        let claims = Claims {
            sub: usuario_id,
            exp: expira_em.timestamp() as usize,
            iat: agora.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
