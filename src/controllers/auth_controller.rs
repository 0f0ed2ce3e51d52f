use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{
    EmailSignInRequest, PhoneSignInRequest, SessionResponse, SessionUser, SignInResponse,
};
use crate::repositories::user_repository::UserRepository;
use crate::services::session_service::SessionService;
use crate::state::SessionStore;
use crate::utils::errors::AppError;

pub struct AuthController {
    sessions: SessionService,
}

impl AuthController {
    pub fn new(pool: PgPool, store: SessionStore) -> Self {
        Self {
            sessions: SessionService::new(UserRepository::new(pool), store),
        }
    }

    /// Login email + mot de passe (chef d'équipe / admin)
    pub async fn sign_in_email(
        &self,
        request: EmailSignInRequest,
    ) -> Result<(String, SignInResponse), AppError> {
        request.validate()?;

        let (token, user) = self
            .sessions
            .sign_in_with_email(&request.email, &request.password)
            .await?;

        let response = SignInResponse {
            success: true,
            user: SessionUser::from(&user),
            session_token: token.clone(),
        };
        Ok((token, response))
    }

    /// Login par téléphone (chauffeur approuvé)
    pub async fn sign_in_phone(
        &self,
        request: PhoneSignInRequest,
    ) -> Result<(String, SignInResponse), AppError> {
        request.validate()?;

        let (token, user) = self.sessions.sign_in_with_phone(&request.phone).await?;

        let response = SignInResponse {
            success: true,
            user: SessionUser::from(&user),
            session_token: token.clone(),
        };
        Ok((token, response))
    }

    /// Sesión actual, reverificando al usuario en base
    pub async fn session(&self, token: &str) -> Result<SessionResponse, AppError> {
        let (session, _user) = self.sessions.resolve(token).await?;
        Ok(SessionResponse {
            success: true,
            user: SessionUser::from(&session),
        })
    }

    /// Cerrar sesión (idempotente)
    pub async fn sign_out(&self, token: &str) {
        self.sessions.sign_out(token).await;
    }
}
