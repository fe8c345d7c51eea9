use serde::Deserialize;
use shared_types::{AppError, AuthUser, Institute, LoginRequest, Role};

use crate::client::ApiClient;

/// User as the backend sends it; the role arrives as a free-form string.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    name: String,
    email: String,
    role: String,
    #[serde(default)]
    institutes: Vec<Institute>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLogin {
    access_token: String,
    user: WireUser,
}

impl TryFrom<WireUser> for AuthUser {
    type Error = AppError;

    fn try_from(w: WireUser) -> Result<Self, AppError> {
        let role = Role::parse(&w.role).ok_or_else(|| {
            tracing::warn!(role = %w.role, "login rejected: unknown role");
            AppError::forbidden(format!("Role '{}' is not supported by this client", w.role))
        })?;
        Ok(AuthUser {
            id: w.id,
            name: w.name,
            email: w.email,
            role,
            institutes: w.institutes,
            avatar_url: w.avatar_url,
        })
    }
}

impl ApiClient {
    /// Log in and store the returned token.
    ///
    /// The token is only stored once the user's role is known to be valid.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: WireLogin = self.post("auth/login", &body).await?;
        let user = AuthUser::try_from(resp.user)?;
        self.set_token(&resp.access_token);
        tracing::info!(user_id = %user.id, role = %user.role, "logged in");
        Ok(user)
    }

    /// Fetch the user behind the stored token. Without a token this is
    /// `Unauthorized` without a network round trip.
    pub async fn current_user(&self) -> Result<AuthUser, AppError> {
        if !self.has_token() {
            return Err(AppError::unauthorized("Not signed in"));
        }
        let wire: WireUser = self.get("auth/me", &[]).await?;
        match AuthUser::try_from(wire) {
            Ok(user) => Ok(user),
            Err(e) => {
                self.clear_token();
                Err(e)
            }
        }
    }

    /// Drop the stored token. The backend keeps no session state to clear.
    pub fn logout(&self) {
        self.clear_token();
        tracing::info!("logged out");
    }
}
