use tracing::info;

use crate::error::ValidationError;
use crate::profile::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Credential check collaborator. Implementations decide what "valid" means.
pub trait Authenticator: Send + Sync {
    fn login(&self, identifier: &str, secret: &str) -> Result<UserProfile, AuthError>;
    fn logout(&self);
}

/// Placeholder gate: any non-empty identifier and secret pair signs in as the demo student.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn login(&self, identifier: &str, secret: &str) -> Result<UserProfile, AuthError> {
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user = identifier, "signed in");
        Ok(UserProfile {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            email: identifier.to_string(),
            avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".to_string(),
            university: "MIT".to_string(),
            major: "Computer Science".to_string(),
            gpa: "3.8".to_string(),
            graduation_year: "2025".to_string(),
            ..UserProfile::default()
        })
    }

    fn logout(&self) {
        info!("signed out");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

/// What a successful form submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(UserProfile),
    Registered(UserProfile),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Sign-in / registration form with an explicit mode instead of loose flags.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) -> AuthMode {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
        self.mode
    }

    pub fn submit<A: Authenticator + ?Sized>(
        &self,
        authenticator: &A,
    ) -> Result<AuthOutcome, AuthFormError> {
        match self.mode {
            AuthMode::SignIn => {
                let user = authenticator.login(&self.email, &self.password)?;
                Ok(AuthOutcome::SignedIn(user))
            }
            AuthMode::Register => {
                for (field, value) in [
                    ("name", &self.name),
                    ("email", &self.email),
                    ("password", &self.password),
                ] {
                    if value.trim().is_empty() {
                        return Err(ValidationError::MissingField { field }.into());
                    }
                }
                let mut user = authenticator.login(&self.email, &self.password)?;
                user.name = self.name.trim().to_string();
                Ok(AuthOutcome::Registered(user))
            }
        }
    }
}
