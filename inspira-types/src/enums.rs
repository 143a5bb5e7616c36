use serde::{Deserialize, Serialize};

/// Account role as issued by the backend. The wire names are the backend's
/// Portuguese role claims and must not be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular account, can like, comment and follow.
    Comum,
    /// Artist account, can publish artworks.
    Artista,
    /// Moderator account, can delete any artwork or comment.
    Administrador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Comum => "Comum",
            Role::Artista => "Artista",
            Role::Administrador => "Administrador",
        }
    }

    /// Numeric code used by the register endpoint.
    pub fn as_code(&self) -> i32 {
        match self {
            Role::Comum => 0,
            Role::Artista => 1,
            Role::Administrador => 2,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrador)
    }
}
