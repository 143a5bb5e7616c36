use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A published artwork as returned by the backend.
///
/// Wire field names are the backend's Portuguese contract; the Rust side uses
/// English names via serde renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "dataPublicacao")]
    pub published_at: String,
    #[serde(rename = "autorUsername")]
    pub author_username: String,
    #[serde(rename = "categoriaNome")]
    pub category_name: String,
    /// Public URL of the media file, when the backend has finished storing it.
    #[serde(default)]
    pub url: Option<String>,
    /// MIME type of the media file (e.g. "image/png", "video/mp4").
    #[serde(rename = "tipoConteudoMidia", default)]
    pub media_content_type: Option<String>,
    #[serde(rename = "totalCurtidas")]
    pub total_likes: i64,
    /// Whether the requesting user has liked this artwork. Absent for
    /// anonymous requests.
    #[serde(rename = "curtidaPeloUsuario", default)]
    pub liked_by_user: bool,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
    #[serde(rename = "hasMoreItems")]
    pub has_more_items: bool,
}

impl<T> Page<T> {
    /// An empty terminal page, useful as a fetch fallback in tests.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more_items: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "dataComentario")]
    pub commented_at: String,
    #[serde(rename = "autorUsername")]
    pub author_username: String,
    #[serde(rename = "obraDeArteId")]
    pub artwork_id: String,
    #[serde(rename = "urlFotoPerfil", default)]
    pub author_photo_url: Option<String>,
}

/// Result of a like or unlike call: the authoritative counter and flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    #[serde(rename = "totalCurtidas")]
    pub total_likes: i64,
    #[serde(rename = "curtiu")]
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "urlFotoPerfil", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "contagemSeguidores")]
    pub follower_count: i64,
    #[serde(rename = "contagemSeguindo")]
    pub following_count: i64,
    #[serde(rename = "seguidoPeloUsuarioAtual", default)]
    pub followed_by_current_user: bool,
    #[serde(rename = "categoriaPrincipalId", default)]
    pub main_category_id: Option<String>,
    #[serde(rename = "categoriaPrincipalNome", default)]
    pub main_category_name: Option<String>,
    #[serde(rename = "urlPortifolio", default)]
    pub portfolio_url: Option<String>,
    #[serde(rename = "urlLinkedin", default)]
    pub linkedin_url: Option<String>,
    #[serde(rename = "urlInstagram", default)]
    pub instagram_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub id: String,
    pub username: String,
    #[serde(rename = "urlFotoPerfil", default)]
    pub photo_url: Option<String>,
}

// Request/response types for the API

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "CompleteName")]
    pub complete_name: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
    /// Numeric role code, see [`Role::as_code`].
    #[serde(rename = "Role")]
    pub role: i32,
}

impl RegisterRequest {
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role.as_code();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(rename = "obraDeArteId")]
    pub artwork_id: String,
    #[serde(rename = "conteudo")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArtworkRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "categoriaId")]
    pub category_id: String,
}

/// Text portion of a profile update; the avatar travels separately as a
/// multipart file part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "UrlPortifolio", default)]
    pub portfolio_url: Option<String>,
    #[serde(rename = "UrlLinkedin", default)]
    pub linkedin_url: Option<String>,
    #[serde(rename = "UrlInstagram", default)]
    pub instagram_url: Option<String>,
    #[serde(rename = "categoriaPrincipalId", default)]
    pub main_category_id: Option<String>,
}

/// Error body shape the backend uses for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artwork_deserializes_wire_names() {
        let json = r#"{
            "id": "a1",
            "titulo": "Aurora",
            "descricao": "Oil on canvas",
            "dataPublicacao": "2026-01-10T12:00:00Z",
            "autorUsername": "lia",
            "categoriaNome": "Pintura",
            "url": "https://cdn.example/a1.png",
            "tipoConteudoMidia": "image/png",
            "totalCurtidas": 5,
            "curtidaPeloUsuario": true
        }"#;

        let art: Artwork = serde_json::from_str(json).unwrap();
        assert_eq!(art.title, "Aurora");
        assert_eq!(art.category_name, "Pintura");
        assert_eq!(art.total_likes, 5);
        assert!(art.liked_by_user);
    }

    #[test]
    fn artwork_optional_fields_default() {
        let json = r#"{
            "id": "a2",
            "titulo": "Untitled",
            "descricao": "",
            "dataPublicacao": "2026-01-10T12:00:00Z",
            "autorUsername": "rui",
            "categoriaNome": "Escultura",
            "totalCurtidas": 0
        }"#;

        let art: Artwork = serde_json::from_str(json).unwrap();
        assert!(art.url.is_none());
        assert!(art.media_content_type.is_none());
        assert!(!art.liked_by_user);
    }

    #[test]
    fn page_envelope_roundtrip() {
        let json = r#"{"items": [], "nextCursor": "2026-01-01T00:00:00Z", "hasMoreItems": true}"#;
        let page: Page<Artwork> = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor.as_deref(), Some("2026-01-01T00:00:00Z"));
        assert!(page.has_more_items);
    }

    #[test]
    fn like_response_uses_curtiu_flag() {
        let json = r#"{"totalCurtidas": 6, "curtiu": true}"#;
        let resp: LikeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_likes, 6);
        assert!(resp.liked);
    }
}
