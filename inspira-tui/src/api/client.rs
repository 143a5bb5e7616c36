use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::server_message;
use super::{ApiError, ApiResult};
use inspira_types::*;

/// In-memory media file attached to a multipart upload.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// API client for communicating with the Inspira backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Set the bearer token for authenticated requests
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to add the Authorization header to a request if a token is set
    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.bearer_token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = server_message(&body);

            match status.as_u16() {
                404 => Err(ApiError::NotFound(message)),
                401 | 403 => Err(ApiError::Unauthorized(message)),
                400 | 422 => Err(ApiError::BadRequest(message)),
                _ => Err(ApiError::Api(message)),
            }
        }
    }

    /// Helper for endpoints that answer 204 No Content
    async fn handle_empty_response(&self, response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body);
        match status.as_u16() {
            404 => Err(ApiError::NotFound(message)),
            401 | 403 => Err(ApiError::Unauthorized(message)),
            400 | 422 => Err(ApiError::BadRequest(message)),
            _ => Err(ApiError::Api(message)),
        }
    }

    // Authentication endpoints

    /// Login with username and password. On success the bearer token is NOT
    /// stored here; session handling owns persistence and decode.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<serde_json::Value> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    // Artwork endpoints

    /// Get a page of artworks, optionally filtered by category or author
    pub async fn get_artworks(
        &self,
        category_id: Option<&str>,
        author_username: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> ApiResult<Page<Artwork>> {
        let mut url = format!("{}/ObrasDeArte", self.base_url);
        let mut params = vec![format!("pageSize={}", page_size)];

        if let Some(c) = category_id {
            params.push(format!("categoriaId={}", urlencoding::encode(c)));
        }
        if let Some(a) = author_username {
            params.push(format!("autorUsername={}", urlencoding::encode(a)));
        }
        if let Some(cur) = cursor {
            params.push(format!("cursor={}", urlencoding::encode(cur)));
        }

        url.push('?');
        url.push_str(&params.join("&"));

        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Publish a new artwork (multipart form with the media file)
    pub async fn create_artwork(
        &self,
        title: &str,
        description: &str,
        category_id: &str,
        media: MediaUpload,
    ) -> ApiResult<Artwork> {
        let url = format!("{}/ObrasDeArte", self.base_url);

        let part = reqwest::multipart::Part::bytes(media.bytes)
            .file_name(media.file_name)
            .mime_str(&media.content_type)?;
        let form = reqwest::multipart::Form::new()
            .text("Titulo", title.to_string())
            .text("Descricao", description.to_string())
            .text("CategoriaId", category_id.to_string())
            .part("Midia", part);

        let req = self.add_auth_header(self.client.post(&url).multipart(form));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Update an artwork's title, description and category
    pub async fn update_artwork(
        &self,
        artwork_id: &str,
        request: &UpdateArtworkRequest,
    ) -> ApiResult<Artwork> {
        let url = format!("{}/ObrasDeArte/{}", self.base_url, artwork_id);
        let req = self.add_auth_header(self.client.put(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Delete an artwork. The backend answers 204 No Content.
    pub async fn delete_artwork(&self, artwork_id: &str) -> ApiResult<()> {
        let url = format!("{}/ObrasDeArte/{}", self.base_url, artwork_id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    // Like endpoints

    /// Like an artwork; answers with the authoritative counter
    pub async fn like_artwork(&self, artwork_id: &str) -> ApiResult<LikeResponse> {
        let url = format!("{}/Curtidas", self.base_url);
        let body = serde_json::json!({ "obraDeArteId": artwork_id });
        let req = self.add_auth_header(self.client.post(&url).json(&body));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Remove a like from an artwork
    pub async fn unlike_artwork(&self, artwork_id: &str) -> ApiResult<LikeResponse> {
        let url = format!("{}/Curtidas/{}", self.base_url, artwork_id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    // Comment endpoints

    /// List comments of an artwork
    pub async fn get_comments(&self, artwork_id: &str) -> ApiResult<Vec<Comment>> {
        let url = format!(
            "{}/Comentarios?obraDeArteId={}",
            self.base_url,
            urlencoding::encode(artwork_id)
        );
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Create a comment on an artwork
    pub async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        let url = format!("{}/Comentarios", self.base_url);
        let req = self.add_auth_header(self.client.post(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        let url = format!("{}/Comentarios/{}", self.base_url, comment_id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    // Category endpoints

    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        let url = format!("{}/Categorias", self.base_url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    pub async fn create_category(&self, request: &CreateCategoryRequest) -> ApiResult<Category> {
        let url = format!("{}/Categorias", self.base_url);
        let req = self.add_auth_header(self.client.post(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        request: &UpdateCategoryRequest,
    ) -> ApiResult<Category> {
        let url = format!("{}/Categorias/{}", self.base_url, category_id);
        let req = self.add_auth_header(self.client.put(&url).json(request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    pub async fn delete_category(&self, category_id: &str) -> ApiResult<()> {
        let url = format!("{}/Categorias/{}", self.base_url, category_id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    // User endpoints

    /// Search users by username
    pub async fn search_users(&self, query: &str) -> ApiResult<Vec<UserSearchResult>> {
        let url = format!(
            "{}/Usuario/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Follow a user
    pub async fn follow_user(&self, user_id: &str) -> ApiResult<()> {
        let url = format!("{}/Usuario/{}/follow", self.base_url, user_id);
        let req = self.add_auth_header(self.client.post(&url));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    /// Unfollow a user
    pub async fn unfollow_user(&self, user_id: &str) -> ApiResult<()> {
        let url = format!("{}/Usuario/{}/follow", self.base_url, user_id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_empty_response(response).await
    }

    /// Get a user profile by username
    pub async fn get_profile(&self, username: &str) -> ApiResult<UserProfile> {
        let url = format!(
            "{}/Usuario/{}/profile",
            self.base_url,
            urlencoding::encode(username)
        );
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Update the authenticated user's profile. The avatar travels as an
    /// optional multipart file part next to the text fields.
    pub async fn update_my_profile(
        &self,
        request: &UpdateProfileRequest,
        avatar: Option<MediaUpload>,
    ) -> ApiResult<UserProfile> {
        let url = format!("{}/Usuario/me", self.base_url);

        let mut form = reqwest::multipart::Form::new();
        if let Some(bio) = &request.bio {
            form = form.text("bio", bio.clone());
        }
        if let Some(v) = &request.portfolio_url {
            form = form.text("UrlPortifolio", v.clone());
        }
        if let Some(v) = &request.linkedin_url {
            form = form.text("UrlLinkedin", v.clone());
        }
        if let Some(v) = &request.instagram_url {
            form = form.text("UrlInstagram", v.clone());
        }
        if let Some(v) = &request.main_category_id {
            form = form.text("categoriaPrincipalId", v.clone());
        }
        if let Some(file) = avatar {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part("Foto", part);
        }

        let req = self.add_auth_header(self.client.put(&url).multipart(form));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        let base_url = std::env::var("INSPIRA_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        Self::new(base_url)
    }
}
