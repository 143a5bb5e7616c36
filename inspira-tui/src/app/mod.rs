mod handlers;
mod state;
#[cfg(test)]
mod tests;

pub use state::*;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use tokio::sync::broadcast;

use crate::announce::NewPostChannel;
use crate::api::{ApiClient, ApiError, MediaUpload};
use crate::feed::{CommentThread, FeedSync, LoadOutcome};
use crate::media::MediaPreview;
use crate::session::SessionManager;
use inspira_types::{
    Artwork, Claims, CreateCategoryRequest, LoginRequest, RegisterRequest, UpdateArtworkRequest,
    UpdateCategoryRequest, UpdateProfileRequest,
};

/// How long transient status messages stay on screen
const MESSAGE_TTL: Duration = Duration::from_secs(3);

impl App {
    pub fn new(api_client: ApiClient, session: SessionManager, page_size: u32) -> Self {
        Self {
            running: true,
            current_screen: Screen::Auth,
            current_tab: Tab::Feed,
            api_client,
            session,
            auth_state: AuthState::new(),
            feed_state: FeedState::new(page_size),
            categories_state: CategoriesState::new(),
            profile_state: ProfileState::new(page_size),
            composer_state: ComposerState::new(),
            user_search_state: UserSearchState::new(),
            input_mode: InputMode::Navigation,
            show_help: false,
            page_size,
        }
    }

    pub fn claims(&self) -> Option<Claims> {
        self.session.claims()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key_event(self, key)
    }

    // Status messages

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.feed_state.message = Some((text.into(), Instant::now()));
    }

    pub fn clear_expired_messages(&mut self) {
        if let Some((_, shown_at)) = &self.feed_state.message {
            if shown_at.elapsed() > MESSAGE_TTL {
                self.feed_state.message = None;
            }
        }
    }

    // Session

    /// Route guard, checked every loop iteration: an expired session while on
    /// the main screen drops straight back to the auth screen.
    pub fn enforce_session(&mut self) {
        if self.current_screen == Screen::Main && !self.session.is_authenticated() {
            log::info!("Session no longer valid, returning to auth screen");
            self.session.logout(&mut self.api_client);
            self.reset_to_auth();
        }
    }

    fn reset_to_auth(&mut self) {
        self.current_screen = Screen::Auth;
        self.current_tab = Tab::Feed;
        self.auth_state = AuthState::new();
        self.feed_state = FeedState::new(self.page_size);
        self.categories_state = CategoriesState::new();
        self.profile_state = ProfileState::new(self.page_size);
        self.composer_state.close();
        self.user_search_state.close();
        self.input_mode = InputMode::Navigation;
    }

    /// Submit the auth form (login or register, depending on the mode)
    pub async fn submit_auth(&mut self) -> Result<()> {
        match self.auth_state.mode {
            AuthMode::Login => self.submit_login().await,
            AuthMode::Register => self.submit_register().await,
        }
    }

    async fn submit_login(&mut self) -> Result<()> {
        let username = self.auth_state.username_input.trim().to_string();
        let password = self.auth_state.password_input.clone();
        if username.is_empty() || password.is_empty() {
            self.auth_state.error = Some("Preencha usuário e senha".to_string());
            return Ok(());
        }

        self.auth_state.loading = true;
        self.auth_state.error = None;

        let credentials = LoginRequest { username, password };
        match self.session.login(&mut self.api_client, &credentials).await {
            Ok(_) => {
                self.auth_state.loading = false;
                self.enter_main_screen();
            }
            Err(e) => {
                log::warn!("Login failed: {e}");
                self.auth_state.loading = false;
                self.auth_state.error = Some(e.display_message().to_string());
            }
        }
        Ok(())
    }

    async fn submit_register(&mut self) -> Result<()> {
        let request = RegisterRequest {
            complete_name: self.auth_state.complete_name_input.trim().to_string(),
            username: self.auth_state.username_input.trim().to_string(),
            email: self.auth_state.email_input.trim().to_string(),
            password: self.auth_state.password_input.clone(),
            role: 0,
        }
        .with_role(self.auth_state.role_selection);

        if request.complete_name.is_empty()
            || request.username.is_empty()
            || request.email.is_empty()
            || request.password.is_empty()
        {
            self.auth_state.error = Some("Preencha todos os campos".to_string());
            return Ok(());
        }

        self.auth_state.loading = true;
        self.auth_state.error = None;

        match self.api_client.register(&request).await {
            Ok(_) => {
                self.auth_state.loading = false;
                self.auth_state.info =
                    Some("Conta criada, faça login para continuar".to_string());
                self.auth_state.password_input.clear();
                self.auth_state.switch_mode();
            }
            Err(e) => {
                log::warn!("Registration failed: {e}");
                self.auth_state.loading = false;
                self.auth_state.error = Some(e.display_message().to_string());
            }
        }
        Ok(())
    }

    fn enter_main_screen(&mut self) {
        self.current_screen = Screen::Main;
        self.current_tab = Tab::Feed;
        self.feed_state.request_load(true);
    }

    pub fn logout(&mut self) {
        self.session.logout(&mut self.api_client);
        self.reset_to_auth();
    }

    // Feed

    /// Run the load queued by [`FeedState::request_load`], after the loading
    /// indicator has been rendered once.
    pub async fn perform_pending_load(&mut self) -> Result<()> {
        if !self.feed_state.pending_load {
            return Ok(());
        }
        let reset = self.feed_state.pending_reset;
        self.feed_state.pending_load = false;
        self.feed_state.pending_reset = false;

        let claims = self.claims();
        match self
            .feed_state
            .feed
            .load(&self.api_client, reset, claims.as_ref())
            .await
        {
            Ok(LoadOutcome::Loaded(_)) => {
                if reset {
                    self.feed_state.list_state.select(if self.feed_state.feed.is_empty() {
                        None
                    } else {
                        Some(0)
                    });
                }
            }
            Ok(LoadOutcome::Skipped) => {}
            Err(e) => self.report_api_error(e),
        }
        Ok(())
    }

    pub fn select_next(&mut self) {
        let len = self.feed_state.feed.len();
        if len == 0 {
            return;
        }
        let next = match self.feed_state.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.feed_state.list_state.select(Some(next));

        // Reaching the tail is the pagination trigger.
        if next + 1 == len && self.feed_state.feed.has_more() {
            self.feed_state.request_load(false);
        }
    }

    pub fn select_previous(&mut self) {
        let previous = match self.feed_state.list_state.selected() {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.feed_state.list_state.select(Some(previous));
    }

    pub async fn toggle_like_selected(&mut self) -> Result<()> {
        let Some(artwork_id) = self.feed_state.selected_artwork_id() else {
            return Ok(());
        };
        if let Err(e) = self
            .feed_state
            .feed
            .toggle_like(&self.api_client, &artwork_id)
            .await
        {
            self.report_api_error(e);
        }
        Ok(())
    }

    /// Delete the artwork that is awaiting confirmation
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(artwork_id) = self.feed_state.confirm_delete.take() else {
            return Ok(());
        };
        match self.feed_state.feed.remove(&self.api_client, &artwork_id).await {
            Ok(()) => {
                self.set_message("Obra removida");
                let len = self.feed_state.feed.len();
                if let Some(selected) = self.feed_state.list_state.selected() {
                    if len == 0 {
                        self.feed_state.list_state.select(None);
                    } else if selected >= len {
                        self.feed_state.list_state.select(Some(len - 1));
                    }
                }
            }
            Err(e) => self.report_api_error(e),
        }
        Ok(())
    }

    /// Ask for delete confirmation on the selected artwork, if permitted
    pub fn request_delete_selected(&mut self) {
        if let Some(index) = self.feed_state.list_state.selected() {
            if let Some(view) = self.feed_state.feed.get(index) {
                if view.can_delete {
                    self.feed_state.confirm_delete = Some(view.artwork.id.clone());
                }
            }
        }
    }

    pub fn toggle_comment_box_selected(&mut self) {
        let Some(artwork_id) = self.feed_state.selected_artwork_id() else {
            return;
        };
        self.feed_state.feed.toggle_comment_box(&artwork_id);
        let open = self
            .feed_state
            .feed
            .comment_draft(&artwork_id)
            .map(|d| d.open)
            .unwrap_or(false);
        if open {
            self.feed_state.comment_focus = Some(artwork_id);
            self.input_mode = InputMode::Typing;
        } else {
            self.feed_state.comment_focus = None;
            self.input_mode = InputMode::Navigation;
        }
    }

    pub async fn submit_focused_comment(&mut self) -> Result<()> {
        let Some(artwork_id) = self.feed_state.comment_focus.clone() else {
            return Ok(());
        };
        match self
            .feed_state
            .feed
            .submit_comment(&self.api_client, &artwork_id)
            .await
        {
            Ok(Some(_)) => {
                self.set_message("Comentário publicado");
                self.feed_state.comment_focus = None;
                self.input_mode = InputMode::Navigation;
            }
            Ok(None) => {}
            Err(e) => self.report_api_error(e),
        }
        Ok(())
    }

    // Comments view

    /// Open the comment list of the selected artwork
    pub async fn open_comments_for_selected(&mut self) -> Result<()> {
        let Some(artwork_id) = self.feed_state.selected_artwork_id() else {
            return Ok(());
        };
        let mut thread = CommentThread::new(artwork_id);
        match thread.load(&self.api_client).await {
            Ok(_) => {
                self.feed_state.comments_view = Some(CommentsViewState {
                    thread,
                    selected_index: 0,
                });
            }
            Err(e) => self.report_api_error(e),
        }
        Ok(())
    }

    /// Delete the highlighted comment, if the session user may
    pub async fn delete_selected_comment(&mut self) -> Result<()> {
        let claims = self.claims();
        let Some(view) = &mut self.feed_state.comments_view else {
            return Ok(());
        };
        let Some(comment) = view.thread.get(view.selected_index) else {
            return Ok(());
        };
        if !CommentThread::can_delete(comment, claims.as_ref()) {
            return Ok(());
        }

        let comment_id = comment.id.clone();
        match view.thread.delete(&self.api_client, &comment_id).await {
            Ok(()) => {
                if view.selected_index >= view.thread.len() {
                    view.selected_index = view.thread.len().saturating_sub(1);
                }
                self.set_message("Comentário excluído");
            }
            Err(e) => self.report_api_error(e),
        }
        Ok(())
    }

    // Category filter

    pub async fn open_filter_modal(&mut self) -> Result<()> {
        self.feed_state.filter_modal.show_modal = true;
        self.feed_state.filter_modal.loading = true;
        self.feed_state.filter_modal.error = None;

        match self.api_client.get_categories().await {
            Ok(categories) => {
                self.feed_state.filter_modal.categories = categories;
                self.feed_state.filter_modal.loading = false;

                // Preselect the active filter.
                let current = self.feed_state.feed.category_id().map(str::to_string);
                self.feed_state.filter_modal.selected_index = match current {
                    None => 0,
                    Some(id) => self
                        .feed_state
                        .filter_modal
                        .categories
                        .iter()
                        .position(|c| c.id == id)
                        .map(|i| i + 1)
                        .unwrap_or(0),
                };
            }
            Err(e) => {
                self.feed_state.filter_modal.loading = false;
                self.feed_state.filter_modal.error = Some(e.display_message().to_string());
            }
        }
        Ok(())
    }

    /// Apply the category highlighted in the filter modal: the feed restarts
    /// from the first page under the new filter.
    pub fn apply_filter(&mut self) {
        let category_id = self
            .feed_state
            .filter_modal
            .selected_category_id()
            .map(str::to_string);
        self.feed_state.filter_modal.show_modal = false;
        self.feed_state.feed.set_category(category_id);
        self.feed_state.request_load(true);
    }

    // New post channel

    /// Drain announced posts into the feed head
    pub fn drain_new_posts(&mut self, rx: &mut broadcast::Receiver<Artwork>) {
        let claims = self.claims();
        loop {
            match rx.try_recv() {
                Ok(artwork) => {
                    self.feed_state.feed.prepend(artwork, claims.as_ref());
                    if self.feed_state.list_state.selected().is_none() {
                        self.feed_state.list_state.select(Some(0));
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    log::warn!("Missed {missed} announced posts, reloading feed");
                    self.feed_state.request_load(true);
                }
                Err(_) => break,
            }
        }
    }

    // Composer

    pub async fn open_composer(&mut self) -> Result<()> {
        self.composer_state.close();
        self.composer_state.mode = Some(ComposerMode::NewArtwork);
        self.input_mode = InputMode::Typing;
        self.load_composer_categories().await
    }

    /// Open the composer pre-filled with the selected artwork, if editable
    pub async fn open_editor_for_selected(&mut self) -> Result<()> {
        let Some(index) = self.feed_state.list_state.selected() else {
            return Ok(());
        };
        let Some(view) = self.feed_state.feed.get(index) else {
            return Ok(());
        };
        if !view.can_edit {
            return Ok(());
        }

        let artwork = view.artwork.clone();
        self.composer_state.close();
        self.composer_state.mode = Some(ComposerMode::EditArtwork {
            artwork_id: artwork.id.clone(),
        });
        self.composer_state.title_input = artwork.title.clone();
        self.composer_state.textarea =
            tui_textarea::TextArea::from(artwork.description.lines().map(str::to_string));
        self.input_mode = InputMode::Typing;

        self.load_composer_categories().await?;
        if let Some(i) = self
            .composer_state
            .categories
            .iter()
            .position(|c| c.name == artwork.category_name)
        {
            self.composer_state.category_index = i;
        }
        Ok(())
    }

    async fn load_composer_categories(&mut self) -> Result<()> {
        match self.api_client.get_categories().await {
            Ok(categories) => self.composer_state.categories = categories,
            Err(e) => self.composer_state.error = Some(e.display_message().to_string()),
        }
        Ok(())
    }

    /// Read the file named in the media path field and attach it to the
    /// composer, writing a local preview copy.
    pub fn attach_composer_media(&mut self) {
        let path_input = self.composer_state.media_path_input.trim().to_string();
        if path_input.is_empty() {
            return;
        }
        let path = Path::new(&path_input);

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.composer_state.error = Some(format!("Não foi possível ler o arquivo: {e}"));
                return;
            }
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = content_type_for(&file_name);

        let preview_dir = std::env::temp_dir().join("inspira-previews");
        match MediaPreview::write(&preview_dir, &file_name, &bytes) {
            Ok(preview) => self.composer_state.preview = Some(preview),
            Err(e) => log::warn!("Could not write media preview: {e:#}"),
        }

        self.composer_state.media = Some(MediaUpload {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        });
        self.composer_state.error = None;
    }

    /// Submit the composer: create announces the new artwork, edit patches
    /// the listed item in place.
    pub async fn submit_composer(&mut self, new_posts: &NewPostChannel) -> Result<()> {
        let Some(mode) = self.composer_state.mode.clone() else {
            return Ok(());
        };

        let title = self.composer_state.title_input.trim().to_string();
        let description = self.composer_state.description().trim().to_string();
        let Some(category) = self.composer_state.selected_category().cloned() else {
            self.composer_state.error = Some("Escolha uma categoria".to_string());
            return Ok(());
        };
        if title.is_empty() {
            self.composer_state.error = Some("O título é obrigatório".to_string());
            return Ok(());
        }

        self.composer_state.submitting = true;
        match mode {
            ComposerMode::NewArtwork => {
                let Some(media) = self.composer_state.media.clone() else {
                    self.composer_state.submitting = false;
                    self.composer_state.error = Some("Anexe um arquivo de mídia".to_string());
                    return Ok(());
                };
                match self
                    .api_client
                    .create_artwork(&title, &description, &category.id, media)
                    .await
                {
                    Ok(artwork) => {
                        new_posts.announce(artwork);
                        self.composer_state.close();
                        self.input_mode = InputMode::Navigation;
                        self.set_message("Obra publicada");
                    }
                    Err(e) => {
                        self.composer_state.submitting = false;
                        self.composer_state.error = Some(e.display_message().to_string());
                    }
                }
            }
            ComposerMode::EditArtwork { artwork_id } => {
                let request = UpdateArtworkRequest {
                    title,
                    description,
                    category_id: category.id,
                };
                match self.api_client.update_artwork(&artwork_id, &request).await {
                    Ok(updated) => {
                        self.feed_state.feed.apply_update(&updated);
                        self.composer_state.close();
                        self.input_mode = InputMode::Navigation;
                        self.set_message("Obra atualizada");
                    }
                    Err(e) => {
                        self.composer_state.submitting = false;
                        self.composer_state.error = Some(e.display_message().to_string());
                    }
                }
            }
        }
        Ok(())
    }

    pub fn close_composer(&mut self) {
        self.composer_state.close();
        self.input_mode = InputMode::Navigation;
    }

    // Categories tab

    pub async fn load_categories_tab(&mut self) -> Result<()> {
        self.categories_state.loading = true;
        self.categories_state.error = None;
        match self.api_client.get_categories().await {
            Ok(categories) => {
                self.categories_state.loading = false;
                let select = if categories.is_empty() { None } else { Some(0) };
                self.categories_state.categories = categories;
                self.categories_state.list_state.select(select);
            }
            Err(e) => {
                self.categories_state.loading = false;
                self.categories_state.error = Some(e.display_message().to_string());
            }
        }
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.claims().map(|c| c.role.is_admin()).unwrap_or(false)
    }

    pub async fn submit_category_editor(&mut self) -> Result<()> {
        let Some(editor) = self.categories_state.editor.take() else {
            return Ok(());
        };
        let name = editor.name_input.trim().to_string();
        if name.is_empty() {
            self.categories_state.editor = Some(editor);
            return Ok(());
        }

        let result = match &editor.category_id {
            Some(id) => self
                .api_client
                .update_category(id, &UpdateCategoryRequest { name })
                .await
                .map(|_| ()),
            None => self
                .api_client
                .create_category(&CreateCategoryRequest {
                    name,
                    description: String::new(),
                })
                .await
                .map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.input_mode = InputMode::Navigation;
                self.load_categories_tab().await?;
            }
            Err(e) => {
                self.categories_state.error = Some(e.display_message().to_string());
                self.categories_state.editor = Some(editor);
            }
        }
        Ok(())
    }

    pub async fn confirm_delete_category(&mut self) -> Result<()> {
        let Some(category_id) = self.categories_state.confirm_delete.take() else {
            return Ok(());
        };
        match self.api_client.delete_category(&category_id).await {
            Ok(()) => self.load_categories_tab().await?,
            Err(e) => self.categories_state.error = Some(e.display_message().to_string()),
        }
        Ok(())
    }

    // Profile

    /// Load a profile and that user's artwork feed. With no username the
    /// session user's own profile is shown.
    pub async fn load_profile(&mut self, username: Option<String>) -> Result<()> {
        let Some(username) = username.or_else(|| self.claims().map(|c| c.name)) else {
            return Ok(());
        };

        self.profile_state.loading = true;
        self.profile_state.error = None;
        self.profile_state.username = Some(username.clone());

        match self.api_client.get_profile(&username).await {
            Ok(profile) => {
                self.profile_state.profile = Some(profile);
                self.profile_state.loading = false;
            }
            Err(e) => {
                self.profile_state.loading = false;
                self.profile_state.error = Some(e.display_message().to_string());
                return Ok(());
            }
        }

        let claims = self.claims();
        self.profile_state.feed = FeedSync::for_author(username, self.page_size);
        if let Err(e) = self
            .profile_state
            .feed
            .load(&self.api_client, true, claims.as_ref())
            .await
        {
            self.profile_state.error = Some(e.display_message().to_string());
        }
        self.profile_state
            .list_state
            .select(if self.profile_state.feed.is_empty() {
                None
            } else {
                Some(0)
            });
        Ok(())
    }

    /// Optimistic follow toggle on the viewed profile
    pub async fn toggle_follow_profile(&mut self) -> Result<()> {
        let Some(profile) = &mut self.profile_state.profile else {
            return Ok(());
        };
        let user_id = profile.id.clone();
        let was_following = profile.followed_by_current_user;

        profile.followed_by_current_user = !was_following;
        profile.follower_count += if was_following { -1 } else { 1 };

        let result = if was_following {
            self.api_client.unfollow_user(&user_id).await
        } else {
            self.api_client.follow_user(&user_id).await
        };

        if let Err(e) = result {
            log::warn!("Follow toggle failed, reverting: {e}");
            if let Some(profile) = &mut self.profile_state.profile {
                profile.followed_by_current_user = was_following;
                profile.follower_count += if was_following { 1 } else { -1 };
            }
            self.report_api_error(e);
        }
        Ok(())
    }

    /// Open the bio/photo editor, only for the session user's own profile
    pub fn open_profile_editor(&mut self) {
        let session_name = self.claims().map(|c| c.name);
        if !self
            .profile_state
            .is_own_profile(session_name.as_deref())
        {
            return;
        }
        let bio = self
            .profile_state
            .profile
            .as_ref()
            .and_then(|p| p.bio.clone())
            .unwrap_or_default();
        self.profile_state.editor = Some(ProfileEditor {
            bio_input: bio,
            photo_path_input: String::new(),
            focused_field: ProfileEditorField::Bio,
            error: None,
        });
        self.input_mode = InputMode::Typing;
    }

    /// Submit the profile editor. A successful update re-broadcasts the new
    /// photo through the session claims so every view picks it up at once.
    pub async fn submit_profile_editor(&mut self) -> Result<()> {
        let Some(editor) = self.profile_state.editor.take() else {
            return Ok(());
        };

        let avatar = match editor.photo_path_input.trim() {
            "" => None,
            path_input => {
                let path = Path::new(path_input);
                match std::fs::read(path) {
                    Ok(bytes) => {
                        let file_name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("foto")
                            .to_string();
                        let content_type = content_type_for(&file_name).to_string();
                        Some(MediaUpload {
                            file_name,
                            content_type,
                            bytes,
                        })
                    }
                    Err(e) => {
                        self.profile_state.editor = Some(ProfileEditor {
                            error: Some(format!("Não foi possível ler a foto: {e}")),
                            ..editor
                        });
                        return Ok(());
                    }
                }
            }
        };

        let request = UpdateProfileRequest {
            bio: Some(editor.bio_input.clone()),
            ..UpdateProfileRequest::default()
        };

        match self.api_client.update_my_profile(&request, avatar).await {
            Ok(updated) => {
                if let Some(photo_url) = &updated.photo_url {
                    self.session.update_photo(photo_url);
                }
                self.profile_state.profile = Some(updated);
                self.input_mode = InputMode::Navigation;
                self.set_message("Perfil atualizado");
            }
            Err(e) => {
                self.profile_state.editor = Some(ProfileEditor {
                    error: Some(e.display_message().to_string()),
                    ..editor
                });
            }
        }
        Ok(())
    }

    // User search

    pub async fn search_users(&mut self) -> Result<()> {
        let query = self.user_search_state.query.trim().to_string();
        if query.is_empty() {
            self.user_search_state.results.clear();
            return Ok(());
        }
        self.user_search_state.loading = true;
        match self.api_client.search_users(&query).await {
            Ok(results) => {
                self.user_search_state.loading = false;
                self.user_search_state.results = results;
                self.user_search_state.selected_index = 0;
            }
            Err(e) => {
                self.user_search_state.loading = false;
                self.user_search_state.error = Some(e.display_message().to_string());
            }
        }
        Ok(())
    }

    /// Open the profile of the user highlighted in the search modal
    pub async fn open_searched_profile(&mut self) -> Result<()> {
        let Some(result) = self.user_search_state.selected_result() else {
            return Ok(());
        };
        let username = result.username.clone();
        self.user_search_state.close();
        self.current_tab = Tab::Profile;
        self.load_profile(Some(username)).await
    }

    fn report_api_error(&mut self, error: ApiError) {
        if matches!(error, ApiError::Unauthorized(_)) {
            // enforce_session decides whether this ends the session.
            log::warn!("Request rejected as unauthorized");
        }
        self.set_message(error.display_message());
    }
}

/// Best-effort MIME type from the file extension; the backend double-checks.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}
