use std::time::Instant;

use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::api::{ApiClient, MediaUpload};
use crate::feed::{CommentThread, FeedSync};
use crate::media::MediaPreview;
use crate::session::SessionManager;
use inspira_types::{Category, Role, UserProfile, UserSearchResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing content, shortcuts active
    Typing,     // In text input, shortcuts disabled
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Auth,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Feed,
    Categories,
    Profile,
}

impl Tab {
    pub fn next(&self) -> Self {
        match self {
            Tab::Feed => Tab::Categories,
            Tab::Categories => Tab::Profile,
            Tab::Profile => Tab::Feed,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Tab::Feed => Tab::Profile,
            Tab::Categories => Tab::Feed,
            Tab::Profile => Tab::Categories,
        }
    }
}

/// Which auth form is shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Field focus inside the auth forms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthField {
    CompleteName,
    Username,
    Email,
    Password,
    Role,
}

impl AuthField {
    /// Cycle order for the login form (only two fields)
    pub fn next_login(&self) -> Self {
        match self {
            AuthField::Username => AuthField::Password,
            _ => AuthField::Username,
        }
    }

    /// Cycle order for the register form
    pub fn next_register(&self) -> Self {
        match self {
            AuthField::CompleteName => AuthField::Username,
            AuthField::Username => AuthField::Email,
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Role,
            AuthField::Role => AuthField::CompleteName,
        }
    }
}

/// Authentication screen state
pub struct AuthState {
    pub mode: AuthMode,
    pub selected_field: AuthField,
    pub complete_name_input: String,
    pub username_input: String,
    pub email_input: String,
    pub password_input: String,
    pub role_selection: Role,
    pub loading: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            selected_field: AuthField::Username,
            complete_name_input: String::new(),
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            role_selection: Role::Comum,
            loading: false,
            error: None,
            info: None,
        }
    }

    pub fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.selected_field = match self.mode {
            AuthMode::Login => AuthField::Username,
            AuthMode::Register => AuthField::CompleteName,
        };
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.selected_field = match self.mode {
            AuthMode::Login => self.selected_field.next_login(),
            AuthMode::Register => self.selected_field.next_register(),
        };
    }

    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.selected_field {
            AuthField::CompleteName => Some(&mut self.complete_name_input),
            AuthField::Username => Some(&mut self.username_input),
            AuthField::Email => Some(&mut self.email_input),
            AuthField::Password => Some(&mut self.password_input),
            AuthField::Role => None,
        }
    }

    pub fn cycle_role(&mut self) {
        self.role_selection = match self.role_selection {
            Role::Comum => Role::Artista,
            Role::Artista => Role::Comum,
            // Administrador accounts are not self-service
            Role::Administrador => Role::Comum,
        };
    }
}

/// Composer mode - determines what is being composed
#[derive(Debug, Clone)]
pub enum ComposerMode {
    NewArtwork,
    EditArtwork { artwork_id: String },
}

/// Unified artwork composer using tui-textarea for the description
pub struct ComposerState {
    pub mode: Option<ComposerMode>,
    pub title_input: String,
    pub textarea: TextArea<'static>,
    pub category_index: usize,
    pub categories: Vec<Category>,
    pub media_path_input: String,
    pub media: Option<MediaUpload>,
    pub preview: Option<MediaPreview>,
    pub focused_field: ComposerField,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComposerField {
    Title,
    Description,
    Category,
    MediaPath,
}

impl ComposerState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        Self {
            mode: None,
            title_input: String::new(),
            textarea,
            category_index: 0,
            categories: Vec::new(),
            media_path_input: String::new(),
            media: None,
            preview: None,
            focused_field: ComposerField::Title,
            error: None,
            submitting: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn description(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    pub fn next_field(&mut self) {
        self.focused_field = match (self.focused_field, &self.mode) {
            // Edits keep the original media; the path field is skipped.
            (ComposerField::Title, _) => ComposerField::Description,
            (ComposerField::Description, _) => ComposerField::Category,
            (ComposerField::Category, Some(ComposerMode::EditArtwork { .. })) => {
                ComposerField::Title
            }
            (ComposerField::Category, _) => ComposerField::MediaPath,
            (ComposerField::MediaPath, _) => ComposerField::Title,
        };
    }

    pub fn close(&mut self) {
        self.mode = None;
        self.title_input.clear();
        self.textarea = TextArea::default();
        self.category_index = 0;
        self.media_path_input.clear();
        self.media = None;
        self.preview = None;
        self.focused_field = ComposerField::Title;
        self.error = None;
        self.submitting = false;
    }
}

/// Category filter modal state
pub struct FilterModalState {
    pub show_modal: bool,
    pub categories: Vec<Category>,
    /// 0 is the synthetic "all categories" row; real categories follow.
    pub selected_index: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl FilterModalState {
    pub fn new() -> Self {
        Self {
            show_modal: false,
            categories: Vec::new(),
            selected_index: 0,
            loading: false,
            error: None,
        }
    }

    pub fn selected_category_id(&self) -> Option<&str> {
        if self.selected_index == 0 {
            None
        } else {
            self.categories
                .get(self.selected_index - 1)
                .map(|c| c.id.as_str())
        }
    }
}

/// Comments view of one artwork, opened over the feed
pub struct CommentsViewState {
    pub thread: CommentThread,
    pub selected_index: usize,
}

/// Feed tab state
pub struct FeedState {
    pub feed: FeedSync,
    pub list_state: ListState,
    pub message: Option<(String, Instant)>, // auto-clears after 3 seconds
    /// Flag to trigger actual load after UI renders loading state
    pub pending_load: bool,
    pub pending_reset: bool,
    pub filter_modal: FilterModalState,
    /// Artwork awaiting delete confirmation
    pub confirm_delete: Option<String>,
    /// Artwork whose comment box currently captures typing
    pub comment_focus: Option<String>,
    pub comments_view: Option<CommentsViewState>,
}

impl FeedState {
    pub fn new(page_size: u32) -> Self {
        Self {
            feed: FeedSync::new(page_size),
            list_state: ListState::default(),
            message: None,
            pending_load: false,
            pending_reset: false,
            filter_modal: FilterModalState::new(),
            confirm_delete: None,
            comment_focus: None,
            comments_view: None,
        }
    }

    pub fn selected_artwork_id(&self) -> Option<String> {
        let index = self.list_state.selected()?;
        self.feed.get(index).map(|v| v.artwork.id.clone())
    }

    /// Queue a fetch; the actual request runs after the next render so the
    /// loading indicator is visible first.
    pub fn request_load(&mut self, reset: bool) {
        self.pending_load = true;
        self.pending_reset = self.pending_reset || reset;
    }
}

/// Category management tab state (admin CRUD, read-only for everyone else)
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    pub editor: Option<CategoryEditor>,
    pub confirm_delete: Option<String>,
}

/// In-progress category create or rename
pub struct CategoryEditor {
    pub category_id: Option<String>,
    pub name_input: String,
}

impl CategoriesState {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            list_state: ListState::default(),
            loading: false,
            error: None,
            editor: None,
            confirm_delete: None,
        }
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.list_state.selected().and_then(|i| self.categories.get(i))
    }
}

/// Profile tab state: the viewed profile plus that user's artwork feed
pub struct ProfileState {
    pub username: Option<String>,
    pub profile: Option<UserProfile>,
    pub feed: FeedSync,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    pub editor: Option<ProfileEditor>,
}

/// In-progress edit of the session user's own profile
pub struct ProfileEditor {
    pub bio_input: String,
    pub photo_path_input: String,
    pub focused_field: ProfileEditorField,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileEditorField {
    Bio,
    PhotoPath,
}

impl ProfileEditor {
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            ProfileEditorField::Bio => ProfileEditorField::PhotoPath,
            ProfileEditorField::PhotoPath => ProfileEditorField::Bio,
        };
    }
}

impl ProfileState {
    pub fn new(page_size: u32) -> Self {
        Self {
            username: None,
            profile: None,
            feed: FeedSync::new(page_size),
            list_state: ListState::default(),
            loading: false,
            error: None,
            editor: None,
        }
    }

    /// Whether the viewed profile belongs to the session user
    pub fn is_own_profile(&self, session_name: Option<&str>) -> bool {
        match (&self.profile, session_name) {
            (Some(profile), Some(name)) => profile.username == name,
            _ => false,
        }
    }
}

/// User search modal state
pub struct UserSearchState {
    pub show_modal: bool,
    pub query: String,
    pub results: Vec<UserSearchResult>,
    pub selected_index: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserSearchState {
    pub fn new() -> Self {
        Self {
            show_modal: false,
            query: String::new(),
            results: Vec::new(),
            selected_index: 0,
            loading: false,
            error: None,
        }
    }

    pub fn selected_result(&self) -> Option<&UserSearchResult> {
        self.results.get(self.selected_index)
    }

    pub fn close(&mut self) {
        self.show_modal = false;
        self.query.clear();
        self.results.clear();
        self.selected_index = 0;
        self.error = None;
    }
}

/// Main application state
pub struct App {
    pub running: bool,
    pub current_screen: Screen,
    pub current_tab: Tab,
    pub api_client: ApiClient,
    pub session: SessionManager,
    pub auth_state: AuthState,
    pub feed_state: FeedState,
    pub categories_state: CategoriesState,
    pub profile_state: ProfileState,
    pub composer_state: ComposerState,
    pub user_search_state: UserSearchState,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub page_size: u32,
}
