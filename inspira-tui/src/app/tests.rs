use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use super::*;
use crate::api::ApiClient;
use crate::feed::CommentThread;
use crate::session::SessionManager;
use crate::storage::TokenStore;
use inspira_types::{Artwork, Claims, Page};

fn make_token(name: &str, role: &str, exp: i64) -> String {
    let payload = serde_json::json!({
        "sub": "u-1",
        "email": "user@example.com",
        "name": name,
        Claims::role_claim_key(): role,
        "exp": exp,
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.sig")
}

fn artwork(id: &str, author: &str) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: format!("title-{id}"),
        description: String::new(),
        published_at: "2026-01-01T00:00:00Z".to_string(),
        author_username: author.to_string(),
        category_name: "Pintura".to_string(),
        url: None,
        media_content_type: Some("image/png".to_string()),
        total_likes: 0,
        liked_by_user: false,
    }
}

fn page(items: Vec<Artwork>, has_more: bool) -> Page<Artwork> {
    Page {
        items,
        next_cursor: has_more.then(|| "c".to_string()),
        has_more_items: has_more,
    }
}

/// App wired to a temp token store; no request ever leaves these tests.
fn test_app(temp: &TempDir) -> App {
    let store = TokenStore::with_path(temp.path().join("token"));
    let session = SessionManager::new(store);
    App::new(ApiClient::new("http://localhost:8000/api"), session, 10)
}

fn logged_in_app(temp: &TempDir, name: &str, role: &str) -> (App, Arc<AtomicI64>) {
    let store = TokenStore::with_path(temp.path().join("token"));
    store.save(&make_token(name, role, 10_000)).unwrap();
    let now = Arc::new(AtomicI64::new(1_000));
    let clock = Arc::clone(&now);
    let session = SessionManager::with_clock(
        store,
        Arc::new(move || clock.load(Ordering::SeqCst)),
    );
    session.restore();
    let mut app = App::new(ApiClient::new("http://localhost:8000/api"), session, 10);
    app.current_screen = Screen::Main;
    (app, now)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn tabs_cycle_in_both_directions() {
    assert_eq!(Tab::Feed.next(), Tab::Categories);
    assert_eq!(Tab::Profile.next(), Tab::Feed);
    assert_eq!(Tab::Feed.previous(), Tab::Profile);
}

#[test]
fn auth_form_typing_lands_in_the_focused_field() {
    let temp = TempDir::new().unwrap();
    let mut app = test_app(&temp);

    app.handle_key_event(key(KeyCode::Char('l'))).unwrap();
    app.handle_key_event(key(KeyCode::Char('i'))).unwrap();
    app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
    assert_eq!(app.auth_state.username_input, "lia");

    app.handle_key_event(key(KeyCode::Tab)).unwrap();
    app.handle_key_event(key(KeyCode::Char('p'))).unwrap();
    app.handle_key_event(key(KeyCode::Backspace)).unwrap();
    app.handle_key_event(key(KeyCode::Char('x'))).unwrap();
    assert_eq!(app.auth_state.password_input, "x");

    // Login form only cycles between the two fields.
    app.handle_key_event(key(KeyCode::Tab)).unwrap();
    assert_eq!(app.auth_state.selected_field, AuthField::Username);
}

#[test]
fn ctrl_r_switches_between_login_and_register() {
    let temp = TempDir::new().unwrap();
    let mut app = test_app(&temp);

    let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
    app.handle_key_event(ctrl_r).unwrap();
    assert_eq!(app.auth_state.mode, AuthMode::Register);
    assert_eq!(app.auth_state.selected_field, AuthField::CompleteName);

    // The register form has five fields, with the role picker last.
    for _ in 0..4 {
        app.handle_key_event(key(KeyCode::Tab)).unwrap();
    }
    assert_eq!(app.auth_state.selected_field, AuthField::Role);

    app.handle_key_event(key(KeyCode::Right)).unwrap();
    assert_eq!(app.auth_state.role_selection, inspira_types::Role::Artista);
}

#[test]
fn reaching_the_feed_tail_queues_the_next_page() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "rui"), artwork("b", "rui")], true), None);
    app.feed_state.list_state.select(Some(0));

    app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
    assert!(app.feed_state.pending_load);
    assert!(!app.feed_state.pending_reset);
}

#[test]
fn exhausted_feed_does_not_queue_on_tail() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "rui")], false), None);
    app.feed_state.list_state.select(Some(0));

    app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
    assert!(!app.feed_state.pending_load);
}

#[test]
fn delete_request_requires_permission() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");
    let claims = app.claims();

    app.feed_state.feed.begin_load(true);
    let someone_elses = page(vec![artwork("a", "rui")], false);
    app.feed_state.feed.apply_page(someone_elses, claims.as_ref());
    app.feed_state.list_state.select(Some(0));

    app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
    assert!(app.feed_state.confirm_delete.is_none());
}

#[test]
fn delete_request_on_own_artwork_asks_for_confirmation() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");
    let claims = app.claims();

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "lia")], false), claims.as_ref());
    app.feed_state.list_state.select(Some(0));

    app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
    assert_eq!(app.feed_state.confirm_delete.as_deref(), Some("a"));

    // Esc cancels without touching the list.
    app.handle_key_event(key(KeyCode::Esc)).unwrap();
    assert!(app.feed_state.confirm_delete.is_none());
    assert_eq!(app.feed_state.feed.len(), 1);
}

#[test]
fn comment_box_captures_typing_until_closed() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "rui")], false), None);
    app.feed_state.list_state.select(Some(0));

    app.handle_key_event(key(KeyCode::Char('c'))).unwrap();
    assert_eq!(app.input_mode, InputMode::Typing);

    // 'j' now types into the draft instead of moving the selection.
    app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
    app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
    assert_eq!(app.feed_state.feed.comment_draft("a").unwrap().text, "ja");
    assert_eq!(app.feed_state.list_state.selected(), Some(0));

    app.handle_key_event(key(KeyCode::Esc)).unwrap();
    assert_eq!(app.input_mode, InputMode::Navigation);
    assert!(!app.feed_state.feed.comment_draft("a").unwrap().open);
}

fn comment(id: &str, author: &str) -> inspira_types::Comment {
    inspira_types::Comment {
        id: id.to_string(),
        content: format!("comentário {id}"),
        commented_at: "2026-01-01T00:00:00Z".to_string(),
        author_username: author.to_string(),
        artwork_id: "a".to_string(),
        author_photo_url: None,
    }
}

#[test]
fn comments_view_captures_navigation_until_closed() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "rui")], false), None);
    app.feed_state.list_state.select(Some(0));

    let mut thread = CommentThread::new("a");
    thread.apply(vec![comment("c1", "rui"), comment("c2", "ana")]);
    app.feed_state.comments_view = Some(CommentsViewState {
        thread,
        selected_index: 0,
    });

    // j/k move inside the thread, not the feed list.
    app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
    assert_eq!(app.feed_state.comments_view.as_ref().unwrap().selected_index, 1);
    app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
    assert_eq!(app.feed_state.comments_view.as_ref().unwrap().selected_index, 1);
    app.handle_key_event(key(KeyCode::Char('k'))).unwrap();
    assert_eq!(app.feed_state.comments_view.as_ref().unwrap().selected_index, 0);
    assert_eq!(app.feed_state.list_state.selected(), Some(0));

    // 'd' never reaches the artwork delete shortcut while the view is open.
    app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
    assert!(app.feed_state.confirm_delete.is_none());

    app.handle_key_event(key(KeyCode::Esc)).unwrap();
    assert!(app.feed_state.comments_view.is_none());
}

#[test]
fn apply_filter_restarts_the_feed_under_the_new_category() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.filter_modal.show_modal = true;
    app.feed_state.filter_modal.categories = vec![inspira_types::Category {
        id: "cat-1".to_string(),
        name: "Pintura".to_string(),
        description: String::new(),
    }];
    app.feed_state.filter_modal.selected_index = 1;

    app.apply_filter();

    assert!(!app.feed_state.filter_modal.show_modal);
    assert_eq!(app.feed_state.feed.category_id(), Some("cat-1"));
    assert!(app.feed_state.pending_load);
    assert!(app.feed_state.pending_reset);
}

#[test]
fn expired_session_drops_back_to_auth() {
    let temp = TempDir::new().unwrap();
    let (mut app, now) = logged_in_app(&temp, "lia", "Comum");
    assert_eq!(app.current_screen, Screen::Main);

    now.store(20_000, Ordering::SeqCst);
    app.enforce_session();

    assert_eq!(app.current_screen, Screen::Auth);
    assert!(app.claims().is_none());
}

#[tokio::test]
async fn announced_posts_are_prepended_via_the_channel() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Artista");

    let channel = crate::announce::NewPostChannel::new();
    let mut rx = channel.subscribe();

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("old", "rui")], false), None);

    channel.announce(artwork("fresh", "lia"));
    app.drain_new_posts(&mut rx);

    assert_eq!(app.feed_state.feed.get(0).unwrap().artwork.id, "fresh");
    assert_eq!(app.feed_state.feed.len(), 2);
}

#[test]
fn composer_edit_mode_skips_the_media_field() {
    let temp = TempDir::new().unwrap();
    let mut app = test_app(&temp);

    app.composer_state.mode = Some(ComposerMode::EditArtwork {
        artwork_id: "a".to_string(),
    });
    app.composer_state.focused_field = ComposerField::Category;
    app.composer_state.next_field();
    assert_eq!(app.composer_state.focused_field, ComposerField::Title);

    app.composer_state.mode = Some(ComposerMode::NewArtwork);
    app.composer_state.focused_field = ComposerField::Category;
    app.composer_state.next_field();
    assert_eq!(app.composer_state.focused_field, ComposerField::MediaPath);
}

#[test]
fn category_admin_keys_are_ignored_for_regular_users() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");
    app.current_tab = Tab::Categories;

    app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
    assert!(app.categories_state.editor.is_none());
}

#[test]
fn category_admin_keys_open_the_editor_for_admins() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "mod", "Administrador");
    app.current_tab = Tab::Categories;

    app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
    let editor = app.categories_state.editor.as_ref().unwrap();
    assert!(editor.category_id.is_none());
    assert_eq!(app.input_mode, InputMode::Typing);
}

fn profile(username: &str) -> inspira_types::UserProfile {
    inspira_types::UserProfile {
        id: "u-9".to_string(),
        username: username.to_string(),
        full_name: "Lia Prado".to_string(),
        bio: Some("pintora".to_string()),
        photo_url: None,
        follower_count: 3,
        following_count: 1,
        followed_by_current_user: false,
        main_category_id: None,
        main_category_name: None,
        portfolio_url: None,
        linkedin_url: None,
        instagram_url: None,
    }
}

#[test]
fn profile_editor_opens_only_on_the_own_profile() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Artista");
    app.current_tab = Tab::Profile;

    // Someone else's profile: 'e' does nothing.
    app.profile_state.profile = Some(profile("rui"));
    app.handle_key_event(key(KeyCode::Char('e'))).unwrap();
    assert!(app.profile_state.editor.is_none());

    // Own profile: the editor opens pre-filled with the current bio.
    app.profile_state.profile = Some(profile("lia"));
    app.handle_key_event(key(KeyCode::Char('e'))).unwrap();
    let editor = app.profile_state.editor.as_ref().unwrap();
    assert_eq!(editor.bio_input, "pintora");
    assert_eq!(app.input_mode, InputMode::Typing);
}

#[test]
fn recent_messages_survive_the_expiry_sweep() {
    let temp = TempDir::new().unwrap();
    let mut app = test_app(&temp);

    app.set_message("Obra publicada");
    app.clear_expired_messages();
    assert!(app.feed_state.message.is_some());
}

#[test]
fn logout_resets_every_screen_state() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = logged_in_app(&temp, "lia", "Comum");

    app.feed_state.feed.begin_load(true);
    app.feed_state
        .feed
        .apply_page(page(vec![artwork("a", "rui")], false), None);
    app.show_help = false;
    app.logout();

    assert_eq!(app.current_screen, Screen::Auth);
    assert!(app.feed_state.feed.is_empty());
    assert!(app.claims().is_none());
    assert!(!app.session.is_authenticated());
}
