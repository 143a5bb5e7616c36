mod announce;
mod api;
mod app;
mod config;
mod feed;
mod logging;
mod media;
mod session;
mod storage;
mod terminal;
mod ui;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use announce::NewPostChannel;
use api::ApiClient;
use app::{App, ComposerField, ComposerMode, InputMode, Screen, Tab};
use session::SessionManager;
use storage::TokenStore;

/// Inspira - a terminal client for the Inspira art community
#[derive(Parser)]
#[command(name = "inspira")]
#[command(about = "A terminal-based social network for artists")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "INSPIRA_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

/// Resolution order: command line, then the saved config file, then the
/// built-in default.
fn determine_server_url(cli_server: Option<String>, config: &config::ConfigManager) -> String {
    if let Some(url) = cli_server {
        return url;
    }
    match config.load_server_config() {
        Ok(Some(saved)) => saved.server_url,
        _ => config::ServerConfig::default().server_url,
    }
}

fn page_size_from_config(config: &config::ConfigManager) -> u32 {
    match config.load_server_config() {
        Ok(Some(saved)) if saved.page_size > 0 => saved.page_size,
        _ => feed::DEFAULT_PAGE_SIZE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from a .env file, if present
    let _ = dotenv::dotenv();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let config_manager = config::ConfigManager::new()?;
    let server_url = determine_server_url(cli.server, &config_manager);
    let page_size = page_size_from_config(&config_manager);
    log::info!("Connecting to {server_url}");

    let mut api_client = ApiClient::new(server_url);
    let session = SessionManager::new(TokenStore::new()?);

    // Startup decode of any persisted token.
    let restored = session.restore();
    if let Some(token) = &restored {
        api_client.set_bearer_token(Some(token.clone()));
    }

    let mut app = App::new(api_client, session, page_size);
    if restored.is_some() {
        app.current_screen = Screen::Main;
        app.feed_state.request_load(true);
    } else {
        log::info!("No valid session found, showing authentication screen");
    }

    let new_posts = NewPostChannel::new();
    let mut new_post_rx = new_posts.subscribe();

    let mut tui = terminal::init()?;

    let mut last_tab = app.current_tab;
    let mut last_search_query = String::new();

    while app.running {
        app.enforce_session();
        app.clear_expired_messages();
        app.drain_new_posts(&mut new_post_rx);

        // Tab switches load their data lazily.
        if app.current_tab != last_tab {
            match app.current_tab {
                Tab::Categories => app.load_categories_tab().await?,
                Tab::Profile => {
                    if app.profile_state.profile.is_none() {
                        app.load_profile(None).await?;
                    }
                }
                Tab::Feed => {}
            }
            last_tab = app.current_tab;
        }

        // Re-run the user search whenever the query changes.
        if app.user_search_state.show_modal {
            if app.user_search_state.query != last_search_query {
                last_search_query = app.user_search_state.query.clone();
                app.search_users().await?;
            }
        } else {
            last_search_query.clear();
        }

        tui.draw(|frame| ui::render(&mut app, frame))?;

        // Queued fetches run after the loading state has been rendered once.
        app.perform_pending_load().await?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            // Keyboard-only navigation
            if matches!(event, Event::Mouse(_)) {
                continue;
            }

            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Enter if app.current_screen == Screen::Auth => {
                        app.submit_auth().await?;
                    }
                    KeyCode::Enter if app.composer_state.is_open() => {
                        let attaching = app.composer_state.focused_field
                            == ComposerField::MediaPath
                            && matches!(app.composer_state.mode, Some(ComposerMode::NewArtwork));
                        if attaching {
                            app.attach_composer_media();
                        } else {
                            app.submit_composer(&new_posts).await?;
                        }
                    }
                    KeyCode::Enter if app.feed_state.comment_focus.is_some() => {
                        app.submit_focused_comment().await?;
                    }
                    KeyCode::Enter if app.categories_state.editor.is_some() => {
                        app.submit_category_editor().await?;
                    }
                    KeyCode::Enter if app.profile_state.editor.is_some() => {
                        app.submit_profile_editor().await?;
                    }
                    KeyCode::Enter if app.user_search_state.show_modal => {
                        app.open_searched_profile().await?;
                    }
                    KeyCode::Char('v') if feed_navigation_active(&app) => {
                        app.open_comments_for_selected().await?;
                    }
                    KeyCode::Char('d') if app.feed_state.comments_view.is_some() => {
                        app.delete_selected_comment().await?;
                    }
                    KeyCode::Char('y') | KeyCode::Char('Y')
                        if app.feed_state.confirm_delete.is_some() =>
                    {
                        app.confirm_delete().await?;
                    }
                    KeyCode::Char('y') | KeyCode::Char('Y')
                        if app.categories_state.confirm_delete.is_some() =>
                    {
                        app.confirm_delete_category().await?;
                    }
                    KeyCode::Char('l')
                        if feed_navigation_active(&app)
                            && !key.modifiers.contains(KeyModifiers::SHIFT) =>
                    {
                        app.toggle_like_selected().await?;
                    }
                    KeyCode::Char('n') if feed_navigation_active(&app) => {
                        app.open_composer().await?;
                    }
                    KeyCode::Char('e') if feed_navigation_active(&app) => {
                        app.open_editor_for_selected().await?;
                    }
                    KeyCode::Char('f') if feed_navigation_active(&app) => {
                        app.open_filter_modal().await?;
                    }
                    KeyCode::Char('s') if main_navigation_active(&app) => {
                        app.user_search_state.show_modal = true;
                    }
                    KeyCode::Char('F')
                        if main_navigation_active(&app) && app.current_tab == Tab::Profile =>
                    {
                        app.toggle_follow_profile().await?;
                    }
                    KeyCode::Char('L') if app.current_screen == Screen::Main => {
                        app.logout();
                    }
                    _ => {
                        app.handle_key_event(key)?;
                    }
                }
            }
        }
    }

    terminal::restore()?;
    Ok(())
}

/// True when keystrokes on the feed tab should act as shortcuts rather than
/// text input.
fn feed_navigation_active(app: &App) -> bool {
    app.current_screen == Screen::Main
        && app.current_tab == Tab::Feed
        && main_navigation_active(app)
}

fn main_navigation_active(app: &App) -> bool {
    app.current_screen == Screen::Main
        && app.input_mode == InputMode::Navigation
        && !app.composer_state.is_open()
        && app.feed_state.comments_view.is_none()
        && !app.feed_state.filter_modal.show_modal
        && !app.user_search_state.show_modal
        && app.feed_state.confirm_delete.is_none()
        && app.categories_state.confirm_delete.is_none()
        && app.categories_state.editor.is_none()
        && app.profile_state.editor.is_none()
        && !app.show_help
}
