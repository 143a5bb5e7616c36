use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::state::{App, AuthField, ComposerField, InputMode, Screen, Tab};

/// Synchronous key routing. Keys that trigger server calls are matched in the
/// main loop before this runs; everything here only mutates local state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    // Priority 1: Help modal
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Ok(());
    }

    // Priority 2: Auth screen
    if app.current_screen == Screen::Auth {
        return handle_auth_keys(app, key);
    }

    // Priority 3: Composer modal
    if app.composer_state.is_open() {
        return handle_composer_keys(app, key);
    }

    // Priority 4: Comments view
    if app.feed_state.comments_view.is_some() {
        return handle_comments_view_keys(app, key);
    }

    // Priority 5: Category filter modal
    if app.feed_state.filter_modal.show_modal {
        return handle_filter_modal_keys(app, key);
    }

    // Priority 6: User search modal
    if app.user_search_state.show_modal {
        return handle_user_search_keys(app, key);
    }

    // Priority 7: Delete confirmations
    if app.feed_state.confirm_delete.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N')) {
            app.feed_state.confirm_delete = None;
        }
        return Ok(());
    }
    if app.categories_state.confirm_delete.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N')) {
            app.categories_state.confirm_delete = None;
        }
        return Ok(());
    }

    // Priority 8: Open comment box captures typing
    if app.input_mode == InputMode::Typing && app.feed_state.comment_focus.is_some() {
        return handle_comment_keys(app, key);
    }

    // Priority 9: Category editor captures typing
    if app.categories_state.editor.is_some() {
        return handle_category_editor_keys(app, key);
    }

    // Priority 10: Profile editor captures typing
    if app.profile_state.editor.is_some() {
        return handle_profile_editor_keys(app, key);
    }

    handle_navigation_keys(app, key)
}

fn handle_auth_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.auth_state.next_field();
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.auth_state.switch_mode();
        }
        KeyCode::Left | KeyCode::Right if app.auth_state.selected_field == AuthField::Role => {
            app.auth_state.cycle_role();
        }
        KeyCode::Backspace => {
            if let Some(input) = app.auth_state.current_input_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.auth_state.current_input_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_composer_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.close_composer();
            return Ok(());
        }
        KeyCode::Tab => {
            app.composer_state.next_field();
            return Ok(());
        }
        _ => {}
    }

    match app.composer_state.focused_field {
        ComposerField::Title => match key.code {
            KeyCode::Backspace => {
                app.composer_state.title_input.pop();
            }
            KeyCode::Char(c) => {
                app.composer_state.title_input.push(c);
            }
            _ => {}
        },
        ComposerField::Description => {
            app.composer_state.textarea.input(key);
        }
        ComposerField::Category => match key.code {
            KeyCode::Left | KeyCode::Up => {
                if app.composer_state.category_index > 0 {
                    app.composer_state.category_index -= 1;
                }
            }
            KeyCode::Right | KeyCode::Down => {
                let last = app.composer_state.categories.len().saturating_sub(1);
                if app.composer_state.category_index < last {
                    app.composer_state.category_index += 1;
                }
            }
            _ => {}
        },
        ComposerField::MediaPath => match key.code {
            KeyCode::Backspace => {
                app.composer_state.media_path_input.pop();
            }
            KeyCode::Char(c) => {
                app.composer_state.media_path_input.push(c);
            }
            _ => {}
        },
    }
    Ok(())
}

fn handle_comments_view_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(view) = &mut app.feed_state.comments_view else {
        return Ok(());
    };
    match key.code {
        KeyCode::Esc => {
            app.feed_state.comments_view = None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.selected_index = view.selected_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view.selected_index + 1 < view.thread.len() {
                view.selected_index += 1;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_filter_modal_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let modal = &mut app.feed_state.filter_modal;
    match key.code {
        KeyCode::Esc => {
            modal.show_modal = false;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            modal.selected_index = modal.selected_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            // Index 0 is the "all categories" row.
            if modal.selected_index < modal.categories.len() {
                modal.selected_index += 1;
            }
        }
        KeyCode::Enter => {
            app.apply_filter();
        }
        _ => {}
    }
    Ok(())
}

fn handle_user_search_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let search = &mut app.user_search_state;
    match key.code {
        KeyCode::Esc => {
            search.close();
        }
        KeyCode::Up => {
            search.selected_index = search.selected_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if search.selected_index + 1 < search.results.len() {
                search.selected_index += 1;
            }
        }
        KeyCode::Backspace => {
            search.query.pop();
        }
        KeyCode::Char(c) => {
            search.query.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_comment_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(artwork_id) = app.feed_state.comment_focus.clone() else {
        return Ok(());
    };
    match key.code {
        KeyCode::Esc => {
            app.toggle_comment_box_selected();
        }
        KeyCode::Backspace => {
            if let Some(draft) = app.feed_state.feed.comment_draft_mut(&artwork_id) {
                draft.text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(draft) = app.feed_state.feed.comment_draft_mut(&artwork_id) {
                draft.text.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_category_editor_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.categories_state.editor = None;
            app.input_mode = InputMode::Navigation;
        }
        KeyCode::Backspace => {
            if let Some(editor) = &mut app.categories_state.editor {
                editor.name_input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(editor) = &mut app.categories_state.editor {
                editor.name_input.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_navigation_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Tab => {
            app.current_tab = app.current_tab.next();
        }
        KeyCode::BackTab => {
            app.current_tab = app.current_tab.previous();
        }
        _ => match app.current_tab {
            Tab::Feed => handle_feed_nav_keys(app, key),
            Tab::Categories => handle_categories_nav_keys(app, key),
            Tab::Profile => handle_profile_nav_keys(app, key),
        },
    }
    Ok(())
}

fn handle_feed_nav_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('r') => app.feed_state.request_load(true),
        KeyCode::Char('c') => app.toggle_comment_box_selected(),
        KeyCode::Char('d') => app.request_delete_selected(),
        _ => {}
    }
}

fn handle_categories_nav_keys(app: &mut App, key: KeyEvent) {
    let state = &mut app.categories_state;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.categories.len();
            if len > 0 {
                let next = match state.list_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    Some(i) => i,
                    None => 0,
                };
                state.list_state.select(Some(next));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let previous = match state.list_state.selected() {
                Some(0) | None => 0,
                Some(i) => i - 1,
            };
            if !state.categories.is_empty() {
                state.list_state.select(Some(previous));
            }
        }
        KeyCode::Char('a') if app.session.claims().map(|c| c.role.is_admin()).unwrap_or(false) => {
            state.editor = Some(super::CategoryEditor {
                category_id: None,
                name_input: String::new(),
            });
            app.input_mode = InputMode::Typing;
        }
        KeyCode::Char('e') if app.session.claims().map(|c| c.role.is_admin()).unwrap_or(false) => {
            if let Some(category) = state.selected_category() {
                state.editor = Some(super::CategoryEditor {
                    category_id: Some(category.id.clone()),
                    name_input: category.name.clone(),
                });
                app.input_mode = InputMode::Typing;
            }
        }
        KeyCode::Char('d') if app.session.claims().map(|c| c.role.is_admin()).unwrap_or(false) => {
            if let Some(category) = state.selected_category() {
                state.confirm_delete = Some(category.id.clone());
            }
        }
        _ => {}
    }
}

fn handle_profile_editor_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(editor) = &mut app.profile_state.editor else {
        return Ok(());
    };
    match key.code {
        KeyCode::Esc => {
            app.profile_state.editor = None;
            app.input_mode = InputMode::Navigation;
        }
        KeyCode::Tab => editor.next_field(),
        KeyCode::Backspace => {
            match editor.focused_field {
                super::ProfileEditorField::Bio => editor.bio_input.pop(),
                super::ProfileEditorField::PhotoPath => editor.photo_path_input.pop(),
            };
        }
        KeyCode::Char(c) => match editor.focused_field {
            super::ProfileEditorField::Bio => editor.bio_input.push(c),
            super::ProfileEditorField::PhotoPath => editor.photo_path_input.push(c),
        },
        _ => {}
    }
    Ok(())
}

fn handle_profile_nav_keys(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('e') {
        app.open_profile_editor();
        return;
    }
    let state = &mut app.profile_state;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.feed.len();
            if len > 0 {
                let next = match state.list_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    Some(i) => i,
                    None => 0,
                };
                state.list_state.select(Some(next));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if !state.feed.is_empty() {
                let previous = match state.list_state.selected() {
                    Some(0) | None => 0,
                    Some(i) => i - 1,
                };
                state.list_state.select(Some(previous));
            }
        }
        _ => {}
    }
}
