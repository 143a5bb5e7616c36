use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{
    App, AuthField, AuthMode, ComposerField, ComposerMode, Screen, Tab,
};
use crate::feed::ArtworkView;
use crate::media::MediaKind;

pub struct ThemeColors {
    pub primary: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Single fixed theme: dark with warm accents, matching the web palette
pub fn theme() -> ThemeColors {
    ThemeColors {
        primary: Color::Rgb(240, 140, 70),
        text: Color::Rgb(225, 225, 225),
        text_dim: Color::Rgb(130, 130, 130),
        background: Color::Rgb(22, 20, 25),
        border: Color::Rgb(70, 65, 75),
        success: Color::Rgb(120, 220, 130),
        error: Color::Rgb(250, 95, 95),
        highlight_bg: Color::Rgb(50, 42, 55),
    }
}

/// Render the UI
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = theme();

    frame.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    frame.render_widget(background, area);

    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal muito pequeno",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Mínimo: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                Style::default().fg(theme.text),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(warning, area);
        return;
    }

    match app.current_screen {
        Screen::Auth => render_auth_screen(frame, app, &theme),
        Screen::Main => render_main_screen(frame, app, &theme),
    }

    if app.show_help {
        render_help_modal(frame, app, &theme);
    }
}

fn render_auth_screen(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.auth_state.mode {
        AuthMode::Login => " Inspira — Entrar ",
        AuthMode::Register => " Inspira — Criar conta ",
    };

    let field_line = |label: &str, value: &str, field: AuthField, masked: bool| {
        let focused = app.auth_state.selected_field == field;
        let shown = if masked {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let style = if focused {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(vec![
            Span::styled(format!("{label:<15}"), Style::default().fg(theme.text_dim)),
            Span::styled(shown, style),
            Span::styled(if focused { "▏" } else { "" }, style),
        ])
    };

    let mut lines = vec![Line::from("")];
    if app.auth_state.mode == AuthMode::Register {
        lines.push(field_line(
            "Nome completo",
            &app.auth_state.complete_name_input,
            AuthField::CompleteName,
            false,
        ));
    }
    lines.push(field_line(
        "Usuário",
        &app.auth_state.username_input,
        AuthField::Username,
        false,
    ));
    if app.auth_state.mode == AuthMode::Register {
        lines.push(field_line(
            "Email",
            &app.auth_state.email_input,
            AuthField::Email,
            false,
        ));
    }
    lines.push(field_line(
        "Senha",
        &app.auth_state.password_input,
        AuthField::Password,
        true,
    ));
    if app.auth_state.mode == AuthMode::Register {
        let focused = app.auth_state.selected_field == AuthField::Role;
        let style = if focused {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled("Perfil         ", Style::default().fg(theme.text_dim)),
            Span::styled(format!("◂ {} ▸", app.auth_state.role_selection.as_str()), style),
        ]));
    }

    lines.push(Line::from(""));
    if app.auth_state.loading {
        lines.push(Line::from(Span::styled(
            "Autenticando...",
            Style::default().fg(theme.text_dim),
        )));
    }
    if let Some(error) = &app.auth_state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    if let Some(info) = &app.auth_state.info {
        lines.push(Line::from(Span::styled(
            info.clone(),
            Style::default().fg(theme.success),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab: próximo campo · Enter: enviar · Ctrl+R: login/cadastro · Esc: sair",
        Style::default().fg(theme.text_dim),
    )));

    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(form, area);
}

fn render_main_screen(frame: &mut Frame, app: &mut App, theme: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tab_bar(frame, app, theme, chunks[0]);

    match app.current_tab {
        Tab::Feed => render_feed_tab(frame, app, theme, chunks[1]),
        Tab::Categories => render_categories_tab(frame, app, theme, chunks[1]),
        Tab::Profile => render_profile_tab(frame, app, theme, chunks[1]),
    }

    render_status_line(frame, app, theme, chunks[2]);

    if app.feed_state.filter_modal.show_modal {
        render_filter_modal(frame, app, theme);
    }
    if app.user_search_state.show_modal {
        render_user_search_modal(frame, app, theme);
    }
    if app.composer_state.is_open() {
        render_composer(frame, app, theme);
    }
    if app.feed_state.comments_view.is_some() {
        render_comments_modal(frame, app, theme);
    }
    if app.feed_state.confirm_delete.is_some() {
        render_confirm_modal(frame, theme, "Excluir esta obra? (y/n)");
    }
    if app.categories_state.confirm_delete.is_some() {
        render_confirm_modal(frame, theme, "Excluir esta categoria? (y/n)");
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
    let tab_span = |label: &str, tab: Tab| {
        if app.current_tab == tab {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(theme.text_dim))
        }
    };

    let user = app
        .claims()
        .map(|c| c.name)
        .unwrap_or_else(|| "anônimo".to_string());

    let bar = Paragraph::new(Line::from(vec![
        tab_span("Feed", Tab::Feed),
        Span::raw("·"),
        tab_span("Categorias", Tab::Categories),
        Span::raw("·"),
        tab_span("Perfil", Tab::Profile),
        Span::styled(
            format!("   @{user}"),
            Style::default().fg(theme.text_dim),
        ),
    ]))
    .block(
        Block::default()
            .title(" Inspira ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(bar, area);
}

fn artwork_list_item<'a>(view: &'a ArtworkView, theme: &ThemeColors) -> ListItem<'a> {
    let like_marker = if view.artwork.liked_by_user { "♥" } else { "♡" };
    let media_tag = match view.media_kind {
        MediaKind::Image => "[img]",
        MediaKind::Video => "[vid]",
        MediaKind::Audio => "[aud]",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                view.artwork.title.as_str(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {media_tag}"),
                Style::default().fg(theme.text_dim),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("@{} · {}", view.artwork.author_username, view.artwork.category_name),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled(
                format!("  {like_marker} {}", view.artwork.total_likes),
                Style::default().fg(theme.primary),
            ),
        ]),
    ];
    if !view.artwork.description.is_empty() {
        lines.push(Line::from(Span::styled(
            view.artwork.description.as_str(),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn render_feed_tab(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
    let comment_open = app
        .feed_state
        .comment_focus
        .as_deref()
        .and_then(|id| app.feed_state.feed.comment_draft(id))
        .map(|d| d.text.clone());

    let (list_area, comment_area) = if comment_open.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);
        (split[0], Some(split[1]))
    } else {
        (area, None)
    };

    let mut items: Vec<ListItem> = app
        .feed_state
        .feed
        .items()
        .iter()
        .map(|view| artwork_list_item(view, theme))
        .collect();

    if app.feed_state.feed.is_loading() {
        items.push(ListItem::new(Line::from(Span::styled(
            "Carregando...",
            Style::default().fg(theme.text_dim),
        ))));
    } else if !app.feed_state.feed.has_more() && !app.feed_state.feed.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "— fim do feed —",
            Style::default().fg(theme.text_dim),
        ))));
    }

    let title = match app.feed_state.feed.category_id() {
        Some(_) => " Feed (filtrado) ",
        None => " Feed ",
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, list_area, &mut app.feed_state.list_state);

    if let (Some(comment_area), Some(text)) = (comment_area, comment_open) {
        let input = Paragraph::new(Line::from(vec![
            Span::styled(text, Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.primary)),
        ]))
        .block(
            Block::default()
                .title(" Comentário (Enter envia, Esc fecha) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        frame.render_widget(input, comment_area);
    }
}

fn render_categories_tab(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
    let items: Vec<ListItem> = app
        .categories_state
        .categories
        .iter()
        .map(|c| ListItem::new(Line::from(Span::styled(c.name.clone(), Style::default().fg(theme.text)))))
        .collect();

    let title = if app.is_admin() {
        " Categorias (a: nova · e: renomear · d: excluir) "
    } else {
        " Categorias "
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, area, &mut app.categories_state.list_state);

    if let Some(editor) = &app.categories_state.editor {
        let modal = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, modal);
        let title = if editor.category_id.is_some() {
            " Renomear categoria "
        } else {
            " Nova categoria "
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(editor.name_input.clone(), Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.primary)),
        ]))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        frame.render_widget(input, modal);
    }

    if let Some(error) = &app.categories_state.error {
        render_error_line(frame, theme, area, error);
    }
}

fn render_profile_tab(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let header = if let Some(profile) = &app.profile_state.profile {
        let follow_hint = if profile.followed_by_current_user {
            "F: deixar de seguir"
        } else {
            "F: seguir"
        };
        vec![
            Line::from(Span::styled(
                format!("@{} — {}", profile.username, profile.full_name),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                profile.bio.clone().unwrap_or_default(),
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled(
                format!(
                    "{} seguidores · {} seguindo",
                    profile.follower_count, profile.following_count
                ),
                Style::default().fg(theme.text_dim),
            )),
            Line::from(Span::styled(follow_hint, Style::default().fg(theme.text_dim))),
        ]
    } else if app.profile_state.loading {
        vec![Line::from(Span::styled(
            "Carregando perfil...",
            Style::default().fg(theme.text_dim),
        ))]
    } else {
        vec![Line::from(Span::styled(
            "Nenhum perfil carregado (s: buscar usuários)",
            Style::default().fg(theme.text_dim),
        ))]
    };

    let header = Paragraph::new(header).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Perfil ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .profile_state
        .feed
        .items()
        .iter()
        .map(|view| artwork_list_item(view, theme))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Obras ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, chunks[1], &mut app.profile_state.list_state);

    if let Some(editor) = &app.profile_state.editor {
        let modal = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, modal);
        let focus = |field: crate::app::ProfileEditorField| {
            if editor.focused_field == field {
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            }
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Bio:  ", Style::default().fg(theme.text_dim)),
                Span::styled(
                    editor.bio_input.clone(),
                    focus(crate::app::ProfileEditorField::Bio),
                ),
            ]),
            Line::from(vec![
                Span::styled("Foto: ", Style::default().fg(theme.text_dim)),
                Span::styled(
                    editor.photo_path_input.clone(),
                    focus(crate::app::ProfileEditorField::PhotoPath),
                ),
            ]),
        ];
        if let Some(error) = &editor.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Tab: alternar campo · Enter: salvar · Esc: cancelar",
            Style::default().fg(theme.text_dim),
        )));
        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Editar perfil ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        frame.render_widget(body, modal);
    }

    if let Some(error) = &app.profile_state.error {
        render_error_line(frame, theme, area, error);
    }
}

fn render_status_line(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
    let line = if let Some((message, _)) = &app.feed_state.message {
        Line::from(Span::styled(message.clone(), Style::default().fg(theme.success)))
    } else {
        Line::from(Span::styled(
            "j/k: navegar · l: curtir · c: comentar · n: publicar · f: filtrar · s: buscar · ?: ajuda · q: sair",
            Style::default().fg(theme.text_dim),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_filter_modal(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(40, 60, frame.area());
    frame.render_widget(Clear, area);

    let modal = &app.feed_state.filter_modal;
    let mut lines = Vec::new();

    let row = |label: String, selected: bool| {
        let style = if selected {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(Span::styled(label, style))
    };

    lines.push(row("Todas as categorias".to_string(), modal.selected_index == 0));
    for (i, category) in modal.categories.iter().enumerate() {
        lines.push(row(category.name.clone(), modal.selected_index == i + 1));
    }
    if modal.loading {
        lines.push(Line::from(Span::styled(
            "Carregando...",
            Style::default().fg(theme.text_dim),
        )));
    }
    if let Some(error) = &modal.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(" Filtrar por categoria ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    frame.render_widget(body, area);
}

fn render_user_search_modal(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let search = &app.user_search_state;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Buscar: ", Style::default().fg(theme.text_dim)),
            Span::styled(search.query.clone(), Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.primary)),
        ]),
        Line::from(""),
    ];
    for (i, result) in search.results.iter().enumerate() {
        let style = if i == search.selected_index {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(format!("@{}", result.username), style)));
    }
    if search.loading {
        lines.push(Line::from(Span::styled(
            "Buscando...",
            Style::default().fg(theme.text_dim),
        )));
    }

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(" Buscar usuários (Enter abre o perfil) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    frame.render_widget(body, area);
}

fn render_comments_modal(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let Some(view) = &app.feed_state.comments_view else {
        return;
    };
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    if view.thread.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nenhum comentário ainda",
            Style::default().fg(theme.text_dim),
        )));
    }
    for (i, comment) in view.thread.comments().iter().enumerate() {
        let style = if i == view.selected_index {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("@{}: ", comment.author_username),
                Style::default().fg(theme.text_dim),
            ),
            Span::styled(comment.content.clone(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k: navegar · d: excluir · Esc: fechar",
        Style::default().fg(theme.text_dim),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Comentários ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    frame.render_widget(body, area);
}

fn render_composer(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let is_edit = matches!(app.composer_state.mode, Some(ComposerMode::EditArtwork { .. }));
    let title = if is_edit { " Editar obra " } else { " Publicar obra " };

    let focus_style = |field: ComposerField| {
        if app.composer_state.focused_field == field {
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        }
    };

    let category_name = app
        .composer_state
        .selected_category()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "—".to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Título:    ", Style::default().fg(theme.text_dim)),
            Span::styled(app.composer_state.title_input.clone(), focus_style(ComposerField::Title)),
        ]),
        Line::from(vec![
            Span::styled("Categoria: ", Style::default().fg(theme.text_dim)),
            Span::styled(format!("◂ {category_name} ▸"), focus_style(ComposerField::Category)),
        ]),
    ];
    if !is_edit {
        let attached = app
            .composer_state
            .media
            .as_ref()
            .map(|m| format!(" ({} anexado)", m.file_name))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled("Mídia:     ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("{}{attached}", app.composer_state.media_path_input),
                focus_style(ComposerField::MediaPath),
            ),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "Descrição:",
        Style::default().fg(theme.text_dim),
    )));
    for text_line in app.composer_state.textarea.lines() {
        lines.push(Line::from(Span::styled(
            text_line.clone(),
            focus_style(ComposerField::Description),
        )));
    }
    lines.push(Line::from(""));
    if app.composer_state.submitting {
        lines.push(Line::from(Span::styled(
            "Enviando...",
            Style::default().fg(theme.text_dim),
        )));
    }
    if let Some(error) = &app.composer_state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab: próximo campo · Enter: enviar (no campo mídia: anexar) · Esc: cancelar",
        Style::default().fg(theme.text_dim),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    frame.render_widget(body, area);
}

/// Error text pinned to the bottom row of a tab area
fn render_error_line(frame: &mut Frame, theme: &ThemeColors, area: Rect, error: &str) {
    if area.height < 2 {
        return;
    }
    let line_area = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let line = Paragraph::new(Line::from(Span::styled(
        error.to_string(),
        Style::default().fg(theme.error),
    )));
    frame.render_widget(line, line_area);
}

fn render_confirm_modal(frame: &mut Frame, theme: &ThemeColors, prompt: &str) {
    let area = centered_rect(40, 15, frame.area());
    frame.render_widget(Clear, area);
    let body = Paragraph::new(Line::from(Span::styled(
        prompt.to_string(),
        Style::default().fg(theme.text),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Confirmar ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    );
    frame.render_widget(body, area);
}

fn render_help_modal(frame: &mut Frame, _app: &App, theme: &ThemeColors) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let entries = [
        ("j / k", "navegar no feed"),
        ("l", "curtir / descurtir"),
        ("c", "abrir caixa de comentário"),
        ("v", "ver comentários da obra"),
        ("n", "publicar nova obra"),
        ("e", "editar obra selecionada"),
        ("d", "excluir obra selecionada"),
        ("f", "filtrar por categoria"),
        ("s", "buscar usuários"),
        ("F", "seguir / deixar de seguir (perfil)"),
        ("r", "recarregar o feed"),
        ("Tab", "trocar de aba"),
        ("Shift+L", "sair da conta"),
        ("q", "sair"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:<10}"), Style::default().fg(theme.primary)),
                Span::styled(*action, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(" Atalhos ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(body, area);
}

/// Helper to create a centered rect using a percentage of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
