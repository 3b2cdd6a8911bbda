//! `ratatui` front end: renders the bound controllers and turns keystrokes into
//! discrete activation and submit events, one at a time.

use crate::app::{App, DeckPane, Focus, Screen, SidebarEntry};
use crate::confirm::Confirm;
use crate::terminal::TerminalSession;
use crate::text_safe::{fit_columns, sanitize, suffix_by_columns};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

const ACCENT: Color = Color::Rgb(120, 180, 255);
const TITLE: Color = Color::Rgb(150, 200, 255);
const DIM: Color = Color::Rgb(110, 120, 140);
const TEXT: Color = Color::Rgb(215, 215, 210);
const INPUT: Color = Color::Rgb(255, 220, 100);
const INVALID: Color = Color::Rgb(255, 90, 90);
const SELECTED_BG: Color = Color::Rgb(45, 55, 80);

/// Configure the terminal, run the event loop, and tear everything down.
pub fn run_app(app: &mut App) -> Result<()> {
    let mut session = TerminalSession::start()?;
    app_loop(session.terminal_mut(), app)
}

fn app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let mut should_draw = app.take_redraw_request();
        let mut should_quit = false;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut confirm = |message: &str| match prompt_confirm(terminal, message) {
                        Ok(answer) => answer,
                        Err(err) => {
                            tracing::warn!(target: "wordpanel::ui", error = %format!("{err:#}"), "confirm prompt failed");
                            false
                        }
                    };
                    should_quit = handle_key_event(app, key, &mut confirm);
                    should_draw = true;
                }
                Event::Resize(_, _) => should_draw = true,
                _ => {}
            }
        }

        if should_quit {
            break;
        }
        if should_draw || app.take_redraw_request() {
            terminal.draw(|frame| draw(frame, app))?;
        }
    }
    Ok(())
}

/// Route one keystroke to the handler it activates. Returns true to quit.
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent, confirm: &mut dyn Confirm) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('b') if ctrl => {
            app.toggle_menu();
            return false;
        }
        _ => {}
    }

    if app.word_form_open() && app.focus() == Focus::Content {
        handle_word_form_key(app, key, ctrl);
        return false;
    }
    if app.deck_form_open() && app.focus() == Focus::Content {
        handle_deck_form_key(app, key, ctrl);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),
        _ if app.focus() == Focus::Sidebar => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.sidebar_up(),
            KeyCode::Down | KeyCode::Char('j') => app.sidebar_down(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => app.activate_sidebar_entry(),
            KeyCode::Esc => app.toggle_menu(),
            _ => {}
        },
        _ => match (app.screen(), key.code) {
            (Screen::Words, KeyCode::Up | KeyCode::Char('k')) => app.select_prev_row(),
            (Screen::Words, KeyCode::Down | KeyCode::Char('j')) => app.select_next_row(),
            (Screen::Words, KeyCode::Char('n')) => app.show_word_form(),
            (Screen::Words, KeyCode::Char('e') | KeyCode::Enter) => app.edit_selected(),
            (Screen::Words, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected(confirm),
            (Screen::Decks, KeyCode::Up | KeyCode::Char('k')) => app.select_prev_deck(),
            (Screen::Decks, KeyCode::Down | KeyCode::Char('j')) => app.select_next_deck(),
            (Screen::Decks, KeyCode::Enter) => app.open_selected_deck(),
            (Screen::Decks, KeyCode::Char('n')) => app.toggle_deck_form(),
            (Screen::Deck(_), KeyCode::Up | KeyCode::Char('k')) => app.select_prev_deck_item(),
            (Screen::Deck(_), KeyCode::Down | KeyCode::Char('j')) => app.select_next_deck_item(),
            (Screen::Deck(_), KeyCode::Right | KeyCode::Char('l')) => app.next_deck_pane(),
            (Screen::Deck(_), KeyCode::Left | KeyCode::Char('h')) => app.prev_deck_pane(),
            (Screen::Deck(_), KeyCode::Enter | KeyCode::Char(' ')) => app.activate_deck_item(),
            (Screen::Deck(_), KeyCode::Esc | KeyCode::Backspace) => app.leave_deck(),
            _ => {}
        },
    }
    false
}

fn handle_word_form_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.cancel_word_form(),
        KeyCode::Enter => app.submit_word_form(),
        KeyCode::Char('s') if ctrl => app.submit_word_form(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Backspace => app.backspace_field(),
        KeyCode::Char(ch) if !ctrl => app.push_field_char(ch),
        _ => {}
    }
}

fn handle_deck_form_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.toggle_deck_form(),
        KeyCode::Enter => app.submit_deck_form(),
        KeyCode::Backspace => app.backspace_deck(),
        KeyCode::Char(ch) if !ctrl => app.push_deck_char(ch),
        _ => {}
    }
}

/// Blocking yes/no dialog. Nothing else runs until the user answers.
fn prompt_confirm<B: Backend>(terminal: &mut Terminal<B>, message: &str) -> Result<bool> {
    terminal.draw(|frame| draw_confirm(frame, message))?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

fn draw_confirm(frame: &mut Frame<'_>, message: &str) {
    let area = centered_rect(frame.size(), 50, 5);
    frame.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(TEXT))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(INPUT).add_modifier(Modifier::BOLD)),
            Span::styled(" Yes   ", Style::default().fg(DIM)),
            Span::styled("[n]", Style::default().fg(INPUT).add_modifier(Modifier::BOLD)),
            Span::styled(" No", Style::default().fg(DIM)),
        ]),
    ])
    .block(rounded_block(" Confirm ", INVALID));
    frame.render_widget(body, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn rounded_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(TITLE).add_modifier(Modifier::BOLD),
        ))
}

/// Render header, sidebar, screen content, and status line.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);

    let sidebar_cols = app
        .sidebar()
        .map(|s| (i32::from(s.width()) + i32::from(s.sidebar().left)).max(0))
        .and_then(|cols| u16::try_from(cols).ok())
        .unwrap_or(0)
        .min(chunks[1].width / 2);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_cols), Constraint::Min(10)])
        .split(chunks[1]);
    if sidebar_cols > 0 {
        draw_sidebar(frame, app, body[0]);
    }
    match app.screen() {
        Screen::Words => draw_words(frame, app, body[1]),
        Screen::Decks => draw_decks(frame, app, body[1]),
        Screen::Deck(_) => draw_deck(frame, app, body[1]),
    }

    let status = Paragraph::new(sanitize(app.status_text()))
        .block(rounded_block(" Status ", DIM))
        .style(Style::default().fg(DIM));
    frame.render_widget(status, chunks[2]);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(sidebar) = app.sidebar() {
        let style = if sidebar.trigger().active {
            Style::default().fg(SELECTED_BG).bg(ACCENT)
        } else {
            Style::default().fg(ACCENT)
        };
        spans.push(Span::styled(format!(" {} ", sidebar.trigger().label), style));
        spans.push(Span::styled(" Ctrl+B ", Style::default().fg(DIM)));
    }
    spans.push(Span::styled(
        format!(" {} ", app.screen().title()),
        Style::default().fg(TITLE).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let inner = usize::from(area.width.saturating_sub(2));
    let focused = app.focus() == Focus::Sidebar;
    let submenus = app.submenus().submenus();
    let lines: Vec<Line> = app
        .sidebar_entries()
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let (text, base) = match *entry {
                SidebarEntry::Trigger(i) => {
                    let submenu = submenus.get(i)?;
                    let marker = if submenu.is_open() { "▾" } else { "▸" };
                    let style = if submenu.trigger.active {
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(TEXT)
                    };
                    (format!("{marker} {}", submenu.trigger.label), style)
                }
                SidebarEntry::Link { submenu, link } => {
                    let link = submenus.get(submenu)?.links.get(link)?;
                    (format!("   {}", link.label), Style::default().fg(TEXT))
                }
            };
            let style = if focused && index == app.sidebar_selected() {
                base.bg(SELECTED_BG)
            } else {
                base
            };
            Some(Line::from(Span::styled(fit_columns(&text, inner), style)))
        })
        .collect();
    let border = if focused { ACCENT } else { DIM };
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(rounded_block(" Menu ", border)),
        area,
    );
}

fn draw_words(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let form_height = app
        .word_form()
        .filter(|form| form.is_visible())
        .map(|form| u16::try_from(form.form().fields.len()).unwrap_or(u16::MAX).saturating_add(6))
        .unwrap_or(0);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(form_height)])
        .split(area);

    draw_word_table(frame, app, chunks[0]);
    if form_height > 0 {
        draw_word_form(frame, app, chunks[1]);
    }
}

fn draw_word_table(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let languages = app.languages();
    let columns = languages.len().max(1);
    let id_cols = 5u16;
    let inner = area.width.saturating_sub(2 + id_cols);
    let col_width = usize::from(inner) / columns;
    let col_width = col_width.saturating_sub(1);

    let header = Row::new(
        std::iter::once(Cell::from("#"))
            .chain(
                languages
                    .iter()
                    .map(|lang| Cell::from(fit_columns(&sanitize(&lang.title), col_width))),
            )
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD));

    let content_focused = app.focus() == Focus::Content && !app.word_form_open();
    let rows: Vec<Row> = app
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let cells = std::iter::once(Cell::from(row.id.to_string())).chain(
                languages.iter().map(|lang| {
                    let text = row.translation(lang.id).map(sanitize).unwrap_or_default();
                    Cell::from(fit_columns(&text, col_width))
                }),
            );
            let style = if index == app.row_selected() && content_focused {
                Style::default().fg(TEXT).bg(SELECTED_BG)
            } else {
                Style::default().fg(TEXT)
            };
            Row::new(cells.collect::<Vec<_>>()).style(style)
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(id_cols))
        .chain((0..columns).map(|_| Constraint::Ratio(1, columns as u32)))
        .collect();

    let mut block = rounded_block(" Words ", if content_focused { ACCENT } else { DIM });
    if let Some(trigger) = app
        .word_form()
        .map(|form| form.trigger())
        .filter(|trigger| trigger.display.is_visible())
    {
        block = block.title_bottom(Line::from(vec![
            Span::styled(
                format!(" {} ", trigger.label),
                Style::default().fg(INPUT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("n  ", Style::default().fg(DIM)),
            Span::styled("edit ", Style::default().fg(DIM)),
            Span::styled("e  ", Style::default().fg(INPUT)),
            Span::styled("delete ", Style::default().fg(DIM)),
            Span::styled("d ", Style::default().fg(INPUT)),
        ]));
    }

    if app.rows().is_empty() {
        let empty = Paragraph::new("No words yet. Press n to add one.")
            .style(Style::default().fg(DIM))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn draw_word_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(controller) = app.word_form() else {
        return;
    };
    let form = controller.form();
    let label_cols = form
        .fields
        .iter()
        .map(|field| unicode_width::UnicodeWidthStr::width(field.label.as_str()))
        .max()
        .unwrap_or(0)
        .min(16);
    let value_cols = usize::from(area.width.saturating_sub(2))
        .saturating_sub(label_cols + 4)
        .max(1);

    let mut lines = Vec::with_capacity(form.fields.len() + 4);
    for (index, field) in form.fields.iter().enumerate() {
        let selected = index == app.field_selected();
        let label_style = if field.invalid {
            Style::default().fg(INVALID).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        let mut value_style = Style::default().fg(INPUT);
        if field.invalid {
            value_style = value_style
                .fg(INVALID)
                .add_modifier(Modifier::UNDERLINED);
        }
        if selected {
            value_style = value_style.bg(SELECTED_BG);
        }
        let label = fit_columns(&sanitize(&field.label), label_cols);
        let pad = label_cols.saturating_sub(unicode_width::UnicodeWidthStr::width(label.as_str()));
        let shown = suffix_by_columns(&field.value, value_cols.saturating_sub(1));
        let cursor = if selected { "▏" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("{label}{} ", " ".repeat(pad)), label_style),
            Span::styled(if field.invalid { "!" } else { " " }, label_style),
            Span::styled(format!(" {shown}{cursor}"), value_style),
        ]));
    }
    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(INVALID).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!("[ {} ]", form.submit_label),
            Style::default().fg(INPUT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Enter   ", Style::default().fg(DIM)),
        Span::styled(
            format!("[ {} ]", form.cancel_label),
            Style::default().fg(TEXT),
        ),
        Span::styled(" Esc", Style::default().fg(DIM)),
    ]));

    let title = format!(" {} ", form.title);
    let paragraph = Paragraph::new(Text::from(lines)).block(rounded_block(&title, ACCENT));
    frame.render_widget(paragraph, area);
}

fn draw_decks(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let form_open = app.deck_form_open();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if form_open { 3 } else { 0 }),
        ])
        .split(area);

    let inner = usize::from(chunks[0].width.saturating_sub(2));
    let lines: Vec<Line> = if app.decks().is_empty() {
        vec![Line::from(Span::styled(
            "No decks yet.",
            Style::default().fg(DIM),
        ))]
    } else {
        app.decks()
            .iter()
            .enumerate()
            .map(|(index, deck)| {
                let text = format!(
                    "{}  ({} words)",
                    sanitize(&deck.title),
                    deck.words.len()
                );
                let style = if index == app.deck_selected() && !form_open {
                    Style::default().fg(TEXT).bg(SELECTED_BG)
                } else {
                    Style::default().fg(TEXT)
                };
                Line::from(Span::styled(fit_columns(&text, inner), style))
            })
            .collect()
    };

    let mut block = rounded_block(" Decks ", if form_open { DIM } else { ACCENT });
    if let Some(trigger) = app
        .deck_form()
        .map(|panel| panel.trigger())
        .filter(|trigger| trigger.display.is_visible())
    {
        block = block.title_bottom(Line::from(vec![
            Span::styled(
                format!(" {} ", trigger.label),
                Style::default().fg(INPUT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("n  ", Style::default().fg(DIM)),
            Span::styled("open ", Style::default().fg(DIM)),
            Span::styled("Enter ", Style::default().fg(INPUT)),
        ]));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), chunks[0]);

    if let Some(panel) = app.deck_form().filter(|panel| panel.is_open()) {
        let width = usize::from(chunks[1].width.saturating_sub(4));
        let shown = suffix_by_columns(&panel.panel().title_input, width);
        let input = Paragraph::new(Line::from(Span::styled(
            format!("{shown}▏"),
            Style::default().fg(INPUT),
        )))
        .block(
            rounded_block(" New deck title ", ACCENT).title_bottom(Line::from(vec![
                Span::styled(" Enter ", Style::default().fg(INPUT)),
                Span::styled("create  ", Style::default().fg(DIM)),
                Span::styled("Esc ", Style::default().fg(INPUT)),
                Span::styled("close ", Style::default().fg(DIM)),
            ])),
        );
        frame.render_widget(input, chunks[1]);
    }
}

/// Deck screen: language switches, the deck's words, and addable words side by side.
fn draw_deck(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(view) = app.deck_view() else {
        return;
    };
    let outer = rounded_block(&format!(" {} ", sanitize(&view.deck.title)), ACCENT).title_bottom(
        Line::from(vec![
            Span::styled(" ←/→ ", Style::default().fg(INPUT)),
            Span::styled("column  ", Style::default().fg(DIM)),
            Span::styled("Enter ", Style::default().fg(INPUT)),
            Span::styled("toggle  ", Style::default().fg(DIM)),
            Span::styled("Esc ", Style::default().fg(INPUT)),
            Span::styled("back ", Style::default().fg(DIM)),
        ]),
    );
    let inner_area = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(3, 8),
            Constraint::Ratio(3, 8),
        ])
        .split(inner_area);

    let languages: Vec<String> = view
        .languages
        .iter()
        .map(|(lang, member)| {
            let mark = if *member { "[x]" } else { "[ ]" };
            format!("{mark} {}", sanitize(&lang.title))
        })
        .collect();
    let words: Vec<String> = view
        .words
        .iter()
        .map(|row| format!("{}  {}", row.id, sanitize(&view.label(row))))
        .collect();
    let available: Vec<String> = view
        .available
        .iter()
        .map(|row| format!("{}  {}", row.id, sanitize(&view.label(row))))
        .collect();

    let panes = [
        (DeckPane::Languages, " Languages ", languages, "No languages."),
        (DeckPane::Words, " In deck ", words, "No words in this deck."),
        (
            DeckPane::Available,
            " Available ",
            available,
            "Nothing to add.",
        ),
    ];
    for ((pane, title, items, empty), column) in panes.into_iter().zip(columns.iter()) {
        let focused = pane == app.deck_pane() && app.focus() == Focus::Content;
        let width = usize::from(column.width.saturating_sub(2));
        let lines: Vec<Line> = if items.is_empty() {
            vec![Line::from(Span::styled(empty, Style::default().fg(DIM)))]
        } else {
            items
                .iter()
                .enumerate()
                .map(|(index, text)| {
                    let style = if focused && index == app.deck_item_selected() {
                        Style::default().fg(TEXT).bg(SELECTED_BG)
                    } else {
                        Style::default().fg(TEXT)
                    };
                    Line::from(Span::styled(fit_columns(text, width), style))
                })
                .collect()
        };
        let block = rounded_block(title, if focused { ACCENT } else { DIM });
        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), *column);
    }
}
