//! TUI Views
//!
//! Rendering for the navigation header, the directory grid (with loading
//! skeleton and empty state), the submission form, the dashboard, toasts,
//! overlays and the footer. Rendering only reads `AppState`.

use super::colors;
use super::state::{AppState, InteractionMode, View};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use toolify::directory::CategoryFilter;
use toolify::domain::{Category, IconDisplay, Tool};
use toolify::notify::Severity;
use toolify::submission::FormField;

/// Height of one card in the grid, borders included
const CARD_HEIGHT: u16 = 8;

/// Placeholder cards shown while loading
const SKELETON_CARDS: usize = 6;

const FOOTER: &str = "© Leak Media 2025";

/// Render the whole screen.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)]).split(area);

    render_navbar(state, frame, chunks[0]);
    match state.current_view {
        View::Directory => render_directory(state, frame, chunks[1]),
        View::Submit => render_submit(state, frame, chunks[1]),
        View::Dashboard => render_dashboard(state, frame, chunks[1]),
    }
    render_footer(state, frame, chunks[2]);
    render_toasts(state, frame, chunks[1]);

    match &state.interaction_mode {
        InteractionMode::Help => render_help(frame, area),
        InteractionMode::Confirm(dialog) => render_confirm(frame, area, &dialog.message),
        _ => {}
    }
}

/// Number of card columns for a given width (1, 2 or 3).
pub fn grid_columns(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

/// First grid row to draw so the selected card stays on screen.
pub fn first_visible_row(selected: usize, columns: usize, rows_visible: usize) -> usize {
    let selected_row = selected / columns.max(1);
    selected_row.saturating_sub(rows_visible.max(1) - 1)
}

fn render_navbar(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors::DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([Constraint::Length(14), Constraint::Min(0), Constraint::Length(34)]).split(inner);

    let logo = Line::from(vec![
        Span::styled(" T ", Style::default().fg(colors::ON_PRIMARY).bg(colors::PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled(" Toolify", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(logo), columns[0]);

    let mut pages = vec![View::Directory];
    if state.session.is_authenticated() {
        pages.extend([View::Submit, View::Dashboard]);
    }
    let selected = pages.iter().position(|v| *v == state.current_view).unwrap_or(0);
    let tabs = Tabs::new(pages.iter().map(|v| v.name()).collect::<Vec<_>>())
        .select(selected)
        .style(Style::default().fg(colors::DIM))
        .highlight_style(Style::default().fg(colors::PRIMARY).add_modifier(Modifier::BOLD))
        .divider("│");
    frame.render_widget(tabs, columns[1]);

    let auth = match state.session.user_id() {
        Some(uid) => Line::from(vec![
            Span::styled(uid.to_string(), Style::default().fg(colors::PRIMARY)),
            Span::styled("  L logout", Style::default().fg(colors::DIM)),
        ]),
        None => Line::from(Span::styled("Login with Google (L)", Style::default().fg(colors::KEYBIND))),
    };
    frame.render_widget(Paragraph::new(auth).right_aligned(), columns[2]);
}

fn render_directory(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let hero = Paragraph::new(vec![Line::from(vec![
        Span::styled("Explore Community ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("Tools", Style::default().fg(colors::PRIMARY).add_modifier(Modifier::BOLD)),
    ])])
    .centered();
    frame.render_widget(hero, chunks[0]);

    render_search_bar(state, frame, chunks[1]);

    let heading = Line::from(Span::styled(
        format!(" {}", state.heading()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(heading), chunks[2]);

    let grid = chunks[3];
    if state.directory.is_loading() {
        render_skeleton(frame, grid);
        return;
    }

    let tools = state.directory.visible_tools();
    if tools.is_empty() {
        render_empty(frame, grid);
    } else {
        render_grid(frame, grid, &tools, state.selected);
    }
}

fn render_search_bar(state: &AppState, frame: &mut Frame, area: Rect) {
    let searching = state.interaction_mode == InteractionMode::Search;
    let show_tabs = state.directory.options().category_filter;
    let constraints = if show_tabs {
        vec![Constraint::Min(20), Constraint::Length(40)]
    } else {
        vec![Constraint::Min(20)]
    };
    let columns = Layout::horizontal(constraints).split(area);

    let border = if searching { colors::PRIMARY } else { colors::DIM };
    let text = if state.search_input.content().is_empty() && !searching {
        Line::from(Span::styled("Search tools... (/)", Style::default().fg(colors::DIM)))
    } else {
        Line::from(state.search_input.content().to_string())
    };
    let search = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    frame.render_widget(search, columns[0]);

    if searching {
        let x = columns[0].x + 1 + state.search_input.cursor_column() as u16;
        frame.set_cursor_position((x.min(columns[0].right().saturating_sub(2)), columns[0].y + 1));
    }

    if show_tabs {
        let selected = CategoryFilter::OPTIONS
            .iter()
            .position(|c| *c == state.directory.selected_category())
            .unwrap_or(0);
        let tabs = Tabs::new(CategoryFilter::OPTIONS.iter().map(|c| c.as_str()).collect::<Vec<_>>())
            .select(selected)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors::DIM)))
            .highlight_style(Style::default().fg(colors::ON_PRIMARY).bg(colors::PRIMARY))
            .divider(" ");
        frame.render_widget(tabs, columns[1]);
    }
}

fn render_grid(frame: &mut Frame, area: Rect, tools: &[&Tool], selected: usize) {
    let columns = grid_columns(area.width);
    let rows_visible = ((area.height / CARD_HEIGHT) as usize).max(1);
    let first_row = first_visible_row(selected, columns, rows_visible);

    let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows_visible]).split(area);
    for (offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + offset;
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            let index = row * columns + column;
            if let Some(tool) = tools.get(index) {
                render_card(frame, *cell, tool, index == selected);
            }
        }
    }
}

fn icon_span(tool: &Tool) -> Span<'static> {
    let badge = Style::default().fg(colors::ON_PRIMARY).bg(colors::PRIMARY).add_modifier(Modifier::BOLD);
    match tool.icon_display() {
        IconDisplay::Icon(_) => Span::styled(" ◈ ", badge),
        IconDisplay::Initial(c) => Span::styled(format!(" {} ", c), badge),
    }
}

fn category_color(category: Category) -> ratatui::style::Color {
    match category {
        Category::Software => colors::SOFTWARE,
        Category::Plugin => colors::PLUGIN,
        Category::Script => colors::SCRIPT,
    }
}

fn render_card(frame: &mut Frame, area: Rect, tool: &Tool, selected: bool) {
    let border = if selected { colors::PRIMARY } else { colors::DIM };
    let title = Line::from(vec![
        icon_span(tool),
        Span::styled(format!(" {} ", tool.name), Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);

    let lines = vec![
        Line::from(Span::styled(
            tool.category.as_str(),
            Style::default().fg(category_color(tool.category)),
        )),
        Line::from(Span::styled(tool.description.clone(), Style::default().fg(colors::MUTED))),
        Line::from(vec![
            Span::styled("↗ ", Style::default().fg(colors::KEYBIND)),
            Span::styled(tool.link.clone(), Style::default().fg(colors::DIM)),
        ]),
    ];
    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_skeleton(frame: &mut Frame, area: Rect) {
    let columns = grid_columns(area.width);
    let rows = SKELETON_CARDS.div_ceil(columns);
    let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows]).split(area);
    let placeholder = Style::default().fg(colors::DIM);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            if row * columns + column >= SKELETON_CARDS {
                break;
            }
            let width = cell.width.saturating_sub(4) as usize;
            let lines = vec![
                Line::from(Span::styled("░".repeat(width * 3 / 4), placeholder)),
                Line::from(Span::styled("░".repeat(width / 2), placeholder)),
                Line::from(""),
                Line::from(Span::styled("░".repeat(width), placeholder)),
                Line::from(Span::styled("░".repeat(width * 5 / 6), placeholder)),
            ];
            let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(placeholder));
            frame.render_widget(card, *cell);
        }
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No tools found", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "Try adjusting your search or filter criteria",
            Style::default().fg(colors::MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

fn render_submit(state: &AppState, frame: &mut Frame, area: Rect) {
    let width = area.width.min(80);
    let area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(FormField::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.extend([Constraint::Length(1), Constraint::Min(0)]);
    let chunks = Layout::vertical(constraints).split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Submit Your ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("Tool", Style::default().fg(colors::PRIMARY).add_modifier(Modifier::BOLD)),
    ]))
    .centered();
    frame.render_widget(header, chunks[0]);

    let editing = state.interaction_mode == InteractionMode::Form;
    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = editing && *field == state.focused_field;
        render_form_field(state, frame, chunks[i + 1], *field, focused);
    }

    let button_index = FormField::ALL.len() + 1;
    let button = if state.submission.is_submitting() {
        Span::styled("[ Submitting... ]", Style::default().fg(colors::DIM))
    } else {
        Span::styled(
            "[ Submit Tool ⏎ ]",
            Style::default().fg(colors::ON_PRIMARY).bg(colors::PRIMARY).add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(button)).centered(), chunks[button_index]);

    let guidelines = Paragraph::new(vec![
        Line::from("• Ensure your tool link is working and accessible"),
        Line::from("• Write a clear, concise description explaining your tool's purpose"),
        Line::from("• Choose the most appropriate category for your tool"),
        Line::from("• Tools should be functional and provide value to the community"),
    ])
    .style(Style::default().fg(colors::MUTED))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(" Submission Guidelines "));
    frame.render_widget(guidelines, chunks[button_index + 1]);
}

fn render_form_field(state: &AppState, frame: &mut Frame, area: Rect, field: FormField, focused: bool) {
    let border = if focused { colors::PRIMARY } else { colors::DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", field.label()));

    let content = if field == FormField::Category {
        category_selector(state.submission.form.category)
    } else {
        let value = if focused {
            state.field_input.content().to_string()
        } else {
            state.submission.form.value(field)
        };
        if value.is_empty() && !focused {
            Line::from(Span::styled(field.placeholder(), Style::default().fg(colors::DIM)))
        } else {
            Line::from(value)
        }
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused && field != FormField::Category {
        let x = area.x + 1 + state.field_input.cursor_column() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn category_selector(current: Option<Category>) -> Line<'static> {
    if current.is_none() {
        return Line::from(Span::styled(
            FormField::Category.placeholder(),
            Style::default().fg(colors::DIM),
        ));
    }
    let mut spans = Vec::new();
    for category in Category::ALL {
        let style = if Some(category) == current {
            Style::default().fg(colors::ON_PRIMARY).bg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::DIM)
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_dashboard(state: &AppState, frame: &mut Frame, area: Rect) {
    let tools = state.listed_tools();
    let loading = state.directory.is_loading();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" My Tools ({}) ", tools.len()))
        .title_bottom(Line::from(Span::styled(" d delete · ⏎ open ", Style::default().fg(colors::DIM))));

    if loading {
        let message = Paragraph::new("Loading…").style(Style::default().fg(colors::DIM)).block(block);
        frame.render_widget(message, area);
        return;
    }

    if tools.is_empty() {
        let message = Paragraph::new("You haven't submitted any tools yet")
            .style(Style::default().fg(colors::DIM))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let style = if i == state.selected {
                Style::default().bg(colors::SELECTED).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                icon_span(tool),
                Span::raw(format!(" {} ", tool.name)),
                Span::styled(
                    format!("[{}] ", tool.category),
                    Style::default().fg(category_color(tool.category)),
                ),
                Span::styled(tool.link.clone(), Style::default().fg(colors::DIM)),
            ]))
            .style(style)
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let columns = Layout::horizontal([Constraint::Min(0), Constraint::Length(FOOTER.chars().count() as u16 + 1)]).split(area);
    let left = match &state.status_message {
        Some(message) => Span::styled(message.clone(), Style::default().fg(colors::KEYBIND)),
        None => Span::styled(" ? help · / search · Tab pages · r reload · q quit", Style::default().fg(colors::DIM)),
    };
    frame.render_widget(Paragraph::new(Line::from(left)), columns[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER, Style::default().fg(colors::DIM))),
        columns[1],
    );
}

fn render_toasts(state: &AppState, frame: &mut Frame, area: Rect) {
    let width = area.width.min(48);
    let mut y = area.y;
    for toast in state.toasts.iter() {
        if y + 4 > area.bottom() {
            break;
        }
        let rect = Rect::new(area.right().saturating_sub(width), y, width, 4);
        let color = match toast.severity {
            Severity::Default => colors::PRIMARY,
            Severity::Destructive => colors::DESTRUCTIVE,
        };
        let widget = Paragraph::new(toast.message.clone()).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", toast.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );
        frame.render_widget(Clear, rect);
        frame.render_widget(widget, rect);
        y += 4;
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_help(frame: &mut Frame, area: Rect) {
    let rows = [
        ("/", "search by name or description"),
        ("←/→ 1-4", "category: all, software, plugin, script"),
        ("↑/↓ j/k", "move selection"),
        ("⏎ o", "open selected tool"),
        ("Esc", "clear search / leave form"),
        ("L", "log in / log out"),
        ("Tab", "next page (Submit, Dashboard when logged in)"),
        ("d", "delete tool (Dashboard)"),
        ("r", "reload directory"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", keys), Style::default().fg(colors::KEYBIND)),
                Span::raw(*what),
            ])
        })
        .collect();
    let rect = centered(area, 64, lines.len() as u16 + 2);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        rect,
    );
}

fn render_confirm(frame: &mut Frame, area: Rect, message: &str) {
    let rect = centered(area, 50, 3);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(message.to_string()).centered().block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::DESTRUCTIVE))
                .title(" Confirm "),
        ),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use toolify::domain::mock_tools;
    use toolify::notify::{Notification, Notifier};

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(state, f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        let ticket = state.directory.begin_load();
        state.directory.complete_load(ticket, Ok(mock_tools()));
        state
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(60), 1);
        assert_eq!(grid_columns(80), 2);
        assert_eq!(grid_columns(119), 2);
        assert_eq!(grid_columns(160), 3);
    }

    #[test]
    fn test_first_visible_row() {
        assert_eq!(first_visible_row(0, 3, 2), 0);
        assert_eq!(first_visible_row(5, 3, 2), 0);
        assert_eq!(first_visible_row(6, 3, 2), 1);
        assert_eq!(first_visible_row(5, 1, 2), 4);
        assert_eq!(first_visible_row(3, 0, 0), 3);
    }

    #[test]
    fn test_render_directory() {
        let text = draw(&loaded_state(), 120, 40);
        assert!(text.contains("Toolify"));
        assert!(text.contains("Featured Tools"));
        assert!(text.contains("(6)"));
        assert!(text.contains("Figma"));
        assert!(text.contains("Login with Google"));
        assert!(text.contains(FOOTER));
    }

    #[test]
    fn test_render_loading_skeleton() {
        let mut state = AppState::default();
        state.directory.begin_load();
        let text = draw(&state, 120, 40);
        assert!(text.contains("░"));
        assert!(!text.contains("No tools found"));
    }

    #[test]
    fn test_reload_hides_previous_tools() {
        let mut state = loaded_state();
        state.session.login();
        let mine = mock_tools().remove(0).with_owner("demo-user");
        state.directory.insert(Tool { id: "7".to_string(), ..mine }).unwrap();
        state.directory.begin_load();

        let text = draw(&state, 120, 40);
        assert!(text.contains("Featured Tools (0)"));
        assert!(!text.contains("Figma"));

        state.current_view = View::Dashboard;
        let text = draw(&state, 100, 30);
        assert!(text.contains("My Tools (0)"));
        assert!(text.contains("Loading…"));
        assert!(!text.contains("Figma"));
    }

    #[test]
    fn test_render_empty_state() {
        let mut state = loaded_state();
        state.directory.set_search_term("kubernetes");
        let text = draw(&state, 100, 30);
        assert!(text.contains("No tools found"));
        assert!(text.contains("Try adjusting your search or filter criteria"));
        assert!(text.contains("(0)"));
    }

    #[test]
    fn test_render_submit_form() {
        let mut state = loaded_state();
        state.session.login();
        state.current_view = View::Submit;
        state.interaction_mode = InteractionMode::Form;
        let text = draw(&state, 100, 40);
        assert!(text.contains("Tool Name *"));
        assert!(text.contains("Select tool category"));
        assert!(text.contains("Submit Tool"));
        assert!(text.contains("demo-user"));
    }

    #[test]
    fn test_render_dashboard_empty() {
        let mut state = loaded_state();
        state.session.login();
        state.current_view = View::Dashboard;
        let text = draw(&state, 100, 30);
        assert!(text.contains("My Tools (0)"));
        assert!(text.contains("You haven't submitted any tools yet"));
    }

    #[test]
    fn test_render_toast() {
        let mut state = loaded_state();
        state.toasts.notify(Notification::missing_fields());
        let text = draw(&state, 120, 40);
        assert!(text.contains("Missing fields"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut state = loaded_state();
        state.interaction_mode = InteractionMode::Help;
        draw(&state, 20, 6);
    }
}
