use crate::diary_entry::DiaryEntry;
use crate::diary_state::DiarySnapshot;
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use unicode_width::UnicodeWidthChar;

/// User intents forwarded from the terminal into the diary.
///
/// Edits address list rows since ids may repeat under `IdPolicy::Derived`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenDialog,
    CancelDialog,
    DraftTitle(String),
    DraftBody(String),
    Add,
    BeginEdit(usize),
    CommitEdit {
        row: usize,
        title: String,
        body: String,
    },
    Delete(usize),
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Title,
    Body,
}

impl Field {
    fn toggled(self) -> Self {
        match self {
            Field::Title => Field::Body,
            Field::Body => Field::Title,
        }
    }
}

/// Presentation-only state: list selection, focused input and the inline editor buffers.
#[derive(Debug, Default)]
pub struct ViewState {
    pub selected: usize,
    pub focus: Field,
    edit_title: String,
    edit_body: String,
}

impl ViewState {
    pub fn edit_buffers(&self) -> (&str, &str) {
        (&self.edit_title, &self.edit_body)
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn on_key(&mut self, key: KeyEvent, snapshot: &DiarySnapshot) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        // raw mode delivers Ctrl+<key> as a char; never type it into a field
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        if snapshot.dialog.open {
            return self.on_dialog_key(key.code, snapshot);
        }
        if let Some(row) = snapshot.editing {
            return self.on_editor_key(key.code, row);
        }
        self.on_list_key(key.code, snapshot)
    }

    fn on_dialog_key(&mut self, code: KeyCode, snapshot: &DiarySnapshot) -> Option<Action> {
        let draft = match self.focus {
            Field::Title => &snapshot.dialog.draft_title,
            Field::Body => &snapshot.dialog.draft_body,
        };
        let edited = match code {
            KeyCode::Esc => {
                self.focus = Field::Title;
                return Some(Action::CancelDialog);
            }
            KeyCode::Enter => return Some(Action::Add),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggled();
                return None;
            }
            KeyCode::Char(c) => {
                let mut text = draft.clone();
                text.push(c);
                text
            }
            KeyCode::Backspace => {
                let mut text = draft.clone();
                text.pop()?;
                text
            }
            _ => return None,
        };
        Some(match self.focus {
            Field::Title => Action::DraftTitle(edited),
            Field::Body => Action::DraftBody(edited),
        })
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.edit_title,
            Field::Body => &mut self.edit_body,
        }
    }

    fn on_editor_key(&mut self, code: KeyCode, row: usize) -> Option<Action> {
        match code {
            KeyCode::Enter => {
                self.focus = Field::Title;
                Some(Action::CommitEdit {
                    row,
                    title: std::mem::take(&mut self.edit_title),
                    body: std::mem::take(&mut self.edit_body),
                })
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggled();
                None
            }
            KeyCode::Char(c) => {
                self.focused_buffer().push(c);
                None
            }
            KeyCode::Backspace => {
                self.focused_buffer().pop();
                None
            }
            _ => None,
        }
    }

    fn on_list_key(&mut self, code: KeyCode, snapshot: &DiarySnapshot) -> Option<Action> {
        let entries = &snapshot.entries;
        self.clamp_selection(entries.len());
        match code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.selected + 1 < entries.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('a') => {
                self.focus = Field::Title;
                Some(Action::OpenDialog)
            }
            KeyCode::Char('e') => {
                let entry = entries.get(self.selected)?;
                self.edit_title = entry.title.clone();
                self.edit_body = entry.body.clone();
                self.focus = Field::Title;
                Some(Action::BeginEdit(self.selected))
            }
            KeyCode::Char('d') => entries.get(self.selected).map(|e| Action::Delete(e.id)),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Cuts `text` so it occupies at most `max` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn with_cursor(text: &str, focused: bool) -> String {
    if focused {
        format!("{text}|")
    } else {
        text.to_string()
    }
}

fn entry_item<'a>(entry: &DiaryEntry, width: usize) -> ListItem<'a> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", entry.created.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_to_width(&entry.title, width.saturating_sub(19)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::raw(format!(
            "  {}",
            truncate_to_width(entry.preview(), width.saturating_sub(2))
        ))),
    ])
}

fn editor_item<'a>(view: &ViewState) -> ListItem<'a> {
    let field_style = |field: Field| {
        if view.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    ListItem::new(vec![
        Line::from(Span::styled(
            format!("Title: {}", with_cursor(&view.edit_title, view.focus == Field::Title)),
            field_style(Field::Title),
        )),
        Line::from(Span::styled(
            format!("Body:  {}", with_cursor(&view.edit_body, view.focus == Field::Body)),
            field_style(Field::Body),
        )),
    ])
}

fn controls_line(snapshot: &DiarySnapshot) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));
    if snapshot.dialog.open {
        Line::from(vec![
            key("Tab"),
            Span::raw(" switch field, "),
            key("Enter"),
            Span::raw(" add, "),
            key("Esc"),
            Span::raw(" cancel"),
        ])
    } else if snapshot.editing.is_some() {
        Line::from(vec![
            key("Tab"),
            Span::raw(" switch field, "),
            key("Enter"),
            Span::raw(" save"),
        ])
    } else if snapshot.entries.is_empty() {
        Line::from(vec![
            Span::raw("Press "),
            key("a"),
            Span::raw(" to add, "),
            key("q"),
            Span::raw(" to quit"),
        ])
    } else {
        Line::from(vec![
            Span::raw("Press "),
            key("a"),
            Span::raw(" to add, "),
            key("e"),
            Span::raw(" to edit, "),
            key("d"),
            Span::raw(" to delete, "),
            key("q"),
            Span::raw(" to quit"),
        ])
    }
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
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

fn render_dialog(f: &mut Frame, snapshot: &DiarySnapshot, view: &ViewState) {
    let area = centered_rect(60, 10, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add Entry")
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let input = |label: &'static str, text: &str, field: Field| {
        let focused = view.focus == field;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        Paragraph::new(with_cursor(text, focused))
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(label))
    };
    f.render_widget(
        input("Title", &snapshot.dialog.draft_title, Field::Title),
        rows[0],
    );
    f.render_widget(
        input("Body", &snapshot.dialog.draft_body, Field::Body),
        rows[1],
    );
}

/// Draws the whole screen from a snapshot; the dialog is layered over the list.
pub fn render(f: &mut Frame, snapshot: &DiarySnapshot, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Diary")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = snapshot
        .entries
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            if snapshot.is_editing_row(row) {
                editor_item(view)
            } else {
                entry_item(entry, width)
            }
        })
        .collect();

    let selected = if snapshot.entries.is_empty() {
        None
    } else {
        Some(view.selected.min(snapshot.entries.len() - 1))
    };
    let entries_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Entries"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(
        entries_list,
        chunks[1],
        &mut ListState::default().with_selected(selected),
    );

    let controls = Paragraph::new(controls_line(snapshot))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(controls, chunks[2]);

    if snapshot.dialog.open {
        render_dialog(f, snapshot, view);
    }
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ViewState,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI {
            terminal,
            view: ViewState::default(),
        })
    }

    pub fn display(&mut self, snapshot: &DiarySnapshot) -> Result<()> {
        self.view.clamp_selection(snapshot.entries.len());
        let view = &self.view;
        self.terminal.draw(|f| render(f, snapshot, view))?;
        Ok(())
    }

    pub fn handle_input(&mut self, snapshot: &DiarySnapshot) -> Result<Option<Action>> {
        if let Event::Key(key) = event::read()? {
            Ok(self.view.on_key(key, snapshot))
        } else {
            Ok(None)
        }
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
