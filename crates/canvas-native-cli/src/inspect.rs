use anyhow::Result;
use canvas_native_engine::{BlockNode, Document, Node};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{Stdout, stdout};

pub struct App {
    title: String,
    document: Document,
    list_state: ListState,
    show_ranges: bool,
}

impl App {
    pub fn new(title: String, text: &str, show_ranges: bool) -> Self {
        let document = Document::new(text);
        let mut list_state = ListState::default();
        if !document.blocks().is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            document,
            list_state,
            show_ranges,
        }
    }

    fn next_block(&mut self) {
        let len = self.document.blocks().len();
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
        self.list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        let len = self.document.blocks().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn show_ranges(&self) -> bool {
        self.show_ranges
    }

    fn toggle_ranges(&mut self) {
        self.show_ranges = !self.show_ranges;
    }
}

pub fn block_label(block: &BlockNode, show_ranges: bool) -> String {
    let mut label = block.kind.name().to_string();
    if let Some(indentation) = block.kind.indentation() {
        label.push_str(&format!(" ({indentation})"));
    }
    if let Some(position) = block.position {
        label.push_str(&format!(" {position:?}"));
    }
    if show_ranges {
        label.push_str(&format!(
            " [{}, {})",
            block.range.location,
            block.range.max()
        ));
    }
    label
}

/// Backing and presentation details of one block.
pub fn detail_lines(document: &Document, index: usize) -> Vec<String> {
    let block = &document.blocks()[index];
    let backing = document.backing_string();
    let presentation = document.presentation_range_of_block(index);
    let mut lines = vec![
        format!("backing:      {:?}", document.backing().slice(block.range)),
        format!("visible:      {:?}", block.content_in(&backing)),
        format!("presentation: {:?}", document.presentation_string_of(index)),
        format!(
            "at:           [{}, {}) -> [{}, {})",
            block.range.location,
            block.range.max(),
            presentation.location,
            presentation.max()
        ),
    ];
    let hidden: Vec<String> = block
        .hidden_ranges()
        .map(|r| format!("{:?}", document.backing().slice(r)))
        .collect();
    if !hidden.is_empty() {
        lines.push(format!("hidden:       {}", hidden.join(" ")));
    }
    for pair in &block.inline_marker_pairs {
        lines.push(format!(
            "marker pair:  {} [{}, {})",
            pair.id,
            pair.range().location,
            pair.range().max()
        ));
    }
    lines
}

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_block(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
                KeyCode::Char('r') => app.toggle_ranges(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(columns[1]);

    let items: Vec<ListItem> = app
        .document
        .blocks()
        .iter()
        .map(|block| ListItem::new(block_label(block, app.show_ranges)))
        .collect();
    let blocks = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(app.title.as_str()))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(blocks, columns[0], &mut app.list_state);

    // presentation text, selected block highlighted
    let selected = app.selected();
    let presentation: Vec<Line> = (0..app.document.blocks().len())
        .map(|i| {
            let text = app.document.presentation_string_of(i).to_string();
            if Some(i) == selected {
                Line::from(Span::styled(
                    text,
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();
    let presentation = Paragraph::new(presentation)
        .block(Block::default().borders(Borders::ALL).title("Presentation"))
        .wrap(Wrap { trim: false });
    f.render_widget(presentation, right[0]);

    let details: Vec<Line> = selected
        .map(|i| detail_lines(&app.document, i))
        .unwrap_or_default()
        .into_iter()
        .map(Line::from)
        .collect();
    let details = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Block"))
        .wrap(Wrap { trim: false });
    f.render_widget(details, right[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("r: Toggle ranges"),
    ]));
    f.render_widget(help, rows[1]);
}
