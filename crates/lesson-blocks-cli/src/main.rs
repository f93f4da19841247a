use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lesson_blocks_config::Config;
use lesson_blocks_engine::{BlockEditor, BlockKind, BlockType, Cmd, LessonFile, MoveDir, io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};

/// Which pane keyboard input is routed to.
#[derive(Copy, Clone, PartialEq)]
enum Focus {
    Lessons,
    Blocks,
}

struct App {
    content_path: PathBuf,
    lessons: Vec<LessonFile>,
    lesson_list_state: ListState,
    block_list_state: ListState,
    editor: Option<BlockEditor>,
    open_lesson: Option<LessonFile>,
    default_language: Option<String>,
    focus: Focus,
    dirty: bool,
    status: String,
}

impl App {
    fn new(content_path: PathBuf, default_language: Option<String>) -> Result<Self> {
        let lessons = io::list_lessons(&content_path)?;

        let mut app = Self {
            content_path,
            lessons,
            lesson_list_state: ListState::default(),
            block_list_state: ListState::default(),
            editor: None,
            open_lesson: None,
            default_language,
            focus: Focus::Lessons,
            dirty: false,
            status: String::new(),
        };

        if !app.lessons.is_empty() {
            app.lesson_list_state.select(Some(0));
        }

        Ok(app)
    }

    fn next_item(&mut self) {
        match self.focus {
            Focus::Lessons => select_next(&mut self.lesson_list_state, self.lessons.len()),
            Focus::Blocks => {
                let len = self.editor.as_ref().map_or(0, |e| e.blocks().len());
                select_next(&mut self.block_list_state, len);
            }
        }
    }

    fn previous_item(&mut self) {
        match self.focus {
            Focus::Lessons => select_previous(&mut self.lesson_list_state, self.lessons.len()),
            Focus::Blocks => {
                let len = self.editor.as_ref().map_or(0, |e| e.blocks().len());
                select_previous(&mut self.block_list_state, len);
            }
        }
    }

    fn open_selected_lesson(&mut self) {
        let Some(index) = self.lesson_list_state.selected() else {
            return;
        };
        let Some(lesson) = self.lessons.get(index).cloned() else {
            return;
        };

        match io::read_lesson(lesson.relative_path(), &self.content_path) {
            Ok(markdown) => {
                self.editor = Some(BlockEditor::new(&markdown));
                self.open_lesson = Some(lesson);
                self.block_list_state.select(Some(0));
                self.focus = Focus::Blocks;
                self.dirty = false;
                self.status = String::new();
            }
            Err(e) => {
                self.status = format!("Error reading lesson: {e}");
            }
        }
    }

    fn selected_block_id(&self) -> Option<lesson_blocks_engine::BlockId> {
        let index = self.block_list_state.selected()?;
        let editor = self.editor.as_ref()?;
        editor.blocks().get(index).map(|b| b.id)
    }

    fn apply_to_selection(
        &mut self,
        make_cmd: impl Fn(lesson_blocks_engine::BlockId) -> Cmd,
    ) -> bool {
        let Some(id) = self.selected_block_id() else {
            return false;
        };
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        let patch = editor.apply(make_cmd(id));
        let changed = patch.markdown.is_some();
        if changed {
            self.dirty = true;
        }
        let len = editor.blocks().len();
        clamp_selection(&mut self.block_list_state, len);
        changed
    }

    fn move_selected(&mut self, dir: MoveDir) {
        let before = self.block_list_state.selected();
        let moved = self.apply_to_selection(|id| Cmd::Move { id, dir });
        // Keep the cursor on the block that moved.
        if moved && let Some(index) = before {
            let len = self.editor.as_ref().map_or(0, |e| e.blocks().len());
            let target = match dir {
                MoveDir::Up => index.saturating_sub(1),
                MoveDir::Down => (index + 1).min(len.saturating_sub(1)),
            };
            self.block_list_state.select(Some(target));
        }
    }

    fn insert_paragraph_after_selection(&mut self) {
        let after = self.selected_block_id();
        if let Some(editor) = self.editor.as_mut() {
            let patch = editor.apply(Cmd::Insert {
                ty: BlockType::Paragraph,
                after,
            });
            if patch.markdown.is_some() {
                self.dirty = true;
            }
        }
    }

    fn insert_code_after_selection(&mut self) {
        let after = self.selected_block_id();
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let patch = editor.apply(Cmd::Insert {
            ty: BlockType::Code,
            after,
        });
        if patch.markdown.is_some() {
            self.dirty = true;
        }

        // Configured language overrides the engine's preset default.
        if let Some(language) = self.default_language.clone() {
            let index = after
                .and_then(|id| editor.blocks().iter().position(|b| b.id == id))
                .map(|i| i + 1)
                .unwrap_or(editor.blocks().len().saturating_sub(1));
            if let Some(block) = editor.blocks().get(index) {
                let id = block.id;
                let content = block.content.clone();
                editor.apply(Cmd::Update {
                    id,
                    content,
                    kind: Some(BlockKind::Code { language }),
                });
            }
        }
    }

    fn save_open_lesson(&mut self) {
        let (Some(editor), Some(lesson)) = (&self.editor, &self.open_lesson) else {
            return;
        };
        match io::write_lesson(lesson.relative_path(), &self.content_path, &editor.markdown()) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", lesson.slug());
            }
            Err(e) => {
                self.status = format!("Error saving lesson: {e}");
            }
        }
    }
}

fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) => (i + 1) % len,
        None => 0,
    };
    state.select(Some(i));
}

fn select_previous(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

fn clamp_selection(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if let Some(i) = state.selected()
        && i >= len
    {
        state.select(Some(len - 1));
    }
}

/// One-line summary of a block for the block list pane.
fn block_summary(block: &lesson_blocks_engine::Block) -> String {
    match &block.kind {
        BlockKind::Heading1 => format!("# {}", block.content),
        BlockKind::Heading2 => format!("## {}", block.content),
        BlockKind::Heading3 => format!("### {}", block.content),
        BlockKind::Paragraph => format!("¶ {}", block.content),
        BlockKind::Quote => format!("> {}", block.content),
        BlockKind::Divider => "───".to_string(),
        BlockKind::Code { language } => {
            let first = block.content.lines().next().unwrap_or("");
            format!("[code:{language}] {first}")
        }
        BlockKind::Image { url, alt, .. } => format!("[image] {alt} ({url})"),
        BlockKind::Video { url, .. } => format!("[video] {url}"),
        BlockKind::Table { rows } => {
            let cols = rows.first().map_or(0, Vec::len);
            format!("[table] {}×{}", rows.len(), cols)
        }
        BlockKind::List { items, .. } => format!("[list] {} items", items.len()),
        BlockKind::Callout { kind } => {
            format!("{} {}: {}", kind.icon(), kind.tag(), block.content)
        }
    }
}

fn main() -> Result<()> {
    // Determine content path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let content_path;
    let default_language;
    let from_config;

    if args.len() == 2 {
        content_path = PathBuf::from(&args[1]);
        default_language = Config::load().ok().flatten().and_then(|c| c.default_language);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                content_path = config.content_path;
                default_language = config.default_language;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No content path provided and no config file found");
                eprintln!("Usage: {} <content-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <content-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [content-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_content_dir(&content_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Content path '{}'{} is invalid: {e}",
            content_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(content_path, default_language)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab => {
                    app.focus = match app.focus {
                        Focus::Lessons => Focus::Blocks,
                        Focus::Blocks => Focus::Lessons,
                    };
                }
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                KeyCode::Enter if app.focus == Focus::Lessons => app.open_selected_lesson(),
                KeyCode::Char('J') if app.focus == Focus::Blocks => {
                    app.move_selected(MoveDir::Down)
                }
                KeyCode::Char('K') if app.focus == Focus::Blocks => app.move_selected(MoveDir::Up),
                KeyCode::Char('y') if app.focus == Focus::Blocks => {
                    app.apply_to_selection(|id| Cmd::Duplicate { id });
                }
                KeyCode::Char('d') if app.focus == Focus::Blocks => {
                    app.apply_to_selection(|id| Cmd::Delete { id });
                }
                KeyCode::Char('p') if app.focus == Focus::Blocks => {
                    app.insert_paragraph_after_selection()
                }
                KeyCode::Char('c') if app.focus == Focus::Blocks => {
                    app.insert_code_after_selection()
                }
                KeyCode::Char('s') if app.focus == Focus::Blocks => app.save_open_lesson(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Lesson list panel
    let lesson_items: Vec<ListItem> = app
        .lessons
        .iter()
        .map(|lesson| {
            ListItem::new(vec![Line::from(vec![Span::raw(format!(
                "📄 {}",
                lesson.slug()
            ))])])
        })
        .collect();

    let lessons_title = if app.focus == Focus::Lessons {
        "Lessons *"
    } else {
        "Lessons"
    };
    let lessons_list = List::new(lesson_items)
        .block(Block::default().borders(Borders::ALL).title(lessons_title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(lessons_list, chunks[0], &mut app.lesson_list_state);

    // Block panel
    let blocks_title = match (&app.open_lesson, app.dirty) {
        (Some(lesson), true) => format!("Blocks - {} [modified]", lesson.slug()),
        (Some(lesson), false) => format!("Blocks - {}", lesson.slug()),
        (None, _) => "Blocks".to_string(),
    };

    if let Some(editor) = &app.editor {
        let block_items: Vec<ListItem> = editor
            .blocks()
            .iter()
            .map(|block| ListItem::new(vec![Line::from(vec![Span::raw(block_summary(block))])]))
            .collect();

        let blocks_list = List::new(block_items)
            .block(Block::default().borders(Borders::ALL).title(blocks_title))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

        f.render_stateful_widget(blocks_list, chunks[1], &mut app.block_list_state);
    } else {
        let placeholder = Paragraph::new(vec![Line::from("Open a lesson to see its blocks")])
            .block(Block::default().borders(Borders::ALL).title(blocks_title));
        f.render_widget(placeholder, chunks[1]);
    }

    // Instructions and status
    let help_text = Line::from(vec![
        Span::raw("q: Quit | Tab: Pane | ↑/k ↓/j: Select | Enter: Open | "),
        Span::raw("J/K: Move | y: Duplicate | d: Delete | p/c: Insert | s: Save"),
    ]);
    let mut lines = vec![help_text];
    if !app.status.is_empty() {
        lines.push(Line::from(Span::raw(app.status.clone())));
    }

    let help = Paragraph::new(lines).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
