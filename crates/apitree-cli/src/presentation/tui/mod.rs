mod app;
mod ui;

use anyhow::Result;
use apitree_hierarchy::{Node, ViewConfig};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

use app::{App, Flow};

/// Redraw interval while shapes are moving.
const FRAME_RATE: Duration = Duration::from_millis(16);
const IDLE_RATE: Duration = Duration::from_millis(250);

pub fn run(root: &Node, config: ViewConfig, expand_all: bool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        std::process::exit(0);
    })?;

    let mut app = App::new(root, config, expand_all);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let started = Instant::now();

    loop {
        app.tick(started.elapsed());
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = if app.scene.is_animating() {
            FRAME_RATE
        } else {
            IDLE_RATE
        };
        if !event::poll(timeout)? {
            continue;
        }

        app.tick(started.elapsed());
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.on_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.click(mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }
}
