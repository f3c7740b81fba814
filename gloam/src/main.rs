//! Gloam — terminal front-end.
//!
//! Renders the maze inside the player's flickering aura and maps WASD /
//! arrow keys (held via key auto-repeat) onto the simulation tick.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use gloam_lib::entity::Role;
use gloam_lib::{Game, GameConfig, InputState, Outcome};
use murk_core::Vec2;
use murk_paths::chebyshev;

/// Frame budget; input gathered while waiting fills the next tick.
const FRAME: Duration = Duration::from_millis(33);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A wider aura than the canvas build: terminal cells are coarse.
    let config = GameConfig {
        aura_radius: 4.5,
        flicker_radius: 0.3,
        ..GameConfig::default()
    };
    let mut game = Game::new(config)?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, &mut game);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut impl Write, game: &mut Game) -> Result<(), Box<dyn std::error::Error>> {
    let mut last = Instant::now();
    loop {
        let mut input = InputState::default();
        let deadline = Instant::now() + FRAME;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => game.reset()?,
                    KeyCode::Char('w') | KeyCode::Up => input.up = true,
                    KeyCode::Char('s') | KeyCode::Down => input.down = true,
                    KeyCode::Char('a') | KeyCode::Left => input.left = true,
                    KeyCode::Char('d') | KeyCode::Right => input.right = true,
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(0.1);
        last = now;

        game.tick(dt, input);
        draw(out, game)?;
    }
}

fn draw(out: &mut impl Write, game: &Game) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    let ppos = game.player.pos;
    let pcell = game.player.tile();
    let radius = game.aura_radius;
    let bright = radius * game.aura_intensity;
    let reach = radius.ceil() as i32;

    // Tiles inside the aura, brighter near the player. Each tile is two
    // characters wide so the maze reads roughly square.
    for t in game.grid.iter() {
        if chebyshev(t.pos, pcell) > reach {
            continue;
        }
        let d = Vec2::from(t.pos).distance(ppos);
        if d > radius {
            continue;
        }
        let (glyph, color) = if t.is_wall {
            ("██", if d <= bright { Color::Grey } else { Color::DarkGrey })
        } else {
            ("··", Color::DarkGrey)
        };
        queue!(
            out,
            cursor::MoveTo(t.pos.x as u16 * 2, t.pos.y as u16),
            SetForegroundColor(color),
            Print(glyph)
        )?;
    }

    for ent in &game.entities {
        if ent.pos.distance(ppos) > radius {
            continue;
        }
        let cell = ent.pos.round();
        let (glyph, color) = match ent.role {
            Role::Portal => ("()", Color::Magenta),
            Role::Chaser(_) => ("&&", Color::Red),
        };
        queue!(
            out,
            cursor::MoveTo(cell.x as u16 * 2, cell.y as u16),
            SetForegroundColor(color),
            Print(glyph)
        )?;
    }

    queue!(
        out,
        cursor::MoveTo(pcell.x as u16 * 2, pcell.y as u16),
        SetForegroundColor(Color::Yellow),
        Print("@")
    )?;

    let status = match game.outcome {
        Outcome::Playing => "wasd/arrows move - r restart - q quit",
        Outcome::Escaped => "You reached the portal! r to run again, q to quit",
        Outcome::Caught => "Something caught you in the dark. r to retry, q to quit",
    };
    queue!(
        out,
        cursor::MoveTo(0, game.grid.height() as u16 + 1),
        SetForegroundColor(Color::White),
        Print(status)
    )?;

    out.flush()
}
