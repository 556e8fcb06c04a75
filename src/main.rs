//! Paper Glider entry point
//!
//! Terminal shell around the deterministic simulation: raw-mode setup, a
//! dedicated input thread, the menu / run / report screen flow, and the
//! frame-paced game loop. The simulation is rebuilt fresh for every run.

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use paper_glider::audio::{AudioManager, SoundEffect};
use paper_glider::consts::FRAME_MS;
use paper_glider::render::Screen;
use paper_glider::sim::{tick, GameEvent, GamePhase, GameState, TickInput};
use paper_glider::Settings;

const FRAME: Duration = Duration::from_millis(FRAME_MS);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so the window is always refreshed
/// before expiry while the key is actually down.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Seeding ───────────────────────────────────────────────────────────────────

/// Run seed: the PAPER_GLIDER_SEED env var wins, otherwise the clock.
fn pick_seed() -> u64 {
    if let Ok(value) = std::env::var("PAPER_GLIDER_SEED") {
        if let Ok(seed) = value.trim().parse() {
            return seed;
        }
        log::warn!("ignoring unparseable PAPER_GLIDER_SEED={value:?}");
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn sound_for(event: &GameEvent) -> SoundEffect {
    match event {
        GameEvent::PowerUpCollected(_) => SoundEffect::PowerUpCollect,
        GameEvent::BonusCollected(_) => SoundEffect::BonusCollect,
        GameEvent::ShieldBlock => SoundEffect::ShieldBlock,
        GameEvent::WindEnter => SoundEffect::WindGust,
        GameEvent::Crashed => SoundEffect::Crash,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "✈  PAPER  GLIDER  ✈";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(8),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if best > 0 {
        let best_str = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best_str.chars().count() as u16 / 2),
            cy.saturating_sub(6),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best_str))?;
    }

    let lines: &[(&str, Color)] = &[
        ("Hold SPACE to climb; release and glide down.", Color::White),
        ("Dodge the red blocks, ride or fight the wind.", Color::White),
        ("", Color::White),
        ("◈ Shield   » Speed   ❅ Slow-motion", Color::Cyan),
        ("● Coin +50   ★ Star +100", Color::Yellow),
        ("Any power-up arms a x1.5 score combo for a while.", Color::DarkGrey),
    ];
    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(3) + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }

    let prompt = "ENTER / SPACE : fly    Q : quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy + 5,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(prompt))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game-over report ──────────────────────────────────────────────────────────

enum ReportChoice {
    Retry,
    Menu,
    Quit,
}

fn show_report<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &GameState,
    best: u32,
) -> std::io::Result<ReportChoice> {
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let mut lines: Vec<(String, Color)> = vec![
        ("══════  FLIGHT REPORT  ══════".to_string(), Color::Red),
        (String::new(), Color::White),
        (format!("Score     {:>8}", state.score), Color::Yellow),
        (
            format!("Distance  {:>8}", state.travel as u32),
            Color::White,
        ),
        (
            format!("Survived  {:>7}s", state.frame * FRAME_MS / 1000),
            Color::White,
        ),
    ];
    if state.score >= best && best > 0 {
        lines.push(("NEW BEST!".to_string(), Color::Green));
    } else if best > 0 {
        lines.push((format!("Best      {:>8}", best), Color::DarkGrey));
    }
    lines.push((String::new(), Color::White));
    lines.push((
        "R : retry    M : menu    Q : quit".to_string(),
        Color::DarkGrey,
    ));

    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(3) + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                    return Ok(ReportChoice::Retry);
                }
                KeyCode::Char('m') | KeyCode::Char('M') => return Ok(ReportChoice::Menu),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(ReportChoice::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    /// Run finished (crash); show the report
    Ended,
    /// User asked to leave the program mid-run
    Quit,
}

/// Drive one run to completion.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event per key; the lift key counts as held while its entry
/// is fresher than `HOLD_WINDOW`. Terminals with release events clear the
/// entry immediately; classic terminals let it expire between OS repeats.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &mut GameState,
    screen: &mut Screen,
    audio: &AudioManager,
    settings: &Settings,
    best: u32,
) -> std::io::Result<LoopExit> {
    let mut rng = Pcg32::seed_from_u64(state.seed);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = TickInput::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                })) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                        match code {
                            // Quit ends the loop immediately, mid-frame
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P')
                                if kind == KeyEventKind::Press =>
                            {
                                input.pause = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Ok(Event::Resize(cols, rows)) => screen.resize(cols, rows),
                Ok(_) => {}
                Err(_) => break,
            }
        }

        input.lift = is_held(&key_frame, &KeyCode::Char(' '), frame)
            || is_held(&key_frame, &KeyCode::Up, frame);

        let events = tick(state, &input, &mut rng);
        for event in &events {
            audio.play(sound_for(event));
        }

        screen.render(out, state, best, settings.show_frames)?;

        if state.phase == GamePhase::GameOver {
            return Ok(LoopExit::Ended);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let settings = Settings::load();
    let audio = AudioManager::new(settings.effective_volume());
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);
    let mut best: u32 = 0;

    'menu: loop {
        match show_menu(out, rx, best)? {
            MenuResult::Quit => break,
            MenuResult::Start => loop {
                let seed = pick_seed();
                log::info!("starting run with seed {seed}");
                audio.play(SoundEffect::MenuSelect);

                let mut state = GameState::new(seed);
                let exit = game_loop(out, rx, &mut state, &mut screen, &audio, &settings, best)?;
                best = best.max(state.score);

                match exit {
                    LoopExit::Quit => break 'menu,
                    LoopExit::Ended => match show_report(out, rx, &state, best)? {
                        ReportChoice::Retry => continue,
                        ReportChoice::Menu => continue 'menu,
                        ReportChoice::Quit => break 'menu,
                    },
                }
            },
        }
    }

    settings.save();
    Ok(())
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them; classic
    // terminals fall back to the hold-window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop only ever
    // polls a channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
