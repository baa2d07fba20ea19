//! Demo runner (default binary).
//!
//! Lays out two panes and a status line as surfaces over one shared screen
//! grid, grows an offscreen scratch surface, and prints the composed screen
//! as plain text. With `--json`, each surface's view geometry follows.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dispview::config::{parse_demo_args, DemoConfig};
use dispview::surface::{screen, Style, Surface, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_demo_args(&args)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    run(&config)
}

fn run(config: &DemoConfig) -> Result<()> {
    let (w, h) = (config.width, config.height);
    let grid = screen(w, h);
    info!(width = w, height = h, "allocated screen grid");

    let left_w = w / 2;
    let body_h = h - 1;
    let mut left = Surface::over(&grid, Viewport::new(0, 0, left_w, body_h))?;
    let mut right = Surface::over(&grid, Viewport::new(left_w, 0, w - left_w, body_h))?;
    let mut status = Surface::over(&grid, Viewport::new(0, body_h, w, 1))?;

    left.fill_rect(0, 0, left.width(), left.height(), '.', Style::PLAIN);
    left.put_str(1, 1, "left pane", Style::PLAIN.bold());
    right.fill_rect(0, 0, right.width(), right.height(), ':', Style::PLAIN);
    right.put_str(1, 1, "right pane", Style::PLAIN);

    // Shrink the right pane and slide it over; the left pane is untouched.
    let shift = 2.min(right.width() - 1);
    right.resize(right.width() - shift, body_h)?;
    right.move_to(left_w + shift, 0)?;
    right.put_str(0, body_h - 1, "moved", Style::PLAIN);

    // An aliased surface cannot grow past the screen.
    if let Err(err) = status.resize(w.saturating_add(1), 1) {
        info!(%err, "status line kept its size");
    }

    // Scratch space grows freely and keeps what was drawn.
    let mut scratch = Surface::offscreen(4, 1, (4, 0))?;
    scratch.put_str(0, 0, "grow", Style::PLAIN);
    scratch.resize(12, 2)?;
    scratch.put_str(4, 0, "-able", Style::PLAIN);
    let note = scratch.lines()?.join("|");
    status.put_str(0, 0, note.trim_end(), Style::PLAIN);

    let whole = Surface::over(&grid, Viewport::sized(w, h))?;
    for line in whole.lines()? {
        println!("{}", line);
    }

    if config.json {
        let geometry = [
            ("left", left.geometry()),
            ("right", right.geometry()),
            ("status", status.geometry()),
            ("scratch", scratch.geometry()),
        ];
        let mut report = serde_json::Map::new();
        for (name, g) in geometry {
            report.insert(name.to_string(), serde_json::to_value(g)?);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
