//! # ASCII Sky Rendering
//!
//! Development-mode renderer: draws one [`SkySnapshot`] as a character grid
//! on stdout. The real presentation surface is a collaborator outside this
//! crate; this view exists so the simulation can be eyeballed without any
//! graphics stack, mirroring how the library is meant to be consumed (read
//! the snapshot, map normalized coordinates onto your own viewport).

use crate::scene::SkySnapshot;
use crate::solar::SunEvent;

const COLS: usize = 72;
const SKY_ROWS: usize = 18;
const GROUND_ROWS: usize = 3;

/// Fixed star positions (column, row) sprinkled over the upper sky. The
/// layout is arbitrary but stable so successive frames don't twinkle.
const STARS: [(usize, usize); 14] = [
    (3, 1),
    (9, 4),
    (14, 2),
    (22, 6),
    (28, 1),
    (33, 5),
    (38, 3),
    (45, 7),
    (50, 2),
    (55, 6),
    (59, 4),
    (63, 1),
    (67, 8),
    (70, 3),
];

/// Map a normalized [0, 100] coordinate onto a grid axis.
fn to_grid(value: f64, cells: usize) -> usize {
    let scaled = (value / 100.0 * (cells as f64 - 1.0)).round();
    (scaled.max(0.0) as usize).min(cells - 1)
}

/// Glyph for the moon's current phase shape.
fn moon_glyph(terminator: f64, waxing: bool) -> char {
    if terminator < 0.15 {
        'o' // near-new: dark disc outline
    } else if terminator > 0.85 {
        'O' // full disc
    } else if waxing {
        ')' // lit on the right
    } else {
        '(' // lit on the left
    }
}

fn format_event(event: &SunEvent) -> String {
    match event {
        SunEvent::At(t) => t.format("%H:%M").to_string(),
        SunEvent::AllAbove => "always up".to_string(),
        SunEvent::AllBelow => "never up".to_string(),
    }
}

/// Render a snapshot to stdout.
pub fn draw_ascii(snapshot: &SkySnapshot) {
    let mut grid = vec![vec![' '; COLS]; SKY_ROWS + GROUND_ROWS];

    // Star layer first so discs draw over it.
    if snapshot.sky.show_stars && snapshot.sky.star_opacity > 0.0 {
        // Opacity thins the field rather than dimming glyphs.
        let visible = (STARS.len() as f64 * snapshot.sky.star_opacity).round() as usize;
        for &(col, row) in STARS.iter().take(visible) {
            if row < SKY_ROWS && col < COLS {
                grid[row][col] = '.';
            }
        }
    }

    // Moon, then sun, so the sun wins a shared cell.
    if snapshot.moon.visible {
        let col = to_grid(snapshot.moon.screen.x, COLS);
        let row = to_grid(snapshot.moon.screen.y, SKY_ROWS + 1).min(SKY_ROWS - 1);
        grid[row][col] = moon_glyph(snapshot.moon.terminator, snapshot.moon.phase.waxing);
    }
    if snapshot.sun.visible {
        let col = to_grid(snapshot.sun.screen.x, COLS);
        let row = to_grid(snapshot.sun.screen.y, SKY_ROWS + 1).min(SKY_ROWS - 1);
        grid[row][col] = '@';
    }

    // Horizon and ground texture.
    for col in 0..COLS {
        grid[SKY_ROWS][col] = '=';
        for ground_row in 1..GROUND_ROWS {
            grid[SKY_ROWS + ground_row][col] = if col % 3 == 0 { '\'' } else { ' ' };
        }
    }

    println!(
        "{} {}  [{}]",
        snapshot.date_text,
        snapshot.time_text,
        snapshot.sky.band.label()
    );
    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }
    println!(
        "dawn {}  rise {}  noon {}  set {}  dusk {}",
        format_event(&snapshot.times.dawn),
        format_event(&snapshot.times.sunrise),
        snapshot.times.solar_noon.format("%H:%M"),
        format_event(&snapshot.times.sunset),
        format_event(&snapshot.times.dusk),
    );
    println!(
        "sun alt {:>6.2}  az {:>6.2}  disc {}   moon phase {:.3} illum {:.2} {}",
        snapshot.sun.position.altitude,
        snapshot.sun.position.azimuth,
        snapshot.sun.color,
        snapshot.moon.phase.phase,
        snapshot.moon.phase.illumination,
        if snapshot.moon.phase.waxing {
            "waxing"
        } else {
            "waning"
        },
    );
    println!(
        "sky {} → {}  ground {}  border {}  stars {:.2}",
        snapshot.sky.top,
        snapshot.sky.bottom,
        snapshot.sky.ground,
        snapshot.sky.border,
        snapshot.sky.star_opacity,
    );
}
