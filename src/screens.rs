//! The modal screens around the game: each runs its own render-input loop
//! and returns a navigation result to the outer dispatch loop in `main`.

use std::path::Path;

use macroquad::prelude::*;

use crate::save::{self, PlayerProgress, ScoreEntry};
use crate::skins;

pub enum MenuChoice {
    Play,
    Shop,
    Quit,
}

fn draw_centered(text: &str, y: f32, size: u16, color: Color) {
    let m = measure_text(text, None, size, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, size as f32, color);
}

fn rank_color(rank: usize) -> Color {
    match rank {
        0 => GOLD,
        1 | 2 => GREEN,
        _ => WHITE,
    }
}

pub async fn main_menu(progress: &PlayerProgress) -> MenuChoice {
    let skin_name = skins::get(progress.selected).map_or("?", |s| s.name);
    loop {
        if is_quit_requested() || is_key_pressed(KeyCode::Q) {
            return MenuChoice::Quit;
        }

        clear_background(BLACK);
        draw_centered("Snake Game", 100.0, 48, WHITE);
        draw_centered(&format!("Doubloons: {}", progress.doubloons), 160.0, 32, GREEN);
        draw_centered(&format!("Current: {skin_name}"), 200.0, 32, SKYBLUE);
        draw_centered("SPACE: Play", 260.0, 32, SKYBLUE);
        draw_centered("S: Shop", 300.0, 32, WHITE);
        draw_centered("H: High Scores", 340.0, 32, WHITE);
        draw_centered("Q: Quit", 380.0, 32, WHITE);

        if is_key_pressed(KeyCode::Space) {
            return MenuChoice::Play;
        }
        if is_key_pressed(KeyCode::S) {
            return MenuChoice::Shop;
        }
        if is_key_pressed(KeyCode::H) && show_highscores().await {
            return MenuChoice::Quit;
        }
        next_frame().await;
    }
}

/// Read-only top-10 listing. Returns true if the window-close signal
/// arrived while it was up.
pub async fn show_highscores() -> bool {
    let table = save::load_highscores(Path::new(save::HIGHSCORES_FILE));
    loop {
        if is_quit_requested() {
            return true;
        }
        clear_background(BLACK);
        draw_centered("HIGH SCORES", 100.0, 48, WHITE);
        for (i, e) in table.iter().enumerate() {
            draw_centered(
                &format!("{}. {}: {}", i + 1, e.name, e.score),
                180.0 + i as f32 * 40.0,
                32,
                rank_color(i),
            );
        }
        draw_centered("SPACE: Back", screen_height() - 100.0, 32, SKYBLUE);
        if is_key_pressed(KeyCode::Space) {
            return false;
        }
        next_frame().await;
    }
}

/// Cursor over the catalog; Enter selects or buys, Space leaves. Mutations
/// are persisted immediately. Returns true on window close.
pub async fn shop_menu(progress: &mut PlayerProgress) -> bool {
    let catalog = skins::all();
    let mut cursor = 0usize;
    loop {
        if is_quit_requested() {
            return true;
        }

        clear_background(BLACK);
        draw_centered("SNAKE SHOP", 80.0, 48, WHITE);
        draw_centered(&format!("Doubloons: {}", progress.doubloons), 130.0, 32, GREEN);
        for (i, skin) in catalog.iter().enumerate() {
            let owned = progress.owns(skin.id);
            let mut row = if i == cursor {
                format!("> {}", skin.name)
            } else {
                skin.name.to_string()
            };
            if owned {
                row.push_str(" (Owned)");
            } else {
                row.push_str(&format!(" - {} doubloons", skin.price));
            }
            let color = if i == cursor {
                SKYBLUE
            } else if owned {
                GREEN
            } else {
                WHITE
            };
            draw_centered(&row, 200.0 + i as f32 * 50.0, 32, color);
        }
        draw_centered(
            "Up/Down: Move  ENTER: Buy/Select  SPACE: Back",
            screen_height() - 80.0,
            24,
            WHITE,
        );

        if is_key_pressed(KeyCode::Up) {
            cursor = (cursor + catalog.len() - 1) % catalog.len();
        } else if is_key_pressed(KeyCode::Down) {
            cursor = (cursor + 1) % catalog.len();
        } else if is_key_pressed(KeyCode::Enter) {
            if progress.choose(&catalog[cursor]) {
                save::save_progress(Path::new(save::PLAYER_DATA_FILE), progress);
            }
        } else if is_key_pressed(KeyCode::Space) {
            return false;
        }
        next_frame().await;
    }
}

/// Free-text capture for the score table: alphabetic, at most
/// [`save::MAX_NAME_LEN`] characters, uppercased. Empty commits as "PLAYER";
/// so does the window-close signal.
pub async fn enter_name(score: u32) -> String {
    // Drop keystrokes queued up before this screen appeared.
    while get_char_pressed().is_some() {}

    let mut name = String::new();
    loop {
        if is_quit_requested() {
            return "PLAYER".to_string();
        }

        clear_background(BLACK);
        let cy = screen_height() * 0.5;
        draw_centered(&format!("New High Score: {score}!"), cy - 100.0, 48, GREEN);
        draw_centered("Enter Name (max 10 chars):", cy - 30.0, 32, WHITE);
        let cursor = if get_time() % 1.0 < 0.5 { "|" } else { "" };
        draw_centered(&format!("{name}{cursor}"), cy + 30.0, 48, WHITE);
        draw_centered("ENTER: Save  BACKSPACE: Delete", cy + 80.0, 24, WHITE);

        if is_key_pressed(KeyCode::Enter) {
            return if name.is_empty() {
                "PLAYER".to_string()
            } else {
                name
            };
        }
        if is_key_pressed(KeyCode::Backspace) {
            name.pop();
        }
        while let Some(c) = get_char_pressed() {
            if c.is_ascii_alphabetic() && name.len() < save::MAX_NAME_LEN {
                name.push(c.to_ascii_uppercase());
            }
        }
        next_frame().await;
    }
}

/// Final screen of a session: records a qualifying score (via name entry)
/// and shows the resulting table with the new entry highlighted. Returns
/// true on window close.
pub async fn game_over(score: u32) -> bool {
    let path = Path::new(save::HIGHSCORES_FILE);
    let mut table = save::load_highscores(path);
    let mut achieved: Option<ScoreEntry> = None;

    if save::qualifies(&table, score) {
        let name = enter_name(score).await;
        save::save_highscore_entry(path, &name, score);
        table = save::load_highscores(path);
        achieved = Some(ScoreEntry { name, score });
    }

    loop {
        if is_quit_requested() {
            return true;
        }
        clear_background(BLACK);
        let cy = screen_height() * 0.5;
        draw_centered("GAME OVER", cy - 120.0, 48, RED);
        draw_centered(&format!("Score: {score}"), cy - 70.0, 32, WHITE);
        draw_centered("Top 10:", cy - 20.0, 32, WHITE);
        for (i, e) in table.iter().enumerate() {
            let color = if achieved.as_ref() == Some(e) {
                GOLD
            } else {
                WHITE
            };
            draw_centered(
                &format!("{}. {}: {}", i + 1, e.name, e.score),
                cy + 20.0 + i as f32 * 25.0,
                24,
                color,
            );
        }
        draw_centered("SPACE: Menu", screen_height() - 100.0, 32, SKYBLUE);
        if is_key_pressed(KeyCode::Space) {
            return false;
        }
        next_frame().await;
    }
}
