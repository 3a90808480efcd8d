use std::path::Path;

use macroquad::prelude::*;

mod audio;
mod game;
mod grid;
mod save;
mod screens;
mod skins;

use game::SessionEnd;
use screens::MenuChoice;

fn window_conf() -> Conf {
    Conf {
        window_title: "Doubloon Snake".to_owned(),
        window_width: grid::SCREEN_WIDTH,
        window_height: grid::SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Window close becomes a quit signal every screen checks per frame.
    prevent_quit();

    let sounds = audio::GameSounds::load().await;
    let scores_path = Path::new(save::HIGHSCORES_FILE);
    let progress_path = Path::new(save::PLAYER_DATA_FILE);
    save::ensure_highscores_file(scores_path);
    let mut progress = save::load_progress(progress_path);

    loop {
        match screens::main_menu(&progress).await {
            MenuChoice::Play => {
                let skin = skins::get(progress.selected).unwrap_or(&skins::CATALOG[0]);
                let end = game::play_game(skin, &sounds).await;
                progress.doubloons += end.score() / 10 * skin.doubloon_mult;
                save::save_progress(progress_path, &progress);
                match end {
                    SessionEnd::Closed(_) => break,
                    SessionEnd::Collision(score) | SessionEnd::Quit(score) => {
                        if screens::game_over(score).await {
                            break;
                        }
                    }
                }
            }
            MenuChoice::Shop => {
                if screens::shop_menu(&mut progress).await {
                    break;
                }
            }
            MenuChoice::Quit => break,
        }
    }
}
