//! The snake simulation and the screen that drives it in real time.
//! `SnakeGame::step` advances exactly one tick and is independent of
//! rendering and wall-clock timing.

use macroquad::prelude::*;

use crate::audio::{Cue, GameSounds};
use crate::grid::{Cell, Direction, GRID_HEIGHT, GRID_WIDTH};
use crate::skins::SkinDef;

const BASE_TICK_RATE: i32 = 8;
const LEVEL_SPEEDUP: i32 = 2;
const POINTS_PER_LEVEL: u32 = 50;
const POWER_CHANCE: f32 = 0.10;

const HUD_PANEL: Color = Color::new(0.08, 0.08, 0.08, 0.7);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FoodKind {
    Normal,
    Power,
}

impl FoodKind {
    fn roll() -> FoodKind {
        if macroquad::rand::gen_range(0.0, 1.0) < POWER_CHANCE {
            FoodKind::Power
        } else {
            FoodKind::Normal
        }
    }

    fn points(self) -> u32 {
        match self {
            FoodKind::Normal => 10,
            FoodKind::Power => 20,
        }
    }

    fn color(self) -> Color {
        match self {
            FoodKind::Normal => RED,
            FoodKind::Power => YELLOW,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tick {
    Moved,
    Ate(FoodKind),
    Collided,
}

/// How a session ended and the score it ended with. `Closed` is the
/// window-close signal and unwinds all the way out of the program.
pub enum SessionEnd {
    Collision(u32),
    Quit(u32),
    Closed(u32),
}

impl SessionEnd {
    pub fn score(&self) -> u32 {
        match self {
            SessionEnd::Collision(s) | SessionEnd::Quit(s) | SessionEnd::Closed(s) => *s,
        }
    }
}

pub struct SnakeGame {
    body: Vec<Cell>, // tail first, head last
    direction: Direction,
    pending: Direction,
    food: Cell,
    food_kind: FoodKind,
    score: u32,
    base_rate: i32,
}

impl SnakeGame {
    pub fn new(skin: &SkinDef) -> Self {
        let cx = GRID_WIDTH / 2;
        let cy = GRID_HEIGHT / 2;
        let len = skin.start_len as i32;
        let body: Vec<Cell> = (0..len)
            .map(|i| Cell {
                x: cx - (len - 1 - i),
                y: cy,
            })
            .collect();
        let food = spawn_food(&body);
        SnakeGame {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
            food,
            food_kind: FoodKind::roll(),
            score: 0,
            base_rate: BASE_TICK_RATE + skin.speed_bonus,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.score / POINTS_PER_LEVEL + 1
    }

    fn tick_rate(&self) -> i32 {
        (self.base_rate + (self.level() as i32 - 1) * LEVEL_SPEEDUP).max(1)
    }

    pub fn tick_interval(&self) -> f64 {
        1.0 / self.tick_rate() as f64
    }

    fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Buffers a heading change; reversing the current heading is ignored.
    pub fn steer(&mut self, dir: Direction) {
        if !dir.is_reverse_of(self.direction) {
            self.pending = dir;
        }
    }

    pub fn step(&mut self) -> Tick {
        self.direction = self.pending;
        let new_head = self.head().step(self.direction);
        self.body.push(new_head);

        let mut ate = None;
        if new_head == self.food {
            self.score += self.food_kind.points();
            ate = Some(self.food_kind);
            self.food = spawn_food(&self.body);
            self.food_kind = FoodKind::roll();
        } else {
            // The vacated tail cell is free again before the collision check.
            self.body.remove(0);
        }

        let head_index = self.body.len() - 1;
        if !new_head.in_bounds() || self.body[..head_index].contains(&new_head) {
            return Tick::Collided;
        }
        match ate {
            Some(kind) => Tick::Ate(kind),
            None => Tick::Moved,
        }
    }

    fn draw(&self, skin: &SkinDef) {
        let food = self.food.to_rect();
        draw_rectangle(food.x, food.y, food.w, food.h, self.food_kind.color());
        for cell in &self.body {
            let r = cell.to_rect();
            draw_rectangle(r.x, r.y, r.w, r.h, skin.color);
        }

        draw_rectangle(0.0, 0.0, 260.0, 120.0, HUD_PANEL);
        draw_text(
            &format!("Score: {}  Level: {}", self.score, self.level()),
            12.0,
            40.0,
            32.0,
            WHITE,
        );
        draw_text(&format!("Snake: {}", skin.name), 12.0, 72.0, 24.0, SKYBLUE);
        draw_text(
            &format!("Earned: {}", self.score / 10 * skin.doubloon_mult),
            12.0,
            100.0,
            24.0,
            GOLD,
        );
    }
}

fn spawn_food(occupied: &[Cell]) -> Cell {
    loop {
        let cell = Cell {
            x: macroquad::rand::gen_range(0, GRID_WIDTH),
            y: macroquad::rand::gen_range(0, GRID_HEIGHT),
        };
        if !occupied.contains(&cell) {
            return cell;
        }
    }
}

/// One full session, blocking until the snake dies or the player quits.
pub async fn play_game(skin: &SkinDef, sounds: &GameSounds) -> SessionEnd {
    let mut game = SnakeGame::new(skin);
    let mut paused = false;
    let mut last_tick = get_time();

    loop {
        if is_quit_requested() {
            return SessionEnd::Closed(game.score());
        }

        if is_key_pressed(KeyCode::P) {
            paused = !paused;
            if !paused {
                // Time spent paused does not count toward the next tick.
                last_tick = get_time();
            }
        }

        if paused {
            if is_key_pressed(KeyCode::Q) {
                return SessionEnd::Quit(game.score());
            }
            clear_background(BLACK);
            game.draw(skin);
            let m = measure_text("PAUSED", None, 48, 1.0);
            draw_text(
                "PAUSED",
                (screen_width() - m.width) * 0.5,
                screen_height() * 0.5,
                48.0,
                WHITE,
            );
            let hint = "P: Resume  Q: Quit";
            let mh = measure_text(hint, None, 24, 1.0);
            draw_text(
                hint,
                (screen_width() - mh.width) * 0.5,
                screen_height() * 0.5 + 50.0,
                24.0,
                WHITE,
            );
            next_frame().await;
            continue;
        }

        if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
            game.steer(Direction::Left);
        } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
            game.steer(Direction::Right);
        } else if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            game.steer(Direction::Up);
        } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
            game.steer(Direction::Down);
        }

        if get_time() - last_tick >= game.tick_interval() {
            last_tick = get_time();
            match game.step() {
                Tick::Moved => {}
                Tick::Ate(_) => sounds.play(Cue::Eat),
                Tick::Collided => {
                    sounds.play(Cue::Collision);
                    return SessionEnd::Collision(game.score());
                }
            }
        }

        clear_background(BLACK);
        game.draw(skin);
        next_frame().await;
    }
}
