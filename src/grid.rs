use macroquad::prelude::*;

// Playfield constants
pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const BLOCK_SIZE: i32 = 20;
pub const GRID_WIDTH: i32 = SCREEN_WIDTH / BLOCK_SIZE;
pub const GRID_HEIGHT: i32 = SCREEN_HEIGHT / BLOCK_SIZE;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            (self.x * BLOCK_SIZE) as f32,
            (self.y * BLOCK_SIZE) as f32,
            BLOCK_SIZE as f32,
            BLOCK_SIZE as f32,
        )
    }

    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH && self.y >= 0 && self.y < GRID_HEIGHT
    }

    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx == -ox && dy == -oy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_pairs() {
        assert!(Direction::Up.is_reverse_of(Direction::Down));
        assert!(Direction::Left.is_reverse_of(Direction::Right));
        assert!(!Direction::Up.is_reverse_of(Direction::Left));
        assert!(!Direction::Right.is_reverse_of(Direction::Right));
    }

    #[test]
    fn bounds_are_exclusive_at_the_far_edge() {
        assert!(Cell { x: 0, y: 0 }.in_bounds());
        assert!(Cell { x: GRID_WIDTH - 1, y: GRID_HEIGHT - 1 }.in_bounds());
        assert!(!Cell { x: -1, y: 0 }.in_bounds());
        assert!(!Cell { x: GRID_WIDTH, y: 0 }.in_bounds());
        assert!(!Cell { x: 0, y: GRID_HEIGHT }.in_bounds());
    }

    #[test]
    fn step_moves_one_cell() {
        let c = Cell { x: 5, y: 5 };
        assert_eq!(c.step(Direction::Up), Cell { x: 5, y: 4 });
        assert_eq!(c.step(Direction::Right), Cell { x: 6, y: 5 });
    }
}
