use crate::error::EngineError;
use std::ops::Add;

// GRID (5x5 shown, row-major, y grows downward)
// (0,0) | (1,0) | (2,0) | (3,0) | (4,0)      North = (0,-1)
// (0,1) | (1,1) | (2,1) | (3,1) | (4,1)      East  = (1,0)
// (0,2) | (1,2) | (2,2) | (3,2) | (4,2)      South = (0,1)
// (0,3) | (1,3) | (2,3) | (3,3) | (4,3)      West  = (-1,0)
// (0,4) | (1,4) | (2,4) | (3,4) | (4,4)
pub type Marker = u32;

pub const EMPTY: Marker = 0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Marker>,
}

/// Number of cells in a `width` x `height` grid, or `None` if either side is
/// negative or the product does not fit in `usize`.
fn cell_count(width: i32, height: i32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let height = usize::try_from(height).ok()?;
    width.checked_mul(height)
}

impl Grid {
    /// Empty grid. Dimensions with no valid cell count give a 0x0 grid.
    pub fn new(width: i32, height: i32) -> Self {
        match cell_count(width, height) {
            Some(len) => Self {
                width,
                height,
                cells: vec![EMPTY; len],
            },
            None => Self {
                width: 0,
                height: 0,
                cells: vec![],
            },
        }
    }

    /// Builds a grid from row-major markers, rejecting a vector that does not
    /// match the declared dimensions.
    pub fn from_cells(width: i32, height: i32, cells: Vec<Marker>) -> Result<Self, EngineError> {
        if cell_count(width, height) != Some(cells.len()) {
            return Err(EngineError::GridShape {
                width,
                height,
                cells: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_inside(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Callers must check `is_inside` first.
    pub fn occupancy_at(&self, cell: Cell) -> Marker {
        debug_assert!(self.is_inside(cell), "{:?} is outside the grid", cell);
        self.cells[self.index(cell)]
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        self.is_inside(cell) && self.occupancy_at(cell) == EMPTY
    }

    /// Marks a cell while a snapshot is being assembled. Out-of-bounds cells
    /// are ignored.
    pub fn set(&mut self, cell: Cell, marker: Marker) {
        if self.is_inside(cell) {
            let i = self.index(cell);
            self.cells[i] = marker;
        }
    }

    pub fn cells(&self) -> &[Marker] {
        &self.cells
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    pub fn print(&self) {
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let marker = self.cells[self.index(Cell::new(x, y))];
                if marker == EMPTY {
                    out.push_str(" __ ");
                } else {
                    out.push_str(&format!(" {:>2} ", marker));
                }
            }
            out.push('\n');
        }

        print!("{}", out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: Cell,
}

impl Player {
    pub fn create(name: impl Into<String>, position: Cell) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// One tick's snapshot. Never mutated once handed to the engine.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub players: Vec<Player>,
    pub frame: u64,
}

impl GameState {
    pub fn create(grid: Grid, players: Vec<Player>, frame: u64) -> Self {
        Self {
            grid,
            players,
            frame,
        }
    }

    /// Resolves a player by exact name match.
    pub fn find_player(&self, name: &str) -> Result<&Player, EngineError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_grid_bounds() {
        let g = Grid::new(5, 4);

        assert!(g.is_inside(Cell::new(0, 0)));
        assert!(g.is_inside(Cell::new(4, 3)));
        assert!(!g.is_inside(Cell::new(5, 0)));
        assert!(!g.is_inside(Cell::new(0, 4)));
        assert!(!g.is_inside(Cell::new(-1, 0)));
        assert!(!g.is_inside(Cell::new(0, -1)));
    }

    #[test]
    fn occupancy_and_passability() {
        let mut g = Grid::new(3, 3);
        g.set(Cell::new(1, 1), 7);

        assert_eq!(g.occupancy_at(Cell::new(1, 1)), 7);
        assert_eq!(g.occupancy_at(Cell::new(0, 1)), EMPTY);
        assert!(!g.is_passable(Cell::new(1, 1)));
        assert!(g.is_passable(Cell::new(2, 2)));
        assert!(!g.is_passable(Cell::new(3, 2)));
    }

    #[test]
    fn set_outside_is_ignored() {
        let mut g = Grid::new(2, 2);
        g.set(Cell::new(-1, 0), 1);
        g.set(Cell::new(2, 0), 1);

        assert_eq!(g.cells(), &[0, 0, 0, 0]);
    }

    #[test]
    fn from_cells_is_row_major() {
        let g = Grid::from_cells(3, 2, vec![0, 1, 0, 0, 0, 2]).unwrap();

        assert_eq!(g.occupancy_at(Cell::new(1, 0)), 1);
        assert_eq!(g.occupancy_at(Cell::new(2, 1)), 2);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(3, 3, vec![0; 8]).unwrap_err();

        assert_eq!(
            err,
            EngineError::GridShape {
                width: 3,
                height: 3,
                cells: 8
            }
        );
    }

    #[test]
    fn from_cells_rejects_overflowing_dimensions() {
        // 65536 * 65536 wraps to 0 in i32
        let err = Grid::from_cells(65536, 65536, vec![]).unwrap_err();
        assert_eq!(
            err,
            EngineError::GridShape {
                width: 65536,
                height: 65536,
                cells: 0
            }
        );

        assert!(Grid::from_cells(i32::MAX, i32::MAX, vec![]).is_err());
        assert!(Grid::from_cells(-2, -3, vec![0; 6]).is_err());
    }

    #[test]
    fn from_cells_accepts_empty_grid() {
        let g = Grid::from_cells(0, 7, vec![]).unwrap();

        assert!(!g.is_passable(Cell::new(0, 0)));
    }

    #[test]
    fn new_with_negative_side_is_empty() {
        let g = Grid::new(-3, 4);

        assert_eq!(g.width(), 0);
        assert_eq!(g.height(), 0);
        assert!(g.cells().is_empty());
        assert!(!g.is_inside(Cell::new(0, 0)));
    }

    #[test]
    fn manhattan_distance() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, -4);

        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn find_player_by_exact_name() {
        let state = GameState::create(
            Grid::new(5, 5),
            vec![
                Player::create("alpha", Cell::new(0, 0)),
                Player::create("alphabet", Cell::new(4, 4)),
            ],
            0,
        );

        assert_eq!(state.find_player("alphabet").unwrap().position, Cell::new(4, 4));
        assert_eq!(
            state.find_player("alp").unwrap_err(),
            EngineError::PlayerNotFound(String::from("alp"))
        );
    }
}
