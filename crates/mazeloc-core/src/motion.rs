//! The robot motion model.

use tinyvec::ArrayVec;

use crate::{Cell, Direction, GridOracle};

/// Legal single-step moves from a cell: at most "stay" plus four neighbors.
pub type LegalMoves = ArrayVec<[Cell; 5]>;

/// Enumerates legal robot moves over a grid.
///
/// A robot attempting to move into a wall or off the grid stays where it is.
/// Both the sensorless belief-set engine and the probabilistic filter derive
/// their transitions from this model.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Direction, Maze, MotionModel};
///
/// let maze: Maze = "RR#".parse()?;
/// let motion = MotionModel::new(&maze);
///
/// assert_eq!(motion.legal_moves(Cell::new(1, 0)).as_slice(), &[Cell::new(1, 0), Cell::new(0, 0)]);
/// assert_eq!(motion.bump(Cell::new(1, 0), Direction::East), Cell::new(1, 0));
/// assert_eq!(motion.bump(Cell::new(1, 0), Direction::West), Cell::new(0, 0));
/// assert!(motion.legal_moves(Cell::new(2, 0)).is_empty());
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MotionModel<G> {
    grid: G,
}

impl<G> MotionModel<G>
where
    G: GridOracle,
{
    /// Creates a motion model over `grid`.
    #[must_use]
    pub const fn new(grid: G) -> Self {
        Self { grid }
    }

    /// Returns the underlying grid.
    #[must_use]
    pub const fn grid(&self) -> &G {
        &self.grid
    }

    /// Returns every cell reachable from `cell` in one step.
    ///
    /// For a floor cell the result starts with `cell` itself (staying put is
    /// always possible) followed by each floor neighbor in N, S, E, W order.
    /// For a wall or out-of-bounds cell the result is empty.
    #[must_use]
    pub fn legal_moves(&self, cell: Cell) -> LegalMoves {
        let mut moves = LegalMoves::new();
        if !self.grid.is_floor(cell) {
            return moves;
        }
        moves.push(cell);
        for direction in Direction::ALL {
            let next = cell.neighbor(direction);
            if self.grid.is_floor(next) {
                moves.push(next);
            }
        }
        moves
    }

    /// Returns where a robot at `cell` ends up after trying to move in `direction`.
    ///
    /// This is the neighbor if it is a floor cell; otherwise the robot bumps
    /// into the obstacle and stays at `cell`.
    #[must_use]
    pub fn bump(&self, cell: Cell, direction: Direction) -> Cell {
        let next = cell.neighbor(direction);
        if self.grid.is_floor(next) { next } else { cell }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Color, Maze};

    fn open_room() -> Maze {
        "
            RGB
            YRG
            BYR
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_interior_cell_has_five_moves() {
        let maze = open_room();
        let motion = MotionModel::new(&maze);
        let center = Cell::new(1, 1);
        assert_eq!(
            motion.legal_moves(center).as_slice(),
            &[
                center,
                Cell::new(1, 2),
                Cell::new(1, 0),
                Cell::new(2, 1),
                Cell::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_corner_cell_has_three_moves() {
        let maze = open_room();
        let motion = MotionModel::new(&maze);
        assert_eq!(
            motion.legal_moves(Cell::new(2, 2)).as_slice(),
            &[Cell::new(2, 2), Cell::new(2, 1), Cell::new(1, 2)]
        );
    }

    #[test]
    fn test_non_floor_has_no_moves() {
        let maze: Maze = "R#".parse().unwrap();
        let motion = MotionModel::new(&maze);
        assert!(motion.legal_moves(Cell::new(1, 0)).is_empty());
        assert!(motion.legal_moves(Cell::new(-3, 7)).is_empty());
        assert_eq!(motion.legal_moves(Cell::new(0, 0)).as_slice(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn test_bump_against_boundary() {
        let maze = open_room();
        let motion = MotionModel::new(&maze);
        assert_eq!(motion.bump(Cell::new(0, 0), Direction::South), Cell::new(0, 0));
        assert_eq!(motion.bump(Cell::new(0, 0), Direction::North), Cell::new(0, 1));
    }

    fn arb_maze() -> impl Strategy<Value = Maze> {
        (1usize..6, 1usize..6).prop_flat_map(|(width, height)| {
            prop::collection::vec(
                prop::option::weighted(0.7, prop::sample::select(Color::ALL.to_vec())),
                width * height,
            )
            .prop_map(move |cells| Maze::from_cells(width, height, cells).unwrap())
        })
    }

    proptest! {
        #[test]
        fn test_legal_moves_contain_floor_cell(maze in arb_maze()) {
            let motion = MotionModel::new(&maze);
            for cell in maze.floor_cells() {
                let moves = motion.legal_moves(cell);
                prop_assert_eq!(moves.first(), Some(&cell));
                prop_assert!(moves.iter().all(|&m| maze.is_floor(m)));
                for direction in Direction::ALL {
                    prop_assert!(moves.contains(&motion.bump(cell, direction)));
                }
            }
        }
    }
}
