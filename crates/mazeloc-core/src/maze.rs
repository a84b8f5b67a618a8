//! Text-format mazes.
//!
//! A maze file is a block of grid rows plus optional robot directives:
//!
//! ```text
//! RGB#Y
//! Y#RRG
//! \robot 0 0
//! ```
//!
//! - `#` marks a wall; `R`, `G`, `B`, `Y` mark a floor cell of that color.
//! - Blank lines are ignored and every line is trimmed.
//! - A line starting with `\` is a directive. `\robot x y` places a robot at
//!   `(x, y)`; robots are numbered in the order they appear, starting at 0.
//! - The **last** grid line is row `y = 0`, so the maze reads the way it is
//!   drawn with the origin at the bottom-left.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Cell, Color, GridOracle, oracle::coord};

/// Errors produced while building or parsing a [`Maze`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MazeError {
    /// The input contained no grid rows.
    #[display("maze has no grid rows")]
    Empty,
    /// A grid row's width differs from the first row's width.
    #[display("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        /// 1-based line number in the source text.
        line: usize,
        /// Width of the first grid row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A grid row contained a character that is neither a wall nor a color.
    #[display("line {line}, column {column}: invalid cell character {character:?}")]
    InvalidCell {
        /// 1-based line number in the source text.
        line: usize,
        /// 0-based column in the grid row.
        column: usize,
        /// The offending character.
        character: char,
    },
    /// A directive line could not be parsed.
    #[display("line {line}: malformed directive {text:?}")]
    MalformedDirective {
        /// 1-based line number in the source text.
        line: usize,
        /// The directive text.
        text: String,
    },
    /// A directive name is not recognized.
    #[display("line {line}: unknown directive {name:?}")]
    UnknownDirective {
        /// 1-based line number in the source text.
        line: usize,
        /// The directive name, without the leading backslash.
        name: String,
    },
    /// A robot was placed outside the grid or on a wall.
    #[display("robot {robot} placed at {cell}, which is not a floor cell")]
    RobotNotOnFloor {
        /// Index of the robot in placement order.
        robot: usize,
        /// Requested placement.
        cell: Cell,
    },
    /// The number of cells does not match `width * height`.
    #[display("expected {expected} cells for the given dimensions, found {found}")]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied cell vector.
        found: usize,
    },
    /// A dimension is too large to address with cell coordinates.
    #[display("maze dimensions {width}x{height} are too large")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

/// An immutable colored grid maze with robot placements.
///
/// `Maze` is the concrete [`GridOracle`] used throughout the workspace. The
/// grid never changes after construction; robot positions to be drawn during a
/// simulation are passed to [`Maze::render_with`] instead of being written into
/// the maze.
///
/// # Examples
///
/// ```
/// use mazeloc_core::{Cell, Color, GridOracle as _, Maze};
///
/// let maze: Maze = "
///     #RG
///     BY#
///     \\robot 1 0
/// "
/// .parse()?;
///
/// assert_eq!((maze.width(), maze.height()), (3, 2));
/// assert_eq!(maze.color(Cell::new(0, 0)), Some(Color::Blue));
/// assert_eq!(maze.color(Cell::new(0, 1)), None);
/// assert_eq!(maze.robots(), &[Cell::new(1, 0)]);
/// assert_eq!(maze.to_string(), "      #RG\n      B1#\n");
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Row-major from the bottom row: index `y * width + x`.
    cells: Vec<Option<Color>>,
    robots: Vec<Cell>,
}

impl Maze {
    /// Builds a maze from cells listed row by row, starting at the bottom row.
    ///
    /// `None` marks a wall. The maze has no robots.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::CellCount`] if `cells.len() != width * height`,
    /// [`MazeError::Empty`] if either dimension is zero, and
    /// [`MazeError::TooLarge`] if a dimension exceeds the coordinate range.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazeloc_core::{Cell, Color, GridOracle as _, Maze};
    ///
    /// let maze = Maze::from_cells(2, 1, vec![Some(Color::Red), None])?;
    /// assert!(maze.is_floor(Cell::new(0, 0)));
    /// assert!(!maze.is_floor(Cell::new(1, 0)));
    /// # Ok::<(), mazeloc_core::MazeError>(())
    /// ```
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Option<Color>>,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::Empty);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(MazeError::TooLarge { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(MazeError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            robots: Vec::new(),
        })
    }

    /// Returns a copy of this maze with an additional robot at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::RobotNotOnFloor`] if `cell` is not a floor cell.
    pub fn with_robot(mut self, cell: Cell) -> Result<Self, MazeError> {
        self.place_robot(cell)?;
        Ok(self)
    }

    /// Returns robot placements in placement order.
    #[must_use]
    pub fn robots(&self) -> &[Cell] {
        &self.robots
    }

    /// Returns a renderer that draws `robots` over the grid as `1`, `2`, ...
    ///
    /// The maze's own robot placements are ignored.
    #[must_use]
    pub fn render_with<'a>(&'a self, robots: &'a [Cell]) -> MazeRender<'a> {
        MazeRender {
            maze: self,
            overlay: Overlay::Robots(robots),
        }
    }

    /// Returns a renderer that draws `mark` on every cell in `cells`.
    ///
    /// This is used to show every cell a robot might occupy.
    #[must_use]
    pub fn render_marked<'a>(&'a self, cells: &'a [Cell], mark: char) -> MazeRender<'a> {
        MazeRender {
            maze: self,
            overlay: Overlay::Marks(cells, mark),
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        Some(y * self.width + x)
    }

    fn place_robot(&mut self, cell: Cell) -> Result<(), MazeError> {
        if !self.is_floor(cell) {
            return Err(MazeError::RobotNotOnFloor {
                robot: self.robots.len(),
                cell,
            });
        }
        self.robots.push(cell);
        Ok(())
    }
}

impl GridOracle for Maze {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn color(&self, cell: Cell) -> Option<Color> {
        self.index(cell).and_then(|i| self.cells[i])
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Option<Color>>> = Vec::new();
        let mut placements = Vec::new();

        for (i, line) in s.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(directive) = line.strip_prefix('\\') {
                placements.push(parse_robot_directive(line_no, directive)?);
                continue;
            }

            let row = line
                .chars()
                .enumerate()
                .map(|(column, character)| match character {
                    '#' => Ok(None),
                    _ => Color::from_char(character).map(Some).ok_or(MazeError::InvalidCell {
                        line: line_no,
                        column,
                        character,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = rows.first()
                && first.len() != row.len()
            {
                return Err(MazeError::RaggedRow {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        // The last line read is the bottom row.
        let cells = rows.into_iter().rev().flatten().collect();
        let mut maze = Self::from_cells(width, height, cells)?;
        for cell in placements {
            maze.place_robot(cell)?;
        }
        Ok(maze)
    }
}

fn parse_robot_directive(line: usize, directive: &str) -> Result<Cell, MazeError> {
    let malformed = || MazeError::MalformedDirective {
        line,
        text: format!("\\{directive}"),
    };
    let mut parts = directive.split_whitespace();
    let name = parts.next().ok_or_else(malformed)?;
    if name != "robot" {
        return Err(MazeError::UnknownDirective {
            line,
            name: name.to_owned(),
        });
    }
    let mut coordinate = || {
        parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(malformed)
    };
    let x = coordinate()?;
    let y = coordinate()?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(Cell::new(x, y))
}

impl Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.render_with(&self.robots), f)
    }
}

#[derive(Debug, Clone, Copy)]
enum Overlay<'a> {
    Robots(&'a [Cell]),
    Marks(&'a [Cell], char),
}

/// A view of a [`Maze`] with positions drawn over it.
///
/// Created by [`Maze::render_with`] and [`Maze::render_marked`]. Rows are
/// printed top-down, each indented by six spaces and terminated by a newline.
#[derive(Debug, Clone, Copy)]
pub struct MazeRender<'a> {
    maze: &'a Maze,
    overlay: Overlay<'a>,
}

impl MazeRender<'_> {
    fn symbol_at(&self, cell: Cell) -> char {
        let overlaid = match self.overlay {
            Overlay::Robots(robots) => robots
                .iter()
                .position(|&robot| robot == cell)
                .map(robot_char),
            Overlay::Marks(cells, mark) => cells.contains(&cell).then_some(mark),
        };
        overlaid.unwrap_or_else(|| self.maze.color(cell).map_or('#', Color::as_char))
    }
}

impl Display for MazeRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.maze.height).rev() {
            f.write_str("      ")?;
            for x in 0..self.maze.width {
                let symbol = self.symbol_at(Cell::new(coord(x), coord(y)));
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Returns the display character for a robot: `1` for robot 0, `2` for robot 1, ...
fn robot_char(robot: usize) -> char {
    u32::try_from(robot)
        .ok()
        .and_then(|n| char::from_u32(u32::from('1') + n))
        .unwrap_or('?')
}
