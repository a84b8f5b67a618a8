//! Text tables of belief vectors.

use std::fmt::{self, Display};

use mazeloc_core::Color;

use crate::{BeliefVector, FilterTrace, StateIndex};

/// A belief vector laid out as a grid, top row first.
///
/// Each cell prints as `|C: 0.12345|`, where `C` is the floor color or `#`
/// for a wall. Rows carry their `y` coordinate on the left and the `x`
/// coordinates are printed underneath.
///
/// # Examples
///
/// ```
/// use mazeloc_core::Maze;
/// use mazeloc_filter::{BeliefRender, BeliefVector, StateIndex};
///
/// let maze: Maze = "
///     R#
///     GB
/// "
/// .parse()?;
/// let index = StateIndex::new(&maze);
/// let belief = BeliefVector::new(vec![0.5, 0.25, 0.25, 0.0]);
///
/// assert_eq!(
///     BeliefRender::new(&index, &belief).to_string(),
///     "1 |R: 0.25000||#: 0.00000|\n\
///      0 |G: 0.50000||B: 0.25000|\n       0           1\n",
/// );
/// # Ok::<(), mazeloc_core::MazeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BeliefRender<'a> {
    index: &'a StateIndex,
    belief: &'a BeliefVector,
}

impl<'a> BeliefRender<'a> {
    /// Creates a renderer for `belief` over the states of `index`.
    #[must_use]
    pub fn new(index: &'a StateIndex, belief: &'a BeliefVector) -> Self {
        Self { index, belief }
    }
}

impl Display for BeliefRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = (self.index.width(), self.index.height());
        let label_width = height.saturating_sub(1).to_string().len();

        let states: Vec<_> = self.index.states().collect();
        for (y, row) in states.chunks(width.max(1)).enumerate().rev() {
            write!(f, "{y:>label_width$} ")?;
            for &state in row {
                let symbol = self.index.color_of(state).map_or('#', Color::as_char);
                write!(f, "|{symbol}: {:.5}|", self.belief[state.index()])?;
            }
            writeln!(f)?;
        }

        write!(f, "{}0", " ".repeat(label_width + 6))?;
        for x in 1..width {
            write!(f, "{x:>12}")?;
        }
        writeln!(f)
    }
}

/// Every belief of a [`FilterTrace`], each under a timestep heading.
///
/// Created by [`SequentialFilter::render`](crate::SequentialFilter::render).
#[derive(Debug, Clone, Copy)]
pub struct TraceRender<'a> {
    index: &'a StateIndex,
    trace: &'a FilterTrace,
}

impl<'a> TraceRender<'a> {
    pub(crate) fn new(index: &'a StateIndex, trace: &'a FilterTrace) -> Self {
        Self { index, trace }
    }
}

impl Display for TraceRender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, belief) in self.trace.beliefs().iter().enumerate() {
            match t {
                0 => write!(f, " t = 0 (starting values)")?,
                1 => write!(f, " t = 1 (robot begins sensing)")?,
                _ => write!(f, " t = {t}")?,
            }
            if let Some(color) = self.trace.observation(t) {
                write!(f, ", sensed {color}")?;
            }
            if self.trace.diverged().contains(&t) {
                write!(f, " [diverged]")?;
            }
            writeln!(f)?;
            write!(f, "{}", BeliefRender::new(self.index, belief))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mazeloc_core::Maze;

    use super::*;
    use crate::{FilterConfig, SequentialFilter};

    #[test]
    fn test_wide_grid_axis() {
        let maze: Maze = "RGBYRGBYRGBY".parse().unwrap();
        let index = StateIndex::new(&maze);
        let belief = BeliefVector::zeros(index.len());
        let rendered = BeliefRender::new(&index, &belief).to_string();
        let axis = rendered.lines().last().unwrap();
        assert!(axis.starts_with("       0           1"));
        assert!(axis.ends_with("          10          11"));
    }

    #[test]
    fn test_tall_grid_pads_labels() {
        let maze: Maze = "R\n".repeat(11).parse().unwrap();
        let index = StateIndex::new(&maze);
        let belief = BeliefVector::zeros(index.len());
        let rendered = BeliefRender::new(&index, &belief).to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "10 |R: 0.00000|");
        assert_eq!(lines[10], " 0 |R: 0.00000|");
        assert_eq!(lines[11], "        0");
    }

    #[test]
    fn test_trace_headings() {
        let maze: Maze = "RR".parse().unwrap();
        let filter = SequentialFilter::new(&maze, FilterConfig::new(1.0)).unwrap();
        let trace = filter.filter(&[Color::Red, Color::Green]);
        let rendered = filter.render(&trace).to_string();
        let headings: Vec<_> = rendered.lines().filter(|l| l.starts_with(" t =")).collect();
        assert_eq!(
            headings,
            vec![
                " t = 0 (starting values)",
                " t = 1 (robot begins sensing), sensed R",
                " t = 2, sensed G [diverged]",
            ]
        );
        assert!(rendered.contains("0 |R: 0.50000||R: 0.50000|\n"));
    }
}
