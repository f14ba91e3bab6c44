use itertools::Itertools;
use miette::*;
use rayon::prelude::*;

use crate::beam::{self, BeamHead, Direction, Position};

/// Finds the border entry that energizes the most tiles. Every tile on the
/// edge gets a beam aimed inward; corners contribute one entry per touching
/// edge. Each trace is an independent pure traversal, so they run in
/// parallel.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = beam::parse(input)?;
    let (width, height) = grid.dimensions();

    if width == 0 || height == 0 {
        return Ok("0".to_string());
    }

    let (width, height) = (width as isize, height as isize);

    let entries = (0..width)
        .flat_map(|x| {
            [
                BeamHead {
                    pos: Position::new(x, 0),
                    incoming: Direction::North,
                },
                BeamHead {
                    pos: Position::new(x, height - 1),
                    incoming: Direction::South,
                },
            ]
        })
        .chain((0..height).flat_map(|y| {
            [
                BeamHead {
                    pos: Position::new(0, y),
                    incoming: Direction::West,
                },
                BeamHead {
                    pos: Position::new(width - 1, y),
                    incoming: Direction::East,
                },
            ]
        }))
        .collect_vec();

    let best = entries
        .par_iter()
        .map(|&entry| beam::energized(&grid, entry).len())
        .max()
        .unwrap_or(0);

    Ok(best.to_string())
}
