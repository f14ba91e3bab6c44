use miette::*;

use crate::beam::{self, BeamHead, Direction, Position};

/// Counts the tiles energized by a beam entering the grid at the top-left
/// corner, heading east (incoming side: west).
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = beam::parse(input)?;

    let entry = BeamHead {
        pos: Position::new(0, 0),
        incoming: Direction::West,
    };
    let energized = beam::energized(&grid, entry);

    tracing::debug!("energized grid:\n{}", grid.render_energized(&energized));

    Ok(energized.len().to_string())
}
