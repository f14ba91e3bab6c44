use std::collections::HashSet;

use chumsky::prelude::*;
use miette::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit displacement in grid coordinates (x grows right, y grows down).
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    MirrorForward,
    MirrorBack,
    SplitterHorizontal,
    SplitterVertical,
}

impl Tile {
    fn symbol(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::MirrorForward => '/',
            Tile::MirrorBack => '\\',
            Tile::SplitterHorizontal => '-',
            Tile::SplitterVertical => '|',
        }
    }
}

/// A beam segment entering a tile. `incoming` is the side the beam arrived
/// from, not its direction of travel (which is the opposite). This pair is
/// the key for cycle detection: deduplicating on position alone would cut
/// off beams crossing the same tile from different directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeamHead {
    pub pos: Position,
    pub incoming: Direction,
}

pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        // Trailing newlines produce empty rows; drop them before shape checks,
        // same as blank lines anywhere in the input.
        let rows: Vec<_> = rows.into_iter().filter(|r| !r.is_empty()).collect();

        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        ensure!(
            rows.iter().all(|r| r.len() == width),
            "grid rows have unequal lengths"
        );

        let tiles = rows.into_iter().flatten().collect();

        Ok(Grid {
            width,
            height,
            tiles,
        })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the tile at `pos`, or `None` if the position falls outside the
    /// grid. Out-of-bounds is a defined result, not an error; the tracer uses
    /// it to detect beams leaving the grid.
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Renders the energized tiles over the grid: energized empty tiles as
    /// '#', mirrors and splitters as their own symbol, everything else '.'.
    pub fn render_energized(&self, energized: &HashSet<Position>) -> String {
        (0..self.height as isize)
            .map(|y| {
                (0..self.width as isize)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        match self.tile_at(pos) {
                            Some(Tile::Empty) if energized.contains(&pos) => '#',
                            Some(tile) if energized.contains(&pos) => tile.symbol(),
                            _ => '.',
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<Tile>>, extra::Err<Rich<'a, char>>> {
    let tile = choice((
        just('.').to(Tile::Empty),
        just('/').to(Tile::MirrorForward),
        just('\\').to(Tile::MirrorBack),
        just('-').to(Tile::SplitterHorizontal),
        just('|').to(Tile::SplitterVertical),
    ));

    tile.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect()
}

pub fn parse(input: &str) -> Result<Grid> {
    let rows = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Grid::from_rows(rows)
}

/// The reflection rule table. Total over all (tile, incoming) pairs and the
/// only place reflection semantics live. Yields the one or two directions the
/// beam leaves the tile in; straight-through cases travel along
/// `incoming.opposite()`.
pub fn next_directions(tile: Tile, incoming: Direction) -> &'static [Direction] {
    use Direction::*;

    match (tile, incoming) {
        (Tile::Empty, North) => &[South],
        (Tile::Empty, South) => &[North],
        (Tile::Empty, East) => &[West],
        (Tile::Empty, West) => &[East],

        (Tile::MirrorForward, East) => &[South],
        (Tile::MirrorForward, South) => &[East],
        (Tile::MirrorForward, West) => &[North],
        (Tile::MirrorForward, North) => &[West],

        (Tile::MirrorBack, East) => &[North],
        (Tile::MirrorBack, South) => &[West],
        (Tile::MirrorBack, West) => &[South],
        (Tile::MirrorBack, North) => &[East],

        (Tile::SplitterHorizontal, North | South) => &[East, West],
        (Tile::SplitterHorizontal, East) => &[West],
        (Tile::SplitterHorizontal, West) => &[East],

        (Tile::SplitterVertical, East | West) => &[North, South],
        (Tile::SplitterVertical, North) => &[South],
        (Tile::SplitterVertical, South) => &[North],
    }
}

/// Traces every branch of a beam entering the grid at `entry` and returns the
/// set of positions touched by at least one beam segment.
///
/// The traversal is a graph search over (position, incoming-direction) states
/// with an explicit work list; the seen-set bounds it to `width * height * 4`
/// states, so it terminates even on mirror loops.
pub fn energized(grid: &Grid, entry: BeamHead) -> HashSet<Position> {
    let mut seen: HashSet<BeamHead> = HashSet::new();
    let mut work = vec![entry];

    while let Some(head) = work.pop() {
        let Some(tile) = grid.tile_at(head.pos) else {
            // Beam left the grid.
            continue;
        };
        if !seen.insert(head) {
            // Cycle closed; this state was already expanded.
            continue;
        }

        for &dir in next_directions(tile, head.incoming) {
            work.push(BeamHead {
                pos: head.pos.step(dir),
                incoming: dir.opposite(),
            });
        }
    }

    seen.into_iter().map(|head| head.pos).collect()
}
