use std::collections::VecDeque;

use tabula_core::Move;

use crate::ArenaError;

/// Layout shipped with the crate: 82 open tiles, two adversaries, four power pills.
pub const CLASSIC_LAYOUT: &str = include_str!("../config/classic.maze");

/// Index of an open tile, assigned row-major from the top-left.
pub type NodeId = u32;

/// Path length reported between nodes that cannot reach each other.
pub const UNREACHABLE: u32 = u32::MAX;

const DIRECTIONS: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

/// What an open tile holds when the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Food {
    None,
    Pill,
    PowerPill,
}

/// Static maze graph with all-pairs shortest path lengths.
///
/// Layout characters: `#` wall, `.` pill, `o` power pill, ` ` empty floor,
/// `P` agent start, `G` adversary start. Every row must have the same width.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<(usize, usize)>,
    food: Vec<Food>,
    /// Indexed by `Move::index()` for the four directions.
    neighbours: Vec<[Option<NodeId>; 4]>,
    /// Row-major `node_count * node_count` matrix.
    distances: Vec<u32>,
    agent_start: NodeId,
    adversary_starts: Vec<NodeId>,
}

impl Maze {
    pub fn classic() -> Result<Self, ArenaError> {
        Self::parse(CLASSIC_LAYOUT)
    }

    pub fn parse(layout: &str) -> Result<Self, ArenaError> {
        let rows: Vec<Vec<char>> = layout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let width = rows.first().map(Vec::len).ok_or(ArenaError::EmptyLayout)?;
        let height = rows.len();

        let mut grid = vec![None; width * height];
        let mut cells = Vec::new();
        let mut food = Vec::new();
        let mut agent_start = None;
        let mut adversary_starts = Vec::new();

        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != width {
                return Err(ArenaError::RaggedRow {
                    row,
                    expected: width,
                    found: tiles.len(),
                });
            }
            for (column, &tile) in tiles.iter().enumerate() {
                let node = cells.len() as NodeId;
                let item = match tile {
                    '#' => continue,
                    ' ' => Food::None,
                    '.' => Food::Pill,
                    'o' => Food::PowerPill,
                    'P' => {
                        if agent_start.replace(node).is_some() {
                            return Err(ArenaError::DuplicateAgentStart);
                        }
                        Food::None
                    }
                    'G' => {
                        adversary_starts.push(node);
                        Food::None
                    }
                    _ => return Err(ArenaError::UnknownTile { row, column, tile }),
                };
                grid[row * width + column] = Some(node);
                cells.push((row, column));
                food.push(item);
            }
        }

        let agent_start = agent_start.ok_or(ArenaError::MissingAgentStart)?;
        if adversary_starts.is_empty() {
            return Err(ArenaError::MissingAdversaryStart);
        }

        let at = |row: Option<usize>, column: Option<usize>| -> Option<NodeId> {
            match (row, column) {
                (Some(r), Some(c)) if r < height && c < width => grid[r * width + c],
                _ => None,
            }
        };
        let neighbours: Vec<[Option<NodeId>; 4]> = cells
            .iter()
            .map(|&(r, c)| {
                [
                    at(r.checked_sub(1), Some(c)),
                    at(Some(r), c.checked_add(1)),
                    at(r.checked_add(1), Some(c)),
                    at(Some(r), c.checked_sub(1)),
                ]
            })
            .collect();
        let distances = all_pairs_distances(&neighbours);

        Ok(Maze {
            width,
            height,
            cells,
            food,
            neighbours,
            distances,
            agent_start,
            adversary_starts,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    /// `(row, column)` of `node`.
    pub fn cell(&self, node: NodeId) -> Option<(usize, usize)> {
        self.cells.get(node as usize).copied()
    }

    pub fn initial_food(&self, node: NodeId) -> Food {
        self.food.get(node as usize).copied().unwrap_or(Food::None)
    }

    pub fn agent_start(&self) -> NodeId {
        self.agent_start
    }

    pub fn adversary_starts(&self) -> &[NodeId] {
        &self.adversary_starts
    }

    /// Node reached by moving from `node`; `Neutral` stays put, walls give `None`.
    pub fn neighbour(&self, node: NodeId, direction: Move) -> Option<NodeId> {
        let links = self.neighbours.get(node as usize)?;
        match direction {
            Move::Neutral => Some(node),
            _ => links[direction.index()],
        }
    }

    /// Directions that do not run into a wall, in `Move::ALL` order.
    pub fn legal_moves(&self, node: NodeId) -> Vec<Move> {
        DIRECTIONS
            .into_iter()
            .filter(|&direction| self.neighbour(node, direction).is_some())
            .collect()
    }

    /// Shortest path length in moves, `UNREACHABLE` across components.
    pub fn distance(&self, from: NodeId, to: NodeId) -> u32 {
        let n = self.node_count();
        let (from, to) = (from as usize, to as usize);
        if from >= n || to >= n {
            return UNREACHABLE;
        }
        self.distances[from * n + to]
    }

    /// Legal direction whose next node is closest to `target`; first wins ties.
    pub fn step_towards(&self, from: NodeId, target: NodeId) -> Option<Move> {
        self.legal_moves(from)
            .into_iter()
            .filter_map(|direction| {
                let next = self.neighbour(from, direction)?;
                Some((direction, self.distance(next, target)))
            })
            .min_by_key(|&(_, distance)| distance)
            .map(|(direction, _)| direction)
    }

    /// Legal direction whose next node is farthest from `threat`; first wins ties.
    pub fn step_away(&self, from: NodeId, threat: NodeId) -> Option<Move> {
        let mut best: Option<(Move, u32)> = None;
        for direction in self.legal_moves(from) {
            let Some(next) = self.neighbour(from, direction) else {
                continue;
            };
            let distance = self.distance(next, threat);
            if best.is_none_or(|(_, d)| distance > d) {
                best = Some((direction, distance));
            }
        }
        best.map(|(direction, _)| direction)
    }
}

fn all_pairs_distances(neighbours: &[[Option<NodeId>; 4]]) -> Vec<u32> {
    let n = neighbours.len();
    let mut distances = vec![UNREACHABLE; n * n];
    let mut queue = VecDeque::with_capacity(n);

    for source in 0..n {
        let row = &mut distances[source * n..(source + 1) * n];
        row[source] = 0;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            let next_distance = row[node] + 1;
            for next in neighbours[node].iter().flatten() {
                let next = *next as usize;
                if row[next] == UNREACHABLE {
                    row[next] = next_distance;
                    queue.push_back(next);
                }
            }
        }
    }

    distances
}
