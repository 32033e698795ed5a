use egui::Pos2;

use super::threshold::BinaryMask;

/// Traced boundaries shorter than this are treated as specks and dropped
pub const MIN_PATH_POINTS: usize = 3;

/// Polygonal boundary produced by the tracer
#[derive(Clone, Debug, PartialEq)]
pub struct ContourPath {
    points: Vec<Pos2>,
    closed: bool,
}

impl ContourPath {
    pub fn new(points: Vec<Pos2>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// True when the walk came back to its starting pixel
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Cursor heading on the pixel grid (y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    const ALL: [Heading; 4] = [Heading::Right, Heading::Down, Heading::Left, Heading::Up];

    fn turn(self, quarter_turns_clockwise: usize) -> Heading {
        Self::ALL[(self as usize + quarter_turns_clockwise) % 4]
    }

    fn delta(self) -> (i64, i64) {
        match self {
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
        }
    }

    /// Left turn, straight on, right turn, about-face
    fn preference(self) -> [Heading; 4] {
        [self.turn(3), self, self.turn(1), self.turn(2)]
    }
}

/// How a single walk ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalkEnd {
    ReturnedToStart,
    DeadEnd,
    StepLimit,
}

/// Trace every ink boundary in `mask`, in row-major order of each path's first pixel.
///
/// Only pixels off the bottom row and right column can start a walk, so ink
/// reachable from nowhere else produces no path.
///
/// Each walk is capped at `4 * width * height` steps; a capped walk is kept as an open path.
pub fn trace_contours(mask: &BinaryMask) -> Vec<ContourPath> {
    let step_limit = 4 * mask.width() * mask.height();
    trace_with_step_limit(mask, step_limit)
}

pub(crate) fn trace_with_step_limit(mask: &BinaryMask, step_limit: usize) -> Vec<ContourPath> {
    let width = mask.width();
    let mut visited = vec![false; mask.bits().len()];
    let mut paths = Vec::new();
    let mut truncated = 0usize;
    let mut discarded = 0usize;

    // Visited marks only ever get added, so the scan never needs to look back.
    let mut scan_from = 0usize;

    while let Some(start) = next_start(mask, &visited, scan_from) {
        scan_from = start;
        let start = ((start % width) as i64, (start / width) as i64);

        let (points, end) = walk(mask, &mut visited, start, step_limit);
        if end == WalkEnd::StepLimit {
            truncated += 1;
            log::debug!(
                "Contour walk from ({}, {}) hit the {} step limit; keeping it open",
                start.0,
                start.1,
                step_limit
            );
        }

        if points.len() < MIN_PATH_POINTS {
            discarded += 1;
            continue;
        }
        paths.push(ContourPath::new(points, end == WalkEnd::ReturnedToStart));
    }

    log::debug!(
        "Traced {} contours ({} truncated, {} discarded) from a {}x{} mask",
        paths.len(),
        truncated,
        discarded,
        mask.width(),
        mask.height()
    );
    paths
}

/// Seeds never lie on the last row or column; walks may still pass through them.
fn next_start(mask: &BinaryMask, visited: &[bool], from: usize) -> Option<usize> {
    let (width, height) = (mask.width(), mask.height());
    let bits = mask.bits();
    let end = width * height.saturating_sub(1);
    (from..end).find(|&i| i % width + 1 < width && bits[i] && !visited[i])
}

fn walk(
    mask: &BinaryMask,
    visited: &mut [bool],
    start: (i64, i64),
    step_limit: usize,
) -> (Vec<Pos2>, WalkEnd) {
    let width = mask.width() as i64;
    let (mut x, mut y) = start;
    let mut heading = Heading::Right;
    let mut points = Vec::new();

    for _ in 0..step_limit {
        points.push(Pos2::new(x as f32, y as f32));
        visited[(y * width + x) as usize] = true;

        let next = heading.preference().into_iter().find(|h| {
            let (dx, dy) = h.delta();
            mask.is_ink(x + dx, y + dy)
        });
        let Some(next) = next else {
            return (points, WalkEnd::DeadEnd);
        };

        let (dx, dy) = next.delta();
        x += dx;
        y += dy;
        heading = next;

        if (x, y) == start {
            return (points, WalkEnd::ReturnedToStart);
        }
    }

    (points, WalkEnd::StepLimit)
}
