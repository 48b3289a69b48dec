//! Geometry of the learning path strip: evenly spaced nodes on one line,
//! each completed, current or still ahead of the learner.

pub const PATH_WIDTH: f64 = 800.0;
pub const PATH_START_X: f64 = 100.0;
pub const PATH_Y: f64 = 75.0;
pub const NODE_RADIUS: f64 = 15.0;
pub const DEFAULT_TOTAL: usize = 5;
/// Longest path drawn; nodes closer than 8 units apart overlap anyway.
pub const MAX_TOTAL: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Completed,
    Current,
    Future,
}

impl NodeStatus {
    pub fn glyph(&self) -> char {
        match self {
            NodeStatus::Completed => '✓',
            NodeStatus::Current => '●',
            NodeStatus::Future => '○',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub x: f64,
    pub y: f64,
    pub status: NodeStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathLayout {
    pub nodes: Vec<PathNode>,
    /// Length of the highlighted segment from `PATH_START_X`. Zero before the first step.
    pub completed_width: f64,
}

/// Position and length of the path, as `(current, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathProgress {
    pub current: usize,
    pub total: usize,
}

impl Default for PathProgress {
    fn default() -> Self {
        Self { current: 0, total: DEFAULT_TOTAL }
    }
}

impl PathProgress {
    /// Reads `Progress: <current> / <total>` anywhere in `label`.
    /// Anything unparseable, or a total above [`MAX_TOTAL`], yields the default `0 / 5`.
    pub fn parse(label: &str) -> Self {
        Self::try_parse(label).unwrap_or_default()
    }

    fn try_parse(label: &str) -> Option<Self> {
        let start = label.find("Progress: ")? + "Progress: ".len();
        let rest = &label[start..];
        let (current, rest) = split_number(rest)?;
        let rest = rest.strip_prefix(" / ")?;
        let (total, _) = split_number(rest)?;
        (total <= MAX_TOTAL).then_some(Self { current, total })
    }

    pub fn layout(&self) -> PathLayout {
        let total = self.total.min(MAX_TOTAL);
        let spacing = PATH_WIDTH / if total > 1 { (total - 1) as f64 } else { 1.0 };
        let completed_width = if self.current > 0 {
            self.current.min(total.saturating_sub(1)) as f64 * spacing
        } else {
            0.0
        };
        let nodes = (0..total)
            .map(|i| PathNode {
                x: PATH_START_X + i as f64 * spacing,
                y: PATH_Y,
                status: match i.cmp(&self.current) {
                    std::cmp::Ordering::Less => NodeStatus::Completed,
                    std::cmp::Ordering::Equal => NodeStatus::Current,
                    std::cmp::Ordering::Greater => NodeStatus::Future,
                },
            })
            .collect();
        PathLayout { nodes, completed_width }
    }
}

fn split_number(s: &str) -> Option<(usize, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let n = s[..end].parse().ok()?;
    Some((n, &s[end..]))
}

impl PathLayout {
    /// One-line rendering such as `✓───●───○`.
    pub fn strip(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.status.glyph().to_string())
            .collect::<Vec<_>>()
            .join("───")
    }
}
