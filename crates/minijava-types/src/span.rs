use serde::{Deserialize, Serialize};
use std::fmt;

/// A region of MiniJava source, from a start position to an end position.
/// Lines and columns are 1-based, matching how errors cite the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A span covering a single position.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }

    /// The smallest span covering both `self` and `other`. Commutative,
    /// used to grow a node's span over everything the parser consumed.
    pub fn merge(self, other: Span) -> Span {
        let (start_line, start_col) = Self::min_pos(
            (self.start_line, self.start_col),
            (other.start_line, other.start_col),
        );
        let (end_line, end_col) = Self::max_pos(
            (self.end_line, self.end_col),
            (other.end_line, other.end_col),
        );
        Span::new(start_line, start_col, end_line, end_col)
    }

    fn min_pos(a: (u32, u32), b: (u32, u32)) -> (u32, u32) {
        if a <= b {
            a
        } else {
            b
        }
    }

    fn max_pos(a: (u32, u32), b: (u32, u32)) -> (u32, u32) {
        if a >= b {
            a
        } else {
            b
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}
