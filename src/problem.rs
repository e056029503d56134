use std::{io::BufRead, str::FromStr};

use proconio::{
    input,
    marker::Chars,
    source::{once::OnceSource, Source},
};
use thiserror::Error;

use crate::{
    block::{Block, Orientation},
    grid::{Coord, Map2d},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown cell '{ch}' at {coord}")]
    UnknownCell { ch: char, coord: Coord },
    #[error("expected at least 2 '{marker}' cells, found {count}")]
    TooFewMarkers { marker: char, count: usize },
    #[error("'{marker}' cells are not on a single row or column")]
    NotStraight { marker: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Blocked,
}

/// 入力後は変更されない盤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    map: Map2d<Cell>,
}

impl Board {
    pub fn new(map: Map2d<Cell>) -> Self {
        Self { map }
    }

    /// `'1'` を障害物、それ以外 (`'0'`, `'B'`, `'E'`) を空きマスとして読む
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, InputError> {
        let rows = rows
            .iter()
            .map(|r| r.as_ref().chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let (board, _) = parse_rows(&rows)?;
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.map.size
    }

    /// 盤面外は常に `false`
    pub fn is_free(&self, c: Coord) -> bool {
        self.map.get(c) == Some(&Cell::Free)
    }
}

#[derive(Debug, Clone)]
pub struct Input {
    pub map_size: usize,
    pub board: Board,
    pub start: Block,
    pub goal: Block,
}

impl Input {
    pub fn read<R: BufRead, S: Source<R>>(source: &mut S) -> Result<Self, InputError> {
        input! {
            from &mut *source,
            n: usize,
            rows: [Chars; n],
        }

        let (board, markers) = parse_rows(&rows)?;
        let start = block_from_markers('B', &markers.begins)?;
        let goal = block_from_markers('E', &markers.ends)?;

        Ok(Self {
            map_size: n,
            board,
            start,
            goal,
        })
    }
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut source = OnceSource::from(s);
        Self::read(&mut source)
    }
}

#[derive(Debug, Default)]
struct Markers {
    begins: Vec<Coord>,
    ends: Vec<Coord>,
}

fn parse_rows(rows: &[Vec<char>]) -> Result<(Board, Markers), InputError> {
    let n = rows.len();
    let mut map = Map2d::new_with(Cell::Free, n);
    let mut markers = Markers::default();

    for (row, line) in rows.iter().enumerate() {
        if line.len() != n {
            return Err(InputError::RowLength {
                row,
                expected: n,
                actual: line.len(),
            });
        }

        for (col, &ch) in line.iter().enumerate() {
            let coord = Coord::new(row, col);

            map[coord] = match ch {
                '0' => Cell::Free,
                '1' => Cell::Blocked,
                'B' => {
                    markers.begins.push(coord);
                    Cell::Free
                }
                'E' => {
                    markers.ends.push(coord);
                    Cell::Free
                }
                _ => return Err(InputError::UnknownCell { ch, coord }),
            };
        }
    }

    Ok((Board::new(map), markers))
}

/// 行優先で並んだマーカーから丸太を復元する。中央 (2個なら後ろ側) を基準マスとする
fn block_from_markers(marker: char, cells: &[Coord]) -> Result<Block, InputError> {
    if cells.len() < 2 {
        return Err(InputError::TooFewMarkers {
            marker,
            count: cells.len(),
        });
    }

    let anchor = cells[cells.len() / 2];

    let orientation = if cells.iter().all(|c| c.row == anchor.row) {
        Orientation::Horizontal
    } else if cells.iter().all(|c| c.col == anchor.col) {
        Orientation::Vertical
    } else {
        return Err(InputError::NotStraight { marker });
    };

    Ok(Block::new(anchor, orientation))
}
