use std::fmt::Display;

use itertools::iproduct;

use crate::{
    grid::{Coord, CoordDiff, ADJACENTS},
    problem::Board,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        }
    }

    /// 丸太の伸びている向きの単位差分
    pub const fn axis(self) -> CoordDiff {
        match self {
            Orientation::Horizontal => CoordDiff::new(0, 1),
            Orientation::Vertical => CoordDiff::new(1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Pivot,
}

impl Move {
    pub const ALL: [Move; 5] = [Move::Up, Move::Down, Move::Left, Move::Right, Move::Pivot];

    /// 平行移動の差分。回転なら `None`
    pub const fn diff(self) -> Option<CoordDiff> {
        match self {
            Move::Up => Some(ADJACENTS[0]),
            Move::Down => Some(ADJACENTS[1]),
            Move::Left => Some(ADJACENTS[2]),
            Move::Right => Some(ADJACENTS[3]),
            Move::Pivot => None,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Pivot => 'T',
        };

        write!(f, "{}", c)
    }
}

/// 長さ3の丸太。`anchor` は中央のマス
///
/// 同一性は `anchor` と `orientation` のみで決まる。手数は探索側が持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub anchor: Coord,
    pub orientation: Orientation,
}

impl Block {
    pub const fn new(anchor: Coord, orientation: Orientation) -> Self {
        Self {
            anchor,
            orientation,
        }
    }

    pub fn cells(&self) -> [Coord; 3] {
        let axis = self.orientation.axis();
        [self.anchor + axis.invert(), self.anchor, self.anchor + axis]
    }

    pub fn apply(&self, board: &Board, mv: Move) -> Option<Block> {
        match mv.diff() {
            Some(diff) => self.translate(board, diff),
            None => self.pivot(board),
        }
    }

    /// 1マス平行移動する。新たに占有するマスがすべて空いている場合のみ成功する
    pub fn translate(&self, board: &Board, diff: CoordDiff) -> Option<Block> {
        let axis = self.orientation.axis();
        let next = Block::new(self.anchor + diff, self.orientation);

        let movable = if diff == axis || diff == axis.invert() {
            // 軸方向なら先端の1マスだけ見ればよい
            board.is_free(next.anchor + diff)
        } else {
            next.cells().iter().all(|&c| board.is_free(c))
        };

        movable.then_some(next)
    }

    /// その場で90度回転する。中心の周囲3x3がすべて空いている必要がある
    pub fn pivot(&self, board: &Board) -> Option<Block> {
        let clear = iproduct!(-1..=1, -1..=1)
            .all(|(dr, dc)| board.is_free(self.anchor + CoordDiff::new(dr, dc)));

        clear.then_some(Block::new(self.anchor, self.orientation.flipped()))
    }

    pub fn neighbors<'a>(
        &'a self,
        board: &'a Board,
        order: &'a [Move],
    ) -> impl Iterator<Item = (Move, Block)> + 'a {
        order
            .iter()
            .filter_map(move |&mv| self.apply(board, mv).map(|next| (mv, next)))
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = match self.orientation {
            Orientation::Horizontal => '-',
            Orientation::Vertical => '|',
        };

        write!(f, "{}{}", self.anchor, o)
    }
}
