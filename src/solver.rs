pub mod bfs;

use std::fmt::Display;

use itertools::Itertools as _;

use crate::{
    block::{Block, Move, Orientation},
    common::GoalMode,
    grid::Coord,
    problem::{Board, Input},
};

pub trait Solver {
    fn solve(&self, board: &Board, start: Block, goal: Goal) -> Option<Route>;
}

/// 探索の終了条件。`orientation` が `None` なら向きは問わない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub anchor: Coord,
    pub orientation: Option<Orientation>,
}

impl Goal {
    pub fn new(target: Block, mode: GoalMode) -> Self {
        match mode {
            GoalMode::Anchor => Self::anchor_only(target.anchor),
            GoalMode::Exact => Self::exact(target),
        }
    }

    pub fn anchor_only(anchor: Coord) -> Self {
        Self {
            anchor,
            orientation: None,
        }
    }

    pub fn exact(target: Block) -> Self {
        Self {
            anchor: target.anchor,
            orientation: Some(target.orientation),
        }
    }

    pub fn is_reached(&self, block: &Block) -> bool {
        block.anchor == self.anchor
            && self
                .orientation
                .map_or(true, |o| o == block.orientation)
    }
}

/// 最短経路の手順
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    moves: Vec<Move>,
}

impl Route {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// 手順を順に適用した最終位置。途中で動けなくなったら `None`
    pub fn replay(&self, board: &Board, start: Block) -> Option<Block> {
        self.moves
            .iter()
            .try_fold(start, |block, &mv| block.apply(board, mv))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.moves.iter().join(""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Reached(usize),
    Unreachable,
}

impl From<Option<&Route>> for Answer {
    fn from(route: Option<&Route>) -> Self {
        match route {
            Some(route) => Answer::Reached(route.len()),
            None => Answer::Unreachable,
        }
    }
}

/// 到達不能も `0` と出力する。0手で到達済みの場合と区別できない点に注意
impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Reached(moves) => write!(f, "{}", moves),
            Answer::Unreachable => write!(f, "0"),
        }
    }
}

pub fn solve_input(input: &Input, mode: GoalMode) -> Option<Route> {
    let goal = Goal::new(input.goal, mode);
    bfs::BfsSolver::new().solve(&input.board, input.start, goal)
}
