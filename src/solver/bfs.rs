use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    block::{Block, Move},
    grid::Map2d,
    problem::Board,
};

use super::{Goal, Route, Solver};

/// (中央のマス, 向き) ごとの訪問済みフラグ。一度立てたら下ろさない
#[derive(Debug, Clone)]
pub struct VisitedSet {
    flags: Map2d<[bool; 2]>,
}

impl VisitedSet {
    pub fn new(size: usize) -> Self {
        Self {
            flags: Map2d::new_with([false; 2], size),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, block: &Block) -> bool {
        self.flags
            .get(block.anchor)
            .map_or(false, |f| f[block.orientation.index()])
    }

    /// 新たに訪問済みになった場合のみ `true`。盤面外は常に `false`
    pub fn insert(&mut self, block: &Block) -> bool {
        if !block.anchor.in_map(self.flags.size) {
            return false;
        }

        let flag = &mut self.flags[block.anchor][block.orientation.index()];
        !std::mem::replace(flag, true)
    }

    pub fn len(&self) -> usize {
        self.flags.iter().flatten().filter(|&&f| f).count()
    }
}

/// 幅優先探索による最短手数ソルバー
#[derive(Debug, Clone)]
pub struct BfsSolver {
    order: [Move; 5],
}

impl BfsSolver {
    pub fn new() -> Self {
        Self { order: Move::ALL }
    }

    /// 遷移を試す順番を指定する。結果の手数は順番に依存しない
    pub fn with_order(order: [Move; 5]) -> Self {
        Self { order }
    }
}

impl Default for BfsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BfsSolver {
    fn solve(&self, board: &Board, start: Block, goal: Goal) -> Option<Route> {
        if !start.anchor.in_map(board.size()) {
            debug!("start {} is outside the board", start);
            return None;
        }

        let mut visited = VisitedSet::new(board.size());
        let mut parents: Map2d<[Option<(Move, Block)>; 2]> =
            Map2d::new_with([None; 2], board.size());
        let mut queue = VecDeque::new();

        visited.insert(&start);
        queue.push_back((start, 0));

        while let Some((block, dist)) = queue.pop_front() {
            if goal.is_reached(&block) {
                let route = restore_route(&parents, block);
                debug_assert_eq!(dist, route.len());
                debug!(
                    "reached {} in {} moves ({} states visited)",
                    block,
                    dist,
                    visited.len()
                );
                return Some(route);
            }

            for (mv, next) in block.neighbors(board, &self.order) {
                if visited.insert(&next) {
                    trace!("{} -{}-> {}", block, mv, next);
                    parents[next.anchor][next.orientation.index()] = Some((mv, block));
                    queue.push_back((next, dist + 1));
                }
            }
        }

        debug!("unreachable ({} states visited)", visited.len());
        None
    }
}

/// 開始状態には親がないので、そこで辿るのが止まる
fn restore_route(parents: &Map2d<[Option<(Move, Block)>; 2]>, last: Block) -> Route {
    let mut moves = vec![];
    let mut current = last;

    while let Some((mv, prev)) = parents[current.anchor][current.orientation.index()] {
        moves.push(mv);
        current = prev;
    }

    moves.reverse();
    Route::new(moves)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use rand::{seq::SliceRandom as _, Rng, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::{BfsSolver, VisitedSet};
    use crate::{
        block::{Block, Move, Orientation},
        grid::{Coord, CoordDiff, Map2d},
        problem::{Board, Cell},
        solver::{Answer, Goal, Solver},
    };

    fn solve(board: &Board, start: Block, goal: Goal) -> Answer {
        Answer::from(BfsSolver::new().solve(board, start, goal).as_ref())
    }

    fn empty_board(size: usize) -> Board {
        Board::new(Map2d::new_with(Cell::Free, size))
    }

    /// 開始位置の3マスだけは必ず空ける
    fn random_instance(rng: &mut Pcg64Mcg) -> (Board, Block, Coord) {
        let size = rng.gen_range(3..=9);
        let ratio = rng.gen_range(0.0..0.35);
        let mut map = Map2d::new_with(Cell::Free, size);

        for row in 0..size {
            for col in 0..size {
                if rng.gen_bool(ratio) {
                    map[Coord::new(row, col)] = Cell::Blocked;
                }
            }
        }

        let orientation = *[Orientation::Horizontal, Orientation::Vertical]
            .choose(rng)
            .unwrap();
        let (row, col) = match orientation {
            Orientation::Horizontal => (rng.gen_range(0..size), rng.gen_range(1..size - 1)),
            Orientation::Vertical => (rng.gen_range(1..size - 1), rng.gen_range(0..size)),
        };
        let start = Block::new(Coord::new(row, col), orientation);

        for c in start.cells() {
            map[c] = Cell::Free;
        }

        let goal = Coord::new(rng.gen_range(0..size), rng.gen_range(0..size));
        (Board::new(map), start, goal)
    }

    fn fits(board: &Board, block: &Block) -> bool {
        block.cells().iter().all(|&c| board.is_free(c))
    }

    /// 遷移先の丸太が盤面に収まるかだけで判定する、素朴な緩和法による手数
    fn reference_distance(board: &Board, start: Block, goal: Goal) -> Option<usize> {
        let mut dist = HashMap::new();
        dist.insert(start, 0usize);
        let diffs = [
            CoordDiff::new(-1, 0),
            CoordDiff::new(1, 0),
            CoordDiff::new(0, -1),
            CoordDiff::new(0, 1),
        ];

        loop {
            let mut updated = false;
            let current = dist.clone();

            for (block, &d) in current.iter() {
                let mut nexts = diffs
                    .iter()
                    .map(|&diff| Block::new(block.anchor + diff, block.orientation))
                    .filter(|next| fits(board, next))
                    .collect::<Vec<_>>();

                let square_clear = (-1..=1).all(|dr| {
                    (-1..=1).all(|dc| board.is_free(block.anchor + CoordDiff::new(dr, dc)))
                });

                if square_clear {
                    nexts.push(Block::new(block.anchor, block.orientation.flipped()));
                }

                for next in nexts {
                    let entry = dist.entry(next).or_insert(usize::MAX);

                    if *entry > d + 1 {
                        *entry = d + 1;
                        updated = true;
                    }
                }
            }

            if !updated {
                break;
            }
        }

        dist.iter()
            .filter(|(block, _)| goal.is_reached(block))
            .map(|(_, &d)| d)
            .min()
    }

    fn moves_or_max(answer: Answer) -> usize {
        match answer {
            Answer::Reached(moves) => moves,
            Answer::Unreachable => usize::MAX,
        }
    }

    #[test]
    fn start_at_goal_is_zero() {
        let board = empty_board(5);
        let start = Block::new(Coord::new(0, 1), Orientation::Horizontal);

        let route = BfsSolver::new()
            .solve(&board, start, Goal::anchor_only(start.anchor))
            .unwrap();
        assert!(route.is_empty());

        // 向きも一致しているので、回転できない位置でも0手
        let goal = Goal::exact(Block::new(start.anchor, Orientation::Horizontal));
        assert_eq!(Answer::Reached(0), solve(&board, start, goal));
    }

    #[test]
    fn pivot_in_corner_is_unreachable() {
        let board = empty_board(5);
        let start = Block::new(Coord::new(0, 0), Orientation::Horizontal);
        let goal = Goal::exact(Block::new(Coord::new(0, 0), Orientation::Vertical));

        assert_eq!(Answer::Unreachable, solve(&board, start, goal));
    }

    #[test]
    fn pivot_in_center_is_one_move() {
        let board = empty_board(5);
        let start = Block::new(Coord::new(2, 2), Orientation::Horizontal);
        let goal = Goal::exact(Block::new(Coord::new(2, 2), Orientation::Vertical));

        let route = BfsSolver::new().solve(&board, start, goal).unwrap();
        assert_eq!(&[Move::Pivot], route.moves());
    }

    #[test]
    fn walled_in_start_is_unreachable() {
        let start = Block::new(Coord::new(2, 2), Orientation::Vertical);
        let mut map = Map2d::new_with(Cell::Blocked, 5);

        for c in start.cells() {
            map[c] = Cell::Free;
        }

        let board = Board::new(map);

        for row in 0..5 {
            for col in 0..5 {
                let target = Coord::new(row, col);
                let expected = if target == start.anchor {
                    Answer::Reached(0)
                } else {
                    Answer::Unreachable
                };

                assert_eq!(expected, solve(&board, start, Goal::anchor_only(target)));
            }
        }
    }

    #[test]
    fn start_outside_board_is_unreachable() {
        let board = empty_board(5);
        let start = Block::new(Coord::new(5, 2), Orientation::Horizontal);

        let route = BfsSolver::new().solve(&board, start, Goal::anchor_only(Coord::new(0, 0)));
        assert_eq!(None, route);

        let start = Block::new(Coord::new(0, 7), Orientation::Vertical);
        let goal = Goal::anchor_only(start.anchor);
        assert_eq!(Answer::Unreachable, solve(&board, start, goal));
    }

    #[test]
    fn visited_set_marks_once() {
        let mut visited = VisitedSet::new(4);
        let h = Block::new(Coord::new(1, 2), Orientation::Horizontal);
        let v = Block::new(Coord::new(1, 2), Orientation::Vertical);

        assert!(!visited.contains(&h));
        assert!(visited.insert(&h));
        assert!(!visited.insert(&h));
        assert!(visited.contains(&h));
        assert!(!visited.contains(&v));
        assert_eq!(1, visited.len());

        let outside = Block::new(Coord::new(4, 0), Orientation::Horizontal);
        assert!(!visited.insert(&outside));
        assert!(!visited.contains(&outside));
        assert_eq!(1, visited.len());
    }

    #[test]
    fn matches_reference_on_random_boards() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);

        for _ in 0..300 {
            let (board, start, target) = random_instance(&mut rng);

            for goal in [
                Goal::anchor_only(target),
                Goal::exact(Block::new(target, Orientation::Vertical)),
            ] {
                let expected = reference_distance(&board, start, goal);
                let route = BfsSolver::new().solve(&board, start, goal);

                assert_eq!(expected, route.as_ref().map(|r| r.len()));

                if let Some(route) = route {
                    let last = route.replay(&board, start).unwrap();
                    assert!(goal.is_reached(&last));
                }
            }
        }
    }

    #[test]
    fn independent_of_move_order() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);

        for _ in 0..200 {
            let (board, start, target) = random_instance(&mut rng);
            let goal = Goal::anchor_only(target);
            let expected = solve(&board, start, goal);

            let mut order = Move::ALL;
            order.shuffle(&mut rng);
            let route = BfsSolver::with_order(order).solve(&board, start, goal);

            assert_eq!(expected, Answer::from(route.as_ref()));
        }
    }

    #[test]
    fn blocking_never_shortens() {
        let mut rng = Pcg64Mcg::seed_from_u64(2024);

        for _ in 0..300 {
            let (board, start, target) = random_instance(&mut rng);
            let goal = Goal::anchor_only(target);
            let before = moves_or_max(solve(&board, start, goal));

            let size = board.size();
            let c = Coord::new(rng.gen_range(0..size), rng.gen_range(0..size));

            if start.cells().contains(&c) {
                continue;
            }

            let mut map = Map2d::new_with(Cell::Free, size);

            for row in 0..size {
                for col in 0..size {
                    let p = Coord::new(row, col);

                    if !board.is_free(p) || p == c {
                        map[p] = Cell::Blocked;
                    }
                }
            }

            let blocked = Board::new(map);
            let after = moves_or_max(solve(&blocked, start, goal));

            assert!(before <= after);
        }
    }
}
