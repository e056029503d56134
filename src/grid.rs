use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 盤面外の座標はラップして巨大な値になるため、上限のみの比較で判定できる
    pub fn in_map(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    pub const fn to_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordDiff {
    pub dr: isize,
    pub dc: isize,
}

impl CoordDiff {
    pub const fn new(dr: isize, dc: isize) -> Self {
        Self { dr, dc }
    }

    pub const fn invert(&self) -> Self {
        Self {
            dr: -self.dr,
            dc: -self.dc,
        }
    }
}

impl Add<CoordDiff> for Coord {
    type Output = Coord;

    fn add(self, rhs: CoordDiff) -> Self::Output {
        Coord {
            row: self.row.wrapping_add_signed(rhs.dr),
            col: self.col.wrapping_add_signed(rhs.dc),
        }
    }
}

pub const ADJACENTS: [CoordDiff; 4] = [
    CoordDiff::new(-1, 0),
    CoordDiff::new(1, 0),
    CoordDiff::new(0, -1),
    CoordDiff::new(0, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map2d<T> {
    pub size: usize,
    map: Vec<T>,
}

impl<T> Map2d<T> {
    pub fn new(map: Vec<T>, size: usize) -> Self {
        debug_assert!(size * size == map.len());
        Self { size, map }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.iter()
    }

    /// 盤面外なら `None` を返す
    pub fn get(&self, c: Coord) -> Option<&T> {
        if c.in_map(self.size) {
            Some(&self[c])
        } else {
            None
        }
    }
}

impl<T: Clone> Map2d<T> {
    pub fn new_with(v: T, size: usize) -> Self {
        let map = vec![v; size * size];
        Self::new(map, size)
    }
}

impl<T> Index<Coord> for Map2d<T> {
    type Output = T;

    #[inline]
    fn index(&self, coordinate: Coord) -> &Self::Output {
        &self.map[coordinate.to_index(self.size)]
    }
}

impl<T> IndexMut<Coord> for Map2d<T> {
    #[inline]
    fn index_mut(&mut self, coordinate: Coord) -> &mut Self::Output {
        &mut self.map[coordinate.to_index(self.size)]
    }
}

impl<T> Index<usize> for Map2d<T> {
    type Output = [T];

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        let begin = row * self.size;
        let end = begin + self.size;
        &self.map[begin..end]
    }
}
