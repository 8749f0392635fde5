use std::ops::{Index, IndexMut};

use crate::position::Position;

/// Rectangular matrix of values indexed by [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: u8,
    columns: u8,
    cells: Vec<T>,
}
/// Cells marked `true` are the ones a piece could move to.
pub type MoveMatrix = Grid<bool>;

impl<T> Grid<T> {
    pub fn new(rows: u8, columns: u8, value: T) -> Self
    where
        T: Clone,
    {
        Grid {
            rows,
            columns,
            cells: vec![value; rows as usize * columns as usize],
        }
    }
    pub fn rows(&self) -> u8 {
        self.rows
    }
    pub fn columns(&self) -> u8 {
        self.columns
    }
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }
    pub fn get(&self, position: Position) -> Option<&T> {
        self.contains(position)
            .then(|| &self.cells[self.offset(position)])
    }
    pub fn positioned_values(&self) -> impl Iterator<Item = (Position, &T)> {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(i, value)| {
            let row = (i / columns as usize) as u8;
            let column = (i % columns as usize) as u8;
            (Position::new(row, column), value)
        })
    }
    fn offset(&self, position: Position) -> usize {
        debug_assert!(
            self.contains(position),
            "{position} is outside of a {}x{} grid",
            self.rows,
            self.columns
        );
        position.row as usize * self.columns as usize + position.column as usize
    }
}
impl MoveMatrix {
    pub fn possible_move(&self, target: Position) -> bool {
        self.get(target).copied().unwrap_or(false)
    }
    pub fn is_there_any_possible_move(&self) -> bool {
        self.cells.iter().any(|cell| *cell)
    }
    pub fn targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.positioned_values()
            .filter(|(_, possible)| **possible)
            .map(|(position, _)| position)
    }
}
impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}
impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}
