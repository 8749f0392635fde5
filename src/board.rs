use std::{
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Index, IndexMut},
};

use crate::{error::BoardError, grid::Grid, position::Position};

/// Handle of an occupant registered on a [`Board`].
// Stored off by one so that `Option<PieceIndex>` stays 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceIndex(NonZero<u32>);

impl Display for PieceIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", usize::from(*self))?;
        Ok(())
    }
}

impl From<PieceIndex> for usize {
    fn from(value: PieceIndex) -> Self {
        (value.0.get() - 1) as usize
    }
}
impl From<usize> for PieceIndex {
    fn from(value: usize) -> Self {
        let value = u32::try_from(value).unwrap_or(u32::MAX);
        PieceIndex(NonZero::<u32>::MIN.saturating_add(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot<T> {
    occupant: T,
    position: Option<Position>,
}

/// A rectangular grid holding at most one occupant per cell.
///
/// Occupants are registered once with [`Board::add`] and referred to by their
/// [`PieceIndex`] afterwards. Each occupant records the cell it stands on, so
/// for every placed occupant `board.position_of(index)` names the cell whose
/// content is `index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board<T> {
    pieces: Vec<Slot<T>>,
    cells: Grid<Option<PieceIndex>>,
}
impl<T> Board<T> {
    pub fn new(rows: u8, columns: u8) -> Result<Self, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        Ok(Board {
            pieces: Vec::new(),
            cells: Grid::new(rows, columns, None),
        })
    }
    pub fn rows(&self) -> u8 {
        self.cells.rows()
    }
    pub fn columns(&self) -> u8 {
        self.cells.columns()
    }
    /// Registers an occupant without placing it anywhere.
    pub fn add(&mut self, occupant: T) -> PieceIndex {
        let index = self.pieces.len().into();
        self.pieces.push(Slot {
            occupant,
            position: None,
        });
        index
    }
    pub fn position_exists(&self, position: Position) -> bool {
        self.cells.contains(position)
    }
    fn check_bounds(&self, position: Position) -> Result<(), BoardError> {
        if self.position_exists(position) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds(position))
        }
    }
    pub fn piece(&self, position: Position) -> Result<Option<PieceIndex>, BoardError> {
        self.check_bounds(position)?;
        Ok(self.cells[position])
    }
    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece(position)?.is_some())
    }
    /// Puts an occupant on an empty cell. An occupant already standing on
    /// another cell leaves that cell first.
    pub fn place_piece(&mut self, index: PieceIndex, position: Position) -> Result<(), BoardError> {
        if self.there_is_a_piece(position)? {
            return Err(BoardError::Occupied(position));
        }
        if let Some(previous) = self.slot(index).position {
            self.cells[previous] = None;
        }
        self.cells[position] = Some(index);
        self.slot_mut(index).position = Some(position);
        Ok(())
    }
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<PieceIndex>, BoardError> {
        let Some(index) = self.piece(position)? else {
            return Ok(None);
        };
        self.cells[position] = None;
        self.slot_mut(index).position = None;
        Ok(Some(index))
    }
    pub fn position_of(&self, index: PieceIndex) -> Option<Position> {
        self.slot(index).position
    }
    /// The occupant on `position`, if the cell exists and is occupied.
    pub fn occupant(&self, position: Position) -> Option<(PieceIndex, &T)> {
        let index = (*self.cells.get(position)?)?;
        Some((index, &self[index]))
    }
    /// Every registered occupant, placed or not.
    pub fn all_pieces(&self) -> impl Iterator<Item = (PieceIndex, &T)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, slot)| (i.into(), &slot.occupant))
    }
    /// Occupants currently standing on a cell, in row-major order.
    pub fn placed_pieces(&self) -> impl Iterator<Item = (Position, PieceIndex, &T)> {
        self.cells
            .positioned_values()
            .filter_map(|(position, index)| index.map(|index| (position, index, &self[index])))
    }
    pub fn map<U>(&self, mut f: impl FnMut(Option<&T>) -> U) -> Grid<U>
    where
        U: Clone,
    {
        let mut grid = Grid::new(self.rows(), self.columns(), f(None));
        for (position, _, occupant) in self.placed_pieces() {
            grid[position] = f(Some(occupant));
        }
        grid
    }
    fn slot(&self, index: PieceIndex) -> &Slot<T> {
        &self.pieces[usize::from(index)]
    }
    fn slot_mut(&mut self, index: PieceIndex) -> &mut Slot<T> {
        &mut self.pieces[usize::from(index)]
    }
}
impl<T> Index<PieceIndex> for Board<T> {
    type Output = T;

    fn index(&self, index: PieceIndex) -> &Self::Output {
        &self.slot(index).occupant
    }
}
impl<T> IndexMut<PieceIndex> for Board<T> {
    fn index_mut(&mut self, index: PieceIndex) -> &mut Self::Output {
        &mut self.slot_mut(index).occupant
    }
}
