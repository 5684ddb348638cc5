//! Scoped board mutation.
//!
//! A guard applies a move (or a pass) when created and takes it back when
//! dropped, so the board is restored on every exit path, including early
//! returns and unwinding.

use std::ops::{Deref, DerefMut};

use sabre_core::{Board, Move};

/// A board with one move applied for the guard's lifetime.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl<'a> MoveGuard<'a> {
    pub fn new(board: &'a mut Board, mv: Move) -> Self {
        board.make_move(mv);
        Self { board, mv }
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.unmake_move(self.mv);
    }
}

/// A board with the turn passed for the guard's lifetime.
pub struct NullMoveGuard<'a> {
    board: &'a mut Board,
}

impl<'a> NullMoveGuard<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        board.make_null_move();
        Self { board }
    }
}

impl Deref for NullMoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for NullMoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for NullMoveGuard<'_> {
    fn drop(&mut self) {
        self.board.unmake_null_move();
    }
}
