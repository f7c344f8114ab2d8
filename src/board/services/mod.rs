//! Service layer for the task board.

mod board;

pub use board::{BoardService, BoardServiceError, BoardServiceResult};
