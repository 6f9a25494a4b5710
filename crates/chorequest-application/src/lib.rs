pub mod board_usecase;
pub mod factory;

pub use board_usecase::BoardUseCase;
pub use factory::build_board;
