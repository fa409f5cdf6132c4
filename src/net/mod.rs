pub mod game_session;
pub mod protocol;
pub mod session;
