pub mod camp;
pub mod command_buffer;
pub mod constants;
pub mod entity;
pub mod events;
pub mod game_loop;
pub mod goal;
pub mod match_result;
pub mod physical;
pub mod player;
pub mod seeker;
pub mod snapshot;
pub mod state;
pub mod systems;
pub mod torus;
