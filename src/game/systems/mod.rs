pub mod collision;
pub mod magnetism;
pub mod physics;
pub mod scoring;
