pub mod bot;
pub mod collision;
pub mod goal;
pub mod physics;
