pub mod app;
pub mod dots;
pub mod theme;
