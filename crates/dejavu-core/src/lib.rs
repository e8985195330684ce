pub mod detail;
pub mod fetch;
pub mod geometry;
pub mod grid;
pub mod route;
