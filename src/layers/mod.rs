pub mod base;
pub mod manager;
pub mod marker;
pub mod tile;
pub mod vector;
