pub mod nearest;

pub use nearest::{select_neighbors, sort_by_distance, visible_candidates, LineSelection, RankedPoint};
