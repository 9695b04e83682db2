pub mod projection;
pub mod row;

pub use projection::{find_source_row, popup_content, project_points, GeoFieldSelector, GeoPoint};
pub use row::{Cell, Row};
