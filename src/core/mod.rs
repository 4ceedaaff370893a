pub mod easing;
pub mod mapper;
pub mod normalize;
pub mod path;
pub mod reveal;
pub mod scale;
pub mod types;

pub use easing::Easing;
pub use mapper::{CoordinateMapper, Vertex};
pub use normalize::{normalize_series, stack_series};
pub use path::{Curve, PathCommand, PathGeometry, SMOOTH_TENSION};
pub use reveal::{reveal_index, reveal_vertices, revealed_count};
pub use scale::{BandScale, Cartesian, CartesianScales, LinearScale, XScale};
pub use types::{DomainValue, Point, Series, validate_series_set};
