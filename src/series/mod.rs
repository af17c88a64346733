mod chart;
mod model;
mod normalize;
mod range;

pub use chart::chart_payload;
pub use model::{Series, SeriesPoint};
pub use normalize::{DEFAULT_MAX_GAP_HOURS, max_gap_from_hours, normalize};
pub use range::{DEFAULT_WINDOW_DAYS, DateRange, default_range, default_range_at, filter_by_range};
