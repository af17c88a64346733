mod chart;
mod check;

pub use chart::{ChartRequest, ChartSeries, chart_series};
pub use check::{CheckOutcome, MonitorError, check_scale};

#[cfg(test)]
mod tests;
