pub mod band;
pub mod margins;
pub mod scale;
pub mod stats;
pub mod types;
pub mod value;

pub use band::BandScale;
pub use margins::{Margin, MarginTuning};
pub use scale::ValueScale;
pub use stats::{GroupAverage, LowHigh, group_averages, lowest_highest};
pub use types::{ChartKind, Viewport};
pub use value::{MetricValue, SeriesGroup};
