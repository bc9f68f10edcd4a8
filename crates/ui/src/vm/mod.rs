mod calendar_vm;
mod radar_vm;
mod time_fmt;

pub use calendar_vm::{Week, month_grid};
pub use radar_vm::{RADAR_AXES, axis_endpoint, ring_points, value_points};
pub use time_fmt::{format_date, format_day_number, format_month};
