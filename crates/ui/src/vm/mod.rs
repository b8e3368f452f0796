mod attempt_vm;
mod time_fmt;

pub use attempt_vm::{
    AttemptRowVm, AttemptStatsVm, TestOverviewVm, map_test_overviews, short_test_label,
};
pub use time_fmt::{format_datetime, format_percentage};
