mod attempt_vm;
mod report_vm;
mod time_fmt;

pub use attempt_vm::{AttemptIntent, AttemptVm};
pub use report_vm::{OverallRowVm, ReportRowVm, map_overall_row, map_report_rows};
pub use time_fmt::format_countdown;
