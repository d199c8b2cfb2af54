//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_course_list, print_error, print_info,
    print_lecture_list, print_success, print_warning,
};
pub use progress::{create_download_bar, create_download_spinner, BarSink};
pub use stats::print_run_stats;
