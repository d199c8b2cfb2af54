//! Console output utilities.

use console::style;

use crate::api::Course;
use crate::course::AssetMap;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("[*]").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("[+]").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("[!]").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("[x]").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Udemy Downloader                                  ║
║     Download lectures from your Udemy courses         ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print the subscribed courses for selection.
pub fn print_course_list(courses: &[Course]) {
    print_success("Courses");
    for course in courses {
        println!("   -[{}] : {}", style(course.id).bold(), course.title);
    }
}

/// Print the downloadable lectures of a course.
pub fn print_lecture_list(assets: &AssetMap) {
    print_success("Lectures");
    for (index, asset) in assets.iter() {
        println!(
            "   -[{}] : {} {}",
            style(index).bold(),
            asset.title,
            style(format!("[{}]", asset.asset_type)).dim()
        );
    }
}

/// Print configuration summary.
pub fn print_config_summary(course: &str, resolution: Option<&str>, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Course: {}", course);
    println!("  Resolution: {}", resolution.unwrap_or("ask"));
    println!("  Directory: {}", download_dir);
    println!();
}
