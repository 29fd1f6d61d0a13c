mod exports;
mod progress;
mod styling;
mod tables;

pub use exports::{export_report, Report};
pub use progress::RequestProgress;
pub use styling::{dim, magenta_bold};

/// Prints the azdo banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("azdo"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Azure DevOps projects and pipelines")
    );
}
