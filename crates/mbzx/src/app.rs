use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "mbzx",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract a Moodle course backup (.mbz) into its own course folder",
    long_about = None
)]
pub struct App {
    /// Name of the .mbz file inside raw-mbz-files/
    ///
    /// Optional at the parser level so a bare invocation can list the
    /// available backups instead of stopping at a usage error.
    pub filename: Option<String>,
}
