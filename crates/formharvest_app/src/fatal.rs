use std::fmt::Display;

use formharvest_engine::RunError;

const STARTUP_LABEL: &str = "Startup";

/// The block printed on stdout when a run ends in error.
pub fn error_block(label: &str, cause: &dyn Display, remediation: &str) -> String {
    format!("\n***FORMHARVEST ERROR: {label}***\nCause: {cause}\n\n{remediation}\n")
}

pub fn run_error_block(err: &RunError) -> String {
    error_block(err.label(), err, &err.remediation())
}

pub fn startup_error_block(err: &anyhow::Error) -> String {
    error_block(
        STARTUP_LABEL,
        &format!("{err:#}"),
        "Check the command line and any file given to `--site`; `formharvest --help` lists the options.",
    )
}
