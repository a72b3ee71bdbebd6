use clap::Parser;

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Component id
    pub component: String,
}
