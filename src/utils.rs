//! Utils

use clap::Parser;

/// Arguments for the checkout demos
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Fixture set to use for the tables & basket
    #[clap(short, long, default_value = "standard")]
    pub fixture: String,

    /// Destination country code
    #[clap(short, long, default_value = "GB")]
    pub country: String,

    /// Treat the destination as international
    #[clap(short, long)]
    pub international: bool,
}
