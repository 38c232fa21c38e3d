//! Details command handler

use crate::cli::Context;
use crate::error::Result;
use clap::Args;

/// Details command arguments
#[derive(Args)]
pub struct DetailsArgs {
    /// Provider place id
    pub place_id: String,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,
}

/// Run the details command
pub async fn run(args: DetailsArgs) -> Result<()> {
    let ctx = Context::load()?;
    let formatter = ctx.formatter(args.format.as_deref())?;

    let details = ctx.places().get_details(&args.place_id).await?;

    println!("{}", formatter.format_details(&details)?);
    Ok(())
}
