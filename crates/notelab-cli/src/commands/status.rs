//! Status command handler

use anyhow::Result;

use notelab_core::Config;

use crate::output::Output;

use super::open_view;

/// Show account and sync status
pub fn show(config: &Config, output: &Output) -> Result<()> {
    let view = open_view(config)?;
    output.print_status(view.identity(), view.status());
    Ok(())
}
