//! Config file commands.

use std::path::Path;

use anyhow::{bail, Result};

use super::InitConfigArgs;
use crate::config::GrtConfig;
use crate::context::Context;

/// Write the default config to `args.path`.
pub fn init(args: InitConfigArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(Path::new(&args.path));
    if path.exists() && !args.force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let Some(path_str) = path.to_str() else {
        bail!("Config path is not valid UTF-8: {}", path.display());
    };
    GrtConfig::default().save(path_str)?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
