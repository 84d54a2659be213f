use anyhow::Context as _;

use crate::cli::OutlineArgs;
use crate::page;

pub fn run(args: OutlineArgs) -> anyhow::Result<()> {
    let page = page::load(&args.page).context("load page")?;
    print!("{}", page.tree.outline());
    Ok(())
}
