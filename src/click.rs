use anyhow::Context as _;

use crate::cli::{ClickArgs, ClickTarget};
use crate::controller::ClickOutcome;
use crate::page;
use crate::tree::HitPart;

pub fn run(args: ClickArgs) -> anyhow::Result<()> {
    let mut page = page::load(&args.page).context("load page")?;

    let chapter = page
        .tree
        .find_chapter(&args.chapter)
        .ok_or_else(|| anyhow::anyhow!("chapter not found in toc: {}", args.chapter))?;
    let part = match args.on {
        ClickTarget::Link => HitPart::Link,
        ClickTarget::Arrow => HitPart::Arrow,
        ClickTarget::Title => HitPart::Title,
    };
    let event = page
        .tree
        .click(chapter, part, args.offset_x)
        .ok_or_else(|| anyhow::anyhow!("chapter {} has no {part:?} to click", args.chapter))?;

    let outcome = page
        .controller
        .handle_click(&mut page.tree, &page.root, &event);
    match &outcome {
        ClickOutcome::Toggled { identity, expanded } => {
            let identity = identity.as_deref().unwrap_or(&args.chapter);
            println!("toggled {identity} expanded={expanded}");
        }
        ClickOutcome::Navigate => println!("navigate {}", args.chapter),
        ClickOutcome::Ignored => println!("ignored"),
    }
    print!("{}", page.tree.outline());

    Ok(())
}
