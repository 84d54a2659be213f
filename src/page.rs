use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::PageArgs;
use crate::config::ToggleConfig;
use crate::controller::{Init, SidebarToggleController};
use crate::formats::SidebarToc;
use crate::store::LocalFsExpansionStore;
use crate::tree::{NodeId, SidebarTree};

/// A rendered page with the controller initialized on its sidebar.
pub struct Page {
    pub tree: SidebarTree,
    pub controller: SidebarToggleController<LocalFsExpansionStore>,
    pub root: NodeId,
}

pub fn load(args: &PageArgs) -> anyhow::Result<Page> {
    let config = ToggleConfig::load_or_default(args.config.as_deref().map(Path::new))
        .context("load config")?;

    let toc_path = PathBuf::from(&args.toc);
    let toc_yaml = std::fs::read_to_string(&toc_path)
        .with_context(|| format!("read toc: {}", toc_path.display()))?;
    let toc: SidebarToc = serde_yaml::from_str(&toc_yaml).context("parse toc")?;

    let mut tree = SidebarTree::from_toc(&toc, args.active.as_deref(), &config.markers);
    let store = LocalFsExpansionStore::new(&args.state_dir);
    let controller = SidebarToggleController::new(config, store);

    let init = controller.initialize(&mut tree);
    if let Init::Bound { restored, .. } | Init::AlreadyBound { restored, .. } = &init {
        tracing::debug!(?restored, title = %toc.title, "restored sidebar");
    }
    let root = init
        .root()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("rendered page has no sidebar root"))?;

    Ok(Page {
        tree,
        controller,
        root,
    })
}
