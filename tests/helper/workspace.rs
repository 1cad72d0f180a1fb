//! Temporary documentation checkout

use tempfile::TempDir;

use noble_version_tracker::config::TrackerConfig;
use noble_version_tracker::tracker::{TrackerRecord, TrackerStore};

pub struct Workspace {
    _dir: TempDir,
    pub config: TrackerConfig,
}

impl Workspace {
    /// Checkout whose upgrades table lists `tags` in order.
    pub fn with_upgrades(tags: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let config = TrackerConfig::default().rooted_at(dir.path());
        std::fs::create_dir_all(config.docs_path.parent().unwrap()).unwrap();

        let mut content = String::from(
            "---\ntitle: Mainnet\n---\n\n# Chain Upgrades\n\n| Tag | Block | Date |\n| :-- | :---- | :--- |\n",
        );
        for (i, tag) in tags.iter().enumerate() {
            content.push_str(&format!(
                "| [`{tag}`](https://github.com/noble-assets/noble/releases/tag/{tag}) | {} | 2025-0{}-01 |\n",
                100_000 * (i + 1),
                i + 1
            ));
        }
        std::fs::write(&config.docs_path, content).unwrap();

        Self { _dir: dir, config }
    }

    pub fn track(&self, version: &str) {
        TrackerStore::new(&self.config.tracker_path)
            .save(version)
            .unwrap();
    }

    pub fn record(&self) -> TrackerRecord {
        TrackerStore::new(&self.config.tracker_path).load()
    }
}
