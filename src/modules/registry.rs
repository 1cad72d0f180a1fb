//! Static table of the Noble modules covered by the documentation

/// A logical module, the go.mod paths it may be required under, and the
/// directory of the Noble repository its sources live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: &'static str,
    pub identifiers: &'static [&'static str],
    pub directory: &'static str,
}

/// Modules documented under technical_reference/modules
pub const NOBLE_MODULES: &[ModuleEntry] = &[
    ModuleEntry {
        name: "dollar",
        identifiers: &["dollar.noble.xyz", "github.com/noble-assets/dollar"],
        directory: "x/dollar",
    },
    ModuleEntry {
        name: "orbiter",
        identifiers: &["github.com/noble-assets/orbiter"],
        directory: "x/orbiter",
    },
    ModuleEntry {
        name: "forwarding",
        identifiers: &["github.com/noble-assets/forwarding"],
        directory: "x/forwarding",
    },
    ModuleEntry {
        name: "swap",
        identifiers: &["github.com/noble-assets/swap"],
        directory: "x/swap",
    },
    ModuleEntry {
        name: "cctp",
        identifiers: &["github.com/circlefin/noble-cctp"],
        directory: "x/cctp",
    },
    ModuleEntry {
        name: "aura",
        identifiers: &["github.com/noble-assets/aura"],
        directory: "x/aura",
    },
    ModuleEntry {
        name: "authority",
        identifiers: &["github.com/noble-assets/authority"],
        directory: "x/authority",
    },
    ModuleEntry {
        name: "blockibc",
        identifiers: &["github.com/noble-assets/blockibc"],
        directory: "x/blockibc",
    },
    ModuleEntry {
        name: "fiattokenfactory",
        identifiers: &["github.com/noble-assets/fiattokenfactory"],
        directory: "x/fiattokenfactory",
    },
    ModuleEntry {
        name: "florin",
        identifiers: &["github.com/noble-assets/florin"],
        directory: "x/florin",
    },
    ModuleEntry {
        name: "globalfee",
        identifiers: &["github.com/noble-assets/globalfee"],
        directory: "x/globalfee",
    },
    ModuleEntry {
        name: "halo",
        identifiers: &["github.com/noble-assets/halo"],
        directory: "x/halo",
    },
    ModuleEntry {
        name: "wormhole",
        identifiers: &["github.com/noble-assets/wormhole"],
        directory: "x/wormhole",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct ModuleRegistry {
    entries: &'static [ModuleEntry],
}

impl ModuleRegistry {
    pub const fn new(entries: &'static [ModuleEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [ModuleEntry] {
        self.entries
    }

    /// Every known go.mod path, in table order.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| entry.identifiers.iter().copied())
    }

    pub fn is_known(&self, identifier: &str) -> bool {
        self.identifiers().any(|known| known == identifier)
    }

    pub fn entry_for_identifier(&self, identifier: &str) -> Option<&'static ModuleEntry> {
        self.entries
            .iter()
            .find(|entry| entry.identifiers.contains(&identifier))
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(NOBLE_MODULES)
    }
}
