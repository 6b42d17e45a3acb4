//! Icon name registry.
//!
//! Editors type icon names by hand in several spellings (`arrow-up-right`,
//! `ArrowUpRight`, `brain`). Names are matched case-insensitively with
//! separators ignored against a fixed table of Phosphor component names.
//! Unknown names resolve to `None` and are logged once per process.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Renderer identifier of a known icon (Phosphor component name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Icon(&'static str);

impl Icon {
    pub const ARROW_UP_RIGHT: Icon = Icon("ArrowUpRight");

    pub fn component(&self) -> &'static str {
        self.0
    }
}

static ICONS: &[&str] = &[
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowSquareOut",
    "ArrowUp",
    "ArrowUpRight",
    "Books",
    "Brain",
    "Briefcase",
    "Buildings",
    "Calendar",
    "CaretDown",
    "CaretRight",
    "ChartBar",
    "ChartLine",
    "ChartPie",
    "ChatCircle",
    "Check",
    "CheckCircle",
    "Clock",
    "Cloud",
    "Code",
    "Cpu",
    "CurrencyDollar",
    "Database",
    "DownloadSimple",
    "Envelope",
    "Eye",
    "FileText",
    "Flag",
    "Gear",
    "Globe",
    "GlobeHemisphereEast",
    "GlobeHemisphereWest",
    "GraduationCap",
    "Handshake",
    "Heart",
    "House",
    "Info",
    "Leaf",
    "Lightbulb",
    "Lightning",
    "Link",
    "List",
    "Lock",
    "MagnifyingGlass",
    "MapPin",
    "Minus",
    "Phone",
    "Play",
    "Plus",
    "Question",
    "Robot",
    "Rocket",
    "ShieldCheck",
    "Sparkle",
    "Star",
    "Target",
    "Trophy",
    "User",
    "Users",
    "Warning",
    "X",
];

static REPORTED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up an icon by any of its accepted spellings.
pub fn lookup(name: &str) -> Option<Icon> {
    let key = canonical(name);
    if key.is_empty() {
        return None;
    }
    let found = ICONS.iter().find(|icon| icon.eq_ignore_ascii_case(&key)).copied().map(Icon);
    if found.is_none() {
        report_unknown(name);
    }
    found
}

fn report_unknown(name: &str) {
    let reported = REPORTED.get_or_init(|| Mutex::new(HashSet::new()));
    if let Ok(mut seen) = reported.lock() {
        if seen.insert(name.to_string()) {
            log::warn!("icon \"{}\" is not in the icon registry; rendering without icon", name);
        }
    }
}
