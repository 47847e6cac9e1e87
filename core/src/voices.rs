//! Prebuilt voice catalog.
//!
//! The remote speech service exposes a fixed set of named voices. This table is
//! the only place they are listed: request validation, the CLI menu and the
//! HTTP listing all read from it.

use serde::Serialize;

/// A prebuilt voice and the speaking style it is known for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: &'static str,
    pub style: &'static str,
}

pub static VOICES: &[Voice] = &[
    Voice { name: "Zephyr", style: "Bright" },
    Voice { name: "Puck", style: "Upbeat" },
    Voice { name: "Charon", style: "Informative" },
    Voice { name: "Kore", style: "Firm" },
    Voice { name: "Fenrir", style: "Excitable" },
    Voice { name: "Leda", style: "Youthful" },
    Voice { name: "Orus", style: "Firm" },
    Voice { name: "Aoede", style: "Breezy" },
    Voice { name: "Callirrhoe", style: "Easy-going" },
    Voice { name: "Autonoe", style: "Bright" },
    Voice { name: "Enceladus", style: "Breathy" },
    Voice { name: "Iapetus", style: "Clear" },
    Voice { name: "Umbriel", style: "Easy-going" },
    Voice { name: "Algieba", style: "Smooth" },
    Voice { name: "Despina", style: "Smooth" },
    Voice { name: "Erinome", style: "Clear" },
    Voice { name: "Algenib", style: "Gravelly" },
    Voice { name: "Rasalgethi", style: "Informative" },
    Voice { name: "Laomedeia", style: "Upbeat" },
    Voice { name: "Achernar", style: "Soft" },
    Voice { name: "Alnilam", style: "Firm" },
    Voice { name: "Schedar", style: "Even" },
    Voice { name: "Gacrux", style: "Mature" },
    Voice { name: "Pulcherrima", style: "Forward" },
    Voice { name: "Achird", style: "Friendly" },
    Voice { name: "Zubenelgenubi", style: "Casual" },
    Voice { name: "Vindemiatrix", style: "Gentle" },
    Voice { name: "Sadachbia", style: "Lively" },
    Voice { name: "Sadaltager", style: "Knowledgeable" },
    Voice { name: "Sulafat", style: "Warm" },
];

/// Look up a voice by its exact (case-sensitive) name.
pub fn find(name: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|v| v.name == name)
}

/// 1-based lookup, as presented in numbered menus.
pub fn by_menu_index(index: usize) -> Option<&'static Voice> {
    index.checked_sub(1).and_then(|i| VOICES.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_thirty_unique_names() {
        let names: HashSet<_> = VOICES.iter().map(|v| v.name).collect();
        assert_eq!(VOICES.len(), 30);
        assert_eq!(names.len(), VOICES.len());
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(find("Kore").map(|v| v.style), Some("Firm"));
        assert!(find("kore").is_none());
        assert!(find("Nobody").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn menu_index_is_one_based() {
        assert_eq!(by_menu_index(1).map(|v| v.name), Some("Zephyr"));
        assert_eq!(by_menu_index(30).map(|v| v.name), Some("Sulafat"));
        assert!(by_menu_index(0).is_none());
        assert!(by_menu_index(31).is_none());
    }
}
