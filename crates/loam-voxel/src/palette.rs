use std::collections::HashMap as StdHashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;

use super::VoxelType;

pub type Rgba = [u8; 4];

#[derive(Clone, Debug)]
pub struct PaletteEntry {
    pub key: String,
    pub color: Rgba,
    pub transparent: bool,
}

/// Registry mapping colors to voxel type slots. Slot 0 is reserved for air so
/// `VoxelType::AIR` never aliases a real entry. The mesher itself only needs
/// type equality; color and opacity class are looked up here at assembly time.
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    by_color: HashMap<Rgba, VoxelType>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        let mut p = Palette {
            entries: Vec::new(),
            by_color: HashMap::new(),
        };
        // Reserve slot 0 as the air sentinel.
        p.entries.push(PaletteEntry {
            key: String::new(),
            color: [0, 0, 0, 0],
            transparent: false,
        });
        p
    }

    /// Returns the type slot registered for `color`, creating a new one when
    /// the color has not been seen before.
    pub fn get_or_create(&mut self, color: Rgba, transparent: bool) -> VoxelType {
        if let Some(&t) = self.by_color.get(&color) {
            return t;
        }
        let t = VoxelType(self.entries.len() as u16);
        self.entries.push(PaletteEntry {
            key: format!("#{:02x}{:02x}{:02x}{:02x}", color[0], color[1], color[2], color[3]),
            color,
            transparent,
        });
        self.by_color.insert(color, t);
        t
    }

    pub fn get_by_key(&self, key: &str) -> Option<VoxelType> {
        self.entries
            .iter()
            .position(|e| !e.key.is_empty() && e.key == key)
            .map(|i| VoxelType(i as u16))
    }

    pub fn get(&self, t: VoxelType) -> Option<&PaletteEntry> {
        if t.is_air() {
            return None;
        }
        self.entries.get(t.0 as usize)
    }

    /// Color for a type slot; opaque magenta for unregistered slots so a
    /// palette mismatch is visible instead of silent.
    pub fn color(&self, t: VoxelType) -> Rgba {
        self.get(t).map(|e| e.color).unwrap_or([255, 0, 255, 255])
    }

    pub fn is_transparent(&self, t: VoxelType) -> bool {
        self.get(t).map(|e| e.transparent).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        let mut palette = Palette::new();
        let mut entries: Vec<(String, PaletteEntryConfig)> = cfg.palette.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so slot
        // assignment is stable across loads.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (color, transparent) = match entry {
                PaletteEntryConfig::Color(c) => (c, false),
                PaletteEntryConfig::Detail { color, transparent } => {
                    (color, transparent.unwrap_or(false))
                }
            };
            let t = palette.get_or_create(color, transparent);
            if let Some(e) = palette.entries.get_mut(t.0 as usize) {
                e.key = key;
            }
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct PaletteConfig {
    pub palette: StdHashMap<String, PaletteEntryConfig>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum PaletteEntryConfig {
    // Simple: stone = [128, 128, 128, 255]
    Color(Rgba),
    // Detailed: glass = { color = [200, 220, 255, 120], transparent = true }
    Detail {
        color: Rgba,
        transparent: Option<bool>,
    },
}
