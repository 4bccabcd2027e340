//! Brand colours, resolved through ordered layers.
//!
//! A [Palette] is built from a list of [PaletteSource]s. Each source either
//! yields a map of colour names to colours or fails; failures are logged and
//! the source is skipped. Lookups consult the layers in order, and the typed
//! [BrandColour] keys always resolve because the built-in defaults sit behind
//! every other layer.

use crate::colour::Colour;
use crate::PDFError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The colours templates draw with
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BrandColour {
    Indigo,
    LightSilver,
    CyanTurquoise,
    WarmBrown,
    NeutralWhite,
}

impl BrandColour {
    pub const ALL: [BrandColour; 5] = [
        BrandColour::Indigo,
        BrandColour::LightSilver,
        BrandColour::CyanTurquoise,
        BrandColour::WarmBrown,
        BrandColour::NeutralWhite,
    ];

    /// The key this colour is stored under in palette files
    pub fn key(&self) -> &'static str {
        match self {
            BrandColour::Indigo => "indigo",
            BrandColour::LightSilver => "light_silver",
            BrandColour::CyanTurquoise => "cyan_turquoise",
            BrandColour::WarmBrown => "warm_brown",
            BrandColour::NeutralWhite => "neutral_white",
        }
    }

    /// Built-in value, used when no palette layer defines the colour
    pub fn default_colour(&self) -> Colour {
        match self {
            BrandColour::Indigo => Colour::new_rgb_bytes(0x2b, 0x2d, 0x6e),
            BrandColour::LightSilver => Colour::new_rgb_bytes(0xc9, 0xcc, 0xd3),
            BrandColour::CyanTurquoise => Colour::new_rgb_bytes(0x1f, 0xb5, 0xb0),
            BrandColour::WarmBrown => Colour::new_rgb_bytes(0x7a, 0x52, 0x30),
            BrandColour::NeutralWhite => Colour::new_rgb_bytes(0xff, 0xff, 0xff),
        }
    }
}

impl fmt::Display for BrandColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One layer of a palette
pub trait PaletteSource {
    /// Where the colours come from, for log messages
    fn describe(&self) -> String;

    fn load(&self) -> Result<HashMap<String, Colour>, PDFError>;
}

/// A palette file: a JSON object mapping colour names to `#RRGGBB` strings.
/// Entries that are not hex colour strings are skipped, anything else about the
/// file being wrong is an error.
#[derive(Debug, Clone)]
pub struct JsonPalette {
    path: PathBuf,
}

impl JsonPalette {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonPalette {
        JsonPalette {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaletteEntry {
    Hex(String),
    Other(serde_json::Value),
}

/// Parse the contents of a palette file
pub fn parse_palette(json: &str) -> Result<HashMap<String, Colour>, PDFError> {
    let entries: HashMap<String, PaletteEntry> = serde_json::from_str(json)?;

    let mut colours = HashMap::with_capacity(entries.len());
    for (name, entry) in entries {
        match entry {
            PaletteEntry::Hex(hex) => match Colour::from_hex(&hex) {
                Ok(colour) => {
                    colours.insert(name, colour);
                }
                Err(e) => log::debug!("skipping palette entry {name:?}: {e}"),
            },
            PaletteEntry::Other(value) => {
                log::debug!("skipping palette entry {name:?}: {value} is not a colour string")
            }
        }
    }
    Ok(colours)
}

impl PaletteSource for JsonPalette {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<HashMap<String, Colour>, PDFError> {
        let json = std::fs::read_to_string(&self.path)?;
        parse_palette(&json)
    }
}

/// The built-in [BrandColour] values
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultPalette;

impl PaletteSource for DefaultPalette {
    fn describe(&self) -> String {
        "built-in defaults".into()
    }

    fn load(&self) -> Result<HashMap<String, Colour>, PDFError> {
        Ok(BrandColour::ALL
            .iter()
            .map(|c| (c.key().to_string(), c.default_colour()))
            .collect())
    }
}

/// Resolved colour layers, first match wins
#[derive(Debug, Clone, Default)]
pub struct Palette {
    layers: Vec<HashMap<String, Colour>>,
}

impl Palette {
    /// Load every source in order. Sources that fail are logged and skipped.
    pub fn resolve(sources: &[&dyn PaletteSource]) -> Palette {
        let mut layers = Vec::with_capacity(sources.len());
        for source in sources {
            match source.load() {
                Ok(layer) => {
                    log::debug!("loaded {} colours from {}", layer.len(), source.describe());
                    layers.push(layer);
                }
                Err(e) => log::warn!("ignoring palette {}: {e}", source.describe()),
            }
        }
        Palette { layers }
    }

    /// Only the built-in colours
    pub fn defaults() -> Palette {
        Palette::resolve(&[&DefaultPalette])
    }

    /// A palette file layered over the built-in colours. A missing or broken file
    /// leaves just the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Palette {
        Palette::resolve(&[&JsonPalette::new(path), &DefaultPalette])
    }

    /// Look a colour up by name
    pub fn get(&self, name: &str) -> Option<Colour> {
        self.layers.iter().find_map(|layer| layer.get(name).copied())
    }

    pub fn colour(&self, colour: BrandColour) -> Colour {
        self.get(colour.key())
            .unwrap_or_else(|| colour.default_colour())
    }
}
