//! Reference tables for scanned analog photos.
//!
//! Cameras and lenses are keyed by a 1-based index, films by their 1-based
//! position in the film list. Index `0` never resolves: callers treat it as
//! "field not set" and skip the lookup entirely.

use serde::Serialize;
use thiserror::Error;

/// Camera body, written as EXIF `Make` / `Model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Camera {
    pub make: &'static str,
    pub model: &'static str,
}

/// Lens, written as EXIF `Lens` / `FocalLength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lens {
    pub description: &'static str,
    /// Focal length in millimetres; `None` for zooms.
    pub focal_length: Option<u32>,
}

/// Film stock with its box speed and the edge code printed on the negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Film {
    pub iso: u32,
    pub description: &'static str,
    /// May be empty when the stock has no known edge code.
    pub inscription: &'static str,
}

/// Lookup failure for an index outside a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown camera index {index} (valid: 1-{max})")]
    UnknownCamera { index: u32, max: usize },

    #[error("Unknown lens index {index} (valid: 1-{max})")]
    UnknownLens { index: u32, max: usize },

    #[error("Unknown film index {index} (valid: 1-{max})")]
    UnknownFilm { index: u32, max: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;

const fn camera(make: &'static str, model: &'static str) -> Camera {
    Camera { make, model }
}

const fn lens(description: &'static str, focal_length: Option<u32>) -> Lens {
    Lens {
        description,
        focal_length,
    }
}

const fn film(iso: u32, description: &'static str, inscription: &'static str) -> Film {
    Film {
        iso,
        description,
        inscription,
    }
}

pub const CAMERAS: &[Camera] = &[
    camera("Leica", "Leica M7"),
    camera("Zeiss", "Zeiss Ikon ZM"),
    camera("Yashica", "Yashica-Mat"),
    camera("Rollei", "Rollei 35S"),
    camera("Fuji", "Fuji GW670 III 6x7 Professional"),
    camera("Minolta", "Minolta XG-1"),
    camera("Olympus", "Olympus-35 SP"),
];

pub const LENSES: &[Lens] = &[
    lens("Zeiss Biogon 2/35 ZM", Some(35)),
    lens("Leica Summicron-M 1:2/50", Some(50)),
    lens("Leitz Tele-Elmarit-M 1:2.8/90", Some(90)),
    lens("Zuiko 42mm f/1.7", Some(42)),
    lens("Yashinon 1:3.5 80mm", Some(80)),
    lens("Rollei-HFT Sonnar 2.8/40", Some(40)),
    lens("Fujinon 1:3.5 90mm EBC", Some(90)),
    lens("Minolta MD Rokkor 50mm 1:1.7", Some(50)),
    lens("Minolta MD Zoom 28-70mm f/3.5-4.8", None),
    lens("Vivitar MC Macro Focusing Zoom 70-210mm 1:4.4-5.6", None),
];

pub const FILMS: &[Film] = &[
    film(400, "Kodak TRI-X 400", ""),
    film(400, "Kodak T-MAX 400", "TMY 5053"),
    film(100, "Kodak T-MAX 100", ""),
    film(100, "Fujifilm 100 Acros", "ACR-36"),
    film(400, "Fujifilm Neopan 400", "400-PR"),
    film(1600, "Fujifilm Neopan 1600", "1600-PR"),
    film(400, "Kodak T400 CN", "T400CN"),
    film(400, "Illford HP5 Plus", ""),
    film(125, "Illford HP4", ""),
    film(400, "Illford XP2 400", ""),
    film(400, "Illford 400 Delta Professional", ""),
    film(50, "Fujichrome Velvia 50", "RVP-50"),
    film(100, "Fujichrome Velvia 100", "RVP-100"),
    film(100, "Fujichrome Velvia 100F", ""),
    film(100, "Fujichrome Sensia 100", "RD-104"),
    film(200, "Fujichrome Sensia 200", "RM-905"),
    film(100, "Fujicolor Superia 100", "CN, S-100"),
    film(160, "Fujicolor Pro 160 NS", "PN, 160NS"),
    film(200, "Fujicolor Superia 200 CA", "CA-3, G-200"),
    film(400, "Fujicolor Press/Superia X-TRA 400", "CH,S-400"),
    film(800, "Fujicolor Press/Superia X-TRA 800", "CZ,G-800"),
    film(50, "ADOX CHS 50", "CHS50"),
    film(100, "ADOX CHS 100", ""),
    film(200, "Kodak EktaChrome 200", ""),
    film(100, "Kodak EktaChrome 100", "EB 5045"),
    film(100, "Kodak Ektar 100-2", "CX 5301"),
    film(125, "Kodak Ektar 125-1", ""),
    film(100, "Kodak Gold 100-2", ""),
    film(200, "Kodak Gold 200-2", "GB 6096 or GB 7304"),
    film(160, "Kodak Portra 160VC", "160-VC2"),
    film(100, "Kodak Color II 100", "Kodak Safety 5053"),
    film(40, "Agfacolor CN 17", ""),
    film(80, "Agfacolor Special CNS", ""),
    film(80, "Agfacolor Special CNS2", ""),
    film(200, "Agfa XRG 200", ""),
    film(125, "Agfa Optima 125", ""),
    film(50, "Agfa Ultra 50", ""),
    film(40, "Agfa Leverkusen Isopan F", "AGFA L IF"),
    film(100, "Agfa Isopan SS", "AGFA ISS"),
];

fn by_index<T>(table: &'static [T], index: u32) -> Option<&'static T> {
    let pos = usize::try_from(index).ok()?.checked_sub(1)?;
    table.get(pos)
}

fn indexed<T>(table: &'static [T]) -> impl Iterator<Item = (u32, &'static T)> {
    table.iter().zip(1u32..).map(|(entry, idx)| (idx, entry))
}

/// Look up a camera by its 1-based index.
pub fn camera_by_index(index: u32) -> Result<&'static Camera> {
    by_index(CAMERAS, index).ok_or(CatalogError::UnknownCamera {
        index,
        max: CAMERAS.len(),
    })
}

/// Look up a lens by its 1-based index.
pub fn lens_by_index(index: u32) -> Result<&'static Lens> {
    by_index(LENSES, index).ok_or(CatalogError::UnknownLens {
        index,
        max: LENSES.len(),
    })
}

/// Look up a film by its 1-based position in [`FILMS`].
pub fn film_by_index(index: u32) -> Result<&'static Film> {
    by_index(FILMS, index).ok_or(CatalogError::UnknownFilm {
        index,
        max: FILMS.len(),
    })
}

/// All cameras with their index, in index order.
pub fn cameras() -> impl Iterator<Item = (u32, &'static Camera)> {
    indexed(CAMERAS)
}

/// All lenses with their index, in index order.
pub fn lenses() -> impl Iterator<Item = (u32, &'static Lens)> {
    indexed(LENSES)
}

/// All films with their index, in index order.
pub fn films() -> impl Iterator<Item = (u32, &'static Film)> {
    indexed(FILMS)
}
