//! Font lookup for raster text
//!
//! Faces are resolved through the system font database by weight and style.
//! When no matching system face exists, the bundled DejaVu Sans is used.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FontKey {
    bold: bool,
    italic: bool,
}

/// Bundled fallback face, `None` only if the embedded file fails to parse.
pub fn bundled_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font_data = include_bytes!("../assets/fonts/dejavu/DejaVuSans.ttf");
        let font = Font::try_from_bytes(font_data as &[u8]);
        if font.is_none() {
            warn!("Bundled DejaVu Sans font could not be parsed");
        }
        font
    })
    .as_ref()
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Sans-serif face for the requested style, falling back to the bundled face.
pub fn sans_font(bold: bool, italic: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, &'static Font<'static>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let key = FontKey { bold, italic };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return Some(*font);
    }

    let font_ref: &'static Font<'static> = match load_system_font(bold, italic) {
        Some(font) => Box::leak(Box::new(font)),
        None => return bundled_font(),
    };

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, font_ref);
    Some(font_ref)
}

fn load_system_font(bold: bool, italic: bool) -> Option<Font<'static>> {
    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    db().with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })?
}
