//! ISO page sizes understood by the stock worksheet templates.
//!
//! This table is deliberately the one the upstream templates were authored
//! against, quirks included. The core renderer never consults it; callers
//! resolve a page size up front (usually from the template's filename) and
//! hand it to [`crate::wks_to_svg`].

use crate::types::PageSize;

/// Look up the physical dimensions (mm) for a page-size code.
pub fn page_size(code: &str) -> Option<PageSize> {
    Some(match code {
        "A2" => PageSize::new(549.0, 420.0),
        "A3" => PageSize::new(420.0, 297.0),
        "A4" => PageSize::new(297.0, 210.0),
        "A4-portrait" => PageSize::new(210.0, 297.0),
        _ => return None,
    })
}

/// Derive the page-size code from a template file stem. Stock templates are
/// named `<code>_<variant>.kicad_wks`, e.g. `A4_LandscapeClassic.kicad_wks`.
pub fn code_from_stem(stem: &str) -> &str {
    stem.split('_').next().unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(page_size("A4"), Some(PageSize::new(297.0, 210.0)));
        assert_eq!(page_size("A4-portrait"), Some(PageSize::new(210.0, 297.0)));
        assert_eq!(page_size("A3"), Some(PageSize::new(420.0, 297.0)));
    }

    #[test]
    fn unknown_codes_do_not_resolve() {
        assert_eq!(page_size("A0"), None);
        assert_eq!(page_size(""), None);
    }

    #[test]
    fn stem_prefix_is_the_code() {
        assert_eq!(code_from_stem("A4_LandscapeClassic"), "A4");
        assert_eq!(code_from_stem("A4-portrait_Classic"), "A4-portrait");
        assert_eq!(code_from_stem("A3"), "A3");
    }
}
