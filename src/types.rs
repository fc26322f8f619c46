//! Shared primitive types: page geometry, corner references, and the
//! editable-field mapping.

use std::str::FromStr;

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const fn new(width: f64, height: f64) -> Self {
        PageSize { width, height }
    }
}

/// The page corner a coordinate offset is measured from.
///
/// Offsets from a "top" corner grow downward, offsets from a "bottom" corner
/// grow upward, and symmetrically for left vs. right. When a coordinate
/// carries no corner tag, `rbcorner` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    /// `ltcorner`
    TopLeft,
    /// `lbcorner`
    BottomLeft,
    /// `rtcorner`
    TopRight,
    /// `rbcorner`
    #[default]
    BottomRight,
}

/// Unrecognized corner tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCorner(pub String);

impl FromStr for Corner {
    type Err = UnknownCorner;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltcorner" => Ok(Corner::TopLeft),
            "lbcorner" => Ok(Corner::BottomLeft),
            "rtcorner" => Ok(Corner::TopRight),
            "rbcorner" => Ok(Corner::BottomRight),
            other => Err(UnknownCorner(other.to_string())),
        }
    }
}

/// Map a worksheet placeholder code to the TechDraw editable-field name it
/// binds to. Returns `None` for unrecognized codes; callers treat that as a
/// fatal condition for the document.
pub fn editable_field(code: &str) -> Option<&'static str> {
    Some(match code {
        "%C0" => "Comment 1",
        "%C1" => "Comment 2",
        "%C2" => "Comment 3",
        "%C3" => "Comment 4",
        "%S" | "%N" => "SheetNo",
        "%T" => "Title",
        "%Y" => "Organization",
        "%R" => "Revision",
        "%D" => "Date",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_tags_round_trip() {
        assert_eq!("ltcorner".parse(), Ok(Corner::TopLeft));
        assert_eq!("lbcorner".parse(), Ok(Corner::BottomLeft));
        assert_eq!("rtcorner".parse(), Ok(Corner::TopRight));
        assert_eq!("rbcorner".parse(), Ok(Corner::BottomRight));
        assert_eq!(Corner::default(), Corner::BottomRight);
    }

    #[test]
    fn corner_rejects_unknown_tags() {
        assert!("ltcornerx".parse::<Corner>().is_err());
        assert!("".parse::<Corner>().is_err());
    }

    #[test]
    fn sheet_number_codes_share_a_field() {
        assert_eq!(editable_field("%S"), Some("SheetNo"));
        assert_eq!(editable_field("%N"), Some("SheetNo"));
    }

    #[test]
    fn unrecognized_placeholder_is_unmapped() {
        assert_eq!(editable_field("%Z"), None);
        assert_eq!(editable_field("%"), None);
    }
}
