//! Default values and output-compensation factors (all lengths in mm)

/// Fraction of the nominal stroke width actually emitted. Empirically the
/// closest match to how TechDraw interprets stroke widths; do not re-derive.
pub const STROKE_FACTOR: f64 = 0.75;

/// Downward baseline shift as a fraction of the text height, compensating
/// for the metrics gap between osifont and the source format's font.
pub const BASELINE_FACTOR: f64 = 0.35;

/// Text height used when a tbtext element carries no font clause. Legacy
/// constant inherited from the upstream templates; close to pi by accident.
pub const TEXT_HEIGHT: f64 = 3.14159263;

/// Identifier used when a tbtext element carries no name clause.
pub const TEXT_ID: &str = "No_ID";

/// Identifier used when a polygon carries no name clause.
pub const POLYGON_ID: &str = "none";

/// Stroke width used when a polygon carries no linewidth clause.
pub const POLYGON_STROKE: f64 = 0.35;

/// Font family all worksheet text is rendered with.
pub const FONT_FAMILY: &str = "osifont";
