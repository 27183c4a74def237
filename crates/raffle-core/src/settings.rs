use crate::constants::*;
use crate::easing::BezierCurve;
use crate::error::SpinError;

/// Timing and feel of a spin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinnerSettings {
    /// Lower bound on wall-clock spin time; frame jitter may add a little.
    pub min_spin_duration_secs: f64,
    /// Visual laps before landing. Each lap scrolls `PASSES_PER_ROTATION` pages.
    pub spin_rotations: u32,
    pub bezier_curve: BezierCurve,
}

impl Default for SpinnerSettings {
    fn default() -> Self {
        Self {
            min_spin_duration_secs: DEFAULT_MIN_SPIN_DURATION_SECS,
            spin_rotations: DEFAULT_SPIN_ROTATIONS,
            bezier_curve: BezierCurve::default(),
        }
    }
}

impl SpinnerSettings {
    pub fn sanitized(&self) -> Result<SpinnerSettings, SpinError> {
        if !self.min_spin_duration_secs.is_finite() {
            return Err(SpinError::InvalidSettings(format!(
                "spin duration must be a finite number of seconds, got {}",
                self.min_spin_duration_secs
            )));
        }
        if !self.bezier_curve.is_finite() {
            return Err(SpinError::InvalidSettings(format!(
                "easing control points must be finite, got {}",
                self.bezier_curve
            )));
        }
        let out = SpinnerSettings {
            min_spin_duration_secs: self
                .min_spin_duration_secs
                .clamp(MIN_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS),
            spin_rotations: self
                .spin_rotations
                .clamp(MIN_SPIN_ROTATIONS, MAX_SPIN_ROTATIONS),
            bezier_curve: self.bezier_curve.clamped(),
        };
        if !self.bezier_curve.is_in_domain() {
            log::warn!(
                "[settings] easing {} has x outside [0, 1]; using {}",
                self.bezier_curve,
                out.bezier_curve
            );
        }
        if out.min_spin_duration_secs != self.min_spin_duration_secs {
            log::warn!(
                "[settings] spin duration {}s clamped to {}s",
                self.min_spin_duration_secs,
                out.min_spin_duration_secs
            );
        }
        if out.spin_rotations != self.spin_rotations {
            log::warn!(
                "[settings] spin rotations {} clamped to {}",
                self.spin_rotations,
                out.spin_rotations
            );
        }
        Ok(out)
    }

    pub fn duration_ms(&self) -> f64 {
        self.min_spin_duration_secs * 1000.0
    }
}

/// Reel geometry shared by the engine (distance, windowing) and painters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReelLayout {
    pub visible_rows: usize,
    pub item_height_px: f64,
    pub overscan_rows: usize,
}

impl Default for ReelLayout {
    fn default() -> Self {
        Self {
            visible_rows: DEFAULT_VISIBLE_ROWS,
            item_height_px: DEFAULT_ITEM_HEIGHT_PX,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
        }
    }
}

impl ReelLayout {
    pub fn sanitized(&self) -> ReelLayout {
        let item_height_px = if self.item_height_px.is_finite() {
            self.item_height_px
                .clamp(MIN_ITEM_HEIGHT_PX, MAX_ITEM_HEIGHT_PX)
        } else {
            DEFAULT_ITEM_HEIGHT_PX
        };
        ReelLayout {
            visible_rows: self.visible_rows.clamp(MIN_VISIBLE_ROWS, MAX_VISIBLE_ROWS),
            item_height_px,
            overscan_rows: self.overscan_rows.min(MAX_OVERSCAN_ROWS),
        }
    }

    /// Row holding the winner pointer, counted from the top.
    pub fn pointer_row(&self) -> usize {
        self.visible_rows / 2
    }

    /// Entries scrolled past per configured rotation.
    pub fn items_per_rotation(&self) -> usize {
        self.visible_rows * PASSES_PER_ROTATION
    }

    pub fn viewport_height_px(&self) -> f64 {
        self.visible_rows as f64 * self.item_height_px
    }
}

/// Everything the paint callback needs to style the reel.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeConfig {
    pub layout: ReelLayout,
    pub background: String,
    pub row_alt_background: String,
    pub row_text: String,
    pub highlight: String,
    pub pointer: String,
    pub font_family: String,
    pub font_size_px: f64,
    pub show_ticket_numbers: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            layout: ReelLayout::default(),
            background: DEFAULT_BACKGROUND.to_string(),
            row_alt_background: DEFAULT_ROW_ALT_BACKGROUND.to_string(),
            row_text: DEFAULT_ROW_TEXT.to_string(),
            highlight: DEFAULT_HIGHLIGHT.to_string(),
            pointer: DEFAULT_POINTER.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            show_ticket_numbers: true,
        }
    }
}

fn or_default(value: &str, default: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        default.to_string()
    } else {
        v.to_string()
    }
}

impl ThemeConfig {
    pub fn sanitized(&self) -> ThemeConfig {
        let font_size_px = if self.font_size_px.is_finite() {
            self.font_size_px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX)
        } else {
            DEFAULT_FONT_SIZE_PX
        };
        ThemeConfig {
            layout: self.layout.sanitized(),
            background: or_default(&self.background, DEFAULT_BACKGROUND),
            row_alt_background: or_default(&self.row_alt_background, DEFAULT_ROW_ALT_BACKGROUND),
            row_text: or_default(&self.row_text, DEFAULT_ROW_TEXT),
            highlight: or_default(&self.highlight, DEFAULT_HIGHLIGHT),
            pointer: or_default(&self.pointer, DEFAULT_POINTER),
            font_family: or_default(&self.font_family, DEFAULT_FONT_FAMILY),
            font_size_px,
            show_ticket_numbers: self.show_ticket_numbers,
        }
    }

    /// CSS font shorthand for canvas text.
    pub fn css_font(&self) -> String {
        format!("600 {}px {}", self.font_size_px.round(), self.font_family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_through_unchanged() {
        let s = SpinnerSettings::default();
        assert_eq!(s.sanitized(), Ok(s.clone()));
        let t = ThemeConfig::default();
        assert_eq!(t.sanitized(), t);
    }

    #[test]
    fn numbers_are_clamped_into_range() {
        let s = SpinnerSettings {
            min_spin_duration_secs: 0.01,
            spin_rotations: 0,
            bezier_curve: BezierCurve::new(1.5, 0.2, -0.3, 1.0),
        }
        .sanitized()
        .unwrap();
        assert_eq!(s.min_spin_duration_secs, MIN_SPIN_DURATION_SECS);
        assert_eq!(s.spin_rotations, MIN_SPIN_ROTATIONS);
        assert_eq!(s.bezier_curve, BezierCurve::new(1.0, 0.2, 0.0, 1.0));

        let s = SpinnerSettings {
            min_spin_duration_secs: 1e9,
            spin_rotations: 10_000,
            ..SpinnerSettings::default()
        }
        .sanitized()
        .unwrap();
        assert_eq!(s.min_spin_duration_secs, MAX_SPIN_DURATION_SECS);
        assert_eq!(s.spin_rotations, MAX_SPIN_ROTATIONS);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let s = SpinnerSettings {
            min_spin_duration_secs: f64::NAN,
            ..SpinnerSettings::default()
        };
        assert!(matches!(s.sanitized(), Err(SpinError::InvalidSettings(_))));
        let s = SpinnerSettings {
            bezier_curve: BezierCurve::new(0.2, f64::INFINITY, 0.4, 1.0),
            ..SpinnerSettings::default()
        };
        assert!(matches!(s.sanitized(), Err(SpinError::InvalidSettings(_))));
    }

    #[test]
    fn layout_geometry() {
        let l = ReelLayout::default();
        assert_eq!(l.pointer_row(), 2);
        assert_eq!(l.items_per_rotation(), 5 * PASSES_PER_ROTATION);
        assert_eq!(l.viewport_height_px(), 5.0 * DEFAULT_ITEM_HEIGHT_PX);

        let l = ReelLayout {
            visible_rows: 0,
            item_height_px: f64::NAN,
            overscan_rows: 99,
        }
        .sanitized();
        assert_eq!(l.visible_rows, MIN_VISIBLE_ROWS);
        assert_eq!(l.item_height_px, DEFAULT_ITEM_HEIGHT_PX);
        assert_eq!(l.overscan_rows, MAX_OVERSCAN_ROWS);
        assert_eq!(l.pointer_row(), 0);
    }

    #[test]
    fn blank_theme_colors_fall_back() {
        let t = ThemeConfig {
            background: "  ".into(),
            pointer: "".into(),
            font_size_px: 1000.0,
            ..ThemeConfig::default()
        }
        .sanitized();
        assert_eq!(t.background, DEFAULT_BACKGROUND);
        assert_eq!(t.pointer, DEFAULT_POINTER);
        assert_eq!(t.font_size_px, MAX_FONT_SIZE_PX);
        assert_eq!(t.css_font(), "600 128px sans-serif");
    }
}
