//! Per-curve style properties

use std::borrow::Cow;

use crate::traits::Set;
use crate::{escape, Color, DashStyle, Display, Label, LineWidth, MarkerSize, PointType, Script};

/// How a curve's data points are rendered
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Lines,
    LinesPoints,
    Points,
}

/// Properties common to line and scatter curves
#[derive(Clone, Debug)]
pub struct Properties {
    color: Option<Color>,
    dash: Option<DashStyle>,
    label: Option<Cow<'static, str>>,
    line_width: Option<f64>,
    point_size: Option<f64>,
    point_type: Option<PointType>,
    style: Style,
}

impl Properties {
    fn with_style(style: Style) -> Properties {
        Properties {
            color: None,
            dash: None,
            label: None,
            line_width: None,
            point_size: None,
            point_type: None,
            style,
        }
    }

    /// Properties for a plain line curve
    pub fn lines() -> Properties {
        Properties::with_style(Style::Lines)
    }

    /// Properties for a marker-only curve
    pub fn points() -> Properties {
        Properties::with_style(Style::Points)
    }

    /// Properties for a line curve with a marker on every data point
    pub fn lines_points() -> Properties {
        Properties::with_style(Style::LinesPoints)
    }

    pub(crate) fn set_line_width(&mut self, width: f64) {
        self.line_width = Some(width);
    }

    pub(crate) fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Script for Properties {
    fn script(&self) -> String {
        let mut script = format!("with {} ", self.style.display());

        if let Some(ref dash) = self.dash {
            script.push_str(&format!("dt {} ", dash.display()));
        }

        if let Some(lw) = self.line_width {
            script.push_str(&format!("lw {} ", lw));
        }

        if let Some(color) = self.color {
            script.push_str(&format!("lc rgb '{}' ", color.display()));
        }

        if let Some(pt) = self.point_type {
            script.push_str(&format!("pt {} ", pt.display()));
        }

        if let Some(ps) = self.point_size {
            script.push_str(&format!("ps {} ", ps));
        }

        if let Some(ref label) = self.label {
            script.push_str("title '");
            script.push_str(&escape(label));
            script.push('\'');
        } else {
            script.push_str("notitle");
        }

        script
    }
}

impl Set<Color> for Properties {
    /// Sets the curve color
    fn set(&mut self, color: Color) -> &mut Properties {
        self.color = Some(color);
        self
    }
}

impl Set<DashStyle> for Properties {
    /// Sets a custom dash pattern
    ///
    /// **Note** Curves are drawn solid by default
    fn set(&mut self, dash: DashStyle) -> &mut Properties {
        self.dash = Some(dash);
        self
    }
}

impl Set<Label> for Properties {
    /// Sets the legend label
    fn set(&mut self, label: Label) -> &mut Properties {
        self.label = Some(label.0);
        self
    }
}

impl Set<LineWidth> for Properties {
    /// Changes the width of the line
    ///
    /// # Panics
    ///
    /// Panics if `width` is a non-positive value
    fn set(&mut self, lw: LineWidth) -> &mut Properties {
        let lw = lw.0;

        assert!(lw > 0.);

        self.line_width = Some(lw);
        self
    }
}

impl Set<MarkerSize> for Properties {
    /// Changes the size of the markers
    ///
    /// # Panics
    ///
    /// Panics if `size` is a non-positive value
    fn set(&mut self, ms: MarkerSize) -> &mut Properties {
        let ms = ms.0;

        assert!(ms > 0.);

        self.point_size = Some(ms);
        self
    }
}

impl Set<PointType> for Properties {
    /// Changes the marker type
    fn set(&mut self, pt: PointType) -> &mut Properties {
        self.point_type = Some(pt);
        self
    }
}
