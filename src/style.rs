//! Plot styling
//!
//! A [`StyleConfig`] is an explicit value: a session snapshots it at creation
//! and is isolated from later changes. The process-level default installed
//! with [`set_default`] follows last-set-wins semantics for sessions created
//! afterwards.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::{Color, DashStyle};

/// Figure margins, as fractions of the canvas
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Default for Margins {
    fn default() -> Margins {
        Margins {
            left: 0.12,
            bottom: 0.10,
            right: 0.90,
            top: 0.90,
        }
    }
}

/// The 20-colour palette sampled by [`colour_cycle`]
pub const PALETTE: [Color; 20] = [
    Color::Rgb(0x1f, 0x77, 0xb4),
    Color::Rgb(0xae, 0xc7, 0xe8),
    Color::Rgb(0xff, 0x7f, 0x0e),
    Color::Rgb(0xff, 0xbb, 0x78),
    Color::Rgb(0x2c, 0xa0, 0x2c),
    Color::Rgb(0x98, 0xdf, 0x8a),
    Color::Rgb(0xd6, 0x27, 0x28),
    Color::Rgb(0xff, 0x98, 0x96),
    Color::Rgb(0x94, 0x67, 0xbd),
    Color::Rgb(0xc5, 0xb0, 0xd5),
    Color::Rgb(0x8c, 0x56, 0x4b),
    Color::Rgb(0xc4, 0x9c, 0x94),
    Color::Rgb(0xe3, 0x77, 0xc2),
    Color::Rgb(0xf7, 0xb6, 0xd2),
    Color::Rgb(0x7f, 0x7f, 0x7f),
    Color::Rgb(0xc7, 0xc7, 0xc7),
    Color::Rgb(0xbc, 0xbd, 0x22),
    Color::Rgb(0xdb, 0xdb, 0x8d),
    Color::Rgb(0x17, 0xbe, 0xcf),
    Color::Rgb(0x9e, 0xda, 0xe5),
];

/// Samples `n` colours from [`PALETTE`], applying an opacity in `0. ..= 1.`
pub fn colour_cycle(n: usize, alpha: f64) -> Vec<Color> {
    let alpha_byte = (alpha.max(0.).min(1.) * 255.) as u8;
    (0..n)
        .map(|i| {
            let index = (i * PALETTE.len() / n.max(1)).min(PALETTE.len() - 1);
            match PALETTE[index] {
                Color::Rgb(r, g, b) if alpha_byte < 255 => Color::Rgba(r, g, b, alpha_byte),
                color => color,
            }
        })
        .collect()
}

/// Styling knobs applied when a session is finalized
///
/// Values not overridden keep the documented defaults of [`Default`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StyleConfig {
    pub(crate) margins: Margins,
    pub(crate) spacing: (f64, f64),
    pub(crate) img_size: (f64, f64),
    pub(crate) colour_cycle: Option<Vec<Color>>,
    pub(crate) dash_cycle: Option<Vec<DashStyle>>,
    pub(crate) legend_spacing: f64,
    pub(crate) legend_font_size: f64,
    pub(crate) label_font_size: Option<f64>,
    pub(crate) legend_outside: Option<f64>,
    pub(crate) line_width: Option<f64>,
    pub(crate) vline_width: Option<f64>,
    pub(crate) vline_colour: Option<Color>,
    pub(crate) xlim: Option<(f64, f64)>,
    pub(crate) ylim: Option<(f64, f64)>,
    pub(crate) rotate_tick_labels: bool,
    pub(crate) headless: bool,
}

impl StyleConfig {
    /// Dots per inch used to translate [`img_size`](StyleConfig::img_size)
    /// into terminal pixels
    pub const DPI: f64 = 80.;

    /// Changes the figure margins
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Changes the spacing between subplots
    pub fn spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.spacing = (horizontal, vertical);
        self
    }

    /// Changes the figure size, in inches
    pub fn img_size(mut self, width: f64, height: f64) -> Self {
        self.img_size = (width, height);
        self
    }

    /// Replaces the colour cycle used by lines and scatter markers
    pub fn colour_cycle(mut self, cycle: Vec<Color>) -> Self {
        self.colour_cycle = Some(cycle);
        self
    }

    /// Draws every series in black
    pub fn monochrome(self) -> Self {
        self.colour_cycle(vec![Color::Black])
    }

    /// Assigns successive dash patterns to the series of each line call
    pub fn dash_cycle(mut self, cycle: Vec<DashStyle>) -> Self {
        self.dash_cycle = Some(cycle);
        self
    }

    /// Changes the vertical spacing between legend entries
    pub fn legend_spacing(mut self, spacing: f64) -> Self {
        self.legend_spacing = spacing;
        self
    }

    /// Changes the label and legend font sizes
    pub fn font_sizes(mut self, label: f64, legend: f64) -> Self {
        self.label_font_size = Some(label);
        self.legend_font_size = legend;
        self
    }

    /// Moves the legend outside the plot area, shrinking the axes by
    /// `axis_reduction_percent` of the canvas width to make room
    pub fn place_legend_outside(mut self, axis_reduction_percent: f64) -> Self {
        self.legend_outside = Some(axis_reduction_percent);
        self
    }

    /// Forces every line of a figure to this width
    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Changes the width and colour of vertical reference lines
    pub fn vline_config(mut self, width: Option<f64>, colour: Option<Color>) -> Self {
        if width.is_some() {
            self.vline_width = width;
        }
        if colour.is_some() {
            self.vline_colour = colour;
        }
        self
    }

    /// Fixes the axis extents instead of autoscaling
    pub fn extents(mut self, xlim: Option<(f64, f64)>, ylim: Option<(f64, f64)>) -> Self {
        self.xlim = xlim;
        self.ylim = ylim;
        self
    }

    /// Draws categorical tick labels vertically
    pub fn rotate_tick_labels(mut self) -> Self {
        self.rotate_tick_labels = !self.rotate_tick_labels;
        self
    }

    /// Never opens an interactive window, even when a call asks for display.
    ///
    /// Sessions bind to this choice at creation; switching a config to
    /// headless afterwards has no effect on sessions that already exist.
    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// A copy of the process-level default installed with [`set_default`],
    /// or the built-in defaults when none was installed
    pub fn inherited() -> StyleConfig {
        DEFAULT
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for StyleConfig {
    fn default() -> StyleConfig {
        StyleConfig {
            margins: Margins::default(),
            spacing: (0.2, 0.2),
            img_size: (8., 6.),
            colour_cycle: None,
            dash_cycle: None,
            legend_spacing: 0.5,
            legend_font_size: 14.,
            label_font_size: None,
            legend_outside: None,
            line_width: None,
            vline_width: None,
            vline_colour: None,
            xlim: None,
            ylim: None,
            rotate_tick_labels: false,
            headless: false,
        }
    }
}

static DEFAULT: RwLock<Option<StyleConfig>> = RwLock::new(None);

/// Installs the style that sessions created afterwards inherit by default.
/// The last installed value wins; sessions that already exist are unaffected.
pub fn set_default(style: StyleConfig) {
    if let Ok(mut guard) = DEFAULT.write() {
        *guard = Some(style);
    }
}
