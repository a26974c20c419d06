//! The plot session: the stateful accumulator between figure creation and
//! finalize/render/save
//!
//! A session owns one [`Figure`], the axis configuration of every subplot
//! added to it, and the handles of every series rendered so far. Series are
//! converted and dispatched one at a time; [`PlotSession::reveal`] decorates
//! the accumulated figure and optionally displays it, and is safe to call
//! again after more series have been added.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::axis;
use crate::curve;
use crate::error::{Error, Result};
use crate::figure::{Figure, SeriesHandle, SubplotId, VLine};
use crate::key;
use crate::normalize::{self, Series, Values};
use crate::style::{StyleConfig, PALETTE};
use crate::traits::Set;
use crate::{Color, Default, FontSize, Label, MarkerSize, PointType, Scale, Title};

/// Marker size used for scatter points unless the caller picks one
const SCATTER_MARKER_SIZE: f64 = 1.;

/// Per-subplot scale selection, fixed when the subplot is added
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisConfig {
    /// Logarithmic x axis
    pub log_x: bool,
    /// Logarithmic y axis
    pub log_y: bool,
}

/// Marker styling layered onto a line series
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    /// Marker size
    pub size: f64,
    /// Keep the connecting line under the markers
    pub with_line: bool,
}

/// Lifecycle of a session
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Configured,
    Populated,
    Finalized,
}

/// The stateful accumulator spanning figure creation through
/// finalize/render/save
#[derive(Debug)]
pub struct PlotSession {
    axis_configs: Vec<AxisConfig>,
    colour_cursor: usize,
    dash_cursor: usize,
    draw_axes: bool,
    figure: Figure,
    handles: Vec<SeriesHandle>,
    legends: Vec<Cow<'static, str>>,
    state: SessionState,
    style: StyleConfig,
}

impl PlotSession {
    /// Creates a session holding one figure with a single subplot slot
    pub fn new<S>(title: S, style: StyleConfig) -> PlotSession
    where
        S: Into<Cow<'static, str>>,
    {
        PlotSession::with_grid(title, 1, 1, style)
    }

    /// Creates a session holding one figure with a `rows`×`cols` subplot grid
    pub fn with_grid<S>(title: S, rows: usize, cols: usize, style: StyleConfig) -> PlotSession
    where
        S: Into<Cow<'static, str>>,
    {
        let mut figure = Figure::new();
        figure.set_grid(rows, cols);
        let (width, height) = style.img_size;
        figure.set_size(
            (width * StyleConfig::DPI) as usize,
            (height * StyleConfig::DPI) as usize,
        );
        figure.set_margins(style.margins);
        figure.set_spacing(style.spacing.0, style.spacing.1);
        if let Some(ref cycle) = style.colour_cycle {
            figure.set_linetype_cycle(cycle);
        }
        if let Some(size) = style.label_font_size {
            figure.set(FontSize(size));
        }
        let title = title.into();
        if !title.is_empty() {
            figure.set(Title(title));
        }

        PlotSession {
            axis_configs: Vec::new(),
            colour_cursor: 0,
            dash_cursor: 0,
            draw_axes: false,
            figure,
            handles: Vec::new(),
            legends: Vec::new(),
            state: SessionState::Created,
            style,
        }
    }

    /// Adds the next subplot, fixing its axis labels and scales
    pub fn add_plot(&mut self, xlabel: &str, ylabel: &str, logx: bool, logy: bool) -> SubplotId {
        let mut x = <axis::Properties as Default>::default();
        if !xlabel.is_empty() {
            x.set(Label(Cow::from(xlabel.to_owned())));
        }
        if logx {
            x.set(Scale::Logarithmic);
        }

        let mut y = <axis::Properties as Default>::default();
        if !ylabel.is_empty() {
            y.set(Label(Cow::from(ylabel.to_owned())));
        }
        if logy {
            y.set(Scale::Logarithmic);
        }

        self.add_plot_with(x, y)
    }

    /// Adds the next subplot from fully configured axis properties
    pub fn add_plot_with(&mut self, x: axis::Properties, y: axis::Properties) -> SubplotId {
        let config = AxisConfig {
            log_x: x.is_logarithmic(),
            log_y: y.is_logarithmic(),
        };
        let id = self.figure.add_subplot(x, y);
        self.axis_configs.push(config);
        if self.state == SessionState::Created {
            self.state = SessionState::Configured;
        }
        id
    }

    /// Adds one line series to a subplot.
    ///
    /// Label x values fall back to categorical tick text, unless the subplot
    /// has a logarithmic x axis. When a dash cycle is configured the series
    /// takes the next pattern; the dash cursor is advanced here and reset
    /// only by the [`line`](crate::line) entry point, so series added
    /// one-by-one across calls keep cycling.
    pub fn add_line(
        &mut self,
        id: SubplotId,
        series: Series,
        legend: Option<&str>,
        marker: Option<Marker>,
    ) -> Result<SeriesHandle> {
        self.add_data(id, series, legend, marker, false)
    }

    /// Adds one scatter series to a subplot.
    ///
    /// Each scatter series takes the next colour of the cycle; the colour
    /// cursor is advanced here and reset only by the
    /// [`scatter`](crate::scatter) entry point.
    pub fn add_scat(
        &mut self,
        id: SubplotId,
        series: Series,
        legend: Option<&str>,
        marker_size: Option<f64>,
    ) -> Result<SeriesHandle> {
        let marker = marker_size.map(|size| Marker {
            size,
            with_line: false,
        });
        self.add_data(id, series, legend, marker, true)
    }

    fn add_data(
        &mut self,
        id: SubplotId,
        series: Series,
        legend: Option<&str>,
        marker: Option<Marker>,
        scatter: bool,
    ) -> Result<SeriesHandle> {
        let config = *self
            .axis_configs
            .get(id.index())
            .ok_or(Error::NoSuchSubplot(id.index()))?;

        // Direct callers get the same clipping rule as the entry points.
        let Series { xs, ys } = normalize::pair(self.handles.len(), series.xs, series.ys)?;

        let xs = match xs {
            Values::Numbers(values) => values,
            Values::Labels(labels) => {
                if scatter {
                    return Err(Error::ScatterLabels);
                }
                if config.log_x {
                    return Err(Error::LogScaleLabels);
                }
                self.figure
                    .set_tic_labels(id, &labels, self.style.rotate_tick_labels)?;
                (0..labels.len()).map(|i| i as f64).collect()
            }
        };

        let mut props = if scatter {
            curve::Properties::points()
        } else {
            match marker {
                Some(Marker {
                    with_line: true, ..
                }) => curve::Properties::lines_points(),
                Some(_) => curve::Properties::points(),
                None => curve::Properties::lines(),
            }
        };

        if scatter {
            let cycle: &[Color] = match self.style.colour_cycle {
                Some(ref cycle) if !cycle.is_empty() => cycle,
                _ => &PALETTE,
            };
            props.set(cycle[self.colour_cursor % cycle.len()]);
            self.colour_cursor += 1;
            props.set(PointType::FilledCircle);
            props.set(MarkerSize(
                marker.map_or(SCATTER_MARKER_SIZE, |m| m.size),
            ));
        } else {
            if let Some(marker) = marker {
                props.set(PointType::FilledCircle);
                props.set(MarkerSize(marker.size));
            }
            if let Some(ref cycle) = self.style.dash_cycle {
                if !cycle.is_empty() {
                    props.set(cycle[self.dash_cursor % cycle.len()].clone());
                    self.dash_cursor += 1;
                }
            }
        }

        if let Some(text) = legend {
            props.set(Label(Cow::from(text.to_owned())));
        }

        // The subplot's axis configuration picks the delegate primitive;
        // marker styling rides on whichever one is chosen.
        let handle = match (config.log_x, config.log_y) {
            (false, false) => self.figure.plot(id, xs, ys, props)?,
            (true, false) => self.figure.semilogx(id, xs, ys, props)?,
            (false, true) => self.figure.semilogy(id, xs, ys, props)?,
            (true, true) => self.figure.loglog(id, xs, ys, props)?,
        };

        self.handles.push(handle);
        if let Some(text) = legend {
            self.legends.push(Cow::from(text.to_owned()));
        }
        self.state = SessionState::Populated;
        Ok(handle)
    }

    /// Starts a fresh colour and dash rotation for the next plot call
    pub(crate) fn reset_cycles(&mut self) {
        self.colour_cursor = 0;
        self.dash_cursor = 0;
    }

    /// Draws reference lines through the origin when the session is revealed
    pub fn set_draw_axes(&mut self, on: bool) {
        self.draw_axes = on;
    }

    /// Finalizes the accumulated figure: applies the legend, the global line
    /// width, the stored extents and the vertical reference lines, then shows
    /// the figure unless `display` is false or the style is headless.
    ///
    /// Revealing is idempotent; decorations are stored on the figure rather
    /// than appended, so a session can be revealed again after more series
    /// are added.
    pub fn reveal(&mut self, display: bool, vlines: &[f64]) -> Result<()> {
        if self.axis_configs.is_empty() {
            return Err(Error::EmptySession);
        }
        if !self.legends.is_empty() && self.legends.len() != self.handles.len() {
            return Err(Error::LegendMismatch {
                legends: self.legends.len(),
                series: self.handles.len(),
            });
        }

        self.figure.zero_axes(self.draw_axes);

        let mut key = <key::Properties as Default>::default();
        key.spacing(self.style.legend_spacing);
        key.set(FontSize(self.style.legend_font_size));
        if let Some(reduction) = self.style.legend_outside {
            key.outside();
            self.figure.set_right_margin(1. - reduction / 100.);
        }
        self.figure.set_key(key);

        if let Some(width) = self.style.line_width {
            for &handle in &self.handles {
                self.figure.set_line_width(handle, width);
            }
        }

        if let Some((low, high)) = self.style.xlim {
            self.figure.set_xrange(low, high);
        }
        if let Some((low, high)) = self.style.ylim {
            self.figure.set_yrange(low, high);
        }

        let (vline_width, vline_colour) = (self.style.vline_width, self.style.vline_colour);
        self.figure.set_vlines(
            vlines
                .iter()
                .map(|&x| VLine {
                    x,
                    width: vline_width,
                    colour: vline_colour,
                })
                .collect(),
        );

        if display {
            if self.style.headless {
                debug!("headless style, skipping display");
            } else {
                let child = self.figure.draw()?;
                let output = child.wait_with_output()?;
                if !output.status.success() {
                    return Err(Error::Gnuplot(
                        String::from_utf8_lossy(&output.stderr).into_owned(),
                    ));
                }
            }
        }

        self.state = SessionState::Finalized;
        Ok(())
    }

    /// Renders the figure to `path` without opening any window.
    ///
    /// Independent of [`reveal`](PlotSession::reveal)'s `display` flag: a
    /// session can be saved without ever being shown.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        if self.axis_configs.is_empty() {
            return Err(Error::EmptySession);
        }
        self.figure.save(path.as_ref())
    }

    /// The first subplot of the session, if one was added
    pub fn first_subplot(&self) -> Option<SubplotId> {
        if self.axis_configs.is_empty() {
            None
        } else {
            Some(SubplotId(0))
        }
    }

    /// Number of subplots added so far
    pub fn subplot_count(&self) -> usize {
        self.axis_configs.len()
    }

    /// Number of series added so far
    pub fn series_count(&self) -> usize {
        self.handles.len()
    }

    /// The values of a plotted series, after conversion
    pub fn series_values(&self, handle: SeriesHandle) -> Option<(&[f64], &[f64])> {
        self.figure.series_data(handle)
    }

    /// The handles of every series added so far, in add order
    pub fn handles(&self) -> &[SeriesHandle] {
        &self.handles
    }

    /// Where the session is in its lifecycle
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The style the session was created with
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The figure accumulated so far
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// The gnuplot program for the accumulated figure
    pub fn script(&self) -> Vec<u8> {
        self.figure.script()
    }

    /// Dumps the gnuplot program into `sink`
    pub fn dump<W>(&self, sink: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        self.figure.dump(sink)
    }
}
