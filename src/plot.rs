//! Plot-call entry points
//!
//! [`line`] and [`scatter`] build one call each: configure it with the
//! [`Set`]/[`Configure`] traits, then finish with `draw()`, which normalizes
//! the input shapes, feeds the resulting series into a session and reveals
//! it. The returned [`PlotSession`] can be handed back to a later call with
//! `extend` to accumulate more series onto the same figure.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::axis;
use crate::error::{Error, Result};
use crate::file;
use crate::normalize::{normalize_line, normalize_scatter, Input};
use crate::session::{Marker, PlotSession};
use crate::style::StyleConfig;
use crate::traits::{Configure, Set};
use crate::{Axis, Default, Legend, MarkerSize, MarkerSizes, Output, Title};

/// Starts a line plot call
pub fn line<X, Y>(x: X, y: Y) -> Line
where
    X: Into<Input>,
    Y: Into<Input>,
{
    Line {
        common: Common::new(),
        data: Some((x.into(), y.into())),
        mark_with_line: false,
        marker_sizes: None,
        vlines: Vec::new(),
    }
}

/// Starts a scatter plot call
pub fn scatter<X, Y>(x: X, y: Y) -> Scatter
where
    X: Into<Input>,
    Y: Into<Input>,
{
    Scatter {
        common: Common::new(),
        data: Some((x.into(), y.into())),
        marker_size: None,
    }
}

/// Starts a line plot call from one delimited file
pub fn line_from_file<P>(path: P, delimiter: u8, x_index: usize, y_indices: &[usize]) -> Result<Line>
where
    P: AsRef<Path>,
{
    line_from_files(&[path], delimiter, x_index, y_indices)
}

/// Starts a line plot call from several delimited files, concatenating their
/// series
pub fn line_from_files<P>(
    paths: &[P],
    delimiter: u8,
    x_index: usize,
    y_indices: &[usize],
) -> Result<Line>
where
    P: AsRef<Path>,
{
    let (x, y) = file::load_delimited(paths, delimiter, x_index, y_indices)?;
    Ok(line(x, y))
}

/// Starts a line plot call from a comma-separated file
pub fn line_from_csv<P>(path: P, x_index: usize, y_indices: &[usize]) -> Result<Line>
where
    P: AsRef<Path>,
{
    line_from_file(path, b',', x_index, y_indices)
}

/// Configuration shared by line and scatter calls
#[derive(Debug)]
struct Common {
    display: bool,
    draw_axes: bool,
    legend: Option<Vec<Cow<'static, str>>>,
    output: Option<PathBuf>,
    parent: Option<PlotSession>,
    style: Option<StyleConfig>,
    title: Option<Cow<'static, str>>,
    x_axis: Option<axis::Properties>,
    y_axis: Option<axis::Properties>,
}

impl Common {
    fn new() -> Common {
        Common {
            display: true,
            draw_axes: false,
            legend: None,
            output: None,
            parent: None,
            style: None,
            title: None,
            x_axis: None,
            y_axis: None,
        }
    }

    /// A parent session cannot be re-titled or re-scaled; those belong to
    /// session creation. Rejected before anything is rendered.
    fn check_reuse(&self) -> Result<()> {
        if self.parent.is_some()
            && (self.title.is_some() || self.x_axis.is_some() || self.y_axis.is_some())
        {
            return Err(Error::ConfigConflict(
                "cannot configure title, labels or scales when extending an existing session; \
                 configure them on the call that creates it",
            ));
        }
        Ok(())
    }

    fn into_session(&mut self) -> PlotSession {
        match self.parent.take() {
            Some(session) => session,
            None => {
                let style = self.style.take().unwrap_or_else(StyleConfig::inherited);
                let title = self.title.take().unwrap_or_default();
                let mut session = PlotSession::new(title, style);
                let x = self
                    .x_axis
                    .take()
                    .unwrap_or_else(<axis::Properties as Default>::default);
                let y = self
                    .y_axis
                    .take()
                    .unwrap_or_else(<axis::Properties as Default>::default);
                session.add_plot_with(x, y);
                if self.draw_axes {
                    session.set_draw_axes(true);
                }
                session
            }
        }
    }

    fn axis_slot(&mut self, axis: Axis) -> &mut Option<axis::Properties> {
        match axis {
            Axis::X => &mut self.x_axis,
            Axis::Y => &mut self.y_axis,
        }
    }
}

#[derive(Debug)]
enum MarkerSizeSpec {
    PerSeries(Vec<f64>),
    Single(f64),
}

/// A line plot call under construction
#[derive(Debug)]
pub struct Line {
    common: Common,
    data: Option<(Input, Input)>,
    mark_with_line: bool,
    marker_sizes: Option<MarkerSizeSpec>,
    vlines: Vec<f64>,
}

impl Line {
    /// Keeps the connecting line under the markers set with
    /// [`MarkerSize`]/[`MarkerSizes`]
    pub fn mark_with_line(&mut self) -> &mut Line {
        self.mark_with_line = true;
        self
    }

    /// Draws vertical reference lines at the given x positions
    pub fn vlines(&mut self, xs: &[f64]) -> &mut Line {
        self.vlines = xs.to_vec();
        self
    }

    /// Draws reference lines through the coordinate origin
    pub fn draw_axes(&mut self) -> &mut Line {
        self.common.draw_axes = true;
        self
    }

    /// Finalizes without opening an interactive window
    pub fn no_display(&mut self) -> &mut Line {
        self.common.display = false;
        self
    }

    /// Uses `style` instead of the inherited process default
    pub fn style(&mut self, style: StyleConfig) -> &mut Line {
        self.common.style = Some(style);
        self
    }

    /// Adds this call's series to an existing session instead of creating a
    /// new figure
    pub fn extend(&mut self, session: PlotSession) -> &mut Line {
        self.common.parent = Some(session);
        self
    }

    /// Normalizes the inputs, renders every series into the session and
    /// reveals it; saves to the configured output path afterwards.
    ///
    /// The colour and dash rotations restart here: series added within one
    /// call cycle from the first dash pattern onwards.
    pub fn draw(&mut self) -> Result<PlotSession> {
        self.common.check_reuse()?;
        let (x, y) = self
            .data
            .take()
            .ok_or(Error::ConfigConflict("this call was already drawn"))?;
        let series = normalize_line(x, y)?;

        if let Some(ref legend) = self.common.legend {
            if legend.len() != series.len() {
                return Err(Error::LegendMismatch {
                    legends: legend.len(),
                    series: series.len(),
                });
            }
        }
        if let Some(MarkerSizeSpec::PerSeries(ref sizes)) = self.marker_sizes {
            if sizes.len() != series.len() {
                return Err(Error::ConfigConflict(
                    "per-series marker sizes must cover every series of the call",
                ));
            }
        }

        let legend = self.common.legend.take();
        let display = self.common.display;
        let output = self.common.output.take();
        let mut session = self.common.into_session();
        let target = session.first_subplot().ok_or(Error::EmptySession)?;

        session.reset_cycles();
        for (index, one) in series.into_iter().enumerate() {
            let entry = legend.as_ref().map(|l| l[index].clone());
            let marker = match self.marker_sizes {
                None => None,
                Some(MarkerSizeSpec::Single(size)) => Some(Marker {
                    size,
                    with_line: self.mark_with_line,
                }),
                Some(MarkerSizeSpec::PerSeries(ref sizes)) => Some(Marker {
                    size: sizes[index],
                    with_line: self.mark_with_line,
                }),
            };
            session.add_line(target, one, entry.as_deref(), marker)?;
        }

        session.reveal(display, &self.vlines)?;
        if let Some(ref path) = output {
            session.save(path)?;
        }
        Ok(session)
    }
}

impl Set<Title> for Line {
    /// Sets the figure title
    fn set(&mut self, title: Title) -> &mut Line {
        self.common.title = Some(title.0);
        self
    }
}

impl Set<Legend> for Line {
    /// Attaches one legend entry per series, paired positionally.
    ///
    /// The entry count must match the series count of the call exactly.
    fn set(&mut self, legend: Legend) -> &mut Line {
        self.common.legend = Some(legend.0);
        self
    }
}

impl Set<Output> for Line {
    /// Saves the figure to this path after revealing it
    fn set(&mut self, output: Output) -> &mut Line {
        self.common.output = Some(output.0.into_owned());
        self
    }
}

impl Set<MarkerSize> for Line {
    /// Draws a marker of this size on every data point
    fn set(&mut self, size: MarkerSize) -> &mut Line {
        self.marker_sizes = Some(MarkerSizeSpec::Single(size.0));
        self
    }
}

impl Set<MarkerSizes> for Line {
    /// Draws markers with one size per series, paired positionally
    fn set(&mut self, sizes: MarkerSizes) -> &mut Line {
        self.marker_sizes = Some(MarkerSizeSpec::PerSeries(sizes.0));
        self
    }
}

impl Configure<Axis> for Line {
    type Properties = axis::Properties;

    /// Configures the label and scale of an axis
    fn configure<F>(&mut self, axis: Axis, configure: F) -> &mut Line
    where
        F: FnOnce(&mut axis::Properties) -> &mut axis::Properties,
    {
        let slot = self.common.axis_slot(axis);
        if let Some(properties) = slot.as_mut() {
            configure(properties);
        } else {
            let mut properties = Default::default();
            configure(&mut properties);
            *slot = Some(properties);
        }
        self
    }
}

/// A scatter plot call under construction
pub struct Scatter {
    common: Common,
    data: Option<(Input, Input)>,
    marker_size: Option<f64>,
}

impl Scatter {
    /// Draws reference lines through the coordinate origin
    pub fn draw_axes(&mut self) -> &mut Scatter {
        self.common.draw_axes = true;
        self
    }

    /// Finalizes without opening an interactive window
    pub fn no_display(&mut self) -> &mut Scatter {
        self.common.display = false;
        self
    }

    /// Uses `style` instead of the inherited process default
    pub fn style(&mut self, style: StyleConfig) -> &mut Scatter {
        self.common.style = Some(style);
        self
    }

    /// Adds this call's series to an existing session instead of creating a
    /// new figure
    pub fn extend(&mut self, session: PlotSession) -> &mut Scatter {
        self.common.parent = Some(session);
        self
    }

    /// Normalizes the inputs, renders every series into the session and
    /// reveals it; saves to the configured output path afterwards.
    ///
    /// The colour rotation restarts here: the series of one call take
    /// successive cycle colours from the first onwards.
    pub fn draw(&mut self) -> Result<PlotSession> {
        self.common.check_reuse()?;
        let (x, y) = self
            .data
            .take()
            .ok_or(Error::ConfigConflict("this call was already drawn"))?;
        let series = normalize_scatter(x, y)?;

        if let Some(ref legend) = self.common.legend {
            if legend.len() != series.len() {
                return Err(Error::LegendMismatch {
                    legends: legend.len(),
                    series: series.len(),
                });
            }
        }

        let legend = self.common.legend.take();
        let display = self.common.display;
        let output = self.common.output.take();
        let mut session = self.common.into_session();
        let target = session.first_subplot().ok_or(Error::EmptySession)?;

        session.reset_cycles();
        for (index, one) in series.into_iter().enumerate() {
            let entry = legend.as_ref().map(|l| l[index].clone());
            session.add_scat(target, one, entry.as_deref(), self.marker_size)?;
        }

        session.reveal(display, &[])?;
        if let Some(ref path) = output {
            session.save(path)?;
        }
        Ok(session)
    }
}

impl Set<Title> for Scatter {
    /// Sets the figure title
    fn set(&mut self, title: Title) -> &mut Scatter {
        self.common.title = Some(title.0);
        self
    }
}

impl Set<Legend> for Scatter {
    /// Attaches one legend entry per series, paired positionally.
    ///
    /// The entry count must match the series count of the call exactly.
    fn set(&mut self, legend: Legend) -> &mut Scatter {
        self.common.legend = Some(legend.0);
        self
    }
}

impl Set<Output> for Scatter {
    /// Saves the figure to this path after revealing it
    fn set(&mut self, output: Output) -> &mut Scatter {
        self.common.output = Some(output.0.into_owned());
        self
    }
}

impl Set<MarkerSize> for Scatter {
    /// Changes the size of the scatter markers
    fn set(&mut self, size: MarkerSize) -> &mut Scatter {
        self.marker_size = Some(size.0);
        self
    }
}

impl Configure<Axis> for Scatter {
    type Properties = axis::Properties;

    /// Configures the label and scale of an axis
    fn configure<F>(&mut self, axis: Axis, configure: F) -> &mut Scatter
    where
        F: FnOnce(&mut axis::Properties) -> &mut axis::Properties,
    {
        let slot = self.common.axis_slot(axis);
        if let Some(properties) = slot.as_mut() {
            configure(properties);
        } else {
            let mut properties = Default::default();
            configure(&mut properties);
            *slot = Some(properties);
        }
        self
    }
}
