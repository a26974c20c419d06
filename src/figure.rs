//! The gnuplot collaborator: a figure, its subplots and its curves
//!
//! A [`Figure`] accumulates everything a gnuplot program needs and renders it
//! on demand: [`Figure::script`] produces the program (text header followed
//! by inline little-endian binary data blocks), [`Figure::draw`] pipes it to
//! an interactive `gnuplot -p` process and [`Figure::save`] renders it to a
//! file without opening any window.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use itertools::izip;
use log::debug;

use crate::axis;
use crate::data::Matrix;
use crate::error::{Error, Result};
use crate::key;
use crate::style::Margins;
use crate::traits::Set;
use crate::{curve, escape, Axis, Color, Display, FontSize, Script, Terminal, Title};

/// Identifies one subplot of a figure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubplotId(pub(crate) usize);

impl SubplotId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Opaque handle to a rendered series, usable for later style mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesHandle(pub(crate) usize);

/// A vertical reference line
#[derive(Clone, Copy, Debug)]
pub struct VLine {
    /// x position of the line
    pub x: f64,
    /// Line width, or the gnuplot default
    pub width: Option<f64>,
    /// Line colour, or the gnuplot default
    pub colour: Option<Color>,
}

#[derive(Debug)]
struct Subplot {
    x: axis::Properties,
    y: axis::Properties,
}

#[derive(Debug)]
struct Curve {
    subplot: SubplotId,
    xs: Vec<f64>,
    ys: Vec<f64>,
    props: curve::Properties,
}

/// Plot container
#[derive(Debug)]
pub struct Figure {
    cols: usize,
    curves: Vec<Curve>,
    font_size: Option<f64>,
    key: Option<key::Properties>,
    linetypes: Vec<Color>,
    margins: Margins,
    right_margin_override: Option<f64>,
    rows: usize,
    size: (usize, usize),
    spacing: (f64, f64),
    subplots: Vec<Subplot>,
    title: Option<Cow<'static, str>>,
    vlines: Vec<VLine>,
    zero_axes: bool,
}

impl Figure {
    /// Creates an empty figure with a 1×1 subplot grid
    pub fn new() -> Figure {
        Figure {
            cols: 1,
            curves: Vec::new(),
            font_size: None,
            key: None,
            linetypes: Vec::new(),
            margins: Margins::default(),
            right_margin_override: None,
            rows: 1,
            size: (640, 480),
            spacing: (0.2, 0.2),
            subplots: Vec::new(),
            title: None,
            vlines: Vec::new(),
            zero_axes: false,
        }
    }

    /// Changes the subplot grid of the figure
    pub fn set_grid(&mut self, rows: usize, cols: usize) -> &mut Figure {
        assert!(rows > 0 && cols > 0);

        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Changes the figure size, in pixels
    pub fn set_size(&mut self, width: usize, height: usize) -> &mut Figure {
        self.size = (width, height);
        self
    }

    /// Changes the figure margins, as fractions of the canvas
    pub fn set_margins(&mut self, margins: Margins) -> &mut Figure {
        self.margins = margins;
        self
    }

    /// Changes the spacing between subplots, as fractions of the canvas
    pub fn set_spacing(&mut self, horizontal: f64, vertical: f64) -> &mut Figure {
        self.spacing = (horizontal, vertical);
        self
    }

    /// Redefines the colour sequence used by successive curves
    pub fn set_linetype_cycle(&mut self, colors: &[Color]) -> &mut Figure {
        self.linetypes = colors.to_vec();
        self
    }

    /// Overrides the right margin, e.g. to make room for an outside key
    pub fn set_right_margin(&mut self, at: f64) -> &mut Figure {
        self.right_margin_override = Some(at);
        self
    }

    /// Adds the next subplot of the grid and returns its id
    pub fn add_subplot(&mut self, x: axis::Properties, y: axis::Properties) -> SubplotId {
        let id = SubplotId(self.subplots.len());
        self.subplots.push(Subplot { x, y });
        id
    }

    /// Number of subplots added so far
    pub fn subplot_count(&self) -> usize {
        self.subplots.len()
    }

    /// Number of curves added so far
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Plots a series against linear x and y axes
    pub fn plot(
        &mut self,
        id: SubplotId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        props: curve::Properties,
    ) -> Result<SeriesHandle> {
        self.add_curve(id, xs, ys, props, false, false)
    }

    /// Plots a series against a logarithmic x axis
    pub fn semilogx(
        &mut self,
        id: SubplotId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        props: curve::Properties,
    ) -> Result<SeriesHandle> {
        self.add_curve(id, xs, ys, props, true, false)
    }

    /// Plots a series against a logarithmic y axis
    pub fn semilogy(
        &mut self,
        id: SubplotId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        props: curve::Properties,
    ) -> Result<SeriesHandle> {
        self.add_curve(id, xs, ys, props, false, true)
    }

    /// Plots a series against logarithmic x and y axes
    pub fn loglog(
        &mut self,
        id: SubplotId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        props: curve::Properties,
    ) -> Result<SeriesHandle> {
        self.add_curve(id, xs, ys, props, true, true)
    }

    fn add_curve(
        &mut self,
        id: SubplotId,
        xs: Vec<f64>,
        ys: Vec<f64>,
        props: curve::Properties,
        log_x: bool,
        log_y: bool,
    ) -> Result<SeriesHandle> {
        use crate::Scale::{Linear, Logarithmic};

        let subplot = self
            .subplots
            .get_mut(id.index())
            .ok_or(Error::NoSuchSubplot(id.index()))?;
        subplot.x.set(if log_x { Logarithmic } else { Linear });
        subplot.y.set(if log_y { Logarithmic } else { Linear });

        let handle = SeriesHandle(self.curves.len());
        self.curves.push(Curve {
            subplot: id,
            xs,
            ys,
            props,
        });
        Ok(handle)
    }

    /// Replaces the x tick marks of a subplot with categorical labels at
    /// positions `0..n`
    pub fn set_tic_labels<S>(&mut self, id: SubplotId, labels: &[S], rotated: bool) -> Result<()>
    where
        S: AsRef<str>,
    {
        let subplot = self
            .subplots
            .get_mut(id.index())
            .ok_or(Error::NoSuchSubplot(id.index()))?;
        subplot.x.set_tic_labels(labels, rotated);
        Ok(())
    }

    /// Overrides the line width of an already plotted series
    pub fn set_line_width(&mut self, handle: SeriesHandle, width: f64) {
        if let Some(curve) = self.curves.get_mut(handle.0) {
            curve.props.set_line_width(width);
        }
    }

    /// Limits the x extent of the most recently added subplot
    pub fn set_xrange(&mut self, low: f64, high: f64) {
        if let Some(subplot) = self.subplots.last_mut() {
            subplot.x.set_range((low, high));
        }
    }

    /// Limits the y extent of the most recently added subplot
    pub fn set_yrange(&mut self, low: f64, high: f64) {
        if let Some(subplot) = self.subplots.last_mut() {
            subplot.y.set_range((low, high));
        }
    }

    /// Configures the key of the figure, replacing any previous key
    pub fn set_key(&mut self, key: key::Properties) -> &mut Figure {
        self.key = Some(key);
        self
    }

    /// Replaces the vertical reference lines of the figure
    pub fn set_vlines(&mut self, vlines: Vec<VLine>) -> &mut Figure {
        self.vlines = vlines;
        self
    }

    /// Draws reference lines through the coordinate origin
    pub fn zero_axes(&mut self, on: bool) -> &mut Figure {
        self.zero_axes = on;
        self
    }

    /// The raw values of a plotted series
    pub fn series_data(&self, handle: SeriesHandle) -> Option<(&[f64], &[f64])> {
        self.curves
            .get(handle.0)
            .map(|c| (c.xs.as_slice(), c.ys.as_slice()))
    }

    /// The legend label of a plotted series, if one was recorded
    pub fn series_label(&self, handle: SeriesHandle) -> Option<&str> {
        self.curves.get(handle.0).and_then(|c| c.props.label())
    }

    fn render(&self, output: Option<&Path>) -> Vec<u8> {
        let mut s = String::new();

        if let Some(path) = output {
            let terminal = Terminal::from_extension(path);
            s.push_str(&format!("set terminal {}", terminal.display()));
            s.push_str(&format!(" size {}, {}", self.size.0, self.size.1));
            if let Some(size) = self.font_size {
                s.push_str(&format!(" font ',{}'", size));
            }
            s.push('\n');
            s.push_str(&format!(
                "set output '{}'\n",
                escape(&path.display().to_string())
            ));
        }

        for (i, color) in self.linetypes.iter().enumerate() {
            s.push_str(&format!(
                "set linetype {} lc rgb '{}'\n",
                i + 1,
                color.display()
            ));
        }
        if !self.linetypes.is_empty() {
            s.push_str(&format!("set linetype cycle {}\n", self.linetypes.len()));
        }

        let right = self.right_margin_override.unwrap_or(self.margins.right);
        let multiplot = self.rows * self.cols > 1;
        if multiplot {
            s.push_str(&format!(
                "set multiplot layout {},{} margins {},{},{},{} spacing {},{}",
                self.rows,
                self.cols,
                self.margins.left,
                right,
                self.margins.bottom,
                self.margins.top,
                self.spacing.0,
                self.spacing.1
            ));
            if let Some(ref title) = self.title {
                s.push_str(&format!(" title '{}'", escape(title)));
            }
            s.push('\n');
        } else {
            s.push_str(&format!("set lmargin at screen {}\n", self.margins.left));
            s.push_str(&format!("set rmargin at screen {}\n", right));
            s.push_str(&format!("set bmargin at screen {}\n", self.margins.bottom));
            s.push_str(&format!("set tmargin at screen {}\n", self.margins.top));
            if let Some(ref title) = self.title {
                s.push_str(&format!("set title '{}'\n", escape(title)));
            }
        }

        let mut buffer = s.into_bytes();
        let last_index = self.subplots.len().wrapping_sub(1);
        for (index, subplot) in self.subplots.iter().enumerate() {
            let mut panel = String::new();
            panel.push_str(&(Axis::X, &subplot.x).script());
            panel.push_str(&(Axis::Y, &subplot.y).script());

            if index == last_index {
                if self.zero_axes {
                    panel.push_str("set xzeroaxis lt -1\nset yzeroaxis lt -1\n");
                }
                if let Some(ref key) = self.key {
                    panel.push_str(&key.script());
                }
                for vline in &self.vlines {
                    panel.push_str(&format!(
                        "set arrow from {}, graph 0 to {}, graph 1 nohead",
                        vline.x, vline.x
                    ));
                    if let Some(width) = vline.width {
                        panel.push_str(&format!(" lw {}", width));
                    }
                    if let Some(colour) = vline.colour {
                        panel.push_str(&format!(" lc rgb '{}'", colour.display()));
                    }
                    panel.push('\n');
                }
            }

            let plotted = self
                .curves
                .iter()
                .filter(|c| c.subplot.index() == index)
                .map(|c| (c, Matrix::new(izip!(c.xs.iter(), c.ys.iter()))))
                .filter(|(_, m)| !m.bytes().is_empty())
                .collect::<Vec<_>>();

            if plotted.is_empty() {
                if multiplot {
                    panel.push_str("set multiplot next\n");
                }
                buffer.extend_from_slice(panel.as_bytes());
                continue;
            }

            let mut is_first_plot = true;
            for (curve, matrix) in &plotted {
                if is_first_plot {
                    panel.push_str("plot ");
                    is_first_plot = false;
                } else {
                    panel.push_str(", ");
                }
                panel.push_str(&format!(
                    "'-' binary endian=little record={} format='%float64' using ",
                    matrix.nrows()
                ));
                let mut is_first_col = true;
                for col in 0..matrix.ncols() {
                    if is_first_col {
                        is_first_col = false;
                    } else {
                        panel.push(':');
                    }
                    panel.push_str(&(col + 1).to_string());
                }
                panel.push(' ');
                panel.push_str(&curve.props.script());
            }
            panel.push('\n');

            buffer.extend_from_slice(panel.as_bytes());
            for (_, matrix) in &plotted {
                buffer.extend_from_slice(matrix.bytes());
            }
        }

        if multiplot {
            buffer.extend_from_slice(b"unset multiplot\n");
        }

        buffer
    }

    /// The gnuplot program for this figure, without any output directive
    pub fn script(&self) -> Vec<u8> {
        self.render(None)
    }

    /// Dumps the script required to produce the figure into `sink`
    pub fn dump<W>(&self, sink: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        sink.write_all(&self.script())
    }

    /// Spawns a drawing child process with a persistent window
    ///
    /// NOTE: stderr, stdin, and stdout are piped
    pub fn draw(&self) -> io::Result<Child> {
        debug!("spawning gnuplot for display");
        let mut gnuplot = Command::new("gnuplot")
            .arg("-p")
            .stderr(Stdio::piped())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        gnuplot
            .stdin
            .as_mut()
            .expect("stdin was piped")
            .write_all(&self.script())?;
        Ok(gnuplot)
    }

    /// Renders the figure to `path`, without opening any window
    ///
    /// The output terminal is picked from the file extension. A failed render
    /// leaves no file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("rendering figure to {:?}", path);
        let mut gnuplot = Command::new("gnuplot")
            .stderr(Stdio::piped())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        gnuplot
            .stdin
            .as_mut()
            .expect("stdin was piped")
            .write_all(&self.render(Some(path)))?;
        let output = gnuplot.wait_with_output()?;
        if !output.status.success() {
            let _ = fs::remove_file(path);
            return Err(Error::Gnuplot(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        Ok(())
    }
}

impl std::default::Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Set<Title> for Figure {
    /// Sets the figure title
    fn set(&mut self, title: Title) -> &mut Figure {
        self.title = Some(title.0);
        self
    }
}

impl Set<FontSize> for Figure {
    /// Changes the size of the font used for labels and titles
    ///
    /// # Panics
    ///
    /// Panics if `size` is a non-positive value
    fn set(&mut self, size: FontSize) -> &mut Figure {
        let size = size.0;

        assert!(size >= 0.);

        self.font_size = Some(size);
        self
    }
}
