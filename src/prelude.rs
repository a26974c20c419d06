//! A collection of the most used traits, structs and enums

pub use crate::normalize::{Input, Series, Values};
pub use crate::proxy::{Label, Legend, Output, Title};
pub use crate::session::{AxisConfig, Marker, PlotSession};
pub use crate::style::{colour_cycle, Margins, StyleConfig};
pub use crate::traits::{Configure, Set};
pub use crate::{
    Axis, Color, DashStyle, Figure, FontSize, LineWidth, MarkerSize, MarkerSizes, PointType, Scale,
    Terminal,
};
