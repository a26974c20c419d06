use std::borrow::Cow;

use crate::curve::Style;
use crate::{Axis, Color, DashStyle, Display, PointType, Terminal};

impl Display<&'static str> for Axis {
    fn display(&self) -> &'static str {
        match *self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl Display<Cow<'static, str>> for Color {
    fn display(&self) -> Cow<'static, str> {
        match *self {
            Color::Black => Cow::from("black"),
            Color::Blue => Cow::from("blue"),
            Color::Cyan => Cow::from("cyan"),
            Color::DarkViolet => Cow::from("dark-violet"),
            Color::ForestGreen => Cow::from("forest-green"),
            Color::Gold => Cow::from("gold"),
            Color::Gray => Cow::from("gray"),
            Color::Green => Cow::from("green"),
            Color::Magenta => Cow::from("magenta"),
            Color::Red => Cow::from("red"),
            Color::Rgb(r, g, b) => Cow::from(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            // gnuplot's alpha channel is inverted: 0x00 is opaque.
            Color::Rgba(r, g, b, a) => {
                Cow::from(format!("#{:02x}{:02x}{:02x}{:02x}", 255 - a, r, g, b))
            }
            Color::White => Cow::from("white"),
            Color::Yellow => Cow::from("yellow"),
        }
    }
}

impl Display<String> for DashStyle {
    fn display(&self) -> String {
        let segments = self
            .0
            .iter()
            .map(|s| format!("{}", s))
            .collect::<Vec<_>>()
            .join(",");
        format!("({})", segments)
    }
}

impl Display<&'static str> for PointType {
    fn display(&self) -> &'static str {
        match *self {
            PointType::Circle => "6",
            PointType::FilledCircle => "7",
            PointType::FilledSquare => "5",
            PointType::FilledTriangle => "9",
            PointType::Plus => "1",
            PointType::Square => "4",
            PointType::Star => "3",
            PointType::Triangle => "8",
            PointType::X => "2",
        }
    }
}

impl Display<&'static str> for Style {
    fn display(&self) -> &'static str {
        match *self {
            Style::Lines => "lines",
            Style::LinesPoints => "linespoints",
            Style::Points => "points",
        }
    }
}

impl Display<&'static str> for Terminal {
    fn display(&self) -> &'static str {
        match *self {
            Terminal::Png => "pngcairo",
            Terminal::Svg => "svg dynamic",
        }
    }
}
