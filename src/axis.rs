//! Coordinate axis of a subplot

use std::borrow::Cow;

use crate::traits::Set;
use crate::{escape, Axis, Default, Display, Label, Scale, Script};

/// Properties of a coordinate axis
#[derive(Clone, Debug)]
pub struct Properties {
    label: Option<Cow<'static, str>>,
    logarithmic: bool,
    range: Option<(f64, f64)>,
    tics: Option<String>,
    tics_rotated: bool,
}

impl Default for Properties {
    fn default() -> Properties {
        Properties {
            label: None,
            logarithmic: false,
            range: None,
            tics: None,
            tics_rotated: false,
        }
    }
}

impl Properties {
    pub(crate) fn is_logarithmic(&self) -> bool {
        self.logarithmic
    }

    pub(crate) fn set_range(&mut self, range: (f64, f64)) {
        self.range = Some(range);
    }

    /// Replaces the tick marks with categorical labels at positions `0..n`.
    /// Replacement is idempotent: installing the same labels twice leaves a
    /// single tick list.
    pub(crate) fn set_tic_labels<S>(&mut self, labels: &[S], rotated: bool)
    where
        S: AsRef<str>,
    {
        let pairs = labels
            .iter()
            .enumerate()
            .map(|(position, label)| format!("'{}' {}", escape(label.as_ref()), position))
            .collect::<Vec<_>>();

        self.tics = if pairs.is_empty() {
            None
        } else {
            Some(pairs.join(", "))
        };
        self.tics_rotated = rotated;
    }
}

impl Set<Label> for Properties {
    /// Attaches a label to the axis
    fn set(&mut self, label: Label) -> &mut Properties {
        self.label = Some(label.0);
        self
    }
}

impl Set<Scale> for Properties {
    /// Sets the scale of the axis
    ///
    /// **Note** All axes use a linear scale by default
    fn set(&mut self, scale: Scale) -> &mut Properties {
        match scale {
            Scale::Linear => self.logarithmic = false,
            Scale::Logarithmic => self.logarithmic = true,
        }

        self
    }
}

impl Script for (Axis, &Properties) {
    fn script(&self) -> String {
        let &(axis, properties) = self;
        let axis_ = axis.display();

        let mut script = format!("set {}tics nomirror ", axis_);

        if let Some(ref tics) = properties.tics {
            script.push_str(&format!("({})", tics));
        }
        if properties.tics_rotated {
            script.push_str(" rotate by 90 right");
        }
        script.push('\n');

        if let Some(ref label) = properties.label {
            script.push_str(&format!("set {}label '{}'\n", axis_, escape(label)));
        }

        if let Some((low, high)) = properties.range {
            script.push_str(&format!("set {}range [{}:{}]\n", axis_, low, high));
        }

        // Scale state persists between multiplot panels, so the linear case
        // is unset explicitly.
        if properties.logarithmic {
            script.push_str(&format!("set logscale {}\n", axis_));
        } else {
            script.push_str(&format!("unset logscale {}\n", axis_));
        }

        script
    }
}
