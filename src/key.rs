//! Key (or legend)

use crate::traits::Set;
use crate::{Default, FontSize, Script};

/// Properties of the key
#[derive(Clone, Debug)]
pub struct Properties {
    font_size: Option<f64>,
    outside: bool,
    spacing: Option<f64>,
}

impl Default for Properties {
    fn default() -> Properties {
        Properties {
            font_size: None,
            outside: false,
            spacing: None,
        }
    }
}

impl Properties {
    /// Places the key outside the plot area, against its top-right corner.
    ///
    /// **Note** The key is drawn inside the plot area by default
    pub fn outside(&mut self) -> &mut Properties {
        self.outside = true;
        self
    }

    /// Changes the vertical spacing between entries
    pub fn spacing(&mut self, spacing: f64) -> &mut Properties {
        self.spacing = Some(spacing);
        self
    }
}

impl Set<FontSize> for Properties {
    /// Changes the font size of the entries
    fn set(&mut self, size: FontSize) -> &mut Properties {
        self.font_size = Some(size.0);
        self
    }
}

impl Script for Properties {
    fn script(&self) -> String {
        let mut script = String::from("set key on ");

        if self.outside {
            script.push_str("outside top right ");
        } else {
            script.push_str("inside top right ");
        }

        if let Some(spacing) = self.spacing {
            script.push_str(&format!("spacing {} ", spacing));
        }

        if let Some(size) = self.font_size {
            script.push_str(&format!("font ',{}' ", size));
        }

        script.push('\n');
        script
    }
}
