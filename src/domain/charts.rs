/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Backend-independent chart descriptions
//!
//! The analysis service aggregates records into a [`Figure`]; a
//! [`crate::ports::ChartRenderer`] turns it into an image.

/// Plain RGB color so the domain stays free of plotting types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const STEELBLUE: Rgb = Rgb(70, 130, 180);
    pub const CORAL: Rgb = Rgb(255, 127, 80);
    pub const LIGHTGREEN: Rgb = Rgb(144, 238, 144);
    pub const SKYBLUE: Rgb = Rgb(135, 206, 235);
    pub const PLUM: Rgb = Rgb(221, 160, 221);
    pub const TOMATO: Rgb = Rgb(255, 99, 71);
    pub const DODGERBLUE: Rgb = Rgb(30, 144, 255);
    pub const TEAL: Rgb = Rgb(0, 128, 128);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    /// Pastel qualitative palette used for pie slices
    pub const SET3: [Rgb; 8] = [
        Rgb(141, 211, 199),
        Rgb(255, 255, 179),
        Rgb(190, 186, 218),
        Rgb(251, 128, 114),
        Rgb(128, 177, 211),
        Rgb(253, 180, 98),
        Rgb(179, 222, 105),
        Rgb(252, 205, 229),
    ];
}

/// Sample the viridis color ramp at `t` in `[0, 1]`
pub fn viridis(t: f64) -> Rgb {
    const STOPS: [(f64, f64, f64); 5] = [
        (68.0, 1.0, 84.0),
        (59.0, 82.0, 139.0),
        (33.0, 145.0, 140.0),
        (94.0, 201.0, 98.0),
        (253.0, 231.0, 37.0),
    ];

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (STOPS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - index as f64;
    let (r0, g0, b0) = STOPS[index];
    let (r1, g1, b1) = STOPS[index + 1];
    let lerp = |a: f64, b: f64| (a + (b - a) * frac).round() as u8;
    Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Counts per category
#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Category labels, in drawing order
    pub categories: Vec<String>,
    /// One count per category
    pub counts: Vec<usize>,
    pub orientation: Orientation,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePanel {
    pub title: String,
    /// (label, count), largest first
    pub slices: Vec<(String, usize)>,
    pub colors: Vec<Rgb>,
}

/// One histogram bin over `[lower, upper)`; the last bin is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<HistogramBin>,
    pub color: Rgb,
    /// Vertical annotation line
    pub mean: f64,
    pub mean_color: Rgb,
    pub mean_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// (index, value)
    pub points: Vec<(f64, f64)>,
    /// Horizontal annotation line
    pub mean: f64,
    pub mean_label: String,
    pub color_bar_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Bar(BarPanel),
    Pie(PiePanel),
    Histogram(HistogramPanel),
    Scatter(ScatterPanel),
}

/// One image: a grid of panels plus its physical size
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Fixed output file name
    pub file_name: &'static str,
    /// Width in inches
    pub width_in: f64,
    /// Height in inches
    pub height_in: f64,
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Single-panel figure
    pub fn single(file_name: &'static str, width_in: f64, height_in: f64, panel: Panel) -> Self {
        Self {
            file_name,
            width_in,
            height_in,
            rows: 1,
            cols: 1,
            panels: vec![panel],
        }
    }

    /// Pixel dimensions at the given resolution
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }
}
