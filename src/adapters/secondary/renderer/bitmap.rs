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

//! PNG chart renderer built on the plotters bitmap backend
//!
//! Figures are rasterized at `inches * dpi` pixels. Font sizes and margins are
//! tuned for 100 DPI and scaled linearly, so a 300 DPI image looks like the
//! 100 DPI one at three times the size.

use crate::domain::{
    viridis, BarPanel, ChartError, Figure, HistogramPanel, Orientation, Panel, PiePanel, Rgb,
    ScatterPanel,
};
use crate::ports::ChartRenderer;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;

const FONT: &str = "sans-serif";
const BASE_DPI: f64 = 100.0;
const COLOR_BAR_STEPS: usize = 64;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::RenderingFailed(e.to_string())
}

/// Pixel position at `angle` radians around `center`, counter-clockwise
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

/// Renders [`Figure`]s into PNG files
pub struct PlottersChartRenderer {
    dpi: u32,
}

impl PlottersChartRenderer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Font size in pixels for a size tuned at 100 DPI
    fn font(&self, size: f64) -> f64 {
        (size * f64::from(self.dpi) / BASE_DPI).max(1.0)
    }

    /// Length in pixels for a length tuned at 100 DPI
    fn px(&self, size: f64) -> u32 {
        self.font(size).round() as u32
    }

    fn draw_bar(&self, area: &Area, panel: &BarPanel) -> Result<(), ChartError> {
        let n = panel.categories.len();
        let top = panel.counts.iter().copied().max().unwrap_or(0) as f64 * 1.1 + 1.0;
        let fill = color(panel.color);
        let categories = &panel.categories;
        let category_label = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(index) => categories.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        let mut builder = ChartBuilder::on(area);
        builder
            .caption(&panel.title, (FONT, self.font(14.0)))
            .margin(self.px(10.0))
            .x_label_area_size(self.px(45.0))
            .y_label_area_size(self.px(70.0));

        match panel.orientation {
            Orientation::Vertical => {
                let mut chart = builder
                    .build_cartesian_2d((0..n).into_segmented(), 0.0..top)
                    .map_err(draw_err)?;
                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .x_labels(n)
                    .x_label_formatter(&category_label)
                    .x_desc(panel.x_label.as_str())
                    .y_desc(panel.y_label.as_str())
                    .label_style((FONT, self.font(11.0)))
                    .draw()
                    .map_err(draw_err)?;
                chart
                    .draw_series(panel.counts.iter().enumerate().map(|(i, &count)| {
                        let mut bar = Rectangle::new(
                            [
                                (SegmentValue::Exact(i), 0.0),
                                (SegmentValue::Exact(i + 1), count as f64),
                            ],
                            fill.filled(),
                        );
                        bar.set_margin(0, 0, self.px(8.0), self.px(8.0));
                        bar
                    }))
                    .map_err(draw_err)?;
            }
            Orientation::Horizontal => {
                let mut chart = builder
                    .build_cartesian_2d(0.0..top, (0..n).into_segmented())
                    .map_err(draw_err)?;
                chart
                    .configure_mesh()
                    .disable_y_mesh()
                    .y_labels(n)
                    .y_label_formatter(&category_label)
                    .x_desc(panel.x_label.as_str())
                    .y_desc(panel.y_label.as_str())
                    .label_style((FONT, self.font(11.0)))
                    .draw()
                    .map_err(draw_err)?;
                chart
                    .draw_series(panel.counts.iter().enumerate().map(|(i, &count)| {
                        let mut bar = Rectangle::new(
                            [
                                (0.0, SegmentValue::Exact(i)),
                                (count as f64, SegmentValue::Exact(i + 1)),
                            ],
                            fill.filled(),
                        );
                        bar.set_margin(self.px(6.0), self.px(6.0), 0, 0);
                        bar
                    }))
                    .map_err(draw_err)?;
            }
        }
        Ok(())
    }

    fn draw_pie(&self, area: &Area, panel: &PiePanel) -> Result<(), ChartError> {
        let area = area
            .titled(&panel.title, (FONT, self.font(16.0)))
            .map_err(draw_err)?;
        let total: usize = panel.slices.iter().map(|(_, count)| count).sum();
        if total == 0 {
            return Ok(());
        }

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.38;
        let text = TextStyle::from((FONT, self.font(12.0))).pos(Pos::new(HPos::Center, VPos::Center));

        // matplotlib's startangle=90: first slice starts at twelve o'clock
        let mut start = 90.0_f64;
        for (index, (label, count)) in panel.slices.iter().enumerate() {
            let sweep = 360.0 * *count as f64 / total as f64;
            let steps = (sweep.ceil() as usize).max(2);
            let mut points = vec![center];
            for step in 0..=steps {
                let angle = start + sweep * step as f64 / steps as f64;
                points.push(polar(center, radius, angle.to_radians()));
            }

            let fill = panel
                .colors
                .get(index)
                .copied()
                .unwrap_or(Rgb::SET3[index % Rgb::SET3.len()]);
            area.draw(&Polygon::new(points, color(fill).filled()))
                .map_err(draw_err)?;

            let middle = (start + sweep / 2.0).to_radians();
            area.draw(&Text::new(
                label.clone(),
                polar(center, radius * 1.12, middle),
                text.clone(),
            ))
            .map_err(draw_err)?;
            area.draw(&Text::new(
                format!("{:.1}%", 100.0 * *count as f64 / total as f64),
                polar(center, radius * 0.6, middle),
                text.clone(),
            ))
            .map_err(draw_err)?;

            start += sweep;
        }
        Ok(())
    }

    fn draw_histogram(&self, area: &Area, panel: &HistogramPanel) -> Result<(), ChartError> {
        let low = panel.bins.first().map_or(0.0, |bin| bin.lower);
        let high = panel.bins.last().map_or(1.0, |bin| bin.upper);
        let top = panel.bins.iter().map(|bin| bin.count).max().unwrap_or(0) as f64 * 1.1 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, self.font(13.0)))
            .margin(self.px(10.0))
            .x_label_area_size(self.px(45.0))
            .y_label_area_size(self.px(55.0))
            .build_cartesian_2d(low..high, 0.0..top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .label_style((FONT, self.font(11.0)))
            .draw()
            .map_err(draw_err)?;

        let fill = color(panel.color).mix(0.7);
        chart
            .draw_series(panel.bins.iter().map(|bin| {
                Rectangle::new([(bin.lower, 0.0), (bin.upper, bin.count as f64)], fill.filled())
            }))
            .map_err(draw_err)?;
        chart
            .draw_series(panel.bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(draw_err)?;

        let mean_color = color(panel.mean_color);
        let line_width = self.px(2.0);
        chart
            .draw_series(LineSeries::new(
                vec![(panel.mean, 0.0), (panel.mean, top)],
                mean_color.stroke_width(line_width),
            ))
            .map_err(draw_err)?
            .label(panel.mean_label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], mean_color.stroke_width(line_width))
            });

        chart
            .configure_series_labels()
            .label_font((FONT, self.font(11.0)))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_scatter(&self, area: &Area, panel: &ScatterPanel) -> Result<(), ChartError> {
        let (width, _) = area.dim_in_pixel();
        let (plot_area, bar_area) = area.split_horizontally(width * 88 / 100);

        let low = panel
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold(f64::INFINITY, f64::min);
        let high = panel
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold(f64::NEG_INFINITY, f64::max);
        let (low, high) = if low < high {
            (low, high)
        } else if low.is_finite() {
            (low, low + 1.0)
        } else {
            (0.0, 1.0)
        };
        let span = high - low;
        let x_max = (panel.points.len() as f64).max(1.0);

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&panel.title, (FONT, self.font(16.0)))
            .margin(self.px(10.0))
            .x_label_area_size(self.px(45.0))
            .y_label_area_size(self.px(60.0))
            .build_cartesian_2d(-1.0..x_max, 0.0..high * 1.1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .label_style((FONT, self.font(11.0)))
            .draw()
            .map_err(draw_err)?;

        let radius = self.px(4.0);
        chart
            .draw_series(panel.points.iter().map(|&(x, y)| {
                let shade = color(viridis((y - low) / span)).mix(0.6);
                Circle::new((x, y), radius, shade.filled())
            }))
            .map_err(draw_err)?;

        let line_width = self.px(2.0);
        chart
            .draw_series(LineSeries::new(
                vec![(-1.0, panel.mean), (x_max, panel.mean)],
                RED.stroke_width(line_width),
            ))
            .map_err(draw_err)?
            .label(panel.mean_label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(line_width))
            });

        chart
            .configure_series_labels()
            .label_font((FONT, self.font(11.0)))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;

        let mut color_bar = ChartBuilder::on(&bar_area)
            .margin(self.px(10.0))
            .margin_top(self.px(40.0))
            .x_label_area_size(self.px(45.0))
            .y_label_area_size(self.px(60.0))
            .build_cartesian_2d(0.0..1.0, low..high)
            .map_err(draw_err)?;

        color_bar
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_desc(panel.color_bar_label.as_str())
            .label_style((FONT, self.font(11.0)))
            .draw()
            .map_err(draw_err)?;

        let step = span / COLOR_BAR_STEPS as f64;
        color_bar
            .draw_series((0..COLOR_BAR_STEPS).map(|i| {
                let shade = viridis((i as f64 + 0.5) / COLOR_BAR_STEPS as f64);
                Rectangle::new(
                    [
                        (0.0, low + step * i as f64),
                        (1.0, low + step * (i + 1) as f64),
                    ],
                    color(shade).filled(),
                )
            }))
            .map_err(draw_err)?;
        Ok(())
    }
}

impl ChartRenderer for PlottersChartRenderer {
    fn render(&self, figure: &Figure, path: &Path) -> Result<(), ChartError> {
        if figure.panels.len() != figure.rows * figure.cols {
            return Err(ChartError::RenderingFailed(format!(
                "{} expects {}x{} panels, got {}",
                figure.file_name,
                figure.rows,
                figure.cols,
                figure.panels.len()
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChartError::IoFailed(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let size = figure.pixel_size(self.dpi);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let cells = root.split_evenly((figure.rows, figure.cols));
        for (cell, panel) in cells.iter().zip(&figure.panels) {
            match panel {
                Panel::Bar(bar) => self.draw_bar(cell, bar)?,
                Panel::Pie(pie) => self.draw_pie(cell, pie)?,
                Panel::Histogram(histogram) => self.draw_histogram(cell, histogram)?,
                Panel::Scatter(scatter) => self.draw_scatter(cell, scatter)?,
            }
        }

        root.present().map_err(draw_err)?;
        debug!(
            "Wrote {}x{} image to {}",
            size.0,
            size.1,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetAnalyzer, DatasetGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_polar_positions() {
        assert_eq!(polar((100, 100), 10.0, 0.0), (110, 100));
        assert_eq!(polar((100, 100), 10.0, 90f64.to_radians()), (100, 90));
        assert_eq!(polar((100, 100), 10.0, 180f64.to_radians()), (90, 100));
    }

    #[test]
    fn test_font_scales_with_dpi() {
        assert_eq!(PlottersChartRenderer::new(100).px(10.0), 10);
        assert_eq!(PlottersChartRenderer::new(300).px(10.0), 30);
        assert_eq!(PlottersChartRenderer::new(300).dpi(), 300);
    }

    #[test]
    fn test_panel_count_mismatch_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let mut figure = Figure::single(
            "broken.png",
            2.0,
            2.0,
            Panel::Pie(PiePanel {
                title: "x".to_string(),
                slices: vec![],
                colors: vec![],
            }),
        );
        figure.cols = 2;

        let path = temp_dir.path().join("broken.png");
        let result = PlottersChartRenderer::new(50).render(&figure, &path);
        assert!(matches!(result, Err(ChartError::RenderingFailed(_))));
        assert!(!path.exists());
    }

    #[test]
    #[ignore = "needs a sans-serif system font"]
    fn test_render_all_charts() {
        let temp_dir = tempdir().unwrap();
        let records = DatasetGenerator::default()
            .generate(50, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let renderer = Arc::new(PlottersChartRenderer::new(40));
        let analyzer = DatasetAnalyzer::new(&records, renderer, temp_dir.path().join("charts"));

        let paths = analyzer.run_all().unwrap();
        assert_eq!(paths.len(), 6);
        for path in paths {
            let bytes = fs::read(&path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
    }
}
