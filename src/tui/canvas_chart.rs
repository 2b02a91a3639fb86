//! Plotters-powered canvas widget for Ratatui.
//!
//! The widget draws a prepared [`Scene`] whose coordinates are virtual screen
//! units (`CELL_WIDTH` × `CELL_HEIGHT` per terminal cell, y down). Plotters
//! output reaches the Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::app::scene::{Rect as SceneRect, Scene};
use crate::domain::{Axis, ScreenPos};

/// Virtual screen units per terminal column.
pub const CELL_WIDTH: f64 = 8.0;
/// Virtual screen units per terminal row.
pub const CELL_HEIGHT: f64 = 16.0;

/// Sides of the polygon standing in for a round marker.
const MARKER_SIDES: usize = 12;

pub struct CanvasChart<'a> {
    pub scene: &'a Scene,
}

impl<'a> Widget for CanvasChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            buf.set_string(area.x, area.y, "…", Style::default().fg(Color::Yellow));
            return;
        }

        let scene = self.scene;
        let w = scene.viewport.x();
        let h = scene.viewport.y();
        if !(w > 0.0 && h > 0.0) {
            return;
        }

        // Plotters' y grows upward; scene y grows downward.
        let at = move |p: ScreenPos| (p.x(), h - p.y());

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(0)
                .build_cartesian_2d(0.0..w, 0.0..h)?;

            let grid_color = RGBColor(70, 70, 70);
            let axis_color = RGBColor(150, 150, 150);
            let label_color = RGBColor(190, 190, 190);
            let curve_color = RGBColor(255, 60, 60);
            let point_color = RGBColor(255, 120, 120);
            let dragged_color = RGBColor(255, 220, 0);

            // Grid lines span the viewport.
            chart.draw_series(scene.grid.iter().map(|line| {
                let ends = match line.axis {
                    Axis::X => [(line.offset, 0.0), (line.offset, h)],
                    Axis::Y => [(0.0, h - line.offset), (w, h - line.offset)],
                };
                PathElement::new(ends.to_vec(), grid_color)
            }))?;

            for band in &scene.axes {
                chart.draw_series(std::iter::once(outline(band, h, axis_color)))?;
            }

            chart.draw_series(
                scene
                    .grid
                    .iter()
                    .map(|line| outline(&line.tick, h, axis_color)),
            )?;

            let label_style = ("sans-serif", CELL_HEIGHT).into_font().color(&label_color);
            chart.draw_series(scene.grid.iter().map(|line| {
                let width = line.label.chars().count() as f64 * CELL_WIDTH;
                let anchor = match line.axis {
                    Axis::X => ScreenPos::new(line.label_anchor.x() - width / 2.0, line.label_anchor.y()),
                    Axis::Y => ScreenPos::new(line.label_anchor.x() - width, line.label_anchor.y()),
                };
                Text::new(line.label.clone(), at(anchor), label_style.clone())
            }))?;

            chart.draw_series(LineSeries::new(
                scene
                    .curve
                    .iter()
                    .filter(|p| p.is_finite())
                    .map(|&p| at(p)),
                &curve_color,
            ))?;

            // `Circle` radii are mis-scaled by the backend, so markers are
            // polygons in data coordinates plus a centre pixel.
            for marker in &scene.markers {
                let color = if marker.dragged { dragged_color } else { point_color };
                let radius = marker.radius.max(CELL_WIDTH / 2.0);
                let ring: Vec<(f64, f64)> = (0..=MARKER_SIDES)
                    .map(|i| {
                        let t = i as f64 / MARKER_SIDES as f64 * std::f64::consts::TAU;
                        at(ScreenPos::new(
                            marker.center.x() + radius * t.cos(),
                            marker.center.y() + radius * t.sin(),
                        ))
                    })
                    .collect();
                chart.draw_series(std::iter::once(PathElement::new(ring, color)))?;
                chart.draw_series(std::iter::once(Pixel::new(at(marker.center), color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn outline(rect: &SceneRect, h: f64, color: RGBColor) -> PathElement<(f64, f64)> {
    PathElement::new(outline_points(rect, h), color)
}

/// Closed outline of a scene rectangle in chart coordinates.
fn outline_points(rect: &SceneRect, h: f64) -> Vec<(f64, f64)> {
    let x0 = rect.origin.x();
    let x1 = x0 + rect.size.x();
    let y0 = h - rect.origin.y();
    let y1 = y0 - rect.size.y();
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]
}

/// Terminal cell to virtual screen position (cell centre), relative to `area`.
pub fn cell_to_screen(area: Rect, column: u16, row: u16) -> Option<ScreenPos> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    inside.then(|| {
        ScreenPos::new(
            (column - area.x) as f64 * CELL_WIDTH + CELL_WIDTH / 2.0,
            (row - area.y) as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0,
        )
    })
}
