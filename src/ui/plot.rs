use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartSpec, PieSpec, ScatterSpec};
use crate::color::{ColorMap, generate_palette};

// ---------------------------------------------------------------------------
// ChartSpec → egui_plot
// ---------------------------------------------------------------------------

/// Render one chart region: title, then the chart or a placeholder.
pub fn chart(ui: &mut Ui, id: &str, spec: Option<&ChartSpec>, colors: &ColorMap, height: f32) {
    let Some(spec) = spec else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No chart yet");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(spec.title());
    });

    match spec {
        ChartSpec::Pie(pie) => pie_chart(ui, id, pie, height),
        ChartSpec::Scatter(scatter) => scatter_chart(ui, id, scatter, colors, height),
    }
}

/// Points along the arc of one slice, closed at the centre.
fn wedge(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let segments = ((sweep / TAU) * 128.0).ceil().max(2.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=segments).map(|i| {
            // clockwise from twelve o'clock
            let a = start - sweep * i as f64 / segments as f64;
            [a.cos(), a.sin()]
        }))
        .collect()
}

fn pie_chart(ui: &mut Ui, id: &str, spec: &PieSpec, height: f32) {
    let total = spec.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection");
        });
        return;
    }

    let palette = generate_palette(spec.slices.len());

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for (slice, color) in spec.slices.iter().zip(palette) {
                if slice.value == 0 {
                    continue;
                }
                let fraction = slice.value as f64 / total as f64;
                let sweep = fraction * TAU;

                let polygon = Polygon::new(wedge(start, sweep).into_iter().collect::<PlotPoints>())
                    .name(&slice.label)
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                let mid = start - sweep / 2.0;
                let label = RichText::new(format!("{:.1}%", fraction * 100.0)).color(Color32::WHITE);
                plot_ui.text(Text::new(PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()), label));

                start -= sweep;
            }
        });
}

fn scatter_chart(ui: &mut Ui, id: &str, spec: &ScatterSpec, colors: &ColorMap, height: f32) {
    // One series per colour category so each gets a legend entry.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &spec.points {
        series.entry(p.color.as_str()).or_default().push([p.x, p.y]);
    }

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(spec.x)
        .y_axis_label(spec.y)
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, coords) in series {
                let points = Points::new(coords.into_iter().collect::<PlotPoints>())
                    .name(category)
                    .color(colors.color_for(category))
                    .shape(MarkerShape::Circle)
                    .radius(4.0);
                plot_ui.points(points);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_starts_at_centre_and_follows_unit_circle() {
        let pts = wedge(FRAC_PI_2, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        let first = pts[1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
        assert!(pts[1..].iter().all(|p| ((p[0].powi(2) + p[1].powi(2)).sqrt() - 1.0).abs() < 1e-9));
    }
}
