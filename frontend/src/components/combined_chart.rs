use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::CombinedSeries;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Debug, Properties, PartialEq)]
pub struct CombinedChartProps {
    pub series: CombinedSeries,
    pub loading: bool,
}

/// Income and expense plotted as two lines over the shared date axis.
///
/// The x axis is the label list of the series; each point is placed at its
/// label's index so days missing from one ledger simply have no marker for
/// that line.
pub struct CombinedChart {
    canvas_ref: NodeRef,
}

impl Component for CombinedChart {
    type Message = ();
    type Properties = CombinedChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().series != old_props.series {
            self.draw_chart(&ctx.props().series);
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().series.labels.is_empty() {
            self.draw_chart(&ctx.props().series);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let series = &ctx.props().series;
        let loading = ctx.props().loading;

        html! {
            <div class="chart-card">
                <h3 class="chart-title">{"Income vs Expenses"}</h3>
                {if series.labels.is_empty() && loading {
                    html! { <p class="chart-loading">{"Loading chart data..."}</p> }
                } else if series.labels.is_empty() {
                    html! {
                        <p class="chart-empty">
                            {"No data available - Start adding income and expenses"}
                        </p>
                    }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="combined-chart-canvas"
                            width="760"
                            height="320"
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl CombinedChart {
    fn draw_chart(&self, series: &CombinedSeries) {
        if series.labels.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(760);
        canvas.set_height(320);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let labels = &series.labels;
        let index_of = |date: &str| labels.iter().position(|l| l == date);
        let income_points: Vec<(f64, f64)> = series
            .income
            .iter()
            .filter_map(|p| index_of(&p.date).map(|i| (i as f64, p.amount)))
            .collect();
        let expense_points: Vec<(f64, f64)> = series
            .expense
            .iter()
            .filter_map(|p| index_of(&p.date).map(|i| (i as f64, p.amount)))
            .collect();

        let y_max = income_points
            .iter()
            .chain(expense_points.iter())
            .map(|&(_, amount)| amount)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;
        let x_max = (labels.len() as f64 - 1.0).max(1.0);

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5_f64..x_max + 0.5, 0.0_f64..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let label_formatter = |v: &f64| {
            let index = v.round();
            if (index - v).abs() > 0.01 || index < 0.0 {
                return String::new();
            }
            labels
                .get(index as usize)
                .cloned()
                .unwrap_or_default()
        };
        if chart
            .configure_mesh()
            .y_desc("Amount (Rs.)")
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_label_formatter(&label_formatter)
            .x_labels(labels.len().min(8))
            .label_style(("sans-serif", 12))
            .axis_style(&RGBColor(230, 230, 230))
            .draw()
            .is_err()
        {
            return;
        }

        let income_color = RGBColor(46, 160, 67);
        let expense_color = RGBColor(218, 54, 51);

        if chart
            .draw_series(LineSeries::new(
                income_points.iter().copied(),
                income_color.stroke_width(3),
            ))
            .is_err()
        {
            return;
        }
        if chart
            .draw_series(
                income_points
                    .iter()
                    .map(|&(x, y)| TriangleMarker::new((x, y), 6, income_color.filled())),
            )
            .is_err()
        {
            return;
        }

        if chart
            .draw_series(LineSeries::new(
                expense_points.iter().copied(),
                expense_color.stroke_width(3),
            ))
            .is_err()
        {
            return;
        }
        if chart
            .draw_series(
                expense_points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, expense_color.filled())),
            )
            .is_err()
        {
            return;
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SeriesPoint;

    #[test]
    fn test_draw_with_empty_series_does_not_panic() {
        let chart = CombinedChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&CombinedSeries {
            labels: vec![],
            income: vec![],
            expense: vec![],
        });
    }

    #[test]
    fn test_props_compare_by_series() {
        let series = CombinedSeries {
            labels: vec!["2025-01-10".to_string()],
            income: vec![SeriesPoint {
                date: "2025-01-10".to_string(),
                amount: 25.0,
            }],
            expense: vec![],
        };
        let a = CombinedChartProps {
            series: series.clone(),
            loading: false,
        };
        let b = CombinedChartProps {
            series,
            loading: false,
        };
        assert_eq!(a, b);
    }
}
