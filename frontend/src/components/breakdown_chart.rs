use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::{CategoryTotal, RecordKind};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BreakdownChartProps {
    pub kind: RecordKind,
    pub totals: Vec<CategoryTotal>,
    pub loading: bool,
}

/// Per-category totals of one kind as a bar chart.
pub struct BreakdownChart {
    canvas_ref: NodeRef,
}

impl Component for BreakdownChart {
    type Message = ();
    type Properties = BreakdownChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().totals != old_props.totals {
            self.draw_chart(ctx.props());
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().totals.is_empty() {
            self.draw_chart(ctx.props());
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let totals = &ctx.props().totals;
        let loading = ctx.props().loading;
        let title = format!("{} by Category", ctx.props().kind.label());

        html! {
            <div class="chart-card">
                <h3 class="chart-title">{title}</h3>
                {if totals.is_empty() && loading {
                    html! { <p class="chart-loading">{"Loading chart data..."}</p> }
                } else if totals.is_empty() {
                    html! { <p class="chart-empty">{"No data available"}</p> }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="breakdown-chart-canvas"
                            width="360"
                            height="280"
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl BreakdownChart {
    fn draw_chart(&self, props: &BreakdownChartProps) {
        let totals = &props.totals;
        if totals.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(360);
        canvas.set_height(280);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let y_max = totals
            .iter()
            .map(|t| t.total)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;
        let x_max = totals.len() as f64;

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(-0.5_f64..x_max - 0.5, 0.0_f64..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let label_formatter = |v: &f64| {
            let index = v.round();
            if (index - v).abs() > 0.01 || index < 0.0 {
                return String::new();
            }
            totals
                .get(index as usize)
                .map(|t| t.category.clone())
                .unwrap_or_default()
        };
        if chart
            .configure_mesh()
            .disable_x_mesh()
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_label_formatter(&label_formatter)
            .x_labels(totals.len())
            .label_style(("sans-serif", 11))
            .axis_style(&RGBColor(230, 230, 230))
            .draw()
            .is_err()
        {
            return;
        }

        let color = match props.kind {
            RecordKind::Income => RGBColor(46, 160, 67),
            RecordKind::Expense => RGBColor(218, 54, 51),
        };
        if chart
            .draw_series(totals.iter().enumerate().map(|(i, t)| {
                let x = i as f64;
                Rectangle::new([(x - 0.3, 0.0), (x + 0.3, t.total)], color.filled())
            }))
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

    #[test]
    fn test_draw_with_no_totals_does_not_panic() {
        let chart = BreakdownChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&BreakdownChartProps {
            kind: RecordKind::Expense,
            totals: vec![],
            loading: false,
        });
    }
}
