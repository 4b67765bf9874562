use pennyflow_backend::domain::aggregate;
use shared::{NetStatus, RecordKind, Session};
use yew::prelude::*;

use crate::components::{BreakdownChart, CombinedChart};
use crate::hooks::use_records;
use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api: ApiClient,
    pub session: Session,
}

/// Overview of both ledgers: totals, net position and the charts. Everything
/// here is recomputed from the latest snapshots of the two subscriptions.
#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let income = use_records(&props.api, &props.session, RecordKind::Income);
    let expense = use_records(&props.api, &props.session, RecordKind::Expense);

    let greeting_name = props.api.display_name(&props.session);
    let position = aggregate::net_position(&income.records, &expense.records);
    let series = aggregate::combined_series(&income.records, &expense.records);
    let income_breakdown = aggregate::category_breakdown(&income.records);
    let expense_breakdown = aggregate::category_breakdown(&expense.records);

    let net_class = match position.status {
        NetStatus::Gain => "net-card gain",
        NetStatus::Loss => "net-card loss",
    };
    let loading = income.loading || expense.loading;

    html! {
        <div class="dashboard-page">
            <h2>{format!("Welcome back, {}", greeting_name)}</h2>
            <div class="summary-cards">
                <div class="summary-card income">
                    <span class="summary-label">{"Total Income"}</span>
                    <span class="summary-value">
                        {format!("Rs. {:.2}", position.total_income)}
                    </span>
                </div>
                <div class="summary-card expense">
                    <span class="summary-label">{"Total Expenses"}</span>
                    <span class="summary-value">
                        {format!("Rs. {:.2}", position.total_expense)}
                    </span>
                </div>
                <div class={net_class}>
                    <span class="summary-label">{position.status.label()}</span>
                    <span class="summary-value">{format!("Rs. {:.2}", position.net)}</span>
                </div>
            </div>
            <CombinedChart series={series} loading={loading} />
            <div class="breakdown-row">
                <BreakdownChart
                    kind={RecordKind::Income}
                    totals={income_breakdown}
                    loading={income.loading}
                />
                <BreakdownChart
                    kind={RecordKind::Expense}
                    totals={expense_breakdown}
                    loading={expense.loading}
                />
            </div>
        </div>
    }
}
