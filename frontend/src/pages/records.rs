use gloo::dialogs::alert;
use pennyflow_backend::domain::{aggregate, record_form, RecordFormState};
use shared::{Record, RecordKind, Session};
use yew::prelude::*;

use crate::components::{BreakdownChart, RecordForm, RecordTable};
use crate::hooks::use_records;
use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct RecordsPageProps {
    pub api: ApiClient,
    pub session: Session,
    pub kind: RecordKind,
}

/// Management page for one record kind: entry form, live table and the
/// category breakdown. The same component serves the income and expense
/// views, parameterized by `kind`.
#[function_component(RecordsPage)]
pub fn records_page(props: &RecordsPageProps) -> Html {
    let kind = props.kind;
    let handle = use_records(&props.api, &props.session, kind);
    let form = use_state(RecordFormState::new);

    let on_amount_change = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut state = (*form).clone();
            state.amount_input = value;
            form.set(state);
        })
    };
    let on_category_change = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut state = (*form).clone();
            state.select_category(value);
            form.set(state);
        })
    };
    let on_sub_category_change = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut state = (*form).clone();
            state.sub_category = value;
            form.set(state);
        })
    };
    let on_note_change = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut state = (*form).clone();
            state.note = value;
            form.set(state);
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let session = props.session.clone();
        let form = form.clone();

        Callback::from(move |_| {
            let mut state = (*form).clone();
            let validation = record_form::validate(kind, &state);
            let Some(amount) = validation.cleaned_amount.filter(|_| validation.is_valid)
            else {
                let message = validation
                    .first_message()
                    .unwrap_or_else(|| "Please fill all fields".to_string());
                state.error_message = Some(message.clone());
                form.set(state);
                alert(&message);
                return;
            };

            let result = match record_form::update_command(kind, &state, amount) {
                Some(command) => api.update_record(&session, command),
                None => {
                    let request = record_form::submit_request(kind, &state, amount);
                    api.create_record(&session, request)
                }
            };
            match result {
                // The subscription delivers the new snapshot; only the form
                // needs resetting here.
                Ok(_) => {
                    state.reset();
                    form.set(state);
                }
                Err(message) => {
                    gloo::console::error!("record submit failed:", message.clone());
                    state.error_message = Some(message.clone());
                    form.set(state);
                    alert(&message);
                }
            }
        })
    };

    let on_cancel_edit = {
        let form = form.clone();
        Callback::from(move |_| {
            let mut state = (*form).clone();
            state.reset();
            form.set(state);
        })
    };

    let on_edit = {
        let form = form.clone();
        Callback::from(move |record: Record| {
            form.set(RecordFormState::begin_edit(&record));
        })
    };

    let on_delete = {
        let api = props.api.clone();
        let session = props.session.clone();
        let form = form.clone();

        Callback::from(move |record_id: String| {
            match api.delete_record(&session, kind, &record_id) {
                Ok(_) => {
                    // Editing the record that was just deleted makes no sense.
                    if (*form).is_editing() {
                        let mut state = (*form).clone();
                        state.reset();
                        form.set(state);
                    }
                }
                Err(message) => {
                    gloo::console::error!("record delete failed:", message.clone());
                    alert(&format!("Delete failed: {}", message));
                }
            }
        })
    };

    let breakdown = aggregate::category_breakdown(&handle.records);
    let total = aggregate::total(&handle.records);

    html! {
        <div class="records-page">
            <div class="records-header">
                <h2>{format!("{} Records", kind.label())}</h2>
                <span class="records-total">{format!("Total: Rs. {:.2}", total)}</span>
            </div>
            <div class="records-layout">
                <div class="records-form-column">
                    <RecordForm
                        kind={kind}
                        state={(*form).clone()}
                        on_amount_change={on_amount_change}
                        on_category_change={on_category_change}
                        on_sub_category_change={on_sub_category_change}
                        on_note_change={on_note_change}
                        on_submit={on_submit}
                        on_cancel_edit={on_cancel_edit}
                    />
                    <BreakdownChart kind={kind} totals={breakdown} loading={handle.loading} />
                </div>
                <div class="records-table-column">
                    <RecordTable
                        kind={kind}
                        records={handle.records.clone()}
                        loading={handle.loading}
                        on_edit={on_edit}
                        on_delete={on_delete}
                    />
                </div>
            </div>
        </div>
    }
}
