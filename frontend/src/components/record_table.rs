use shared::{Record, RecordKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {
    pub kind: RecordKind,
    pub records: Vec<Record>,
    pub loading: bool,
    pub on_edit: Callback<Record>,
    pub on_delete: Callback<String>,
}

fn format_day(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Table of one kind's records with edit and delete actions per row.
#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    if props.loading {
        return html! { <p class="table-loading">{"Loading..."}</p> };
    }
    if props.records.is_empty() {
        return html! {
            <p class="table-empty">
                {format!("No {} records yet", props.kind.label().to_lowercase())}
            </p>
        };
    }

    html! {
        <table class="record-table">
            <thead>
                <tr>
                    <th>{"Date"}</th>
                    <th>{"Category"}</th>
                    <th>{"Subcategory"}</th>
                    <th>{"Note"}</th>
                    <th>{"Amount"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>
                {for props.records.iter().map(|record| {
                    let on_edit = {
                        let on_edit = props.on_edit.clone();
                        let record = record.clone();
                        Callback::from(move |_| on_edit.emit(record.clone()))
                    };
                    let on_delete = {
                        let on_delete = props.on_delete.clone();
                        let id = record.id.clone();
                        Callback::from(move |_| on_delete.emit(id.clone()))
                    };
                    html! {
                        <tr key={record.id.clone()}>
                            <td>{format_day(&record.date)}</td>
                            <td>{&record.category}</td>
                            <td>{&record.sub_category}</td>
                            <td>{if record.note.is_empty() { "-" } else { record.note.as_str() }}</td>
                            <td class="amount">{format!("Rs. {:.2}", record.amount)}</td>
                            <td class="actions">
                                <button class="edit-button" onclick={on_edit}>
                                    <i class="fas fa-pen"></i>
                                </button>
                                <button class="delete-button" onclick={on_delete}>
                                    <i class="fas fa-trash"></i>
                                </button>
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}
