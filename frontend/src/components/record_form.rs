use pennyflow_backend::domain::RecordFormState;
use shared::{categories_for, subcategories_for, RecordKind};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordFormProps {
    pub kind: RecordKind,
    pub state: RecordFormState,
    pub on_amount_change: Callback<String>,
    pub on_category_change: Callback<String>,
    pub on_sub_category_change: Callback<String>,
    pub on_note_change: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_cancel_edit: Callback<()>,
}

/// Entry form for one record kind. The subcategory select stays disabled
/// until a category is chosen and only ever offers that category's list.
#[function_component(RecordForm)]
pub fn record_form(props: &RecordFormProps) -> Html {
    let kind = props.kind;
    let state = &props.state;

    let on_amount = {
        let on_amount_change = props.on_amount_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_amount_change.emit(input.value());
        })
    };
    let on_category = {
        let on_category_change = props.on_category_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_category_change.emit(select.value());
        })
    };
    let on_sub_category = {
        let on_sub_category_change = props.on_sub_category_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_sub_category_change.emit(select.value());
        })
    };
    let on_note = {
        let on_note_change = props.on_note_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_note_change.emit(input.value());
        })
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_cancel = {
        let on_cancel_edit = props.on_cancel_edit.clone();
        Callback::from(move |_| on_cancel_edit.emit(()))
    };

    let subcategories = subcategories_for(kind, &state.category).unwrap_or(&[]);
    let submit_label = if state.is_editing() {
        format!("Update {}", kind.label())
    } else {
        format!("Add {}", kind.label())
    };

    html! {
        <form class="record-form" onsubmit={on_submit}>
            <div class="form-row">
                <label>{"Amount"}</label>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    placeholder="0.00"
                    value={state.amount_input.clone()}
                    oninput={on_amount}
                />
            </div>
            <div class="form-row">
                <label>{"Category"}</label>
                <select onchange={on_category}>
                    <option value="" selected={state.category.is_empty()}>
                        {"Select category"}
                    </option>
                    {for categories_for(kind).into_iter().map(|category| html! {
                        <option value={category} selected={state.category == category}>
                            {category}
                        </option>
                    })}
                </select>
            </div>
            <div class="form-row">
                <label>{"Subcategory"}</label>
                <select onchange={on_sub_category} disabled={state.category.is_empty()}>
                    <option value="" selected={state.sub_category.is_empty()}>
                        {"Select subcategory"}
                    </option>
                    {for subcategories.iter().map(|sub| html! {
                        <option value={*sub} selected={state.sub_category == *sub}>
                            {*sub}
                        </option>
                    })}
                </select>
            </div>
            <div class="form-row">
                <label>{"Note"}</label>
                <input
                    type="text"
                    placeholder="Optional note"
                    value={state.note.clone()}
                    oninput={on_note}
                />
            </div>
            {if let Some(message) = &state.error_message {
                html! { <p class="form-error">{message}</p> }
            } else {
                html! {}
            }}
            <div class="form-actions">
                <button type="submit" disabled={state.is_submitting}>
                    {submit_label}
                </button>
                {if state.is_editing() {
                    html! {
                        <button type="button" class="form-cancel" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </div>
        </form>
    }
}
