//! Hook binding a live record query to component state.

use futures::StreamExt;
use shared::{Record, RecordKind, Session};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::ApiClient;

#[derive(Clone, PartialEq)]
pub struct UseRecordsHandle {
    /// Latest snapshot of the user's records of this kind.
    pub records: Vec<Record>,
    /// True until the first snapshot arrives.
    pub loading: bool,
}

/// Subscribe to the session user's records of `kind` for the lifetime of the
/// component. Every store mutation that touches the query delivers a fresh
/// snapshot into `records`; unmounting cancels the subscription so the store
/// does not keep notifying a dead view.
#[hook]
pub fn use_records(api: &ApiClient, session: &Session, kind: RecordKind) -> UseRecordsHandle {
    let records = use_state(Vec::<Record>::new);
    let loading = use_state(|| true);

    {
        let api = api.clone();
        let session = session.clone();
        let records = records.clone();
        let loading = loading.clone();
        use_effect_with((session.user_id.clone(), kind), move |_| {
            let (mut snapshots, guard) = api.subscribe(&session, kind).split();
            spawn_local(async move {
                // Ends when the guard is dropped and the channel closes.
                while let Some(snapshot) = snapshots.next().await {
                    records.set(snapshot);
                    loading.set(false);
                }
            });
            move || drop(guard)
        });
    }

    UseRecordsHandle {
        records: (*records).clone(),
        loading: *loading,
    }
}
