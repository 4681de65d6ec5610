pub mod state;

use crate::domain::customers::api::customers_fetch;
use crate::shared::list_state::{
    use_pagination, use_pagination_reset, use_persisted_filter_sort, use_probed_list,
    EmptyState, ListEngineConfig,
};
use contracts::domain::customer::aggregate::{Customer, CustomerStatus};
use contracts::shared::list_query::toggle_sort;
use leptos::prelude::*;
use state::{
    filter_options, name_filter, name_query, parse_status, selected_status, status_filter,
    NAME_FILTER_ID, PERSISTENCE_KEY, STATUS_FILTER_ID,
};

#[derive(Clone, Debug)]
pub struct CustomerRow {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub status: CustomerStatus,
    pub created_at: String,
}

impl From<Customer> for CustomerRow {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            external_id: c.external_id,
            name: c.name,
            email: c.email.unwrap_or_else(|| "-".to_string()),
            status: c.status,
            created_at: format_timestamp(c.created_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn CustomerList() -> impl IntoView {
    let config = ListEngineConfig::embedded();
    let state = use_persisted_filter_sort(
        PERSISTENCE_KEY,
        filter_options(&config),
        Some(config.clone()),
    );
    let pagination = use_pagination(None, Some(config.clone()));
    use_pagination_reset(state, pagination);

    let params = Signal::derive(move || pagination.params(state));
    let list = use_probed_list(PERSISTENCE_KEY, params, customers_fetch(), Some(config));

    let on_status_change = move |ev: leptos::ev::Event| match parse_status(&event_target_value(&ev)) {
        Some(status) => state.upsert_filter(status_filter(status)),
        None => state.remove_filter(STATUS_FILTER_ID),
    };

    let on_name_input = move |ev: leptos::ev::Event| {
        let query = event_target_value(&ev);
        if query.is_empty() {
            state.remove_filter(NAME_FILTER_ID);
        } else {
            state.upsert_filter(name_filter(&query));
        }
    };

    let sort_header = move |field: &'static str, label: &'static str| {
        let indicator = move || {
            state.sorts.with(|sorts| {
                sorts
                    .iter()
                    .find(|s| s.field == field)
                    .map(|s| s.direction.indicator())
                    .unwrap_or("")
            })
        };
        view! {
            <th
                class="table__header-cell table__header-cell--sortable"
                on:click=move |_| state.set_sorts(toggle_sort(&state.sorts.get_untracked(), field, label))
            >
                {label}
                <span class="table__sort-indicator">{indicator}</span>
            </th>
        }
    };

    let total_pages = move || pagination.total_pages(list.total()).max(1);

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Customers"}</h1>
                    {move || {
                        let count = state.active_filter_count();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{format!("{} filters", count)}</span>
                        })
                    }}
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| list.refetch()>
                        {"Refresh"}
                    </button>
                </div>
            </div>

            <div class="filter-panel">
                <select
                    class="form__select"
                    on:change=on_status_change
                    prop:value=move || {
                        state.filters.with(|f| selected_status(f).map(|s| s.as_str()).unwrap_or(""))
                    }
                >
                    <option value="">{"All statuses"}</option>
                    {CustomerStatus::all()
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    class="form__input"
                    placeholder="Search by name"
                    prop:value=move || state.filters.with(|f| name_query(f))
                    on:input=on_name_input
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            state.flush();
                        }
                    }
                />
                <button class="button button--secondary" on:click=move |_| state.clear()>
                    {"Reset"}
                </button>
            </div>

            {move || match list.empty_state() {
                EmptyState::Loading => view! {
                    <div class="list-state list-state--loading">{"Loading..."}</div>
                }.into_any(),
                EmptyState::Error => view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{list.error().unwrap_or_default()}</span>
                    </div>
                }.into_any(),
                EmptyState::FilteredEmpty => view! {
                    <div class="list-state list-state--filtered">
                        <p>{"No customers match the current filters."}</p>
                        <button class="button button--secondary" on:click=move |_| state.clear()>
                            {"Clear filters"}
                        </button>
                    </div>
                }.into_any(),
                EmptyState::AbsoluteEmpty => view! {
                    <div class="list-state list-state--empty">
                        <p>{"No customers yet. Create your first customer to get started."}</p>
                    </div>
                }.into_any(),
                EmptyState::HasItems => {
                    let rows: Vec<CustomerRow> = list.items().into_iter().map(Into::into).collect();
                    view! {
                        <div class="table">
                            <table class="table__data table--striped">
                                <thead class="table__head">
                                    <tr>
                                        <th class="table__header-cell">{"External ID"}</th>
                                        {sort_header("name", "Name")}
                                        <th class="table__header-cell">{"Email"}</th>
                                        <th class="table__header-cell">{"Status"}</th>
                                        {sort_header("created_at", "Created")}
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows.into_iter().map(|row| view! {
                                        <tr class="table__row" data-id=row.id>
                                            <td class="table__cell">{row.external_id}</td>
                                            <td class="table__cell">{row.name}</td>
                                            <td class="table__cell">{row.email}</td>
                                            <td class="table__cell">{row.status.label()}</td>
                                            <td class="table__cell">{row.created_at}</td>
                                        </tr>
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }.into_any()
                }
            }}

            <div class="pagination-controls">
                <button
                    class="button button--secondary"
                    disabled=move || pagination.page.get() <= 1
                    on:click=move |_| pagination.set_page(pagination.page.get_untracked().saturating_sub(1))
                >
                    {"Previous"}
                </button>
                <span class="pagination-controls__info">
                    {move || format!("Page {} of {} ({} total)", pagination.page.get(), total_pages(), list.total())}
                </span>
                <button
                    class="button button--secondary"
                    disabled=move || pagination.page.get() >= total_pages()
                    on:click=move |_| pagination.set_page(pagination.page.get_untracked() + 1)
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
