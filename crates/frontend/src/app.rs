use crate::domain::customers::ui::list::CustomerList;
use crate::shared::list_state::use_location_search;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // One popstate listener for every list on the page
    let _ = use_location_search();

    view! {
        <main class="app">
            <CustomerList />
        </main>
    }
}
