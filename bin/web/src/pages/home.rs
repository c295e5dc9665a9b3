//! Home page component.

use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"Bingo"</h1>
            <p>"Create a game or join one with an invite link."</p>
        </div>
    }
}
