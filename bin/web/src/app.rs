//! Main Leptos application component.

use crate::pages::HomePage;
use crate::screen::Screen;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

/// The main application component.
///
/// Renders whichever screen the mounted router last reconciled into
/// `screen`.
#[component]
pub fn App(screen: ReadSignal<Screen>) -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="bingo"/>
        <main class="container">
            {move || render_screen(screen.get())}
        </main>
    }
}

fn render_screen(screen: Screen) -> AnyView {
    match screen {
        Screen::Home => view! { <HomePage/> }.into_any(),
        Screen::Text(text) => view! { <p class="message">{text}</p> }.into_any(),
        Screen::Empty => ().into_any(),
    }
}
