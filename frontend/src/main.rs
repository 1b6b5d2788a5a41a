use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::EventRegistrationForm;

/// Page shell: a container with the registration form mounted inside
#[function_component(App)]
fn app() -> Html {
    html! {
        <div class="App">
            <EventRegistrationForm />
        </div>
    }
}

/// Route `tracing` events from the domain crate to the browser console
#[cfg(target_arch = "wasm32")]
fn init_tracing() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(level)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {}

fn main() {
    init_tracing();
    yew::Renderer::<App>::new().render();
}
