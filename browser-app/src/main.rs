// Code Playground Browser Application

use playground_core::PlaygroundConfig;
use playground_web_ui::App;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

mod logging;

#[function_component(Main)]
fn main_component() -> Html {
    html! {
        <App />
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    let config = PlaygroundConfig::from_env();
    logging::init(&config.log_filter);
    tracing::info!(debounce_ms = config.debounce_ms, "starting code playground");

    yew::Renderer::<Main>::new().render();
}

fn main() {
    run_app();
}
