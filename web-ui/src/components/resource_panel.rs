// External resource list and add form

use playground_core::{truncate_url, ExternalResource};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResourcePanelProps {
    pub resources: Vec<ExternalResource>,
    pub input: String,
    pub truncate_len: usize,
    /// Classification in progress; the add button is disabled meanwhile
    pub busy: bool,
    pub error: Option<String>,
    pub visible: bool,
    pub on_input: Callback<String>,
    pub on_add: Callback<String>,
    pub on_remove: Callback<String>,
}

#[function_component(ResourcePanel)]
pub fn resource_panel(props: &ResourcePanelProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let onsubmit = {
        let on_add = props.on_add.clone();
        let input = props.input.clone();
        let busy = props.busy;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !busy {
                on_add.emit(input.clone());
            }
        })
    };

    let render_resource = |resource: &ExternalResource| {
        let on_remove = props.on_remove.clone();
        let url = resource.url.clone();
        let onclick = Callback::from(move |_| on_remove.emit(url.clone()));

        html! {
            <li class="resource-item" key={resource.url.clone()}>
                <span class={classes!("resource-kind", if resource.is_style() { "style" } else { "script" })}>
                    { resource.kind.label() }
                </span>
                <span class="resource-url" title={resource.url.clone()}>
                    { truncate_url(&resource.url, props.truncate_len) }
                </span>
                <button class="resource-remove" title="削除" {onclick}>{ "×" }</button>
            </li>
        }
    };

    html! {
        <div class={classes!("resource-panel", (!props.visible).then_some("hidden"))}>
            <form class="resource-form" {onsubmit}>
                <input
                    type="text"
                    class="resource-input"
                    placeholder="https://cdn.jsdelivr.net/npm/... (.css / .js)"
                    value={props.input.clone()}
                    {oninput}
                />
                <button type="submit" class="resource-add" disabled={props.busy}>
                    { if props.busy { "判定中..." } else { "追加" } }
                </button>
            </form>
            if let Some(error) = &props.error {
                <div class="resource-error">{ error.clone() }</div>
            }
            if props.resources.is_empty() {
                <div class="placeholder">{ "外部リソースはまだありません" }</div>
            } else {
                <ul class="resource-list">
                    { for props.resources.iter().map(render_resource) }
                </ul>
            }
        </div>
    }
}
