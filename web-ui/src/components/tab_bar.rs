// Tab bar for switching editor panels

use crate::coordinator::Panel;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TabBarProps {
    pub active: Panel,
    /// Number of registered resources, shown on the resources tab
    pub resource_count: usize,
    pub on_select: Callback<Panel>,
}

#[function_component(TabBar)]
pub fn tab_bar(props: &TabBarProps) -> Html {
    let render_tab = |panel: Panel| {
        let on_select = props.on_select.clone();
        let onclick = Callback::from(move |_| on_select.emit(panel));
        let label = match panel {
            Panel::Resources if props.resource_count > 0 => {
                format!("{} ({})", panel.label(), props.resource_count)
            }
            _ => panel.label().to_string(),
        };

        html! {
            <button
                class={classes!("tab", (props.active == panel).then_some("active"))}
                {onclick}
            >
                { label }
            </button>
        }
    };

    html! {
        <div class="tab-bar">
            { for Panel::ALL.into_iter().map(render_tab) }
        </div>
    }
}
