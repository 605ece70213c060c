// Editor pane hosting one Monaco widget

use playground_core::FragmentId;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditorPaneProps {
    pub fragment: FragmentId,
    /// Container the widget is mounted into
    pub node_ref: NodeRef,
    pub visible: bool,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(EditorPane)]
pub fn editor_pane(props: &EditorPaneProps) -> Html {
    // The container stays in the DOM while hidden so the widget survives
    html! {
        <div
            class={classes!("editor-pane", (!props.visible).then_some("hidden"))}
            data-fragment={props.fragment.storage_key()}
        >
            if props.loading {
                <div class="loading">{ "エディタを読み込み中..." }</div>
            }
            <div class="editor-host" ref={props.node_ref.clone()} />
        </div>
    }
}
