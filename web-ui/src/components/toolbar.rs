// Toolbar with preview and project actions

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub on_refresh: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_download: Callback<()>,
    /// Widgets are not ready yet
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let button = |class: &'static str, label: &'static str, title: &'static str, callback: &Callback<()>| {
        let callback = callback.clone();
        let onclick = Callback::from(move |_| callback.emit(()));
        html! {
            <button class={classes!("toolbar-btn", class)} {title} {onclick} disabled={props.disabled}>
                { label }
            </button>
        }
    };

    html! {
        <div class="toolbar">
            { button("refresh-btn", "更新", "プレビューを更新", &props.on_refresh) }
            { button("download-btn", "ダウンロード", "ZIPでダウンロード (Ctrl+S)", &props.on_download) }
            { button("reset-btn", "リセット", "初期状態に戻す", &props.on_reset) }
        </div>
    }
}
