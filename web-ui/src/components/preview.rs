// Preview component rendering the composed document in a sandboxed frame

use playground_core::DeviceProfile;
use std::rc::Rc;
use yew::prelude::*;

/// Sandbox flags for the preview frame
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-modals allow-forms allow-popups";

/// Latest delivered document
///
/// Each delivery bumps `revision`, which keys the frame so the previous
/// document's scripts and state are discarded with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    pub revision: u64,
    pub document: AttrValue,
    pub loading: bool,
}

pub enum PreviewAction {
    Deliver(String),
    Loaded,
}

impl Reducible for PreviewState {
    type Action = PreviewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PreviewAction::Deliver(document) => Rc::new(PreviewState {
                revision: self.revision + 1,
                document: AttrValue::from(document),
                loading: true,
            }),
            PreviewAction::Loaded => Rc::new(PreviewState {
                loading: false,
                ..(*self).clone()
            }),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PreviewProps {
    pub state: PreviewState,
    pub device: DeviceProfile,
    pub on_load: Callback<()>,
}

#[function_component(Preview)]
pub fn preview(props: &PreviewProps) -> Html {
    let state = &props.state;
    let style = props
        .device
        .frame_size()
        .map(|(width, height)| format!("width: {}px; height: {}px;", width, height));
    let onload = {
        let on_load = props.on_load.clone();
        Callback::from(move |_: Event| on_load.emit(()))
    };

    html! {
        <div class="preview-display">
            if state.revision == 0 {
                <div class="placeholder">{ "ここにプレビューが表示されます" }</div>
            } else {
                <div class={classes!("preview-frame", props.device.css_class())} {style}>
                    <iframe
                        key={state.revision}
                        title="preview"
                        sandbox={PREVIEW_SANDBOX}
                        srcdoc={state.document.clone()}
                        {onload}
                    />
                </div>
            }
            if state.loading {
                <div class="loading">{ "読み込み中..." }</div>
            }
        </div>
    }
}
