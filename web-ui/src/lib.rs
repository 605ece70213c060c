// Web UI library for the code playground
//
// This crate provides the Yew components, the editor coordinator and the
// Monaco bindings for the playground frontend.

use gloo_timers::callback::Timeout;
use playground_core::{
    classify, DeviceProfile, ErrorCode, FragmentId, PlaygroundConfig, ProcessResult, ZipArchiver,
    ARCHIVE_FILE_NAME,
};
use playground_probe_client::HttpContentTypeProbe;
use playground_storageservice::{CodeStateStore, LocalStorageBackend, RegistryError, ResourceRegistry};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub mod components;
pub mod coordinator;
pub mod download;
pub mod errors;
pub mod messages;
pub mod monaco;

// Re-export components
pub use components::*;
pub use coordinator::{
    CoordinatorState, EditorCoordinator, EditorSet, EditorWidget, Panel, RenderSurface,
    WidgetFactory, WidgetOptions,
};

use errors::UiError;
use messages::{get_message_class, to_notice, MessageLevel};
use monaco::{MonacoFactory, MonacoWidget};

/// Delivers composed documents to a Yew callback
pub struct CallbackSurface(pub Callback<String>);

impl RenderSurface for CallbackSurface {
    fn deliver(&self, document: String) {
        self.0.emit(document);
    }
}

type PlaygroundCoordinator = EditorCoordinator<MonacoWidget, CallbackSurface, LocalStorageBackend>;
type SharedCoordinator = Rc<RefCell<PlaygroundCoordinator>>;
/// Pending debounce timer; replacing it drops the previous one
type TimerSlot = Rc<RefCell<Option<Timeout>>>;
type Notice = (String, MessageLevel);

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Run `f` on the next animation frame
fn on_next_frame(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        tracing::warn!(error = ?e, "requestAnimationFrame failed");
    }
}

fn request_relayout(coordinator: &SharedCoordinator) {
    let coordinator = coordinator.clone();
    on_next_frame(move || coordinator.borrow_mut().on_animation_frame());
}

fn schedule_update(coordinator: &SharedCoordinator, timer: &TimerSlot, notify: &Callback<Notice>) {
    // Edits made by the coordinator itself (reset) arrive while it is borrowed
    let Ok(mut guard) = coordinator.try_borrow_mut() else {
        return;
    };
    let Some(ticket) = guard.note_change(now_ms()) else {
        return;
    };
    let window_ms = guard.debounce_window_ms();
    drop(guard);

    let coordinator = coordinator.clone();
    let notify = notify.clone();
    let timeout = Timeout::new(window_ms as u32, move || {
        // Timer granularity can fire slightly before the due time
        let now = now_ms().max(ticket.due_at_ms());
        if let Err(e) = coordinator.borrow_mut().flush_change(ticket, now) {
            tracing::warn!(error = %e, "failed to persist edits");
            notify.emit(to_notice(&e.to_process_result()));
        }
    });
    *timer.borrow_mut() = Some(timeout);
}

async fn mount_editors(
    coordinator: &SharedCoordinator,
    containers: [NodeRef; 3],
    timer: &TimerSlot,
    notify: &Callback<Notice>,
) -> Result<(), UiError> {
    monaco::wait_for_monaco().await?;

    let cast = |node: &NodeRef| {
        node.cast::<web_sys::HtmlElement>()
            .ok_or_else(|| UiError::RenderError("エディタの表示領域がありません".to_string()))
    };
    let [html, css, js] = containers;
    let (html, css, js) = (cast(&html)?, cast(&css)?, cast(&js)?);

    let widgets = coordinator
        .borrow()
        .create_widgets(&MonacoFactory, [&html, &css, &js])?;
    for (_, widget) in widgets.iter() {
        let coordinator = coordinator.clone();
        let timer = timer.clone();
        let notify = notify.clone();
        widget.on_change(Box::new(move || schedule_update(&coordinator, &timer, &notify)));
    }

    coordinator.borrow_mut().attach(widgets);
    request_relayout(coordinator);
    Ok(())
}

/// Main application component（状態管理とイベントハンドリング）
#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| PlaygroundConfig::from_env());
    let preview = use_reducer(PreviewState::default);

    let coordinator: SharedCoordinator = {
        let dispatcher = preview.dispatcher();
        let config = (*config).clone();
        use_mut_ref(move || {
            let surface = CallbackSurface(Callback::from(move |document: String| {
                dispatcher.dispatch(PreviewAction::Deliver(document))
            }));
            EditorCoordinator::new(
                CodeStateStore::load(LocalStorageBackend::new()),
                ResourceRegistry::load(LocalStorageBackend::new()),
                surface,
                config,
            )
        })
    };

    let html_ref = use_node_ref();
    let css_ref = use_node_ref();
    let js_ref = use_node_ref();
    let timer: TimerSlot = use_mut_ref(|| None);

    let ready = use_state(|| false);
    let active = use_state(Panel::default);
    let device = use_state(DeviceProfile::default);
    let resources = {
        let coordinator = coordinator.clone();
        use_state(move || coordinator.borrow().resources().to_vec())
    };
    let resource_input = use_state(String::new);
    let resource_error = use_state(|| None::<String>);
    let adding = use_state(|| false);
    let message = use_state(|| "".to_string());
    let message_level = use_state(|| MessageLevel::Info);

    let notify = {
        let message = message.clone();
        let message_level = message_level.clone();
        Callback::from(move |(text, level): Notice| {
            message.set(text);
            message_level.set(level);
        })
    };

    // エディタの初期化（マウント時に一度だけ）
    {
        let coordinator = coordinator.clone();
        let containers = [html_ref.clone(), css_ref.clone(), js_ref.clone()];
        let timer = timer.clone();
        let notify = notify.clone();
        let resources = resources.clone();
        let ready = ready.clone();

        use_effect_with((), move |_| {
            coordinator
                .borrow_mut()
                .on_resources_change(move |list| resources.set(list.to_vec()));

            if coordinator.borrow_mut().begin_loading() {
                spawn_local(async move {
                    match mount_editors(&coordinator, containers, &timer, &notify).await {
                        Ok(()) => ready.set(true),
                        Err(e) => {
                            tracing::error!(error = %e, "editor initialisation failed");
                            notify.emit((e.to_string(), MessageLevel::Error));
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_select = {
        let active = active.clone();
        let coordinator = coordinator.clone();
        Callback::from(move |panel: Panel| {
            active.set(panel);
            if coordinator.borrow_mut().switch_active(panel) {
                request_relayout(&coordinator);
            }
        })
    };

    let on_device = {
        let device = device.clone();
        let coordinator = coordinator.clone();
        Callback::from(move |profile: DeviceProfile| {
            device.set(profile);
            let coordinator = coordinator.clone();
            on_next_frame(move || coordinator.borrow().resize_all());
        })
    };

    let on_refresh = {
        let coordinator = coordinator.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            let mut coordinator = coordinator.borrow_mut();
            if let Err(e) = coordinator.flush_pending() {
                notify.emit(to_notice(&e.to_process_result()));
                return;
            }
            if coordinator.refresh() {
                notify.emit(to_notice(&ProcessResult::info(ErrorCode::PreviewRefreshed)));
            }
        })
    };

    let on_reset = {
        let coordinator = coordinator.clone();
        let notify = notify.clone();
        let resource_input = resource_input.clone();
        let resource_error = resource_error.clone();
        Callback::from(move |_: ()| {
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message("コードと外部リソースを初期状態に戻します。よろしいですか？")
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let result = coordinator.borrow_mut().reset();
            match result {
                Ok(()) => {
                    resource_input.set(String::new());
                    resource_error.set(None);
                    notify.emit(to_notice(&ProcessResult::info(ErrorCode::ResetOk)));
                }
                Err(e) => notify.emit(to_notice(&e.to_process_result())),
            }
        })
    };

    let on_download = {
        let coordinator = coordinator.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            let coordinator = coordinator.clone();
            let notify = notify.clone();

            spawn_local(async move {
                let archive = coordinator.borrow_mut().export(&ZipArchiver);
                match archive {
                    Ok(bytes) => {
                        match download::download_bytes(&bytes, ARCHIVE_FILE_NAME, "application/zip") {
                            Ok(()) => notify.emit(to_notice(&ProcessResult::info(ErrorCode::ExportOk))),
                            Err(e) => {
                                tracing::error!(error = %e, "download failed");
                                notify.emit((e.to_string(), MessageLevel::Error));
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "export failed");
                        notify.emit(to_notice(&ProcessResult::error(ErrorCode::ExportError)));
                    }
                }
            });
        })
    };

    // Ctrl/Cmd+S とウィンドウリサイズ
    {
        let coordinator = coordinator.clone();
        let on_download = on_download.clone();

        use_effect_with((), move |_| {
            let keydown = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if (e.ctrl_key() || e.meta_key()) && e.key().eq_ignore_ascii_case("s") {
                    e.prevent_default();
                    on_download.emit(());
                }
            });
            let resize = Closure::<dyn Fn()>::new(move || {
                if let Ok(coordinator) = coordinator.try_borrow() {
                    coordinator.resize_all();
                }
            });

            let window = web_sys::window();
            if let Some(window) = &window {
                let added = window
                    .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                    .and_then(|_| {
                        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
                    });
                if let Err(e) = added {
                    tracing::warn!(error = ?e, "failed to register window listeners");
                }
            }

            move || {
                if let Some(window) = window {
                    let _ = window
                        .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                    let _ = window
                        .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
                }
            }
        });
    }

    let on_resource_input = {
        let resource_input = resource_input.clone();
        Callback::from(move |value: String| resource_input.set(value))
    };

    let on_add_resource = {
        let coordinator = coordinator.clone();
        let resource_input = resource_input.clone();
        let resource_error = resource_error.clone();
        let adding = adding.clone();
        let notify = notify.clone();
        let config = config.clone();

        Callback::from(move |input: String| {
            let prepared = coordinator.borrow().prepare_resource(&input);
            let url = match prepared {
                Ok(url) => url,
                Err(e) => {
                    resource_error.set(Some(e.to_string()));
                    notify.emit(to_notice(&e.to_process_result()));
                    return;
                }
            };

            resource_error.set(None);
            adding.set(true);

            let coordinator = coordinator.clone();
            let resource_input = resource_input.clone();
            let resource_error = resource_error.clone();
            let adding = adding.clone();
            let notify = notify.clone();
            let config = config.clone();

            spawn_local(async move {
                let kind = match HttpContentTypeProbe::from_config(&config) {
                    Ok(probe) => classify(&url, &probe).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "probe unavailable");
                        playground_core::classify_by_extension(&url)
                    }
                };

                let committed = match kind {
                    Some(kind) => coordinator.borrow_mut().commit_resource(url.clone(), kind),
                    None => Err(RegistryError::Unclassifiable(url.clone())),
                };

                match committed {
                    Ok(resource) => {
                        resource_input.set(String::new());
                        notify.emit(to_notice(
                            &ProcessResult::info(ErrorCode::ResourceAdded)
                                .with_context(serde_json::json!({ "url": resource.url })),
                        ));
                    }
                    Err(e) => {
                        resource_error.set(Some(e.to_string()));
                        notify.emit(to_notice(&e.to_process_result()));
                    }
                }
                adding.set(false);
            });
        })
    };

    let on_remove_resource = {
        let coordinator = coordinator.clone();
        let notify = notify.clone();
        Callback::from(move |url: String| {
            let removed = coordinator.borrow_mut().remove_resource(&url);
            match removed {
                Ok(true) => notify.emit(to_notice(&ProcessResult::info(ErrorCode::ResourceRemoved))),
                Ok(false) => {}
                Err(e) => notify.emit(to_notice(&e.to_process_result())),
            }
        })
    };

    let on_preview_load = {
        let dispatcher = preview.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(PreviewAction::Loaded))
    };

    let editor_refs = [html_ref, css_ref, js_ref];

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{ "Code Playground" }</h1>
                <Toolbar
                    on_refresh={on_refresh}
                    on_reset={on_reset}
                    on_download={on_download}
                    disabled={!*ready}
                />
            </header>

            // 処理メッセージ
            <div class="message-area">
                <div class={get_message_class(*message_level)}>{ &*message }</div>
            </div>

            <div class="workspace">
                // エディタ
                <div class="editor-area">
                    <TabBar
                        active={*active}
                        resource_count={resources.len()}
                        on_select={on_select}
                    />
                    <div class="editor-panels">
                        { for FragmentId::ALL.into_iter().zip(editor_refs).map(|(fragment, node_ref)| html! {
                            <EditorPane
                                key={fragment.storage_key()}
                                {fragment}
                                {node_ref}
                                visible={active.fragment() == Some(fragment)}
                                loading={!*ready}
                            />
                        }) }
                        <ResourcePanel
                            resources={(*resources).clone()}
                            input={(*resource_input).clone()}
                            truncate_len={config.truncate_len}
                            busy={*adding}
                            error={(*resource_error).clone()}
                            visible={*active == Panel::Resources}
                            on_input={on_resource_input}
                            on_add={on_add_resource}
                            on_remove={on_remove_resource}
                        />
                    </div>
                </div>

                // プレビュー
                <div class="preview-area">
                    <div class="preview-header">
                        <span>{ "プレビュー" }</span>
                        <DeviceSelector device={*device} on_change={on_device} />
                    </div>
                    <Preview
                        state={(*preview).clone()}
                        device={*device}
                        on_load={on_preview_load}
                    />
                </div>
            </div>
        </div>
    }
}
