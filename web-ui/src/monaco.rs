// Monaco editor bindings
//
// The page loads Monaco through its AMD loader and exposes
// `window.monacoReady`, a promise resolved once `window.monaco` exists.

use crate::coordinator::{EditorWidget, WidgetFactory, WidgetOptions};
use crate::errors::UiError;
use js_sys::{Object, Promise, Reflect};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// `monaco.editor.IStandaloneCodeEditor`
    pub type CodeEditor;

    #[wasm_bindgen(catch, js_namespace = ["monaco", "editor"], js_name = create)]
    fn create_editor(container: &HtmlElement, options: &Object) -> Result<CodeEditor, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &CodeEditor) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &CodeEditor, value: &str);

    #[wasm_bindgen(method)]
    fn layout(this: &CodeEditor);

    #[wasm_bindgen(method, js_name = onDidChangeModelContent)]
    fn on_did_change_model_content(this: &CodeEditor, listener: &Closure<dyn FnMut()>) -> JsValue;
}

/// Wait until the Monaco loader has finished
pub async fn wait_for_monaco() -> Result<(), UiError> {
    let window = web_sys::window().ok_or_else(|| UiError::Dom("window がありません".to_string()))?;
    let ready = Reflect::get(&window, &JsValue::from_str("monacoReady"))
        .map_err(|e| UiError::from_js("monacoReady", &e))?;

    if ready.is_undefined() {
        return Err(UiError::WidgetUnavailable(
            "monacoReady が定義されていません".to_string(),
        ));
    }

    let promise: Promise = ready
        .dyn_into()
        .map_err(|_| UiError::WidgetUnavailable("monacoReady が Promise ではありません".to_string()))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| UiError::WidgetUnavailable(format!("{:?}", e)))?;
    Ok(())
}

/// A live Monaco editor
pub struct MonacoWidget {
    editor: CodeEditor,
    // Closures must outlive the JS subscriptions that call them
    listeners: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl EditorWidget for MonacoWidget {
    fn get_text(&self) -> String {
        self.editor.get_value()
    }

    fn set_text(&self, text: &str) {
        self.editor.set_value(text);
    }

    fn relayout(&self) {
        self.editor.layout();
    }

    fn on_change(&self, listener: Box<dyn Fn()>) {
        let closure = Closure::wrap(Box::new(move || listener()) as Box<dyn FnMut()>);
        self.editor.on_did_change_model_content(&closure);
        self.listeners.borrow_mut().push(closure);
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), UiError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| UiError::from_js(key, &e))
}

fn options_object(options: &WidgetOptions) -> Result<Object, UiError> {
    let object = Object::new();
    set(&object, "value", &JsValue::from_str(&options.initial_text))?;
    set(&object, "language", &JsValue::from_str(options.language_mode))?;
    set(&object, "theme", &JsValue::from_str(&options.theme))?;
    set(&object, "fontSize", &JsValue::from(options.font_size))?;
    set(&object, "wordWrap", &JsValue::from_str(if options.word_wrap { "on" } else { "off" }))?;
    set(&object, "scrollBeyondLastLine", &JsValue::FALSE)?;
    set(&object, "automaticLayout", &JsValue::FALSE)?;

    let minimap = Object::new();
    set(&minimap, "enabled", &JsValue::from_bool(options.minimap))?;
    set(&object, "minimap", &minimap)?;
    Ok(object)
}

/// Creates [`MonacoWidget`]s inside DOM containers
#[derive(Debug, Clone, Copy, Default)]
pub struct MonacoFactory;

impl WidgetFactory for MonacoFactory {
    type Container = HtmlElement;
    type Widget = MonacoWidget;

    fn create(&self, container: &HtmlElement, options: WidgetOptions) -> Result<MonacoWidget, UiError> {
        let object = options_object(&options)?;
        let editor = create_editor(container, &object)
            .map_err(|e| UiError::WidgetUnavailable(format!("{:?}", e)))?;
        tracing::debug!(language = options.language_mode, "monaco editor created");
        Ok(MonacoWidget {
            editor,
            listeners: RefCell::new(Vec::new()),
        })
    }
}
