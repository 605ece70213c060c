// Editor coordinator: widget lifecycle, debounced preview updates, panels
//
// Browser specifics (timers, animation frames, Monaco) stay in the callers;
// everything here runs against the traits below so it can be driven
// step by step in tests.

use crate::errors::UiError;
use playground_core::{
    build_archive, compose, Archiver, CodeState, DebounceTicket, Debouncer, ExportError,
    ExternalResource, FragmentId, PlaygroundConfig, ResourceKind, StorageError,
};
use playground_storageservice::{CodeStateStore, RegistryError, ResourceRegistry, StorageBackend};

/// Editing widget handle
pub trait EditorWidget {
    fn get_text(&self) -> String;
    fn set_text(&self, text: &str);
    /// Recompute layout; required after the container becomes visible
    fn relayout(&self);
    fn on_change(&self, listener: Box<dyn Fn()>);
}

/// Options passed when creating an editing widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub initial_text: String,
    pub language_mode: &'static str,
    pub theme: String,
    pub font_size: u32,
    pub minimap: bool,
    pub word_wrap: bool,
}

/// Editing widget constructor
pub trait WidgetFactory {
    type Container;
    type Widget: EditorWidget;

    fn create(&self, container: &Self::Container, options: WidgetOptions) -> Result<Self::Widget, UiError>;
}

/// Receives each composed document as a whole
pub trait RenderSurface {
    fn deliver(&self, document: String);
}

/// Lifecycle of the coordinator; never goes back to `Loading`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Uninitialized,
    Loading,
    Ready,
}

/// Visible panel in the editor area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Html,
    Css,
    Js,
    Resources,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Html, Panel::Css, Panel::Js, Panel::Resources];

    /// Fragment edited in this panel, if it is an editor panel
    pub fn fragment(self) -> Option<FragmentId> {
        match self {
            Panel::Html => Some(FragmentId::Html),
            Panel::Css => Some(FragmentId::Css),
            Panel::Js => Some(FragmentId::Js),
            Panel::Resources => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Html => "HTML",
            Panel::Css => "CSS",
            Panel::Js => "JS",
            Panel::Resources => "外部リソース",
        }
    }
}

/// The three live widgets
pub struct EditorSet<W> {
    pub html: W,
    pub css: W,
    pub js: W,
}

impl<W: EditorWidget> EditorSet<W> {
    pub fn get(&self, id: FragmentId) -> &W {
        match id {
            FragmentId::Html => &self.html,
            FragmentId::Css => &self.css,
            FragmentId::Js => &self.js,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FragmentId, &W)> {
        FragmentId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    /// Current text of every widget
    pub fn capture(&self) -> CodeState {
        CodeState::new(self.html.get_text(), self.css.get_text(), self.js.get_text())
    }
}

pub struct EditorCoordinator<W, S, B>
where
    W: EditorWidget,
    S: RenderSurface,
    B: StorageBackend,
{
    state: CoordinatorState,
    widgets: Option<EditorSet<W>>,
    code: CodeStateStore<B>,
    registry: ResourceRegistry<B>,
    surface: S,
    debouncer: Debouncer,
    config: PlaygroundConfig,
    active: Panel,
    pending_relayout: Option<FragmentId>,
}

impl<W, S, B> EditorCoordinator<W, S, B>
where
    W: EditorWidget,
    S: RenderSurface,
    B: StorageBackend,
{
    pub fn new(
        code: CodeStateStore<B>,
        registry: ResourceRegistry<B>,
        surface: S,
        config: PlaygroundConfig,
    ) -> Self {
        Self {
            state: CoordinatorState::Uninitialized,
            widgets: None,
            code,
            registry,
            surface,
            debouncer: Debouncer::new(config.debounce_ms),
            config,
            active: Panel::default(),
            pending_relayout: None,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == CoordinatorState::Ready
    }

    pub fn active(&self) -> Panel {
        self.active
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn code(&self) -> &CodeState {
        self.code.snapshot()
    }

    pub fn resources(&self) -> &[ExternalResource] {
        self.registry.list()
    }

    /// Register a listener for registry changes
    pub fn on_resources_change(&mut self, listener: impl Fn(&[ExternalResource]) + 'static) {
        self.registry.on_change(listener);
    }

    /// Enter `Loading`; only valid once, from `Uninitialized`
    pub fn begin_loading(&mut self) -> bool {
        if self.state != CoordinatorState::Uninitialized {
            return false;
        }
        self.state = CoordinatorState::Loading;
        tracing::info!("editor widgets loading");
        true
    }

    /// Options for the widget editing `id`, seeded with the stored text
    pub fn widget_options(&self, id: FragmentId) -> WidgetOptions {
        WidgetOptions {
            initial_text: self.code.get(id).to_string(),
            language_mode: id.language_mode(),
            theme: self.config.editor_theme.clone(),
            font_size: 14,
            minimap: false,
            word_wrap: true,
        }
    }

    /// Create all three widgets with `factory`
    pub fn create_widgets<F>(
        &self,
        factory: &F,
        containers: [&F::Container; 3],
    ) -> Result<EditorSet<W>, UiError>
    where
        F: WidgetFactory<Widget = W>,
    {
        let [html, css, js] = containers;
        Ok(EditorSet {
            html: factory.create(html, self.widget_options(FragmentId::Html))?,
            css: factory.create(css, self.widget_options(FragmentId::Css))?,
            js: factory.create(js, self.widget_options(FragmentId::Js))?,
        })
    }

    /// Take ownership of the live widgets and become `Ready`
    ///
    /// The first preview is delivered immediately.
    pub fn attach(&mut self, widgets: EditorSet<W>) -> bool {
        if self.state != CoordinatorState::Loading {
            return false;
        }
        self.widgets = Some(widgets);
        self.state = CoordinatorState::Ready;
        tracing::info!("editor widgets ready");

        if let Some(id) = self.active.fragment() {
            self.pending_relayout = Some(id);
        }
        self.refresh();
        true
    }

    pub fn debounce_window_ms(&self) -> u64 {
        self.debouncer.window_ms()
    }

    /// Record a change notification from a widget
    ///
    /// Returns the ticket to hand back to [`flush_change`](Self::flush_change)
    /// once the debounce window has passed.
    pub fn note_change(&mut self, now_ms: u64) -> Option<DebounceTicket> {
        if !self.is_ready() {
            return None;
        }
        Some(self.debouncer.notify(now_ms))
    }

    /// Run the capture, persist, compose, deliver cycle if `ticket` is still current
    pub fn flush_change(&mut self, ticket: DebounceTicket, now_ms: u64) -> Result<bool, StorageError> {
        if !self.is_ready() || !self.debouncer.fire(ticket, now_ms) {
            return Ok(false);
        }
        self.sync_from_widgets()?;
        self.refresh();
        Ok(true)
    }

    /// Run the pending cycle now instead of waiting for its timer
    pub fn flush_pending(&mut self) -> Result<bool, StorageError> {
        if !self.is_ready() || !self.debouncer.flush() {
            return Ok(false);
        }
        self.sync_from_widgets()?;
        self.refresh();
        Ok(true)
    }

    fn sync_from_widgets(&mut self) -> Result<(), StorageError> {
        if let Some(widgets) = &self.widgets {
            self.code.capture_from(widgets.capture())?;
        }
        Ok(())
    }

    /// Compose the current state and deliver it; no-op unless `Ready`
    pub fn refresh(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let document = compose(self.code.snapshot(), self.registry.list());
        tracing::debug!(bytes = document.len(), "preview composed");
        self.surface.deliver(document);
        true
    }

    /// Show exactly one panel
    ///
    /// Returns true when a relayout was requested for the next animation
    /// frame (see [`on_animation_frame`](Self::on_animation_frame)).
    pub fn switch_active(&mut self, panel: Panel) -> bool {
        self.active = panel;
        match panel.fragment() {
            Some(id) if self.is_ready() => {
                self.pending_relayout = Some(id);
                true
            }
            _ => {
                self.pending_relayout = None;
                false
            }
        }
    }

    /// Relayout the widget that became visible, if any
    pub fn on_animation_frame(&mut self) {
        let Some(id) = self.pending_relayout.take() else {
            return;
        };
        if let Some(widgets) = &self.widgets {
            widgets.get(id).relayout();
        }
    }

    /// Relayout every live widget (viewport or device profile changes)
    pub fn resize_all(&self) {
        if let Some(widgets) = &self.widgets {
            for (_, widget) in widgets.iter() {
                widget.relayout();
            }
        }
    }

    /// Validate a resource URL before classification
    pub fn prepare_resource(&self, input: &str) -> Result<String, RegistryError> {
        self.registry.prepare(input)
    }

    /// Append a classified resource and re-render
    pub fn commit_resource(&mut self, url: String, kind: ResourceKind) -> Result<ExternalResource, RegistryError> {
        let resource = self.registry.commit(url, kind)?;
        self.refresh();
        Ok(resource)
    }

    pub fn remove_resource(&mut self, url: &str) -> Result<bool, StorageError> {
        let removed = self.registry.remove(url)?;
        if removed {
            self.refresh();
        }
        Ok(removed)
    }

    /// Restore starter fragments, clear resources and re-render
    ///
    /// Widgets and preview are resynced from the stores even when one of
    /// the two resets fails; the first error is returned.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.debouncer.cancel();
        let registry = self.registry.reset();
        let code = self.code.reset();

        if let Some(widgets) = &self.widgets {
            for (id, widget) in widgets.iter() {
                widget.set_text(self.code.get(id));
            }
        }
        self.refresh();
        registry.and(code)
    }

    /// Build the project archive from the stored state
    ///
    /// Edits still waiting in the debounce window are captured first.
    pub fn export<A>(&mut self, archiver: &A) -> Result<Vec<u8>, ExportError>
    where
        A: Archiver + ?Sized,
    {
        if let Err(e) = self.flush_pending() {
            tracing::warn!(error = %e, "pending edits not persisted before export");
        }
        build_archive(self.code.snapshot(), self.registry.list(), archiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::ZipArchiver;
    use playground_storageservice::{MemoryBackend, RESOURCES_KEY};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeWidget {
        text: Rc<RefCell<String>>,
        relayouts: Rc<Cell<usize>>,
        listeners: Rc<RefCell<Vec<Box<dyn Fn()>>>>,
    }

    impl FakeWidget {
        /// Simulate a user edit
        fn type_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
            for listener in self.listeners.borrow().iter() {
                listener();
            }
        }
    }

    impl EditorWidget for FakeWidget {
        fn get_text(&self) -> String {
            self.text.borrow().clone()
        }

        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
        }

        fn relayout(&self) {
            self.relayouts.set(self.relayouts.get() + 1);
        }

        fn on_change(&self, listener: Box<dyn Fn()>) {
            self.listeners.borrow_mut().push(listener);
        }
    }

    struct FakeFactory;

    impl WidgetFactory for FakeFactory {
        type Container = &'static str;
        type Widget = FakeWidget;

        fn create(&self, container: &&'static str, options: WidgetOptions) -> Result<FakeWidget, UiError> {
            if container.is_empty() {
                return Err(UiError::WidgetUnavailable("missing container".to_string()));
            }
            let widget = FakeWidget::default();
            widget.set_text(&options.initial_text);
            Ok(widget)
        }
    }

    #[derive(Clone, Default)]
    struct FakeSurface {
        documents: Rc<RefCell<Vec<String>>>,
    }

    impl FakeSurface {
        fn count(&self) -> usize {
            self.documents.borrow().len()
        }

        fn last(&self) -> String {
            self.documents.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl RenderSurface for FakeSurface {
        fn deliver(&self, document: String) {
            self.documents.borrow_mut().push(document);
        }
    }

    type TestCoordinator = EditorCoordinator<FakeWidget, FakeSurface, MemoryBackend>;

    /// Shared in-memory backend with a switchable failing key
    #[derive(Clone, Default)]
    struct SwitchableBackend {
        inner: MemoryBackend,
        failing: Rc<Cell<Option<&'static str>>>,
    }

    impl SwitchableBackend {
        fn check(&self, key: &str) -> Result<(), StorageError> {
            match self.failing.get() {
                Some(failing) if failing == key => Err(StorageError::QuotaExceeded(key.to_string())),
                _ => Ok(()),
            }
        }
    }

    impl StorageBackend for SwitchableBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.remove_item(key)
        }
    }

    fn coordinator(backend: &MemoryBackend, surface: &FakeSurface) -> TestCoordinator {
        EditorCoordinator::new(
            CodeStateStore::load(backend.clone()),
            ResourceRegistry::load(backend.clone()),
            surface.clone(),
            PlaygroundConfig::default(),
        )
    }

    /// Drive the coordinator to `Ready` and return clones of the widgets
    fn ready(coordinator: &mut TestCoordinator) -> EditorSet<FakeWidget> {
        assert!(coordinator.begin_loading());
        let widgets = coordinator
            .create_widgets(&FakeFactory, [&"html", &"css", &"js"])
            .unwrap();
        let handles = EditorSet {
            html: widgets.html.clone(),
            css: widgets.css.clone(),
            js: widgets.js.clone(),
        };
        assert!(coordinator.attach(widgets));
        handles
    }

    #[test]
    fn test_state_machine() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        assert_eq!(coordinator.state(), CoordinatorState::Uninitialized);

        // Loading 前の attach は無視される
        assert!(!coordinator.attach(EditorSet {
            html: FakeWidget::default(),
            css: FakeWidget::default(),
            js: FakeWidget::default(),
        }));

        ready(&mut coordinator);
        assert_eq!(coordinator.state(), CoordinatorState::Ready);
        assert!(!coordinator.begin_loading());
        assert_eq!(coordinator.state(), CoordinatorState::Ready);
    }

    #[test]
    fn test_preview_operations_are_noops_until_ready() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);

        assert!(!coordinator.refresh());
        assert_eq!(coordinator.note_change(0), None);
        coordinator.begin_loading();
        assert!(!coordinator.refresh());
        assert!(!coordinator.switch_active(Panel::Css));
        assert_eq!(surface.count(), 0);
    }

    #[test]
    fn test_widgets_seeded_from_store() {
        let backend = MemoryBackend::new();
        backend.set_item("css-code", "body { color: red; }").unwrap();
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&backend, &surface);

        let widgets = ready(&mut coordinator);
        assert_eq!(widgets.css.get_text(), "body { color: red; }");
        assert_eq!(widgets.html.get_text(), CodeState::starter_text(FragmentId::Html));
    }

    #[test]
    fn test_widget_creation_failure() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        coordinator.begin_loading();

        let result = coordinator.create_widgets(&FakeFactory, [&"html", &"", &"js"]);
        assert!(matches!(result, Err(UiError::WidgetUnavailable(_))));
        assert_eq!(coordinator.state(), CoordinatorState::Loading);
    }

    #[test]
    fn test_attach_delivers_initial_preview() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        ready(&mut coordinator);

        assert_eq!(surface.count(), 1);
        assert_eq!(surface.last(), compose(&CodeState::starter(), &[]));
    }

    #[test]
    fn test_debounced_burst_produces_single_cycle() {
        let backend = MemoryBackend::new();
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&backend, &surface);
        let widgets = ready(&mut coordinator);
        let delivered_before = surface.count();

        let mut tickets = Vec::new();
        for (i, text) in ["<p>1</p>", "<p>12</p>", "<p>123</p>", "<p>1234</p>"].iter().enumerate() {
            widgets.html.set_text(text);
            tickets.push(coordinator.note_change(i as u64 * 100).unwrap());
        }

        // 各タイマーが500ms後に発火するが、最後の一回だけが処理される
        let fired: Vec<bool> = tickets
            .iter()
            .enumerate()
            .map(|(i, ticket)| coordinator.flush_change(*ticket, i as u64 * 100 + 500).unwrap())
            .collect();

        assert_eq!(fired, vec![false, false, false, true]);
        assert_eq!(surface.count(), delivered_before + 1);
        assert!(surface.last().contains("<p>1234</p>"));
        assert_eq!(backend.raw("html-code"), Some("<p>1234</p>".to_string()));
    }

    #[test]
    fn test_ticket_does_not_fire_early() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        ready(&mut coordinator);

        let ticket = coordinator.note_change(1_000).unwrap();
        assert_eq!(coordinator.flush_change(ticket, 1_200), Ok(false));
        assert_eq!(coordinator.flush_change(ticket, 1_500), Ok(true));
    }

    #[test]
    fn test_change_listener_wiring() {
        let surface = FakeSurface::default();
        let coordinator = Rc::new(RefCell::new(coordinator(&MemoryBackend::new(), &surface)));
        let widgets = ready(&mut coordinator.borrow_mut());

        let tickets = Rc::new(RefCell::new(Vec::new()));
        let clock = Rc::new(Cell::new(0u64));
        {
            let coordinator = coordinator.clone();
            let tickets = tickets.clone();
            let clock = clock.clone();
            widgets.js.on_change(Box::new(move || {
                if let Some(ticket) = coordinator.borrow_mut().note_change(clock.get()) {
                    tickets.borrow_mut().push(ticket);
                }
            }));
        }

        widgets.js.type_text("let a = 1;");
        clock.set(200);
        widgets.js.type_text("let a = 2;");

        let last = *tickets.borrow().last().unwrap();
        assert!(coordinator.borrow_mut().flush_change(last, 700).unwrap());
        assert!(surface.last().contains("let a = 2;"));
        assert_eq!(coordinator.borrow().code().js, "let a = 2;");
    }

    #[test]
    fn test_switch_active_requests_relayout_on_next_frame() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        let widgets = ready(&mut coordinator);
        coordinator.on_animation_frame();
        assert_eq!(widgets.html.relayouts.get(), 1);

        assert!(coordinator.switch_active(Panel::Css));
        assert_eq!(coordinator.active(), Panel::Css);
        // 次のフレームまではレイアウトしない
        assert_eq!(widgets.css.relayouts.get(), 0);

        coordinator.on_animation_frame();
        assert_eq!(widgets.css.relayouts.get(), 1);
        assert_eq!(widgets.js.relayouts.get(), 0);

        coordinator.on_animation_frame();
        assert_eq!(widgets.css.relayouts.get(), 1);
    }

    #[test]
    fn test_switch_to_resources_panel_needs_no_relayout() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        let widgets = ready(&mut coordinator);

        assert!(!coordinator.switch_active(Panel::Resources));
        coordinator.on_animation_frame();
        for (_, widget) in widgets.iter() {
            assert_eq!(widget.relayouts.get(), 0);
        }
    }

    #[test]
    fn test_resize_all() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        let widgets = ready(&mut coordinator);

        coordinator.resize_all();
        coordinator.resize_all();
        for (_, widget) in widgets.iter() {
            assert_eq!(widget.relayouts.get(), 2);
        }
    }

    #[test]
    fn test_resource_mutations_refresh_preview() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        ready(&mut coordinator);
        let before = surface.count();

        let url = coordinator.prepare_resource("https://a.com/x.css").unwrap();
        coordinator.commit_resource(url, ResourceKind::Style).unwrap();
        assert_eq!(surface.count(), before + 1);
        assert!(surface.last().contains("<link rel=\"stylesheet\" href=\"https://a.com/x.css\">"));

        assert_eq!(coordinator.remove_resource("https://a.com/missing.js"), Ok(false));
        assert_eq!(surface.count(), before + 1);

        assert_eq!(coordinator.remove_resource("https://a.com/x.css"), Ok(true));
        assert_eq!(surface.count(), before + 2);
        assert!(!surface.last().contains("<link"));
    }

    #[test]
    fn test_reset_restores_defaults_everywhere() {
        let backend = MemoryBackend::new();
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&backend, &surface);
        let widgets = ready(&mut coordinator);

        widgets.css.set_text("* { margin: 0 }");
        let ticket = coordinator.note_change(0).unwrap();
        coordinator.flush_change(ticket, 500).unwrap();
        coordinator
            .commit_resource("https://a.com/x.js".to_string(), ResourceKind::Script)
            .unwrap();

        coordinator.reset().unwrap();

        assert_eq!(widgets.css.get_text(), CodeState::starter_text(FragmentId::Css));
        assert_eq!(coordinator.code(), &CodeState::starter());
        assert!(coordinator.resources().is_empty());
        assert!(!backend.contains_key("css-code"));
        assert_eq!(backend.raw(RESOURCES_KEY), Some("[]".to_string()));
        assert_eq!(surface.last(), compose(&CodeState::starter(), &[]));
    }

    #[test]
    fn test_reset_resyncs_widgets_when_resource_write_fails() {
        let backend = SwitchableBackend::default();
        let surface = FakeSurface::default();
        let mut coordinator: EditorCoordinator<FakeWidget, FakeSurface, SwitchableBackend> =
            EditorCoordinator::new(
                CodeStateStore::load(backend.clone()),
                ResourceRegistry::load(backend.clone()),
                surface.clone(),
                PlaygroundConfig::default(),
            );
        coordinator.begin_loading();
        let widgets = coordinator
            .create_widgets(&FakeFactory, [&"html", &"css", &"js"])
            .unwrap();
        let html = widgets.html.clone();
        coordinator.attach(widgets);

        html.set_text("<main>mine</main>");
        let ticket = coordinator.note_change(0).unwrap();
        let window = coordinator.debounce_window_ms();
        assert!(coordinator.flush_change(ticket, window).unwrap());
        assert_eq!(coordinator.code().html, "<main>mine</main>");
        coordinator
            .commit_resource("https://a.com/x.css".to_string(), ResourceKind::Style)
            .unwrap();

        backend.failing.set(Some(RESOURCES_KEY));
        let result = coordinator.reset();

        assert_eq!(result, Err(StorageError::QuotaExceeded(RESOURCES_KEY.to_string())));
        // ウィジェット・ストア・プレビューが食い違わない
        assert_eq!(html.get_text(), coordinator.code().html);
        assert_eq!(surface.last(), compose(coordinator.code(), coordinator.resources()));
        assert_eq!(coordinator.code(), &CodeState::starter());
        assert_eq!(coordinator.resources().len(), 1);
        assert_eq!(CodeStateStore::load(backend.clone()).snapshot(), &CodeState::starter());
    }

    #[test]
    fn test_export_includes_pending_edits() {
        let backend = MemoryBackend::new();
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&backend, &surface);
        let widgets = ready(&mut coordinator);

        widgets.js.set_text("console.log('unsaved');");
        let ticket = coordinator.note_change(0).unwrap();

        let bytes = coordinator.export(&ZipArchiver).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(backend.raw("js-code"), Some("console.log('unsaved');".to_string()));
        // エクスポートで消費されたチケットは発火しない
        assert_eq!(coordinator.flush_change(ticket, 1_000), Ok(false));
    }

    #[test]
    fn test_flush_pending_runs_cycle_once() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        let widgets = ready(&mut coordinator);
        let before = surface.count();

        assert_eq!(coordinator.flush_pending(), Ok(false));

        widgets.html.set_text("<h1>now</h1>");
        coordinator.note_change(0).unwrap();
        assert_eq!(coordinator.flush_pending(), Ok(true));
        assert_eq!(coordinator.flush_pending(), Ok(false));
        assert_eq!(surface.count(), before + 1);
        assert!(surface.last().contains("<h1>now</h1>"));
    }

    #[test]
    fn test_registry_change_listener() {
        let surface = FakeSurface::default();
        let mut coordinator = coordinator(&MemoryBackend::new(), &surface);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            coordinator.on_resources_change(move |list| seen.borrow_mut().push(list.to_vec()));
        }

        coordinator
            .commit_resource("https://a.com/x.css".to_string(), ResourceKind::Style)
            .unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0][0].url, "https://a.com/x.css");
    }
}
