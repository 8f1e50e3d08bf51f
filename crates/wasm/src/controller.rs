//! Page controller: profile selection, printing and PDF download

use crate::host::Host;
use cv_data::{CvData, ProfileKey, ProfileRegistry};
use render::{pdf_filename, HeaderState, PdfRenderer, RenderError, ScreenRenderer};
use std::cell::Cell;
use tracing::{debug, error, info};

/// Produces the downloadable artifact for a CV
pub trait ArtifactBuilder {
    fn build(&self, cv: &CvData) -> Result<Vec<u8>, RenderError>;
}

impl ArtifactBuilder for PdfRenderer {
    fn build(&self, cv: &CvData) -> Result<Vec<u8>, RenderError> {
        self.render(cv)
    }
}

/// PDF generation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
}

/// Result of a download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// File handed to the host under this name
    Delivered(String),
    /// Generation or saving failed; the message was reported
    Failed(String),
    /// A generation is already in progress; nothing was done
    Busy,
}

/// Marks a generation in progress for as long as it lives
struct BusyGuard<'a, H: Host> {
    host: &'a H,
    state: &'a Cell<GenerationState>,
}

impl<'a, H: Host> BusyGuard<'a, H> {
    fn engage(host: &'a H, state: &'a Cell<GenerationState>) -> Self {
        state.set(GenerationState::Generating);
        host.set_download_busy(true);
        Self { host, state }
    }
}

impl<H: Host> Drop for BusyGuard<'_, H> {
    fn drop(&mut self) {
        self.state.set(GenerationState::Idle);
        self.host.set_download_busy(false);
    }
}

/// Owns the selected profile and the PDF generation state
///
/// Every method takes `&self` so a pending download can share the controller
/// with calls made while it waits on the event loop.
pub struct Controller<H: Host, B: ArtifactBuilder = PdfRenderer> {
    registry: ProfileRegistry,
    selected: Cell<ProfileKey>,
    state: Cell<GenerationState>,
    screen: ScreenRenderer,
    builder: B,
    host: H,
}

impl<H: Host> Controller<H, PdfRenderer> {
    /// Controller starting on the default profile
    pub fn new(registry: ProfileRegistry, host: H) -> Self {
        Self::with_builder(registry, host, PdfRenderer::new())
    }
}

impl<H: Host, B: ArtifactBuilder> Controller<H, B> {
    pub fn with_builder(registry: ProfileRegistry, host: H, builder: B) -> Self {
        Self {
            registry,
            selected: Cell::new(ProfileKey::default()),
            state: Cell::new(GenerationState::Idle),
            screen: ScreenRenderer::new(),
            builder,
            host,
        }
    }

    pub fn selected(&self) -> ProfileKey {
        self.selected.get()
    }

    /// Data of the selected profile
    pub fn current(&self) -> &CvData {
        self.registry.get(self.selected())
    }

    pub fn state(&self) -> GenerationState {
        self.state.get()
    }

    pub fn is_generating(&self) -> bool {
        self.state() == GenerationState::Generating
    }

    pub fn select_profile(&self, key: ProfileKey) {
        self.selected.set(key);
        info!(profile = %key, "Profile changed to");
    }

    /// Select a profile by its key string
    pub fn select_profile_str(&self, key: &str) -> cv_data::Result<()> {
        let key = key.parse()?;
        self.select_profile(key);
        Ok(())
    }

    pub fn header_state(&self) -> HeaderState {
        HeaderState {
            selected: self.selected(),
            generating: self.is_generating(),
        }
    }

    /// Standalone HTML document for the selected profile
    pub fn render_page(&self) -> String {
        self.screen.render_page(self.current(), &self.header_state())
    }

    /// Mountable markup for the selected profile
    pub fn render_app(&self) -> String {
        self.screen
            .render_app(self.current(), &self.header_state())
            .render()
    }

    /// Ask the host to print; failures are reported, not returned
    pub fn print(&self) {
        if let Err(e) = self.host.print() {
            error!(error = %e, "print failed");
            self.host.report_error(&e.to_string());
        }
    }

    /// Build the selected profile's PDF and hand it to the host
    ///
    /// The download control is disabled and the host gets a chance to repaint
    /// before the build starts. It is re-enabled once the attempt finishes,
    /// whether it succeeds or not. Requests made while generating are ignored.
    pub async fn download_pdf(&self) -> DownloadOutcome {
        if self.is_generating() {
            return DownloadOutcome::Busy;
        }

        let key = self.selected();
        let cv = self.registry.get(key);
        let filename = pdf_filename(cv, key);

        let result = {
            let _busy = BusyGuard::engage(&self.host, &self.state);
            self.host.yield_to_ui().await;
            debug!(profile = %key, "Building PDF");
            self.builder
                .build(cv)
                .map_err(|e| e.to_string())
                .and_then(|bytes| {
                    self.host
                        .save_file(&bytes, &filename)
                        .map_err(|e| e.to_string())
                })
        };

        match result {
            Ok(()) => {
                info!(profile = %key, filename = %filename, "PDF downloaded");
                DownloadOutcome::Delivered(filename)
            }
            Err(message) => {
                error!(profile = %key, error = %message, "Error generating PDF");
                self.host
                    .report_error(&format!("Error generating PDF: {message}"));
                DownloadOutcome::Failed(message)
            }
        }
    }

    /// PDF bytes of the selected profile, without saving them
    pub fn pdf_bytes(&self) -> Result<Vec<u8>, RenderError> {
        self.builder.build(self.current())
    }

    pub fn pdf_filename(&self) -> String {
        pdf_filename(self.current(), self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostError;
    use cv_data::CvError;
    use pretty_assertions::assert_eq;
    use render::html::node::escape_text;
    use std::cell::RefCell;
    use std::future::Future;
    use std::pin::{pin, Pin};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Busy(bool),
        Yield,
        Build(String),
        Save(String),
        Print,
        Error(String),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    /// Pending on the first poll, like a browser timeout
    struct YieldOnce {
        log: Log,
        yielded: bool,
    }

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                return Poll::Ready(());
            }
            self.yielded = true;
            self.log.borrow_mut().push(Event::Yield);
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
        let waker = Waker::from(Arc::new(NoopWaker));
        fut.poll(&mut Context::from_waker(&waker))
    }

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        loop {
            if let Poll::Ready(out) = poll_once(fut.as_mut()) {
                return out;
            }
        }
    }

    struct MockHost {
        log: Log,
        fail_save: bool,
    }

    impl Host for MockHost {
        type Yield = YieldOnce;

        fn print(&self) -> Result<(), HostError> {
            self.log.borrow_mut().push(Event::Print);
            Ok(())
        }

        fn save_file(&self, bytes: &[u8], filename: &str) -> Result<(), HostError> {
            if self.fail_save {
                return Err(HostError::Save("disk full".into()));
            }
            assert!(!bytes.is_empty());
            self.log.borrow_mut().push(Event::Save(filename.to_string()));
            Ok(())
        }

        fn set_download_busy(&self, busy: bool) {
            self.log.borrow_mut().push(Event::Busy(busy));
        }

        fn yield_to_ui(&self) -> YieldOnce {
            YieldOnce {
                log: self.log.clone(),
                yielded: false,
            }
        }

        fn report_error(&self, message: &str) {
            self.log.borrow_mut().push(Event::Error(message.to_string()));
        }
    }

    struct MockBuilder {
        log: Log,
        fail: bool,
    }

    impl ArtifactBuilder for MockBuilder {
        fn build(&self, cv: &CvData) -> Result<Vec<u8>, RenderError> {
            self.log
                .borrow_mut()
                .push(Event::Build(cv.profile.clone()));
            if self.fail {
                return Err(CvError::Validation("simulated failure".into()).into());
            }
            Ok(b"%PDF-1.7".to_vec())
        }
    }

    fn controller(fail_build: bool, fail_save: bool) -> (Controller<MockHost, MockBuilder>, Log) {
        let log: Log = Rc::default();
        let registry = ProfileRegistry::builtin().unwrap();
        let host = MockHost {
            log: log.clone(),
            fail_save,
        };
        let builder = MockBuilder {
            log: log.clone(),
            fail: fail_build,
        };
        (Controller::with_builder(registry, host, builder), log)
    }

    #[test]
    fn test_starts_on_frontend() {
        let (ctrl, _) = controller(false, false);
        assert_eq!(ctrl.selected(), ProfileKey::Frontend);
        assert_eq!(ctrl.state(), GenerationState::Idle);
        assert_eq!(ctrl.header_state(), HeaderState::new(ProfileKey::Frontend));
    }

    #[test]
    fn test_switching_profile_shows_only_selected_data() {
        let (ctrl, _) = controller(false, false);
        let frontend = escape_text(&ctrl.current().headline);
        assert!(ctrl.render_page().contains(&frontend));

        ctrl.select_profile(ProfileKey::Sdet);
        let sdet = escape_text(&ctrl.current().headline);
        assert_ne!(frontend, sdet);

        let page = ctrl.render_page();
        assert!(page.contains(&sdet));
        assert!(!page.contains(&frontend));
        assert_eq!(ctrl.header_state().selected, ProfileKey::Sdet);
    }

    #[test]
    fn test_select_profile_str() {
        let (ctrl, _) = controller(false, false);
        ctrl.select_profile_str("sdet").unwrap();
        assert_eq!(ctrl.selected(), ProfileKey::Sdet);

        let err = ctrl.select_profile_str("designer").unwrap_err();
        assert!(matches!(err, CvError::UnknownProfile(_)));
        assert_eq!(ctrl.selected(), ProfileKey::Sdet);
    }

    #[test]
    fn test_download_disables_control_until_done() {
        let (ctrl, log) = controller(false, false);
        ctrl.select_profile(ProfileKey::Sdet);
        let expected_name = ctrl.pdf_filename();
        let profile = ctrl.current().profile.clone();

        let outcome = block_on(ctrl.download_pdf());

        assert_eq!(outcome, DownloadOutcome::Delivered(expected_name.clone()));
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Busy(true),
                Event::Yield,
                Event::Build(profile),
                Event::Save(expected_name),
                Event::Busy(false),
            ]
        );
        assert!(!ctrl.is_generating());
    }

    #[test]
    fn test_download_yields_before_building() {
        let (ctrl, log) = controller(false, false);
        let mut download = pin!(ctrl.download_pdf());

        assert!(poll_once(download.as_mut()).is_pending());
        assert_eq!(*log.borrow(), vec![Event::Busy(true), Event::Yield]);
        assert!(ctrl.is_generating());
        assert!(ctrl.render_app().contains("Generating..."));

        let outcome = block_on(download);
        assert!(matches!(outcome, DownloadOutcome::Delivered(_)));
        assert!(!ctrl.is_generating());
    }

    #[test]
    fn test_second_request_while_pending_is_ignored() {
        let (ctrl, log) = controller(false, false);
        let mut first = pin!(ctrl.download_pdf());
        assert!(poll_once(first.as_mut()).is_pending());

        assert_eq!(block_on(ctrl.download_pdf()), DownloadOutcome::Busy);
        assert!(matches!(block_on(first), DownloadOutcome::Delivered(_)));

        let builds = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Build(_)))
            .count();
        assert_eq!(builds, 1);
    }

    #[test]
    fn test_dropped_download_returns_to_idle() {
        let (ctrl, log) = controller(false, false);
        {
            let mut download = pin!(ctrl.download_pdf());
            assert!(poll_once(download.as_mut()).is_pending());
            assert!(ctrl.is_generating());
        }

        assert_eq!(ctrl.state(), GenerationState::Idle);
        assert_eq!(log.borrow().last(), Some(&Event::Busy(false)));
    }

    #[test]
    fn test_failed_build_returns_to_idle() {
        let (ctrl, log) = controller(true, false);

        let outcome = block_on(ctrl.download_pdf());

        assert!(matches!(outcome, DownloadOutcome::Failed(ref m) if m.contains("simulated failure")));
        assert_eq!(ctrl.state(), GenerationState::Idle);
        let log = log.borrow();
        assert!(!log.iter().any(|e| matches!(e, Event::Save(_))));
        assert_eq!(log.iter().filter(|e| matches!(e, Event::Busy(_))).count(), 2);
        assert_eq!(log[log.len() - 2], Event::Busy(false));
        assert!(matches!(log.last(), Some(Event::Error(m)) if m.starts_with("Error generating PDF")));
    }

    #[test]
    fn test_failed_save_returns_to_idle() {
        let (ctrl, _) = controller(false, true);

        let outcome = block_on(ctrl.download_pdf());

        assert_eq!(outcome, DownloadOutcome::Failed("Save failed: disk full".into()));
        assert!(!ctrl.is_generating());
    }

    #[test]
    fn test_download_ignored_while_generating() {
        let (ctrl, log) = controller(false, false);
        ctrl.state.set(GenerationState::Generating);

        assert_eq!(block_on(ctrl.download_pdf()), DownloadOutcome::Busy);
        assert!(log.borrow().is_empty());
        assert!(ctrl.header_state().generating);
        assert!(ctrl.render_app().contains("Generating..."));
    }

    #[test]
    fn test_print_delegates_to_host() {
        let (ctrl, log) = controller(false, false);
        ctrl.print();
        assert_eq!(*log.borrow(), vec![Event::Print]);
    }

    #[test]
    fn test_pdf_renderer_builds_real_document() {
        let registry = ProfileRegistry::builtin().unwrap();
        let bytes = PdfRenderer::new()
            .build(registry.get(ProfileKey::Frontend))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
