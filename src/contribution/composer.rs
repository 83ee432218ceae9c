//! 贡献提交流程
//!
//! 流程：填写 → `request_submit()` 校验并弹出确认框 → `submit()` 发送请求。
//! `submit()` 在任何 await 之前同步地检查并设置进行中标志，
//! 标志由守卫在离开作用域时释放，因此重复点击只会产生一次请求。

use super::form::{ContributionDraft, FormField};
use crate::cancel::TaskScope;
use crate::client::ApiClient;
use crate::error::AppError;
use crate::notice::{DialogContent, Notice, Notifier};
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use chicham_shared::{ContributionType, STORAGE_USER_ID_KEY};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const MSG_INCOMPLETE: &str = "Por favor completa los campos obligatorios";
const MSG_SENT: &str = "¡Contribución enviada! Un administrador la revisará pronto.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub draft: ContributionDraft,
    /// 打开中的确认对话框
    pub dialog: Option<DialogContent>,
    pub submitting: bool,
}

/// `submit()` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    /// 后端或网络失败，表单保留
    Failed(AppError),
    /// 已有一次提交在进行中
    Busy,
    Invalid,
    Cancelled,
}

/// 进行中标志的守卫
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct ContributionComposer<H, S, N, C> {
    api: ApiClient<H, S>,
    notifier: N,
    state: C,
    in_flight: Arc<AtomicBool>,
    scope: TaskScope,
}

impl<H, S, N, C> ContributionComposer<H, S, N, C>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Notifier,
    C: StateCell<ComposerState>,
{
    pub fn new(api: ApiClient<H, S>, notifier: N, state: C) -> Self {
        Self {
            api,
            notifier,
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
            scope: TaskScope::new(),
        }
    }

    pub fn state(&self) -> ComposerState {
        self.state.read(Clone::clone)
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.write(|s| s.draft.set_field(field, value));
    }

    pub fn switch_type(&self, kind: ContributionType) {
        self.state.write(|s| s.draft.switch_type(kind));
    }

    /// 校验失败时显示警告通知
    pub fn validate(&self) -> bool {
        let mut valid = false;
        self.state.write(|s| valid = s.draft.validate());
        if !valid {
            self.notifier.notify(Notice::warning(MSG_INCOMPLETE));
        }
        valid
    }

    /// 校验通过后打开确认对话框
    pub fn request_submit(&self) -> bool {
        if !self.validate() {
            return false;
        }
        self.state.write(|s| s.dialog = Some(s.draft.confirmation()));
        true
    }

    pub fn dismiss(&self) {
        self.state.write(|s| s.dialog = None);
    }

    /// 发送贡献
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("submission already in flight, ignoring");
            return SubmitOutcome::Busy;
        };

        if !self.validate() {
            self.dismiss();
            return SubmitOutcome::Invalid;
        }

        let user_id = self.api.store().get(STORAGE_USER_ID_KEY);
        let request = self.state.read(|s| s.draft.to_request(user_id));
        self.state.write(|s| s.submitting = true);

        let result = self
            .scope
            .run(self.api.call(&request))
            .await
            .and_then(|inner| inner);

        match result {
            Err(AppError::Cancelled) => SubmitOutcome::Cancelled,
            Ok(_) => {
                tracing::info!(kind = ?request.kind, "contribution submitted");
                self.notifier.notify(Notice::success(MSG_SENT));
                self.state.write(|s| {
                    s.draft.reset();
                    s.dialog = None;
                    s.submitting = false;
                });
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::warn!(error = %e, "contribution rejected");
                self.notifier.notify(Notice::error(e.user_message()));
                self.state.write(|s| {
                    s.dialog = None;
                    s.submitting = false;
                });
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::request::MockHttpClient;
    use crate::state::local_cell;
    use crate::storage::MemoryStore;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    const CREATE_URL: &str = "https://api.test/api/contributions/create";

    type TestComposer = ContributionComposer<
        MockHttpClient,
        MemoryStore,
        Rc<RefCell<Vec<Notice>>>,
        Rc<RefCell<ComposerState>>,
    >;

    struct Fixture {
        composer: TestComposer,
        http: MockHttpClient,
        notices: Rc<RefCell<Vec<Notice>>>,
    }

    fn fixture(http: MockHttpClient) -> Fixture {
        let store = MemoryStore::new();
        store.set(STORAGE_USER_ID_KEY, "42");
        let notices = Rc::new(RefCell::new(Vec::new()));
        let composer = ContributionComposer::new(
            ApiClient::new(http.clone(), store, "https://api.test"),
            notices.clone(),
            local_cell(ComposerState::default()),
        );
        Fixture {
            composer,
            http,
            notices,
        }
    }

    fn fill_entsa(composer: &TestComposer) {
        composer.set_field(FormField::PalabraShuar, "Entsa");
        composer.set_field(FormField::TraduccionEspanol, "Agua");
        composer.set_field(FormField::Categoria, "animales");
    }

    fn last_kind(notices: &Rc<RefCell<Vec<Notice>>>) -> Option<NoticeKind> {
        notices.borrow().last().map(|n| n.kind)
    }

    #[tokio::test]
    async fn test_dictionary_submission_end_to_end() {
        let f = fixture(MockHttpClient::new());
        f.http.mock_envelope(CREATE_URL, "COD_OK", json!({"id": "c9"}), "");
        fill_entsa(&f.composer);

        assert!(f.composer.request_submit());
        let dialog = f.composer.state().dialog.unwrap();
        assert!(dialog.message.contains("palabra"));

        assert_eq!(f.composer.submit().await, SubmitOutcome::Submitted);

        let sent = f.http.requests_to(CREATE_URL);
        assert_eq!(sent.len(), 1);
        let body = sent[0].json();
        assert_eq!(body["content"]["wordShuar"], "Entsa");
        assert_eq!(body["userId"], "42");

        let state = f.composer.state();
        assert_eq!(state.draft, ContributionDraft::default());
        assert!(state.draft.word.imagen.is_none());
        assert!(state.dialog.is_none());
        assert!(!state.submitting);
        assert_eq!(last_kind(&f.notices), Some(NoticeKind::Success));
    }

    #[tokio::test]
    async fn test_double_submit_sends_one_request() {
        let f = fixture(MockHttpClient::yielding());
        f.http.mock_envelope(CREATE_URL, "COD_OK", Value::Null, "");
        fill_entsa(&f.composer);

        let (first, second) = futures::join!(f.composer.submit(), f.composer.submit());

        assert_eq!(first, SubmitOutcome::Submitted);
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(f.http.requests_to(CREATE_URL).len(), 1);
    }

    #[tokio::test]
    async fn test_guard_is_released_after_completion() {
        let f = fixture(MockHttpClient::new());
        f.http.mock_envelope(CREATE_URL, "COD_ERR", Value::Null, "Falló");
        fill_entsa(&f.composer);

        f.composer.submit().await;
        f.composer.submit().await;
        assert_eq!(f.http.requests_to(CREATE_URL).len(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_form_and_closes_dialog() {
        let f = fixture(MockHttpClient::new());
        f.http.mock_envelope(CREATE_URL, "COD_DUPLICATE", Value::Null, "La palabra ya existe");
        fill_entsa(&f.composer);
        f.composer.request_submit();

        let outcome = f.composer.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Backend { .. })));

        let state = f.composer.state();
        assert_eq!(state.draft.word.palabra_shuar, "Entsa");
        assert!(state.dialog.is_none());
        let notices = f.notices.borrow();
        assert_eq!(notices.last().unwrap().message, "La palabra ya existe");
    }

    #[tokio::test]
    async fn test_network_failure_reports_generic_error() {
        let f = fixture(MockHttpClient::new());
        f.http.mock_network_failure(CREATE_URL);
        fill_entsa(&f.composer);

        let outcome = f.composer.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Network(_))));
        assert_eq!(f.notices.borrow().last().unwrap().message, "Error");
        assert_eq!(f.composer.state().draft.word.traduccion_espanol, "Agua");
    }

    #[tokio::test]
    async fn test_invalid_form_is_blocked_locally() {
        let f = fixture(MockHttpClient::new());
        f.composer.set_field(FormField::PalabraShuar, "Entsa");

        assert!(!f.composer.request_submit());
        assert!(f.composer.state().dialog.is_none());
        assert_eq!(last_kind(&f.notices), Some(NoticeKind::Warning));

        assert_eq!(f.composer.submit().await, SubmitOutcome::Invalid);
        assert!(f.http.requests().is_empty());
        assert_eq!(f.composer.state().draft.errors.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_submission_leaves_state_alone() {
        let f = fixture(MockHttpClient::new());
        fill_entsa(&f.composer);
        f.composer.request_submit();
        f.composer.scope().cancel();

        assert_eq!(f.composer.submit().await, SubmitOutcome::Cancelled);
        let state = f.composer.state();
        assert!(state.dialog.is_some());
        assert_eq!(state.draft.word.palabra_shuar, "Entsa");
    }
}
