use super::*;
use crate::moderation::stats::ModerationStats;
use crate::notice::{NoticeKind, Tone};
use crate::request::MockHttpClient;
use crate::state::local_cell;
use crate::storage::MemoryStore;
use chicham_shared::ContributionStatus;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;

const LIST_URL: &str = "https://api.test/api/contributions/list";
const HISTORY_URL: &str = "https://api.test/api/contributions/history";
const APPROVE_URL: &str = "https://api.test/api/contributions/approve";
const REJECT_URL: &str = "https://api.test/api/contributions/reject";

/// 2023-11-14T22:13:20Z
const NOW_MS: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 60 * 60 * 1000;

type TestController = ModerationController<
    MockHttpClient,
    MemoryStore,
    Rc<RefCell<Vec<Notice>>>,
    Rc<RefCell<ModerationState>>,
>;

// =========================================================
// 辅助函数
// =========================================================

struct Fixture {
    controller: TestController,
    http: MockHttpClient,
    notices: Rc<RefCell<Vec<Notice>>>,
}

fn fixed_clock() -> Clock {
    Arc::new(|| {
        DateTime::from_timestamp_millis(NOW_MS)
            .unwrap()
            .fixed_offset()
    })
}

fn fixture() -> Fixture {
    fixture_with(MockHttpClient::new())
}

fn fixture_with(http: MockHttpClient) -> Fixture {
    let notices = Rc::new(RefCell::new(Vec::new()));
    let controller = ModerationController::new(
        ApiClient::new(http.clone(), MemoryStore::new(), "https://api.test"),
        notices.clone(),
        local_cell(ModerationState::default()),
    )
    .with_clock(fixed_clock());
    Fixture {
        controller,
        http,
        notices,
    }
}

fn queue_json() -> Value {
    json!([
        {
            "id": "c1",
            "type": "dictionary",
            "status": "pending",
            "userName": "Ana Tiwiram",
            "data": {"wordShuar": "Nase", "wordSpanish": "Viento", "category": "naturaleza"},
            "createdAt": NOW_MS - HOUR_MS
        },
        {
            "id": "c2",
            "type": "story",
            "status": "pending",
            "userName": "Pedro Ankuash",
            "data": {"title_shuar": "Nunkui", "title_español": "Nunkui"},
            "createdAt": "2023-11-10 08:00:00"
        },
        {
            "id": "c3",
            "type": "dictionary",
            "status": "pending",
            "userName": "Luis",
            "data": {"wordShuar": "Panki", "wordSpanish": "Boa"},
            "createdAt": NOW_MS - 2 * HOUR_MS
        }
    ])
}

fn history_json() -> Value {
    json!([
        {
            "id": "h1",
            "type": "dictionary",
            "status": "approved",
            "data": {"wordShuar": "Yawa"},
            "createdAt": NOW_MS - 48 * HOUR_MS,
            "resolvedAt": NOW_MS - 24 * HOUR_MS
        },
        {
            "id": "h2",
            "type": "story",
            "status": "rejected",
            "data": {"title_shuar": "Etsa"},
            "createdAt": NOW_MS - 48 * HOUR_MS,
            "resolvedAt": NOW_MS - 30 * HOUR_MS
        }
    ])
}

async fn loaded() -> Fixture {
    let f = fixture();
    f.http.mock_envelope(LIST_URL, "COD_OK", queue_json(), "");
    f.http.mock_envelope(HISTORY_URL, "COD_OK", history_json(), "");
    f.controller.load().await;
    f
}

fn ids(state: &ModerationState) -> Vec<&str> {
    state.contributions.iter().map(|c| c.id.as_str()).collect()
}

// =========================================================
// load 测试
// =========================================================

#[tokio::test]
async fn test_load_populates_queue_history_and_stats() {
    let f = loaded().await;
    let state = f.controller.state();

    assert_eq!(ids(&state), ["c1", "c2", "c3"]);
    assert_eq!(state.history.len(), 2);
    assert!(!state.loading);
    assert_eq!(state.stats.pending.count, 3);
    assert_eq!(state.stats.pending.new, 2);
    // 昨天批准 1 个，今天 0 个
    assert_eq!(state.stats.approved_today.count, 0);
    assert_eq!(state.stats.approved_today.percentage, -100);
    assert_eq!(state.stats.rejected.count, 1);

    // 列表先于历史
    let urls: Vec<String> = f.http.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, [LIST_URL, HISTORY_URL]);
}

#[tokio::test]
async fn test_load_skips_history_when_list_fails() {
    let f = fixture();
    f.http.mock_envelope(LIST_URL, "COD_FORBIDDEN", Value::Null, "Sin permisos");
    f.http.mock_envelope(HISTORY_URL, "COD_OK", history_json(), "");

    f.controller.load().await;

    let state = f.controller.state();
    assert!(state.contributions.is_empty());
    assert!(state.history.is_empty());
    assert!(!state.loading);
    assert!(f.http.requests_to(HISTORY_URL).is_empty());
    // 加载失败不弹出通知
    assert!(f.notices.borrow().is_empty());
}

#[tokio::test]
async fn test_load_network_failure_is_absorbed() {
    let f = fixture();
    f.http.mock_network_failure(LIST_URL);

    f.controller.load().await;

    let state = f.controller.state();
    assert!(state.contributions.is_empty());
    assert_eq!(state.stats, ModerationStats::default());
    assert!(f.notices.borrow().is_empty());
}

#[tokio::test]
async fn test_history_failure_keeps_loaded_queue() {
    let f = fixture();
    f.http.mock_envelope(LIST_URL, "COD_OK", queue_json(), "");
    f.http.mock_network_failure(HISTORY_URL);

    f.controller.load().await;

    let state = f.controller.state();
    assert_eq!(ids(&state), ["c1", "c2", "c3"]);
    assert!(state.history.is_empty());
    assert!(!state.loading);
    assert_eq!(state.stats.pending.count, 3);
    assert_eq!(state.stats.pending.new, 2);
    assert_eq!(state.stats.rejected.count, 0);
    assert!(f.notices.borrow().is_empty());
}

#[tokio::test]
async fn test_undecodable_record_is_skipped_not_fatal() {
    let f = fixture();
    let mut queue = queue_json();
    if let Value::Array(items) = &mut queue {
        items.push(json!({
            "id": "c4",
            "type": "dictionary",
            "status": "pending",
            "data": {"wordShuar": "Kuntin"},
            "createdAt": null
        }));
    }
    f.http.mock_envelope(LIST_URL, "COD_OK", queue, "");
    f.http.mock_envelope(HISTORY_URL, "COD_OK", history_json(), "");

    f.controller.load().await;

    let state = f.controller.state();
    assert_eq!(ids(&state), ["c1", "c2", "c3"]);
    assert_eq!(state.stats.pending.count, 3);
    assert_eq!(state.history.len(), 2);
}

// =========================================================
// 筛选与选择
// =========================================================

#[tokio::test]
async fn test_search_and_type_filter() {
    let f = loaded().await;

    f.controller.set_search("ANA");
    let visible: Vec<String> = f.controller.state().visible().iter().map(|c| c.id.clone()).collect();
    assert_eq!(visible, ["c1"]);

    f.controller.set_search("");
    f.controller.set_type_filter(TypeFilter::Story);
    let visible: Vec<String> = f.controller.state().visible().iter().map(|c| c.id.clone()).collect();
    assert_eq!(visible, ["c2"]);
}

#[tokio::test]
async fn test_select_and_deselect() {
    let f = loaded().await;

    f.controller.select(Some("c2".into()));
    assert_eq!(f.controller.state().selected_item().unwrap().data.primary_text(), "Nunkui");

    f.controller.select(None);
    assert!(f.controller.state().selected_item().is_none());
}

// =========================================================
// 审核测试
// =========================================================

#[tokio::test]
async fn test_approve_removes_exactly_one() {
    let f = loaded().await;
    f.http.mock_envelope(APPROVE_URL, "COD_OK", Value::Null, "");
    let before = f.controller.state().stats.pending.count;

    assert!(f.controller.resolve("c2", Resolution::Approve).await);

    let state = f.controller.state();
    assert_eq!(ids(&state), ["c1", "c3"]);
    assert_eq!(state.stats.pending.count, before - 1);
    assert_eq!(f.http.requests_to(APPROVE_URL)[0].json(), json!({"id": "c2"}));
    assert_eq!(f.notices.borrow().last().unwrap().kind, NoticeKind::Success);
}

#[tokio::test]
async fn test_resolved_item_moves_into_history() {
    let f = loaded().await;
    f.http.mock_envelope(APPROVE_URL, "COD_OK", Value::Null, "");

    f.controller.resolve("c1", Resolution::Approve).await;

    let state = f.controller.state();
    let moved = state.history.last().unwrap();
    assert_eq!(moved.id, "c1");
    assert_eq!(moved.status, ContributionStatus::Approved);
    assert_eq!(moved.resolved_at, Some(Timestamp::new(NOW_MS)));
    // 昨天批准 1 个，今天 1 个
    assert_eq!(state.stats.approved_today.count, 1);
    assert_eq!(state.stats.approved_today.percentage, 0);
}

#[tokio::test]
async fn test_reject_clears_selection_of_resolved_item() {
    let f = loaded().await;
    f.http.mock_envelope(REJECT_URL, "COD_OK", Value::Null, "");
    f.controller.select(Some("c3".into()));

    f.controller.resolve("c3", Resolution::Reject).await;

    let state = f.controller.state();
    assert!(state.selected.is_none());
    assert_eq!(state.stats.rejected.count, 2);
}

#[tokio::test]
async fn test_selection_of_other_item_is_kept() {
    let f = loaded().await;
    f.http.mock_envelope(REJECT_URL, "COD_OK", Value::Null, "");
    f.controller.select(Some("c1".into()));

    f.controller.resolve("c3", Resolution::Reject).await;
    assert_eq!(f.controller.state().selected.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_failed_resolution_leaves_state_unchanged() {
    let f = loaded().await;
    f.http.mock_envelope(APPROVE_URL, "COD_NOT_FOUND", Value::Null, "No existe");
    f.controller.select(Some("c1".into()));
    let before = f.controller.state();

    assert!(!f.controller.resolve("c1", Resolution::Approve).await);

    assert_eq!(f.controller.state(), before);
    let notices = f.notices.borrow();
    let last = notices.last().unwrap();
    assert_eq!(last.kind, NoticeKind::Error);
    assert_eq!(last.message, "No existe");
}

#[tokio::test]
async fn test_resolving_unknown_id_is_local_noop() {
    let f = loaded().await;
    f.http.mock_envelope(APPROVE_URL, "COD_OK", Value::Null, "");

    assert!(f.controller.resolve("zzz", Resolution::Approve).await);
    assert_eq!(ids(&f.controller.state()), ["c1", "c2", "c3"]);
}

// =========================================================
// 确认框
// =========================================================

#[tokio::test]
async fn test_network_call_fires_only_on_confirm() {
    let f = loaded().await;
    f.http.mock_envelope(REJECT_URL, "COD_OK", Value::Null, "");

    assert!(f.controller.request_resolution("c1", Resolution::Reject));
    let action = f.controller.state().pending_action.unwrap();
    assert_eq!(action.dialog.tone, Tone::Error);
    assert!(f.http.requests_to(REJECT_URL).is_empty());

    assert!(f.controller.confirm().await);
    assert_eq!(f.http.requests_to(REJECT_URL).len(), 1);
    assert!(f.controller.state().pending_action.is_none());
    assert_eq!(ids(&f.controller.state()), ["c2", "c3"]);
}

#[tokio::test]
async fn test_dismiss_does_not_call_backend() {
    let f = loaded().await;

    f.controller.request_resolution("c1", Resolution::Approve);
    f.controller.dismiss();

    assert!(!f.controller.confirm().await);
    assert!(f.http.requests_to(APPROVE_URL).is_empty());
    assert_eq!(f.controller.state().contributions.len(), 3);
}

#[tokio::test]
async fn test_request_resolution_ignores_missing_item() {
    let f = loaded().await;
    assert!(!f.controller.request_resolution("zzz", Resolution::Approve));
    assert!(f.controller.state().pending_action.is_none());
}

#[tokio::test]
async fn test_cancelled_scope_skips_state_updates() {
    let f = loaded().await;
    f.http.mock_envelope(APPROVE_URL, "COD_OK", Value::Null, "");
    f.controller.scope().cancel();

    assert!(!f.controller.resolve("c1", Resolution::Approve).await);
    assert_eq!(f.controller.state().contributions.len(), 3);
    assert!(f.http.requests_to(APPROVE_URL).is_empty());
}

#[tokio::test]
async fn test_cancel_mid_resolution_releases_busy_flag() {
    let f = fixture_with(MockHttpClient::yielding());
    f.http.mock_envelope(LIST_URL, "COD_OK", queue_json(), "");
    f.http.mock_envelope(HISTORY_URL, "COD_OK", history_json(), "");
    f.http.mock_envelope(APPROVE_URL, "COD_OK", Value::Null, "");
    f.controller.load().await;

    let (resolved, was_busy) = futures::join!(
        f.controller.resolve("c1", Resolution::Approve),
        async {
            let busy = f.controller.state().resolving;
            f.controller.scope().cancel();
            busy
        }
    );

    assert!(was_busy);
    assert!(!resolved);
    let state = f.controller.state();
    assert!(!state.resolving);
    assert_eq!(ids(&state), ["c1", "c2", "c3"]);
    assert!(f.notices.borrow().is_empty());
}
