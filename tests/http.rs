use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TaskView {
    id: String,
    text: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    date: String,
    is_today: bool,
    tasks: Vec<TaskView>,
    dates: Vec<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daily_checklist_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/list")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_daily_checklist"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_list(client: &Client, base_url: &str, path: &str) -> ListResponse {
    client
        .get(format!("{base_url}{path}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn texts(list: &ListResponse) -> Vec<&str> {
    list.tasks.iter().map(|task| task.text.as_str()).collect()
}

#[tokio::test]
async fn http_today_is_seeded_and_listed() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = fetch_list(&client, &server.base_url, "/api/today").await;
    assert!(today.is_today);
    assert!(!today.date.is_empty());
    assert!(today.tasks.len() >= 5);
    assert!(today.dates.contains(&today.date));

    let dates: Vec<String> = client
        .get(format!("{}/api/dates", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(dates.contains(&today.date));

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Daily Checklist"));
}

#[tokio::test]
async fn http_add_toggle_and_delete_by_id() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let before = fetch_list(&client, &server.base_url, "/api/today").await;

    let added: ListResponse = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "text": "  fold towels  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(added.tasks.len(), before.tasks.len() + 1);
    let new_task = added.tasks.last().unwrap();
    assert_eq!(new_task.text, "fold towels");
    assert!(!new_task.done);
    let id = new_task.id.clone();

    let toggled: ListResponse = client
        .post(format!("{}/api/tasks/{id}/toggle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.tasks.iter().any(|task| task.id == id && task.done));

    let deleted: ListResponse = client
        .delete(format!("{}/api/tasks/{id}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(texts(&deleted), texts(&before));

    let stale = client
        .post(format!("{}/api/tasks/{id}/toggle", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(stale.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_blank_task_is_ignored() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let before = fetch_list(&client, &server.base_url, "/api/today").await;

    let after: ListResponse = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(texts(&after), texts(&before));
}

#[tokio::test]
async fn http_move_and_reorder() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let before = fetch_list(&client, &server.base_url, "/api/today").await;
    let first = before.tasks[0].id.clone();

    let moved: ListResponse = client
        .post(format!("{}/api/tasks/{first}/move", server.base_url))
        .json(&serde_json::json!({ "to": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(moved.tasks[2].id, first);
    assert_eq!(moved.tasks[0].text, before.tasks[1].text);

    let restored_order: Vec<&str> = before.tasks.iter().map(|task| task.id.as_str()).collect();
    let restored: ListResponse = client
        .put(format!("{}/api/order", server.base_url))
        .json(&serde_json::json!({ "order": restored_order }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(texts(&restored), texts(&before));

    let partial = client
        .put(format!("{}/api/order", server.base_url))
        .json(&serde_json::json!({ "order": [first] }))
        .send()
        .await
        .unwrap();
    assert_eq!(partial.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_select_past_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let selected: ListResponse = client
        .post(format!("{}/api/select", server.base_url))
        .json(&serde_json::json!({ "date": "Thursday (1/1/2026)" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(selected.date, "Thursday (1/1/2026)");
    assert!(!selected.is_today);
    assert_eq!(selected.tasks.len(), 5);
    assert!(selected.dates.contains(&selected.date));

    let blank = client
        .post(format!("{}/api/select", server.base_url))
        .json(&serde_json::json!({ "date": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), reqwest::StatusCode::BAD_REQUEST);

    let today = fetch_list(&client, &server.base_url, "/api/today").await;
    assert!(today.is_today);
}
