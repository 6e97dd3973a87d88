use crate::date_key::DateKey;
use crate::errors::ChecklistError;
use crate::models::ListResponse;
use crate::session::Session;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Checklist {
    pub store: Store,
    pub session: Session,
}

impl Checklist {
    pub async fn open(mut store: Store, date: DateKey) -> Result<Self, ChecklistError> {
        let session = Session::open(&mut store, date).await?;
        Ok(Self { store, session })
    }

    pub fn snapshot(&self) -> ListResponse {
        ListResponse {
            is_today: *self.session.date() == DateKey::today(),
            date: self.session.date().clone(),
            tasks: self.session.tasks().to_vec(),
            dates: self.store.list_date_keys(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub checklist: Arc<Mutex<Checklist>>,
}

impl AppState {
    pub fn new(checklist: Checklist) -> Self {
        Self {
            checklist: Arc::new(Mutex::new(checklist)),
        }
    }
}
