//! Simulated e-mail. Nothing is delivered: messages end up in the internal
//! `log` table (operation `notify`) or in memory.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::UserRole;
use std::cell::RefCell;

pub const NOTIFY_OPERATION: &str = "notify";

pub trait Notifier {
    fn notify(&self, recipient: UserRole, message: &str);
}

/// Drops messages; the access layer already traces them.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _recipient: UserRole, _message: &str) {}
}

/// Appends each message to the SQLite `log` table.
pub struct LogTableNotifier {
    pool: DbPool,
}

impl LogTableNotifier {
    /// Expects a database already initialized by `init_db`.
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }
}

impl Notifier for LogTableNotifier {
    fn notify(&self, recipient: UserRole, message: &str) {
        // non bloccante: a failed log write never fails the workflow
        if let Err(e) = ttlog(&self.pool.conn, NOTIFY_OPERATION, recipient.as_str(), message) {
            tracing::warn!(error = %e, "failed to record notification");
        }
    }
}

/// Keeps messages in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: RefCell<Vec<(UserRole, String)>>,
}

impl MemoryNotifier {
    pub fn sent(&self) -> Vec<(UserRole, String)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, recipient: UserRole, message: &str) {
        self.sent.borrow_mut().push((recipient, message.to_string()));
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, recipient: UserRole, message: &str) {
        (**self).notify(recipient, message)
    }
}
