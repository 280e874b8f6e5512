use super::Connection;

/// RAII guard: disconnects the wrapped [`Connection`] exactly once when dropped.
///
/// Move-only. Moving a guard moves the responsibility with it; the moved-from
/// binding is never dropped, so there is no double disconnect.
#[derive(Debug, Default)]
#[must_use = "dropping a ScopedConnection disconnects it immediately"]
pub struct ScopedConnection {
    inner: Option<Connection>,
}

impl ScopedConnection {
    pub fn new(connection: Connection) -> Self {
        Self {
            inner: Some(connection),
        }
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.inner.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.as_ref().is_some_and(Connection::is_connected)
    }

    /// Give up ownership without disconnecting.
    pub fn release(mut self) -> Connection {
        self.inner.take().unwrap_or_default()
    }
}

impl From<Connection> for ScopedConnection {
    fn from(connection: Connection) -> Self {
        Self::new(connection)
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        if let Some(connection) = self.inner.take() {
            connection.disconnect();
        }
    }
}
