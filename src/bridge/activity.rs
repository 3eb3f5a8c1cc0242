//! Ambient correlation/activity state

use parking_lot::RwLock;
use uuid::Uuid;

/// Accessor for the ambient correlation identifier read at intake time.
///
/// Injected into the bridge so tests can supply deterministic values
/// instead of the process-wide state.
pub trait ActivitySource: Send + Sync {
    fn activity_id(&self) -> Uuid;
}

static CURRENT_ACTIVITY: RwLock<Uuid> = RwLock::new(Uuid::nil());

/// Process-wide correlation state; the default [`ActivitySource`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CorrelationManager;

impl CorrelationManager {
    /// Set the ambient activity identifier for subsequent intake calls
    pub fn set_activity_id(id: Uuid) {
        *CURRENT_ACTIVITY.write() = id;
    }

    /// Reset the ambient activity identifier to nil
    pub fn clear() {
        *CURRENT_ACTIVITY.write() = Uuid::nil();
    }
}

impl ActivitySource for CorrelationManager {
    fn activity_id(&self) -> Uuid {
        *CURRENT_ACTIVITY.read()
    }
}

/// Fixed activity identifier, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedActivity(pub Uuid);

impl ActivitySource for FixedActivity {
    fn activity_id(&self) -> Uuid {
        self.0
    }
}
