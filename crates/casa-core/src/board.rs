// ── Device board ──
//
// A local view of one device family with optimistic updates: the new
// state is applied before the backend confirms and rolled back if it
// refuses.

use tracing::warn;

use crate::casa::Casa;
use crate::error::CoreError;
use crate::model::{Device, DeviceKind};

#[derive(Debug, Clone)]
pub struct DeviceBoard {
    kind: DeviceKind,
    devices: Vec<Device>,
}

impl DeviceBoard {
    pub fn new(kind: DeviceKind, devices: Vec<Device>) -> Self {
        Self { kind, devices }
    }

    pub async fn load(casa: &Casa, kind: DeviceKind) -> Result<Self, CoreError> {
        Ok(Self::new(kind, casa.list_devices(kind).await?))
    }

    pub fn get(&self, id: i64) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Set `id` to `state`, optimistically. On failure the previous state
    /// is restored and the error returned.
    pub async fn set_state(&mut self, casa: &Casa, id: i64, state: bool) -> Result<(), CoreError> {
        let index = self.index_of(id)?;
        let previous = self.devices[index].state;
        self.devices[index].state = state;

        if let Err(err) = casa.set_device_state(self.kind, id, state).await {
            warn!(kind = %self.kind, id, error = %err, "state change refused, rolling back");
            self.devices[index].state = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Flip `id`. Returns the new state.
    pub async fn toggle(&mut self, casa: &Casa, id: i64) -> Result<bool, CoreError> {
        let target = !self.devices[self.index_of(id)?].state;
        self.set_state(casa, id, target).await?;
        Ok(target)
    }

    fn index_of(&self, id: i64) -> Result<usize, CoreError> {
        self.devices
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: self.kind.to_string(),
                identifier: id.to_string(),
            })
    }
}
