use std::collections::HashMap;
use std::sync::Arc;

use hydrosync_api::{MacAddress, State, StatePatch, StateUpdate};
use serde::{Deserialize, Serialize};

use crate::errors::StateError;
use crate::repositories::DeviceRepository;

/// What to do with a partial state whose sensor pin has no record yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Append a new record, filling missing fields with defaults.
    #[default]
    CreateMissing,
    /// Reject the whole batch without writing anything.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub created: usize,
}

/// Merge `patches` into `states` in order, keyed by sensor pin.
pub fn merge_patches(
    states: &mut Vec<State>,
    patches: &[StatePatch],
    policy: MergePolicy,
) -> Result<MergeSummary, StateError> {
    let mut index: HashMap<u8, usize> = HashMap::with_capacity(states.len());
    for (position, state) in states.iter().enumerate() {
        index.entry(state.sensor.pin).or_insert(position);
    }

    if policy == MergePolicy::Strict {
        if let Some(patch) = patches.iter().find(|p| !index.contains_key(&p.sensor_pin)) {
            return Err(StateError::UnmatchedPin(patch.sensor_pin));
        }
    }

    let mut summary = MergeSummary::default();

    for patch in patches {
        match index.get(&patch.sensor_pin) {
            Some(&position) => {
                states[position].apply(patch);
                summary.updated += 1;
            }
            None => {
                index.insert(patch.sensor_pin, states.len());
                states.push(State::from_patch(patch));
                summary.created += 1;
            }
        }
    }

    Ok(summary)
}

/// Reconciles partial states from clients and devices into stored records.
pub struct StateService {
    device_repository: Arc<DeviceRepository>,
    policy: MergePolicy,
}

impl StateService {
    pub fn new(device_repository: Arc<DeviceRepository>, policy: MergePolicy) -> Self {
        Self {
            device_repository,
            policy,
        }
    }

    pub async fn apply_partial_states(
        &self,
        mac: &MacAddress,
        update: StateUpdate,
    ) -> Result<MergeSummary, StateError> {
        let source = update.source();
        let patches = update.into_patches();
        let policy = self.policy;
        let mut summary = MergeSummary::default();

        let found = self
            .device_repository
            .update_states(mac.as_str(), |states| {
                summary = merge_patches(states, &patches, policy)?;
                Ok::<_, StateError>(())
            })
            .await?;

        if !found {
            tracing::warn!(%mac, ?source, "state update for unknown device");
            return Err(StateError::UnknownDevice);
        }

        tracing::debug!(
            %mac,
            ?source,
            batch = patches.len(),
            updated = summary.updated,
            created = summary.created,
            "states merged"
        );

        Ok(summary)
    }
}
