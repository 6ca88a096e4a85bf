//! Stateful controls encoded in action ids.
//!
//! A [`StateDescriptor`] pairs a host component with named controls. Each
//! control gets an action id under the host's prefix:
//!
//! ```text
//! state:{host id}.{field}                    plain control
//! state:{host id}.{field}_{options id}       control fed by an options component
//! ```
//!
//! The registry routes anything under `state:{host id}.` back to the host, and
//! [`StateDescriptor::decode`] reads the controls' current values from the
//! view state of the next inbound event.

mod control;

pub use control::{Control, ControlKind};

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::element::Component;
use crate::identity::IdentityTable;

/// Errors in the stateful-control protocol.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("id is missing in the host component '{component}' of a state descriptor")]
    MissingHostId { component: String },

    #[error("options component '{component}' of field '{field}' has no id")]
    MissingOptionsId { component: String, field: String },

    #[error("action id '{action_id}' appears in more than one state block")]
    DuplicateActionId { action_id: String },

    #[error("unknown control kind '{0}'")]
    UnknownControl(String),
}

/// Prefix shared by every control a host emits.
pub fn state_prefix(host_id: &str) -> String {
    format!("state:{host_id}.")
}

/// Action id of one control.
pub fn control_action_id(host_id: &str, field: &str, options_id: Option<&str>) -> String {
    match options_id {
        Some(options_id) => format!("state:{host_id}.{field}_{options_id}"),
        None => format!("state:{host_id}.{field}"),
    }
}

/// Merge `{block_id: {action_id: value}}` into `{action_id: value}`.
///
/// Action ids only need to be unique within a block, so repeats are normal
/// (one checkbox per row). A repeat under `prefix` means one host rendered
/// two controls with the same id and is an error; other repeats keep the
/// first value seen.
pub fn flatten_state_values(
    values: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, StateError> {
    let mut flat = Map::new();
    for block in values.values() {
        let Some(actions) = block.as_object() else {
            continue;
        };
        for (action_id, value) in actions {
            if !flat.contains_key(action_id) {
                flat.insert(action_id.clone(), value.clone());
            } else if action_id.starts_with(prefix) {
                return Err(StateError::DuplicateActionId {
                    action_id: action_id.clone(),
                });
            }
        }
    }
    Ok(flat)
}

/// A host component and its named controls.
#[derive(Debug, Clone)]
pub struct StateDescriptor {
    host: Component,
    fields: Vec<(String, Control)>,
}

impl StateDescriptor {
    pub fn new(host: &Component) -> Self {
        Self {
            host: host.clone(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, control: impl Into<Control>) -> Self {
        let key = key.into();
        let control = control.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = control,
            None => self.fields.push((key, control)),
        }
        self
    }

    pub fn host(&self) -> &Component {
        &self.host
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Control)> {
        self.fields.iter().map(|(key, control)| (key.as_str(), control))
    }

    fn host_id(&self, identities: &IdentityTable) -> Result<String, StateError> {
        identities
            .id_of(&self.host)
            .ok_or_else(|| StateError::MissingHostId {
                component: self.host.name().to_string(),
            })
    }

    /// Field → action id for every control.
    pub fn action_ids(
        &self,
        identities: &IdentityTable,
    ) -> Result<BTreeMap<String, String>, StateError> {
        let host_id = self.host_id(identities)?;
        self.fields
            .iter()
            .map(|(key, control)| {
                let options_id = match control.options() {
                    Some(options) => Some(identities.id_of(options).ok_or_else(|| {
                        StateError::MissingOptionsId {
                            component: options.name().to_string(),
                            field: key.clone(),
                        }
                    })?),
                    None => None,
                };
                let action_id = control_action_id(&host_id, key, options_id.as_deref());
                Ok((key.clone(), action_id))
            })
            .collect()
    }

    /// Read every control's value from nested view-state values.
    ///
    /// Controls absent from the state, or holding `null`, decode as absent.
    pub fn decode(
        &self,
        identities: &IdentityTable,
        values: Option<&Map<String, Value>>,
    ) -> Result<State, StateError> {
        let host_id = self.host_id(identities)?;
        let action_ids = self.action_ids(identities)?;
        let flat = match values {
            Some(values) => flatten_state_values(values, &state_prefix(&host_id))?,
            None => Map::new(),
        };

        let mut decoded = BTreeMap::new();
        for (key, control) in &self.fields {
            let value = action_ids
                .get(key)
                .and_then(|action_id| flat.get(action_id))
                .and_then(|entry| entry.get(control.kind().value_field()))
                .filter(|value| !value.is_null());
            if let Some(value) = value {
                decoded.insert(key.clone(), value.clone());
            }
        }

        Ok(State {
            values: decoded,
            action_ids,
        })
    }
}

/// Decoded control values plus the action ids that address them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    values: BTreeMap<String, Value>,
    action_ids: BTreeMap<String, String>,
}

impl State {
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Deserialize a field's value; absent or mismatched values are `None`.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.values
            .get(field)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// The action id to put on the control rendering `field`.
    pub fn action_id(&self, field: &str) -> Option<&str> {
        self.action_ids.get(field).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn action_ids(&self) -> &BTreeMap<String, String> {
        &self.action_ids
    }
}

/// A selected option as reported in view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}
