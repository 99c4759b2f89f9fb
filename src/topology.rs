//! `TF_CONFIG` topology descriptor.
//!
//! Shape (before it is encoded into the env map as a string):
//! {
//!   "cluster": {
//!     "master": ["master-0.<service>.<user>.<domain>:8000"],
//!     "ps":     ["ps-0.<service>.<user>.<domain>:8000", ...],
//!     "worker": ["worker-0.<service>.<user>.<domain>:8000", ...]
//!   },
//!   "task": { "type": "${COMPONENT_NAME}", "index": "${COMPONENT_ID}" },
//!   "environment": "cloud"
//! }
//!
//! The `${...}` tokens are expanded by the container runtime per container,
//! never by this tool.

use crate::error::{Result, TransformError};
use crate::spec::Component;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Env key the descriptor is stored under.
pub const TF_CONFIG: &str = "TF_CONFIG";

pub const DEFAULT_PORT: u16 = 8000;

pub const MASTER: &str = "master";
pub const PS: &str = "ps";
pub const WORKER: &str = "worker";

const COMPONENT_NAME_TOKEN: &str = "${COMPONENT_NAME}";
const COMPONENT_ID_TOKEN: &str = "${COMPONENT_ID}";
const ENVIRONMENT: &str = "cloud";

/// Role name to container count.
pub type ComponentCounts = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyDescriptor {
    pub cluster: ClusterHosts,
    pub task: TaskRef,
    pub environment: String,
}

/// Field order is the serialized role order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHosts {
    pub master: Vec<String>,
    pub ps: Vec<String>,
    pub worker: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub index: String,
}

/// Where the job's containers are reachable through registry DNS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAddress<'a> {
    pub service: &'a str,
    pub user: &'a str,
    pub domain: &'a str,
    pub port: u16,
}

impl ServiceAddress<'_> {
    fn hosts(&self, role: &str, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                format!(
                    "{}-{}.{}.{}.{}:{}",
                    role, i, self.service, self.user, self.domain, self.port
                )
            })
            .collect()
    }
}

impl TopologyDescriptor {
    /// Encode as compact JSON for the env map.
    ///
    /// The outer document's serializer escapes the quotes when the spec is
    /// written, so no manual escaping happens here.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(TransformError::Encode)
    }

    /// `"TF_CONFIG": "<encoded>"`, the descriptor as one env map entry.
    pub fn env_entry(&self) -> Result<String> {
        let value = serde_json::to_string(&self.encode()?).map_err(TransformError::Encode)?;
        Ok(format!("\"{}\": {}", TF_CONFIG, value))
    }
}

/// Collect per-role container counts from the spec's components.
///
/// A special role appearing in more than one component is rejected, since the
/// descriptor can only describe one group per role.
pub fn component_counts(components: &[Component]) -> Result<ComponentCounts> {
    let mut counts = ComponentCounts::new();
    for c in components {
        let special = matches!(c.name.as_str(), MASTER | PS | WORKER);
        if counts.insert(c.name.clone(), c.number_of_containers).is_some() && special {
            return Err(TransformError::invalid_topology(format!(
                "component '{}' is declared more than once",
                c.name
            )));
        }
    }
    Ok(counts)
}

/// Build the topology descriptor for `addr` from per-role counts.
pub fn build_topology(addr: &ServiceAddress<'_>, counts: &ComponentCounts) -> Result<TopologyDescriptor> {
    if addr.user.trim().is_empty() {
        return Err(TransformError::invalid_topology(
            "empty user name, please double check --user",
        ));
    }
    if addr.domain.trim().is_empty() {
        return Err(TransformError::invalid_topology(
            "empty domain name, please double check --domain",
        ));
    }

    let master = counts.get(MASTER).copied();
    if master != Some(1) {
        return Err(TransformError::invalid_topology(format!(
            "master's number_of_containers must be equal to 1 (found {})",
            describe(master)
        )));
    }
    let ps = role_count(counts, PS)?;
    let worker = role_count(counts, WORKER)?;

    debug!(
        service = addr.service,
        ps, worker, "building {} descriptor", TF_CONFIG
    );

    Ok(TopologyDescriptor {
        cluster: ClusterHosts {
            master: addr.hosts(MASTER, 1),
            ps: addr.hosts(PS, ps),
            worker: addr.hosts(WORKER, worker),
        },
        task: TaskRef {
            kind: COMPONENT_NAME_TOKEN.to_string(),
            index: COMPONENT_ID_TOKEN.to_string(),
        },
        environment: ENVIRONMENT.to_string(),
    })
}

fn role_count(counts: &ComponentCounts, role: &str) -> Result<usize> {
    match counts.get(role).copied() {
        Some(n) if n >= 0 => usize::try_from(n).map_err(|_| {
            TransformError::invalid_topology(format!("{} count {} is too large", role, n))
        }),
        other => Err(TransformError::invalid_topology(format!(
            "spec should include worker/ps/master with non-negative number_of_containers \
             ({} has {})",
            role,
            describe(other)
        ))),
    }
}

fn describe(count: Option<i64>) -> String {
    count.map_or_else(|| "none".to_string(), |n| n.to_string())
}
