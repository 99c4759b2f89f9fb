//! Job spec (Yarnfile) shape.
//!
//! JSON shape:
//! {
//!   "name": "distributed-tf",
//!   "components": [
//!     {
//!       "name": "worker",
//!       "number_of_containers": 2,
//!       "launch_command": "python train.py",
//!       "artifact": { "id": "tf-image:1.8", "type": "DOCKER" },
//!       "resource": { "cpus": 1, "memory": "4096" }
//!     }
//!   ],
//!   "configuration": {
//!     "env": { "KEY": "value" },
//!     "files": [ { "type": "STATIC", "dest_file": "...", "src_file": "..." } ]
//!   }
//! }
//!
//! Only the fields the transformer touches are typed. Everything else is kept
//! in `extra` so it round-trips to the output untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource key YARN uses for GPU requests.
pub const GPU_RESOURCE: &str = "yarn.io/gpu";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub configuration: Configuration,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,

    /// Signed so a bad count reaches topology validation instead of failing
    /// at parse time.
    #[serde(default)]
    pub number_of_containers: i64,

    #[serde(default)]
    pub launch_command: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,

    /// Kept as `None` only when the input had no `resource` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Artifact {
    pub fn docker(image: &str) -> Self {
        Self {
            id: image.to_string(),
            kind: Some("DOCKER".to_string()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Custom resource requests, e.g. `yarn.io/gpu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// Request `count` GPUs per container, keeping other custom resources.
    pub fn set_gpu(&mut self, count: u32) {
        let mut request = Map::new();
        request.insert("value".to_string(), Value::from(count));
        self.additional
            .get_or_insert_with(Map::new)
            .insert(GPU_RESOURCE.to_string(), Value::Object(request));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Container environment. Values are normally strings; anything else
    /// from the input is passed through as-is.
    #[serde(default)]
    pub env: Map<String, Value>,

    #[serde(default)]
    pub files: Vec<FileMount>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A file localized into every container.
///
/// Input entries are replaced wholesale, so every field is optional on the
/// way in; `HADOOP_XML`/`TEMPLATE` entries carry `properties` instead of a
/// `src_file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMount {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub dest_file: String,

    #[serde(default)]
    pub src_file: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Where the localized file is bind-mounted inside the container.
    /// Not part of the wire format.
    #[serde(skip)]
    pub mount_target: Option<String>,
}

impl FileMount {
    pub fn static_file(src_file: String, dest_file: String) -> Self {
        Self {
            kind: "STATIC".to_string(),
            dest_file,
            src_file,
            extra: Map::new(),
            mount_target: None,
        }
    }

    pub fn with_mount_target(mut self, target: impl Into<String>) -> Self {
        self.mount_target = Some(target.into());
        self
    }
}

impl JobSpec {
    /// Env value as a string, if present and a string.
    pub fn env_str(&self, key: &str) -> Option<&str> {
        self.configuration.env.get(key).and_then(Value::as_str)
    }
}
