use pretty_assertions::assert_eq;
use serde_json::Value;
use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use yarn_tf_submit::spec::JobSpec;
use yarn_tf_submit::submit::{JobHandle, SubmitError, Submitter};
use yarn_tf_submit::topology::TopologyDescriptor;
use yarn_tf_submit::{Outcome, RunParams, TransformError, execute};

fn demo_spec() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/distributed-tf.json")
}

fn distributed_params() -> RunParams {
    let mut p = RunParams::new("hdfs:///user/alice/tf");
    p.docker_image = Some("tf-gpu:1.8".to_string());
    p.user = Some("alice".to_string());
    p.domain = Some("example.com".to_string());
    p.distributed = true;
    p
}

fn render(params: &RunParams) -> Value {
    match execute(demo_spec(), params, None).unwrap() {
        Outcome::Rendered(text) => serde_json::from_str(&text).unwrap(),
        Outcome::Submitted(_) => panic!("nothing should be submitted"),
    }
}

#[test]
fn distributed_spec_gets_tf_config() {
    let out = render(&distributed_params());

    let tf = out["configuration"]["env"]["TF_CONFIG"].as_str().unwrap();
    let d: TopologyDescriptor = serde_json::from_str(tf).unwrap();
    assert_eq!(
        d.cluster.worker,
        vec![
            "worker-0.distributed-tf.alice.example.com:8000",
            "worker-1.distributed-tf.alice.example.com:8000",
        ]
    );
    assert_eq!(d.cluster.ps, vec!["ps-0.distributed-tf.alice.example.com:8000"]);
    assert_eq!(d.cluster.master, vec!["master-0.distributed-tf.alice.example.com:8000"]);
}

#[test]
fn output_is_annotated_and_keeps_input_layout() {
    let out = render(&distributed_params());

    let top: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(top, vec!["name", "version", "components", "configuration", "kerberos_principal"]);

    let master = &out["components"][0];
    let keys: Vec<&str> = master.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["name", "dependencies", "resource", "launch_command", "number_of_containers", "artifact"]
    );
    assert_eq!(
        master["launch_command"],
        ". resources/presetup-tf.sh && python /test/tensorflow/tf_cnn_benchmarks.py --job_name=master --num-gpus=0"
    );
    assert_eq!(master["artifact"]["id"], "tf-gpu:1.8");
    assert_eq!(master["artifact"]["type"], "DOCKER");
    assert_eq!(master["resource"]["memory"], "4096");

    let env = out["configuration"]["env"].as_object().unwrap();
    let env_keys: Vec<&str> = env.keys().map(String::as_str).collect();
    assert_eq!(
        env_keys,
        vec!["HADOOP_CONF_DIR", "YARN_CONTAINER_RUNTIME_DOCKER_MOUNTS", "TF_CONFIG"]
    );
    assert_eq!(
        env["YARN_CONTAINER_RUNTIME_DOCKER_MOUNTS"],
        "/data:/data:ro,\
         resources/core-site.xml:/etc/hadoop/conf/core-site.xml:ro,\
         resources/hdfs-site.xml:/etc/hadoop/conf/hdfs-site.xml:ro,\
         /etc/passwd:/etc/passwd:ro,/etc/group:/etc/group:ro"
    );

    assert_eq!(
        out["configuration"]["files"],
        serde_json::json!([
            {
                "type": "STATIC",
                "dest_file": "core-site.xml",
                "src_file": "hdfs:///user/alice/tf/configs/core-site.xml"
            },
            {
                "type": "STATIC",
                "dest_file": "hdfs-site.xml",
                "src_file": "hdfs:///user/alice/tf/configs/hdfs-site.xml"
            }
        ])
    );
}

#[test]
fn gpu_and_kerberos_are_applied() {
    let mut p = distributed_params();
    p.gpu = 2;
    p.kerberos = true;
    let out = render(&p);

    for c in out["components"].as_array().unwrap() {
        assert_eq!(c["resource"]["additional"]["yarn.io/gpu"]["value"], 2);
    }
    let files = out["configuration"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[2]["dest_file"], "krb5.conf");
}

#[test]
fn missing_components_produce_no_output() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"{{ "name": "tf", "components": [
            {{ "name": "master", "number_of_containers": 1, "launch_command": "x" }},
            {{ "name": "worker", "number_of_containers": 1, "launch_command": "x" }}
        ] }}"#
    )
    .unwrap();

    let err = execute(f.path(), &distributed_params(), None).unwrap_err();
    assert!(matches!(err, TransformError::InvalidTopology(_)));
}

#[test]
fn missing_image_is_reported() {
    let mut p = distributed_params();
    p.docker_image = None;
    let err = execute(demo_spec(), &p, None).unwrap_err();
    match err {
        TransformError::MissingArtifact { component } => assert_eq!(component, "master"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_input_error() {
    let err = execute("/no/such/spec.json", &distributed_params(), None).unwrap_err();
    assert!(err.is_input_error());
}

struct RecordingSubmitter {
    calls: Cell<usize>,
}

impl Submitter for RecordingSubmitter {
    fn submit(&self, spec: &JobSpec, timeout: Duration) -> Result<JobHandle, SubmitError> {
        self.calls.set(self.calls.get() + 1);
        assert!(spec.configuration.env.contains_key("TF_CONFIG"));
        assert_eq!(timeout, Duration::from_secs(60));
        Ok(JobHandle {
            name: spec.name.clone(),
        })
    }
}

struct RejectingSubmitter;

impl Submitter for RejectingSubmitter {
    fn submit(&self, spec: &JobSpec, _timeout: Duration) -> Result<JobHandle, SubmitError> {
        Err(SubmitError::Rejected {
            name: spec.name.clone(),
            reason: "queue is full".to_string(),
        })
    }
}

#[test]
fn submitter_is_called_once_with_finished_spec() {
    let submitter = RecordingSubmitter { calls: Cell::new(0) };
    let outcome = execute(demo_spec(), &distributed_params(), Some(&submitter as &dyn Submitter)).unwrap();

    assert_eq!(submitter.calls.get(), 1);
    match outcome {
        Outcome::Submitted(handle) => assert_eq!(handle.name, "distributed-tf"),
        Outcome::Rendered(_) => panic!("expected a submission"),
    }
}

#[test]
fn submitter_is_not_called_when_transformation_fails() {
    let submitter = RecordingSubmitter { calls: Cell::new(0) };
    let mut p = distributed_params();
    p.domain = None;

    assert!(execute(demo_spec(), &p, Some(&submitter as &dyn Submitter)).is_err());
    assert_eq!(submitter.calls.get(), 0);
}

#[test]
fn rejected_submission_surfaces_as_error() {
    let err = execute(demo_spec(), &distributed_params(), Some(&RejectingSubmitter as &dyn Submitter)).unwrap_err();
    assert!(matches!(err, TransformError::Submit(SubmitError::Rejected { .. })));
}
