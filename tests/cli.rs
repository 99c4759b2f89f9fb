use clap::Parser;
use yarn_tf_submit::cli::GenerateTfConfigCli;
use yarn_tf_submit::topology::TopologyDescriptor;
use yarn_tf_submit::{Cli, TransformError};

#[test]
fn cli_parses_distributed_flags() {
    let cli = Cli::parse_from([
        "submit-tf-job",
        "--remote-conf-path",
        "hdfs:///user/alice/tf",
        "--input-spec",
        "spec.json",
        "--docker-image",
        "tf:1.8",
        "--env",
        "A=1,B=2",
        "--user",
        "alice",
        "--domain",
        "example.com",
        "--gpu",
        "2",
        "--distributed",
        "--kerberos",
    ]);

    assert!(cli.distributed);
    assert!(cli.kerberos);
    assert!(!cli.submit);

    let params = cli.run_params().unwrap();
    assert_eq!(params.gpu, 2);
    assert_eq!(params.user.as_deref(), Some("alice"));
    assert_eq!(params.env_overrides.len(), 2);
    assert_eq!(params.port, 8000);
    assert_eq!(params.setup_script, "resources/presetup-tf.sh");
}

#[test]
fn cli_accepts_underscore_aliases() {
    let cli = Cli::parse_from([
        "submit-tf-job",
        "--remote_conf_path",
        "/conf",
        "--input_spec",
        "spec.json",
        "--job_name",
        "renamed",
    ]);
    assert_eq!(cli.remote_conf_path, "/conf");
    assert_eq!(cli.job_name.as_deref(), Some("renamed"));
}

#[test]
fn cli_requires_remote_path_and_spec() {
    assert!(Cli::try_parse_from(["submit-tf-job", "--input-spec", "s.json"]).is_err());
    assert!(Cli::try_parse_from(["submit-tf-job", "--remote-conf-path", "/c"]).is_err());
}

#[test]
fn malformed_env_is_rejected_while_resolving_params() {
    let cli = Cli::parse_from([
        "submit-tf-job",
        "--remote-conf-path",
        "/c",
        "--input-spec",
        "s.json",
        "--env",
        "A=1,JUSTAKEY",
    ]);
    match cli.run_params() {
        Err(TransformError::MalformedEnvEntry { entry }) => assert_eq!(entry, "JUSTAKEY"),
        other => panic!("unexpected result: {:?}", other.map(|p| p.env_overrides)),
    }
}

#[test]
fn generate_tf_config_prints_env_entry() {
    let cli = GenerateTfConfigCli::parse_from([
        "generate-tf-config",
        "alice",
        "example.com",
        "distributed-tf",
        "2",
        "1",
    ]);
    let entry = cli.env_entry().unwrap();

    let wrapped: serde_json::Value = serde_json::from_str(&format!("{{{}}}", entry)).unwrap();
    let d: TopologyDescriptor =
        serde_json::from_str(wrapped["TF_CONFIG"].as_str().unwrap()).unwrap();
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
fn generate_tf_config_rejects_negative_counts() {
    let cli = GenerateTfConfigCli::parse_from([
        "generate-tf-config",
        "alice",
        "example.com",
        "tf",
        "-1",
        "0",
    ]);
    assert!(matches!(cli.env_entry(), Err(TransformError::InvalidTopology(_))));
}
