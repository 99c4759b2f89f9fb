//! Configuration files localized into every container and their docker
//! bind mounts.

use crate::spec::FileMount;

/// Env key listing the container runtime's bind mounts.
pub const DOCKER_MOUNTS_ENV: &str = "YARN_CONTAINER_RUNTIME_DOCKER_MOUNTS";

/// Directory YARN localizes `STATIC` files into, relative to the container
/// working directory.
const LOCALIZED_DIR: &str = "resources";

/// Host identity files every container mounts read-only.
const HOST_IDENTITY_MOUNTS: [&str; 2] = ["/etc/passwd:/etc/passwd:ro", "/etc/group:/etc/group:ro"];

/// (file name, bind target inside the container)
const HADOOP_CONFIGS: [(&str, &str); 2] = [
    ("core-site.xml", "/etc/hadoop/conf/core-site.xml"),
    ("hdfs-site.xml", "/etc/hadoop/conf/hdfs-site.xml"),
];
const KERBEROS_CONFIG: (&str, &str) = ("krb5.conf", "/etc/krb5.conf");

/// Build the file list: core-site, hdfs-site, then krb5 when Kerberos is on.
pub fn compose_file_mounts(remote_conf_path: &str, include_kerberos: bool) -> Vec<FileMount> {
    let base = remote_conf_path.trim_end_matches('/');

    let mut files: Vec<(&str, &str)> = HADOOP_CONFIGS.to_vec();
    if include_kerberos {
        files.push(KERBEROS_CONFIG);
    }

    files
        .into_iter()
        .map(|(name, target)| {
            FileMount::static_file(format!("{}/configs/{}", base, name), name.to_string())
                .with_mount_target(target)
        })
        .collect()
}

/// Docker mount entries (`src:dest:ro`) for the composed files followed by the
/// host identity mounts.
pub fn docker_mount_entries(files: &[FileMount]) -> Vec<String> {
    files
        .iter()
        .filter_map(|f| {
            f.mount_target
                .as_ref()
                .map(|target| format!("{}/{}:{}:ro", LOCALIZED_DIR, f.dest_file, target))
        })
        .chain(HOST_IDENTITY_MOUNTS.iter().map(|m| m.to_string()))
        .collect()
}
