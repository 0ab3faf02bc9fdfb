//! Backup-swap deployment over SSH.
//!
//! Stage 4 of the mdblog pipeline. Uploads the site archive to a staging
//! directory on the remote host, then swaps it into place under elevated
//! privilege:
//!
//! 1. delete the previous backup directory
//! 2. rename the live directory to the backup name
//! 3. move the uploaded archive into the web root
//! 4. unpack it there
//! 5. rename the unpacked directory (the archive alias) to the live name
//! 6. delete the unpacked archive file
//!
//! The swap is not transactional: a failure after step 2 and before step 5
//! leaves no live directory, and nothing here rolls back or retries.
//! Recovery is manual; the backup directory still holds the previous
//! version. Each step is a separate `ssh <host> sudo …` invocation, and
//! the first failing step aborts with that command's stderr.
//!
//! The command sequences are built as plain argv vectors so tests can
//! check them without a network; [`deploy`] feeds them to [`crate::exec`].

use crate::config::RemoteConfig;
use crate::exec::{Cmd, ExecError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("archive does not exist: {0} (run package first)")]
    MissingArchive(std::path::PathBuf),
    #[error("uploading archive: {0}")]
    Upload(#[source] ExecError),
    #[error("remote step `{step}` failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: ExecError,
    },
}

/// The `scp` invocation that copies the archive to the remote staging
/// directory.
pub fn upload_argv(archive: &Path, remote: &RemoteConfig) -> Vec<String> {
    vec![
        "scp".to_string(),
        archive.to_string_lossy().into_owned(),
        format!("{}:{}/", remote.host, remote.staging_dir),
    ]
}

/// The privileged remote command sequence for the backup swap, as
/// `(step label, argv)` pairs in execution order.
pub fn swap_plan(
    remote: &RemoteConfig,
    alias: &str,
    archive_name: &str,
) -> Vec<(&'static str, Vec<String>)> {
    let web_root = &remote.web_root;
    let live = format!("{web_root}/{}", remote.live_dir);
    let backup = format!("{live}.bak");
    let staged = format!("{}/{archive_name}", remote.staging_dir);
    let uploaded = format!("{web_root}/{archive_name}");
    let unpacked = format!("{web_root}/{alias}");

    let mut plan = vec![
        ("remove old backup", ssh(remote, ["rm", "-rf", backup.as_str()])),
        ("back up live site", ssh(remote, ["mv", live.as_str(), backup.as_str()])),
        (
            "move archive to web root",
            ssh(remote, ["mv", staged.as_str(), web_root.as_str()]),
        ),
        (
            "unpack archive",
            ssh(remote, ["tar", "-xzf", uploaded.as_str(), "-C", web_root.as_str()]),
        ),
    ];
    if alias != remote.live_dir {
        plan.push((
            "activate new site",
            ssh(remote, ["mv", unpacked.as_str(), live.as_str()]),
        ));
    }
    plan.push(("remove archive", ssh(remote, ["rm", uploaded.as_str()])));
    plan
}

fn ssh<'a>(remote: &RemoteConfig, command: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut argv = vec!["ssh".to_string(), remote.host.clone(), "sudo".to_string()];
    argv.extend(command.into_iter().map(String::from));
    argv
}

/// Upload the archive and swap it live. No retries, no cleanup on failure.
pub fn deploy(archive: &Path, remote: &RemoteConfig, alias: &str) -> Result<(), DeployError> {
    if !archive.is_file() {
        return Err(DeployError::MissingArchive(archive.to_path_buf()));
    }
    let archive_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Cmd::from_argv(&upload_argv(archive, remote))
        .run()
        .map_err(DeployError::Upload)?;

    for (step, argv) in swap_plan(remote, alias, &archive_name) {
        Cmd::from_argv(&argv)
            .run()
            .map_err(|source| DeployError::Step { step, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> RemoteConfig {
        RemoteConfig {
            host: "deploy@example.org".to_string(),
            staging_dir: "/tmp".to_string(),
            web_root: "/var/www".to_string(),
            live_dir: "blog".to_string(),
        }
    }

    fn rendered(plan: &[(&'static str, Vec<String>)]) -> Vec<String> {
        plan.iter().map(|(_, argv)| argv.join(" ")).collect()
    }

    #[test]
    fn upload_targets_staging_dir() {
        let argv = upload_argv(Path::new("/work/site.tar.gz"), &remote());
        assert_eq!(
            argv,
            vec!["scp", "/work/site.tar.gz", "deploy@example.org:/tmp/"]
        );
    }

    #[test]
    fn swap_plan_runs_in_backup_swap_order() {
        let plan = swap_plan(&remote(), "blog", "site.tar.gz");
        assert_eq!(
            rendered(&plan),
            vec![
                "ssh deploy@example.org sudo rm -rf /var/www/blog.bak",
                "ssh deploy@example.org sudo mv /var/www/blog /var/www/blog.bak",
                "ssh deploy@example.org sudo mv /tmp/site.tar.gz /var/www",
                "ssh deploy@example.org sudo tar -xzf /var/www/site.tar.gz -C /var/www",
                "ssh deploy@example.org sudo rm /var/www/site.tar.gz",
            ]
        );
    }

    #[test]
    fn swap_plan_renames_alias_when_it_differs() {
        let plan = swap_plan(&remote(), "public-new", "site.tar.gz");
        let steps = rendered(&plan);
        assert!(
            steps.contains(
                &"ssh deploy@example.org sudo mv /var/www/public-new /var/www/blog".to_string()
            )
        );
        // The rename sits between unpack and archive removal.
        assert_eq!(steps.len(), 6);
        assert!(steps[4].contains("public-new"));
        assert!(steps[5].ends_with("rm /var/www/site.tar.gz"));
    }

    #[test]
    fn every_privileged_step_goes_through_sudo() {
        let plan = swap_plan(&remote(), "blog", "site.tar.gz");
        for (_, argv) in &plan {
            assert_eq!(argv[0], "ssh");
            assert_eq!(argv[1], "deploy@example.org");
            assert_eq!(argv[2], "sudo");
        }
    }

    #[test]
    fn missing_archive_is_an_error() {
        let result = deploy(Path::new("/nonexistent/site.tar.gz"), &remote(), "blog");
        assert!(matches!(result, Err(DeployError::MissingArchive(_))));
    }
}
