//! Publishing: package the rendered site into a static-serving artifact.
//!
//! `stanza publish` copies the build output verbatim into
//! `<publish.dir>/site/` and emits a Dockerfile plus an nginx config.
//! The resulting directory builds into an image that serves the site on
//! one fixed port, files only, no dynamic routes.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};
use walkdir::WalkDir;

const DOCKERFILE: &str = include_str!("embed/publish/Dockerfile");
const NGINX_CONF: &str = include_str!("embed/publish/nginx.conf");

/// Package the current build output into the publish directory.
pub fn publish_site(config: &'static SiteConfig) -> Result<()> {
    let output_dir = config.paths().output_dir();
    if !output_dir.is_dir() {
        bail!(
            "Output directory `{}` does not exist. Run `stanza build` first",
            output_dir.display()
        );
    }

    let publish_dir = &config.publish.dir;
    if publish_dir.exists() && !is_dir_empty(publish_dir)? {
        if !config.publish.force {
            bail!(
                "Publish directory `{}` is not empty. Use --force to overwrite",
                publish_dir.display()
            );
        }
        fs::remove_dir_all(publish_dir).with_context(|| {
            format!("Failed to clear publish directory: {}", publish_dir.display())
        })?;
    }

    let site_dir = publish_dir.join("site");
    fs::create_dir_all(&site_dir)?;

    let copied = copy_tree(&output_dir, &site_dir)?;
    log!("publish"; "copied {copied} file(s) into {}", site_dir.display());

    write_artifact(publish_dir, config)?;
    log!("publish"; "done, artifact at {}", publish_dir.display());

    Ok(())
}

/// Copy a directory tree verbatim. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut count = 0usize;

    for entry in WalkDir::new(from).sort_by_file_name() {
        // An unreadable entry would silently drop files from the copy
        let entry =
            entry.with_context(|| format!("Failed to read {}", from.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(from)?;
        let dest = to.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                entry.path().display(),
                dest.display()
            )
        })?;
        count += 1;
    }

    Ok(count)
}

/// Write the Dockerfile and server config with the configured port and image.
fn write_artifact(publish_dir: &Path, config: &SiteConfig) -> Result<()> {
    let port = config.publish.port.to_string();

    let dockerfile = DOCKERFILE
        .replace("{image}", &config.publish.image)
        .replace("{port}", &port);
    fs::write(publish_dir.join("Dockerfile"), dockerfile)?;

    let nginx = NGINX_CONF.replace("{port}", &port);
    fs::write(publish_dir.join("nginx.conf"), nginx)?;

    Ok(())
}

fn is_dir_empty(dir: &Path) -> Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(root: &Path, publish_extra: &str) -> &'static SiteConfig {
        let toml = format!(
            r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build]
            output = "{root}/public"

            [publish]
            dir = "{root}/publish"
            {publish_extra}
        "#,
            root = root.display()
        );
        Box::leak(Box::new(SiteConfig::from_str(&toml).unwrap()))
    }

    fn fake_output(root: &Path) {
        fs::create_dir_all(root.join("public/posts/hello")).unwrap();
        fs::write(root.join("public/index.html"), "<html>index</html>").unwrap();
        fs::write(
            root.join("public/posts/hello/index.html"),
            "<html>hello</html>",
        )
        .unwrap();
    }

    #[test]
    fn test_publish_copies_output_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "");
        fake_output(tmp.path());

        publish_site(config).unwrap();

        let copied = tmp.path().join("publish/site/posts/hello/index.html");
        assert_eq!(fs::read_to_string(copied).unwrap(), "<html>hello</html>");
        assert_eq!(
            fs::read_to_string(tmp.path().join("publish/site/index.html")).unwrap(),
            "<html>index</html>"
        );
    }

    #[test]
    fn test_publish_writes_dockerfile_and_server_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "port = 8080\nimage = \"nginx:alpine\"");
        fake_output(tmp.path());

        publish_site(config).unwrap();

        let dockerfile = fs::read_to_string(tmp.path().join("publish/Dockerfile")).unwrap();
        assert!(dockerfile.contains("FROM nginx:alpine"));
        assert!(dockerfile.contains("EXPOSE 8080"));
        assert!(!dockerfile.contains("{image}"));

        let nginx = fs::read_to_string(tmp.path().join("publish/nginx.conf")).unwrap();
        assert!(nginx.contains("listen 8080;"));
        assert!(nginx.contains("try_files $uri $uri/ =404;"));
        assert!(!nginx.contains("{port}"));
    }

    #[test]
    fn test_publish_refuses_non_empty_dir_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "");
        fake_output(tmp.path());
        fs::create_dir_all(tmp.path().join("publish")).unwrap();
        fs::write(tmp.path().join("publish/keep.txt"), "mine").unwrap();

        assert!(publish_site(config).is_err());
        assert!(tmp.path().join("publish/keep.txt").exists());
    }

    #[test]
    fn test_publish_force_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "force = true");
        fake_output(tmp.path());
        fs::create_dir_all(tmp.path().join("publish")).unwrap();
        fs::write(tmp.path().join("publish/keep.txt"), "old").unwrap();

        publish_site(config).unwrap();

        assert!(!tmp.path().join("publish/keep.txt").exists());
        assert!(tmp.path().join("publish/site/index.html").exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_publish_unreadable_output_subdir_fails() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "");
        fake_output(tmp.path());

        let locked = tmp.path().join("public/locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions do not bind a privileged user, nothing to exercise then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = publish_site(config);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // A skipped entry would report success while dropping files
        assert!(result.is_err());
    }

    #[test]
    fn test_publish_without_output_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path(), "");

        let err = publish_site(config).unwrap_err();
        assert!(err.to_string().contains("stanza build"));
    }
}
