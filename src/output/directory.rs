//! Directory-tree sink.

use super::{
    archive::zip_dir, ExportSink, CHANNELS_FILE, CHANNEL_LIST_FILE, USERS_FILE, USER_LIST_FILE,
};
use crate::errors::{ExportResult, OutputError};
use crate::export::RunContext;
use crate::types::Record;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes artifacts under `<parent>/slack_export_<timestamp>/`
///
/// Layout:
/// - `channels.json`, `users.json`: full dumps
/// - `channel_list.json`, `user_list.json`: listings
/// - `<channel name>/<YYYY-MM-DD>.json`: one file per non-empty day
///
/// On `finish` the run directory is zipped into `<run dir>.zip` next to it.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    run_dir: PathBuf,
    zip: bool,
}

impl DirectorySink {
    /// Sink for the run described by `ctx` under `parent`
    pub fn new(parent: impl AsRef<Path>, ctx: &RunContext) -> Self {
        Self {
            run_dir: expand_path(parent.as_ref()).join(ctx.run_dir_name()),
            zip: true,
        }
    }

    /// Enable or disable zipping at `finish`
    pub fn with_zip(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    /// Directory this run writes into
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Path of the zip bundle produced by `finish`
    pub fn archive_path(&self) -> PathBuf {
        let mut name = self.run_dir.as_os_str().to_owned();
        name.push(".zip");
        PathBuf::from(name)
    }

    fn write_json(&self, subdir: Option<&str>, name: &str, records: &[Record]) -> ExportResult<()> {
        let dir = match subdir {
            Some(subdir) => self.run_dir.join(subdir),
            None => self.run_dir.clone(),
        };
        fs::create_dir_all(&dir).map_err(|e| OutputError::io(&dir, e))?;

        let path = dir.join(format!("{}.json", name));
        info!(path = %path.display(), "Writing output");

        let file = File::create(&path).map_err(|e| OutputError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records).map_err(OutputError::Json)?;
        writer.flush().map_err(|e| OutputError::io(&path, e))?;
        Ok(())
    }
}

impl ExportSink for DirectorySink {
    fn write_channel_list(&mut self, channels: &[Record]) -> ExportResult<()> {
        self.write_json(None, CHANNEL_LIST_FILE, channels)
    }

    fn write_user_list(&mut self, users: &[Record]) -> ExportResult<()> {
        self.write_json(None, USER_LIST_FILE, users)
    }

    fn write_channels(&mut self, channels: &[Record]) -> ExportResult<()> {
        self.write_json(None, CHANNELS_FILE, channels)
    }

    fn write_users(&mut self, users: &[Record]) -> ExportResult<()> {
        self.write_json(None, USERS_FILE, users)
    }

    fn write_window(
        &mut self,
        channel_name: &str,
        day: &str,
        messages: &[Record],
    ) -> ExportResult<()> {
        self.write_json(Some(channel_name), day, messages)
    }

    fn finish(&mut self) -> ExportResult<()> {
        if !self.zip {
            return Ok(());
        }
        fs::create_dir_all(&self.run_dir).map_err(|e| OutputError::io(&self.run_dir, e))?;
        zip_dir(&self.run_dir, &self.archive_path())
    }
}

/// Expand a leading `~` and `$VAR` references, then make the path absolute
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = expand_vars(&raw);

    let expanded = match expanded.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(expanded.as_str()),
        },
        _ => PathBuf::from(expanded.as_str()),
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

fn expand_vars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, tail) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], &braced[end + 1..]),
                None => ("", after),
            },
            None => {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], &after[end..])
            }
        };

        match std::env::var(name) {
            Ok(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(&rest[pos..rest.len() - tail.len()]),
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = RunContext::new();
        let mut sink = DirectorySink::new(tmp.path(), &ctx).with_zip(false);

        sink.write_channels(&records(json!([{"id": "G1", "name": "ops"}])))
            .unwrap();
        sink.write_window("ops", "2020-09-13", &records(json!([{"ts": "1.1"}])))
            .unwrap();
        sink.finish().unwrap();

        let run_dir = tmp.path().join(ctx.run_dir_name());
        assert_eq!(sink.run_dir(), run_dir.as_path());
        assert!(run_dir.join("channels.json").is_file());
        assert!(run_dir.join("ops").join("2020-09-13.json").is_file());
        assert!(!sink.archive_path().exists());
    }

    #[test]
    fn test_finish_zips_run_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = RunContext::new();
        let mut sink = DirectorySink::new(tmp.path(), &ctx);

        sink.write_users(&records(json!([{"id": "U1", "name": "ann"}])))
            .unwrap();
        sink.finish().unwrap();

        let archive = tmp.path().join(format!("{}.zip", ctx.run_dir_name()));
        assert_eq!(sink.archive_path(), archive);
        assert!(archive.is_file());
    }

    #[test]
    fn test_expand_vars() {
        std::env::set_var("SLACK_EXPORT_TEST_DIR", "/data/exports");
        assert_eq!(expand_vars("$SLACK_EXPORT_TEST_DIR/a"), "/data/exports/a");
        assert_eq!(expand_vars("${SLACK_EXPORT_TEST_DIR}/b"), "/data/exports/b");
        assert_eq!(expand_vars("/plain/path"), "/plain/path");
        assert_eq!(
            expand_vars("$SLACK_EXPORT_UNSET_VAR_X/c"),
            "$SLACK_EXPORT_UNSET_VAR_X/c"
        );
    }

    #[test]
    fn test_expand_path_is_absolute() {
        assert!(expand_path(Path::new("relative/out")).is_absolute());
        assert_eq!(expand_path(Path::new("/abs/out")), PathBuf::from("/abs/out"));
    }
}
