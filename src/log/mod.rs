use fs_err as fs;
use serde_json::to_string_pretty;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::wire::{GenerateRequest, Tx};

/// Persists the request/response pair of each model stage under
/// `.stratgen/tx/<uuid>/`. Requests are pretty JSON, responses the raw text
/// the model returned.
pub struct StageLog {
    dir: PathBuf,
    tx: Option<Tx>,
    save_request: bool,
    save_response: bool,
}

pub struct SavedPaths {
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

impl StageLog {
    pub fn new(root: &Path, tx: &Tx, save_request: bool, save_response: bool) -> Self {
        let dir = root.join(".stratgen").join("tx").join(tx.id.to_string());
        Self { dir, tx: Some(tx.clone()), save_request, save_response }
    }

    /// A log that writes nothing. Used by tests and by callers that only
    /// want console output.
    pub fn disabled() -> Self {
        Self { dir: PathBuf::new(), tx: None, save_request: false, save_response: false }
    }

    /// Best-effort: a failure to write artifacts never fails the run.
    pub fn record(&self, stage: &str, req: &GenerateRequest, response: &str) {
        match self.try_record(stage, req, response) {
            Ok(_) => {}
            Err(e) => eprintln!("warning: could not save {stage} artifacts: {e}"),
        }
    }

    fn try_record(&self, stage: &str, req: &GenerateRequest, response: &str) -> anyhow::Result<SavedPaths> {
        if !self.save_request && !self.save_response {
            return Ok(SavedPaths { request: None, response: None });
        }
        fs::create_dir_all(&self.dir)?;

        // Stamp the run so artifact dirs are self-describing.
        if let Some(tx) = &self.tx {
            fs::write(self.dir.join("tx.json"), to_string_pretty(tx)?)?;
        }

        let mut request_path = None;
        let mut response_path = None;

        if self.save_request {
            let p = self.dir.join(format!("{stage}.request.json"));
            fs::write(&p, to_string_pretty(req)?)?;
            request_path = Some(p);
        }

        if self.save_response {
            let p = self.dir.join(format!("{stage}.response.txt"));
            fs::write(&p, response)?;
            response_path = Some(p);
        }

        Ok(SavedPaths { request: request_path, response: response_path })
    }

    pub fn print_planned_dir(&self) {
        println!("debug: planned artifacts directory: {}", self.dir.display());
        std::io::stdout().flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> GenerateRequest {
        GenerateRequest::text("hello".into())
    }

    #[test]
    fn writes_request_response_and_tx_stamp() {
        let tmp = tempfile::tempdir().unwrap();
        let tx = Tx::new();
        let log = StageLog::new(tmp.path(), &tx, true, true);

        let saved = log.try_record("generate", &req(), "| a | b |").unwrap();
        let request = saved.request.unwrap();
        let response = saved.response.unwrap();
        assert!(request.ends_with("generate.request.json"));
        assert_eq!(std::fs::read_to_string(response).unwrap(), "| a | b |");
        assert!(request.parent().unwrap().join("tx.json").exists());
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = StageLog::disabled();
        let saved = log.try_record("generate", &req(), "x").unwrap();
        assert!(saved.request.is_none());
        assert!(saved.response.is_none());
    }

    #[test]
    fn flags_are_honored_independently() {
        let tmp = tempfile::tempdir().unwrap();
        let tx = Tx::new();
        let log = StageLog::new(tmp.path(), &tx, false, true);
        let saved = log.try_record("select", &req(), "PAS").unwrap();
        assert!(saved.request.is_none());
        assert!(saved.response.is_some());
    }
}
