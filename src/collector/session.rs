use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collector::element_set::DomElement;
use crate::error::AppError;

/// Request sent to the browser server over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate { cmd: &'static str, url: String },
    Elements { cmd: &'static str },
    Quit { cmd: &'static str },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn elements() -> Self {
        BrowserRequest::Elements { cmd: "elements" }
    }

    pub fn quit() -> Self {
        BrowserRequest::Quit { cmd: "quit" }
    }
}

/// Response received from the browser server over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// A headless browser kept open by a long-lived Node.js process.
///
/// Commands are sent as NDJSON over stdin, responses read from stdout.
pub struct BrowserSession {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    script: String,
    closed: bool,
}

impl BrowserSession {
    /// Spawn the browser server script and wait for its ready signal.
    pub fn launch(script: &str) -> Result<Self, AppError> {
        tracing::debug!(script, "launching browser server");

        let mut child = Command::new("node")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AppError::SubprocessSpawn {
                script: script.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::SessionIO(format!("Failed to capture stdin of {}", script)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AppError::SessionIO(format!("Failed to capture stdout of {}", script)))?;

        let mut session = BrowserSession {
            child,
            stdin,
            reader: BufReader::new(stdout),
            script: script.to_string(),
            closed: false,
        };

        let response = session.read_response("ready signal")?;
        if !response.ok || response.ready != Some(true) {
            return Err(AppError::SessionProtocol {
                command: "launch".into(),
                error: response
                    .error
                    .unwrap_or_else(|| format!("Did not receive ready signal from {}", script)),
            });
        }

        Ok(session)
    }

    fn read_response(&mut self, context: &str) -> Result<BrowserResponse, AppError> {
        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            AppError::SessionIO(format!("Failed to read {} from {}: {}", context, self.script, e))
        })?;

        if line.trim().is_empty() {
            return Err(AppError::SessionIO(format!(
                "Empty response from {} (process may have died)",
                self.script
            )));
        }

        serde_json::from_str(line.trim()).map_err(|e| AppError::JsonParse {
            context: format!("{} {}", self.script, context),
            source: e,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, AppError> {
        let json = serde_json::to_string(request).map_err(|e| AppError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| {
                AppError::SessionIO(format!("Failed to write to {} stdin: {}", self.script, e))
            })?;

        self.read_response("response")
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: &BrowserRequest, command: &str) -> Result<BrowserResponse, AppError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(AppError::SessionProtocol {
                command: command.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    pub fn navigate(&mut self, url: &str) -> Result<(), AppError> {
        self.send_ok(&BrowserRequest::navigate(url), "navigate")?;
        Ok(())
    }

    /// Raw button, link, input and form descriptors of the current page.
    pub fn elements(&mut self) -> Result<Vec<DomElement>, AppError> {
        let response = self.send_ok(&BrowserRequest::elements(), "elements")?;
        let data = response.data.ok_or_else(|| AppError::SessionProtocol {
            command: "elements".into(),
            error: "No data in elements response".into(),
        })?;

        serde_json::from_value(data).map_err(|e| AppError::JsonParse {
            context: "elements response".into(),
            source: e,
        })
    }

    /// Close the browser. Safe to call more than once.
    pub fn quit(&mut self) -> Result<(), AppError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // The process may already be gone; nothing useful to report then.
        let _ = self.send(&BrowserRequest::quit());
        let _ = self.child.wait();
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
