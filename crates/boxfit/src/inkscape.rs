//! Geometry from a second Inkscape process run with `--query-all`.

use boxfit_core::{GeometryMap, GeometryProvider, Result, parse_query_all};
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

pub const PROGRAM_ENV: &str = "BOXFIT_INKSCAPE";

#[derive(Debug, Clone)]
pub struct InkscapeQuery {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for InkscapeQuery {
    fn default() -> Self {
        Self::new("inkscape")
    }
}

impl InkscapeQuery {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `$BOXFIT_INKSCAPE` if set and non-empty, otherwise `inkscape` from `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(PROGRAM_ENV) {
            Some(p) if !p.is_empty() => Self::new(p),
            _ => Self::default(),
        }
    }

    /// Extra arguments placed before `--query-all` (Inkscape 0.92 wants `--without-gui`).
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl GeometryProvider for InkscapeQuery {
    fn resolve(&self, svg: &str) -> Result<GeometryMap> {
        // Removed on drop, including when the query below fails.
        let mut staged = tempfile::Builder::new()
            .prefix("boxfit-")
            .suffix(".svg")
            .tempfile()?;
        staged.write_all(svg.as_bytes())?;
        staged.flush()?;
        tracing::debug!(path = %staged.path().display(), "staged document for query");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("--query-all")
            .arg(staged.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| boxfit_core::Error::Subprocess {
                program: self.program_name(),
                source,
            })?;
        staged.close()?;

        if !output.status.success() {
            return Err(boxfit_core::Error::SubprocessFailed {
                program: self.program_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_query_all(&String::from_utf8_lossy(&output.stdout))
    }
}
