use {
    super::{ComponentArgs, DisplayBoundary},
    crate::models::ChartPayload,
    anyhow::{Context, Result},
    serde_json::Value,
    std::{
        io::Write,
        path::{Path, PathBuf},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

/// Writes the component envelope as JSON for a host that picks it up later.
/// A file has no user on the other end, so there is never interaction state.
#[derive(Debug, Clone)]
pub struct JsonFileBoundary {
    output: Output,
    pretty: bool,
    renders: usize,
}

impl JsonFileBoundary {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            pretty: true,
            renders: 0,
        }
    }

    pub fn to_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Output::File(path.as_ref().to_path_buf()))
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    fn encode(&self, args: &ComponentArgs) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(args)
        } else {
            serde_json::to_string(args)
        }
    }
}

impl DisplayBoundary for JsonFileBoundary {
    fn render(&mut self, charts: &[ChartPayload], key: Option<&str>) -> Result<Option<Value>> {
        let text = self.encode(&ComponentArgs::new(charts, key))?;

        match &self.output {
            Output::Stdout => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{text}")?;
            }
            Output::File(path) => {
                std::fs::write(path, text)
                    .with_context(|| format!("writing payload to {}", path.display()))?;
                log::info!("wrote {} chart(s) to {}", charts.len(), path.display());
            }
        }

        self.renders += 1;
        Ok(None)
    }
}
