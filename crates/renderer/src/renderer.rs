use crate::dot::dot_source;
use crate::error::{RenderError, Result};
use crate::types::{DiagramResult, LayoutDirection, OutputFormat};
use archdiag_graph::ArchitectureGraph;
use once_cell::sync::Lazy;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;

/// Graphviz is not reentrant-safe across some platform builds, so only one
/// render is in flight at a time. Classification and graph building for
/// other requests are unaffected.
static BACKEND_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const DEFAULT_DOT_BINARY: &str = "dot";

/// Renders architecture graphs through the external Graphviz backend
pub struct DiagramRenderer {
    dot_binary: String,
}

impl DiagramRenderer {
    pub fn new() -> Self {
        let dot_binary = std::env::var("ARCHDIAG_DOT_BINARY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOT_BINARY.to_string());
        Self { dot_binary }
    }

    /// Renderer pinned to a specific backend binary
    pub fn with_binary(dot_binary: impl Into<String>) -> Self {
        Self {
            dot_binary: dot_binary.into(),
        }
    }

    /// Render a graph to the requested format.
    ///
    /// The DOT description is piped through the backend's stdin and the
    /// image read back from stdout, so no rendering artifact touches
    /// durable storage. Backend failure is fatal for the request and not
    /// retried.
    pub fn render(
        &self,
        graph: &ArchitectureGraph,
        name: &str,
        format: OutputFormat,
        direction: LayoutDirection,
    ) -> Result<DiagramResult> {
        let dot = dot_source(graph, name, direction);
        let bytes = self.invoke_backend(&dot, format)?;

        log::info!(
            "Rendered {} diagram {:?}: {} nodes, {} edges, {} bytes",
            format,
            name,
            graph.node_count(),
            graph.edge_count(),
            bytes.len()
        );

        Ok(DiagramResult {
            bytes,
            format,
            services_identified: graph.service_types(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        })
    }

    fn invoke_backend(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>> {
        let _guard = BACKEND_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut child = Command::new(&self.dot_binary)
            .arg(format!("-T{}", format.as_str()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RenderError::BackendUnavailable(format!("{} not found", self.dot_binary))
                } else {
                    RenderError::Io(e)
                }
            })?;

        // Feed stdin from its own thread: a large document can make the
        // child fill its stdout pipe while we are still writing, and a
        // single-threaded write-then-read would deadlock on both pipes.
        let stdin = child.stdin.take();
        let document = dot.as_bytes().to_vec();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&document)?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        let write_result = writer.join().unwrap_or(Ok(()));

        if !output.status.success() {
            return Err(RenderError::BackendFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        write_result?;

        Ok(output.stdout)
    }
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdiag_catalog::ServiceInstance;
    use archdiag_graph::{EdgeDefault, GraphBuilder};

    fn small_graph() -> ArchitectureGraph {
        GraphBuilder::new(EdgeDefault::Chain)
            .build(
                vec![
                    ServiceInstance::new("web", "appservice", "WebApp"),
                    ServiceInstance::new("db", "sqldatabase", "DB"),
                ],
                vec![],
            )
            .unwrap()
    }

    #[test]
    fn missing_backend_is_backend_unavailable() {
        let renderer = DiagramRenderer::with_binary("archdiag-no-such-binary");
        let err = renderer
            .render(
                &small_graph(),
                "Test",
                OutputFormat::Svg,
                LayoutDirection::TopBottom,
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::BackendUnavailable(_)));
    }

    #[test]
    fn renders_svg_when_backend_present() {
        // Exercises the real backend only where the deployment has one
        let renderer = DiagramRenderer::new();
        match renderer.render(
            &small_graph(),
            "Test",
            OutputFormat::Svg,
            LayoutDirection::LeftRight,
        ) {
            Ok(result) => {
                assert_eq!(result.node_count, 2);
                assert_eq!(result.edge_count, 1);
                assert_eq!(result.services_identified, vec!["appservice", "sqldatabase"]);
                assert!(String::from_utf8_lossy(&result.bytes).contains("<svg"));
            }
            Err(RenderError::BackendUnavailable(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
