//! Renders an [`AggregateSummary`] through a placeholder template.

mod format;
mod template;

use log::{debug, info};
use std::path::Path;

pub use format::{Formatters, group_thousands, long_date, two_decimal_percent};
pub use template::Template;

use crate::aggregate::AggregateSummary;
use crate::error::RenderError;
use crate::runtime::Runtime;

pub struct Renderer<R: Runtime> {
    runtime: R,
    formatters: Formatters,
}

impl<R: Runtime> Renderer<R> {
    pub fn new(runtime: R, formatters: Formatters) -> Self {
        Self {
            runtime,
            formatters,
        }
    }

    /// Renders `template` in memory, dated with the runtime's current day.
    pub fn render_str(
        &self,
        summary: AggregateSummary,
        template: &str,
    ) -> Result<String, RenderError> {
        let template: Template = template.parse()?;
        Ok(template.render(&summary, &self.formatters, self.runtime.today()))
    }

    /// Reads the template at `template_path` and writes the rendered result to
    /// `output_path`, replacing whatever was there.
    #[tracing::instrument(skip(self, summary))]
    pub fn render(
        &self,
        summary: AggregateSummary,
        template_path: &Path,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        debug!("Reading template {}...", template_path.display());
        let source = self
            .runtime
            .read_to_string(template_path)
            .map_err(|e| RenderError::Template(format!("{:#}", e)))?;

        let rendered = self.render_str(summary, &source)?;

        self.runtime
            .write(output_path, rendered.as_bytes())
            .map_err(|e| RenderError::Sink {
                path: output_path.to_path_buf(),
                cause: format!("{:#}", e),
            })?;

        info!(
            "Rendered {} into {} ({} bytes)",
            template_path.display(),
            output_path.display(),
            rendered.len()
        );
        Ok(())
    }
}
