//! Gnuplot script assembly.

use barowarp_dtw::CorrespondenceSet;
use tracing::{info, instrument};

use crate::IoError;
use crate::format::{FormatArg, sprintf};
use crate::template::Template;

/// Renders a correspondence set into a complete gnuplot script.
///
/// Output layout:
/// 1. the template preamble, verbatim
/// 2. `heightCurveOffset = <offset>` followed by a blank line
/// 3. the arrow fragment, once per correspondence, formatted with
///    `(t1 / 1000, v1, t2 / 1000, v2)` where `v1` already carries the offset
/// 4. the plot fragment, formatted with `(output_name, source_1, source_2)`
#[derive(Debug, Clone)]
pub struct ScriptRenderer<'a> {
    template: &'a Template,
    output_name: &'a str,
    source_1: &'a str,
    source_2: &'a str,
}

impl<'a> ScriptRenderer<'a> {
    /// Create a renderer over a parsed template and the names the plot fragment refers to.
    #[must_use]
    pub fn new(
        template: &'a Template,
        output_name: &'a str,
        source_1: &'a str,
        source_2: &'a str,
    ) -> Self {
        Self {
            template,
            output_name,
            source_1,
            source_2,
        }
    }

    /// Render the script for `correspondences`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Format`] if the arrow or plot fragment cannot be
    /// formatted with its arguments.
    #[instrument(skip_all, fields(n_correspondences = correspondences.len()))]
    pub fn render(
        &self,
        correspondences: &CorrespondenceSet,
        height_offset: f64,
    ) -> Result<String, IoError> {
        let mut script = String::from(self.template.preamble());
        script.push_str(&format!("heightCurveOffset = {height_offset:?}\n\n"));

        for c in correspondences {
            let args = [
                FormatArg::Float(c.first.timestamp / 1000.0),
                FormatArg::Float(c.first.value),
                FormatArg::Float(c.second.timestamp / 1000.0),
                FormatArg::Float(c.second.value),
            ];
            script.push_str(&sprintf(self.template.arrow(), &args)?);
        }

        let plot_args = [
            FormatArg::Str(self.output_name),
            FormatArg::Str(self.source_1),
            FormatArg::Str(self.source_2),
        ];
        script.push_str(&sprintf(self.template.plot(), &plot_args)?);

        info!(bytes = script.len(), "script rendered");
        Ok(script)
    }
}
