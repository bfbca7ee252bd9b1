//! Standalone HTML output
//!
//! Embeds the Vega-Lite document into a page that loads vega, vega-lite and
//! vega-embed from jsDelivr and renders it into a single `<div>`.

use super::{RowLimit, VegaLiteWriter, Writer};
use crate::{Figure, HealthvizError, Result};
use std::fs;
use std::path::Path;

/// Writer for self-contained interactive HTML documents
#[derive(Default)]
pub struct HtmlWriter {
    inner: VegaLiteWriter,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_limit(self, row_limit: RowLimit) -> Self {
        Self {
            inner: self.inner.with_row_limit(row_limit),
        }
    }

    /// Write the figure's page to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `HealthvizError::WriterError` if the figure cannot be
    /// serialized and `HealthvizError::ExportError` if the file cannot be
    /// written.
    pub fn save(&self, figure: &Figure, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let html = self.write(figure)?;
        fs::write(path, html).map_err(|e| {
            HealthvizError::ExportError(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), rows = figure.row_count(), "Saved chart");
        Ok(())
    }
}

impl Writer for HtmlWriter {
    type Output = String;

    fn write(&self, figure: &Figure) -> Result<String> {
        let spec = self.inner.to_value(figure)?;
        let spec_json = serde_json::to_string(&spec).map_err(|e| {
            HealthvizError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    #vis.vega-embed {{
      width: 100%;
      display: flex;
    }}
    #vis.vega-embed details,
    #vis.vega-embed details summary {{
      position: relative;
    }}
  </style>
  <script type="text/javascript" src="https://cdn.jsdelivr.net/npm/vega@6"></script>
  <script type="text/javascript" src="https://cdn.jsdelivr.net/npm/vega-lite@6.4.1"></script>
  <script type="text/javascript" src="https://cdn.jsdelivr.net/npm/vega-embed@7"></script>
</head>
<body>
  <div id="vis"></div>
  <script type="text/javascript">
    (function(vegaEmbed) {{
      const spec = {};
      const options = {{"mode": "vega-lite", "actions": true}};
      const el = document.getElementById('vis');

      function showError(err) {{
        el.innerHTML = '<div class="error" style="color:red;">' +
          '<p>JavaScript Error: ' + err.message + '</p>' +
          "<p>This usually means there's a typo in your chart specification. " +
          "See the javascript console for the full traceback.</p>" +
          '</div>';
        throw err;
      }}

      vegaEmbed('#vis', spec, options).catch(showError);
    }})(vegaEmbed);
  </script>
</body>
</html>
"#,
            escape_script(&spec_json)
        ))
    }

    fn validate(&self, figure: &Figure) -> Result<()> {
        self.inner.validate(figure)
    }
}

/// Keep inline JSON from closing the surrounding `<script>` element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
