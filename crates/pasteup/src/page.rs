//! Standalone HTML page around the rendered container.
//!
//! The page finishes what the renderer leaves for the browser: KaTeX renders
//! elements carrying `data-formula-b64`, Mermaid replaces diagram
//! placeholders, and a button copies the container as rich text. A failure in
//! any of these leaves the inline fallbacks visible.

use std::fmt::Write;

use pasteup_renderer::escape_html;

/// Title used when the document has no level-1 heading.
pub(crate) const DEFAULT_TITLE: &str = "Markdown Rendered";

/// Data needed to render the page.
pub(crate) struct PageData<'a> {
    pub title: Option<&'a str>,
    /// Rendered root container.
    pub body: &'a str,
    /// Accent color for the copy button.
    pub accent: &'a str,
}

const KATEX_VERSION: &str = "0.16.11";

const MATH_SCRIPT: &str = r"<script>
(function() {
  var btn = document.getElementById('copy-btn');
  if (typeof katex === 'undefined') {
    console.warn('KaTeX not loaded');
  } else {
    var render = function(selector, displayMode) {
      document.querySelectorAll(selector).forEach(function(el) {
        try {
          var bytes = Uint8Array.from(atob(el.getAttribute('data-formula-b64')), function(c) { return c.charCodeAt(0); });
          var formula = new TextDecoder().decode(bytes);
          katex.render(formula, el, { throwOnError: false, displayMode: displayMode });
        } catch (e) { console.warn('KaTeX error:', e); }
      });
    };
    render('.math-inline', false);
    render('.math-block', true);
  }
  if (btn) { btn.textContent = 'Copy rich text'; btn.disabled = false; }
})();
</script>
";

const DIAGRAM_SCRIPT: &str = r#"<script type="module">
try {
  const placeholders = document.querySelectorAll('.diagram-placeholder[data-language="mermaid"]');
  if (placeholders.length > 0) {
    const m = await import('https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs');
    const mermaid = m.default;
    mermaid.initialize({ startOnLoad: false, theme: 'default' });
    placeholders.forEach(function(el) {
      var div = document.createElement('div');
      div.className = 'mermaid';
      div.textContent = el.querySelector('pre').textContent;
      el.replaceWith(div);
    });
    await mermaid.run();
  }
} catch (e) {
  console.warn('Mermaid render failed:', e);
}
</script>
"#;

const COPY_SCRIPT: &str = r"<script>
function copyRichText() {
  var container = document.querySelector('.container');
  if (!container) return;
  var range = document.createRange();
  range.selectNodeContents(container);
  var sel = window.getSelection();
  sel.removeAllRanges();
  sel.addRange(range);
  try {
    var ok = document.execCommand('copy');
    sel.removeAllRanges();
    if (ok) { showCopied(); return; }
  } catch (e) {}
  sel.removeAllRanges();
  if (navigator.clipboard && window.ClipboardItem) {
    var blob = new Blob([container.outerHTML], { type: 'text/html' });
    navigator.clipboard.write([new ClipboardItem({ 'text/html': blob })])
      .then(showCopied)
      .catch(function() { alert('Copy failed. Select all and copy manually.'); });
  } else {
    alert('Copy failed. Select all and copy manually.');
  }
}
function showCopied() {
  var btn = document.getElementById('copy-btn');
  btn.textContent = 'Copied';
  btn.classList.add('copied');
  setTimeout(function() {
    btn.textContent = 'Copy rich text';
    btn.classList.remove('copied');
  }, 2000);
}
</script>
";

/// Render the complete page.
pub(crate) fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.body.len() + 8192);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(
        html,
        "<title>{}</title>",
        escape_html(page.title.unwrap_or(DEFAULT_TITLE))
    );
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/katex@{KATEX_VERSION}/dist/katex.min.css\">"
    );
    let _ = writeln!(
        html,
        "<script src=\"https://cdn.jsdelivr.net/npm/katex@{KATEX_VERSION}/dist/katex.min.js\"></script>"
    );

    // Page chrome only. Content styling is inline and travels with a copy.
    html.push_str("<style>\n");
    html.push_str("body { max-width: 800px; margin: 0 auto; padding: 20px; background: #fff; }\n");
    html.push_str(".diagram-placeholder pre { margin: 0; }\n");
    let _ = writeln!(
        html,
        "#copy-btn {{ position: fixed; top: 20px; right: 20px; z-index: 9999; \
         padding: 10px 20px; background: {}; color: #fff; border: none; \
         border-radius: 8px; font-size: 14px; cursor: pointer; \
         box-shadow: 0 2px 8px rgba(0,0,0,0.15); }}",
        escape_html(page.accent)
    );
    html.push_str("#copy-btn:hover { opacity: 0.85; }\n");
    html.push_str("#copy-btn.copied { background: #07c160; }\n");
    html.push_str("@media print { #copy-btn { display: none; } }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(
        "<button id=\"copy-btn\" onclick=\"copyRichText()\" disabled>Rendering...</button>\n",
    );
    // Zero-height spacers keep editors from merging the first and last
    // blocks into surrounding content.
    let spacer = "<p style=\"font-size: 0px; line-height: 0; margin: 0px;\">&nbsp;</p>\n";
    html.push_str(spacer);
    html.push_str(page.body);
    html.push('\n');
    html.push_str(spacer);

    html.push_str(MATH_SCRIPT);
    html.push_str(DIAGRAM_SCRIPT);
    html.push_str(COPY_SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}
