//! Embed snippet for installing the widget on a site

/// Script path served by the widget host
pub const WIDGET_SCRIPT: &str = "chat-widget.js";

/// Render the `<script>` tag that loads the widget
///
/// A trailing slash on `api_base` is dropped.
///
/// # Examples
/// ```
/// # use chatlab_model::embed::embed_snippet;
/// assert_eq!(
///     embed_snippet("https://api.example.com/", "w1"),
///     r#"<script src="https://api.example.com/chat-widget.js" data-id="w1"></script>"#
/// );
/// ```
#[must_use]
pub fn embed_snippet(api_base: &str, widget_id: &str) -> String {
    let base = api_base.trim().trim_end_matches('/');
    format!(r#"<script src="{base}/{WIDGET_SCRIPT}" data-id="{widget_id}"></script>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_without_trailing_slash() {
        assert_eq!(
            embed_snippet("http://localhost:5000", "abc"),
            r#"<script src="http://localhost:5000/chat-widget.js" data-id="abc"></script>"#
        );
    }
}
