//! Rendering options and configuration.

use super::classify::DEFAULT_LINK_LABELS;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target surface
    pub surface: Surface,

    /// Contact-line segments styled as link labels (compared ignoring case)
    pub link_labels: Vec<String>,

    /// Color for link-like labels
    pub accent_color: String,

    /// Title of the standalone HTML page
    pub page_title: String,

    /// Column used to right-align dash rows in plain text
    pub text_width: usize,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target surface.
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Shorthand for the print surface.
    pub fn for_print(self) -> Self {
        self.with_surface(Surface::Print)
    }

    /// Replace the link-label names.
    pub fn with_link_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.link_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Add one link-label name.
    pub fn with_link_label(mut self, label: impl Into<String>) -> Self {
        self.link_labels.push(label.into());
        self
    }

    /// Set the accent color.
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = color.into();
        self
    }

    /// Set the page title.
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    /// Set the plain-text width.
    pub fn with_text_width(mut self, width: usize) -> Self {
        self.text_width = width.max(20);
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            surface: Surface::Screen,
            link_labels: DEFAULT_LINK_LABELS.iter().map(|s| s.to_string()).collect(),
            accent_color: "#2563eb".to_string(),
            page_title: "Resume".to_string(),
            text_width: 72,
            collect_stats: false,
        }
    }
}

/// Where the rendered output is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// On-screen preview
    #[default]
    Screen,
    /// Print or export capture
    Print,
}

impl Surface {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Screen => "screen",
            Surface::Print => "print",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.surface, Surface::Screen);
        assert_eq!(options.link_labels.len(), 7);
        assert!(!options.collect_stats);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .for_print()
            .with_link_label("Mastodon")
            .with_accent_color("#000")
            .with_text_width(5)
            .with_stats(true);
        assert_eq!(options.surface, Surface::Print);
        assert_eq!(options.link_labels.last().map(String::as_str), Some("Mastodon"));
        assert_eq!(options.text_width, 20);
        assert!(options.collect_stats);
    }
}
