use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A syntax error pointing at a span of the source text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {range:?}")]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn renders_snippet() {
        let text = "view: orders {\n  hidden yes\n}\n";
        let range = TextRange::at(TextSize::new(24), TextSize::new(3));
        let diagnostic = Diagnostic::error("expected `:`", range);

        let rendered = diagnostic.render(&Renderer::plain(), "orders.view.lkml", text).to_string();
        assert!(rendered.starts_with("error: expected `:`"));
        assert!(rendered.contains("orders.view.lkml"));
        assert!(rendered.contains("here"));
    }

    #[test]
    fn display_includes_message() {
        let diagnostic = Diagnostic::error("unexpected `}`", TextRange::empty(TextSize::new(4)));
        assert_eq!(diagnostic.to_string(), "unexpected `}` at 4..4");
    }
}
