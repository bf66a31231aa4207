use pulldown_cmark::{Event, Options, Parser, Tag, html};

/// Supplies an embeddable source for a local image reference.
///
/// Returning `None` leaves the original reference in place; a broken image
/// must never abort a render.
pub trait ImageResolver {
    fn resolve(&mut self, reference: &str) -> Option<String>;
}

/// Render markdown to an HTML fragment.
///
/// Tables, strikethrough, footnotes and task lists are enabled. Image
/// destinations that are network URLs or already-embedded data URIs pass
/// through unchanged; everything else is offered to `resolver` and replaced
/// with its embeddable form when resolution succeeds.
pub fn render_markdown_to_html(markdown: &str, resolver: &mut dyn ImageResolver) -> String {
    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = if needs_embedding(&dest_url) {
                match resolver.resolve(&dest_url) {
                    Some(embedded) => embedded.into(),
                    None => dest_url,
                }
            } else {
                dest_url
            };
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Network and already-embedded references render as-is inside the webview;
/// local file references do not, and need a data URL.
fn needs_embedding(dest: &str) -> bool {
    !(dest.starts_with("http://")
        || dest.starts_with("https://")
        || dest.starts_with("data:")
        || dest.starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolver that embeds nothing.
    struct NoEmbedding;

    impl ImageResolver for NoEmbedding {
        fn resolve(&mut self, _reference: &str) -> Option<String> {
            None
        }
    }

    struct StubResolver {
        requests: Vec<String>,
    }

    impl ImageResolver for StubResolver {
        fn resolve(&mut self, reference: &str) -> Option<String> {
            self.requests.push(reference.to_string());
            if reference.ends_with(".png") {
                Some(format!("data:image/png;base64,RESOLVED:{reference}"))
            } else {
                None
            }
        }
    }

    #[test]
    fn test_basic_markdown_renders() {
        let html = render_markdown_to_html("# Title\n\nsome **bold** text", &mut NoEmbedding);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_extensions_enabled() {
        let html = render_markdown_to_html(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done",
            &mut NoEmbedding,
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_relative_image_is_embedded() {
        let mut resolver = StubResolver { requests: vec![] };
        let html = render_markdown_to_html("![logo](./logo.png)", &mut resolver);
        assert_eq!(resolver.requests, vec!["./logo.png"]);
        assert!(html.contains("data:image/png;base64,RESOLVED:./logo.png"));
    }

    #[test]
    fn test_network_and_data_images_pass_through() {
        let mut resolver = StubResolver { requests: vec![] };
        let html = render_markdown_to_html(
            "![a](https://example.com/a.png)\n\n![b](data:image/png;base64,AAAA)",
            &mut resolver,
        );
        assert!(resolver.requests.is_empty(), "no resolution attempted");
        assert!(html.contains("https://example.com/a.png"));
        assert!(html.contains("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_failed_resolution_keeps_original_reference() {
        let mut resolver = StubResolver { requests: vec![] };
        let html = render_markdown_to_html("![missing](missing.jpg)", &mut resolver);
        assert!(html.contains("missing.jpg"), "broken reference kept, render not aborted");
    }
}
