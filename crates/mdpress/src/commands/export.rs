use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::assets;
use crate::images::ImageCache;
use crate::render;
use crate::segmenter;

/// Export a document file as a paged HTML deck next to the source file
/// (or at `output` when given).
pub fn run(file: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let document = assets::read_document(&file)?;
    let title = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "slides".to_string());
    let output = output.unwrap_or_else(|| file.with_extension("deck.html"));

    let count = write_deck(&document, Some(file), &output, &title)?;

    println!(
        "{} {} slides to {}",
        "Exported".green().bold(),
        count,
        output.display()
    );
    Ok(())
}

/// Render `document` as a paged HTML deck: one page per slide, in slide
/// order, with local images (resolved against `base`) embedded as data
/// URLs. The result is self-contained and prints to PDF from any browser
/// (`@page` sized 16:9). Returns the number of slides written.
pub fn write_deck(
    document: &str,
    base: Option<PathBuf>,
    output: &Path,
    title: &str,
) -> anyhow::Result<usize> {
    let slides = segmenter::segment(document);
    if slides.is_empty() {
        anyhow::bail!("Document has no slides to export");
    }

    let mut images = ImageCache::new();
    images.retarget(base);

    let pages: Vec<String> = slides
        .iter()
        .map(|slide| render::render_markdown_to_html(slide, &mut images))
        .collect();

    std::fs::write(output, deck_html(title, &pages))?;
    Ok(pages.len())
}

fn deck_html(title: &str, pages: &[String]) -> String {
    let mut body = String::new();
    for (i, page) in pages.iter().enumerate() {
        body.push_str(&format!(
            "<section class=\"slide\" data-slide=\"{}\">\n{}</section>\n",
            i + 1,
            page
        ));
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{}</title>
<style>{}</style>
</head>
<body>
{}</body>
</html>
"#,
        html_escape(title),
        DECK_CSS,
        body
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const DECK_CSS: &str = r#"
@page { size: 1280px 720px; margin: 0; }
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
.slide {
    width: 1280px;
    height: 720px;
    padding: 60px 80px;
    overflow: hidden;
    page-break-after: always;
    background: #1e1e2e;
    color: #cdd6f4;
}
.slide h1 { font-size: 52px; margin: 0 0 24px; }
.slide h2 { font-size: 38px; }
.slide p, .slide li { font-size: 24px; line-height: 1.5; }
.slide pre { background: #11111b; padding: 16px; border-radius: 8px; overflow: hidden; }
.slide code { font-family: ui-monospace, "SF Mono", Menlo, Consolas, monospace; font-size: 20px; }
.slide img { max-width: 100%; max-height: 480px; }
.slide blockquote { border-left: 4px solid #89b4fa; margin-left: 0; padding-left: 16px; color: #a6adc8; }
.slide table { border-collapse: collapse; }
.slide th, .slide td { border: 1px solid #45475a; padding: 8px 14px; font-size: 22px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_deck_pages_follow_segmenter_order() {
        let pages = vec![
            "<h1>alpha</h1>".to_string(),
            "<h1>beta</h1>".to_string(),
            "<h1>gamma</h1>".to_string(),
        ];
        let html = deck_html("talk", &pages);

        let alpha = html.find("alpha").unwrap();
        let beta = html.find("beta").unwrap();
        let gamma = html.find("gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
        assert_eq!(html.matches("<section class=\"slide\"").count(), 3);
        assert!(html.contains("data-slide=\"3\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = deck_html("a < b & c", &["<p>x</p>".to_string()]);
        assert!(html.contains("<title>a &lt; b &amp; c</title>"));
    }

    #[test]
    fn test_run_writes_deck_next_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("talk.md");
        std::fs::File::create(&file)
            .unwrap()
            .write_all(b"# One\n\n---\n\n# Two")
            .unwrap();

        run(file.clone(), None).unwrap();

        let deck = std::fs::read_to_string(dir.path().join("talk.deck.html")).unwrap();
        assert!(deck.contains("<h1>One</h1>"));
        assert!(deck.contains("<h1>Two</h1>"));
    }

    #[test]
    fn test_run_fails_on_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.md");
        std::fs::write(&file, "---\n\n---\n").unwrap();

        assert!(run(file, None).is_err());
    }
}
