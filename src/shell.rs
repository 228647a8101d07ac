//! Page shell rendering.
//!
//! Produces the markup the router binds to. The shell is the content side of
//! the contract: given the gallery images and the About copy, it lays out
//!
//! ```text
//! nav.slider-tabs
//! ├── button.slider-tab[data-section=0]   "Images"
//! ├── button.slider-tab[data-section=1]   "About"
//! └── div.slider-indicator
//! main#main-content
//! └── div#seamless-slider                  (N × 100vw, translated per section)
//!     ├── section#gallery-section.seamless-section
//!     └── section#about-section.seamless-section
//! script#router-config                     (router config as JSON)
//! ```
//!
//! Sections are matched to content by name: `gallery` gets the image grid,
//! `about` gets the rendered markdown, anything else renders empty.
//!
//! The initial section is resolved from the request path exactly as the
//! router resolves it, so the first paint already shows the right pane and
//! the right active tab.

use crate::config::RouterConfig;
use crate::section::{Section, SectionTable};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Content supplied by the CMS export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShellContent {
    pub images: Vec<GalleryImage>,
    pub about: Option<AboutContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutContent {
    #[serde(default)]
    pub title: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

const DEFAULT_ABOUT_TITLE: &str = "About Domain King";

/// Read shell content from a JSON file.
pub fn load_content(path: &Path) -> Result<ShellContent, ShellError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Render the full page for a request at `path`.
pub fn render_shell(
    config: &RouterConfig,
    content: &ShellContent,
    path: &str,
) -> Result<Markup, ShellError> {
    let sections = config.section_table()?;
    let current = sections.resolve_path(path);
    let title = sections
        .get(current)
        .map(|spec| spec.title.as_str())
        .unwrap_or_default();
    let config_json = serde_json::to_string(config)?;
    let count = sections.len();

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(slider_css(config))) }
            }
            body {
                (render_tabs(&sections, current))
                main id="main-content" {
                    div id="seamless-slider" style=(format!(
                        "width: {}vw; transform: translateX({}vw)",
                        count * 100,
                        -(current.index() as i64) * 100
                    )) {
                        @for (sec, spec) in sections.iter() {
                            section.seamless-section id={ (spec.name) "-section" }
                                data-section=(sec.index()) {
                                @match spec.name.as_str() {
                                    "gallery" => { (render_gallery(&content.images)) }
                                    "about" => { (render_about(content.about.as_ref())) }
                                    _ => {}
                                }
                            }
                        }
                    }
                }
                // A literal `</` in the payload would close the script element early.
                script id="router-config" type="application/json" {
                    (PreEscaped(config_json.replace("</", "<\\/")))
                }
            }
        }
    })
}

/// Renders the tab strip and its indicator.
pub fn render_tabs(sections: &SectionTable, current: Section) -> Markup {
    html! {
        nav.slider-tabs {
            @for (section, spec) in sections.iter() {
                @let active = section == current;
                button.slider-tab.active[active] type="button"
                    data-section=(section.index()) aria-selected=(active) {
                    (spec.label)
                }
            }
            div.slider-indicator {}
        }
    }
}

fn render_gallery(images: &[GalleryImage]) -> Markup {
    html! {
        div.gallery-grid {
            @for image in images {
                figure.gallery-item data-id=(image.id) {
                    img src=(image.url) alt=[image.title.as_deref()] loading="lazy";
                }
            }
        }
    }
}

fn render_about(about: Option<&AboutContent>) -> Markup {
    let title = about
        .and_then(|a| a.title.as_deref())
        .unwrap_or(DEFAULT_ABOUT_TITLE);
    let body = about.map(|a| markdown_to_html(&a.body)).unwrap_or_default();
    html! {
        div.about-content {
            h1 { (title) }
            (PreEscaped(body))
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn slider_css(config: &RouterConfig) -> String {
    format!(
        r#"#seamless-slider {{
    display: flex;
    height: 100vh;
    overflow: hidden;
    position: relative;
    transition: {transition};
}}
.seamless-section {{
    width: 100vw;
    height: 100vh;
    overflow-y: auto;
    flex-shrink: 0;
    position: relative;
}}
.slider-tabs {{ position: relative; display: flex; }}
.slider-tab {{ position: relative; z-index: 1; }}
.slider-indicator {{ position: absolute; top: 0; bottom: 0; left: 0; z-index: 0; }}"#,
        transition = config.transition.css,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ShellContent {
        serde_json::from_str(
            r##"{
                "images": [
                    { "id": "a1", "title": "Dusk", "url": "https://cdn.example/a1.jpg" },
                    { "id": "b2", "url": "https://cdn.example/b2.jpg" }
                ],
                "about": { "title": "Our Story", "body": "We **shoot** things." }
            }"##,
        )
        .unwrap()
    }

    fn render(path: &str) -> String {
        render_shell(&RouterConfig::default(), &content(), path)
            .unwrap()
            .into_string()
    }

    #[test]
    fn shell_contains_dom_contract() {
        let html = render("/");
        assert!(html.contains(r#"id="seamless-slider""#));
        assert!(html.contains(r#"id="gallery-section""#));
        assert!(html.contains(r#"id="about-section""#));
        assert!(html.contains(r#"class="slider-indicator""#));
        assert_eq!(html.matches(r#"data-section="0""#).count(), 2);
    }

    #[test]
    fn landmark_elements_carry_ids() {
        let html = render("/");
        assert!(html.contains(r#"<main id="main-content">"#));
        assert!(html.contains(r#"<div id="seamless-slider""#));
        assert!(html.contains(r#"<script id="router-config""#));
    }

    #[test]
    fn initial_path_selects_active_tab_and_offset() {
        let html = render("/about");
        assert!(html.contains("<title>About - DOMAIN KING</title>"));
        assert!(html.contains("translateX(-100vw)"));
        assert_eq!(html.matches(r#"aria-selected="true""#).count(), 1);
        let active = html.find(r#"class="slider-tab active""#).unwrap();
        let tag_end = active + html[active..].find('>').unwrap();
        assert!(html[active..tag_end].contains(r#"data-section="1""#));
    }

    #[test]
    fn gallery_renders_images() {
        let html = render("/");
        assert!(html.contains(r#"src="https://cdn.example/a1.jpg""#));
        assert!(html.contains(r#"alt="Dusk""#));
        assert!(html.contains(r#"data-id="b2""#));
    }

    #[test]
    fn about_renders_markdown() {
        let html = render("/");
        assert!(html.contains("<h1>Our Story</h1>"));
        assert!(html.contains("<strong>shoot</strong>"));
    }

    #[test]
    fn about_title_falls_back() {
        let html = render_shell(&RouterConfig::default(), &ShellContent::default(), "/")
            .unwrap()
            .into_string();
        assert!(html.contains("<h1>About Domain King</h1>"));
    }

    #[test]
    fn embedded_config_is_json() {
        let html = render("/");
        let tag = html.find(r#"id="router-config""#).unwrap();
        let start = tag + html[tag..].find('>').unwrap() + 1;
        let end = start + html[start..].find("</script>").unwrap();
        let parsed: RouterConfig =
            serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap();
        assert_eq!(parsed, RouterConfig::default());
    }

    #[test]
    fn invalid_config_is_error() {
        let mut config = RouterConfig::default();
        config.sections.clear();
        assert!(render_shell(&config, &content(), "/").is_err());
    }
}
