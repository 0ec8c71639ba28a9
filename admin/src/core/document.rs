//! Project document mapper: renders a record to front matter + markdown and
//! scrapes it back.
//!
//! The rendered layout is consumed by the static site, so `render` must stay
//! byte-stable. `parse` is deliberately tolerant: unknown or missing fields
//! come back empty, and only a broken front matter delimiter is an error.
//!
//! Quoted front matter scalars escape `\` and `"` the way YAML double-quoted
//! strings do. Figure roles and captions are HTML-escaped, with `:` in roles
//! written as `&#58;` so it cannot be taken for the role separator.

use std::sync::LazyLock;

use minijinja::{Environment, context};
use regex::Regex;
use serde::Serialize;

use crate::core::layout::{asset_url, filename_for_position, hero_url};
use crate::core::record::{ProjectRecord, Visual};
use crate::error::{ProjectError, Result};

const PROJECT_TEMPLATE: &str = include_str!("templates/project.md");
const TEMPLATE_NAME: &str = "project.md";

pub const FRONT_MATTER_DELIMITER: &str = "---";

pub const OVERVIEW_HEADER: &str = "Overview";
pub const VISUALS_HEADER: &str = "Key Visuals";
pub const TAKEAWAYS_HEADER: &str = "Key Takeaways";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| quoted_field("title"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| quoted_field("description"));
static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| quoted_field("category"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^date:[ \t]*(\S+)").expect("date pattern is valid"));
static TOOLS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^tools:[ \t]*\[(.*)\][ \t]*\r?$").expect("tools pattern is valid")
});
static TOOL_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("tool item pattern is valid")
});

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<li>(.*?)</li>").expect("list item pattern is valid"));

static FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<figure class="project-visual">\s*<img src="([^"]+)" alt=".*?">\s*<figcaption><strong>([^:<]+):</strong>\s*([^<]+)</figcaption>"#,
    )
    .expect("figure pattern is valid")
});
static PLAIN_FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<figure class="project-visual">\s*<img src="([^"]+)" alt=".*?">\s*<figcaption>([^:<]+):\s*([^<]+)</figcaption>"#,
    )
    .expect("plain figure pattern is valid")
});

fn quoted_field(key: &str) -> Regex {
    Regex::new(&format!(r#"(?m)^{key}:[ \t]*"(.*)"[ \t]*\r?$"#))
        .expect("quoted field pattern is valid")
}

/// One entry of the Key Visuals section.
#[derive(Debug, Serialize)]
struct FigureContext {
    src: String,
    role: String,
    caption: String,
}

/// Render `record` as the document stored for `slug`.
///
/// Output is a pure function of its inputs. The hero (position 0) is only
/// referenced from the front matter; positions 1.. are listed as figures.
pub fn render(record: &ProjectRecord, slug: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, PROJECT_TEMPLATE)?;

    let figures: Vec<FigureContext> = record
        .visuals
        .iter()
        .enumerate()
        .skip(1)
        .map(|(position, visual)| FigureContext {
            src: asset_url(slug, &filename_for_position(position)),
            role: escape_html(&visual.role).replace(':', "&#58;"),
            caption: escape_html(&visual.caption),
        })
        .collect();
    let tools: Vec<String> = record.tools.iter().map(|tool| escape_quoted(tool)).collect();
    let takeaways: Vec<&str> = record
        .takeaways
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();

    let rendered = env.get_template(TEMPLATE_NAME)?.render(context! {
        title => escape_quoted(&record.title),
        description => escape_quoted(&record.description),
        hero_image => hero_url(slug),
        tools => tools,
        category => escape_quoted(&record.category),
        date => record.date,
        overview => record.overview.trim(),
        visuals => figures,
        takeaways => takeaways,
    })?;
    Ok(rendered)
}

/// Parse a stored document back into a record.
///
/// Visuals come back exactly as the document describes them, with `filename`
/// taken from each image reference; callers reconcile them against disk.
pub fn parse(text: &str) -> Result<ProjectRecord> {
    let (front_matter, body) = split_front_matter(text)?;

    let sections = split_sections(body);
    let section = |name: &str| {
        sections
            .iter()
            .find(|(header, _)| *header == name)
            .map(|(_, content)| content.as_str())
    };

    Ok(ProjectRecord {
        title: title_of(front_matter),
        description: unescape_quoted(&capture(&DESCRIPTION_RE, front_matter)),
        category: category_of(front_matter),
        date: capture(&DATE_RE, front_matter),
        tools: parse_tools(front_matter),
        overview: section(OVERVIEW_HEADER).unwrap_or_default().to_string(),
        takeaways: section(TAKEAWAYS_HEADER)
            .map(parse_takeaways)
            .unwrap_or_default(),
        visuals: section(VISUALS_HEADER)
            .map(parse_visuals)
            .unwrap_or_default(),
    })
}

/// Split a document into its front matter and the body that follows it.
pub fn split_front_matter(text: &str) -> Result<(&str, &str)> {
    let rest = text.strip_prefix(FRONT_MATTER_DELIMITER).ok_or_else(|| {
        ProjectError::Format("document does not start with front matter".to_string())
    })?;
    let closing = format!("\n{FRONT_MATTER_DELIMITER}");
    let end = rest
        .find(&closing)
        .ok_or_else(|| ProjectError::Format("front matter is not closed".to_string()))?;
    Ok((&rest[..end], &rest[end + closing.len()..]))
}

/// First capture group of `re` in `haystack`, or empty.
pub(crate) fn capture(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub(crate) fn title_of(front_matter: &str) -> String {
    unescape_quoted(&capture(&TITLE_RE, front_matter))
}

pub(crate) fn date_of(front_matter: &str) -> String {
    capture(&DATE_RE, front_matter)
}

pub(crate) fn category_of(front_matter: &str) -> String {
    unescape_quoted(&capture(&CATEGORY_RE, front_matter))
}

fn parse_tools(front_matter: &str) -> Vec<String> {
    let list = capture(&TOOLS_RE, front_matter);
    TOOL_ITEM_RE
        .captures_iter(&list)
        .map(|caps| unescape_quoted(caps[1].trim()))
        .filter(|tool| !tool.is_empty())
        .collect()
}

fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Drop the backslash in front of every escaped character.
fn unescape_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#58;", ":")
        .replace("&amp;", "&")
}

/// Split the body into (header, trimmed content) pairs.
///
/// Only the known `## ` section headers start a section, so other headings
/// stay inside the overview. Lines split on `\n` alone; a `\r` is content.
fn split_sections(body: &str) -> Vec<(&str, String)> {
    let mut sections: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in body.split('\n') {
        let header = line
            .strip_prefix("## ")
            .map(str::trim)
            .filter(|name| [OVERVIEW_HEADER, VISUALS_HEADER, TAKEAWAYS_HEADER].contains(name));
        if let Some(header) = header {
            sections.push((header, Vec::new()));
        } else if let Some((_, lines)) = sections.last_mut() {
            lines.push(line);
        }
    }
    sections
        .into_iter()
        .map(|(header, lines)| (header, lines.join("\n").trim().to_string()))
        .collect()
}

fn parse_takeaways(section: &str) -> Vec<String> {
    let items: Vec<String> = LIST_ITEM_RE
        .captures_iter(section)
        .map(|caps| caps[1].trim().to_string())
        .collect();
    if !items.is_empty() {
        return items;
    }
    section
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches(['-', ' ']).trim().to_string())
        .collect()
}

fn parse_visuals(section: &str) -> Vec<Visual> {
    let mut visuals = figures(&FIGURE_RE, section);
    if visuals.is_empty() {
        visuals = figures(&PLAIN_FIGURE_RE, section);
    }
    visuals
}

fn figures(re: &Regex, section: &str) -> Vec<Visual> {
    re.captures_iter(section)
        .map(|caps| {
            let src = &caps[1];
            Visual {
                filename: src.rsplit('/').next().unwrap_or(src).to_string(),
                role: unescape_html(caps[2].trim()),
                caption: unescape_html(caps[3].trim()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectRecord {
        ProjectRecord {
            title: "Sensor Mesh".to_string(),
            description: "Low-power telemetry".to_string(),
            category: "Embedded".to_string(),
            date: "2024-03-01".to_string(),
            tools: vec!["Rust".to_string(), "LoRa".to_string()],
            overview: "Built a mesh.\n\nIt worked.".to_string(),
            takeaways: vec!["Measure first".to_string(), "Ship small".to_string()],
            visuals: vec![
                Visual::new("Result", "Dashboard"),
                Visual::new("Architecture", "Node topology"),
                Visual::new("Process", "Field test"),
            ],
        }
    }

    const EXPECTED: &str = r#"---
layout: project
title: "Sensor Mesh"
description: "Low-power telemetry"
hero_image: /assets/images/projects/sensor-mesh/hero.png
tools: ["Rust", "LoRa"]
category: "Embedded"
date: 2024-03-01
---

## Overview
Built a mesh.

It worked.

## Key Visuals

<figure class="project-visual">
  <img src="/assets/images/projects/sensor-mesh/visual-1.png" alt="Node topology">
  <figcaption><strong>Architecture:</strong> Node topology</figcaption>
</figure>

<figure class="project-visual">
  <img src="/assets/images/projects/sensor-mesh/visual-2.png" alt="Field test">
  <figcaption><strong>Process:</strong> Field test</figcaption>
</figure>

## Key Takeaways
<ul class="project-takeaways">
  <li>Measure first</li>
  <li>Ship small</li>
</ul>
"#;

    #[test]
    fn render_produces_site_layout() {
        let rendered = render(&sample(), "sensor-mesh").expect("render");
        assert_eq!(rendered, EXPECTED);
    }

    #[test]
    fn render_is_deterministic() {
        let record = sample();
        let first = render(&record, "sensor-mesh").expect("render");
        let second = render(&record, "sensor-mesh").expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_tools_render_as_empty_list() {
        let record = ProjectRecord {
            tools: Vec::new(),
            visuals: vec![Visual::new("Result", "Hero")],
            ..sample()
        };
        let rendered = render(&record, "sensor-mesh").expect("render");
        assert!(rendered.contains("\ntools: []\n"));
        assert!(rendered.contains("## Key Visuals\n\n\n\n## Key Takeaways"));
    }

    #[test]
    fn parse_inverts_render() {
        let record = sample();
        let parsed = parse(&render(&record, "sensor-mesh").expect("render")).expect("parse");

        assert_eq!(parsed.title, record.title);
        assert_eq!(parsed.description, record.description);
        assert_eq!(parsed.category, record.category);
        assert_eq!(parsed.date, record.date);
        assert_eq!(parsed.tools, record.tools);
        assert_eq!(parsed.overview, record.overview);
        assert_eq!(parsed.takeaways, record.takeaways);
        let filenames: Vec<&str> = parsed.visuals.iter().map(|v| v.filename.as_str()).collect();
        assert_eq!(filenames, vec!["visual-1.png", "visual-2.png"]);
        assert_eq!(parsed.visuals[0].role, "Architecture");
        assert_eq!(parsed.visuals[1].caption, "Field test");
    }

    #[test]
    fn quotes_inside_values_survive_round_trip() {
        let record = ProjectRecord {
            title: r#"The "Fast" Path"#.to_string(),
            visuals: vec![
                Visual::new("Result", "Hero"),
                Visual::new("Benchmark", r#"p99 "before" and after"#),
            ],
            ..sample()
        };
        let parsed = parse(&render(&record, "the-fast-path").expect("render")).expect("parse");
        assert_eq!(parsed.title, record.title);
        assert_eq!(parsed.visuals[0].caption, r#"p99 "before" and after"#);
    }

    #[test]
    fn missing_opening_delimiter_is_format_error() {
        let err = parse("title: \"x\"\n").expect_err("no front matter");
        assert!(matches!(err, ProjectError::Format(_)));
    }

    #[test]
    fn unclosed_front_matter_is_format_error() {
        let err = parse("---\ntitle: \"x\"\n## Overview\n").expect_err("unclosed");
        assert!(matches!(err, ProjectError::Format(_)));
    }

    #[test]
    fn missing_fields_parse_as_empty() {
        let parsed = parse("---\ntitle: \"Only Title\"\n---\n").expect("parse");
        assert_eq!(parsed.title, "Only Title");
        assert!(parsed.description.is_empty());
        assert!(parsed.date.is_empty());
        assert!(parsed.tools.is_empty());
        assert!(parsed.overview.is_empty());
        assert!(parsed.takeaways.is_empty());
        assert!(parsed.visuals.is_empty());
    }

    #[test]
    fn takeaways_fall_back_to_plain_list() {
        let doc = "---\ntitle: \"x\"\n---\n\n## Key Takeaways\n- First lesson\n  - Second lesson\nnot an item\n";
        let parsed = parse(doc).expect("parse");
        assert_eq!(parsed.takeaways, vec!["First lesson", "Second lesson"]);
    }

    #[test]
    fn visuals_fall_back_to_plain_caption() {
        let doc = r#"---
title: "x"
---

## Key Visuals

<figure class="project-visual">
  <img src="/assets/images/projects/x/visual-1.png" alt="Wiring">
  <figcaption>Diagram: Wiring</figcaption>
</figure>
"#;
        let parsed = parse(doc).expect("parse");
        assert_eq!(
            parsed.visuals,
            vec![Visual {
                filename: "visual-1.png".to_string(),
                role: "Diagram".to_string(),
                caption: "Wiring".to_string(),
            }]
        );
    }

    #[test]
    fn overview_stops_at_next_known_header() {
        let doc = "---\ntitle: \"x\"\n---\n\n## Overview\nline one\n## Notes\nline two\n\n## Key Takeaways\n- done\n";
        let parsed = parse(doc).expect("parse");
        assert_eq!(parsed.overview, "line one\n## Notes\nline two");
        assert_eq!(parsed.takeaways, vec!["done"]);
    }

    #[test]
    fn crlf_front_matter_is_read() {
        let doc = "---\r\ntitle: \"x\"\r\ntools: [\"Rust\", \"Go\"]\r\ndate: 2024-01-02\r\n---\r\n\r\n## Overview\r\nbody\r\n";
        let parsed = parse(doc).expect("parse");
        assert_eq!(parsed.title, "x");
        assert_eq!(parsed.tools, vec!["Rust", "Go"]);
        assert_eq!(parsed.date, "2024-01-02");
        assert_eq!(parsed.overview, "body");
    }

    #[test]
    fn awkward_values_survive_round_trip() {
        let cases: Vec<(&str, ProjectRecord)> = vec![
            (
                "tools with separators",
                ProjectRecord {
                    tools: vec![
                        "C, C++".to_string(),
                        r#"say "hi""#.to_string(),
                        r"back\slash".to_string(),
                        "arr[0]".to_string(),
                    ],
                    ..sample()
                },
            ),
            (
                "crlf overview",
                ProjectRecord {
                    overview: "first\r\nsecond\r\n\r\nthird".to_string(),
                    ..sample()
                },
            ),
            (
                "overview subheading",
                ProjectRecord {
                    overview: "Intro.\n\n## Background\nDetails.".to_string(),
                    ..sample()
                },
            ),
            (
                "markup in captions",
                ProjectRecord {
                    visuals: vec![
                        Visual::new("Result", "Hero"),
                        Visual::new("Latency", r#"p99 < 5ms & "stable" > before"#),
                        Visual::new("Step 1: Wiring", "Bench: rev <b>"),
                    ],
                    ..sample()
                },
            ),
            (
                "quoted scalars",
                ProjectRecord {
                    title: r#"The "Fast" Path \ v2"#.to_string(),
                    description: r#"ends with a backslash \"#.to_string(),
                    category: r#""Quoted""#.to_string(),
                    ..sample()
                },
            ),
        ];

        for (name, record) in cases {
            let rendered = render(&record, "case").expect("render");
            let parsed = parse(&rendered).expect("parse");
            assert_eq!(parsed.title, record.title, "{name}");
            assert_eq!(parsed.description, record.description, "{name}");
            assert_eq!(parsed.category, record.category, "{name}");
            assert_eq!(parsed.tools, record.tools, "{name}");
            assert_eq!(parsed.overview, record.overview, "{name}");
            assert_eq!(parsed.takeaways, record.takeaways, "{name}");
            let described: Vec<(&str, &str)> = parsed
                .visuals
                .iter()
                .map(|v| (v.role.as_str(), v.caption.as_str()))
                .collect();
            let expected: Vec<(&str, &str)> = record.visuals[1..]
                .iter()
                .map(|v| (v.role.as_str(), v.caption.as_str()))
                .collect();
            assert_eq!(described, expected, "{name}");
        }
    }

    #[test]
    fn roles_and_captions_are_escaped_in_markup() {
        let record = ProjectRecord {
            visuals: vec![
                Visual::new("Result", "Hero"),
                Visual::new("A: B", "x < y"),
            ],
            ..sample()
        };
        let rendered = render(&record, "case").expect("render");
        assert!(rendered.contains("<figcaption><strong>A&#58; B:</strong> x &lt; y</figcaption>"));
        assert!(rendered.contains(r#"alt="x &lt; y""#));
    }
}
