use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{RepositorySummary, UserProfile};
use crate::render::{align_width, dot_leader, profile_rows, title};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const AVATAR_SIZE: f32 = 150.0;
const GAP_BETWEEN_COLUMNS: f32 = 25.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MAX_CARD_REPOS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub border: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                border: "#2a2a72",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                border: "#2a2a72",
            },
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode",
            Theme::Light => "light_mode",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Text(String),
    Blank,
    Stat { key: String, dots: String, value: String },
}

fn card_lines(
    user: &UserProfile,
    repos: &[RepositorySummary],
    today: NaiveDate,
) -> (Vec<Line>, usize) {
    let rows = profile_rows(user, repos, today);
    let width = align_width(&rows);

    let mut lines = vec![Line::Header(header_line(&title(user), width))];
    if let Some(bio) = user.bio.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        lines.push(Line::Text(bio.to_string()));
    }
    for row in &rows {
        let (key, dots, value) = dot_leader(row.key, &row.value, width);
        lines.push(Line::Stat { key, dots, value });
    }

    if !repos.is_empty() {
        lines.push(Line::Blank);
        lines.push(Line::Header(header_line("- Repositories", width)));
        for repo in repos.iter().take(MAX_CARD_REPOS) {
            let value = match repo.language.as_deref() {
                Some(lang) => format!("{lang}, {} stars", repo.stargazers_count),
                None => format!("{} stars", repo.stargazers_count),
            };
            let (key, dots, value) = dot_leader(&repo.name, &value, width);
            lines.push(Line::Stat { key, dots, value });
        }
        if repos.len() > MAX_CARD_REPOS {
            lines.push(Line::Text(format!(
                "... and {} more",
                repos.len() - MAX_CARD_REPOS
            )));
        }
    }

    (lines, width)
}

/// SVG profile card in the given theme.
pub fn generate_svg(
    user: &UserProfile,
    repos: &[RepositorySummary],
    today: NaiveDate,
    theme: Theme,
) -> String {
    let colors = theme.colors();
    let (lines, width) = card_lines(user, repos, today);

    let right_x = LEFT_PADDING + AVATAR_SIZE + GAP_BETWEEN_COLUMNS;
    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;
        match line {
            Line::Blank => {}
            Line::Header(text) | Line::Text(text) => {
                tspans.push_str(&format!(
                    "<tspan x=\"{right_x}\" y=\"{y}\">{}</tspan>\n",
                    escape_xml(text)
                ));
            }
            Line::Stat { key, dots, value } => {
                tspans.push_str(&format!(
                    r#"<tspan x="{right_x}" y="{y}" class="cc">. </tspan><tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(key),
                    escape_xml(dots),
                    escape_xml(value)
                ));
            }
        }
    }

    let text_height = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;
    let w = right_x + (width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = text_height.max(AVATAR_SIZE + 2.0 * LEFT_PADDING) + 10.0;

    let avatar = match user.avatar_url.as_deref() {
        Some(url) => format!(
            r#"<image href="{}" x="{LEFT_PADDING}" y="{LEFT_PADDING}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}" clip-path="url(#avatar)"/>"#,
            escape_xml(url)
        ),
        None => format!(
            r#"<text x="{x}" y="{y}" fill="{cc}" text-anchor="middle">No Image</text>"#,
            x = LEFT_PADDING + AVATAR_SIZE / 2.0,
            y = LEFT_PADDING + AVATAR_SIZE / 2.0,
            cc = colors.cc
        ),
    };

    let r = AVATAR_SIZE / 2.0;
    let cx = LEFT_PADDING + r;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<defs>
<clipPath id="avatar"><circle cx="{cx}" cy="{cx}" r="{r}"/></clipPath>
</defs>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- AVATAR -->
<circle cx="{cx}" cy="{cx}" r="{r}" fill="none" stroke="{border}" stroke-width="10"/>
{avatar}

<!-- PROFILE -->
<text fill="{text}">
{tspans}</text>

</svg>
"#,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        bg = colors.bg,
        border = colors.border,
        text = colors.text,
    )
}

/// Writes `<login>_dark_mode.svg` and `<login>_light_mode.svg` into `dir`,
/// creating it if needed. Returns the written paths.
pub fn write_cards(
    dir: &Path,
    user: &UserProfile,
    repos: &[RepositorySummary],
    today: NaiveDate,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create SVG directory {}", dir.display()))?;

    let login = user.login.as_deref().unwrap_or("profile");
    let mut written = Vec::new();
    for theme in [Theme::Dark, Theme::Light] {
        let path = dir.join(format!("{login}_{}.svg", theme.file_suffix()));
        fs::write(&path, generate_svg(user, repos, today, theme))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn user() -> UserProfile {
        UserProfile {
            login: Some("octocat".to_string()),
            name: Some("Octo <Cat> & Co".to_string()),
            avatar_url: Some("https://avatars.githubusercontent.com/u/583231?v=4&s=150".to_string()),
            followers: 3,
            ..UserProfile::default()
        }
    }

    fn repos(n: usize) -> Vec<RepositorySummary> {
        (0..n)
            .map(|i| RepositorySummary {
                id: i as u64,
                name: format!("repo-{i}"),
                description: None,
                language: Some("Rust".to_string()),
                stargazers_count: i as u64,
                watchers_count: 0,
                forks_count: 0,
                html_url: format!("https://github.com/octocat/repo-{i}"),
                fork: false,
            })
            .collect()
    }

    #[test]
    fn escapes_user_text() {
        let svg = generate_svg(&user(), &[], today(), Theme::Dark);
        assert!(svg.contains("Octo &lt;Cat&gt; &amp; Co (octocat)"));
        assert!(svg.contains("u/583231?v=4&amp;s=150"));
        assert!(!svg.contains("<Cat>"));
    }

    #[test]
    fn theme_colors_applied() {
        let dark = generate_svg(&user(), &[], today(), Theme::Dark);
        let light = generate_svg(&user(), &[], today(), Theme::Light);
        assert!(dark.contains("fill=\"#161b22\""));
        assert!(light.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn caps_listed_repositories() {
        let svg = generate_svg(&user(), &repos(8), today(), Theme::Dark);
        assert!(svg.contains("repo-5"));
        assert!(!svg.contains("repo-6"));
        assert!(svg.contains("... and 2 more"));
    }

    #[test]
    fn missing_avatar_has_placeholder() {
        let mut user = user();
        user.avatar_url = None;
        let svg = generate_svg(&user, &[], today(), Theme::Light);
        assert!(svg.contains("No Image"));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn writes_both_themes() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_cards(&dir.path().join("cards"), &user(), &repos(1), today()).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["octocat_dark_mode.svg", "octocat_light_mode.svg"]);
        for path in paths {
            assert!(fs::read_to_string(path).unwrap().starts_with("<?xml"));
        }
    }
}
