//! Static portfolio site generation.
//!
//! The page is assembled as a [`Node`] tree, so names, summaries and bullets
//! are escaped like any other text. Colors reach the stylesheet only after
//! [`css_color`] accepts them.

use crate::models::{
    non_blank, PortfolioSettings, PortfolioTemplate, ProfileDocument, DEFAULT_ACCENT_COLOR,
    DEFAULT_PRIMARY_COLOR,
};
use crate::render::markup::{css_color, el, safe_href, Element, Node};
use crate::render::{date_range, degree_line, display_name, non_empty};

const FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap";

/// The two files of a portfolio download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBundle {
    pub html: String,
    pub readme: String,
}

pub fn generate_site(doc: &ProfileDocument, settings: &PortfolioSettings, year: i32) -> SiteBundle {
    SiteBundle {
        html: site_html(doc, settings, year),
        readme: readme(doc),
    }
}

fn site_html(doc: &ProfileDocument, settings: &PortfolioSettings, year: i32) -> String {
    let info = &doc.personal_info;
    let name = display_name(info);
    let title = non_empty(&info.title).unwrap_or("Portfolio");

    let head = el("head")
        .child(el("meta").with_attr("charset", "UTF-8"))
        .child(
            el("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(
            el("meta")
                .with_attr("name", "description")
                .with_attr("content", format!("{title} - {name}'s Portfolio")),
        )
        .child(el("title").text(format!("{name} | {title}")))
        .child(
            el("link")
                .with_attr("rel", "preconnect")
                .with_attr("href", "https://fonts.googleapis.com"),
        )
        .child(
            el("link")
                .with_attr("rel", "stylesheet")
                .with_attr("href", FONT_STYLESHEET),
        )
        .child(el("style").child(Node::raw(stylesheet(settings))));

    let body = el("body")
        .class(format!("portfolio-{}", settings.template.as_str()))
        .child(hero(doc))
        .maybe(about(doc))
        .maybe(skills(doc))
        .maybe(experience(doc))
        .maybe(projects(doc))
        .maybe(education(doc))
        .maybe(contact(doc))
        .child(el("footer").child(el("p").text(format!(
            "© {year} {}. Built with ResumeGen.",
            info.full_name.trim()
        ))));

    let page: Node = el("html")
        .with_attr("lang", "en")
        .child(head)
        .child(body)
        .into();
    format!("<!DOCTYPE html>\n{}\n", page.to_html())
}

fn stylesheet(settings: &PortfolioSettings) -> String {
    let primary = css_color(&settings.primary_color, DEFAULT_PRIMARY_COLOR);
    let accent = css_color(&settings.accent_color, DEFAULT_ACCENT_COLOR);
    let hero = match settings.template {
        PortfolioTemplate::Developer => {
            ".hero { background: linear-gradient(135deg, var(--primary), var(--accent)); color: #fff; }\n\
             .hero h1 { font-family: 'JetBrains Mono', monospace; }"
        }
        PortfolioTemplate::Designer => {
            ".hero { background: radial-gradient(circle at top left, var(--accent), var(--primary)); color: #fff; }\n\
             .skill-card, .project-card { border-radius: 1rem; }"
        }
        PortfolioTemplate::Minimal => {
            ".hero { background: #fff; color: #0f172a; border-bottom: 4px solid var(--primary); }\n\
             .hero-links a { border: 1px solid var(--primary); }"
        }
    };
    format!(
        ":root {{ --primary: {primary}; --accent: {accent}; }}\n{BASE_CSS}\n{hero}\n"
    )
}

const BASE_CSS: &str = "* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Inter', sans-serif; line-height: 1.6; color: #1e293b; }
.hero { min-height: 100vh; display: flex; align-items: center; justify-content: center; text-align: center; padding: 2rem; }
.hero h1 { font-size: clamp(2.5rem, 5vw, 4rem); font-weight: 700; margin-bottom: 0.5rem; }
.hero p { font-size: 1.25rem; opacity: 0.9; margin-bottom: 2rem; }
.hero-links { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }
.hero-links a { padding: 0.75rem 1.5rem; background: #fff; color: var(--primary); text-decoration: none; border-radius: 0.5rem; font-weight: 500; }
section { padding: 5rem 2rem; max-width: 1200px; margin: 0 auto; }
.section-title { font-size: 2rem; font-weight: 700; margin-bottom: 2rem; border-bottom: 4px solid var(--primary); display: inline-block; }
.about-content { font-size: 1.1rem; color: #475569; max-width: 800px; }
.skills-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; }
.skill-card { padding: 1rem; background: #fff; border-radius: 0.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.skill-name { font-weight: 600; margin-bottom: 0.5rem; }
.skill-bar { height: 4px; background: #e2e8f0; border-radius: 2px; overflow: hidden; }
.skill-progress { height: 100%; background: var(--primary); }
.timeline { border-left: 2px solid #e2e8f0; padding-left: 2rem; }
.timeline-item { margin-bottom: 2rem; }
.timeline-title { font-weight: 600; font-size: 1.1rem; }
.timeline-subtitle { color: var(--primary); font-weight: 500; }
.timeline-date { color: #94a3b8; font-size: 0.875rem; }
.timeline-desc { color: #64748b; margin-top: 0.5rem; }
.projects-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }
.project-card { background: #fff; border-radius: 0.75rem; padding: 1.25rem; box-shadow: 0 4px 6px rgba(0,0,0,0.05); }
.project-title { font-weight: 600; font-size: 1.1rem; margin-bottom: 0.5rem; }
.project-desc { color: #64748b; font-size: 0.9rem; margin-bottom: 1rem; }
.tech-tag { display: inline-block; padding: 0.25rem 0.5rem; margin: 0 0.5rem 0.5rem 0; background: #f1f5f9; color: var(--accent); font-size: 0.75rem; border-radius: 0.25rem; }
.project-links a { color: var(--primary); text-decoration: none; font-size: 0.875rem; font-weight: 500; margin-right: 1rem; }
.contact-section { background: var(--primary); color: #fff; text-align: center; max-width: none; }
.contact-section .section-title { border-color: #fff; }
.contact-info { display: flex; flex-wrap: wrap; justify-content: center; gap: 2rem; margin-top: 2rem; }
.contact-item a { color: #fff; text-decoration: none; }
footer { text-align: center; padding: 2rem; color: #64748b; font-size: 0.875rem; }
@media (max-width: 768px) { .hero h1 { font-size: 2rem; } section { padding: 3rem 1rem; } }";

/// An external link, or `None` when the target is unsafe to follow.
fn link(label: &str, url: &str) -> Option<Element> {
    safe_href(url).map(|href| {
        el("a")
            .with_attr("href", href)
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener")
            .text(label)
    })
}

fn region(id: &'static str, title: &str) -> Element {
    el("section")
        .id(id)
        .child(el("h2").class("section-title").text(title))
}

fn hero(doc: &ProfileDocument) -> Element {
    let info = &doc.personal_info;
    let mut links = Vec::new();
    if let Some(email) = non_empty(&info.email) {
        links.extend(safe_href(&format!("mailto:{email}")).map(|href| {
            el("a").with_attr("href", href).text("Contact Me")
        }));
    }
    if let Some(github) = non_empty(&info.github) {
        links.extend(link("GitHub", github));
    }
    if let Some(linkedin) = non_empty(&info.linkedin) {
        links.extend(link("LinkedIn", linkedin));
    }

    el("header").class("hero").child(
        el("div")
            .child(el("h1").text(display_name(info)))
            .maybe(non_empty(&info.title).map(|t| el("p").text(t)))
            .maybe((!links.is_empty()).then(|| el("div").class("hero-links").children(links))),
    )
}

fn about(doc: &ProfileDocument) -> Option<Element> {
    let summary = non_empty(&doc.professional_summary.summary)?;
    Some(region("about", "About Me").child(el("p").class("about-content").text(summary)))
}

fn skills(doc: &ProfileDocument) -> Option<Element> {
    if doc.skills.is_empty() {
        return None;
    }
    let cards = doc.skills.iter().map(|skill| {
        el("div")
            .class("skill-card")
            .child(el("div").class("skill-name").text(&skill.name))
            .child(
                el("div").class("skill-bar").child(
                    el("div")
                        .class("skill-progress")
                        .style("width", format!("{}%", skill.level.meter_percent())),
                ),
            )
    });
    Some(region("skills", "Skills").child(el("div").class("skills-grid").children(cards)))
}

fn experience(doc: &ProfileDocument) -> Option<Element> {
    if doc.experience.is_empty() {
        return None;
    }
    let items = doc.experience.iter().map(|exp| {
        el("div")
            .class("timeline-item")
            .child(el("div").class("timeline-title").text(&exp.position))
            .child(el("div").class("timeline-subtitle").text(&exp.company))
            .child(
                el("div")
                    .class("timeline-date")
                    .text(date_range(&exp.start_date, exp.display_end())),
            )
            .maybe(non_empty(&exp.description).map(|d| el("p").class("timeline-desc").text(d)))
            .maybe((!exp.highlights.is_empty()).then(|| {
                el("ul")
                    .class("timeline-desc")
                    .children(exp.highlights.iter().map(|h| el("li").text(h)))
            }))
    });
    Some(region("experience", "Experience").child(el("div").class("timeline").children(items)))
}

fn projects(doc: &ProfileDocument) -> Option<Element> {
    if doc.projects.is_empty() {
        return None;
    }
    let cards = doc.projects.iter().map(|project| {
        let mut links = Vec::new();
        links.extend(non_blank(&project.github_url).and_then(|u| link("GitHub", u)));
        links.extend(non_blank(&project.live_url).and_then(|u| link("Live Demo", u)));

        el("div")
            .class("project-card")
            .child(el("h3").class("project-title").text(&project.name))
            .maybe(non_empty(&project.description).map(|d| el("p").class("project-desc").text(d)))
            .maybe((!project.technologies.is_empty()).then(|| {
                el("div").class("project-tech").children(
                    project
                        .technologies
                        .iter()
                        .map(|t| el("span").class("tech-tag").text(t)),
                )
            }))
            .maybe((!links.is_empty()).then(|| el("div").class("project-links").children(links)))
    });
    Some(region("projects", "Projects").child(el("div").class("projects-grid").children(cards)))
}

fn education(doc: &ProfileDocument) -> Option<Element> {
    if doc.education.is_empty() {
        return None;
    }
    let items = doc.education.iter().map(|edu| {
        el("div")
            .class("timeline-item")
            .child(
                el("div")
                    .class("timeline-title")
                    .text(degree_line(&edu.degree, &edu.field)),
            )
            .child(el("div").class("timeline-subtitle").text(&edu.institution))
            .child(
                el("div")
                    .class("timeline-date")
                    .text(date_range(&edu.start_date, &edu.end_date)),
            )
            .maybe(non_blank(&edu.gpa).map(|gpa| el("p").class("timeline-desc").text(format!("GPA: {gpa}"))))
    });
    Some(region("education", "Education").child(el("div").class("timeline").children(items)))
}

fn contact(doc: &ProfileDocument) -> Option<Element> {
    let info = &doc.personal_info;
    let mut items = Vec::new();
    if let Some(email) = non_empty(&info.email) {
        items.push(el("div").class("contact-item").maybe(
            safe_href(&format!("mailto:{email}")).map(|href| el("a").with_attr("href", href).text(email)),
        ));
    }
    if let Some(phone) = non_empty(&info.phone) {
        items.push(el("div").class("contact-item").maybe(
            safe_href(&format!("tel:{phone}")).map(|href| el("a").with_attr("href", href).text(phone)),
        ));
    }
    if let Some(location) = non_empty(&info.location) {
        items.push(el("div").class("contact-item").text(location));
    }
    if items.is_empty() {
        return None;
    }
    Some(
        region("contact", "Get In Touch")
            .class("contact-section")
            .child(el("p").text(
                "I'm always open to new opportunities and collaborations. Feel free to reach out!",
            ))
            .child(el("div").class("contact-info").children(items)),
    )
}

fn readme(doc: &ProfileDocument) -> String {
    let owner = match doc.personal_info.full_name.trim() {
        "" => "My".to_string(),
        name => format!("{name}'s"),
    };
    format!(
        "# {owner} Portfolio

This portfolio was generated using ResumeGen.

## How to Deploy

### Option 1: Netlify
1. Drag and drop this folder to https://app.netlify.com/drop
2. Your site will be live instantly!

### Option 2: Vercel
1. Install Vercel CLI: npm i -g vercel
2. Run: vercel deploy
3. Follow the prompts

### Option 3: GitHub Pages
1. Create a new repository
2. Upload these files
3. Go to Settings > Pages
4. Select your branch and save

## Files
- index.html - Your complete portfolio website
- README.md - This file
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_document;

    fn settings() -> PortfolioSettings {
        PortfolioSettings::default()
    }

    #[test]
    fn test_regions_follow_data() {
        let html = generate_site(&ProfileDocument::default(), &settings(), 2026).html;
        assert!(html.contains("class=\"hero\""));
        for id in ["about", "skills", "experience", "projects", "education", "contact"] {
            assert!(!html.contains(&format!("id=\"{id}\"")), "{id} should be absent");
        }

        let html = generate_site(&sample_document(), &settings(), 2026).html;
        for id in ["about", "skills", "experience", "projects", "education", "contact"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "{id} should be present");
        }
    }

    #[test]
    fn test_user_text_cannot_break_markup() {
        let mut doc = ProfileDocument::default();
        doc.personal_info.full_name = "</h1><script>alert(1)</script>".to_string();
        doc.professional_summary.summary = "<img src=x onerror=alert(1)>".to_string();
        let html = generate_site(&doc, &settings(), 2026).html;
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_dropped() {
        let mut doc = ProfileDocument::default();
        doc.personal_info.github = "javascript:alert(1)".to_string();
        doc.personal_info.linkedin = "https://linkedin.com/in/ada".to_string();
        let html = generate_site(&doc, &settings(), 2026).html;
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"https://linkedin.com/in/ada\""));
    }

    #[test]
    fn test_colors_become_custom_properties() {
        let portfolio = PortfolioSettings {
            primary_color: "#123456".to_string(),
            accent_color: "red;}</style><script>".to_string(),
            ..Default::default()
        };
        let html = generate_site(&sample_document(), &portfolio, 2026).html;
        assert!(html.contains("--primary: #123456;"));
        assert!(html.contains(&format!("--accent: {DEFAULT_ACCENT_COLOR};")));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_footer_and_readme() {
        let bundle = generate_site(&sample_document(), &settings(), 2031);
        assert!(bundle.html.contains("© 2031 Ada Lovelace. Built with ResumeGen."));
        assert!(bundle.readme.starts_with("# Ada Lovelace's Portfolio"));
        assert!(bundle.readme.contains("Netlify"));
        assert!(bundle.readme.contains("GitHub Pages"));
    }
}
