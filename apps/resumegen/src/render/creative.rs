//! Two-column layout: a colored sidebar with identity, contact and skill
//! meters beside the main column. Also used for the `ats` and `tech` choices.

use crate::models::ProfileDocument;

use super::markup::{el, Element};
use super::{contact_items, date_range, degree_line, display_name, display_title, non_empty, Theme};

pub fn render(doc: &ProfileDocument, theme: &Theme) -> Element {
    theme
        .root("creative")
        .style("display", "flex")
        .child(sidebar(doc, theme))
        .child(
            el("main")
                .style("flex", "1")
                .style("padding", "24px")
                .maybe(about(doc, theme))
                .maybe(experience(doc, theme))
                .maybe(education(doc, theme))
                .maybe(projects(doc, theme))
                .maybe(achievements(doc, theme)),
        )
}

fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

fn sidebar(doc: &ProfileDocument, theme: &Theme) -> Element {
    let info = &doc.personal_info;
    el("aside")
        .style("width", "33%")
        .style("padding", "24px")
        .style("color", "#ffffff")
        .style("background-color", &theme.primary)
        .child(el("div").class("avatar").text(initial(&info.full_name)))
        .child(el("h1").text(display_name(info)))
        .child(el("p").text(display_title(info)))
        .maybe(contact(doc))
        .maybe(skills(doc))
}

fn sidebar_heading(label: &str) -> Element {
    el("h3")
        .style("text-transform", "uppercase")
        .style("letter-spacing", "0.1em")
        .text(label)
}

fn contact(doc: &ProfileDocument) -> Option<Element> {
    let items = contact_items(&doc.personal_info);
    if items.is_empty() {
        return None;
    }
    Some(
        el("section")
            .class("contact")
            .child(sidebar_heading("Contact"))
            .children(items.into_iter().map(|c| el("p").text(c))),
    )
}

fn skills(doc: &ProfileDocument) -> Option<Element> {
    if doc.skills.is_empty() {
        return None;
    }
    let meters = doc.skills.iter().map(|skill| {
        el("div")
            .class("skill")
            .child(el("span").text(&skill.name))
            .child(el("span").style("opacity", "0.6").text(format!(" {}", skill.level.label())))
            .child(
                el("div")
                    .class("meter")
                    .style("background-color", "rgba(255, 255, 255, 0.2)")
                    .style("height", "4px")
                    .child(
                        el("div")
                            .class("meter-fill")
                            .style("background-color", "#ffffff")
                            .style("height", "4px")
                            .style("width", format!("{}%", skill.level.meter_percent())),
                    ),
            )
    });
    Some(
        el("section")
            .class("skills")
            .child(sidebar_heading("Skills"))
            .children(meters),
    )
}

/// An entry with a left rule in the primary color.
fn ruled(theme: &Theme) -> Element {
    el("div")
        .class("entry")
        .style("border-left", format!("2px solid {}", theme.primary))
        .style("padding-left", "16px")
}

fn about(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    let text = non_empty(&doc.professional_summary.summary)?;
    Some(
        el("section")
            .child(theme.heading("About Me"))
            .child(el("p").text(text)),
    )
}

fn experience(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.experience.is_empty() {
        return None;
    }
    let entries = doc.experience.iter().map(|exp| {
        ruled(theme)
            .child(el("h3").text(&exp.position))
            .child(el("p").text(format!(
                "{} | {}",
                exp.company,
                date_range(&exp.start_date, exp.display_end())
            )))
            .maybe(non_empty(&exp.description).map(|d| el("p").text(d)))
            .maybe((!exp.highlights.is_empty()).then(|| {
                el("ul")
                    .style("list-style", "none")
                    .children(exp.highlights.iter().map(|h| el("li").text(format!("• {h}"))))
            }))
    });
    Some(
        el("section")
            .child(theme.heading("Experience"))
            .children(entries),
    )
}

fn education(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.education.is_empty() {
        return None;
    }
    let entries = doc.education.iter().map(|edu| {
        ruled(theme)
            .child(el("h3").text(degree_line(&edu.degree, &edu.field)))
            .child(el("p").text(format!(
                "{} | {}",
                edu.institution,
                date_range(&edu.start_date, &edu.end_date)
            )))
    });
    Some(
        el("section")
            .child(theme.heading("Education"))
            .children(entries),
    )
}

fn projects(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.projects.is_empty() {
        return None;
    }
    let cards = doc.projects.iter().map(|project| {
        el("div")
            .class("card")
            .style("background-color", "#f8fafc")
            .style("padding", "12px")
            .child(el("h3").text(&project.name))
            .maybe(non_empty(&project.description).map(|d| el("p").text(d)))
    });
    Some(
        el("section")
            .child(theme.heading("Projects"))
            .child(
                el("div")
                    .style("display", "grid")
                    .style("grid-template-columns", "1fr 1fr")
                    .style("gap", "12px")
                    .children(cards),
            ),
    )
}

fn achievements(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.achievements.is_empty() {
        return None;
    }
    let entries = doc.achievements.iter().map(|ach| {
        let mut meta = Vec::new();
        meta.extend(non_empty(&ach.issuer));
        meta.extend(non_empty(&ach.date));
        ruled(theme)
            .child(el("h3").text(&ach.title))
            .maybe((!meta.is_empty()).then(|| el("p").text(meta.join(" | "))))
    });
    Some(
        el("section")
            .child(theme.heading("Achievements"))
            .children(entries),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplaySettings, SkillLevel, Template};
    use crate::render::{render, tests::sample_document};

    fn creative() -> DisplaySettings {
        DisplaySettings {
            template: Template::Creative,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("ada"), "A");
        assert_eq!(initial("  "), "?");
    }

    #[test]
    fn test_skill_meter_width_tracks_level() {
        let mut doc = sample_document();
        doc.skills[0].level = SkillLevel::Advanced;
        let tree = render(&doc, &creative());
        let fill = tree
            .elements()
            .into_iter()
            .find(|e| e.attr("class") == Some("meter-fill"))
            .unwrap();
        assert_eq!(fill.style_value("width"), Some("80%"));
    }

    #[test]
    fn test_sidebar_uses_primary_background() {
        let tree = render(&sample_document(), &creative());
        let aside = tree.elements().into_iter().find(|e| e.tag == "aside").unwrap();
        assert_eq!(aside.style_value("background-color"), Some("#0891b2"));
    }

    #[test]
    fn test_summary_titled_about_me() {
        let headings = render(&sample_document(), &creative()).headings();
        assert!(headings.contains(&"About Me".to_string()));
    }
}
