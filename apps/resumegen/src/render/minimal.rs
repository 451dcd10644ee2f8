use crate::models::{non_blank, ProfileDocument};

use super::markup::{el, Element, Node};
use super::{contact_items, date_range, degree_line, display_name, display_title, non_empty, Theme};

pub fn render(doc: &ProfileDocument, theme: &Theme) -> Element {
    theme
        .root("minimal")
        .style("padding", "32px")
        .child(header(doc))
        .maybe(summary(doc))
        .maybe(experience(doc, theme))
        .maybe(skills(doc, theme))
        .maybe(education(doc, theme))
        .maybe(projects(doc, theme))
        .maybe(achievements(doc, theme))
}

fn header(doc: &ProfileDocument) -> Element {
    let info = &doc.personal_info;
    let contacts = contact_items(info);

    // Contact values separated by bullets, no leading or trailing separator.
    let mut line: Vec<Node> = Vec::new();
    for (i, contact) in contacts.iter().enumerate() {
        if i > 0 {
            line.push(el("span").text(" • ").into());
        }
        line.push(el("span").text(*contact).into());
    }

    el("header")
        .style("text-align", "center")
        .style("margin-bottom", "32px")
        .child(
            el("h1")
                .style("font-weight", "300")
                .style("letter-spacing", "0.05em")
                .text(display_name(info)),
        )
        .child(el("p").style("color", "#64748b").text(display_title(info)))
        .maybe((!line.is_empty()).then(|| el("div").class("contact").children(line)))
}

fn heading(theme: &Theme, label: &str) -> Element {
    theme
        .heading(label)
        .style("text-transform", "uppercase")
        .style("letter-spacing", "0.1em")
        .style("border-bottom", format!("1px solid {}", theme.primary))
}

fn summary(doc: &ProfileDocument) -> Option<Element> {
    let text = non_empty(&doc.professional_summary.summary)?;
    Some(
        el("section")
            .style("text-align", "center")
            .child(el("p").style("color", "#475569").text(text)),
    )
}

fn experience(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.experience.is_empty() {
        return None;
    }
    let entries = doc.experience.iter().map(|exp| {
        let company_line = match non_empty(&exp.location) {
            Some(location) => format!("{}, {}", exp.company, location),
            None => exp.company.clone(),
        };
        el("div")
            .class("entry")
            .child(el("strong").text(&exp.position))
            .child(
                el("span")
                    .class("dates")
                    .text(format!(" {}", date_range(&exp.start_date, exp.display_end()))),
            )
            .child(el("p").style("color", "#64748b").text(company_line))
            .maybe(dashed(&exp.highlights))
    });
    Some(el("section").child(heading(theme, "Experience")).children(entries))
}

fn dashed(items: &[String]) -> Option<Element> {
    if items.is_empty() {
        return None;
    }
    Some(
        el("ul")
            .style("list-style", "none")
            .children(items.iter().map(|item| el("li").text(format!("— {item}")))),
    )
}

fn skills(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.skills.is_empty() {
        return None;
    }
    let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
    Some(
        el("section")
            .child(heading(theme, "Skills"))
            .child(el("p").text(names.join(" • "))),
    )
}

fn education(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.education.is_empty() {
        return None;
    }
    let entries = doc.education.iter().map(|edu| {
        el("div")
            .class("entry")
            .child(el("strong").text(degree_line(&edu.degree, &edu.field)))
            .maybe(non_empty(&edu.end_date).map(|d| el("span").class("dates").text(format!(" {d}"))))
            .child(el("p").style("color", "#64748b").text(&edu.institution))
            .maybe(non_blank(&edu.gpa).map(|gpa| el("p").text(format!("GPA: {gpa}"))))
            .maybe(dashed(&edu.achievements))
    });
    Some(el("section").child(heading(theme, "Education")).children(entries))
}

fn projects(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.projects.is_empty() {
        return None;
    }
    let entries = doc.projects.iter().map(|project| {
        let mut line = project.name.clone();
        if !project.technologies.is_empty() {
            line.push_str(&format!(" ({})", project.technologies.join(", ")));
        }
        el("div")
            .class("entry")
            .child(el("strong").text(line))
            .maybe(non_empty(&project.description).map(|d| el("p").text(d)))
    });
    Some(el("section").child(heading(theme, "Projects")).children(entries))
}

fn achievements(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.achievements.is_empty() {
        return None;
    }
    let entries = doc.achievements.iter().map(|ach| {
        let mut line = ach.title.clone();
        if let Some(issuer) = non_empty(&ach.issuer) {
            line.push_str(&format!(", {issuer}"));
        }
        if let Some(date) = non_empty(&ach.date) {
            line.push_str(&format!(" ({date})"));
        }
        el("p").text(line)
    });
    Some(
        el("section")
            .child(heading(theme, "Achievements"))
            .children(entries),
    )
}

#[cfg(test)]
mod tests {
    use crate::models::{DisplaySettings, ProfileDocument, Template};
    use crate::render::{render, tests::sample_document};

    fn minimal() -> DisplaySettings {
        DisplaySettings {
            template: Template::Minimal,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_has_no_heading() {
        let tree = render(&sample_document(), &minimal());
        assert!(tree.text_content().contains("Writes programs for engines."));
        assert!(!tree.headings().iter().any(|h| h.contains("Summary")));
    }

    #[test]
    fn test_contact_separators_only_between_values() {
        let mut doc = ProfileDocument::default();
        doc.personal_info.email = "a@b.c".to_string();
        doc.personal_info.location = "London".to_string();
        let text = render(&doc, &minimal()).text_content();
        assert!(text.contains("a@b.c • London"));
        assert!(!text.contains("• •"));
    }

    #[test]
    fn test_skills_joined_on_one_line() {
        let mut doc = sample_document();
        doc.skills.push(crate::models::Skill {
            name: "Go".to_string(),
            ..Default::default()
        });
        assert!(render(&doc, &minimal()).text_content().contains("Rust • Go"));
    }
}
