use crate::models::{non_blank, ProfileDocument};

use super::markup::{el, Element};
use super::{contact_items, date_range, degree_line, display_name, display_title, non_empty, Theme};

pub fn render(doc: &ProfileDocument, theme: &Theme) -> Element {
    theme
        .root("modern")
        .style("padding", "32px")
        .child(header(doc, theme))
        .maybe(summary(doc, theme))
        .maybe(experience(doc, theme))
        .maybe(skills(doc, theme))
        .maybe(education(doc, theme))
        .maybe(projects(doc, theme))
        .maybe(achievements(doc, theme))
}

fn header(doc: &ProfileDocument, theme: &Theme) -> Element {
    let info = &doc.personal_info;
    let contacts = contact_items(info);
    el("header")
        .style("border-bottom", format!("2px solid {}", theme.primary))
        .style("padding-bottom", "16px")
        .style("margin-bottom", "24px")
        .child(el("h1").style("color", &theme.primary).text(display_name(info)))
        .child(el("p").style("color", "#475569").text(display_title(info)))
        .maybe((!contacts.is_empty()).then(|| {
            el("div")
                .class("contact")
                .children(contacts.into_iter().map(|c| el("span").style("margin-right", "16px").text(c)))
        }))
}

fn summary(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    let text = non_empty(&doc.professional_summary.summary)?;
    Some(
        el("section")
            .child(theme.heading("Professional Summary"))
            .child(el("p").text(text)),
    )
}

fn experience(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.experience.is_empty() {
        return None;
    }
    let entries = doc.experience.iter().map(|exp| {
        let company_line = match non_empty(&exp.location) {
            Some(location) => format!("{} • {}", exp.company, location),
            None => exp.company.clone(),
        };
        el("div")
            .class("entry")
            .child(el("h3").text(&exp.position))
            .child(el("p").style("color", "#475569").text(company_line))
            .child(
                el("span")
                    .class("dates")
                    .text(date_range(&exp.start_date, exp.display_end())),
            )
            .maybe(non_empty(&exp.description).map(|d| el("p").text(d)))
            .maybe(bullets(&exp.highlights, theme))
    });
    Some(
        el("section")
            .child(theme.heading("Experience"))
            .children(entries),
    )
}

fn bullets(items: &[String], theme: &Theme) -> Option<Element> {
    if items.is_empty() {
        return None;
    }
    Some(el("ul").style("list-style", "none").children(items.iter().map(|item| {
        el("li")
            .child(el("span").style("color", &theme.primary).text("• "))
            .text(item)
    })))
}

fn skills(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.skills.is_empty() {
        return None;
    }
    let chips = doc.skills.iter().map(|skill| {
        el("span")
            .class("skill")
            .style("color", &theme.primary)
            .style("border", format!("1px solid {}", theme.primary))
            .style("padding", "2px 8px")
            .style("margin-right", "6px")
            .text(&skill.name)
    });
    Some(
        el("section")
            .child(theme.heading("Skills"))
            .child(el("div").children(chips)),
    )
}

fn education(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.education.is_empty() {
        return None;
    }
    let entries = doc.education.iter().map(|edu| {
        el("div")
            .class("entry")
            .child(el("h3").text(degree_line(&edu.degree, &edu.field)))
            .child(el("p").style("color", "#475569").text(&edu.institution))
            .child(
                el("span")
                    .class("dates")
                    .text(date_range(&edu.start_date, &edu.end_date)),
            )
            .maybe(non_blank(&edu.gpa).map(|gpa| el("p").text(format!("GPA: {gpa}"))))
            .maybe(bullets(&edu.achievements, theme))
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
    let entries = doc.projects.iter().map(|project| {
        el("div")
            .class("entry")
            .child(el("h3").text(&project.name))
            .maybe(non_empty(&project.description).map(|d| el("p").text(d)))
            .maybe((!project.technologies.is_empty()).then(|| {
                el("p")
                    .style("color", "#64748b")
                    .text(format!("Technologies: {}", project.technologies.join(", ")))
            }))
    });
    Some(
        el("section")
            .child(theme.heading("Projects"))
            .children(entries),
    )
}

fn achievements(doc: &ProfileDocument, theme: &Theme) -> Option<Element> {
    if doc.achievements.is_empty() {
        return None;
    }
    let entries = doc.achievements.iter().map(|ach| {
        el("div")
            .class("entry")
            .child(el("strong").text(&ach.title))
            .maybe(non_empty(&ach.issuer).map(|issuer| el("span").text(format!(" • {issuer}"))))
            .maybe(non_empty(&ach.date).map(|date| el("span").class("dates").text(date)))
    });
    Some(
        el("section")
            .child(theme.heading("Certifications & Achievements"))
            .children(entries),
    )
}
