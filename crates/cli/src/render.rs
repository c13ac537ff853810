//! Human-readable rendering of runs, results, bookmarks and ideas.
//!
//! Every function returns a `String` so output can be tested without a
//! terminal. Absent result fields are skipped entirely.

use colored::Colorize;
use rk_protocol::bookmark_models::Bookmark;
use rk_protocol::ipc::Event;
use rk_protocol::research_models::{IdeaSection, ResearchResult};
use rk_protocol::stage_models::AgentStage;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// A `[####----] 48%` style progress bar.
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(100);
    let filled = usize::from(progress) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress
    )
}

/// One line for `event`, or `None` for events that are not shown.
pub fn event_line(event: &Event, stages: &[AgentStage]) -> Option<String> {
    match event {
        Event::RunStarted { topic, .. } => {
            Some(format!("{} {}", "Researching".bold(), topic.cyan()))
        }
        Event::StageStarted {
            stage_id, progress, ..
        } => {
            let name = stages
                .iter()
                .find(|s| &s.id == stage_id)
                .map(|s| s.display_name.as_str())
                .unwrap_or(stage_id.as_str());
            Some(format!("{} {}", progress_bar(*progress), name.yellow()))
        }
        Event::ResearchRequested { .. } => Some(format!(
            "{} {}",
            " ".repeat(BAR_WIDTH + 7),
            "Contacting research service...".dimmed()
        )),
        Event::RunError { error, .. } => {
            Some(format!("{} {}", "Run failed:".red().bold(), error))
        }
        Event::RunCompleted { .. } => Some(format!("{} Done", progress_bar(100))),
        Event::RunStatusUpdate { .. } => None,
    }
}

/// Render a research result, one section per present field.
pub fn result(result: &ResearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {:.1}/10", "Score:".bold(), result.score);

    if let Some(paper) = &result.top_paper {
        let _ = writeln!(out, "\n{}", "Top paper".bold().underline());
        let _ = writeln!(out, "  {}", paper.title.green());
        if !paper.authors.is_empty() {
            let _ = writeln!(out, "  {}", paper.authors.join(", ").dimmed());
        }
        if let Some(summary) = &paper.summary {
            let _ = writeln!(out, "  {summary}");
        }
        for link in [&paper.link, &paper.pdf_link].into_iter().flatten() {
            let _ = writeln!(out, "  {}", link.blue());
        }
    }

    if let Some(related) = &result.related {
        section(&mut out, "Related", related.lines());
    }

    if let Some(papers) = &result.related_papers {
        let lines: Vec<String> = papers
            .iter()
            .map(|p| match p.score {
                Some(score) => format!("{} ({score:.1})", p.title),
                None => p.title.clone(),
            })
            .collect();
        section(&mut out, "Related papers", lines.iter().map(String::as_str));
    }

    if let Some(insights) = &result.insights {
        section(&mut out, "Insights", insights.iter().map(String::as_str));
    }

    if let Some(feedback) = &result.meta_feedback {
        section(&mut out, "Meta-review", feedback.iter().map(String::as_str));
    }

    out
}

fn section<'a>(out: &mut String, title: &str, lines: impl IntoIterator<Item = &'a str>) {
    let _ = writeln!(out, "\n{}", title.bold().underline());
    for line in lines {
        let _ = writeln!(out, "  - {line}");
    }
}

pub fn bookmarks(bookmarks: &[Bookmark]) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks yet.\n".dimmed().to_string();
    }

    let mut out = String::new();
    for bookmark in bookmarks {
        let _ = writeln!(
            out,
            "{}  {}  {:.1}  {}",
            bookmark.id.dimmed(),
            bookmark.date.format("%Y-%m-%d"),
            bookmark.score,
            bookmark.topic.cyan()
        );
        if let Some(paper) = &bookmark.top_paper {
            let _ = writeln!(out, "    {}", paper.title);
        }
    }
    out
}

pub fn ideas(sections: &[IdeaSection]) -> String {
    if sections.is_empty() {
        return "No ideas returned.\n".dimmed().to_string();
    }

    let mut out = String::new();
    for idea_section in sections {
        section(
            &mut out,
            &idea_section.title,
            idea_section.ideas.iter().map(String::as_str),
        );
    }
    out
}
