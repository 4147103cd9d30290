//! Renders a [`SummaryResult`] into a meeting-minutes `.docx`, entirely
//! in memory. The layout is fixed: title, summary, action-item table,
//! decision bullets, timeline.

use std::io::Cursor;

use anyhow::{Context, Result};
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, Start, Style, StyleType, Table, TableCell, TableRow,
};

use crate::summary::SummaryResult;

pub const ATTACHMENT_FILENAME: &str = "meeting_minutes.docx";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const DEFAULT_TITLE: &str = "Meeting Minutes";
const BULLET_NUMBERING: usize = 1;

/// Build the document and return the packed `.docx` bytes. Nothing is
/// streamed: assembly either completes fully or fails with no output.
pub fn render_minutes(summary: &SummaryResult) -> Result<Vec<u8>> {
    let title = summary.title.as_deref().unwrap_or(DEFAULT_TITLE);

    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(56)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING).add_level(Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )))
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING))
        .add_paragraph(text_paragraph(title).style("Title"))
        .add_paragraph(heading("📌 요약 (Summary)"))
        .add_paragraph(text_paragraph(&summary.summary))
        .add_paragraph(heading("⚡️ 액션 아이템 (Action Items)"))
        .add_table(action_item_table(summary))
        .add_paragraph(heading("⚖️ 결정 사항 (Decisions)"));

    for decision in &summary.key_decisions {
        docx = docx.add_paragraph(
            text_paragraph(decision)
                .numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0)),
        );
    }

    docx = docx.add_paragraph(heading("⏱️ 타임라인 (Timeline)"));
    for entry in &summary.timeline {
        let time = entry.time.as_deref().unwrap_or("");
        let topic = entry.topic.as_deref().unwrap_or("");
        docx = docx.add_paragraph(text_paragraph(&format!("[{}] {}", time, topic)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .context("failed to pack docx archive")?;
    Ok(cursor.into_inner())
}

fn heading(text: &str) -> Paragraph {
    text_paragraph(text).style("Heading1")
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(text_paragraph(text))
}

/// Header row plus one row per action item; absent sub-fields render as
/// the `-` placeholder.
fn action_item_table(summary: &SummaryResult) -> Table {
    let mut rows = vec![TableRow::new(vec![
        cell("담당자"),
        cell("할 일"),
        cell("마감일"),
    ])];

    for item in &summary.action_items {
        rows.push(TableRow::new(vec![
            cell(item.owner.as_deref().unwrap_or("-")),
            cell(item.task.as_deref().unwrap_or("-")),
            cell(item.deadline.as_deref().unwrap_or("-")),
        ]));
    }

    Table::new(rows)
}
