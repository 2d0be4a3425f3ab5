//! Sub-command execution against the collection store.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Datelike, Utc};
use tracing::{info, warn};

use koleksi_core::{
    CatalogEntry, Category, CollectionFilter, CollectionStore, FileCandidate, SubmissionDraft,
    ValidationRules,
};

use crate::cli::Command;

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Everything a command needs.
pub struct Context {
    pub store: CollectionStore,
    pub rules: ValidationRules,
    pub json: bool,
}

pub fn execute(command: Command, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::List { category, search } => {
            let filter = CollectionFilter {
                search,
                category,
            };
            let entries = ctx.store.search(&filter)?;
            if ctx.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else if entries.is_empty() {
                writeln!(out, "No collection entries found")?;
            } else {
                for entry in &entries {
                    write_row(out, entry)?;
                }
            }
        }
        Command::Show { id } => {
            let Some(entry) = ctx.store.get(id)? else {
                bail!("Collection entry {} not found", id);
            };
            write_entry(out, ctx.json, &entry)?;
        }
        Command::Add {
            title,
            category,
            presenter,
            summary,
            file,
        } => {
            let mut draft = SubmissionDraft::new(category);
            draft.title = title;
            draft.presenter = presenter;
            draft.summary = summary;
            draft.stage_file(&ctx.rules, read_candidate(&file)?)?;

            let entry = ctx.store.add(draft.to_new_entry()?)?;
            info!(id = entry.id, "Collection entry added");
            if ctx.json {
                write_entry(out, true, &entry)?;
            } else {
                writeln!(out, "Added \"{}\" with id {}", entry.title, entry.id)?;
            }
        }
        Command::Edit {
            id,
            title,
            category,
            presenter,
            summary,
            file,
        } => {
            let Some(existing) = ctx.store.get(id)? else {
                bail!("Collection entry {} not found", id);
            };

            let mut draft = SubmissionDraft::from_entry(&existing);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(presenter) = presenter {
                draft.presenter = presenter;
            }
            if let Some(summary) = summary {
                draft.summary = summary;
            }
            if let Some(category) = category {
                draft.set_category(&ctx.rules, category)?;
            }
            let kept_file = file.is_none() && draft.category() != existing.category;
            if let Some(file) = file {
                draft.stage_file(&ctx.rules, read_candidate(&file)?)?;
            } else if kept_file {
                warn!(
                    id,
                    file = %existing.file_url,
                    "Category changed without a new file; keeping the existing file name"
                );
            }

            let Some(entry) = ctx.store.update(id, draft.to_update()?)? else {
                bail!("Collection entry {} not found", id);
            };
            if ctx.json {
                write_entry(out, true, &entry)?;
            } else {
                writeln!(out, "Updated \"{}\" (id {})", entry.title, entry.id)?;
                if kept_file {
                    writeln!(
                        out,
                        "Note: kept file {} from category {}; it may not match {}",
                        entry.file_url,
                        existing.category.label(),
                        entry.category.label()
                    )?;
                }
            }
        }
        Command::Remove { id } => {
            if ctx.store.remove(id)? {
                writeln!(out, "Removed collection entry {}", id)?;
            } else {
                writeln!(out, "No collection entry with id {}, nothing removed", id)?;
            }
        }
        Command::Validate { category, file } => {
            let candidate = read_candidate(&file)?;
            let rules = ctx.rules.rules_for(category);
            ctx.rules.validate(category, &candidate)?;
            writeln!(
                out,
                "{} ({}, {}) is accepted for {} [{}]",
                candidate.name,
                candidate.mime_type,
                format_megabytes(candidate.size_bytes),
                category.label(),
                rules.description()
            )?;
        }
        Command::Counts => {
            let counts = ctx.store.category_counts()?;
            if ctx.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&counts)?)?;
            } else {
                writeln!(out, "All: {}", counts.all)?;
                for category in Category::ALL {
                    writeln!(out, "{}: {}", category.label(), counts.get(category))?;
                }
            }
        }
    }

    Ok(())
}

fn read_candidate(path: &Path) -> Result<FileCandidate> {
    FileCandidate::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_row(out: &mut dyn Write, entry: &CatalogEntry) -> Result<()> {
    writeln!(
        out,
        "{:>4}  {:<7} {} - {} ({})",
        entry.id,
        entry.category.label(),
        entry.title,
        entry.presenter,
        format_date(&entry.created_at)
    )?;
    Ok(())
}

fn write_entry(out: &mut dyn Write, json: bool, entry: &CatalogEntry) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(entry)?)?;
        return Ok(());
    }

    writeln!(out, "Id:        {}", entry.id)?;
    writeln!(out, "Title:     {}", entry.title)?;
    writeln!(out, "Category:  {}", entry.category.label())?;
    writeln!(out, "Presenter: {}", entry.presenter)?;
    writeln!(out, "Summary:   {}", entry.summary)?;
    writeln!(out, "File:      {}", entry.file_url)?;
    writeln!(out, "Created:   {}", format_date(&entry.created_at))?;
    Ok(())
}

/// Long Indonesian date, e.g. `15 Maret 2023`.
fn format_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS_ID[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
