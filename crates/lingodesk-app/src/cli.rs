use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lingodesk_core::{RefreshOutcome, ResourceId, ResourceKind, ResourceListController};

#[derive(Parser, Debug)]
#[command(name = "lingodesk")]
#[command(about = "Terminal admin console for the language-learning content API")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override api.base-url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token; takes precedence over [auth]
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CliCommand {
    /// Interactive console (the default)
    Tui,
    /// Print one page of a resource list
    List {
        /// vocabularies, vocabulary-categories, grammar-categories, articles or videos
        #[arg(short, long)]
        kind: ResourceKind,

        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Case-insensitive text filter over the fetched page
        #[arg(short, long)]
        filter: Option<String>,

        /// Only entries in this category
        #[arg(short, long)]
        category: Option<ResourceId>,
    },
    /// Delete one resource by id
    Delete {
        #[arg(short, long)]
        kind: ResourceKind,

        #[arg(long)]
        id: ResourceId,

        /// Answer the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the default config file
    InitConfig,
}

pub async fn list(
    controller: &mut ResourceListController,
    page: u32,
    filter: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let RefreshOutcome::Failed(e) = controller.refresh(page).await {
        anyhow::bail!("{}", e.user_message());
    }
    if let Some(filter) = filter {
        controller.set_filter(filter);
    }

    let schema = controller.schema();
    let headers = schema.headers();
    let rows: Vec<Vec<String>> = controller.visible().into_iter().map(|r| schema.row(r)).collect();
    write!(out, "{}", format_table(&headers, &rows))?;

    let total = match controller.total_items() {
        Some(n) => format!(" · {n} total"),
        None => String::new(),
    };
    writeln!(out, "page {}/{}{total}", controller.page(), controller.total_pages())?;
    Ok(())
}

pub async fn delete(
    controller: &mut ResourceListController,
    id: ResourceId,
    yes: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let pending = controller.request_delete(id);
    if !yes {
        anyhow::bail!("{} Re-run with --yes to confirm.", pending.message());
    }
    let result = pending.run(controller.gateway().as_ref()).await;
    controller.finish_delete(&pending, result).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    writeln!(out, "Deleted {} #{id}", controller.kind().singular())?;
    Ok(())
}

/// Left-aligned columns padded to the widest cell, two spaces apart.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut table = String::new();
    for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect();
        table.push_str(cells.join("  ").trim_end());
        table.push('\n');
    }
    table
}

#[cfg(test)]
mod tests;
