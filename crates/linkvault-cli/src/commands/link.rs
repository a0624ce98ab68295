//! Link command handlers
//!
//! Each handler validates its input before touching the store, then
//! re-reads the store to render the result.

use anyhow::{bail, Context, Result};

use linkvault_core::{Categories, KeyValueStorage, LinkDraft, LinkPatch, Store};

use crate::output::{short_id, Output};
use crate::prompt::{confirm, is_interactive, prompt_with_default};

/// Create a new link
pub fn add<S: KeyValueStorage>(
    store: &mut Store<S>,
    categories: &Categories,
    draft: LinkDraft,
    output: &Output,
) -> Result<()> {
    let new_link = draft.validate(categories)?;
    let link = store.add(new_link).context("Failed to add link")?;

    output.success("Link added successfully!");
    output.print_link(&link);
    Ok(())
}

/// List links, optionally filtered by search text and category
pub fn list<S: KeyValueStorage>(
    store: &Store<S>,
    search: Option<String>,
    category: Option<String>,
    output: &Output,
) -> Result<()> {
    let search = search.unwrap_or_default();
    let filtered = !search.is_empty() || category.is_some();

    let links = store.query(&search, category.as_deref());
    output.print_links(&links, filtered);
    Ok(())
}

/// Show a single link
pub fn show<S: KeyValueStorage>(store: &Store<S>, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(&id, store)?;
    if let Some(link) = store.get(&id) {
        output.print_link(link);
    }
    Ok(())
}

/// Edit a link
///
/// Fields given on the command line are applied directly. With no fields
/// and an interactive terminal, each field is prompted for in turn.
pub fn edit<S: KeyValueStorage>(
    store: &mut Store<S>,
    categories: &Categories,
    id: String,
    patch: LinkPatch,
    output: &Output,
) -> Result<()> {
    let id = resolve_link_id(&id, store)?;

    let patch = if patch.is_empty() && is_interactive() && output.should_prompt() {
        prompt_patch(store, categories, &id)?
    } else {
        patch
    };

    if patch.is_empty() {
        output.message("Nothing to change.");
        return Ok(());
    }

    let changes = patch.validate(categories)?;
    store
        .update(&id, changes)
        .context("Failed to update link")?;

    output.success("Link updated successfully!");
    if let Some(link) = store.get(&id) {
        output.print_link(link);
    }
    Ok(())
}

/// Delete a link
pub fn delete<S: KeyValueStorage>(
    store: &mut Store<S>,
    id: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_link_id(&id, store)?;

    if !yes && output.should_prompt() {
        if let Some(link) = store.get(&id) {
            println!("Delete link: {} - {}", short_id(&link.id), link.title);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(&id).context("Failed to delete link")?;

    output.success("Link deleted");
    Ok(())
}

/// Open a link in the default browser
pub fn open<S: KeyValueStorage>(store: &Store<S>, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(&id, store)?;
    let Some(link) = store.get(&id) else {
        bail!("No link found matching: {}", id);
    };

    open::that(&link.url).with_context(|| format!("Failed to open {}", link.url))?;
    output.success(&format!("Opened {}", link.url));
    Ok(())
}

/// Search links
pub fn search<S: KeyValueStorage>(store: &Store<S>, query: String, output: &Output) -> Result<()> {
    let links = store.query(&query, None);
    output.print_links(&links, true);
    Ok(())
}

/// Show category badges with counts
pub fn categories<S: KeyValueStorage>(store: &Store<S>, output: &Output) -> Result<()> {
    output.print_categories(store.len(), &store.category_counts());
    Ok(())
}

/// Remove every saved link
pub fn reset<S: KeyValueStorage>(store: &mut Store<S>, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() {
        println!("This removes all {} saved link(s).", store.len());
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.clear().context("Failed to reset links")?;
    output.success("All links removed");
    Ok(())
}

/// Resolve a link ID (supports full ID or unique prefix)
fn resolve_link_id<S: KeyValueStorage>(id: &str, store: &Store<S>) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        bail!("No link found matching: (empty ID)");
    }

    if store.contains(id) {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = store
        .list()
        .iter()
        .filter(|l| l.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No link found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Ask for each editable field, keeping the current value on empty input
fn prompt_patch<S: KeyValueStorage>(
    store: &Store<S>,
    categories: &Categories,
    id: &str,
) -> Result<LinkPatch> {
    let Some(link) = store.get(id) else {
        return Ok(LinkPatch::new());
    };

    println!("Editing link: {}", link.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = LinkPatch::new();
    patch.title = prompt_with_default("Title", &link.title)?;
    patch.url = prompt_with_default("URL", &link.url)?;
    patch.description =
        prompt_with_default("Description (\"-\" clears)", link.description.as_deref().unwrap_or(""))?
            .map(|d| if d == "-" { String::new() } else { d });

    let choices: Vec<&str> = categories.iter().collect();
    println!("Categories: {}", choices.join(", "));
    patch.category = prompt_with_default("Category", &link.category)?;

    Ok(patch)
}
