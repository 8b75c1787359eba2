//! Steps shared by every list/detail page.

use anyhow::{Context, Result};

use super::output;
use crate::api::{ResourceClient, ResourceKind};
use crate::dialogs::Prompter;

/// Fetch a collection. Failures are logged and yield an empty list.
pub async fn load_list<K: ResourceKind>(client: &ResourceClient<K>) -> Vec<K::Record> {
    let pb = output::spinner(&format!("Loading {}s...", K::NAME));
    let result = client.list().await;
    pb.finish_and_clear();

    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Error loading {}s: {}", K::NAME, e);
            Vec::new()
        }
    }
}

pub async fn fetch_one<K: ResourceKind>(client: &ResourceClient<K>, id: i64) -> Result<K::Record> {
    client
        .get(id)
        .await
        .with_context(|| format!("Failed to load {} {}", K::NAME, id))
}

pub async fn create<K: ResourceKind>(
    client: &ResourceClient<K>,
    payload: &K::Create,
) -> Result<K::Record> {
    let pb = output::spinner(&format!("Creating {}...", K::NAME));
    let result = client.create(payload).await;
    pb.finish_and_clear();

    let record = result.with_context(|| format!("Failed to create {}", K::NAME))?;
    output::success(&format!("Created {}", K::NAME));
    Ok(record)
}

pub async fn update<K: ResourceKind>(
    client: &ResourceClient<K>,
    id: i64,
    partial: &K::Update,
) -> Result<K::Record> {
    let pb = output::spinner(&format!("Saving {}...", K::NAME));
    let result = client.update(id, partial).await;
    pb.finish_and_clear();

    let record = result.with_context(|| format!("Failed to update {} {}", K::NAME, id))?;
    output::success(&format!("Updated {} #{}", K::NAME, id));
    Ok(record)
}

/// Ask, then delete. Returns whether a DELETE was issued and succeeded.
pub async fn delete_with_confirm<K: ResourceKind>(
    client: &ResourceClient<K>,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<bool> {
    if !force {
        let prompt = format!("Are you sure you want to delete this {} (#{})?", K::NAME, id);
        if !prompter.confirm(&prompt, false)? {
            println!("Cancelled.");
            return Ok(false);
        }
    }

    client
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete {} {}", K::NAME, id))?;

    output::success(&format!("Deleted {} #{}", K::NAME, id));
    Ok(true)
}
