//! Catalog Seeding
//!
//! Administrative bulk import: replaces all ingredient rows from a JSON
//! file (`[{"name": ..., "measurement_unit": ...}, ...]`) and upserts the
//! three fixed tags. Invoked via `api-server import-ingredients <file>`.

use std::path::Path;

use sqlx::SqlitePool;

use shared::models::IngredientSeed;

use crate::utils::AppError;

/// Fixed tag set: (name, color, slug)
pub const FIXED_TAGS: &[(&str, &str, &str)] = &[
    ("breakfast", "#E26C2D", "breakfast"),
    ("lunch", "#49B64E", "lunch"),
    ("dinner", "#8775D2", "dinner"),
];

/// Replace all ingredients from a JSON file and seed the fixed tags
///
/// Returns the number of ingredients inserted. Runs in one transaction so
/// a malformed row never leaves the catalog half-replaced.
pub async fn import_ingredients(pool: &SqlitePool, path: &Path) -> Result<usize, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::invalid(format!("Cannot read {}: {e}", path.display())))?;
    let seeds: Vec<IngredientSeed> = serde_json::from_str(&raw)
        .map_err(|e| AppError::invalid(format!("Malformed ingredient JSON: {e}")))?;

    let count = replace_ingredients(pool, &seeds).await?;
    seed_fixed_tags(pool).await?;

    Ok(count)
}

/// Delete every ingredient row and insert the given set
pub async fn replace_ingredients(
    pool: &SqlitePool,
    seeds: &[IngredientSeed],
) -> Result<usize, AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    sqlx::query("DELETE FROM ingredient")
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    for seed in seeds {
        sqlx::query("INSERT INTO ingredient (name, measurement_unit) VALUES (?1, ?2)")
            .bind(&seed.name)
            .bind(&seed.measurement_unit)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(seeds.len())
}

/// Upsert the fixed breakfast/lunch/dinner tags (idempotent)
pub async fn seed_fixed_tags(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, color, slug) in FIXED_TAGS {
        sqlx::query(
            "INSERT INTO tag (name, color, slug) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET
               color = excluded.color,
               slug = excluded.slug",
        )
        .bind(name)
        .bind(color)
        .bind(slug)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    }
    Ok(())
}
