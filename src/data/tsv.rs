//! Tab-separated profile tables

use anyhow::{anyhow, bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Profiles and their names, in table column order
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    /// One profile per table column
    pub profiles: Vec<Vec<f64>>,

    /// Column headers, parallel to `profiles`
    pub names: Vec<String>,
}

impl ProfileTable {
    /// Number of profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check whether the table holds no profiles
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Dimensionality of the profiles
    pub fn dims(&self) -> usize {
        self.profiles.first().map_or(0, Vec::len)
    }
}

/// Load an expression table from disk.
///
/// See [`parse_expression_profiles`] for the layout.
pub fn read_expression_profiles<P: AsRef<Path>>(path: P) -> Result<ProfileTable> {
    let path = path.as_ref();
    log::info!("Reading profile table: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let table = parse_expression_profiles(&content)?;

    log::info!(
        "Loaded {} profiles with {} values each",
        table.len(),
        table.dims()
    );

    Ok(table)
}

/// Parse an expression table.
///
/// The first line holds the tab-separated profile names. Every following
/// non-empty line holds one value per name; column `j` across all rows
/// becomes profile `j`.
pub fn parse_expression_profiles(content: &str) -> Result<ProfileTable> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| anyhow!("profile table is empty"))?;
    let names: Vec<String> = header.split('\t').map(str::to_string).collect();

    let mut profiles: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != names.len() {
            bail!(
                "line {}: expected {} values, found {}",
                line_no,
                names.len(),
                fields.len()
            );
        }

        for (column, field) in fields.iter().enumerate() {
            let value: f64 = field.trim().parse().with_context(|| {
                format!("line {}: invalid number '{}' in column {}", line_no, field, column + 1)
            })?;
            profiles[column].push(value);
        }
    }

    Ok(ProfileTable { profiles, names })
}

/// Load a list of names, one per non-empty line
pub fn read_name_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Keep only the profiles whose names appear in `wanted`, in table order
pub fn select_profiles(table: &ProfileTable, wanted: &[String]) -> Result<ProfileTable> {
    let index: HashMap<&str, usize> = table
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    if let Some(missing) = wanted.iter().find(|name| !index.contains_key(name.as_str())) {
        bail!("profile '{}' is not in the table", missing);
    }

    let wanted: HashSet<&str> = wanted.iter().map(String::as_str).collect();
    let (profiles, names) = table
        .profiles
        .iter()
        .zip(&table.names)
        .filter(|(_, name)| wanted.contains(name.as_str()))
        .map(|(profile, name)| (profile.clone(), name.clone()))
        .unzip();

    Ok(ProfileTable { profiles, names })
}
