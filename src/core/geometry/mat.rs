use std::collections::HashMap;

use log::{debug, trace};

use super::LoadError;
use crate::core::Color;

/// Material name -> diffuse display color, built from MTL text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    colors: HashMap<String, Color>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.colors.insert(name.into(), color);
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Color for `name`, or `fallback` when the material was never declared.
    pub fn resolve(&self, name: &str, fallback: Color) -> Color {
        self.get(name).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

enum MtlLine<'a> {
    NewMaterial(Option<&'a str>),
    Diffuse(Vec<&'a str>),
    Other,
}

impl<'a> MtlLine<'a> {
    fn classify(line: &'a str) -> Self {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("newmtl") => MtlLine::NewMaterial(tokens.next()),
            Some("Kd") => MtlLine::Diffuse(tokens.collect()),
            _ => MtlLine::Other,
        }
    }
}

fn parse_diffuse(fields: &[&str], line: usize) -> Result<Color, LoadError> {
    let channels = fields
        .iter()
        .map(|f| f.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| LoadError::MalformedColor { line })?;

    match channels[..] {
        [r, g, b] => Ok(Color::from_unit(r, g, b)),
        _ => Err(LoadError::MalformedColor { line }),
    }
}

/// Parses the `newmtl`/`Kd` subset of MTL text.
///
/// A `Kd` line is only looked at once a material has been named; before
/// that (or after a `newmtl` with no name) it is skipped without being
/// validated. A later `Kd` for the same material overwrites the earlier one.
pub fn parse_materials(mtl: &str) -> Result<MaterialTable, LoadError> {
    let mut table = MaterialTable::new();
    let mut current: Option<&str> = None;

    for (idx, line) in mtl.lines().enumerate() {
        match MtlLine::classify(line) {
            MtlLine::NewMaterial(name) => current = name,
            MtlLine::Diffuse(fields) => {
                let Some(name) = current else {
                    trace!("line {}: Kd without a material, skipped", idx + 1);
                    continue;
                };
                table.insert(name, parse_diffuse(&fields, idx + 1)?);
            }
            MtlLine::Other => {}
        }
    }

    debug!("Parsed {} materials", table.len());
    Ok(table)
}
