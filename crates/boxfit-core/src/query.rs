//! Parser for the `inkscape --query-all` text contract: one `id,x,y,width,height` line per object.

use crate::geom::BBox;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Object id to bounding box, ordered by id.
pub type GeometryMap = BTreeMap<String, BBox>;

pub fn parse_query_all(output: &str) -> Result<GeometryMap> {
    let mut out = GeometryMap::new();
    for (idx, raw) in output.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (id, bbox) = parse_line(line).map_err(|message| Error::MalformedGeometry {
            line: idx + 1,
            message,
        })?;
        out.insert(id.to_string(), bbox);
    }
    tracing::debug!(objects = out.len(), "parsed query-all output");
    Ok(out)
}

fn parse_line(line: &str) -> std::result::Result<(&str, BBox), String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }
    let id = fields[0].trim();
    if id.is_empty() {
        return Err("empty object id".to_string());
    }
    let mut nums = [0.0f64; 4];
    for (slot, field) in nums.iter_mut().zip(&fields[1..]) {
        *slot = field
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("not a number: {field:?}"))?;
        if !slot.is_finite() {
            return Err(format!("not a finite number: {field:?}"));
        }
    }
    Ok((id, BBox::new(nums[0], nums[1], nums[2], nums[3])))
}
