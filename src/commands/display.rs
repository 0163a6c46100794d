//! Plain-text display of the information map.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::fields;

/// Writes the fields of `map` to `out`, one per line.
///
/// Fields follow the selector order when `selectors` is given, otherwise
/// sorted order. Long form left-justifies names to the longest one
/// (`name = value`); short form prints values only.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn display(
    out: &mut dyn Write,
    map: &BTreeMap<String, String>,
    short: bool,
    selectors: Option<&[String]>,
) -> io::Result<()> {
    let order = fields::ordered(map, selectors);

    if short {
        for field in &order {
            writeln!(out, "{}", map[field])?;
        }
        return Ok(());
    }

    let width = order.iter().map(String::len).max().unwrap_or(0);
    for field in &order {
        writeln!(out, "{field:<width$} = {}", map[field])?;
    }
    Ok(())
}
